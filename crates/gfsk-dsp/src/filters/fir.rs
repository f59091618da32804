//! Tabulated FIR filters.
//!
//! Both tables come from the hardware reference design: a 29-tap
//! Gaussian pulse shaper for the modulator and a 29-tap Hilbert
//! transformer for the image rejection chain.

use gfsk_core::types::RealSample;

/// Gaussian pulse shaping taps, 29 entries, symmetric, un-normalized.
/// The modulator rescales these to unit sum so one symbol advances the
/// phase by exactly one modulation-index step.
pub const GAUSSIAN_PULSE_TAPS: [RealSample; 29] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.015625, 0.0625, 0.15625, 0.328125, 0.59375, 0.9375, 1.265625,
    1.484375,
    1.265625, 0.9375, 0.59375, 0.328125, 0.15625, 0.0625, 0.015625,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Hilbert transformer taps, 29 entries, antisymmetric with zero
/// center tap. Group delay is 14 samples.
pub const HILBERT_TAPS: [RealSample; 29] = [
    0.0, 0.0, 0.0, 0.002, 0.0, 0.008, 0.0, 0.026, 0.0, 0.068, 0.0,
    0.17, 0.0, 0.6212,
    0.0,
    -0.6212, 0.0, -0.17, 0.0, -0.068, 0.0, -0.026, 0.0, -0.008, 0.0,
    -0.002, 0.0, 0.0, 0.0,
];

/// Causal FIR convolution with implicit zero history before the first
/// sample. Output length equals input length.
pub fn apply_fir(taps: &[RealSample], input: &[RealSample]) -> Vec<RealSample> {
    let mut out = Vec::with_capacity(input.len());
    for i in 0..input.len() {
        let mut acc = 0.0;
        for (j, t) in taps.iter().enumerate() {
            if j > i {
                break;
            }
            acc += t * input[i - j];
        }
        out.push(acc);
    }
    out
}

/// Delay in samples to the center tap of an odd-length linear-phase FIR.
pub const fn center_tap_delay(ntaps: usize) -> usize {
    (ntaps - 1) / 2
}
