//! Spectral measurement helpers for tests and diagnostics.

use gfsk_core::types::{sample_consts, ComplexSample, RealSample};
use gfsk_core::DspError;
use num::Zero;
use rustfft::FftPlanner;

/// Normalized DFT magnitude of `signal` at a single frequency.
///
/// Direct evaluation of one bin, exact for any frequency rather than
/// only the FFT grid.
pub fn tone_magnitude(
    signal: &[RealSample],
    sample_rate_hz: RealSample,
    freq_hz: RealSample,
) -> Result<RealSample, DspError> {
    if signal.is_empty() {
        return Err(DspError::EmptyInput { what: "signal" });
    }
    let w = -2.0 * sample_consts::PI * freq_hz / sample_rate_hz;
    let acc = signal
        .iter()
        .enumerate()
        .fold(ComplexSample::zero(), |acc, (n, &v)| {
            acc + v * ComplexSample::new(0.0, w * n as RealSample).exp()
        });
    Ok(acc.norm() / signal.len() as RealSample)
}

/// One-sided magnitude spectrum, `len/2 + 1` bins from DC to Nyquist.
pub fn magnitude_spectrum(signal: &[RealSample]) -> Result<Vec<RealSample>, DspError> {
    if signal.is_empty() {
        return Err(DspError::EmptyInput { what: "signal" });
    }
    let mut buf: Vec<ComplexSample> =
        signal.iter().map(|&v| ComplexSample::new(v, 0.0)).collect();
    let fft = FftPlanner::new().plan_fft_forward(buf.len());
    fft.process(&mut buf);
    let n = signal.len() as RealSample;
    Ok(buf[..signal.len() / 2 + 1].iter().map(|c| c.norm() / n).collect())
}

/// Index of the strongest bin in a one-sided spectrum.
pub fn peak_bin(spectrum: &[RealSample]) -> Result<usize, DspError> {
    if spectrum.is_empty() {
        return Err(DspError::EmptyInput { what: "spectrum" });
    }
    let mut best = 0;
    for (i, &v) in spectrum.iter().enumerate() {
        if v > spectrum[best] {
            best = i;
        }
    }
    Ok(best)
}
