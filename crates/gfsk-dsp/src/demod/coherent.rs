//! Coherent correlation demodulator.
//!
//! The waveform is correlated against the two keying tones at
//! `carrier +/- offset` over each symbol period. The integrators reset
//! on symbol boundaries and the decision compares correlation
//! magnitudes at the end of the period. With the modulator's preloaded
//! pulse shaper the stronger correlation is the transmitted tone, so a
//! one is decided when the upper tone wins.

use gfsk_core::types::{sample_consts, Bit, RealSample};
use gfsk_core::DspError;

use super::samples_per_symbol;

/// Recover bits from a GFSK burst with known carrier phase.
///
/// `offset_hz` is the keying tone offset, `modulation_index * symbol_rate / 2`.
pub fn coherent_demod(
    waveform: &[RealSample],
    carrier_hz: RealSample,
    offset_hz: RealSample,
    sample_rate_hz: RealSample,
    symbol_rate_hz: RealSample,
) -> Result<Vec<Bit>, DspError> {
    if waveform.is_empty() {
        return Err(DspError::EmptyInput { what: "waveform" });
    }
    let spb = samples_per_symbol(sample_rate_hz, symbol_rate_hz)?;

    let w_hi = 2.0 * sample_consts::PI * (carrier_hz + offset_hz);
    let w_lo = 2.0 * sample_consts::PI * (carrier_hz - offset_hz);

    let mut bits = Vec::with_capacity(waveform.len() / spb);
    let mut hi = 0.0;
    let mut lo = 0.0;
    for (i, &s) in waveform.iter().enumerate() {
        if i % spb == 0 {
            hi = 0.0;
            lo = 0.0;
        }
        let t = i as RealSample / sample_rate_hz;
        hi += s * (w_hi * t).cos() / sample_rate_hz;
        lo += s * (w_lo * t).cos() / sample_rate_hz;
        if i % spb == spb - 1 {
            bits.push(if hi.abs() >= lo.abs() { 1 } else { 0 });
        }
    }
    Ok(bits)
}
