//! Noncoherent envelope discriminator.
//!
//! The burst is split by two Butterworth bandpasses around the keying
//! tones, each branch is envelope-detected by squaring and lowpass
//! filtering, and the envelope difference is summed over each symbol
//! period. The bandpass group delay shifts symbol energy later in
//! time, so the burst is zero-padded by the delay and the decision
//! windows start after it. Without the shift, every decision window
//! straddles two symbols.

use gfsk_core::types::{Bit, RealSample};
use gfsk_core::DspError;

use super::samples_per_symbol;
use crate::filters::iir::{design_bandpass, design_lowpass, FilterSpec};

const BAND_ORDER: usize = 5;
const ENVELOPE_LP_HZ: RealSample = 3e6;
const ENVELOPE_LP_ORDER: usize = 5;

/// Recover bits from a GFSK burst without carrier phase knowledge.
pub fn noncoherent_demod(
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

    // band edges keep a 5% guard off the carrier so the branches
    // do not overlap at the midpoint
    let lo_band = design_bandpass(
        carrier_hz - 1.95 * offset_hz,
        carrier_hz - 0.05 * offset_hz,
        sample_rate_hz,
        BAND_ORDER,
    )?;
    let hi_band = design_bandpass(
        carrier_hz + 0.05 * offset_hz,
        carrier_hz + 1.95 * offset_hz,
        sample_rate_hz,
        BAND_ORDER,
    )?;
    let lp = design_lowpass(ENVELOPE_LP_HZ, sample_rate_hz, ENVELOPE_LP_ORDER)?;

    let delay = hi_band.group_delay_at(carrier_hz + offset_hz).round() as usize;
    tracing::debug!(delay, "noncoherent group delay compensation");

    // pad so the tail of the last symbol rings out of the filters
    let mut padded = waveform.to_vec();
    padded.extend(std::iter::repeat(0.0).take(delay));

    let env_lo = envelope_detect(&lp, &lo_band.apply(&padded));
    let env_hi = envelope_detect(&lp, &hi_band.apply(&padded));

    let mut bits = Vec::with_capacity(waveform.len() / spb);
    let mut acc = 0.0;
    let mut count = 0;
    for i in delay..padded.len() {
        acc += env_hi[i] - env_lo[i];
        count += 1;
        if count == spb {
            bits.push(if acc > 0.0 { 1 } else { 0 });
            acc = 0.0;
            count = 0;
        }
    }
    Ok(bits)
}

/// Square-law envelope: lowpass of `2 x^2`, square-rooted. The lowpass
/// can undershoot zero near edges, clamp instead of producing NaN.
fn envelope_detect(lp: &FilterSpec, branch: &[RealSample]) -> Vec<RealSample> {
    let squared: Vec<RealSample> = branch.iter().map(|&v| 2.0 * v * v).collect();
    lp.apply(&squared)
        .into_iter()
        .map(|v| if v > 0.0 { v.sqrt() } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulator::Modulator;
    use gfsk_config::ModemConfig;

    fn roundtrip(bits: &[Bit]) -> Vec<Bit> {
        let cfg = ModemConfig::default();
        let m = Modulator::new(cfg).unwrap();
        let sig = m.modulate(bits).unwrap();
        noncoherent_demod(
            &sig.waveform,
            cfg.carrier_hz,
            cfg.tone_offset_hz(),
            cfg.sample_rate_hz,
            cfg.symbol_rate_hz,
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_mixed_pattern() {
        let bits = vec![1, 0, 1, 1, 0, 0, 1, 0];
        assert_eq!(roundtrip(&bits), bits);
    }

    #[test]
    fn test_roundtrip_alternating() {
        let bits = vec![0, 0, 0, 0, 1, 1, 1, 1, 0, 1, 0, 1];
        assert_eq!(roundtrip(&bits), bits);
    }

    #[test]
    fn test_roundtrip_constant_sequences() {
        assert_eq!(roundtrip(&[0; 8]), vec![0; 8]);
        assert_eq!(roundtrip(&[1; 8]), vec![1; 8]);
    }

    #[test]
    fn test_trailing_bit_recovered() {
        // the last symbol's energy arrives late through the bandpass,
        // padding must keep it inside the final decision window
        let bits = vec![1, 1, 0, 0, 0, 1, 1, 1, 0, 1];
        assert_eq!(roundtrip(&bits), bits);
    }

    #[test]
    fn test_empty_waveform_rejected() {
        assert!(matches!(
            noncoherent_demod(&[], 2e6, 250e3, 20e6, 1e6),
            Err(DspError::EmptyInput { .. })
        ));
    }
}
