//! End-to-end tests for the modem and the image rejection chain.

use gfsk_config::{ModemConfig, ReceiverConfig};
use gfsk_core::debug;
use gfsk_core::types::{Bit, RealSample};
use gfsk_dsp::spectrum::{magnitude_spectrum, peak_bin, tone_magnitude};
use gfsk_dsp::{coherent_demod, noncoherent_demod, ImageRejectionChain, Modulator, Tone};

fn modem_roundtrip(bits: &[Bit]) -> (Vec<Bit>, Vec<Bit>) {
    let cfg = ModemConfig::default();
    let m = Modulator::new(cfg).unwrap();
    let sig = m.modulate(bits).unwrap();
    assert_eq!(sig.sample_count, bits.len() * 20);
    let co = coherent_demod(
        &sig.waveform,
        cfg.carrier_hz,
        cfg.tone_offset_hz(),
        cfg.sample_rate_hz,
        cfg.symbol_rate_hz,
    )
    .unwrap();
    let nc = noncoherent_demod(
        &sig.waveform,
        cfg.carrier_hz,
        cfg.tone_offset_hz(),
        cfg.sample_rate_hz,
        cfg.symbol_rate_hz,
    )
    .unwrap();
    (co, nc)
}

#[test]
fn test_modem_roundtrip_patterns() {
    debug::setup_test_logging();
    let patterns: Vec<Vec<Bit>> = vec![
        vec![1, 0, 1, 1, 0, 0, 1, 0],
        vec![1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0],
        vec![0; 8],
        vec![1; 8],
        vec![0, 0, 0, 0, 1, 1, 1, 1, 0, 1, 0, 1],
        vec![1, 1, 0, 0, 0, 1, 1, 1, 0, 1],
        vec![0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 0],
        vec![1, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 0],
    ];
    for bits in patterns {
        let (co, nc) = modem_roundtrip(&bits);
        assert_eq!(co, bits, "coherent mismatch for {bits:?}");
        assert_eq!(nc, bits, "noncoherent mismatch for {bits:?}");
    }
}

#[test]
fn test_modem_roundtrip_short_bursts() {
    debug::setup_test_logging();
    for bits in [vec![1], vec![0], vec![1, 0], vec![0, 1], vec![1, 1], vec![0, 0]] {
        let (co, nc) = modem_roundtrip(&bits);
        assert_eq!(co, bits, "coherent mismatch for {bits:?}");
        assert_eq!(nc, bits, "noncoherent mismatch for {bits:?}");
    }
}

#[test]
fn test_modulated_spectrum_centered_on_carrier() {
    debug::setup_test_logging();
    let cfg = ModemConfig::default();
    let m = Modulator::new(cfg).unwrap();
    // alternating bits keep energy close to the carrier
    let sig = m.modulate(&[1, 0, 1, 0, 1, 0, 1, 0, 1, 0]).unwrap();
    let spec = magnitude_spectrum(&sig.waveform).unwrap();
    let peak = peak_bin(&spec).unwrap();
    let bin_hz = cfg.sample_rate_hz / sig.sample_count as RealSample;
    let peak_hz = peak as RealSample * bin_hz;
    assert!(
        (peak_hz - cfg.carrier_hz).abs() <= cfg.tone_offset_hz(),
        "spectral peak at {peak_hz} Hz"
    );
}

#[test]
fn test_image_tone_suppressed() {
    debug::setup_test_logging();
    let cfg = ReceiverConfig::default();
    let chain = ImageRejectionChain::new(cfg).unwrap();
    let plan = cfg.channel;

    let out = chain.receive(&Tone::image(&plan)).unwrap();
    let raw = tone_magnitude(&out.in_phase, cfg.adc_rate_hz, plan.if_hz).unwrap();
    let corrected = tone_magnitude(&out.corrected, cfg.adc_rate_hz, plan.if_hz).unwrap();
    assert!(raw > 1.0, "image should reach the ADC uncorrected, got {raw}");
    let suppression_db = 20.0 * (raw / corrected).log10();
    assert!(suppression_db > 15.0, "suppression {suppression_db:.1} dB");
}

#[test]
fn test_wanted_tone_survives_combination() {
    debug::setup_test_logging();
    let cfg = ReceiverConfig::default();
    let chain = ImageRejectionChain::new(cfg).unwrap();
    let plan = cfg.channel;

    let out = chain.receive(&Tone::rf(&plan)).unwrap();
    let raw = tone_magnitude(&out.in_phase, cfg.adc_rate_hz, plan.if_hz).unwrap();
    let corrected = tone_magnitude(&out.corrected, cfg.adc_rate_hz, plan.if_hz).unwrap();
    // in-phase and Hilbert branches add for the wanted sideband
    assert!(corrected / raw > 1.5, "gain {}", corrected / raw);
}

#[test]
fn test_downconverted_tone_lands_on_if() {
    debug::setup_test_logging();
    let cfg = ReceiverConfig::default();
    let chain = ImageRejectionChain::new(cfg).unwrap();
    let plan = cfg.channel;

    let out = chain.receive(&Tone::rf(&plan)).unwrap();
    let spec = magnitude_spectrum(&out.in_phase).unwrap();
    let peak = peak_bin(&spec).unwrap();
    let bin_hz = cfg.adc_rate_hz / out.in_phase.len() as RealSample;
    assert_eq!(peak as RealSample * bin_hz, plan.if_hz);
}

#[test]
fn test_adc_codes_span_full_range() {
    debug::setup_test_logging();
    let cfg = ReceiverConfig::default();
    let chain = ImageRejectionChain::new(cfg).unwrap();
    let plan = cfg.channel;

    let out = chain.receive(&Tone::rf(&plan)).unwrap();
    let min = out.in_phase.iter().cloned().fold(RealSample::INFINITY, RealSample::min);
    let max = out.in_phase.iter().cloned().fold(RealSample::NEG_INFINITY, RealSample::max);
    // min-max scaling pins the extremes of the capture to the code rails
    assert_eq!(min, -15.0);
    assert_eq!(max, 16.0);
}
