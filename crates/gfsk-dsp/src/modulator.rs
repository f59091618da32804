//! GFSK modulator.
//!
//! A frequency impulse train at the symbol rate is shaped by the
//! Gaussian FIR running at its own tick rate, integrated into phase,
//! and applied to the carrier. The impulse train is advanced by the
//! shaper's center-tap delay and the delay line is preloaded with the
//! leading bit, so the peak of each pulse lands on its own symbol
//! period and the first and last symbols see full pulse energy.

use gfsk_config::ModemConfig;
use gfsk_core::types::{sample_consts, Bit, RealSample, SampleCount};
use gfsk_core::DspError;

use crate::filters::fir::{center_tap_delay, GAUSSIAN_PULSE_TAPS};

const NTAPS: usize = GAUSSIAN_PULSE_TAPS.len();

/// A modulated burst with its internal traces kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulatedSignal {
    /// Carrier samples at the configured sample rate
    pub waveform: Vec<RealSample>,
    /// Number of samples, `bits * oversampling`
    pub sample_count: SampleCount,
    /// Shaped frequency pulse normalized to the symbol rate, one
    /// entry per output sample
    pub pulse_trace: Vec<RealSample>,
    /// Accumulated phase in radians, one entry per output sample
    pub phase_trace: Vec<RealSample>,
}

pub struct Modulator {
    config: ModemConfig,
    /// Samples per symbol
    oversampling: usize,
    /// Output samples between pulse filter ticks
    tick_interval: usize,
    /// Gaussian taps rescaled to unit sum
    taps: [RealSample; NTAPS],
}

impl Modulator {
    pub fn new(config: ModemConfig) -> Result<Self, DspError> {
        config.validate()?;
        let oversampling = config.oversampling()?;
        let tick_interval = oversampling / config.pulse_oversampling;

        let sum: RealSample = GAUSSIAN_PULSE_TAPS.iter().sum();
        let mut taps = GAUSSIAN_PULSE_TAPS;
        for t in taps.iter_mut() {
            *t /= sum;
        }

        tracing::debug!(
            oversampling,
            tick_interval,
            tone_offset_hz = config.tone_offset_hz(),
            "modulator ready"
        );
        Ok(Self { config, oversampling, tick_interval, taps })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Modulate a bit sequence into a carrier burst.
    pub fn modulate(&self, bits: &[Bit]) -> Result<ModulatedSignal, DspError> {
        if bits.is_empty() {
            return Err(DspError::EmptyInput { what: "bit sequence" });
        }

        let cfg = &self.config;
        let pulse_os = cfg.pulse_oversampling as i64;
        let center = center_tap_delay(NTAPS) as i64;
        let nbits = bits.len();

        // frequency impulse at pulse-filter tick k, advanced by the
        // shaper delay, clamped so the edge bits persist
        let impulse = |k: i64| -> RealSample {
            let idx = ((k + center).div_euclid(pulse_os)).clamp(0, nbits as i64 - 1) as usize;
            if bits[idx] != 0 { cfg.symbol_rate_hz } else { -cfg.symbol_rate_hz }
        };

        let mut reg = [0.0; NTAPS];
        for k in -(NTAPS as i64)..0 {
            shift_in(&mut reg, impulse(k));
        }

        let sample_count = nbits * self.oversampling;
        let mut waveform = Vec::with_capacity(sample_count);
        let mut pulse_trace = Vec::with_capacity(sample_count);
        let mut phase_trace = Vec::with_capacity(sample_count);

        let two_pi = 2.0 * sample_consts::PI;
        let mut phi = 0.0;
        let mut tick: i64 = 0;
        for n in 0..sample_count {
            if n % self.tick_interval == 0 {
                shift_in(&mut reg, impulse(tick));
                tick += 1;
            }
            let shaped: RealSample = self.taps.iter().zip(reg.iter()).map(|(t, r)| t * r).sum();
            phi += shaped / cfg.sample_rate_hz;
            let t = n as RealSample / cfg.sample_rate_hz;
            let phase = cfg.modulation_index * sample_consts::PI * phi;
            waveform.push(cfg.amplitude * (two_pi * cfg.carrier_hz * t + phase).cos());
            pulse_trace.push(shaped / cfg.symbol_rate_hz);
            phase_trace.push(phase);
        }

        Ok(ModulatedSignal { waveform, sample_count, pulse_trace, phase_trace })
    }
}

fn shift_in(reg: &mut [RealSample; NTAPS], v: RealSample) {
    reg.copy_within(0..NTAPS - 1, 1);
    reg[0] = v;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        let m = Modulator::new(ModemConfig::default()).unwrap();
        let sig = m.modulate(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        assert_eq!(sig.sample_count, 8 * 20);
        assert_eq!(sig.waveform.len(), sig.sample_count);
        assert_eq!(sig.pulse_trace.len(), sig.sample_count);
        assert_eq!(sig.phase_trace.len(), sig.sample_count);
    }

    #[test]
    fn test_amplitude_bound() {
        let m = Modulator::new(ModemConfig::default()).unwrap();
        let sig = m.modulate(&[1, 0, 1, 0, 1, 0]).unwrap();
        for &s in &sig.waveform {
            assert!(s.abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_all_ones_advances_phase_linearly() {
        let cfg = ModemConfig::default();
        let m = Modulator::new(cfg).unwrap();
        let nbits = 8;
        let sig = m.modulate(&vec![1; nbits]).unwrap();
        // steady +F_symbol deviation, each symbol adds h*pi of phase
        let expected = cfg.modulation_index * sample_consts::PI * nbits as RealSample;
        let got = *sig.phase_trace.last().unwrap();
        let per_sample = cfg.modulation_index * sample_consts::PI / 20.0;
        assert!((got - expected).abs() < per_sample + 1e-9, "phase {got} vs {expected}");
    }

    #[test]
    fn test_pulse_trace_saturates_at_unit_deviation() {
        let m = Modulator::new(ModemConfig::default()).unwrap();
        let sig = m.modulate(&[1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        let mid_ones = sig.pulse_trace[3 * 20];
        let mid_zeros = sig.pulse_trace[9 * 20];
        assert!((mid_ones - 1.0).abs() < 1e-9, "pulse {mid_ones}");
        assert!((mid_zeros + 1.0).abs() < 1e-9, "pulse {mid_zeros}");
    }

    #[test]
    fn test_empty_bits_rejected() {
        let m = Modulator::new(ModemConfig::default()).unwrap();
        assert_eq!(m.modulate(&[]).unwrap_err(), DspError::EmptyInput { what: "bit sequence" });
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let cfg = ModemConfig { sample_rate_hz: 19.5e6, ..Default::default() };
        assert!(Modulator::new(cfg).is_err());
    }
}
