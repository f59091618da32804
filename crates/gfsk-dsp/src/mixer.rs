//! Test tones and the quadrature downconversion mixer.

use gfsk_core::freqs::ChannelPlan;
use gfsk_core::types::{sample_consts, RealSample};

/// A pure cosine test source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: RealSample,
    pub phase_rad: RealSample,
}

impl Tone {
    pub fn new(freq_hz: RealSample, phase_rad: RealSample) -> Self {
        Self { freq_hz, phase_rad }
    }

    /// Tone on the wanted carrier of `plan`, with a quarter-pi phase
    /// so neither I nor Q starts at a zero crossing.
    pub fn rf(plan: &ChannelPlan) -> Self {
        Self::new(plan.rf_hz(), sample_consts::FRAC_PI_4)
    }

    /// Tone on the image frequency of `plan`.
    pub fn image(plan: &ChannelPlan) -> Self {
        Self::new(plan.image_hz(), sample_consts::FRAC_PI_4)
    }

    pub fn sample(&self, t: RealSample) -> RealSample {
        (2.0 * sample_consts::PI * self.freq_hz * t + self.phase_rad).cos()
    }
}

/// Quadrature mixer against a cosine/sine local oscillator pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    pub lo_hz: RealSample,
}

impl Mixer {
    pub fn new(lo_hz: RealSample) -> Self {
        Self { lo_hz }
    }

    /// Multiply `signal` by the LO cosine and sine over `time`,
    /// producing the in-phase and quadrature products.
    pub fn mix(&self, signal: &[RealSample], time: &[RealSample]) -> (Vec<RealSample>, Vec<RealSample>) {
        debug_assert_eq!(signal.len(), time.len(), "signal and time axis length mismatch");
        let w = 2.0 * sample_consts::PI * self.lo_hz;
        let i = signal.iter().zip(time).map(|(&s, &t)| s * (w * t).cos()).collect();
        let q = signal.iter().zip(time).map(|(&s, &t)| s * (w * t).sin()).collect();
        (i, q)
    }
}

/// Sample instants `n / rate` covering `window_s` seconds.
pub fn time_axis(rate_hz: RealSample, window_s: RealSample) -> Vec<RealSample> {
    let n = (rate_hz * window_s) as usize;
    (0..n).map(|k| k as RealSample / rate_hz).collect()
}
