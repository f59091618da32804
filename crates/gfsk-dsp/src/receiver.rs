//! Low-IF receiver front end with Hilbert-transform image rejection.
//!
//! An RF tone is mixed against a quadrature LO, anti-alias filtered at
//! the analog model rate, digitized to signed mid-scale codes, and
//! combined as `I - H{Q}` where `H` is the tabulated Hilbert
//! transformer. A wanted-channel tone lands at `+IF` and survives the
//! combination at roughly twice the amplitude, an image tone lands at
//! `-IF` and cancels. The in-phase branch is delayed by the Hilbert
//! group delay before the combination, otherwise the branches are
//! misaligned and the image is reinforced instead of cancelled.

use gfsk_config::ReceiverConfig;
use gfsk_core::types::{RealSample, SampleCount};
use gfsk_core::DspError;

use crate::digitizer::Digitizer;
use crate::filters::fir::{apply_fir, center_tap_delay, HILBERT_TAPS};
use crate::filters::iir::{design_lowpass, FilterSpec};
use crate::mixer::{time_axis, Mixer, Tone};

/// One processed capture. `in_phase` and `quadrature` are the signed
/// ADC sequences; `corrected` and `time` are trimmed by the Hilbert
/// group delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRejectionOutput {
    /// ADC-rate time axis for `corrected`
    pub time: Vec<RealSample>,
    /// Digitized in-phase branch, mid-scale removed
    pub in_phase: Vec<RealSample>,
    /// Digitized quadrature branch, mid-scale removed
    pub quadrature: Vec<RealSample>,
    /// Image-rejected combination `I - H{Q}`
    pub corrected: Vec<RealSample>,
}

pub struct ImageRejectionChain {
    config: ReceiverConfig,
    mixer: Mixer,
    antialias: FilterSpec,
    digitizer: Digitizer,
}

impl ImageRejectionChain {
    pub fn new(config: ReceiverConfig) -> Result<Self, DspError> {
        config.validate()?;
        let antialias = design_lowpass(
            config.antialias_cutoff_hz(),
            config.analog_rate_hz,
            config.antialias_order,
        )?;
        let digitizer = Digitizer::from_config(&config)?;
        let mixer = Mixer::new(config.channel.lo_hz());
        tracing::debug!(
            lo_hz = mixer.lo_hz,
            cutoff_hz = config.antialias_cutoff_hz(),
            "image rejection chain ready"
        );
        Ok(Self { config, mixer, antialias, digitizer })
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Samples the corrected output is shorter than the raw capture.
    pub fn combination_delay(&self) -> SampleCount {
        center_tap_delay(HILBERT_TAPS.len())
    }

    /// Run a tone through the full chain.
    pub fn receive(&self, source: &Tone) -> Result<ImageRejectionOutput, DspError> {
        let analog_time = time_axis(self.config.analog_rate_hz, self.config.capture_window_s);
        let rf: Vec<RealSample> = analog_time.iter().map(|&t| source.sample(t)).collect();

        let (i_raw, q_raw) = self.mixer.mix(&rf, &analog_time);
        let i_filtered = self.antialias.apply(&i_raw);
        let q_filtered = self.antialias.apply(&q_raw);

        let midpoint = self.digitizer.code_midpoint() as RealSample;
        let (adc_time, i_codes) = self.digitizer.digitize(&i_filtered)?;
        let (_, q_codes) = self.digitizer.digitize(&q_filtered)?;
        let in_phase: Vec<RealSample> =
            i_codes.iter().map(|&c| c as RealSample - midpoint).collect();
        let quadrature: Vec<RealSample> =
            q_codes.iter().map(|&c| c as RealSample - midpoint).collect();

        let hilbert_q = apply_fir(&HILBERT_TAPS, &quadrature);
        let delay = self.combination_delay();
        // a capture shorter than the combination delay yields no
        // corrected samples, not a panic
        let corrected: Vec<RealSample> = (delay..in_phase.len())
            .map(|i| in_phase[i - delay] - hilbert_q[i])
            .collect();
        let time = adc_time.get(delay..).unwrap_or_default().to_vec();

        Ok(ImageRejectionOutput { time, in_phase, quadrature, corrected })
    }
}
