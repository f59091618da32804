//! Sample-and-hold digitizer model.
//!
//! Decimates the analog-rate signal down to the ADC rate, then
//! quantizes the decimated capture against its own min-max range.
//! Scaling off the decimated sequence keeps the code range fully used
//! even when decimation skips the extremes of the analog waveform.

use gfsk_config::ReceiverConfig;
use gfsk_core::types::RealSample;
use gfsk_core::DspError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Digitizer {
    analog_rate_hz: RealSample,
    adc_rate_hz: RealSample,
    code_bits: u32,
    capture_window_s: RealSample,
    stride: usize,
}

impl Digitizer {
    pub fn new(
        analog_rate_hz: RealSample,
        adc_rate_hz: RealSample,
        code_bits: u32,
        capture_window_s: RealSample,
    ) -> Result<Self, DspError> {
        let ratio = analog_rate_hz / adc_rate_hz;
        if ratio.fract() != 0.0 || ratio < 1.0 {
            return Err(DspError::NonIntegerRatio {
                what: "decimation factor",
                numerator: analog_rate_hz,
                denominator: adc_rate_hz,
            });
        }
        if code_bits == 0 || code_bits > 16 {
            return Err(DspError::InvalidCodeBits { code_bits });
        }
        Ok(Self {
            analog_rate_hz,
            adc_rate_hz,
            code_bits,
            capture_window_s,
            stride: ratio as usize,
        })
    }

    pub fn from_config(config: &ReceiverConfig) -> Result<Self, DspError> {
        Self::new(
            config.analog_rate_hz,
            config.adc_rate_hz,
            config.code_bits,
            config.capture_window_s,
        )
    }

    /// Largest output code, `2^bits - 1`.
    pub fn max_code(&self) -> u16 {
        ((1u32 << self.code_bits) - 1) as u16
    }

    /// Mid-scale code, what a zero-mean input maps to on average.
    pub fn code_midpoint(&self) -> u16 {
        self.max_code() / 2
    }

    /// Decimate and quantize an analog-rate capture.
    ///
    /// Returns the ADC-rate time axis and the codes, truncated to the
    /// capture window.
    pub fn digitize(&self, signal: &[RealSample]) -> Result<(Vec<RealSample>, Vec<u16>), DspError> {
        if signal.is_empty() {
            return Err(DspError::EmptyInput { what: "analog capture" });
        }

        let decimated: Vec<RealSample> = signal.iter().step_by(self.stride).copied().collect();

        let mut lo = decimated[0];
        let mut hi = decimated[0];
        for &v in &decimated[1..] {
            if v < lo {
                lo = v;
            }
            if v > hi {
                hi = v;
            }
        }
        let range = hi - lo;
        if range == 0.0 {
            return Err(DspError::ZeroSignalRange);
        }

        let full_scale = self.max_code() as RealSample;
        let n_keep = (self.adc_rate_hz * self.capture_window_s) as usize;
        let codes: Vec<u16> = decimated
            .iter()
            .take(n_keep)
            .map(|&v| ((v - lo) / range * full_scale) as u16)
            .collect();
        let time: Vec<RealSample> =
            (0..codes.len()).map(|k| k as RealSample / self.adc_rate_hz).collect();

        tracing::debug!(
            samples = codes.len(),
            lo,
            hi,
            stride = self.stride,
            "digitized capture"
        );
        Ok((time, codes))
    }
}
