use gfsk_core::freqs::{ghz, mhz, ChannelPlan};
use gfsk_core::DspError;
use serde::Deserialize;

/// GFSK modem parameters.
///
/// Defaults describe the reference configuration: a 2 MHz carrier keyed
/// at 1 Msym/s with modulation index 0.5, sampled at 20 MHz.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Carrier frequency in Hz
    pub carrier_hz: f64,
    /// Symbol rate in Hz
    pub symbol_rate_hz: f64,
    /// Output sample rate in Hz
    pub sample_rate_hz: f64,
    /// Modulation index h, peak-to-peak frequency deviation over symbol rate
    pub modulation_index: f64,
    /// Carrier amplitude
    pub amplitude: f64,
    /// Pulse filter ticks per symbol
    pub pulse_oversampling: usize,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            carrier_hz: mhz(2.0),
            symbol_rate_hz: mhz(1.0),
            sample_rate_hz: mhz(20.0),
            modulation_index: 0.5,
            amplitude: 1.0,
            pulse_oversampling: 10,
        }
    }
}

impl ModemConfig {
    /// Samples per symbol. The sample rate must be an integer multiple
    /// of the symbol rate, and that multiple must in turn divide evenly
    /// into pulse filter ticks.
    pub fn oversampling(&self) -> Result<usize, DspError> {
        let ratio = self.sample_rate_hz / self.symbol_rate_hz;
        if ratio.fract() != 0.0 || ratio < 1.0 {
            return Err(DspError::NonIntegerRatio {
                what: "samples per symbol",
                numerator: self.sample_rate_hz,
                denominator: self.symbol_rate_hz,
            });
        }
        let osf = ratio as usize;
        if self.pulse_oversampling == 0 || osf % self.pulse_oversampling != 0 {
            return Err(DspError::NonIntegerRatio {
                what: "samples per pulse filter tick",
                numerator: ratio,
                denominator: self.pulse_oversampling as f64,
            });
        }
        Ok(osf)
    }

    /// Frequency offset of the two keying tones from the carrier,
    /// `h * symbol_rate / 2`.
    pub fn tone_offset_hz(&self) -> f64 {
        self.modulation_index * self.symbol_rate_hz / 2.0
    }

    pub fn validate(&self) -> Result<(), DspError> {
        for (what, value) in [
            ("carrier_hz", self.carrier_hz),
            ("symbol_rate_hz", self.symbol_rate_hz),
            ("sample_rate_hz", self.sample_rate_hz),
            ("modulation_index", self.modulation_index),
            ("amplitude", self.amplitude),
        ] {
            if !(value > 0.0) {
                return Err(DspError::NonPositiveParameter { what, value });
            }
        }
        self.oversampling()?;
        Ok(())
    }
}

/// Receiver front-end parameters for the image rejection chain.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// RF channel and IF plan
    pub channel: ChannelPlan,
    /// Sample rate of the pre-digitizer analog model in Hz
    pub analog_rate_hz: f64,
    /// ADC output sample rate in Hz
    pub adc_rate_hz: f64,
    /// ADC resolution in bits
    pub code_bits: u32,
    /// Capture duration in seconds
    pub capture_window_s: f64,
    /// Order of the post-mixer anti-alias lowpass
    pub antialias_order: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            channel: ChannelPlan::default(),
            analog_rate_hz: ghz(9.6),
            adc_rate_hz: mhz(20.0),
            code_bits: 5,
            capture_window_s: 1e-5,
            antialias_order: 10,
        }
    }
}

impl ReceiverConfig {
    /// Decimation factor from the analog model rate down to the ADC rate.
    pub fn decimation(&self) -> Result<usize, DspError> {
        let ratio = self.analog_rate_hz / self.adc_rate_hz;
        if ratio.fract() != 0.0 || ratio < 1.0 {
            return Err(DspError::NonIntegerRatio {
                what: "decimation factor",
                numerator: self.analog_rate_hz,
                denominator: self.adc_rate_hz,
            });
        }
        Ok(ratio as usize)
    }

    /// Anti-alias cutoff, one channel width above the IF.
    pub fn antialias_cutoff_hz(&self) -> f64 {
        self.channel.if_hz + mhz(1.0)
    }

    pub fn validate(&self) -> Result<(), DspError> {
        for (what, value) in [
            ("analog_rate_hz", self.analog_rate_hz),
            ("adc_rate_hz", self.adc_rate_hz),
            ("capture_window_s", self.capture_window_s),
            ("if_hz", self.channel.if_hz),
        ] {
            if !(value > 0.0) {
                return Err(DspError::NonPositiveParameter { what, value });
            }
        }
        if self.code_bits == 0 || self.code_bits > 16 {
            return Err(DspError::InvalidCodeBits { code_bits: self.code_bits });
        }
        self.decimation()?;
        Ok(())
    }
}

/// Full signal chain configuration, the unit a TOML file deserializes into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub modem: ModemConfig,
    pub receiver: ReceiverConfig,
}

impl ChainConfig {
    pub fn validate(&self) -> Result<(), DspError> {
        self.modem.validate()?;
        self.receiver.validate()?;
        Ok(())
    }
}
