use serde::Deserialize;

/// Frequency in Hz for a value given in MHz.
pub const fn mhz(f: f64) -> f64 {
    f * 1_000_000.0
}

/// Frequency in Hz for a value given in GHz.
pub const fn ghz(f: f64) -> f64 {
    f * 1_000_000_000.0
}

/// 2.4 GHz band channel 0 carrier.
const CHANNEL0_RF_HZ: f64 = mhz(2402.0);

/// Channel spacing in the 2.4 GHz band.
const CHANNEL_SPACING_HZ: f64 = mhz(2.0);

/// Receiver frequency plan for a low-IF downconversion.
///
/// The local oscillator sits one IF below the wanted carrier, which puts
/// the image one further IF below the LO. All derived frequencies follow
/// from the channel index and the IF.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChannelPlan {
    /// Channel number in the 2.4 GHz band, 0-39
    pub channel_index: u8,
    /// Intermediate frequency in Hz
    pub if_hz: f64,
}

impl ChannelPlan {
    pub fn new(channel_index: u8) -> Self {
        Self { channel_index, if_hz: mhz(2.0) }
    }

    /// Wanted RF carrier frequency.
    pub fn rf_hz(&self) -> f64 {
        CHANNEL0_RF_HZ + CHANNEL_SPACING_HZ * self.channel_index as f64
    }

    /// Local oscillator frequency, one IF below the carrier.
    pub fn lo_hz(&self) -> f64 {
        self.rf_hz() - self.if_hz
    }

    /// Image frequency, mirrored across the LO from the carrier.
    pub fn image_hz(&self) -> f64 {
        self.lo_hz() - self.if_hz
    }
}

impl Default for ChannelPlan {
    fn default() -> Self {
        Self::new(0)
    }
}
