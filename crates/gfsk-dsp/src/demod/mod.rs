//! GFSK demodulators.
//!
//! Two independent receivers for the same burst format: a coherent
//! correlator that assumes carrier phase is known, and a noncoherent
//! envelope discriminator that does not.

pub mod coherent;
pub mod noncoherent;

pub use coherent::coherent_demod;
pub use noncoherent::noncoherent_demod;

use gfsk_core::types::RealSample;
use gfsk_core::DspError;

/// Integer samples per symbol, shared validation for both demodulators.
pub(crate) fn samples_per_symbol(
    sample_rate_hz: RealSample,
    symbol_rate_hz: RealSample,
) -> Result<usize, DspError> {
    let ratio = sample_rate_hz / symbol_rate_hz;
    if ratio.fract() != 0.0 || ratio < 1.0 {
        return Err(DspError::NonIntegerRatio {
            what: "samples per symbol",
            numerator: sample_rate_hz,
            denominator: symbol_rate_hz,
        });
    }
    Ok(ratio as usize)
}
