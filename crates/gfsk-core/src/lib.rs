//! Core types for the GFSK baseband reference model
//!
//! This crate provides the fundamental pieces shared by the rest of the
//! workspace:
//! - Sample and bit type aliases used throughout the signal chain
//! - The error taxonomy (configuration vs. degenerate-input failures)
//! - The receiver frequency plan (channel index, IF, LO, image)
//! - Logging setup for tests and offline diagnostic runs

pub mod debug;
pub mod error;
pub mod freqs;
pub mod types;

// Re-export commonly used items
pub use error::DspError;
pub use freqs::ChannelPlan;
pub use types::*;
