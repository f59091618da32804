//! GFSK baseband signal chain
//!
//! Floating-point reference model of a GFSK link: a Gaussian-shaped
//! continuous-phase modulator, coherent and noncoherent demodulators,
//! and a low-IF receiver front end with quadrature mixing, digitization
//! and Hilbert-transform image rejection.
//!
//! Everything operates on plain `Vec<f64>` sample buffers at explicit
//! sample rates. Components validate their parameters at construction
//! and return [`DspError`](gfsk_core::DspError) rather than panicking.

pub mod demod;
pub mod digitizer;
pub mod filters;
pub mod mixer;
pub mod modulator;
pub mod receiver;
pub mod spectrum;

pub use demod::{coherent_demod, noncoherent_demod};
pub use digitizer::Digitizer;
pub use filters::fir::{apply_fir, center_tap_delay, GAUSSIAN_PULSE_TAPS, HILBERT_TAPS};
pub use filters::iir::{design_bandpass, design_lowpass, FilterSpec};
pub use mixer::{time_axis, Mixer, Tone};
pub use modulator::{ModulatedSignal, Modulator};
pub use receiver::{ImageRejectionChain, ImageRejectionOutput};
