//! Data types used for signal processing

use num_complex;

pub type RealSample = f64;
pub use std::f64::consts as sample_consts;

pub type ComplexSample = num_complex::Complex<RealSample>;

pub type SampleCount = usize;

/// A payload bit. Only the values 0 and 1 are meaningful.
pub type Bit = u8;
