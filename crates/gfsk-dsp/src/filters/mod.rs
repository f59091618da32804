//! Filter building blocks: hand-tabulated FIR filters and IIR
//! Butterworth designs realized as second-order section cascades.

pub mod fir;
pub mod iir;
