use core::fmt;

/// Errors raised by the signal chain.
///
/// Configuration errors are rejected eagerly when a component or filter
/// design is constructed. Degenerate-input errors are raised at call time
/// for inputs that would otherwise silently produce NaN or garbage.
#[derive(Debug, Clone, PartialEq)]
pub enum DspError {
    // --- configuration errors ---
    /// A rate ratio that must divide evenly does not.
    NonIntegerRatio { what: &'static str, numerator: f64, denominator: f64 },
    /// Cutoff frequency outside (0, Nyquist).
    CutoffOutOfRange { cutoff_hz: f64, sample_rate_hz: f64 },
    /// Band edges are not ordered low < high.
    InvalidBand { low_hz: f64, high_hz: f64 },
    /// Filter order outside the supported range.
    InvalidOrder { order: usize },
    /// The realized filter has a pole on or outside the unit circle.
    UnstableDesign { what: &'static str },
    /// A parameter that must be strictly positive is not.
    NonPositiveParameter { what: &'static str, value: f64 },
    /// ADC resolution outside the supported code width range.
    InvalidCodeBits { code_bits: u32 },

    // --- degenerate inputs ---
    /// An input sequence that must be non-empty is empty.
    EmptyInput { what: &'static str },
    /// All captured samples are equal, so min-max scaling would divide by zero.
    ZeroSignalRange,
}

impl DspError {
    /// True for errors that are detectable from parameters alone,
    /// before any samples are processed.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, DspError::EmptyInput { .. } | DspError::ZeroSignalRange)
    }
}

impl fmt::Display for DspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DspError::NonIntegerRatio { what, numerator, denominator } => {
                write!(f, "{what}: {numerator} / {denominator} is not an integer")
            }
            DspError::CutoffOutOfRange { cutoff_hz, sample_rate_hz } => {
                write!(f, "cutoff {cutoff_hz} Hz outside (0, {}) Hz", sample_rate_hz / 2.0)
            }
            DspError::InvalidBand { low_hz, high_hz } => {
                write!(f, "band edges not ordered: {low_hz} Hz .. {high_hz} Hz")
            }
            DspError::InvalidOrder { order } => write!(f, "unsupported filter order {order}"),
            DspError::UnstableDesign { what } => write!(f, "unstable filter design: {what}"),
            DspError::NonPositiveParameter { what, value } => {
                write!(f, "{what} must be positive, got {value}")
            }
            DspError::InvalidCodeBits { code_bits } => {
                write!(f, "code_bits must be within 1..=16, got {code_bits}")
            }
            DspError::EmptyInput { what } => write!(f, "empty input: {what}"),
            DspError::ZeroSignalRange => {
                write!(f, "all samples equal, cannot scale to code range")
            }
        }
    }
}

impl std::error::Error for DspError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let cfg = DspError::InvalidOrder { order: 0 };
        assert!(cfg.is_configuration());
        let degen = DspError::ZeroSignalRange;
        assert!(!degen.is_configuration());
        let empty = DspError::EmptyInput { what: "bits" };
        assert!(!empty.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let e = DspError::NonIntegerRatio {
            what: "oversampling factor",
            numerator: 20e6,
            denominator: 3e6,
        };
        let msg = format!("{e}");
        assert!(msg.contains("oversampling factor"));
        assert!(msg.contains("not an integer"));

        let e = DspError::InvalidCodeBits { code_bits: 17 };
        assert!(format!("{e}").contains("1..=16"));
    }
}
