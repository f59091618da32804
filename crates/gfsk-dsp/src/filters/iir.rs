//! Butterworth IIR designs as cascaded second-order sections.
//!
//! Designs go through the classic analog route: Butterworth poles on
//! the s-plane unit circle, frequency prewarp, bilinear transform into
//! biquads. Sections run in transposed direct form II.

use gfsk_core::types::{ComplexSample, RealSample};
use gfsk_core::DspError;

/// One second-order section, `b` numerator and `a` denominator
/// coefficients with `a0` normalized to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b: [RealSample; 3],
    pub a: [RealSample; 2],
}

impl Biquad {
    pub fn new(b: [RealSample; 3], a: [RealSample; 2]) -> Self {
        Self { b, a }
    }

    /// Both poles strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }

    fn response_at(&self, zi: ComplexSample) -> ComplexSample {
        let num = self.b[0] + self.b[1] * zi + self.b[2] * zi * zi;
        let den = 1.0 + self.a[0] * zi + self.a[1] * zi * zi;
        num / den
    }
}

/// A realized digital filter: an SOS cascade bound to its design
/// sample rate. Stateless between calls, `apply` starts from rest.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub sections: Vec<Biquad>,
    pub sample_rate_hz: RealSample,
}

impl FilterSpec {
    /// Run the cascade over `input` from zero initial conditions.
    /// Output length equals input length.
    pub fn apply(&self, input: &[RealSample]) -> Vec<RealSample> {
        let mut y = input.to_vec();
        for sec in &self.sections {
            let mut s0 = 0.0;
            let mut s1 = 0.0;
            for v in y.iter_mut() {
                let x = *v;
                let o = sec.b[0] * x + s0;
                s0 = sec.b[1] * x - sec.a[0] * o + s1;
                s1 = sec.b[2] * x - sec.a[1] * o;
                *v = o;
            }
        }
        y
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(Biquad::is_stable)
    }

    /// Complex frequency response at `freq_hz`.
    pub fn response(&self, freq_hz: RealSample) -> ComplexSample {
        let w = 2.0 * std::f64::consts::PI * freq_hz / self.sample_rate_hz;
        let zi = ComplexSample::new(0.0, -w).exp();
        self.sections
            .iter()
            .fold(ComplexSample::new(1.0, 0.0), |h, sec| h * sec.response_at(zi))
    }

    /// Group delay in samples at `freq_hz`, from a symmetric phase
    /// difference around the evaluation point.
    pub fn group_delay_at(&self, freq_hz: RealSample) -> RealSample {
        let df = self.sample_rate_hz * 1e-6;
        let p1 = self.response(freq_hz - df).arg();
        let p2 = self.response(freq_hz + df).arg();
        let mut dp = p2 - p1;
        while dp > std::f64::consts::PI {
            dp -= 2.0 * std::f64::consts::PI;
        }
        while dp < -std::f64::consts::PI {
            dp += 2.0 * std::f64::consts::PI;
        }
        let dw = 2.0 * std::f64::consts::PI * 2.0 * df / self.sample_rate_hz;
        -dp / dw
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Lowpass,
    Highpass,
}

/// Butterworth lowpass with `order` poles and `cutoff_hz` -3 dB point.
pub fn design_lowpass(
    cutoff_hz: RealSample,
    sample_rate_hz: RealSample,
    order: usize,
) -> Result<FilterSpec, DspError> {
    let spec = design_butterworth(order, cutoff_hz, sample_rate_hz, Kind::Lowpass)?;
    tracing::debug!(
        cutoff_hz,
        sample_rate_hz,
        order,
        sections = spec.sections.len(),
        "designed Butterworth lowpass"
    );
    Ok(spec)
}

/// Butterworth bandpass built as a lowpass at `high_hz` cascaded with
/// a highpass at `low_hz`, each of `order` poles.
pub fn design_bandpass(
    low_hz: RealSample,
    high_hz: RealSample,
    sample_rate_hz: RealSample,
    order: usize,
) -> Result<FilterSpec, DspError> {
    if !(low_hz < high_hz) {
        return Err(DspError::InvalidBand { low_hz, high_hz });
    }
    let lp = design_butterworth(order, high_hz, sample_rate_hz, Kind::Lowpass)?;
    let hp = design_butterworth(order, low_hz, sample_rate_hz, Kind::Highpass)?;
    let mut sections = lp.sections;
    sections.extend(hp.sections);
    let spec = FilterSpec { sections, sample_rate_hz };
    if !spec.is_stable() {
        return Err(DspError::UnstableDesign { what: "bandpass cascade" });
    }
    tracing::debug!(
        low_hz,
        high_hz,
        sample_rate_hz,
        order,
        sections = spec.sections.len(),
        "designed Butterworth bandpass"
    );
    Ok(spec)
}

fn design_butterworth(
    order: usize,
    cutoff_hz: RealSample,
    sample_rate_hz: RealSample,
    kind: Kind,
) -> Result<FilterSpec, DspError> {
    if order == 0 || order > 20 {
        return Err(DspError::InvalidOrder { order });
    }
    if !(cutoff_hz > 0.0) || cutoff_hz >= sample_rate_hz / 2.0 {
        return Err(DspError::CutoffOutOfRange { cutoff_hz, sample_rate_hz });
    }

    let wc = prewarp(cutoff_hz, sample_rate_hz);
    let k = 2.0 * sample_rate_hz;
    let poles = butterworth_poles(order);

    // upper-half-plane poles each realize a conjugate-pair biquad,
    // an odd order adds one real pole as a first-order section
    let mut sections = Vec::with_capacity(order.div_ceil(2));
    for p in &poles[..order / 2] {
        sections.push(bilinear_2pole(*p * wc, k, kind));
    }
    if order % 2 == 1 {
        sections.push(bilinear_1pole(poles[order / 2].re * wc, k, kind));
    }

    let spec = FilterSpec { sections, sample_rate_hz };
    if !spec.is_stable() {
        return Err(DspError::UnstableDesign {
            what: match kind {
                Kind::Lowpass => "lowpass",
                Kind::Highpass => "highpass",
            },
        });
    }
    Ok(spec)
}

/// Left-half-plane Butterworth poles on the unit circle, ordered by
/// angle so the first `order / 2` lie in the upper half plane.
fn butterworth_poles(order: usize) -> Vec<ComplexSample> {
    (0..order)
        .map(|k| {
            let theta =
                std::f64::consts::PI * (2 * k + order + 1) as RealSample / (2 * order) as RealSample;
            ComplexSample::new(theta.cos(), theta.sin())
        })
        .collect()
}

/// Map the digital cutoff back to the analog frequency the bilinear
/// transform will land on the requested point.
fn prewarp(freq_hz: RealSample, sample_rate_hz: RealSample) -> RealSample {
    2.0 * sample_rate_hz * (std::f64::consts::PI * freq_hz / sample_rate_hz).tan()
}

fn bilinear_1pole(p: RealSample, k: RealSample, kind: Kind) -> Biquad {
    let alpha = k - p;
    let beta = k + p;
    let b = match kind {
        Kind::Lowpass => [-p / alpha, -p / alpha, 0.0],
        Kind::Highpass => [k / alpha, -k / alpha, 0.0],
    };
    Biquad::new(b, [-beta / alpha, 0.0])
}

fn bilinear_2pole(p: ComplexSample, k: RealSample, kind: Kind) -> Biquad {
    let pmag2 = p.re * p.re + p.im * p.im;
    let k2 = k * k;
    let d = k2 - 2.0 * k * p.re + pmag2;
    let b = match kind {
        Kind::Lowpass => [pmag2 / d, 2.0 * pmag2 / d, pmag2 / d],
        Kind::Highpass => [k2 / d, -2.0 * k2 / d, k2 / d],
    };
    let a = [2.0 * (pmag2 - k2) / d, (k2 + 2.0 * k * p.re + pmag2) / d];
    Biquad::new(b, a)
}
