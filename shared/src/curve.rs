use glam::DVec2;
use thiserror::Error;

/// Number of chords summed by [`rough_length`]
pub const ROUGH_LENGTH_SAMPLES: usize = 16;

/// Errors that can occur while evaluating a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The flat control point list does not describe a line, quadratic or cubic curve
    #[error("Unsupported control point list of {len} values. Supported curves are straight lines (4 values), quadratic (6 values) and cubic (8 values) beziers")]
    UnsupportedDegree { len: usize },
}

/// Curve degree, inferred from the length of a flat `[x0, y0, x1, y1, ...]` list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degree {
    Line,
    Quadratic,
    Cubic,
}

impl Degree {
    pub fn from_len(len: usize) -> Result<Self, CurveError> {
        match len {
            4 => Ok(Self::Line),
            6 => Ok(Self::Quadratic),
            8 => Ok(Self::Cubic),
            _ => Err(CurveError::UnsupportedDegree { len }),
        }
    }
}

/// Heading of a direction vector in degrees, `atan2(y, x)`, screen coordinates
pub fn heading_degrees(direction: DVec2) -> f64 {
    direction.y.atan2(direction.x).to_degrees()
}

/// Position on the curve at parameter `t`. `t` is not clamped, so values
/// outside `[0, 1]` extrapolate the polynomial.
pub fn point(cp: &[f64], t: f64) -> Result<DVec2, CurveError> {
    let u = 1.0 - t;
    let p = match Degree::from_len(cp.len())? {
        Degree::Line => control_point(cp, 0) * u + control_point(cp, 1) * t,
        Degree::Quadratic => {
            control_point(cp, 0) * (u * u)
                + control_point(cp, 1) * (2.0 * u * t)
                + control_point(cp, 2) * (t * t)
        }
        Degree::Cubic => {
            control_point(cp, 0) * (u * u * u)
                + control_point(cp, 1) * (3.0 * u * u * t)
                + control_point(cp, 2) * (3.0 * u * t * t)
                + control_point(cp, 3) * (t * t * t)
        }
    };
    Ok(p)
}

/// The `index`th `(x, y)` pair of a flat list whose degree is already checked
fn control_point(cp: &[f64], index: usize) -> DVec2 {
    DVec2::new(cp[2 * index], cp[2 * index + 1])
}

pub fn derivative(cp: &[f64], t: f64) -> Result<DVec2, CurveError> {
    let u = 1.0 - t;
    let degree = Degree::from_len(cp.len())?;
    let p = |i| control_point(cp, i);
    let d = match degree {
        Degree::Line => p(1) - p(0),
        Degree::Quadratic => (p(1) - p(0)) * (2.0 * u) + (p(2) - p(1)) * (2.0 * t),
        Degree::Cubic => {
            (p(1) - p(0)) * (3.0 * u * u)
                + (p(2) - p(1)) * (6.0 * u * t)
                + (p(3) - p(2)) * (3.0 * t * t)
        }
    };
    Ok(d)
}

pub fn second_derivative(cp: &[f64], t: f64) -> Result<DVec2, CurveError> {
    let degree = Degree::from_len(cp.len())?;
    let p = |i| control_point(cp, i);
    let dd = match degree {
        Degree::Line => DVec2::ZERO,
        Degree::Quadratic => (p(2) - p(1) * 2.0 + p(0)) * 2.0,
        Degree::Cubic => {
            let u = 1.0 - t;
            (p(2) - p(1) * 2.0 + p(0)) * (6.0 * u) + (p(3) - p(2) * 2.0 + p(1)) * (6.0 * t)
        }
    };
    Ok(dd)
}

/// Sum of [`ROUGH_LENGTH_SAMPLES`] equal-parameter chords. Fixed cost; always
/// a slight underestimate of the true arc length.
pub fn rough_length(cp: &[f64]) -> Result<f64, CurveError> {
    rough_length_with_samples(cp, ROUGH_LENGTH_SAMPLES)
}

pub fn rough_length_with_samples(cp: &[f64], samples: usize) -> Result<f64, CurveError> {
    Degree::from_len(cp.len())?;
    let samples = samples.max(1);
    let step = 1.0 / samples as f64;

    let mut length = 0.0;
    let mut previous = point(cp, 0.0)?;
    for i in 1..=samples {
        let next = point(cp, i as f64 * step)?;
        length += previous.distance(next);
        previous = next;
    }
    Ok(length)
}

/// Signed radius of curvature at `t`. Infinite where the curve is straight.
pub fn radius_of_curvature(cp: &[f64], t: f64) -> Result<f64, CurveError> {
    let first = derivative(cp, t)?;
    let second = second_derivative(cp, t)?;
    let cross = first.perp_dot(second);
    if cross == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(first.length().powi(3) / cross)
}

/// Parameters at which crossties are drawn along a track of the given length.
/// Roughly thirty ties per 500 units, offset by a quarter spacing.
pub fn tie_parameters(length: f64) -> Vec<f64> {
    let count = 30.0 * length / 500.0;
    if count.is_nan() || count <= 0.0 || count.is_infinite() {
        return Vec::new();
    }

    let step = 1.0 / count;
    let mut ties = Vec::new();
    let mut t = 0.5 / count / 2.0;
    while t < 1.0 {
        ties.push(t);
        t += step;
    }
    ties
}
