//! Quadratic densification of a path.
//!
//! Each pair of consecutive points is joined by a parabola that has its root on
//! one point and its vertex on the other. The orientation flips from one pair to
//! the next, so the inserted points weave around the recorded line instead of
//! all bulging to the same side.

use crate::error::{GpxMapError, Result};

/// `num` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * delta).collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// `step` y values of the parabola through `(x0, y0)` with its vertex at `(x1, y1)`.
///
/// In a frame shifted down by `y0` the curve is `a*t^2 + b*t + c` with
/// `a = -h/(x1-x0)^2`, `b = -2*a*x1`, `c = a*x1^2 + h` and `h = y1 - y0`; it is
/// evaluated here in the equivalent vertex form `a*(t-x1)^2 + h`. When
/// `x0 == x1` the values are a straight line from `y0` to `y1`.
pub fn quad_interp(x0: f64, x1: f64, y0: f64, y1: f64, step: usize) -> Vec<f64> {
    if x0 == x1 {
        return linspace(y0, y1, step);
    }

    let height = y1 - y0;
    let a = -height / (x1 - x0).powi(2);
    linspace(x0, x1, step)
        .into_iter()
        .map(|t| y0 + a * (t - x1).powi(2) + height)
        .collect()
}

/// Insert `step` points per pair of consecutive points.
///
/// Every segment contributes `step` values including both of its end points, so
/// the shared points between segments appear twice and the output holds
/// `(len - 1) * step` points. A `step` of 2 or less leaves the path untouched.
pub fn interpolate(x: &[f64], y: &[f64], step: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    if step <= 2 {
        tracing::warn!(step, "skipping interpolation, step size must be greater than 2");
        return Ok((x.to_vec(), y.to_vec()));
    }
    if x.len() != y.len() {
        return Err(GpxMapError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let segments = x.len().saturating_sub(1);
    let mut x_out = Vec::with_capacity(segments * step);
    let mut y_out = Vec::with_capacity(segments * step);

    for i in 0..segments {
        x_out.extend(linspace(x[i], x[i + 1], step));
        if i % 2 == 0 {
            y_out.extend(quad_interp(x[i], x[i + 1], y[i], y[i + 1], step));
        } else {
            let mut curve = quad_interp(x[i + 1], x[i], y[i + 1], y[i], step);
            curve.reverse();
            y_out.extend(curve);
        }
    }

    Ok((x_out, y_out))
}
