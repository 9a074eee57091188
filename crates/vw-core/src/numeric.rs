use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and inside `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// Round to a fixed number of decimal places (display precision of the dashboards).
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10_f64.powi(decimals as i32);
    (v * scale).round() / scale
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<Real>
where
    I: IntoIterator<Item = Real>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as Real)
    }
}
