//! Central finite differences from bumped revaluations.

use crate::error::{MathError, MathResult};

/// First and second central differences, normalised by the base value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifferences {
    /// `(f₊ - f₋) / (2 · f₀ · h)`
    pub first: f64,
    /// `(f₊ + f₋ - 2·f₀) / (f₀ · h²)`
    pub second: f64,
}

/// Relative first and second derivatives from three revaluations.
///
/// `down`, `base` and `up` are the function evaluated at `x - h`, `x` and
/// `x + h`.
pub fn central_differences(down: f64, base: f64, up: f64, h: f64) -> MathResult<CentralDifferences> {
    if base.abs() < 1e-12 {
        return Err(MathError::DivisionByZero { value: base });
    }
    if h.abs() < 1e-12 {
        return Err(MathError::invalid_input("bump size too small"));
    }

    Ok(CentralDifferences {
        first: (up - down) / (2.0 * base * h),
        second: (up + down - 2.0 * base) / (base * h * h),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential() {
        // f(x) = e^(2x): f'/f = 2, f''/f = 4
        let h = 1e-4;
        let f = |x: f64| (2.0 * x).exp();
        let diffs = central_differences(f(-h), f(0.0), f(h), h).unwrap();
        assert_relative_eq!(diffs.first, 2.0, epsilon = 1e-6);
        assert_relative_eq!(diffs.second, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_base_rejected() {
        assert!(central_differences(1.0, 0.0, 1.0, 1e-4).is_err());
        assert!(central_differences(1.0, 1.0, 1.0, 0.0).is_err());
    }
}
