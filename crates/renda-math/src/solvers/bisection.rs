//! Bisection with symmetric bracket expansion.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{Bracket, BracketExpansion, SolverConfig, SolverResult};

/// Widens `[lo, hi]` until `f` changes sign across it.
///
/// Each widening moves `lo` down by `step` (never below `floor`) and `hi` up
/// by `step`. Fails with [`MathError::InvalidBracket`] once
/// `max_expansions` widenings have been tried.
pub fn expand_bracket<F>(f: &F, lo: f64, hi: f64, expansion: &BracketExpansion) -> MathResult<Bracket>
where
    F: Fn(f64) -> f64,
{
    let mut bracket = Bracket::evaluate(f, lo.min(hi), lo.max(hi));

    for attempt in 0..=expansion.max_expansions {
        if bracket.has_sign_change() {
            return Ok(bracket);
        }
        if attempt == expansion.max_expansions {
            break;
        }
        let lo = (bracket.lo - expansion.step).max(expansion.floor);
        let hi = bracket.hi + expansion.step;
        debug!("widening bracket to [{lo}, {hi}]");
        bracket = Bracket::evaluate(f, lo, hi);
    }

    Err(MathError::InvalidBracket {
        a: bracket.lo,
        b: bracket.hi,
        fa: bracket.f_lo,
        fb: bracket.f_hi,
    })
}

/// Bisection over a bracket known to contain a sign change.
///
/// Halves the interval until `|f(mid)| < tolerance` or `max_iterations`
/// steps have run, and returns the last midpoint either way. An endpoint
/// that is already an exact root is returned immediately.
///
/// # Example
///
/// ```rust
/// use renda_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let bracket = Bracket::evaluate(&f, a.min(b), a.max(b));
    if bracket.f_lo == 0.0 {
        return Ok(exact(bracket.lo));
    }
    if bracket.f_hi == 0.0 {
        return Ok(exact(bracket.hi));
    }
    if !bracket.has_sign_change() {
        return Err(MathError::InvalidBracket {
            a: bracket.lo,
            b: bracket.hi,
            fa: bracket.f_lo,
            fb: bracket.f_hi,
        });
    }
    Ok(bisect(&f, bracket, config))
}

/// Expands `[lo, hi]` as needed, then bisects.
pub fn bisection_expanding<F>(
    f: F,
    lo: f64,
    hi: f64,
    expansion: &BracketExpansion,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let bracket = expand_bracket(&f, lo, hi, expansion)?;
    Ok(bisect(&f, bracket, config))
}

fn exact(root: f64) -> SolverResult {
    SolverResult {
        root,
        iterations: 0,
        residual: 0.0,
        converged: true,
    }
}

fn bisect<F>(f: &F, bracket: Bracket, config: &SolverConfig) -> SolverResult
where
    F: Fn(f64) -> f64,
{
    let Bracket {
        mut lo,
        mut hi,
        mut f_lo,
        ..
    } = bracket;
    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f(mid);
    let mut iterations = 1;

    while f_mid.abs() >= config.tolerance && iterations < config.max_iterations {
        if (f_mid < 0.0) == (f_lo < 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
        f_mid = f(mid);
        iterations += 1;
    }

    SolverResult {
        root: mid,
        iterations,
        residual: f_mid,
        converged: f_mid.abs() < config.tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt2() {
        let f = |x: f64| x * x - 2.0;
        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert!(result.converged);
    }

    #[test]
    fn test_reversed_bounds() {
        let f = |x: f64| x - 0.25;
        let result = bisection(f, 1.0, 0.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_endpoint() {
        let f = |x: f64| x - 1.0;
        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;
        assert!(matches!(
            bisection(f, -1.0, 1.0, &SolverConfig::default()),
            Err(MathError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn test_expansion_reaches_root() {
        // root lies outside [-0.99, 5.0]; five widenings put hi at 7.5
        let f = |x: f64| x - 7.25;
        let bracket = expand_bracket(&f, -0.99, 5.0, &BracketExpansion::default()).unwrap();
        assert_relative_eq!(bracket.hi, 7.5);
        assert_relative_eq!(bracket.lo, -0.999);
    }

    #[test]
    fn test_expansion_gives_up() {
        let f = |x: f64| x - 100.0;
        let result = expand_bracket(&f, -0.99, 5.0, &BracketExpansion::default());
        assert!(matches!(result, Err(MathError::InvalidBracket { b, .. }) if (b - 9.0).abs() < 1e-12));
    }

    #[test]
    fn test_max_iterations_returns_midpoint() {
        let f = |x: f64| x - 0.3;
        let config = SolverConfig::new(1e-30, 3);
        let result = bisection(f, 0.0, 1.0, &config).unwrap();
        // 0.5 -> 0.25 -> 0.375
        assert_relative_eq!(result.root, 0.375);
        assert_eq!(result.iterations, 3);
        assert!(!result.converged);
    }

    #[test]
    fn test_bisection_expanding() {
        let f = |x: f64| (1.0 + x).powi(2) - 49.0;
        let result = bisection_expanding(
            f,
            -0.99,
            5.0,
            &BracketExpansion::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(result.root, 6.0, epsilon = 1e-9);
    }
}
