//! Root-finding for yield solving.
//!
//! The engine solves for a yield `y` with `PV(y) = price` using plain
//! bisection over a bracket that is widened symmetrically until it contains
//! a sign change.

mod bisection;

pub use bisection::{bisection, bisection_expanding, expand_bracket};

use serde::{Deserialize, Serialize};

/// Default absolute tolerance on the residual.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum number of bisection steps.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Stop once `|f(mid)|` falls below this value.
    pub tolerance: f64,
    /// Maximum number of halvings.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// How a bracket is widened when its endpoints share a sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketExpansion {
    /// Amount subtracted from the lower bound and added to the upper bound.
    pub step: f64,
    /// The lower bound never drops below this value.
    pub floor: f64,
    /// Maximum number of widenings.
    pub max_expansions: u32,
}

impl Default for BracketExpansion {
    fn default() -> Self {
        Self {
            step: 0.5,
            floor: -0.999,
            max_expansions: 8,
        }
    }
}

/// A search interval `[lo, hi]` with the function values at its ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
    /// `f(lo)`
    pub f_lo: f64,
    /// `f(hi)`
    pub f_hi: f64,
}

impl Bracket {
    /// Evaluates `f` at both ends.
    pub fn evaluate<F: Fn(f64) -> f64>(f: &F, lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            f_lo: f(lo),
            f_hi: f(hi),
        }
    }

    /// Returns true if the endpoint values are finite and differ in sign.
    pub fn has_sign_change(&self) -> bool {
        self.f_lo.is_finite() && self.f_hi.is_finite() && (self.f_lo < 0.0) != (self.f_hi < 0.0)
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations performed.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
    /// Whether `|residual|` reached the tolerance.
    pub converged: bool,
}
