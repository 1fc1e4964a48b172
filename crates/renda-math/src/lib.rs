//! # Renda Math
//!
//! Numerical utilities for the Renda fixed income valuation engine.
//!
//! - **Solvers**: bisection with symmetric bracket expansion
//! - **Differences**: central finite differences for bump-and-reprice sensitivities
//!
//! Everything here is a pure function of its inputs; closures passed to the
//! solvers are called a bounded number of times.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod differences;
pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differences::{central_differences, CentralDifferences};
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, bisection_expanding, expand_bracket, Bracket, BracketExpansion, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
