//! Engine and solver settings.

use serde::{Deserialize, Serialize};

use renda_math::solvers::{BracketExpansion, SolverConfig};

use crate::instruments::DEFAULT_IPCA_LAG_MONTHS;

/// Yield solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Initial lower yield bound.
    pub lower_bound: f64,
    /// Initial upper yield bound.
    pub upper_bound: f64,
    /// Absolute tolerance on `PV(y) - price`.
    pub tolerance: f64,
    /// Maximum bisection steps.
    pub max_iterations: u32,
    /// Bracket widening per expansion.
    pub expansion_step: f64,
    /// The lower bound never widens past this value.
    pub lower_floor: f64,
    /// Maximum bracket expansions.
    pub max_expansions: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let config = SolverConfig::default();
        let expansion = BracketExpansion::default();
        Self {
            lower_bound: -0.99,
            upper_bound: 5.0,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            expansion_step: expansion.step,
            lower_floor: expansion.floor,
            max_expansions: expansion.max_expansions,
        }
    }
}

impl SolverSettings {
    /// Bisection configuration.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Bracket expansion rule.
    pub fn bracket_expansion(&self) -> BracketExpansion {
        BracketExpansion {
            step: self.expansion_step,
            floor: self.lower_floor,
            max_expansions: self.max_expansions,
        }
    }
}

/// Valuation engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Yield solver settings.
    pub solver: SolverSettings,
    /// Multiplier bump for floating-rate sensitivities (1bp = 0.0001).
    pub bump: f64,
    /// IPCA lag used when an instrument does not set one.
    pub default_ipca_lag_months: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            bump: 0.0001,
            default_ipca_lag_months: DEFAULT_IPCA_LAG_MONTHS,
        }
    }
}
