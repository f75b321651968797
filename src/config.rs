//! Configuration shared by the integrator, the tracer and the cycle locator.

use crate::bahvalov5::Tableau;
use crate::shared::IntegrationError;
use serde::{Deserialize, Serialize};

/// Tolerance, field parameter and iteration budgets.
///
/// The values are copied when an integrator is built, so they stay fixed for
/// the duration of a trace or a cycle search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bound on the local error norm of an accepted step. Default is 0.01
    pub eps: f64,
    /// Parameter of the vector field. Default is 1.0
    pub alpha: f64,
    /// Maximum number of consecutive rejections within one step. Default is 10000
    pub max_rejections: u32,
    /// Maximum number of steps of a single trace or loop. Default is 1000000
    pub max_steps: u32,
    /// Maximum number of bisections of a cycle search. Default is 200
    pub max_bisections: u32,
    /// Coefficients of the sixth stage. Default is Bahvalov
    pub tableau: Tableau,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eps: 0.01,
            alpha: 1.0,
            max_rejections: 10_000,
            max_steps: 1_000_000,
            max_bisections: 200,
            tableau: Tableau::Bahvalov,
        }
    }
}

impl Config {
    /// Default budgets with the given tolerance and parameter.
    pub fn new(eps: f64, alpha: f64) -> Self {
        Self {
            eps,
            alpha,
            ..Self::default()
        }
    }

    pub fn with_max_rejections(mut self, max_rejections: u32) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_bisections(mut self, max_bisections: u32) -> Self {
        self.max_bisections = max_bisections;
        self
    }

    pub fn with_tableau(mut self, tableau: Tableau) -> Self {
        self.tableau = tableau;
        self
    }

    /// Checks that `eps` is positive and finite and that `alpha` is finite.
    ///
    /// A non-positive tolerance can never be met, so it is rejected here
    /// instead of letting the step-size loop spin.
    pub fn validate(&self) -> Result<(), IntegrationError> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(IntegrationError::InvalidTolerance { eps: self.eps });
        }
        if !self.alpha.is_finite() {
            return Err(IntegrationError::InvalidParameter { alpha: self.alpha });
        }
        Ok(())
    }
}
