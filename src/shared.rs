//! Shared types, errors and statistics for the integrator, the tracer and the cycle locator.

use std::fmt;
use thiserror::Error;

/// State of a planar system.
pub type State = nalgebra::Vector2<f64>;

/// Enumeration of the errors that may arise during integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("Invalid tolerance eps = {eps}. It must be positive and finite.")]
    InvalidTolerance { eps: f64 },
    #[error("Invalid parameter alpha = {alpha}. It must be finite.")]
    InvalidParameter { alpha: f64 },
    #[error("Invalid arc length {length}.")]
    InvalidLength { length: f64 },
    #[error("Invalid quick fill grid {m} x {n}.")]
    InvalidGrid { m: u32, n: u32 },
    #[error("Stopped at ({x}, {y}). Step rejected {n_reject} times in a row.")]
    MaxRejectionsReached { x: f64, y: f64, n_reject: u32 },
    #[error("Stopped at ({x}, {y}). Step size underflow.")]
    StepSizeUnderflow { x: f64, y: f64 },
    #[error("Stopped at ({x}, {y}). The vector field is not finite there.")]
    NonFiniteState { x: f64, y: f64 },
    #[error("Stopped at ({x}, {y}). Need more than {n_step} steps.")]
    MaxNumStepReached { x: f64, y: f64, n_step: u32 },
    #[error("No cycle found in [{x1}, {x2}] after {n_iter} bisections.")]
    BisectionLimit { x1: f64, x2: f64, n_iter: u32 },
}

/// Contains some statistics of the integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub num_eval: u32,
    pub accepted_steps: u32,
    pub rejected_steps: u32,
}

impl Stats {
    pub(crate) fn new() -> Stats {
        Stats {
            num_eval: 0,
            accepted_steps: 0,
            rejected_steps: 0,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Number of function evaluations: {}", self.num_eval)?;
        writeln!(f, "Number of accepted steps: {}", self.accepted_steps)?;
        write!(f, "Number of rejected steps: {}", self.rejected_steps)
    }
}
