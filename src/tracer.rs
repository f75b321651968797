//! Integral curves of a prescribed arc length.

use crate::bahvalov5::Bahvalov5;
use crate::config::Config;
use crate::curve::{Curve, CurveKind};
use crate::shared::{IntegrationError, State, Stats};
use crate::system::PlanarSystem;

/// Builds trajectories by repeatedly stepping the adaptive integrator.
pub struct CurveTracer<S>
where
    S: PlanarSystem,
{
    integrator: Bahvalov5<S>,
    max_steps: u32,
    consumed: f64,
}

impl<S> CurveTracer<S>
where
    S: PlanarSystem,
{
    pub fn new(system: S, config: &Config) -> Result<Self, IntegrationError> {
        Ok(Self {
            integrator: Bahvalov5::new(system, config)?,
            max_steps: config.max_steps,
            consumed: 0.0,
        })
    }

    /// Traces the integral curve through `seed`.
    ///
    /// The sign of `length` gives the direction. Each accepted step consumes
    /// `max(|h|, |dp|)` of the budget `|length|`, so the trace stops as soon as
    /// at least `|length|` has been consumed. The step size starts at one and is
    /// carried over from step to step.
    pub fn trace(&mut self, seed: State, length: f64) -> Result<Curve, IntegrationError> {
        if !length.is_finite() {
            return Err(IntegrationError::InvalidLength { length });
        }

        let mut curve = Curve::new(&seed, CurveKind::Trajectory);
        let mut h = if length < 0.0 { -1.0 } else { 1.0 };
        let mut dist = length.abs();
        let mut p = seed;
        let mut n_step = 0;
        self.consumed = 0.0;

        while dist > 0.0 {
            if n_step >= self.max_steps {
                return Err(IntegrationError::MaxNumStepReached {
                    x: p[0],
                    y: p[1],
                    n_step,
                });
            }
            n_step += 1;

            let dp = self.integrator.step(&p, &mut h)?;
            let used = h.abs().max(dp.norm());
            dist -= used;
            self.consumed += used;

            p += dp;
            curve.push(&p);
        }

        tracing::debug!(
            x = seed[0],
            y = seed[1],
            length,
            points = curve.len(),
            "trajectory traced"
        );
        Ok(curve)
    }

    /// Traces from `seed` forwards and backwards. The forward curve comes first.
    pub fn trace_both(&mut self, seed: State, length: f64) -> Result<(Curve, Curve), IntegrationError> {
        let forward = self.trace(seed, length.abs())?;
        let backward = self.trace(seed, -length.abs())?;
        Ok((forward, backward))
    }

    /// Arc length consumed by the last trace.
    pub fn consumed(&self) -> f64 {
        self.consumed
    }

    /// Getter for the integration statistics accumulated over all traces.
    pub fn stats(&self) -> Stats {
        self.integrator.stats()
    }
}
