//! Limiting cycles located by shooting from a horizontal section and bisecting
//! on the displacement after one loop.

use crate::bahvalov5::Bahvalov5;
use crate::config::Config;
use crate::curve::{Curve, CurveKind};
use crate::shared::{IntegrationError, State, Stats};
use crate::system::PlanarSystem;
use serde::{Deserialize, Serialize};

/// Interval `[x1, x2]` on the line `y` searched for a cycle.
///
/// The displacements after one loop from `x1` and from `x2` must have
/// opposite signs. This is not checked: a bracket without a sign change
/// runs until the bisection budget is spent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleSearchBracket {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

impl Default for CycleSearchBracket {
    fn default() -> Self {
        Self {
            x1: 1.0,
            x2: 2.0,
            y: 0.0,
        }
    }
}

/// A located cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct LimitCycle {
    /// Abscissa of the cycle on the search line.
    pub x: f64,
    /// Displacement after one loop from `x`, below `eps` in magnitude.
    pub displacement: f64,
    pub bisections: u32,
    /// One loop of the cycle, tagged [`CurveKind::LimitingCycle`].
    pub curve: Curve,
}

/// Finds periodic orbits crossing a horizontal line.
pub struct CycleLocator<S>
where
    S: PlanarSystem,
{
    integrator: Bahvalov5<S>,
    eps: f64,
    max_steps: u32,
    max_bisections: u32,
}

impl<S> CycleLocator<S>
where
    S: PlanarSystem,
{
    pub fn new(system: S, config: &Config) -> Result<Self, IntegrationError> {
        Ok(Self {
            integrator: Bahvalov5::new(system, config)?,
            eps: config.eps,
            max_steps: config.max_steps,
            max_bisections: config.max_bisections,
        })
    }

    /// Follows the trajectory from `(x0, y_ref)` once around and returns the
    /// horizontal displacement at its return to the line `y = y_ref`.
    ///
    /// `h` is the initial step; its sign selects forward or backward time.
    pub fn single_loop(&mut self, x0: f64, y_ref: f64, h: f64) -> Result<f64, IntegrationError> {
        self.run_loop(x0, y_ref, h, None)
    }

    /// Same as [`CycleLocator::single_loop`], also returning the loop as a curve.
    pub fn single_loop_recorded(
        &mut self,
        x0: f64,
        y_ref: f64,
        h: f64,
    ) -> Result<(f64, Curve), IntegrationError> {
        let seed = State::new(x0, y_ref);
        let mut curve = Curve::new(&seed, CurveKind::LimitingCycle);
        let dx = self.run_loop(x0, y_ref, h, Some(&mut curve))?;
        Ok((dx, curve))
    }

    fn run_loop(
        &mut self,
        x0: f64,
        y_ref: f64,
        mut h: f64,
        mut record: Option<&mut Curve>,
    ) -> Result<f64, IntegrationError> {
        let mut p = State::new(x0, y_ref);

        // The first step tells whether the trajectory leaves the line upwards.
        let first = self.integrator.step(&p, &mut h)?;
        let up = first[1] > 0.0;
        p += first;
        if let Some(curve) = record.as_deref_mut() {
            curve.push(&p);
        }

        let mut n_step = 1;
        loop {
            if n_step >= self.max_steps {
                return Err(IntegrationError::MaxNumStepReached {
                    x: p[0],
                    y: p[1],
                    n_step,
                });
            }
            n_step += 1;

            let dp = self.integrator.step(&p, &mut h)?;
            let next = p + dp;

            let crossing = (up && p[1] < y_ref && next[1] > y_ref)
                || (!up && p[1] > y_ref && next[1] < y_ref);
            if crossing {
                if dp[0].abs() < self.eps {
                    if let Some(curve) = record.as_deref_mut() {
                        curve.push(&next);
                    }
                    let dx = next[0] - x0;
                    tracing::debug!(x0, dx, "loop closed");
                    return Ok(dx);
                }
                // Too coarse to locate the crossing: retry from p with half the step.
                h /= 2.0;
                tracing::debug!(x = p[0], y = p[1], h, "crossing step back");
                continue;
            }

            p = next;
            if let Some(curve) = record.as_deref_mut() {
                curve.push(&p);
            }
        }
    }

    /// Bisects `bracket` on the sign of the loop displacement until its
    /// magnitude drops below `eps`, then records the loop through the root.
    pub fn locate(
        &mut self,
        bracket: &CycleSearchBracket,
        h: f64,
    ) -> Result<LimitCycle, IntegrationError> {
        let CycleSearchBracket { mut x1, mut x2, y } = *bracket;
        let mut dx1 = self.single_loop(x1, y, h)?;

        let mut bisections = 0;
        let x = loop {
            if bisections >= self.max_bisections {
                return Err(IntegrationError::BisectionLimit {
                    x1,
                    x2,
                    n_iter: bisections,
                });
            }
            bisections += 1;

            let x3 = (x1 + x2) / 2.0;
            let dx3 = self.single_loop(x3, y, h)?;
            tracing::debug!(x3, dx3, "cycle bisection");

            if dx3.abs() < self.eps {
                break x3;
            }
            if dx3.is_sign_negative() == dx1.is_sign_negative() {
                x1 = x3;
                dx1 = dx3;
            } else {
                x2 = x3;
            }
        };

        let (displacement, curve) = self.single_loop_recorded(x, y, h)?;
        tracing::info!(x, y, displacement, bisections, "limiting cycle located");
        Ok(LimitCycle {
            x,
            displacement,
            bisections,
            curve,
        })
    }

    /// Getter for the integration statistics accumulated over all loops.
    pub fn stats(&self) -> Stats {
        self.integrator.stats()
    }
}
