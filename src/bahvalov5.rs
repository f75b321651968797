//! Explicit embedded Runge-Kutta method of order 5 with six stages (Bahvalov) and adaptive step size.

use crate::config::Config;
use crate::controller::Controller;
use crate::shared::{IntegrationError, State, Stats};
use crate::system::PlanarSystem;
use serde::{Deserialize, Serialize};

/// Coefficients of the sixth stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tableau {
    /// `k6 = h f(p + 28 k1 - 125 k2 + 546 k3 + 54 k4 - 378 k5)`
    #[default]
    Bahvalov,
    /// England's tableau: the argument of `k6` above divided by 625.
    England,
}

impl Tableau {
    fn k6_scale(self) -> f64 {
        match self {
            Tableau::Bahvalov => 1.0,
            Tableau::England => 1.0 / 625.0,
        }
    }
}

/// Structure containing the parameters for the numerical integration.
///
/// The step size is not stored here: it is owned by the caller, shrunk in
/// place by [`Bahvalov5::step`] and carried over to the next step.
pub struct Bahvalov5<S>
where
    S: PlanarSystem,
{
    system: S,
    alpha: f64,
    k6_scale: f64,
    controller: Controller,
    max_rejections: u32,
    stats: Stats,
}

impl<S> Bahvalov5<S>
where
    S: PlanarSystem,
{
    /// Default initializer for the structure
    ///
    /// # Arguments
    ///
    /// * `system`  - Structure implementing the PlanarSystem trait
    /// * `config`  - Tolerance, field parameter and rejection budget
    ///
    pub fn new(system: S, config: &Config) -> Result<Self, IntegrationError> {
        config.validate()?;
        Ok(Self {
            system,
            alpha: config.alpha,
            k6_scale: config.tableau.k6_scale(),
            controller: Controller::bahvalov(config.eps),
            max_rejections: config.max_rejections,
            stats: Stats::new(),
        })
    }

    /// Advances `p` by one accepted step and returns the increment.
    ///
    /// Rejected attempts shrink `h` and retry from the same state. On return
    /// `h` holds the step size that produced the increment, with its sign
    /// untouched.
    pub fn step(&mut self, p: &State, h: &mut f64) -> Result<State, IntegrationError> {
        let mut n_reject = 0;
        loop {
            // Check for step size underflow
            if *h == 0.0 || 0.1 * h.abs() <= f64::EPSILON * p.amax() {
                return Err(IntegrationError::StepSizeUnderflow { x: p[0], y: p[1] });
            }

            let (dp, delta) = self.attempt(p, *h);
            if !delta.is_finite() || !dp.iter().all(|v| v.is_finite()) {
                return Err(IntegrationError::NonFiniteState { x: p[0], y: p[1] });
            }

            if self.controller.accept(delta, h) {
                self.stats.accepted_steps = self.stats.accepted_steps.saturating_add(1);
                return Ok(dp);
            }

            self.stats.rejected_steps = self.stats.rejected_steps.saturating_add(1);
            n_reject += 1;
            tracing::trace!(x = p[0], y = p[1], h = *h, delta, "step rejected");
            if n_reject > self.max_rejections {
                return Err(IntegrationError::MaxRejectionsReached {
                    x: p[0],
                    y: p[1],
                    n_reject,
                });
            }
        }
    }

    /// Evaluates the six stages with step `h` and returns the increment
    /// together with the norm of the local error estimate.
    pub(crate) fn attempt(&mut self, p: &State, h: f64) -> (State, f64) {
        let k1 = self.eval(p) * h;
        let k2 = self.eval(&(p + k1 / 2.0)) * h;
        let k3 = self.eval(&(p + k1 / 4.0 + k2 / 4.0)) * h;
        let k4 = self.eval(&(p - k2 + k3 * 2.0)) * h;
        let k5 = self.eval(&(p + (k1 * 7.0 + k2 * 10.0 + k4) / 27.0)) * h;
        let k6_arg = (k1 * 28.0 - k2 * 125.0 + k3 * 546.0 + k4 * 54.0 - k5 * 378.0) * self.k6_scale;
        let k6 = self.eval(&(p + k6_arg)) * h;

        let dp = (k1 + k3 * 4.0 + k4) / 6.0;
        let err = -(k1 * 42.0 + k3 * 224.0 + k4 * 21.0 - k5 * 162.0 - k6 * 125.0) / 336.0;
        (dp, err.norm())
    }

    fn eval(&mut self, p: &State) -> State {
        let mut dp = State::zeros();
        self.system.system(self.alpha, p, &mut dp);
        self.stats.num_eval = self.stats.num_eval.saturating_add(1);
        dp
    }

    /// Tolerance of the local error norm.
    pub fn eps(&self) -> f64 {
        self.controller.eps()
    }

    /// Getter for the integration statistics.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = Stats::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{CubicSystem, FnSystem};
    use approx::assert_relative_eq;

    fn rotation() -> FnSystem<impl Fn(f64, &State) -> State> {
        FnSystem(|_alpha: f64, p: &State| State::new(-p[1], p[0]))
    }

    #[test]
    fn accepted_step_meets_tolerance() {
        let config = Config::new(1e-3, 1.0);
        let mut stepper = Bahvalov5::new(CubicSystem, &config).unwrap();
        let p = State::new(1.5, -0.5);
        let mut h = 1.0;
        let dp = stepper.step(&p, &mut h).unwrap();

        let (dp_again, delta) = stepper.attempt(&p, h);
        assert!(delta < 1e-3);
        assert_eq!(dp, dp_again);
        assert!(h < 1.0 && h > 0.0);
        assert!(stepper.stats().rejected_steps > 0);
    }

    #[test]
    fn exact_for_linear_growth_with_england_tableau() {
        // the increment of p' = p matches e^h - 1 up to the h^5 term
        let growth = FnSystem(|_alpha: f64, p: &State| *p);
        let config = Config::new(1e-6, 0.0).with_tableau(Tableau::England);
        let mut stepper = Bahvalov5::new(growth, &config).unwrap();
        let mut h = 0.1;
        let dp = stepper.step(&State::new(1.0, 2.0), &mut h).unwrap();
        assert_eq!(h, 0.1);
        assert_relative_eq!(dp[0], 0.1_f64.exp() - 1.0, epsilon = 1e-6);
        assert_relative_eq!(dp[1], 2.0 * (0.1_f64.exp() - 1.0), epsilon = 1e-6);
    }

    #[test]
    fn tableaus_share_the_increment() {
        let growth = FnSystem(|_alpha: f64, p: &State| *p);
        let p = State::new(1.0, 2.0);
        let mut bahvalov = Bahvalov5::new(&growth, &Config::new(1e-6, 0.0)).unwrap();
        let config = Config::new(1e-6, 0.0).with_tableau(Tableau::England);
        let mut england = Bahvalov5::new(&growth, &config).unwrap();

        let (dp_b, delta_b) = bahvalov.attempt(&p, 0.1);
        let (dp_e, delta_e) = england.attempt(&p, 0.1);
        assert_eq!(dp_b, dp_e);
        assert!(delta_b > 1e-3);
        assert!(delta_e < 1e-6);

        // the default tableau needs a much smaller step on the same problem
        let mut h = 0.1;
        bahvalov.step(&p, &mut h).unwrap();
        assert!(h > 0.0 && h < 1e-3);
    }

    #[test]
    fn backward_step_keeps_sign() {
        let mut stepper = Bahvalov5::new(rotation(), &Config::new(1e-4, 0.0)).unwrap();
        let mut h = -1.0;
        let dp = stepper.step(&State::new(1.0, 0.0), &mut h).unwrap();
        assert!(h < 0.0);
        // clockwise when going backwards through a counter-clockwise rotation
        assert!(dp[1] < 0.0);
    }

    #[test]
    fn equilibrium_is_accepted_immediately() {
        let mut stepper = Bahvalov5::new(CubicSystem, &Config::default()).unwrap();
        let mut h = 1.0;
        let dp = stepper.step(&State::zeros(), &mut h).unwrap();
        assert_eq!(dp, State::zeros());
        assert_eq!(h, 1.0);
        assert_eq!(stepper.stats().num_eval, 6);
    }

    #[test]
    fn rejection_budget() {
        let config = Config::new(1e-12, 1.0).with_max_rejections(2);
        let mut stepper = Bahvalov5::new(CubicSystem, &config).unwrap();
        let mut h = 1.0;
        let err = stepper.step(&State::new(2.0, 2.0), &mut h).unwrap_err();
        assert!(matches!(
            err,
            IntegrationError::MaxRejectionsReached { n_reject: 3, .. }
        ));
    }

    #[test]
    fn zero_step_underflows() {
        let mut stepper = Bahvalov5::new(CubicSystem, &Config::default()).unwrap();
        let mut h = 0.0;
        let err = stepper.step(&State::new(1.0, 1.0), &mut h).unwrap_err();
        assert!(matches!(err, IntegrationError::StepSizeUnderflow { .. }));
    }

    #[test]
    fn singular_field_is_reported() {
        let singular = FnSystem(|_alpha: f64, p: &State| State::new(1.0 / p[0], 0.0));
        let mut stepper = Bahvalov5::new(singular, &Config::default()).unwrap();
        let mut h = 1.0;
        let err = stepper.step(&State::new(0.0, 1.0), &mut h).unwrap_err();
        assert!(matches!(err, IntegrationError::NonFiniteState { .. }));
    }

    #[test]
    fn counters_saturate() {
        let mut stepper = Bahvalov5::new(CubicSystem, &Config::default()).unwrap();
        stepper.stats.num_eval = u32::MAX - 1;
        stepper.stats.accepted_steps = u32::MAX;
        let mut h = 1.0;
        stepper.step(&State::zeros(), &mut h).unwrap();
        assert_eq!(stepper.stats().num_eval, u32::MAX);
        assert_eq!(stepper.stats().accepted_steps, u32::MAX);
    }

    #[test]
    fn invalid_tolerance() {
        assert!(Bahvalov5::new(CubicSystem, &Config::new(0.0, 1.0)).is_err());
    }
}
