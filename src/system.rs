//! Right-hand sides of planar autonomous systems.

use crate::shared::State;

/// Trait needed to be implemented by the user.
///
/// Describes the autonomous system `p' = f(p, alpha)`. The field must be
/// continuous and differentiable in the region explored by the integrator.
pub trait PlanarSystem {
    /// Writes `f(p, alpha)` into `dp`.
    fn system(&self, alpha: f64, p: &State, dp: &mut State);
}

impl<S: PlanarSystem + ?Sized> PlanarSystem for &S {
    fn system(&self, alpha: f64, p: &State, dp: &mut State) {
        (**self).system(alpha, p, dp)
    }
}

/// Adapter turning a closure `|alpha, p| -> dp` into a [`PlanarSystem`].
pub struct FnSystem<F>(pub F);

impl<F> PlanarSystem for FnSystem<F>
where
    F: Fn(f64, &State) -> State,
{
    fn system(&self, alpha: f64, p: &State, dp: &mut State) {
        *dp = (self.0)(alpha, p);
    }
}

/// The cubic system
///
/// ```text
/// x' =  x + y - alpha x^3
/// y' = -x + y - y^3
/// ```
///
/// The origin is an unstable focus and the cubic terms pull trajectories
/// back from infinity, so for `alpha > 0` a stable limiting cycle surrounds
/// the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubicSystem;

impl PlanarSystem for CubicSystem {
    fn system(&self, alpha: f64, p: &State, dp: &mut State) {
        let (x, y) = (p[0], p[1]);
        dp[0] = x + y - alpha * x * x * x;
        dp[1] = -x + y - y * y * y;
    }
}
