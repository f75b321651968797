//! Adaptive step size control.

/// Used for adaptive step size control
///
/// On rejection the step is rescaled by `safety_factor / chi` where
/// `chi = (delta / eps)^(1/order)` is clamped to `[fac_min, fac_max]`.
#[derive(Clone, Copy, Debug)]
pub struct Controller {
    eps: f64,
    exponent: f64,
    fac_min: f64,
    fac_max: f64,
    safety_factor: f64,
}

impl Controller {
    /// Creates a controller responsible for adaptive step size control.
    ///
    /// # Arguments
    ///
    /// * `eps`     - Bound on the local error norm
    /// * `order`   - Order of the error estimate, used as the root of `delta / eps`
    /// * `fac_min` - Lower clamp of the scale factor
    /// * `fac_max` - Upper clamp of the scale factor
    /// * `safety_factor`   - Safety factor applied on every rescaling
    ///
    pub fn new(eps: f64, order: f64, fac_min: f64, fac_max: f64, safety_factor: f64) -> Controller {
        Controller {
            eps,
            exponent: 1.0 / order,
            fac_min,
            fac_max,
            safety_factor,
        }
    }

    /// Controller of the Bahvalov 5(6) pair: sixth root, clamp `[0.1, 10]`, safety 0.95.
    pub fn bahvalov(eps: f64) -> Controller {
        Controller::new(eps, 6.0, 0.1, 10.0, 0.95)
    }

    /// Determines if the step must be accepted. If not, `h` is rescaled in place.
    pub fn accept(&self, delta: f64, h: &mut f64) -> bool {
        if delta < self.eps {
            return true;
        }
        let chi = (delta / self.eps)
            .powf(self.exponent)
            .min(self.fac_max)
            .max(self.fac_min);
        *h = self.safety_factor * *h / chi;
        false
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }
}
