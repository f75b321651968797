//! Collections of curves owned by the caller, filled by seeding the tracer.

use crate::curve::Curve;
use crate::shared::{IntegrationError, State};
use crate::system::PlanarSystem;
use crate::tracer::CurveTracer;
use serde::{Deserialize, Serialize};

/// Direction in which a trajectory is spawned from its seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

/// Rectangle of the phase plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Ordered list of curves to display.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Portrait {
    curves: Vec<Curve>,
}

impl Portrait {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    /// Discards every curve.
    pub fn clear(&mut self) {
        self.curves.clear();
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Traces from `seed` in the given direction and appends the result.
    ///
    /// With [`Direction::Both`] the forward curve is appended first. Nothing
    /// is appended if a trace fails.
    pub fn spawn<S: PlanarSystem>(
        &mut self,
        tracer: &mut CurveTracer<S>,
        seed: State,
        length: f64,
        direction: Direction,
    ) -> Result<(), IntegrationError> {
        let length = length.abs();
        match direction {
            Direction::Forward => self.push(tracer.trace(seed, length)?),
            Direction::Backward => self.push(tracer.trace(seed, -length)?),
            Direction::Both => {
                let (forward, backward) = tracer.trace_both(seed, length)?;
                self.push(forward);
                self.push(backward);
            }
        }
        Ok(())
    }

    /// Seeds an `(m + 1) x (n + 1)` grid spanning `bounds`, corners included,
    /// and traces both directions from every node.
    pub fn quick_fill<S: PlanarSystem>(
        &mut self,
        tracer: &mut CurveTracer<S>,
        bounds: &Bounds,
        m: u32,
        n: u32,
        length: f64,
    ) -> Result<(), IntegrationError> {
        if m == 0 || n == 0 {
            return Err(IntegrationError::InvalidGrid { m, n });
        }
        let (w, h) = (bounds.width(), bounds.height());
        for i in 0..=m {
            for j in 0..=n {
                let seed = State::new(
                    bounds.x_min + f64::from(i) * w / f64::from(m),
                    bounds.y_min + f64::from(j) * h / f64::from(n),
                );
                self.spawn(tracer, seed, length, Direction::Both)?;
            }
        }
        tracing::debug!(m, n, curves = self.len(), "quick fill");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Portrait {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}
