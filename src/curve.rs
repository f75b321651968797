//! Polylines produced by the tracer and the cycle locator.

use crate::shared::State;
use serde::{Deserialize, Serialize};

/// Classification of a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// Integral curve of a given arc length.
    Trajectory,
    /// One loop of a located periodic orbit.
    LimitingCycle,
}

/// Ordered samples of a trace, stored as two parallel coordinate sequences.
///
/// A curve always holds at least its seed. Once returned by the tracer or
/// the cycle locator it is never modified.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Curve {
    xs: Vec<f64>,
    ys: Vec<f64>,
    kind: CurveKind,
}

impl Curve {
    pub(crate) fn new(seed: &State, kind: CurveKind) -> Self {
        Self {
            xs: vec![seed[0]],
            ys: vec![seed[1]],
            kind,
        }
    }

    pub(crate) fn push(&mut self, p: &State) {
        self.xs.push(p[0]);
        self.ys.push(p[1]);
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sample `i`, if any.
    pub fn point(&self, i: usize) -> Option<State> {
        Some(State::new(*self.xs.get(i)?, *self.ys.get(i)?))
    }

    /// The seed of the trace.
    pub fn first(&self) -> State {
        State::new(self.xs[0], self.ys[0])
    }

    pub fn last(&self) -> State {
        let n = self.len() - 1;
        State::new(self.xs[n], self.ys[n])
    }

    pub fn points(&self) -> impl Iterator<Item = State> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| State::new(x, y))
    }

    /// Euclidean length of the polyline through the samples.
    pub fn polyline_length(&self) -> f64 {
        self.points()
            .zip(self.points().skip(1))
            .map(|(a, b)| (b - a).norm())
            .sum()
    }
}
