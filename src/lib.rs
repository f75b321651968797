//! # Phase plane
//! `phase_plane` traces integral curves of planar autonomous ODEs with an adaptive embedded
//! Runge-Kutta method and locates their limiting cycles by bisection on the return map.

// Re-export from external crate
use nalgebra as na;
pub use crate::na::Vector2;

// Declare modules
pub mod bahvalov5;
pub mod config;
pub mod controller;
pub mod curve;
pub mod cycle;
pub mod portrait;
pub mod shared;
pub mod system;
pub mod tracer;

pub use bahvalov5::{Bahvalov5, Tableau};
pub use config::Config;
pub use curve::{Curve, CurveKind};
pub use cycle::{CycleLocator, CycleSearchBracket, LimitCycle};
pub use portrait::{Bounds, Direction, Portrait};
pub use shared::{IntegrationError, State, Stats};
pub use system::{CubicSystem, FnSystem, PlanarSystem};
pub use tracer::CurveTracer;
