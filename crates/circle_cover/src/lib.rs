#![forbid(unsafe_code)]
//! circle_cover: Monte Carlo estimation of the area covered by circles in a square field.
//!
//! Modules:
//! - geom: points, circles, random circle generation
//! - experiment: banded sampling loop and the live point buffer behind it
//! - sim: the [`sim::Simulator`] contract with sequential and parallel strategies
//!
//! A simulator is built from a circle set (or a count of random circles), a cycle
//! budget, a field size and a seed. `run()` fills the point buffers; estimate and
//! progress queries stay valid at any time, including from other threads while a
//! run is in flight.
pub mod error;
pub mod experiment;
pub mod geom;
pub mod sim;

/// Convenient re-exports for common types. Import with `use circle_cover::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::experiment::Experiment;
    pub use crate::geom::{random_circles, Circle, Point};
    pub use crate::sim::{ParallelSimulator, Points, SequentialSimulator, Simulator};
}
