//! Single-threaded simulation strategy.
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::{Error, Result};
use crate::experiment::Experiment;
use crate::geom::{random_circles, Circle};
use crate::sim::{seed_for_band, Points, Simulator};

/// Runs one experiment spanning the entire field on the calling thread.
pub struct SequentialSimulator {
    exp: Experiment,
}

impl SequentialSimulator {
    /// Create a simulator over a square field of the given size, validating
    /// the configuration.
    pub fn try_new(circles: Vec<Circle>, num_cycles: usize, size: f32, seed: u64) -> Result<Self> {
        validate_field_size(size)?;
        Ok(Self::build(circles, num_cycles, size, seed))
    }

    /// Create a simulator from pre-validated inputs.
    pub fn new(circles: Vec<Circle>, num_cycles: usize, size: f32, seed: u64) -> Self {
        debug_assert!(
            size.is_finite() && size > 0.0,
            "field size must be finite and > 0"
        );
        Self::build(circles, num_cycles, size, seed)
    }

    /// Create a simulator over `num_circles` random circles generated from
    /// the same seed.
    pub fn with_random_circles(
        num_circles: usize,
        num_cycles: usize,
        size: f32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(
            random_circles(num_circles, size, size, &mut rng),
            num_cycles,
            size,
            seed,
        )
    }

    fn build(circles: Vec<Circle>, num_cycles: usize, size: f32, seed: u64) -> Self {
        Self {
            exp: Experiment::new(
                &circles,
                num_cycles,
                0.0,
                size,
                size,
                seed_for_band(seed, 0),
            ),
        }
    }
}

impl Simulator for SequentialSimulator {
    fn size(&self) -> f32 {
        self.exp.width()
    }

    fn run(&self) {
        info!(
            "Sequential run: {} cycles over {} circles.",
            self.exp.num_cycles(),
            self.exp.circles().len()
        );
        self.exp.run();
    }

    fn current_estim(&self) -> f64 {
        let inside = self.exp.num_inside();
        let total = self.exp.current_cycle();
        inside as f64 / total as f64 * (self.exp.width() as f64 * self.exp.height() as f64)
    }

    fn num_cycles(&self) -> usize {
        self.exp.num_cycles()
    }

    fn current_cycle(&self) -> usize {
        self.exp.current_cycle()
    }

    fn circles(&self) -> &[Circle] {
        self.exp.circles()
    }

    fn points(&self) -> Points<'_> {
        Points::new(vec![self.exp.points()])
    }
}

pub(crate) fn validate_field_size(size: f32) -> Result<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(Error::InvalidConfig(
            "field size must be finite and > 0".into(),
        ));
    }
    Ok(())
}
