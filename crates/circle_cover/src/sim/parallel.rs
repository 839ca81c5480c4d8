//! Partitioned multi-threaded simulation strategy.
use std::num::NonZeroUsize;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::{Error, Result};
use crate::experiment::Experiment;
use crate::geom::{random_circles, Circle};
use crate::sim::sequential::validate_field_size;
use crate::sim::{seed_for_band, Points, Simulator};

/// Splits the field into vertical bands and runs one experiment per worker.
///
/// Band `i` of `W` covers `[i * size/W, (i+1) * size/W)` with a cycle budget
/// of `num_cycles / W`; the last band absorbs the width and cycle remainders.
/// Each band's experiment holds the circles reachable from its x-range, so
/// adjacent bands may share circles; the set is read-only once built and
/// needs no synchronization.
pub struct ParallelSimulator {
    circles: Vec<Circle>,
    size: f32,
    num_cycles: usize,
    experiments: Vec<Experiment>,
}

impl ParallelSimulator {
    /// Create a simulator with one band per available hardware thread,
    /// validating the configuration.
    pub fn try_new(circles: Vec<Circle>, num_cycles: usize, size: f32, seed: u64) -> Result<Self> {
        Self::try_with_workers(circles, num_cycles, size, seed, default_workers())
    }

    /// Create a simulator with an explicit worker count, validating the
    /// configuration.
    pub fn try_with_workers(
        circles: Vec<Circle>,
        num_cycles: usize,
        size: f32,
        seed: u64,
        workers: usize,
    ) -> Result<Self> {
        validate_field_size(size)?;
        if workers == 0 {
            return Err(Error::InvalidConfig("worker count must be > 0".into()));
        }
        Ok(Self::build(circles, num_cycles, size, seed, workers))
    }

    /// Create a simulator from pre-validated inputs, one band per available
    /// hardware thread.
    pub fn new(circles: Vec<Circle>, num_cycles: usize, size: f32, seed: u64) -> Self {
        debug_assert!(
            size.is_finite() && size > 0.0,
            "field size must be finite and > 0"
        );
        Self::build(circles, num_cycles, size, seed, default_workers())
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

    fn build(
        circles: Vec<Circle>,
        num_cycles: usize,
        size: f32,
        seed: u64,
        workers: usize,
    ) -> Self {
        let band_width = size / workers as f32;
        let band_cycles = num_cycles / workers;

        let mut experiments = Vec::with_capacity(workers);
        let mut min_x = 0.0;
        for band in 0..workers - 1 {
            experiments.push(Experiment::new(
                &circles,
                band_cycles,
                min_x,
                band_width,
                size,
                seed_for_band(seed, band),
            ));
            min_x += band_width;
        }
        // The last band picks up whatever integer division and accumulated
        // band widths left over.
        experiments.push(Experiment::new(
            &circles,
            num_cycles - band_cycles * (workers - 1),
            min_x,
            size - min_x,
            size,
            seed_for_band(seed, workers - 1),
        ));

        info!(
            "Partitioned field of size {} into {} bands of ~{} cycles.",
            size, workers, band_cycles
        );

        Self {
            circles,
            size,
            num_cycles,
            experiments,
        }
    }

    /// Number of bands (and worker threads used by `run`).
    pub fn workers(&self) -> usize {
        self.experiments.len()
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

impl Simulator for ParallelSimulator {
    fn size(&self) -> f32 {
        self.size
    }

    /// Run every band's experiment on its own thread and wait for all of
    /// them.
    ///
    /// The scope joins every worker before returning, so a completed `run`
    /// implies every experiment reached its full budget. A panicking worker
    /// propagates out of the join instead of reporting a partial run as
    /// finished.
    fn run(&self) {
        info!(
            "Parallel run: {} cycles over {} circles on {} workers.",
            self.num_cycles,
            self.circles.len(),
            self.experiments.len()
        );
        thread::scope(|scope| {
            for exp in &self.experiments {
                scope.spawn(|| exp.run());
            }
        });
    }

    fn current_estim(&self) -> f64 {
        let mut inside = 0usize;
        let mut total = 0usize;
        // Per experiment, inside is read before the cycle count, so a
        // concurrent run can only make the ratio an underestimate.
        for exp in &self.experiments {
            inside += exp.num_inside();
            total += exp.current_cycle();
        }
        inside as f64 / total as f64 * (self.size as f64 * self.size as f64)
    }

    fn num_cycles(&self) -> usize {
        self.num_cycles
    }

    fn current_cycle(&self) -> usize {
        self.experiments.iter().map(Experiment::current_cycle).sum()
    }

    fn circles(&self) -> &[Circle] {
        &self.circles
    }

    fn points(&self) -> Points<'_> {
        Points::new(self.experiments.iter().map(Experiment::points).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use glam::Vec2;

    use super::*;

    fn unit_circle() -> Vec<Circle> {
        vec![Circle::new(Vec2::new(1.0, 1.0), 1.0)]
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(ParallelSimulator::try_new(Vec::new(), 10, 0.0, 1).is_err());
        assert!(ParallelSimulator::try_with_workers(Vec::new(), 10, 2.0, 1, 0).is_err());
        assert!(ParallelSimulator::try_with_workers(Vec::new(), 10, 2.0, 1, 3).is_ok());
    }

    #[test]
    fn last_band_absorbs_the_cycle_remainder() {
        let sim = ParallelSimulator::try_with_workers(Vec::new(), 1003, 2.0, 1, 4).unwrap();
        let budgets: Vec<usize> = sim.experiments.iter().map(Experiment::num_cycles).collect();
        assert_eq!(budgets, vec![250, 250, 250, 253]);
        assert_eq!(budgets.iter().sum::<usize>(), 1003);
    }

    #[test]
    fn bands_tile_the_field() {
        let sim = ParallelSimulator::try_with_workers(Vec::new(), 100, 2.0, 1, 3).unwrap();

        let first = &sim.experiments[0];
        assert_eq!(first.min_x(), 0.0);

        for pair in sim.experiments.windows(2) {
            assert_eq!(pair[0].min_x() + pair[0].width(), pair[1].min_x());
        }

        let last = sim.experiments.last().unwrap();
        assert_eq!(last.min_x() + last.width(), 2.0);
    }

    #[test]
    fn straddling_circle_lands_in_both_adjacent_bands() {
        // Two bands of width 1; the circle sits just left of the boundary
        // and reaches across it.
        let radius = 0.4;
        let circle = Circle::new(Vec2::new(1.0 - 0.5 * radius, 1.0), radius);
        let sim = ParallelSimulator::try_with_workers(vec![circle], 10, 2.0, 1, 2).unwrap();

        assert_eq!(sim.experiments[0].circles().len(), 1);
        assert_eq!(sim.experiments[1].circles().len(), 1);
    }

    #[test]
    fn run_completes_every_band() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 10_000, 2.0, 7, 3).unwrap();
        sim.run();

        assert_eq!(sim.current_cycle(), sim.num_cycles());
        for exp in &sim.experiments {
            assert_eq!(exp.current_cycle(), exp.num_cycles());
        }
    }

    #[test]
    fn band_cycles_sum_to_the_strategy_cycle_count() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 5_000, 2.0, 7, 4).unwrap();
        sim.run();
        let per_band: usize = sim.experiments.iter().map(Experiment::current_cycle).sum();
        assert_eq!(per_band, sim.current_cycle());
        assert_eq!(per_band, 5_000);
    }

    #[test]
    fn zero_cycles_reports_nan() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 0, 2.0, 7, 2).unwrap();
        sim.run();
        assert!(sim.current_estim().is_nan());
        assert_eq!(sim.current_cycle(), 0);
    }

    #[test]
    fn full_cover_circle_estimates_the_field_area() {
        let circles = vec![Circle::new(Vec2::new(1.0, 1.0), 5.0)];
        let sim = ParallelSimulator::try_with_workers(circles, 10_000, 2.0, 7, 4).unwrap();
        sim.run();
        assert_eq!(sim.current_estim(), 4.0);
    }

    #[test]
    fn unit_circle_in_a_two_field_converges_to_pi() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 2_000_000, 2.0, 42, 4).unwrap();
        sim.run();
        assert!((sim.current_estim() - PI).abs() < 0.01);
    }

    #[test]
    fn sequential_and_parallel_estimates_agree() {
        use crate::sim::SequentialSimulator;

        let mut rng = rand::rngs::StdRng::seed_from_u64(21);
        let circles = random_circles(10, 10.0, 10.0, &mut rng);

        let seq = SequentialSimulator::new(circles.clone(), 1_000_000, 10.0, 1);
        let par = ParallelSimulator::try_with_workers(circles, 1_000_000, 10.0, 2, 4).unwrap();
        seq.run();
        par.run();

        assert!((seq.current_estim() - par.current_estim()).abs() < 0.5);
    }

    #[test]
    fn points_merge_across_all_bands() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 999, 2.0, 7, 4).unwrap();
        sim.run();

        let points: Vec<_> = sim.points().collect();
        assert_eq!(points.len(), 999);
        assert!(points.iter().all(|p| p.x() >= 0.0 && p.x() < 2.0));
        assert!(points.iter().all(|p| p.y() >= 0.0 && p.y() < 2.0));
    }

    #[test]
    fn progress_is_monotonic_while_running() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 400_000, 2.0, 7, 2).unwrap();

        thread::scope(|scope| {
            scope.spawn(|| sim.run());

            let mut last = 0;
            while last < sim.num_cycles() {
                let now = sim.current_cycle();
                assert!(now >= last, "cycle count went backwards: {last} -> {now}");
                // A live snapshot must never let the covered ratio exceed 1.
                let estim = sim.current_estim();
                assert!(estim.is_nan() || estim <= 4.0 + f64::EPSILON);
                last = now;
                thread::yield_now();
            }
        });

        assert_eq!(sim.current_cycle(), sim.num_cycles());
    }

    #[test]
    fn points_can_be_polled_while_running() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 400_000, 2.0, 7, 2).unwrap();

        thread::scope(|scope| {
            scope.spawn(|| sim.run());

            loop {
                let seen = sim.points().count();
                assert!(seen <= sim.num_cycles());
                if sim.current_cycle() == sim.num_cycles() {
                    break;
                }
                thread::yield_now();
            }
        });

        assert_eq!(sim.points().count(), sim.num_cycles());
    }

    #[test]
    fn single_worker_matches_the_whole_field() {
        let sim = ParallelSimulator::try_with_workers(unit_circle(), 1_000, 2.0, 7, 1).unwrap();
        sim.run();
        assert_eq!(sim.current_cycle(), 1_000);
        assert_eq!(sim.experiments[0].width(), 2.0);
    }
}
