//! A single sampling experiment over one band of the field.
//!
//! An experiment owns a sub-rectangle of the field, the subset of circles
//! that can intersect it, and a fixed-capacity buffer of generated points.
//! `run` draws uniform points, classifies them against the circle subset and
//! commits them one by one; estimate and progress queries may read the
//! counters from other threads at any time.
use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::geom::{rand_range, Circle, Point};

mod buffer;

pub use buffer::PointCursor;
pub(crate) use buffer::PointBuffer;

pub struct Experiment {
    /// Circles whose disk can intersect this band, in input order.
    circles: Vec<Circle>,
    min_x: f32,
    width: f32,
    height: f32,
    num_cycles: usize,
    seed: u64,
    num_inside: AtomicUsize,
    points: PointBuffer,
}

impl Experiment {
    /// Create an experiment over the band `[min_x, min_x + width) x [0, height)`.
    ///
    /// The circle set is filtered down to the circles relevant to the band
    /// once, here: a circle is kept if its center's abscissa lies within the
    /// band or if its disk reaches across either band edge from outside.
    pub fn new(
        circles: &[Circle],
        num_cycles: usize,
        min_x: f32,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Self {
        let max_x = min_x + width;
        let relevant: Vec<Circle> = circles
            .iter()
            .copied()
            .filter(|circle| {
                let x = circle.center().x;
                let r = circle.radius();
                (x >= min_x && x <= max_x)
                    || (x < min_x && x + r > min_x)
                    || (x > max_x && x - r < max_x)
            })
            .collect();

        debug!(
            "Band [{}, {}): {} of {} circles relevant.",
            min_x,
            max_x,
            relevant.len(),
            circles.len()
        );

        Self {
            circles: relevant,
            min_x,
            width,
            height,
            num_cycles,
            seed,
            num_inside: AtomicUsize::new(0),
            points: PointBuffer::new(num_cycles),
        }
    }

    /// Run the full sampling loop.
    ///
    /// Draws `num_cycles` points uniformly over the band, tests each against
    /// the circle subset in order and stops at the first containing circle.
    /// Counters reset first, so a re-run reproduces the same sequence from
    /// the stored seed.
    pub fn run(&self) {
        // num_inside drops before the cursor rewinds; observers read it
        // first, so the ratio they derive can only shrink during the reset.
        self.num_inside.store(0, Ordering::Release);
        self.points.reset();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_x = self.min_x + self.width;

        for _ in 0..self.num_cycles {
            let position = Vec2::new(
                rand_range(self.min_x, max_x, &mut rng),
                rand_range(0.0, self.height, &mut rng),
            );

            let mut point = Point::new(position);
            if self.circles.iter().any(|circle| circle.contains(position)) {
                point.mark_inside();
            }

            self.points.push(point);
            if point.is_inside() {
                // Incremented after the commit, and read back before the
                // cycle count, so observers never see num_inside exceed
                // current_cycle.
                self.num_inside.fetch_add(1, Ordering::Release);
            }
        }
    }

    /// Number of committed samples so far; equals [`Self::num_cycles`] once
    /// `run` has returned.
    pub fn current_cycle(&self) -> usize {
        self.points.committed()
    }

    /// Number of committed samples that fell inside some circle.
    pub fn num_inside(&self) -> usize {
        self.num_inside.load(Ordering::Acquire)
    }

    /// Total sampling budget.
    pub fn num_cycles(&self) -> usize {
        self.num_cycles
    }

    /// Circles relevant to this band.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Lazy traversal over the points committed so far, oldest first.
    pub fn points(&self) -> PointCursor<'_> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cover_circle_marks_every_point() {
        let circles = [Circle::new(Vec2::new(1.0, 1.0), 10.0)];
        let exp = Experiment::new(&circles, 1000, 0.0, 2.0, 2.0, 42);
        exp.run();

        assert_eq!(exp.current_cycle(), 1000);
        assert_eq!(exp.num_inside(), 1000);
        assert!(exp.points().all(|point| point.is_inside()));
    }

    #[test]
    fn empty_circle_set_marks_nothing() {
        let exp = Experiment::new(&[], 500, 0.0, 2.0, 2.0, 42);
        exp.run();

        assert_eq!(exp.current_cycle(), 500);
        assert_eq!(exp.num_inside(), 0);
        assert!(exp.points().all(|point| !point.is_inside()));
    }

    #[test]
    fn points_stay_inside_the_band() {
        let exp = Experiment::new(&[], 2000, 3.0, 1.5, 4.0, 7);
        exp.run();

        for point in exp.points() {
            assert!(point.x() >= 3.0 && point.x() < 4.5);
            assert!(point.y() >= 0.0 && point.y() < 4.0);
        }
    }

    #[test]
    fn zero_cycles_completes_immediately() {
        let exp = Experiment::new(&[], 0, 0.0, 1.0, 1.0, 9);
        exp.run();
        assert_eq!(exp.current_cycle(), 0);
        assert_eq!(exp.num_inside(), 0);
        assert_eq!(exp.points().count(), 0);
    }

    #[test]
    fn same_seed_reproduces_the_sequence() {
        let circles = [Circle::new(Vec2::new(0.5, 0.5), 0.3)];
        let a = Experiment::new(&circles, 200, 0.0, 1.0, 1.0, 11);
        let b = Experiment::new(&circles, 200, 0.0, 1.0, 1.0, 11);
        a.run();
        b.run();

        assert_eq!(a.num_inside(), b.num_inside());
        assert!(a.points().zip(b.points()).all(|(pa, pb)| pa == pb));
    }

    #[test]
    fn rerun_resets_and_reproduces() {
        let circles = [Circle::new(Vec2::new(0.5, 0.5), 0.3)];
        let exp = Experiment::new(&circles, 300, 0.0, 1.0, 1.0, 13);
        exp.run();
        let first_inside = exp.num_inside();
        let first_points: Vec<_> = exp.points().collect();

        exp.run();
        assert_eq!(exp.num_inside(), first_inside);
        assert!(exp.points().eq(first_points.into_iter()));
    }

    #[test]
    fn band_filter_keeps_only_reachable_circles() {
        let circles = [
            // Center inside the band.
            Circle::new(Vec2::new(2.5, 1.0), 0.1),
            // Center left of the band, disk reaches in.
            Circle::new(Vec2::new(1.5, 1.0), 1.0),
            // Center left of the band, disk too short.
            Circle::new(Vec2::new(1.0, 1.0), 0.5),
            // Center right of the band, disk reaches in.
            Circle::new(Vec2::new(5.0, 1.0), 1.5),
            // Center right of the band, disk too short.
            Circle::new(Vec2::new(6.0, 1.0), 1.0),
        ];

        let exp = Experiment::new(&circles, 10, 2.0, 2.0, 2.0, 1);
        let kept: Vec<f32> = exp.circles().iter().map(|c| c.center().x).collect();
        assert_eq!(kept, vec![2.5, 1.5, 5.0]);
    }

    #[test]
    fn band_filter_keeps_circles_centered_on_the_edges() {
        let circles = [
            Circle::new(Vec2::new(2.0, 0.0), 0.0),
            Circle::new(Vec2::new(4.0, 0.0), 0.0),
        ];
        let exp = Experiment::new(&circles, 10, 2.0, 2.0, 1.0, 1);
        assert_eq!(exp.circles().len(), 2);
    }
}
