//! Circles and random circle generation.
use std::f32::consts::PI;

use glam::Vec2;
use rand::RngCore;

use crate::geom::rand_range;

/// A circle in the field, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f32,
}

impl Circle {
    /// Create a new circle from its center and radius.
    pub fn new(center: impl Into<Vec2>, radius: f32) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    /// Center of the circle.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Radius of the circle.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether `position` lies inside the disk delimited by this circle.
    ///
    /// The boundary counts as inside.
    pub fn contains(&self, position: Vec2) -> bool {
        (position - self.center).length_squared() <= self.radius * self.radius
    }

    /// Generate a circle with its center uniformly distributed over
    /// `[0, width) x [0, height)` and its radius uniform in `[0, max_radius)`.
    pub fn random(width: f32, height: f32, max_radius: f32, rng: &mut dyn RngCore) -> Self {
        let center = Vec2::new(
            rand_range(0.0, width, rng),
            rand_range(0.0, height, rng),
        );
        Self::new(center, rand_range(0.0, max_radius, rng))
    }
}

/// Generate `count` random circles with centers inside the given rectangle.
///
/// The radius bound is calibrated so that even without overlap the expected
/// total disk area stays at or below half the rectangle: the mean radius is
/// `max/2`, so `count * pi * (max/2)^2 <= width * height / 2` gives
/// `max = sqrt(2 * width * height / (pi * count))`. Circles may still overlap
/// or extend past the rectangle; neither is an error.
pub fn random_circles(count: usize, width: f32, height: f32, rng: &mut dyn RngCore) -> Vec<Circle> {
    if count == 0 {
        return Vec::new();
    }

    let max_radius = (2.0 * width * height / (PI * count as f32)).sqrt();
    (0..count)
        .map(|_| Circle::random(width, height, max_radius, rng))
        .collect()
}
