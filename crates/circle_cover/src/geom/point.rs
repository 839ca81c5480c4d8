//! A sampled point and its classification.
use glam::Vec2;

/// A point drawn inside the field, with the outcome of its containment test.
///
/// Coordinates are fixed at construction. The `inside` flag starts `false`
/// and is set at most once, by the experiment that generated the point,
/// before the point is committed to its buffer. Consumers receive points by
/// value and cannot change either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    position: Vec2,
    inside: bool,
}

impl Point {
    /// Create a new point at the given position, not yet classified.
    pub fn new(position: impl Into<Vec2>) -> Self {
        Self {
            position: position.into(),
            inside: false,
        }
    }

    /// Position of the point in field coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Abscissa of the point.
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Ordinate of the point.
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Whether the point fell inside the area being estimated.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Mark the point as inside the area being estimated.
    pub(crate) fn mark_inside(&mut self) {
        self.inside = true;
    }

    pub(crate) fn from_parts(position: Vec2, inside: bool) -> Self {
        Self { position, inside }
    }
}
