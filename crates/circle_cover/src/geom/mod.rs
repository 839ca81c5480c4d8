//! Geometric primitives for the sampling field.
//!
//! Defines [`Point`] and [`Circle`] plus random circle generation, and the
//! crate-internal helpers for drawing uniform values from an [`RngCore`].
use rand::RngCore;

pub mod circle;
pub mod point;

pub use circle::{random_circles, Circle};
pub use point::Point;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Draw a uniform value in `[min, max)`.
///
/// The upper bound is enforced by clamping to the next representable float
/// below `max`, so callers can rely on a strict upper bound even when the
/// generator lands exactly on 1.
#[inline]
pub(crate) fn rand_range(min: f32, max: f32, rng: &mut dyn RngCore) -> f32 {
    let value = min + (max - min) * rand01(rng);
    value.clamp(min, next_down(max).max(min))
}

/// Compute the next smaller representable float value.
///
/// Returns a value strictly less than the input for finite non-zero inputs,
/// used to keep draws strictly inside an exclusive upper bound.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
