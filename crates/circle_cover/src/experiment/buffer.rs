//! Append-only point storage shared between a sampling run and live readers.
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use glam::Vec2;

use crate::geom::Point;

/// Fixed-capacity buffer of sampled points with a committed cursor.
///
/// Exactly one writer (the owning experiment's run) appends; any number of
/// readers may traverse concurrently. Slots below the cursor are never
/// rewritten within a run. The cursor is published with `Release` only after
/// the slot contents are stored, and readers load it with `Acquire` before
/// touching a slot, so a committed point is always read fully formed.
pub(crate) struct PointBuffer {
    slots: Vec<Slot>,
    committed: AtomicUsize,
}

/// One point slot: the packed coordinate pair and the classification flag.
struct Slot {
    position: AtomicU64,
    inside: AtomicBool,
}

impl Slot {
    fn empty() -> Self {
        Self {
            position: AtomicU64::new(0),
            inside: AtomicBool::new(false),
        }
    }
}

fn pack(position: Vec2) -> u64 {
    ((position.x.to_bits() as u64) << 32) | position.y.to_bits() as u64
}

fn unpack(bits: u64) -> Vec2 {
    Vec2::new(
        f32::from_bits((bits >> 32) as u32),
        f32::from_bits(bits as u32),
    )
}

impl PointBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::empty()).collect(),
            committed: AtomicUsize::new(0),
        }
    }

    /// Number of fully committed points.
    pub(crate) fn committed(&self) -> usize {
        self.committed.load(Ordering::Acquire)
    }

    /// Rewind the cursor to start a fresh run.
    pub(crate) fn reset(&self) {
        self.committed.store(0, Ordering::Release);
    }

    /// Append a point at the cursor and commit it.
    ///
    /// Single-writer: only the owning experiment's run may call this.
    pub(crate) fn push(&self, point: Point) {
        let index = self.committed.load(Ordering::Relaxed);
        let slot = &self.slots[index];
        slot.inside.store(point.is_inside(), Ordering::Relaxed);
        slot.position.store(pack(point.position()), Ordering::Relaxed);
        // Slot stores above must be visible before the cursor moves past them.
        self.committed.store(index + 1, Ordering::Release);
    }

    /// Read a committed point, or `None` if `index` has not been committed yet.
    pub(crate) fn get(&self, index: usize) -> Option<Point> {
        if index >= self.committed() {
            return None;
        }

        let slot = &self.slots[index];
        Some(Point::from_parts(
            unpack(slot.position.load(Ordering::Relaxed)),
            slot.inside.load(Ordering::Relaxed),
        ))
    }

    pub(crate) fn iter(&self) -> PointCursor<'_> {
        PointCursor {
            buffer: self,
            index: 0,
        }
    }
}

/// Lazy traversal over the committed points of one buffer.
///
/// Each advance re-reads the committed cursor, so a cursor created while the
/// producer is still running yields a growing sequence: `None` means no
/// further point was committed at that instant, and the same cursor starts
/// yielding again once the producer commits more. Already-yielded elements
/// are never revised.
pub struct PointCursor<'a> {
    buffer: &'a PointBuffer,
    index: usize,
}

impl Iterator for PointCursor<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let point = self.buffer.get(self.index)?;
        self.index += 1;
        Some(point)
    }
}
