//! Per-page free space tracking.
//!
//! A page's unoccupied usable area is kept as a list of non-overlapping
//! [`FreeRect`]s. Placing an item consumes the rectangle it was placed in:
//! the rectangle is replaced, at the same index, by the zero to two pieces of
//! a guillotine cut ([`guillotine_split`]). A merge pass then coalesces pieces
//! that share a full edge so later items see large contiguous regions.

use crate::geometry::FreeRect;
use crate::{Error, Result};

/// Cuts the footprint of a `width` x `height` item out of `rect`.
///
/// The item is anchored at the rectangle's top-left corner and reserves `gap`
/// on its right and bottom sides. A wide rectangle is cut vertically (a
/// full-height strip remains on the right); a tall or square rectangle is cut
/// horizontally (a full-width strip remains below).
pub fn guillotine_split(rect: &FreeRect, width: f64, height: f64, gap: f64) -> Vec<FreeRect> {
    let required_w = width + gap;
    let required_h = height + gap;
    let leftover_w = rect.w - required_w;
    let leftover_h = rect.h - required_h;

    match (leftover_w > 0.0, leftover_h > 0.0) {
        (true, true) => {
            if rect.w > rect.h {
                vec![
                    FreeRect::new(rect.x + required_w, rect.y, leftover_w, rect.h),
                    FreeRect::new(rect.x, rect.y + required_h, required_w, leftover_h),
                ]
            } else {
                vec![
                    FreeRect::new(rect.x, rect.y + required_h, rect.w, leftover_h),
                    FreeRect::new(rect.x + required_w, rect.y, leftover_w, height),
                ]
            }
        }
        (true, false) => vec![FreeRect::new(rect.x + required_w, rect.y, leftover_w, rect.h)],
        (false, true) => vec![FreeRect::new(rect.x, rect.y + required_h, rect.w, leftover_h)],
        (false, false) => Vec::new(),
    }
}

/// The free rectangles of one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreeRectPool {
    rects: Vec<FreeRect>,
}

impl FreeRectPool {
    /// Creates a pool holding a single rectangle.
    pub fn new(initial: FreeRect) -> Self {
        Self {
            rects: vec![initial],
        }
    }

    /// Creates a pool from an existing list of rectangles.
    pub fn from_rects(rects: Vec<FreeRect>) -> Self {
        Self { rects }
    }

    /// Returns the free rectangles in enumeration order.
    pub fn rects(&self) -> &[FreeRect] {
        &self.rects
    }

    /// Returns the number of free rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns true if no free space remains.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns the total free area.
    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(FreeRect::area).sum()
    }

    /// Consumes the rectangle at `index` for a placed item.
    ///
    /// The rectangle is replaced in place by the pieces of
    /// [`guillotine_split`]. An out-of-range index is an internal error.
    pub fn split(&mut self, index: usize, width: f64, height: f64, gap: f64) -> Result<()> {
        let rect = self.rects.get(index).copied().ok_or_else(|| {
            Error::Internal(format!(
                "free rectangle {} out of range (len {})",
                index,
                self.rects.len()
            ))
        })?;

        let pieces = guillotine_split(&rect, width, height, gap);
        self.rects.splice(index..=index, pieces);
        Ok(())
    }

    /// Coalesces edge-adjacent rectangles until no pair can be merged.
    ///
    /// Two rectangles merge when they share one full edge: same `x` and `w`
    /// and vertically touching, or same `y` and `h` and horizontally
    /// touching. Returns the number of merges performed.
    pub fn merge(&mut self) -> usize {
        let mut merges = 0;
        while self.merge_one() {
            merges += 1;
        }
        if merges > 0 {
            log::trace!("merged {} free rectangles, {} remain", merges, self.rects.len());
        }
        merges
    }

    /// Performs the first available merge in pair order.
    fn merge_one(&mut self) -> bool {
        for i in 0..self.rects.len() {
            for j in (i + 1)..self.rects.len() {
                if let Some(union) = self.rects[i].union_if_adjacent(&self.rects[j]) {
                    self.rects[i] = union;
                    self.rects.remove(j);
                    return true;
                }
            }
        }
        false
    }
}
