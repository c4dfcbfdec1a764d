//! Best-short-side-fit placement search.
//!
//! For every page, every free rectangle and every orientation of the item,
//! a fitting candidate is scored by the smaller of its two leftover
//! dimensions. The lowest score wins; on ties the first candidate found in
//! (page, rectangle, orientation) order is kept, with the unrotated
//! orientation tried before the rotated one.

use crate::geometry::FreeRect;
use crate::item::ResolvedItem;
use crate::page::Page;

/// One way of laying an item down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Footprint width.
    pub width: f64,
    /// Footprint height.
    pub height: f64,
    /// True if width and height are swapped relative to the resolved size.
    pub rotated: bool,
}

/// The candidate chosen by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementChoice {
    /// Position of the page in the searched slice.
    pub page: usize,
    /// Index of the free rectangle on that page.
    pub rect: usize,
    /// Orientation to place the item in.
    pub orientation: Orientation,
    /// Best-short-side-fit score (lower is better).
    pub score: f64,
}

/// Returns the distinct orientations of a `width` x `height` item.
///
/// A square item has a single orientation.
pub fn orientations(width: f64, height: f64) -> Vec<Orientation> {
    let mut candidates = vec![Orientation {
        width,
        height,
        rotated: false,
    }];
    if width != height {
        candidates.push(Orientation {
            width: height,
            height: width,
            rotated: true,
        });
    }
    candidates
}

/// Scores `orientation` inside `rect`, or `None` if it does not fit.
pub fn short_side_score(rect: &FreeRect, orientation: &Orientation) -> Option<f64> {
    if rect.fits(orientation.width, orientation.height) {
        Some((rect.w - orientation.width).min(rect.h - orientation.height))
    } else {
        None
    }
}

/// Finds the best candidate on a single page.
///
/// `page_index` is copied into the returned choice.
pub fn find_best_on_page(
    page_index: usize,
    page: &Page,
    item: &ResolvedItem,
) -> Option<PlacementChoice> {
    let candidates = orientations(item.print_width, item.print_height);
    let mut best: Option<PlacementChoice> = None;

    for (rect_index, rect) in page.free.rects().iter().enumerate() {
        for orientation in &candidates {
            let Some(score) = short_side_score(rect, orientation) else {
                continue;
            };
            let is_better = best.map_or(true, |b| score < b.score);
            if is_better {
                best = Some(PlacementChoice {
                    page: page_index,
                    rect: rect_index,
                    orientation: *orientation,
                    score,
                });
            }
        }
    }

    best
}

/// Finds the best candidate across all pages.
pub fn find_best(pages: &[Page], item: &ResolvedItem) -> Option<PlacementChoice> {
    let mut best: Option<PlacementChoice> = None;
    for (page_index, page) in pages.iter().enumerate() {
        if let Some(choice) = find_best_on_page(page_index, page, item) {
            if best.map_or(true, |b| choice.score < b.score) {
                best = Some(choice);
            }
        }
    }
    best
}
