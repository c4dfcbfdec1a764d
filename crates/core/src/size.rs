//! Diagonal-based print size derivation.
//!
//! An item's target diagonal is treated as the hypotenuse of a right triangle
//! whose legs are the print width and height, so the original aspect ratio is
//! kept exactly and `width² + height² = diagonal²`.

use crate::item::{Item, ResolvedItem};

/// Computes the print size for an image of the given pixel dimensions.
///
/// Returns `(0.0, 0.0)` when the diagonal is not a positive finite number or
/// the pixel dimensions are empty.
pub fn print_size(original_width: u32, original_height: u32, diagonal: f64) -> (f64, f64) {
    let valid = diagonal.is_finite() && diagonal > 0.0;
    if !valid || original_width == 0 || original_height == 0 {
        return (0.0, 0.0);
    }

    let ar = f64::from(original_height) / f64::from(original_width);
    // hypot(1, ar) avoids overflow of 1 + ar² for extreme panoramas.
    let width = diagonal / 1.0_f64.hypot(ar);
    let height = ar * width;
    (width, height)
}

/// Resolves item sizes for one layout pass.
#[derive(Debug, Clone, Copy)]
pub struct SizeResolver {
    global_diagonal: f64,
}

impl SizeResolver {
    /// Creates a resolver falling back to `global_diagonal`.
    pub fn new(global_diagonal: f64) -> Self {
        Self { global_diagonal }
    }

    /// Resolves a single item at position `index`.
    pub fn resolve(&self, index: usize, item: &Item) -> ResolvedItem {
        let diagonal = item.target_diagonal.resolve(self.global_diagonal);
        let (print_width, print_height) =
            print_size(item.original_width, item.original_height, diagonal);
        ResolvedItem {
            index,
            id: item.id.clone(),
            print_width,
            print_height,
            diagonal,
        }
    }

    /// Resolves every item, keeping input order.
    pub fn resolve_all(&self, items: &[Item]) -> Vec<ResolvedItem> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.resolve(i, item))
            .collect()
    }
}
