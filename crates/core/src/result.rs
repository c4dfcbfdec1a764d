//! Layout result representation.

use std::fmt;

use crate::geometry::FreeRect;
use crate::item::ItemId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item placed on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedItem {
    /// Position of the item in the input sequence.
    pub item_index: usize,

    /// Identifier of the source item.
    pub item_id: ItemId,

    /// Left edge.
    pub x: f64,

    /// Top edge.
    pub y: f64,

    /// Footprint width, after orientation.
    pub width: f64,

    /// Footprint height, after orientation.
    pub height: f64,

    /// True if the item was turned 90° to fit.
    pub rotated: bool,
}

impl PlacedItem {
    /// Returns the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the footprint area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns the footprint as a rectangle.
    pub fn rect(&self) -> FreeRect {
        FreeRect::new(self.x, self.y, self.width, self.height)
    }

    /// Returns true if the two footprints overlap.
    pub fn overlaps(&self, other: &PlacedItem) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

/// One finished page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageLayout {
    /// Position of the page in the layout.
    pub index: usize,

    /// Items on the page, in placement order.
    pub placements: Vec<PlacedItem>,
}

impl PageLayout {
    /// Returns the total footprint area of the page's items.
    pub fn placed_area(&self) -> f64 {
        self.placements.iter().map(PlacedItem::area).sum()
    }
}

/// Why an item could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropReason {
    /// The item is larger than an empty page's usable area in both
    /// orientations.
    ExceedsUsableArea,
    /// The margin leaves no usable area on the page.
    DegenerateConfig,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceedsUsableArea => write!(f, "exceeds usable page area"),
            Self::DegenerateConfig => write!(f, "margin leaves no usable area"),
        }
    }
}

/// An item that could not be placed on any page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DroppedItem {
    /// Position of the item in the input sequence.
    pub item_index: usize,

    /// Identifier of the source item.
    pub item_id: ItemId,

    /// Resolved print width.
    pub width: f64,

    /// Resolved print height.
    pub height: f64,

    /// Why the item was dropped.
    pub reason: DropReason,
}

/// The result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    /// Pages holding at least one item, in creation order.
    pub pages: Vec<PageLayout>,

    /// Items that could not be placed.
    pub dropped: Vec<DroppedItem>,

    /// Items skipped because their resolved size is zero.
    pub skipped: Vec<ItemId>,

    /// Usable width of each page.
    pub usable_width: f64,

    /// Usable height of each page.
    pub usable_height: f64,
}

impl Layout {
    /// Creates an empty layout for pages with the given usable size.
    pub fn new(usable_width: f64, usable_height: f64) -> Self {
        Self {
            usable_width,
            usable_height,
            ..Default::default()
        }
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }

    /// Returns the number of dropped items.
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Returns true if no item was dropped.
    pub fn all_placed(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Iterates over every placement with its page index.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlacedItem)> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.placements.iter().map(move |p| (page.index, p)))
    }

    /// Ratio of placed area to the usable area of all pages (0.0 - 1.0).
    pub fn utilization(&self) -> f64 {
        let usable = self.usable_width.max(0.0) * self.usable_height.max(0.0);
        let total = usable * self.pages.len() as f64;
        if total > 0.0 {
            self.pages.iter().map(PageLayout::placed_area).sum::<f64>() / total
        } else {
            0.0
        }
    }

    /// Computes summary statistics.
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary::from(self)
    }
}

/// Summary statistics for a layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutSummary {
    /// Items supplied to the pass.
    pub total_items: usize,
    /// Items placed.
    pub placed: usize,
    /// Items dropped.
    pub dropped: usize,
    /// Zero-size items skipped.
    pub skipped: usize,
    /// Pages used.
    pub pages: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
}

impl From<&Layout> for LayoutSummary {
    fn from(layout: &Layout) -> Self {
        let placed = layout.placed_count();
        Self {
            total_items: placed + layout.dropped.len() + layout.skipped.len(),
            placed,
            dropped: layout.dropped.len(),
            skipped: layout.skipped.len(),
            pages: layout.pages.len(),
            utilization_percent: layout.utilization() * 100.0,
        }
    }
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} items on {} page(s), {} dropped, {} skipped, {:.1}% utilization",
            self.placed,
            self.total_items,
            self.pages,
            self.dropped,
            self.skipped,
            self.utilization_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: &str, x: f64, y: f64, w: f64, h: f64) -> PlacedItem {
        PlacedItem {
            item_index: 0,
            item_id: id.to_string(),
            x,
            y,
            width: w,
            height: h,
            rotated: false,
        }
    }

    #[test]
    fn test_layout_new() {
        let layout = Layout::new(100.0, 100.0);
        assert!(layout.pages.is_empty());
        assert_eq!(layout.utilization(), 0.0);
        assert!(layout.all_placed());
    }

    #[test]
    fn test_layout_counts() {
        let mut layout = Layout::new(100.0, 100.0);
        layout.pages.push(PageLayout {
            index: 0,
            placements: vec![placed("a", 0.0, 0.0, 50.0, 50.0)],
        });
        layout.pages.push(PageLayout {
            index: 1,
            placements: vec![
                placed("b", 0.0, 0.0, 50.0, 50.0),
                placed("c", 50.0, 0.0, 50.0, 50.0),
            ],
        });
        layout.dropped.push(DroppedItem {
            item_index: 3,
            item_id: "d".to_string(),
            width: 500.0,
            height: 500.0,
            reason: DropReason::ExceedsUsableArea,
        });
        layout.skipped.push("e".to_string());

        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.placed_count(), 3);
        assert_eq!(layout.dropped_count(), 1);
        assert!(!layout.all_placed());
        assert!((layout.utilization() - 0.375).abs() < 1e-12);

        let pages: Vec<usize> = layout.placements().map(|(page, _)| page).collect();
        assert_eq!(pages, vec![0, 1, 1]);
    }

    #[test]
    fn test_layout_summary() {
        let mut layout = Layout::new(100.0, 100.0);
        layout.pages.push(PageLayout {
            index: 0,
            placements: vec![placed("a", 0.0, 0.0, 50.0, 50.0)],
        });
        layout.skipped.push("zero".to_string());

        let summary = layout.summary();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.placed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.utilization_percent, 25.0);
        assert_eq!(
            summary.to_string(),
            "1 of 2 items on 1 page(s), 0 dropped, 1 skipped, 25.0% utilization"
        );
    }

    #[test]
    fn test_placed_item_overlap() {
        let a = placed("a", 0.0, 0.0, 10.0, 10.0);
        let b = placed("b", 10.0, 0.0, 10.0, 10.0);
        let c = placed("c", 9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert_eq!(a.right(), 10.0);
        assert_eq!(c.bottom(), 19.0);
    }

    #[test]
    fn test_drop_reason_display() {
        assert_eq!(
            DropReason::ExceedsUsableArea.to_string(),
            "exceeds usable page area"
        );
    }
}
