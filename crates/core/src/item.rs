//! Input items and their resolved print sizes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caller-supplied identifier for an item.
pub type ItemId = String;

/// Which diagonal an item should be printed at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalSize {
    /// Use the configuration's global target diagonal.
    #[default]
    Global,
    /// Use this item-specific diagonal.
    Custom(f64),
}

impl DiagonalSize {
    /// Returns the effective diagonal given the global default.
    pub fn resolve(&self, global: f64) -> f64 {
        match *self {
            Self::Global => global,
            Self::Custom(d) => d,
        }
    }
}

impl From<Option<f64>> for DiagonalSize {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Global, Self::Custom)
    }
}

/// A photograph to be placed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Identifier echoed back in the layout.
    pub id: ItemId,

    /// Original pixel width.
    pub original_width: u32,

    /// Original pixel height.
    pub original_height: u32,

    /// Target diagonal for this item.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_diagonal: DiagonalSize,
}

impl Item {
    /// Creates an item that uses the global target diagonal.
    pub fn new(id: impl Into<ItemId>, original_width: u32, original_height: u32) -> Self {
        Self {
            id: id.into(),
            original_width,
            original_height,
            target_diagonal: DiagonalSize::Global,
        }
    }

    /// Overrides the target diagonal for this item.
    pub fn with_diagonal(mut self, diagonal: f64) -> Self {
        self.target_diagonal = DiagonalSize::Custom(diagonal);
        self
    }

    /// Returns the original pixel area.
    pub fn area(&self) -> u64 {
        u64::from(self.original_width) * u64::from(self.original_height)
    }
}

/// Sorts items by descending original pixel area.
///
/// The sort is stable, so items of equal area keep their relative order.
/// Placing larger items first usually packs tighter; the engine itself never
/// reorders its input.
pub fn sort_by_area_desc(items: &mut [Item]) {
    items.sort_by(|a, b| b.area().cmp(&a.area()));
}

/// An item with its print size for the current layout pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedItem {
    /// Position of the item in the input sequence.
    pub index: usize,

    /// Identifier of the source item.
    pub id: ItemId,

    /// Print width in layout units.
    pub print_width: f64,

    /// Print height in layout units.
    pub print_height: f64,

    /// Effective diagonal the size was derived from.
    pub diagonal: f64,
}

impl ResolvedItem {
    /// Returns true if the item occupies space and should be placed.
    pub fn is_placeable(&self) -> bool {
        self.print_width > 0.0 && self.print_height > 0.0
    }
}
