//! Layout configuration and the solver trait.

use crate::item::Item;
use crate::result::Layout;
use crate::units::{PageSize, Resolution};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one layout pass.
///
/// All lengths share one linear unit, typically inches multiplied by a
/// [`Resolution`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Target diagonal for items without their own override.
    pub global_target_diagonal: f64,

    /// Margin kept clear on every page edge.
    pub margin: f64,

    /// Gap reserved after each item on its right and bottom sides.
    pub gap: f64,

    /// Page width.
    pub page_width: f64,

    /// Page height.
    pub page_height: f64,
}

impl Default for Config {
    /// US Letter at 96 units per inch, 0.1 in margin, no gap, 5 in diagonal.
    fn default() -> Self {
        let res = Resolution::SCREEN;
        let (page_width, page_height) = PageSize::LETTER.to_units(res);
        Self {
            global_target_diagonal: res.inches(5.0),
            margin: res.inches(0.1),
            gap: 0.0,
            page_width,
            page_height,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global target diagonal.
    pub fn with_target_diagonal(mut self, diagonal: f64) -> Self {
        self.global_target_diagonal = diagonal;
        self
    }

    /// Sets the page margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the gap between items.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the page dimensions in layout units.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Sets the page dimensions from a physical page size.
    pub fn with_page(self, page: PageSize, resolution: Resolution) -> Self {
        let (w, h) = page.to_units(resolution);
        self.with_page_size(w, h)
    }

    /// Width available for items inside the margin.
    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Height available for items inside the margin.
    pub fn usable_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }

    /// Returns true if the margin leaves no usable area on the page.
    pub fn is_degenerate(&self) -> bool {
        self.usable_width() <= 0.0 || self.usable_height() <= 0.0
    }

    /// Checks that every value is finite and that lengths are non-negative.
    ///
    /// A finite configuration whose margin swallows the page is valid; it
    /// produces an empty layout. So is a non-positive global diagonal: items
    /// that use it resolve to 0x0 and are skipped.
    pub fn validate(&self) -> Result<()> {
        if !self.global_target_diagonal.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "global_target_diagonal is not finite ({})",
                self.global_target_diagonal
            )));
        }
        let lengths = [
            ("margin", self.margin),
            ("gap", self.gap),
            ("page_width", self.page_width),
            ("page_height", self.page_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} is not finite ({value})")));
            }
            if value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} is negative ({value})")));
            }
        }
        Ok(())
    }
}

/// Trait for page layout solvers.
pub trait Solver {
    /// Lays out the items, in the given order, onto pages.
    fn solve(&self, items: &[Item]) -> Result<Layout>;

    /// Returns the configuration this solver runs with.
    fn config(&self) -> &Config;
}
