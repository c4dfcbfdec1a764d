//! Pages under construction and on-demand page allocation.

use crate::free_space::FreeRectPool;
use crate::geometry::FreeRect;
use crate::result::PlacedItem;
use crate::solver::Config;

/// A page during layout: its placements plus its working free space.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Creation index of the page.
    pub index: usize,

    /// Items placed on this page, in placement order.
    pub placements: Vec<PlacedItem>,

    /// Unoccupied usable area.
    pub free: FreeRectPool,
}

impl Page {
    /// Creates an empty page whose free space is `usable`.
    pub fn new(index: usize, usable: FreeRect) -> Self {
        Self {
            index,
            placements: Vec::new(),
            free: FreeRectPool::new(usable),
        }
    }

    /// Returns true if nothing has been placed on the page.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Creates pages whose single free rectangle spans the usable area.
#[derive(Debug, Clone, Copy)]
pub struct PageAllocator {
    usable: FreeRect,
}

impl PageAllocator {
    /// Creates an allocator for pages described by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            usable: FreeRect::new(
                config.margin,
                config.margin,
                config.usable_width(),
                config.usable_height(),
            ),
        }
    }

    /// Returns the usable rectangle of every page.
    pub fn usable_rect(&self) -> FreeRect {
        self.usable
    }

    /// Returns true if pages have no usable area.
    pub fn is_degenerate(&self) -> bool {
        self.usable.w <= 0.0 || self.usable.h <= 0.0
    }

    /// Creates a new empty page with creation index `index`.
    pub fn allocate(&self, index: usize) -> Page {
        log::debug!(
            "allocating page {} with usable area {:.1}x{:.1}",
            index,
            self.usable.w,
            self.usable.h
        );
        Page::new(index, self.usable)
    }
}
