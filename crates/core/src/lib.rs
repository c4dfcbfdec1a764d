//! # printpack core
//!
//! Packs photographs onto fixed-size print pages.
//!
//! Each item is sized from a target diagonal while keeping its original
//! aspect ratio, then placed with a best-short-side-fit search over the free
//! space of every page, turning it 90° when that is the only way (or the
//! tighter way) to fit. Placing an item carves its footprint plus the
//! configured gap out of a free rectangle with a guillotine cut; edge-adjacent
//! free rectangles are merged back together after every placement. Pages are
//! created on demand, and items larger than an empty page are reported as
//! dropped rather than failing the pass.
//!
//! ## Components
//!
//! - **Sizing**: [`print_size`], [`SizeResolver`]
//! - **Free space**: [`FreeRect`], [`FreeRectPool`], [`guillotine_split`]
//! - **Search**: [`search::find_best`], [`search::find_best_on_page`]
//! - **Pages**: [`Page`], [`PageAllocator`]
//! - **Engine**: [`LayoutEngine`], [`Solver`]
//! - **Results**: [`Layout`], [`PageLayout`], [`PlacedItem`], [`DroppedItem`]
//!
//! ## Example
//!
//! ```rust
//! use printpack_core::{sort_by_area_desc, Config, Item, LayoutEngine, PageSize, Resolution};
//!
//! let res = Resolution::SCREEN;
//! let config = Config::new()
//!     .with_page(PageSize::LETTER, res)
//!     .with_margin(res.inches(0.25))
//!     .with_gap(res.inches(0.1))
//!     .with_target_diagonal(res.inches(5.0));
//!
//! let mut items = vec![
//!     Item::new("beach.jpg", 4032, 3024),
//!     Item::new("portrait.jpg", 3000, 4000).with_diagonal(res.inches(7.0)),
//! ];
//! sort_by_area_desc(&mut items);
//!
//! let layout = LayoutEngine::new(config).layout(&items).unwrap();
//! println!("{}", layout.summary());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod engine;
pub mod error;
pub mod free_space;
pub mod geometry;
pub mod item;
pub mod page;
pub mod result;
pub mod search;
pub mod size;
pub mod solver;
pub mod units;

// Re-exports
pub use engine::{layout, LayoutEngine};
pub use error::{Error, Result};
pub use free_space::{guillotine_split, FreeRectPool};
pub use geometry::FreeRect;
pub use item::{sort_by_area_desc, DiagonalSize, Item, ItemId, ResolvedItem};
pub use page::{Page, PageAllocator};
pub use result::{DropReason, DroppedItem, Layout, LayoutSummary, PageLayout, PlacedItem};
pub use search::{Orientation, PlacementChoice};
pub use size::{print_size, SizeResolver};
pub use solver::{Config, Solver};
pub use units::{PageSize, Resolution, MM_PER_INCH};
