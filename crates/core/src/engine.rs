//! Page layout engine.
//!
//! Items are processed strictly in input order. Each item is placed into the
//! best-short-side-fit free rectangle over all existing pages; when nothing
//! fits, a fresh page is allocated and the search is retried on that page
//! alone. Items that do not fit an empty page are dropped and reported.

use crate::free_space::FreeRectPool;
use crate::item::{Item, ResolvedItem};
use crate::page::{Page, PageAllocator};
use crate::result::{DropReason, DroppedItem, Layout, PageLayout, PlacedItem};
use crate::search::{self, PlacementChoice};
use crate::size::SizeResolver;
use crate::solver::{Config, Solver};
use crate::{Error, Result};

/// Packs items onto pages.
///
/// The engine holds only its configuration; every call to
/// [`layout`](Self::layout) starts from fresh state.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: Config,
}

impl LayoutEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates an engine with the default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves print sizes for the items without placing them.
    pub fn resolve(&self, items: &[Item]) -> Vec<ResolvedItem> {
        SizeResolver::new(self.config.global_target_diagonal).resolve_all(items)
    }

    /// Lays out the items onto pages.
    ///
    /// Fails only for an invalid configuration or an internal error; skipped
    /// and dropped items are reported in the returned [`Layout`].
    pub fn layout(&self, items: &[Item]) -> Result<Layout> {
        self.config.validate()?;

        let allocator = PageAllocator::new(&self.config);
        let usable = allocator.usable_rect();
        let mut layout = Layout::new(usable.w, usable.h);
        let resolved = self.resolve(items);

        if allocator.is_degenerate() {
            log::warn!(
                "margin {:.2} leaves no usable area on a {:.2}x{:.2} page; dropping {} item(s)",
                self.config.margin,
                self.config.page_width,
                self.config.page_height,
                resolved.iter().filter(|r| r.is_placeable()).count()
            );
            for item in resolved {
                if item.is_placeable() {
                    layout.dropped.push(dropped(&item, DropReason::DegenerateConfig));
                } else {
                    layout.skipped.push(item.id);
                }
            }
            return Ok(layout);
        }

        let mut pages: Vec<Page> = Vec::new();

        for item in &resolved {
            if !item.is_placeable() {
                log::debug!("skipping zero-size item {}", item.id);
                layout.skipped.push(item.id.clone());
                continue;
            }

            let choice = match search::find_best(&pages, item) {
                Some(choice) => Some(choice),
                None => {
                    let index = pages.len();
                    pages.push(allocator.allocate(index));
                    search::find_best_on_page(index, &pages[index], item)
                }
            };

            match choice {
                Some(choice) => {
                    let page = pages.get_mut(choice.page).ok_or_else(|| {
                        Error::Internal(format!("page {} out of range", choice.page))
                    })?;
                    place(page, &choice, item, self.config.gap)?;
                }
                None => {
                    log::warn!(
                        "item {} ({:.1}x{:.1}) does not fit the usable page area {:.1}x{:.1}; dropped",
                        item.id,
                        item.print_width,
                        item.print_height,
                        usable.w,
                        usable.h
                    );
                    layout
                        .dropped
                        .push(dropped(item, DropReason::ExceedsUsableArea));
                }
            }
        }

        layout.pages = pages
            .into_iter()
            .filter(|page| !page.is_empty())
            .enumerate()
            .map(|(index, page)| PageLayout {
                index,
                placements: page.placements,
            })
            .collect();

        Ok(layout)
    }
}

impl Solver for LayoutEngine {
    fn solve(&self, items: &[Item]) -> Result<Layout> {
        self.layout(items)
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

/// Lays out `items` with `config` in a single call.
pub fn layout(items: &[Item], config: Config) -> Result<Layout> {
    LayoutEngine::new(config).layout(items)
}

/// Records the placement and carves it out of the page's free space.
fn place(page: &mut Page, choice: &PlacementChoice, item: &ResolvedItem, gap: f64) -> Result<()> {
    let rect = page.free.rects().get(choice.rect).copied().ok_or_else(|| {
        Error::Internal(format!(
            "free rectangle {} out of range on page {}",
            choice.rect, page.index
        ))
    })?;
    let orientation = choice.orientation;

    log::debug!(
        "placing {} on page {} at ({:.1}, {:.1}){}",
        item.id,
        page.index,
        rect.x,
        rect.y,
        if orientation.rotated { " rotated" } else { "" }
    );

    split_and_merge(&mut page.free, choice.rect, orientation.width, orientation.height, gap)?;
    page.placements.push(PlacedItem {
        item_index: item.index,
        item_id: item.id.clone(),
        x: rect.x,
        y: rect.y,
        width: orientation.width,
        height: orientation.height,
        rotated: orientation.rotated,
    });
    Ok(())
}

fn split_and_merge(
    free: &mut FreeRectPool,
    index: usize,
    width: f64,
    height: f64,
    gap: f64,
) -> Result<()> {
    free.split(index, width, height, gap)?;
    free.merge();
    Ok(())
}

fn dropped(item: &ResolvedItem, reason: DropReason) -> DroppedItem {
    DroppedItem {
        item_index: item.index,
        item_id: item.id.clone(),
        width: item.print_width,
        height: item.print_height,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Resolution;
    use approx::assert_relative_eq;

    fn unit_config(page_w: f64, page_h: f64) -> Config {
        Config::new()
            .with_page_size(page_w, page_h)
            .with_margin(0.0)
            .with_gap(0.0)
    }

    fn assert_no_overlap(layout: &Layout) {
        for page in &layout.pages {
            for i in 0..page.placements.len() {
                for j in (i + 1)..page.placements.len() {
                    assert!(
                        !page.placements[i].overlaps(&page.placements[j]),
                        "{:?} overlaps {:?}",
                        page.placements[i],
                        page.placements[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_item() {
        // 3-4-5 triangle: diagonal 50 gives 40x30.
        let config = unit_config(100.0, 100.0).with_target_diagonal(50.0);
        let engine = LayoutEngine::new(config);

        let layout = engine.layout(&[Item::new("a", 400, 300)]).unwrap();

        assert_eq!(layout.page_count(), 1);
        let p = &layout.pages[0].placements[0];
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert_relative_eq!(p.width, 40.0, epsilon = 1e-9);
        assert_relative_eq!(p.height, 30.0, epsilon = 1e-9);
        assert!(!p.rotated);
    }

    #[test]
    fn test_empty_input() {
        let layout = LayoutEngine::default_config().layout(&[]).unwrap();
        assert!(layout.pages.is_empty());
        assert!(layout.all_placed());
    }

    #[test]
    fn test_zero_size_items_are_skipped() {
        let config = unit_config(100.0, 100.0).with_target_diagonal(50.0);
        let items = vec![
            Item::new("zero", 400, 300).with_diagonal(0.0),
            Item::new("negative", 400, 300).with_diagonal(-1.0),
            Item::new("ok", 400, 300),
        ];

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        assert_eq!(layout.placed_count(), 1);
        assert_eq!(layout.skipped, vec!["zero".to_string(), "negative".to_string()]);
        assert!(layout.dropped.is_empty());
    }

    #[test]
    fn test_overflow_creates_pages() {
        // 60x60 squares: only one fits per 100x100 page.
        let diagonal = 60.0 * 2.0_f64.sqrt();
        let config = unit_config(100.0, 100.0).with_target_diagonal(diagonal);
        let items: Vec<Item> = (0..3).map(|i| Item::new(format!("s{i}"), 10, 10)).collect();

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        assert_eq!(layout.page_count(), 3);
        assert_eq!(layout.placed_count(), 3);
        let indices: Vec<usize> = layout.pages.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_later_items_fill_earlier_pages() {
        let config = unit_config(100.0, 100.0);
        let items = vec![
            Item::new("big1", 800, 800).with_diagonal(80.0 * 2.0_f64.sqrt()),
            Item::new("big2", 800, 800).with_diagonal(80.0 * 2.0_f64.sqrt()),
            Item::new("small", 100, 100).with_diagonal(15.0 * 2.0_f64.sqrt()),
        ];

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[0].placements.len(), 2);
        assert_eq!(layout.pages[0].placements[1].item_id, "small");
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_oversized_item_dropped_without_page() {
        let config = unit_config(100.0, 100.0).with_target_diagonal(500.0);
        let layout = LayoutEngine::new(config)
            .layout(&[Item::new("huge", 300, 200)])
            .unwrap();

        assert!(layout.pages.is_empty());
        assert_eq!(layout.dropped_count(), 1);
        assert_eq!(layout.dropped[0].reason, DropReason::ExceedsUsableArea);
        assert_eq!(layout.dropped[0].item_index, 0);
    }

    #[test]
    fn test_speculative_page_kept_when_filled_later() {
        let config = unit_config(100.0, 100.0);
        let items = vec![
            Item::new("a", 100, 100).with_diagonal(90.0 * 2.0_f64.sqrt()),
            Item::new("huge", 100, 100).with_diagonal(1000.0),
            Item::new("b", 100, 100).with_diagonal(90.0 * 2.0_f64.sqrt()),
        ];

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        // The page opened for "huge" is reused by "b".
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[1].placements[0].item_id, "b");
        assert_eq!(layout.dropped_count(), 1);
    }

    #[test]
    fn test_gap_between_items() {
        let config = unit_config(100.0, 40.0)
            .with_gap(5.0)
            .with_target_diagonal(20.0 * 2.0_f64.sqrt());
        let items: Vec<Item> = (0..3).map(|i| Item::new(format!("s{i}"), 10, 10)).collect();

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        let xs: Vec<f64> = layout.pages[0].placements.iter().map(|p| p.x).collect();
        assert_eq!(layout.page_count(), 1);
        assert_relative_eq!(xs[1] - xs[0], 25.0, epsilon = 1e-9);
        assert_relative_eq!(xs[2] - xs[1], 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_margin() {
        let res = Resolution::SCREEN;
        let config = Config::new().with_margin(res.inches(5.0));
        let items = vec![
            Item::new("a", 100, 100),
            Item::new("b", 100, 100),
            Item::new("zero", 100, 100).with_diagonal(0.0),
        ];

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        assert!(layout.pages.is_empty());
        assert_eq!(layout.dropped_count(), 2);
        assert!(layout
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::DegenerateConfig));
        assert_eq!(layout.skipped.len(), 1);
    }

    #[test]
    fn test_negative_global_diagonal_skips_items() {
        let config = Config::new().with_target_diagonal(-96.0);
        let items = vec![
            Item::new("a", 400, 300),
            Item::new("b", 300, 400),
            Item::new("c", 100, 100),
        ];

        let layout = LayoutEngine::new(config).layout(&items).unwrap();

        assert!(layout.pages.is_empty());
        assert!(layout.dropped.is_empty());
        assert_eq!(layout.skipped, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let engine = LayoutEngine::new(Config::new().with_gap(f64::NAN));
        assert!(matches!(
            engine.layout(&[Item::new("a", 1, 1)]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_solver_trait() {
        let engine = LayoutEngine::default_config();
        let solver: &dyn Solver = &engine;
        let layout = solver.solve(&[Item::new("a", 4000, 3000)]).unwrap();
        assert_eq!(layout.placed_count(), 1);
        assert_eq!(solver.config(), &Config::default());
    }
}
