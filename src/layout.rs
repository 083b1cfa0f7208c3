//! Album grid sizing and column correction.
//!
//! Tiles are sized so `columns_requested` of them fill the viewport. When the
//! requested column count disagrees with what the viewport and library size
//! call for, the page is replaced with the grid at the corrected count.
//!
//! Convergence: the corrected count is `max(1, floor(width / albums))`. For a
//! corrected count `c >= 1` derived by floor, `c * albums <= width` so the
//! cramped rule is false, and `floor(width / albums) == c` so the sparse rule
//! is false. When `width < albums` the correction clamps to 1, and a
//! correction equal to the current count is never issued, so a page already
//! at 1 column stays put.

use crate::error::LayoutError;
use crate::model::{GridConfiguration, ViewportMetrics};
use crate::navigator::Navigator;
use std::cell::Cell;
use tracing::info;

pub const DEFAULT_TILE_PADDING_PX: u32 = 16;
pub const ALBUMS_PATH: &str = "/albums";

pub fn albums_path(columns: u32) -> String {
    format!("{ALBUMS_PATH}/{columns}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDecision {
    /// Width and height applied to every album-cover tile.
    pub tile_side_px: u32,
    /// Column count the page should be replaced with, if any.
    pub corrected_columns: Option<u32>,
}

/// Where the resolver reads its inputs and writes tile sizes.
pub trait GridSurface {
    fn viewport(&self) -> Result<ViewportMetrics, LayoutError>;
    fn grid_configuration(&self) -> Result<GridConfiguration, LayoutError>;
    fn apply_tile_side(&self, side_px: u32);
}

/// Pure layout computation for one pass.
pub fn resolve(
    viewport: ViewportMetrics,
    config: GridConfiguration,
    padding_px: u32,
) -> Result<LayoutDecision, LayoutError> {
    let width = viewport.client_width_px;
    if width == 0 {
        return Err(LayoutError::ZeroWidth);
    }
    let columns = config.columns_requested;
    if columns == 0 {
        return Err(LayoutError::ZeroColumns);
    }

    Ok(LayoutDecision {
        tile_side_px: (width / columns).saturating_sub(padding_px),
        corrected_columns: correction(width, columns, config.total_album_count),
    })
}

fn correction(width: u32, columns: u32, albums: u32) -> Option<u32> {
    if albums == 0 {
        return None;
    }
    let fitting = width / albums;
    let too_cramped = u64::from(width) < u64::from(columns) * u64::from(albums);
    let too_sparse = fitting > columns;
    if !(too_cramped || too_sparse) {
        return None;
    }
    let ideal = fitting.max(1);
    (ideal != columns).then_some(ideal)
}

/// Runs layout passes against a page and issues at most one correction.
pub struct GridLayoutResolver<N> {
    navigator: N,
    padding_px: u32,
    redirected: Cell<bool>,
}

impl<N: Navigator> GridLayoutResolver<N> {
    pub fn new(navigator: N, padding_px: u32) -> Self {
        Self {
            navigator,
            padding_px,
            redirected: Cell::new(false),
        }
    }

    /// One pass: size tiles, then correct the column count if it is wrong.
    ///
    /// A configuration error aborts the pass before anything is written.
    pub fn run_pass(&self, surface: &impl GridSurface) -> Result<LayoutDecision, LayoutError> {
        let viewport = surface.viewport()?;
        let config = surface.grid_configuration()?;
        let decision = resolve(viewport, config, self.padding_px)?;

        surface.apply_tile_side(decision.tile_side_px);

        if let Some(columns) = decision.corrected_columns {
            // The page is about to go away; resize events until then must not
            // stack further navigations.
            if !self.redirected.replace(true) {
                info!(
                    "album grid at {} columns does not fit {}px, switching to {columns}",
                    config.columns_requested, viewport.client_width_px
                );
                self.navigator.replace(&albums_path(columns));
            }
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNavigator, NavEvent};
    use std::cell::RefCell;

    struct FakeGrid {
        width: Cell<u32>,
        config: Result<GridConfiguration, LayoutError>,
        applied: RefCell<Vec<u32>>,
    }

    impl FakeGrid {
        fn new(width: u32, columns: u32, albums: u32) -> Self {
            Self {
                width: Cell::new(width),
                config: GridConfiguration::new(columns, albums),
                applied: RefCell::new(Vec::new()),
            }
        }
    }

    impl GridSurface for FakeGrid {
        fn viewport(&self) -> Result<ViewportMetrics, LayoutError> {
            Ok(ViewportMetrics {
                client_width_px: self.width.get(),
            })
        }

        fn grid_configuration(&self) -> Result<GridConfiguration, LayoutError> {
            self.config.clone()
        }

        fn apply_tile_side(&self, side_px: u32) {
            self.applied.borrow_mut().push(side_px);
        }
    }

    fn decide(width: u32, columns: u32, albums: u32) -> LayoutDecision {
        resolve(
            ViewportMetrics {
                client_width_px: width,
            },
            GridConfiguration::new(columns, albums).unwrap(),
            DEFAULT_TILE_PADDING_PX,
        )
        .unwrap()
    }

    #[test]
    fn tile_side_is_floored_share_minus_padding() {
        assert_eq!(decide(1000, 6, 0).tile_side_px, 166 - 16);
        assert_eq!(decide(1920, 8, 0).tile_side_px, 240 - 16);
    }

    #[test]
    fn tile_side_never_goes_negative() {
        assert_eq!(decide(40, 6, 0).tile_side_px, 0);
    }

    #[test]
    fn sparse_grid_is_widened_to_fit_every_album() {
        let decision = decide(1200, 6, 10);
        assert_eq!(decision.corrected_columns, Some(120));
        assert_eq!(decide(1200, 120, 10).corrected_columns, None);
    }

    #[test]
    fn cramped_grid_is_narrowed() {
        // 8 columns of 200 albums needs 1600px.
        let decision = decide(1000, 8, 200);
        assert_eq!(decision.corrected_columns, Some(5));
        assert_eq!(decide(1000, 5, 200).corrected_columns, None);
    }

    #[test]
    fn correction_converges_in_one_step() {
        for width in [1u32, 7, 99, 100, 101, 640, 1199, 1200, 1201, 2560, 3840] {
            for albums in [1u32, 2, 3, 10, 99, 100, 101, 250, 5000] {
                for columns in [1u32, 2, 6, 13, 120, 400] {
                    let first = decide(width, columns, albums);
                    let settled = first.corrected_columns.unwrap_or(columns);
                    assert_eq!(
                        decide(width, settled, albums).corrected_columns,
                        None,
                        "width={width} albums={albums} columns={columns} -> {settled}"
                    );
                }
            }
        }
    }

    #[test]
    fn narrow_viewport_with_large_library_settles_on_one_column() {
        assert_eq!(decide(300, 4, 1000).corrected_columns, Some(1));
        assert_eq!(decide(300, 1, 1000).corrected_columns, None);
    }

    #[test]
    fn empty_library_skips_correction() {
        for columns in [1, 6, 50] {
            let decision = decide(1280, columns, 0);
            assert_eq!(decision.corrected_columns, None);
            assert_eq!(decision.tile_side_px, (1280 / columns).saturating_sub(16));
        }
    }

    #[test]
    fn zero_width_and_zero_columns_are_refused() {
        let config = GridConfiguration {
            columns_requested: 0,
            total_album_count: 3,
        };
        assert_eq!(
            resolve(ViewportMetrics { client_width_px: 800 }, config, 16),
            Err(LayoutError::ZeroColumns)
        );
        assert_eq!(
            resolve(
                ViewportMetrics { client_width_px: 0 },
                GridConfiguration::new(6, 3).unwrap(),
                16
            ),
            Err(LayoutError::ZeroWidth)
        );
    }

    #[test]
    fn pass_sizes_tiles_and_replaces_history_once() {
        let navigator = FakeNavigator::default();
        let resolver = GridLayoutResolver::new(navigator.clone(), DEFAULT_TILE_PADDING_PX);
        let grid = FakeGrid::new(1200, 6, 10);

        resolver.run_pass(&grid).unwrap();
        grid.width.set(1300);
        resolver.run_pass(&grid).unwrap();

        assert_eq!(*grid.applied.borrow(), vec![184, 200]);
        assert_eq!(
            navigator.events(),
            vec![NavEvent::Replace("/albums/120".to_string())]
        );
    }

    #[test]
    fn consistent_grid_only_sizes_tiles() {
        let navigator = FakeNavigator::default();
        let resolver = GridLayoutResolver::new(navigator.clone(), DEFAULT_TILE_PADDING_PX);
        let grid = FakeGrid::new(1200, 120, 10);

        let decision = resolver.run_pass(&grid).unwrap();

        assert_eq!(decision.tile_side_px, 0);
        assert_eq!(*grid.applied.borrow(), vec![0]);
        assert!(navigator.events().is_empty());
    }

    #[test]
    fn configuration_error_writes_nothing() {
        let navigator = FakeNavigator::default();
        let resolver = GridLayoutResolver::new(navigator.clone(), DEFAULT_TILE_PADDING_PX);
        let grid = FakeGrid {
            width: Cell::new(1200),
            config: GridConfiguration::parse(Some("NaN"), Some("10")),
            applied: RefCell::new(Vec::new()),
        };

        assert!(matches!(
            resolver.run_pass(&grid),
            Err(LayoutError::InvalidNumber { .. })
        ));
        assert!(grid.applied.borrow().is_empty());
        assert!(navigator.events().is_empty());
    }
}
