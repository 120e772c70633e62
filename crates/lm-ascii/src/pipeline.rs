use lm_core::charset::LuminosityTable;
use lm_core::error::CoreError;
use lm_core::frame::{AsciiGrid, PixelGrid};
use lm_core::profile::DisplayProfile;
use rayon::prelude::*;

use crate::mapper;
use crate::region;
use crate::step::{self, StepSize};

/// Relative slack on the far-edge test, absorbs `k × step` representation error.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Anchors `0, step, 2·step, …` whose cell `[a, a + step)` ends inside `extent`.
///
/// # Example
/// ```
/// use lm_ascii::pipeline::anchors;
/// assert_eq!(anchors(10, 2.5), vec![0.0, 2.5, 5.0, 7.5]);
/// assert_eq!(anchors(2, 2.0), vec![0.0]);
/// assert!(anchors(3, 4.0).is_empty());
/// ```
#[must_use]
pub fn anchors(extent: usize, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let extent = extent as f64;
    let limit = extent + extent * EDGE_TOLERANCE;
    (0u32..)
        .map(|k| f64::from(k) * step)
        .take_while(|&a| a + step <= limit)
        .collect()
}

/// Integer bounds `[floor(a), floor(a + step))` of the cell at anchor `a`,
/// the far bound limited to `extent`.
#[inline]
fn cell_bounds(anchor: f64, step: f64, extent: usize) -> (usize, usize) {
    let start = anchor.floor() as usize;
    let end = ((anchor + step).floor() as usize).min(extent);
    (start, end)
}

/// Convert a grayscale grid into characters.
///
/// Each cell averages the pixels under it and maps the mean through the
/// table with the profile's polarity. Rows are computed in parallel; the
/// output keeps row order. The first error aborts the whole render.
///
/// # Errors
/// Any `CoreError` from step planning, averaging or mapping, unmodified.
///
/// # Example
/// ```
/// use lm_ascii::pipeline::render;
/// use lm_core::charset::LuminosityTable;
/// use lm_core::frame::PixelGrid;
/// use lm_core::profile::DisplayProfile;
///
/// let grid = PixelGrid::filled(2, 2, 255).unwrap();
/// let profile = DisplayProfile::new(1, 1, 1.0, 1.0, false).unwrap();
/// let table = LuminosityTable::from_ramp(" @");
/// assert_eq!(render(&grid, &profile, &table).unwrap().to_string(), "@\n");
/// ```
pub fn render(
    grid: &PixelGrid,
    profile: &DisplayProfile,
    table: &LuminosityTable,
) -> Result<AsciiGrid, CoreError> {
    let planned = step::compute_step(grid.height(), grid.width(), profile)?;
    let step = planned.at_least_one_pixel();
    if step != planned {
        log::debug!(
            "Pas sous le pixel ({:.4}×{:.4}), agrandi à {:.4}×{:.4}",
            planned.y_step,
            planned.x_step,
            step.y_step,
            step.x_step
        );
    }
    render_with_step(grid, step, profile.inverted(), table)
}

/// Render with an explicit step, bypassing the planner.
///
/// Steps are expected to be at least one pixel; smaller ones may produce
/// zero-area cells and fail with `DegenerateRegion`.
///
/// # Errors
/// Any `CoreError` from averaging or mapping.
pub fn render_with_step(
    grid: &PixelGrid,
    step: StepSize,
    inverted: bool,
    table: &LuminosityTable,
) -> Result<AsciiGrid, CoreError> {
    let ys = anchors(grid.height(), step.y_step);
    let xs = anchors(grid.width(), step.x_step);
    log::info!("Axe contraignant : {:?}, grille {}×{}", step.binding, xs.len(), ys.len());
    log::debug!("Pas {:.4}×{:.4}", step.y_step, step.x_step);

    let rows = ys
        .par_iter()
        .map(|&y| {
            let (start_y, end_y) = cell_bounds(y, step.y_step, grid.height());
            xs.iter()
                .map(|&x| {
                    let (start_x, end_x) = cell_bounds(x, step.x_step, grid.width());
                    let lum = region::average(grid, start_y, end_y, start_x, end_x)?;
                    mapper::map(lum, table, inverted)
                })
                .collect::<Result<Vec<char>, CoreError>>()
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(AsciiGrid::from_rows(rows))
}
