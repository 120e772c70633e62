use std::path::Path;

use anyhow::{Result, bail};
use lm_ascii::region;
use lm_core::charset::LuminosityTable;
use lm_core::error::CoreError;
use lm_core::frame::PixelGrid;

use crate::sheet::SheetLayout;

/// Glyphes trop denses par défaut : ils dominent les images.
pub const DEFAULT_EXCLUDED: &[char] = &['@', 'g'];

/// Seuil de binarisation.
const INK_THRESHOLD: u8 = 128;

/// Binarise a screenshot: ink pixels become 255, background 0.
///
/// With `dark_ink`, pixels below the threshold are ink (dark text on a light
/// background); otherwise bright pixels are.
///
/// # Errors
/// Never fails for a valid grid; the `Result` carries grid construction.
pub fn ink_mask(screenshot: &PixelGrid, dark_ink: bool) -> Result<PixelGrid, CoreError> {
    PixelGrid::from_fn(screenshot.height(), screenshot.width(), |y, x| {
        let bright = screenshot.get(y, x) >= INK_THRESHOLD;
        if bright != dark_ink { 255 } else { 0 }
    })
}

/// Fraction of ink in every glyph cell, space first with 0.
///
/// # Errors
/// `InvalidDimensions` if the mask is smaller than the layout.
///
/// # Example
/// ```
/// use lm_calibrate::analyze::glyph_coverage;
/// use lm_calibrate::sheet::SheetLayout;
/// use lm_core::frame::PixelGrid;
///
/// let layout = SheetLayout { cell_width: 2, cell_height: 1, columns: 1, first_code: 33, last_code: 34 };
/// let mask = PixelGrid::new(2, 2, vec![255, 0, 255, 255]).unwrap();
/// let coverage = glyph_coverage(&mask, &layout).unwrap();
/// assert_eq!(coverage, vec![(' ', 0.0), ('!', 0.5), ('"', 1.0)]);
/// ```
pub fn glyph_coverage(mask: &PixelGrid, layout: &SheetLayout) -> Result<Vec<(char, f64)>, CoreError> {
    let (need_h, need_w) = layout.pixel_size();
    if layout.cell_width == 0
        || layout.cell_height == 0
        || mask.height() < need_h
        || mask.width() < need_w
    {
        return Err(CoreError::InvalidDimensions {
            width: u32::try_from(mask.width()).unwrap_or(u32::MAX),
            height: u32::try_from(mask.height()).unwrap_or(u32::MAX),
        });
    }

    let mut coverage = vec![(' ', 0.0)];
    for (index, ch) in layout.glyphs().enumerate() {
        let (y, x) = layout.cell_origin(index);
        let ink = region::average(mask, y, y + layout.cell_height, x, x + layout.cell_width)?;
        coverage.push((ch, ink / 255.0));
    }
    Ok(coverage)
}

/// Build the table: for every luminosity, the glyph whose scaled coverage
/// is closest.
///
/// Coverages are divided by the densest remaining glyph so they span
/// [0, 1], then compared against `luminosity / 256`. Ties keep the glyph
/// listed first.
///
/// # Errors
/// Returns an error if no glyph with ink remains after exclusion.
pub fn build_table(coverage: &[(char, f64)], excluded: &[char]) -> Result<LuminosityTable> {
    let kept: Vec<(char, f64)> = coverage
        .iter()
        .copied()
        .filter(|(ch, _)| !excluded.contains(ch))
        .collect();
    let densest = kept.iter().map(|&(_, c)| c).fold(0.0, f64::max);
    if densest <= 0.0 {
        bail!("Aucun glyphe encré sur la planche ({} glyphes retenus)", kept.len());
    }
    log::debug!("Glyphe le plus dense : couverture {densest:.3}");

    let mut lut = [' '; 256];
    for (lum, slot) in lut.iter_mut().enumerate() {
        let lum = lum as f64;
        let mut best_distance = f64::INFINITY;
        for &(ch, c) in &kept {
            let distance = (lum - c / densest * 256.0).abs();
            if distance < best_distance {
                best_distance = distance;
                *slot = ch;
            }
        }
    }
    Ok(LuminosityTable::new(lut))
}

/// Analyse d'une capture de planche, de l'image à la table.
///
/// # Errors
/// Returns an error if the screenshot cannot be loaded, is too small, or
/// has no ink.
pub fn analyze_sheet(
    screenshot: &Path,
    layout: &SheetLayout,
    dark_ink: bool,
    excluded: &[char],
) -> Result<LuminosityTable> {
    let gray = lm_source::image::load_grayscale(screenshot)?;
    let mask = ink_mask(&gray, dark_ink)?;
    let coverage = glyph_coverage(&mask, layout)?;
    log::info!("{} glyphes mesurés", coverage.len() - 1);
    build_table(&coverage, excluded)
}
