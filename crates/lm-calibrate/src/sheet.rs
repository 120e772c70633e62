/// Disposition de la planche de glyphes à capturer.
///
/// Glyphs `first_code..=last_code` are laid out left to right, `columns`
/// per row, each in a `cell_width × cell_height` pixel cell once rendered.
///
/// # Example
/// ```
/// use lm_calibrate::sheet::SheetLayout;
/// let layout = SheetLayout::default();
/// assert_eq!(layout.glyphs().count(), 94);
/// assert_eq!(layout.rows(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    /// Cell width in pixels.
    pub cell_width: usize,
    /// Cell height in pixels.
    pub cell_height: usize,
    /// Glyphs per row.
    pub columns: usize,
    /// First code point on the sheet.
    pub first_code: u32,
    /// Last code point on the sheet (inclusive).
    pub last_code: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            cell_width: 10,
            cell_height: 22,
            columns: 8,
            first_code: 33,
            last_code: 126,
        }
    }
}

impl SheetLayout {
    /// Glyphs on the sheet, in reading order.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + use<> {
        (self.first_code..=self.last_code).filter_map(char::from_u32)
    }

    /// Number of text rows on the sheet.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.glyphs().count().div_ceil(self.columns.max(1))
    }

    /// Pixel origin `(y, x)` of the cell holding the `index`-th glyph.
    #[must_use]
    pub fn cell_origin(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (
            (index / columns) * self.cell_height,
            (index % columns) * self.cell_width,
        )
    }

    /// Minimum screenshot size `(height, width)` for this layout.
    #[must_use]
    pub fn pixel_size(&self) -> (usize, usize) {
        let count = self.glyphs().count();
        (
            self.rows() * self.cell_height,
            count.min(self.columns.max(1)) * self.cell_width,
        )
    }
}

/// Texte de la planche : les glyphes, `columns` par ligne.
///
/// # Example
/// ```
/// use lm_calibrate::sheet::{SheetLayout, render_sheet};
/// let layout = SheetLayout { first_code: 'a' as u32, last_code: 'e' as u32, columns: 2, ..Default::default() };
/// assert_eq!(render_sheet(&layout), "ab\ncd\ne\n");
/// ```
#[must_use]
pub fn render_sheet(layout: &SheetLayout) -> String {
    let glyphs: Vec<char> = layout.glyphs().collect();
    let mut out = String::with_capacity(glyphs.len() + layout.rows());
    for row in glyphs.chunks(layout.columns.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}
