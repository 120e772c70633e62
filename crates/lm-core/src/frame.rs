use std::fmt;

use crate::error::CoreError;

/// Luminance perceptuelle BT.709, coefficients entiers.
///
/// # Example
/// ```
/// use lm_core::frame::luma_bt709;
/// assert_eq!(luma_bt709(255, 255, 255), 255);
/// assert_eq!(luma_bt709(0, 0, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn luma_bt709(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
}

/// Grille de luminosités 8 bits, row-major. Lecture seule pour le pipeline.
///
/// # Example
/// ```
/// use lm_core::frame::PixelGrid;
/// let grid = PixelGrid::new(2, 3, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(grid.get(1, 2), 5);
/// assert!(PixelGrid::new(0, 3, vec![]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    height: usize,
    width: usize,
}

impl PixelGrid {
    /// Wrap `height × width` luminosity samples.
    ///
    /// # Errors
    /// `InvalidGrid` if an axis is empty, `InvalidDimensions` if `data`
    /// does not hold exactly `height × width` samples.
    pub fn new(height: usize, width: usize, data: Vec<u8>) -> Result<Self, CoreError> {
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidGrid { height, width });
        }
        if data.len() != height * width {
            return Err(CoreError::InvalidDimensions {
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            });
        }
        Ok(Self {
            data,
            height,
            width,
        })
    }

    /// Uniform grid.
    ///
    /// # Errors
    /// `InvalidGrid` if an axis is empty.
    pub fn filled(height: usize, width: usize, value: u8) -> Result<Self, CoreError> {
        Self::new(height, width, vec![value; height * width])
    }

    /// Grid built from a per-pixel function `f(y, x)`.
    ///
    /// # Errors
    /// `InvalidGrid` if an axis is empty.
    ///
    /// # Example
    /// ```
    /// use lm_core::frame::PixelGrid;
    /// let ramp = PixelGrid::from_fn(1, 4, |_, x| (x * 10) as u8).unwrap();
    /// assert_eq!(ramp.row(0), &[0, 10, 20, 30]);
    /// ```
    pub fn from_fn(
        height: usize,
        width: usize,
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> Result<Self, CoreError> {
        let mut data = Vec::with_capacity(height * width);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self::new(height, width, data)
    }

    /// Convert RGBA pixels (4 bytes per pixel, row-major) to luminosity.
    /// Alpha is ignored.
    ///
    /// # Errors
    /// `InvalidGrid` if an axis is empty, `InvalidDimensions` if `rgba`
    /// has the wrong length.
    pub fn from_rgba(height: usize, width: usize, rgba: &[u8]) -> Result<Self, CoreError> {
        if rgba.len() != height * width * 4 {
            return Err(CoreError::InvalidDimensions {
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            });
        }
        let data = rgba
            .chunks_exact(4)
            .map(|px| luma_bt709(px[0], px[1], px[2]))
            .collect();
        Self::new(height, width, data)
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sample at row `y`, column `x`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, y: usize, x: usize) -> u8 {
        debug_assert!(y < self.height && x < self.width, "pixel out of bounds");
        self.data[y * self.width + x]
    }

    /// Row `y` as a slice.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Grille de sortie ASCII, row-major.
///
/// Rendered as text with one `\n` after every row.
///
/// # Example
/// ```
/// use lm_core::frame::AsciiGrid;
/// let grid = AsciiGrid::from_rows(vec![vec!['#', '.'], vec!['.', '#']]);
/// assert_eq!(grid.to_string(), "#.\n.#\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of characters, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: usize,
    /// Height in characters.
    pub height: usize,
}

impl AsciiGrid {
    /// Assemble a grid from rows of equal length.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == width), "ragged rows");
        Self {
            cells: rows.into_iter().flatten().collect(),
            width,
            height,
        }
    }

    /// Character at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &ch in row {
                fmt::Write::write_char(f, ch)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
