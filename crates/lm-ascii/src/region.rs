use lm_core::error::CoreError;
use lm_core::frame::PixelGrid;

/// Mean luminosity over the half-open rectangle `[start_y, end_y) × [start_x, end_x)`.
///
/// Samples are summed in `u64` and divided once, so the result is the exact
/// rational mean rounded to the nearest `f64`. Bounds are not clamped: the
/// caller keeps them inside the grid.
///
/// # Errors
/// `DegenerateRegion` if the rectangle has zero height or width.
///
/// # Example
/// ```
/// use lm_ascii::region::average;
/// use lm_core::frame::PixelGrid;
///
/// let grid = PixelGrid::new(2, 2, vec![10, 20, 30, 40]).unwrap();
/// assert_eq!(average(&grid, 0, 2, 0, 2).unwrap(), 25.0);
/// assert!(average(&grid, 1, 1, 0, 2).is_err());
/// ```
pub fn average(
    grid: &PixelGrid,
    start_y: usize,
    end_y: usize,
    start_x: usize,
    end_x: usize,
) -> Result<f64, CoreError> {
    if start_y >= end_y || start_x >= end_x {
        return Err(CoreError::DegenerateRegion {
            start_y,
            end_y,
            start_x,
            end_x,
        });
    }
    debug_assert!(
        end_y <= grid.height() && end_x <= grid.width(),
        "region outside grid"
    );

    let total: u64 = (start_y..end_y)
        .map(|y| {
            grid.row(y)[start_x..end_x]
                .iter()
                .map(|&v| u64::from(v))
                .sum::<u64>()
        })
        .sum();
    let count = ((end_y - start_y) * (end_x - start_x)) as u64;

    Ok(total as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_is_exact() {
        let grid = PixelGrid::new(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(average(&grid, 0, 2, 0, 2).unwrap(), 25.0);
    }

    #[test]
    fn sub_rectangle_ignores_outside_samples() {
        let grid = PixelGrid::from_fn(4, 4, |y, x| if y >= 2 && x >= 2 { 200 } else { 0 }).unwrap();
        assert_eq!(average(&grid, 2, 4, 2, 4).unwrap(), 200.0);
        assert_eq!(average(&grid, 0, 4, 0, 4).unwrap(), 50.0);
        assert_eq!(average(&grid, 1, 3, 1, 3).unwrap(), 50.0);
    }

    #[test]
    fn non_integral_mean_is_not_rounded() {
        let grid = PixelGrid::new(1, 3, vec![0, 0, 1]).unwrap();
        assert_eq!(average(&grid, 0, 1, 0, 3).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn large_bright_region_does_not_overflow() {
        let grid = PixelGrid::filled(2048, 2048, 255).unwrap();
        assert_eq!(average(&grid, 0, 2048, 0, 2048).unwrap(), 255.0);
    }

    #[test]
    fn zero_height_is_degenerate() {
        let grid = PixelGrid::filled(10, 10, 0).unwrap();
        assert_eq!(
            average(&grid, 5, 5, 0, 3),
            Err(CoreError::DegenerateRegion {
                start_y: 5,
                end_y: 5,
                start_x: 0,
                end_x: 3
            })
        );
    }

    #[test]
    fn zero_width_is_degenerate() {
        let grid = PixelGrid::filled(10, 10, 0).unwrap();
        assert!(matches!(
            average(&grid, 0, 3, 7, 7),
            Err(CoreError::DegenerateRegion { .. })
        ));
    }
}
