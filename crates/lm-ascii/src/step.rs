use lm_core::error::CoreError;
use lm_core::profile::DisplayProfile;

/// Axe qui limite la grille de sortie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingAxis {
    /// The column budget is used up first.
    Width,
    /// The row budget is used up first.
    Height,
}

/// Taille d'une cellule échantillonnée, en pixels fractionnaires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSize {
    /// Pixels per output row.
    pub y_step: f64,
    /// Pixels per output column.
    pub x_step: f64,
    /// Budget that determined the steps.
    pub binding: BindingAxis,
}

impl StepSize {
    /// Scale both steps by the same factor so that neither is below one pixel.
    ///
    /// Returns `self` unchanged when both steps already cover a pixel.
    ///
    /// # Example
    /// ```
    /// use lm_ascii::step::{BindingAxis, StepSize};
    /// let s = StepSize { y_step: 1.1, x_step: 0.5, binding: BindingAxis::Width };
    /// let s = s.at_least_one_pixel();
    /// assert_eq!(s.x_step, 1.0);
    /// assert!((s.y_step - 2.2).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn at_least_one_pixel(self) -> Self {
        let smallest = self.y_step.min(self.x_step);
        if smallest >= 1.0 {
            return self;
        }
        let factor = smallest.recip();
        Self {
            y_step: if self.y_step == smallest { 1.0 } else { self.y_step * factor },
            x_step: if self.x_step == smallest { 1.0 } else { self.x_step * factor },
            binding: self.binding,
        }
    }
}

/// Compute how many image pixels each output character covers.
///
/// Fits the width budget first; when that would reach or exceed the height
/// budget, fits the height instead. The other axis follows from the
/// character cell aspect ratio.
///
/// # Errors
/// `InvalidProfile` if the profile breaks its positivity invariant,
/// `InvalidGrid` if `height` or `width` is zero.
///
/// # Example
/// ```
/// use lm_ascii::step::{compute_step, BindingAxis};
/// use lm_core::profile::DisplayProfile;
///
/// let profile = DisplayProfile::new(150, 40, 10.0, 22.0, false).unwrap();
/// let step = compute_step(2000, 300, &profile).unwrap();
/// assert_eq!(step.binding, BindingAxis::Height);
/// assert_eq!(step.y_step, 50.0);
/// ```
pub fn compute_step(
    height: usize,
    width: usize,
    profile: &DisplayProfile,
) -> Result<StepSize, CoreError> {
    profile.validate()?;
    if height == 0 || width == 0 {
        return Err(CoreError::InvalidGrid { height, width });
    }

    let (h, w) = (height as f64, width as f64);
    let max_wide = f64::from(profile.max_chars_wide());
    let max_high = f64::from(profile.max_chars_high());

    let x_step = w / max_wide;
    let y_step = x_step * (profile.char_height() / profile.char_width());
    if h / y_step < max_high {
        return Ok(StepSize {
            y_step,
            x_step,
            binding: BindingAxis::Width,
        });
    }

    // `>=`: an exact fit on the height budget still binds on height.
    let y_step = h / max_high;
    let x_step = y_step * (profile.char_width() / profile.char_height());
    Ok(StepSize {
        y_step,
        x_step,
        binding: BindingAxis::Height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(wide: u32, high: u32, cw: f64, ch: f64) -> DisplayProfile {
        DisplayProfile::new(wide, high, cw, ch, false).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn wide_image_binds_on_width() {
        let step = compute_step(100, 1500, &profile(150, 40, 10.0, 22.0)).unwrap();
        assert_eq!(step.binding, BindingAxis::Width);
        assert!(close(step.x_step, 10.0));
        assert!(close(step.y_step, 22.0));
    }

    #[test]
    fn tall_image_binds_on_height() {
        let step = compute_step(2000, 300, &profile(150, 40, 10.0, 22.0)).unwrap();
        assert_eq!(step.binding, BindingAxis::Height);
        assert!(close(step.y_step, 50.0));
        assert!(close(step.x_step, 50.0 * 10.0 / 22.0));
    }

    #[test]
    fn exact_height_fit_prefers_height_branch() {
        // Width-fit gives y_step = 10, and 50 / 10 == max_chars_high exactly.
        let step = compute_step(50, 100, &profile(10, 5, 1.0, 1.0)).unwrap();
        assert_eq!(step.binding, BindingAxis::Height);
        assert_eq!(step.y_step, 10.0);
        assert_eq!(step.x_step, 10.0);

        let below = compute_step(49, 100, &profile(10, 5, 1.0, 1.0)).unwrap();
        assert_eq!(below.binding, BindingAxis::Width);
    }

    #[test]
    fn steps_are_positive_and_scale_linearly() {
        let p = profile(150, 40, 10.0, 22.0);
        for (h, w) in [(1, 1), (3, 7), (480, 640), (1080, 1920), (4000, 30), (17, 9001)] {
            let base = compute_step(h, w, &p).unwrap();
            assert!(base.y_step > 0.0 && base.x_step > 0.0);
            for factor in [2, 3, 10] {
                let scaled = compute_step(h * factor, w * factor, &p).unwrap();
                let f = factor as f64;
                assert_eq!(scaled.binding, base.binding, "{h}×{w} ×{factor}");
                assert!(close(scaled.y_step, base.y_step * f), "{h}×{w} ×{factor}");
                assert!(close(scaled.x_step, base.x_step * f), "{h}×{w} ×{factor}");
            }
        }
    }

    #[test]
    fn empty_axis_is_rejected() {
        let p = profile(150, 40, 10.0, 22.0);
        assert_eq!(
            compute_step(0, 10, &p),
            Err(CoreError::InvalidGrid {
                height: 0,
                width: 10
            })
        );
        assert!(compute_step(10, 0, &p).is_err());
    }

    #[test]
    fn one_pixel_floor_keeps_aspect_ratio() {
        let step = compute_step(20, 30, &profile(150, 40, 10.0, 22.0)).unwrap();
        assert!(step.x_step < 1.0);
        let floored = step.at_least_one_pixel();
        assert_eq!(floored.x_step, 1.0);
        assert!(close(floored.y_step / floored.x_step, step.y_step / step.x_step));
    }
}
