use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Surface de sortie cible : capacité de la grille et proportions d'une cellule.
///
/// Immutable once built; every numeric field is strictly positive.
///
/// # Example
/// ```
/// use lm_core::profile::DisplayProfile;
/// let p = DisplayProfile::new(150, 40, 10.0, 22.0, false).unwrap();
/// assert_eq!(p.max_chars_wide(), 150);
/// assert!(DisplayProfile::new(0, 40, 10.0, 22.0, false).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayProfile {
    max_chars_wide: u32,
    max_chars_high: u32,
    char_width: f64,
    char_height: f64,
    inverted: bool,
}

impl DisplayProfile {
    /// Build a profile, rejecting any non-positive numeric field.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidProfile` naming the first offending field.
    pub fn new(
        max_chars_wide: u32,
        max_chars_high: u32,
        char_width: f64,
        char_height: f64,
        inverted: bool,
    ) -> Result<Self, CoreError> {
        let profile = Self {
            max_chars_wide,
            max_chars_high,
            char_width,
            char_height,
            inverted,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Re-check the positivity invariant.
    ///
    /// NaN and infinite cell sizes are rejected as well.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidProfile` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_chars_wide == 0 {
            return Err(CoreError::InvalidProfile {
                field: "max_chars_wide",
                value: 0.0,
            });
        }
        if self.max_chars_high == 0 {
            return Err(CoreError::InvalidProfile {
                field: "max_chars_high",
                value: 0.0,
            });
        }
        for (field, value) in [
            ("char_width", self.char_width),
            ("char_height", self.char_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::InvalidProfile { field, value });
            }
        }
        Ok(())
    }

    /// Nombre maximal de caractères par ligne.
    #[must_use]
    pub fn max_chars_wide(&self) -> u32 {
        self.max_chars_wide
    }

    /// Nombre maximal de lignes.
    #[must_use]
    pub fn max_chars_high(&self) -> u32 {
        self.max_chars_high
    }

    /// Largeur d'une cellule caractère (unité arbitraire, seul le ratio compte).
    #[must_use]
    pub fn char_width(&self) -> f64 {
        self.char_width
    }

    /// Hauteur d'une cellule caractère.
    #[must_use]
    pub fn char_height(&self) -> f64 {
        self.char_height
    }

    /// True for dark-on-light surfaces.
    #[must_use]
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Copy of this profile with the polarity replaced.
    #[must_use]
    pub fn with_inverted(self, inverted: bool) -> Self {
        Self { inverted, ..self }
    }
}

/// Named display presets.
///
/// # Example
/// ```
/// use lm_core::profile::ProfilePreset;
/// let preset: ProfilePreset = "wide-editor".parse().unwrap();
/// assert_eq!(preset, ProfilePreset::WideEditor);
/// assert!(preset.profile().inverted());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfilePreset {
    /// Terminal sombre, police 10×22.
    #[default]
    Terminal,
    /// Large editor pane on a light theme.
    WideEditor,
    /// Rendered markdown page, light background.
    Markdown,
}

impl ProfilePreset {
    /// All presets, in declaration order.
    pub const ALL: [ProfilePreset; 3] = [Self::Terminal, Self::WideEditor, Self::Markdown];

    /// The literal profile behind this preset.
    #[must_use]
    pub fn profile(self) -> DisplayProfile {
        let (max_chars_wide, max_chars_high, char_width, char_height, inverted) = match self {
            Self::Terminal => (150, 40, 10.0, 22.0, false),
            Self::WideEditor => (300, 80, 7.0, 16.0, true),
            Self::Markdown => (100, 50, 8.0, 18.0, true),
        };
        DisplayProfile {
            max_chars_wide,
            max_chars_high,
            char_width,
            char_height,
            inverted,
        }
    }

    /// Kebab-case name, as used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::WideEditor => "wide-editor",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ProfilePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfilePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "profil inconnu '{s}' (terminal, wide-editor, markdown)"
                ))
            })
    }
}
