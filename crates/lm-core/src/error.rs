use thiserror::Error;

/// Errors originating from the core module.
///
/// All of them are fatal: the conversion stops and no output is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A display profile numeric field is not strictly positive.
    #[error("Profil d'affichage invalide : {field} = {value}")]
    InvalidProfile {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Pixel grid with an empty axis.
    #[error("Grille de pixels invalide : {height}×{width}")]
    InvalidGrid {
        /// Height in pixels.
        height: usize,
        /// Width in pixels.
        width: usize,
    },

    /// Sampling rectangle with zero height or width.
    #[error("Région dégénérée : y [{start_y}, {end_y}) × x [{start_x}, {end_x})")]
    DegenerateRegion {
        /// First row (inclusive).
        start_y: usize,
        /// Last row (exclusive).
        end_y: usize,
        /// First column (inclusive).
        start_x: usize,
        /// Last column (exclusive).
        end_x: usize,
    },

    /// Luminosity key outside [0, 255] or absent from the lookup table.
    #[error("Luminosité sans entrée dans la table : {luminosity}")]
    LookupMiss {
        /// Luminosity that could not be mapped.
        luminosity: f64,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Unsupported file or data format.
    #[error("Format non supporté : {format}")]
    UnsupportedFormat {
        /// The format string that is unsupported.
        format: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
