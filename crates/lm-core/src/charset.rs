use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CoreError;

/// 10 caractères: compact, bon contraste.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// 70 caractères: Paul Bourke extended, bon équilibre.
pub const CHARSET_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Table luminosité [0..255] → caractère.
///
/// Total by construction: one entry per luminosity, O(1) lookup.
///
/// # Example
/// ```
/// use lm_core::charset::LuminosityTable;
/// let table = LuminosityTable::from_ramp(" .:#@");
/// assert_eq!(table.get(0), ' ');
/// assert_eq!(table.get(255), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuminosityTable {
    lut: [char; 256],
}

impl LuminosityTable {
    /// Wrap an already complete table.
    #[must_use]
    pub fn new(lut: [char; 256]) -> Self {
        Self { lut }
    }

    /// Build a table from a charset ordered lightest→densest.
    ///
    /// A charset shorter than 2 characters falls back to `" @"`.
    ///
    /// # Example
    /// ```
    /// use lm_core::charset::LuminosityTable;
    /// let table = LuminosityTable::from_ramp(" .:#@");
    /// assert_eq!(table.get(128), ':');
    /// ```
    #[must_use]
    pub fn from_ramp(charset: &str) -> Self {
        let chars: Vec<char> = charset.chars().collect();
        if chars.len() < 2 {
            return Self::from_ramp(" @");
        }
        let len = chars.len();
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = chars[i * (len - 1) / 255];
        }
        Self { lut }
    }

    /// Build a table from the persisted form: decimal-string keys `"0"`..`"255"`
    /// mapped to character codes.
    ///
    /// # Errors
    /// `LookupMiss` for the first missing key, `UnsupportedFormat` if a code
    /// is not a valid Unicode scalar value.
    pub fn from_codes(codes: &HashMap<String, u32>) -> Result<Self, CoreError> {
        for key in codes.keys() {
            if !key.parse::<u8>().is_ok_and(|k| k.to_string() == *key) {
                log::warn!("Clé de table ignorée : {key:?}");
            }
        }

        let mut lut = [' '; 256];
        for (lum, slot) in lut.iter_mut().enumerate() {
            let code = *codes
                .get(&lum.to_string())
                .ok_or(CoreError::LookupMiss {
                    luminosity: lum as f64,
                })?;
            *slot = char::from_u32(code).ok_or_else(|| CoreError::UnsupportedFormat {
                format: format!("code de caractère {code} (clé \"{lum}\")"),
            })?;
        }
        Ok(Self { lut })
    }

    /// Parse the JSON table format.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the table is incomplete.
    ///
    /// # Example
    /// ```
    /// use lm_core::charset::LuminosityTable;
    /// let json: String = format!(
    ///     "{{{}}}",
    ///     (0..=255).map(|i| format!("\"{i}\": 35")).collect::<Vec<_>>().join(",")
    /// );
    /// let table = LuminosityTable::from_json(&json).unwrap();
    /// assert_eq!(table.get(17), '#');
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let codes: HashMap<String, u32> =
            serde_json::from_str(json).context("Table de luminosité : JSON invalide")?;
        Ok(Self::from_codes(&codes)?)
    }

    /// Load the table file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or is incomplete.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        let table = Self::from_json(&content)
            .with_context(|| format!("Table invalide dans {}", path.display()))?;
        log::info!("Table de luminosité chargée depuis {}", path.display());
        Ok(table)
    }

    /// Serialize to the JSON table format, keys in numeric order.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let codes: BTreeMap<u8, u32> = (0..=255u8)
            .map(|lum| (lum, u32::from(self.get(lum))))
            .collect();
        serde_json::to_string_pretty(&codes).context("Sérialisation de la table")
    }

    /// Write the table file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Impossible d'écrire {}", path.display()))
    }

    /// Character for an integer luminosity.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, luminosity: u8) -> char {
        self.lut[luminosity as usize]
    }
}
