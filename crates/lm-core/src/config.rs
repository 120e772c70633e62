use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::profile::{DisplayProfile, ProfilePreset};

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use lm_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.profile().unwrap().max_chars_wide(), 150);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvertConfig {
    // === Affichage ===
    /// Preset de surface cible.
    pub preset: ProfilePreset,
    /// Polarity override. None = preset polarity.
    pub inverted: Option<bool>,
    /// Override du nombre de colonnes.
    pub max_chars_wide: Option<u32>,
    /// Override du nombre de lignes.
    pub max_chars_high: Option<u32>,
    /// Override de la largeur de cellule.
    pub char_width: Option<f64>,
    /// Override de la hauteur de cellule.
    pub char_height: Option<f64>,

    // === Table ===
    /// Fichier JSON luminosité → code caractère. None = table issue de `charset`.
    pub table: Option<PathBuf>,
    /// Ramp used when no table file is configured (lightest → densest).
    pub charset: String,

    // === Entrée ===
    /// Dossier où chercher l'image.
    pub input_dir: PathBuf,
    /// Préfixe du nom de fichier.
    pub input_prefix: String,
    /// Extensions acceptées, sans le point.
    pub extensions: Vec<String>,

    // === Sortie ===
    /// Fichier texte de sortie.
    pub output: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            preset: ProfilePreset::Terminal,
            inverted: None,
            max_chars_wide: None,
            max_chars_high: None,
            char_width: None,
            char_height: None,
            table: None,
            charset: crate::charset::CHARSET_STANDARD.to_string(),
            input_dir: PathBuf::from("samples"),
            input_prefix: String::new(),
            extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            output: PathBuf::from("result.txt"),
        }
    }
}

impl ConvertConfig {
    /// Resolve the effective display profile: preset values, then overrides.
    ///
    /// # Errors
    /// `InvalidProfile` if an override is not strictly positive.
    ///
    /// # Example
    /// ```
    /// use lm_core::config::ConvertConfig;
    /// let config = ConvertConfig { max_chars_high: Some(0), ..Default::default() };
    /// assert!(config.profile().is_err());
    /// ```
    pub fn profile(&self) -> Result<DisplayProfile, CoreError> {
        let base = self.preset.profile();
        DisplayProfile::new(
            self.max_chars_wide.unwrap_or(base.max_chars_wide()),
            self.max_chars_high.unwrap_or(base.max_chars_high()),
            self.char_width.unwrap_or(base.char_width()),
            self.char_height.unwrap_or(base.char_height()),
            self.inverted.unwrap_or(base.inverted()),
        )
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    display: Option<DisplaySection>,
    table: Option<TableSection>,
    input: Option<InputSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    preset: Option<ProfilePreset>,
    inverted: Option<bool>,
    max_chars_wide: Option<u32>,
    max_chars_high: Option<u32>,
    char_width: Option<f64>,
    char_height: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TableSection {
    path: Option<PathBuf>,
    charset: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSection {
    dir: Option<PathBuf>,
    prefix: Option<String>,
    extensions: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    path: Option<PathBuf>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed or the resulting profile is invalid.
///
/// # Example
/// ```
/// use lm_core::config::parse_config;
/// let config = parse_config("[display]\npreset = \"markdown\"\n").unwrap();
/// assert!(config.profile().unwrap().inverted());
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = ConvertConfig::default();

    if let Some(d) = file.display {
        if let Some(v) = d.preset {
            config.preset = v;
        }
        config.inverted = d.inverted.or(config.inverted);
        config.max_chars_wide = d.max_chars_wide.or(config.max_chars_wide);
        config.max_chars_high = d.max_chars_high.or(config.max_chars_high);
        config.char_width = d.char_width.or(config.char_width);
        config.char_height = d.char_height.or(config.char_height);
    }
    if let Some(t) = file.table {
        config.table = t.path.or(config.table);
        if let Some(v) = t.charset {
            config.charset = v;
        }
    }
    if let Some(i) = file.input {
        if let Some(v) = i.dir {
            config.input_dir = v;
        }
        if let Some(v) = i.prefix {
            config.input_prefix = v;
        }
        if let Some(v) = i.extensions {
            config.extensions = v;
        }
    }
    if let Some(o) = file.output
        && let Some(v) = o.path
    {
        config.output = v;
    }

    config.profile()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use lm_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ConvertConfig::default());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = parse_config(
            r#"
            [display]
            preset = "wide-editor"
            inverted = false
            max_chars_high = 20

            [table]
            path = "luminosity_to_char.json"

            [input]
            dir = "images"
            prefix = "girl"
            extensions = ["png"]

            [output]
            path = "out/girl.txt"
            "#,
        )
        .unwrap();

        let profile = config.profile().unwrap();
        assert_eq!(profile.max_chars_wide(), 300);
        assert_eq!(profile.max_chars_high(), 20);
        assert!(!profile.inverted());
        assert_eq!(config.table, Some(PathBuf::from("luminosity_to_char.json")));
        assert_eq!(config.input_prefix, "girl");
        assert_eq!(config.extensions, vec!["png".to_string()]);
        assert_eq!(config.output, PathBuf::from("out/girl.txt"));
    }

    #[test]
    fn non_positive_override_is_invalid_profile() {
        let err = parse_config("[display]\nchar_width = -1.0\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidProfile {
                field: "char_width",
                ..
            })
        ));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(parse_config("[display]\npreset = \"vt100\"\n").is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(parse_config("[display]\nmax_width = 10\n").is_err());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../config/default.toml");
        assert_eq!(parse_config(shipped).unwrap(), ConvertConfig::default());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumascii.toml");
        std::fs::write(&path, "[output]\npath = \"art.txt\"\n").unwrap();
        assert_eq!(load_config(&path).unwrap().output, PathBuf::from("art.txt"));
    }
}
