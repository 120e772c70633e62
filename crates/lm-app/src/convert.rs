use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lm_core::charset::LuminosityTable;
use lm_core::config::ConvertConfig;
use lm_core::frame::{AsciiGrid, PixelGrid};

/// Resolve the input image: explicit path, else search by prefix.
///
/// # Errors
/// Returns an error if no file matches.
pub fn resolve_input(config: &ConvertConfig, explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => lm_source::locate::find_input(
            &config.input_dir,
            &config.input_prefix,
            &config.extensions,
        ),
    }
}

/// Table file if configured, else the built-in ramp.
///
/// # Errors
/// Returns an error if the table file is unreadable or incomplete.
pub fn load_table(config: &ConvertConfig) -> Result<LuminosityTable> {
    match &config.table {
        Some(path) => LuminosityTable::load(path),
        None => {
            log::info!("Pas de table configurée, ramp de {} caractères", config.charset.chars().count());
            Ok(LuminosityTable::from_ramp(&config.charset))
        }
    }
}

/// Render a loaded grid with the configured profile and table.
///
/// # Errors
/// Returns an error if the profile is invalid, the table cannot be loaded,
/// or rendering fails.
pub fn convert(grid: &PixelGrid, config: &ConvertConfig) -> Result<AsciiGrid> {
    let profile = config.profile()?;
    let table = load_table(config)?;
    log::info!(
        "Profil {} : {}×{} caractères, cellule {}×{}, inversé={}",
        config.preset,
        profile.max_chars_wide(),
        profile.max_chars_high(),
        profile.char_width(),
        profile.char_height(),
        profile.inverted()
    );
    Ok(lm_ascii::render(grid, &profile, &table)?)
}

/// Full run: locate, load, render, then persist. Nothing is written on failure.
///
/// # Errors
/// Returns the first error from any stage.
pub fn run(config: &ConvertConfig, image: Option<&Path>) -> Result<String> {
    let input = resolve_input(config, image)?;
    let grid = lm_source::image::load_grayscale(&input)?;
    let text = convert(&grid, config)?.to_string();
    write_output(&config.output, &text)?;
    Ok(text)
}

/// Écrit le texte produit, en créant le dossier parent au besoin.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Résultat écrit dans {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use image::{GrayImage, Luma};
    use lm_core::error::CoreError;

    /// '#' at 128, '.' elsewhere, optionally without one key.
    fn write_table(dir: &Path, missing: Option<u32>) -> PathBuf {
        let codes: HashMap<String, u32> = (0..=255u32)
            .filter(|&i| Some(i) != missing)
            .map(|i| (i.to_string(), if i == 128 { '#' as u32 } else { '.' as u32 }))
            .collect();
        let path = dir.join("luminosity_to_char.json");
        std::fs::write(&path, serde_json::to_string(&codes).unwrap()).unwrap();
        path
    }

    fn single_cell_config(dir: &Path, table: PathBuf) -> ConvertConfig {
        ConvertConfig {
            max_chars_wide: Some(1),
            max_chars_high: Some(1),
            char_width: Some(1.0),
            char_height: Some(1.0),
            inverted: Some(false),
            table: Some(table),
            input_dir: dir.to_path_buf(),
            input_prefix: "gray".into(),
            output: dir.join("out").join("result.txt"),
            ..ConvertConfig::default()
        }
    }

    #[test]
    fn uniform_gray_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        GrayImage::from_pixel(2, 2, Luma([128]))
            .save(dir.path().join("gray.png"))
            .unwrap();
        let config = single_cell_config(dir.path(), write_table(dir.path(), None));

        let text = run(&config, None).unwrap();
        assert_eq!(text, "#\n");
        assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "#\n");
    }

    #[test]
    fn incomplete_table_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        GrayImage::from_pixel(2, 2, Luma([200]))
            .save(dir.path().join("gray.png"))
            .unwrap();
        let config = single_cell_config(dir.path(), write_table(dir.path(), Some(200)));

        let err = run(&config, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::LookupMiss { luminosity: 200.0 })
        );
        assert!(!config.output.exists());
    }

    #[test]
    fn explicit_image_bypasses_search() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("elsewhere.bmp");
        GrayImage::from_pixel(4, 4, Luma([255])).save(&image).unwrap();
        let mut config = single_cell_config(dir.path(), write_table(dir.path(), None));
        config.table = None;
        config.charset = " @".into();

        assert_eq!(run(&config, Some(&image)).unwrap(), "@\n");
    }

    #[test]
    fn missing_input_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = single_cell_config(dir.path(), write_table(dir.path(), None));
        let err = run(&config, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn invalid_override_is_invalid_profile() {
        let grid = PixelGrid::filled(2, 2, 0).unwrap();
        let config = ConvertConfig {
            char_width: Some(0.0),
            ..ConvertConfig::default()
        };
        let err = convert(&grid, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn terminal_preset_fits_its_budget() {
        let grid = PixelGrid::from_fn(600, 800, |y, x| ((x + y) % 256) as u8).unwrap();
        let art = convert(&grid, &ConvertConfig::default()).unwrap();
        assert!(art.width <= 150 && art.height <= 40);
        assert!(art.width > 0 && art.height > 0);
    }
}
