use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lm_core::error::CoreError;

/// Extensions image reconnues par défaut.
pub const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg"];

/// Fichiers de `dir` dont le nom commence par `prefix` et dont l'extension
/// figure dans `extensions` (sans tenir compte de la casse), triés.
///
/// Non-recursive; directories are skipped.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn candidates(dir: &Path, prefix: &str, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_lowercase();
        let accepted = extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext));
        if accepted && name.starts_with(prefix) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Trouve l'image d'entrée par préfixe et extension.
///
/// Picks the first match in sorted order.
///
/// # Errors
/// `FileNotFound` if nothing matches, or an I/O error if `dir` is unreadable.
///
/// # Example
/// ```no_run
/// use lm_source::locate::find_input;
/// use std::path::Path;
/// let path = find_input(Path::new("samples"), "girl", &["png".into()]).unwrap();
/// ```
pub fn find_input(dir: &Path, prefix: &str, extensions: &[String]) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(CoreError::FileNotFound {
            path: dir.display().to_string(),
        }
        .into());
    }
    let mut files = candidates(dir, prefix, extensions)?;
    if files.len() > 1 {
        log::warn!(
            "{} fichiers correspondent à '{prefix}' dans {}, utilisation de {}",
            files.len(),
            dir.display(),
            files[0].display()
        );
    }
    if files.is_empty() {
        return Err(CoreError::FileNotFound {
            path: format!("{}/{prefix}*.{{{}}}", dir.display(), extensions.join(",")),
        }
        .into());
    }
    let path = files.swap_remove(0);
    log::info!("Image trouvée : {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        IMAGE_EXTS.iter().map(|e| (*e).to_string()).collect()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn matches_prefix_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "girl.png");
        touch(dir.path(), "girl.txt");
        touch(dir.path(), "boy.png");
        let found = find_input(dir.path(), "girl", &exts()).unwrap();
        assert_eq!(found, dir.path().join("girl.png"));
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Portrait.JPG");
        let found = find_input(dir.path(), "Portrait", &exts()).unwrap();
        assert_eq!(found, dir.path().join("Portrait.JPG"));
    }

    #[test]
    fn first_sorted_match_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "scan_b.png");
        touch(dir.path(), "scan_a.jpeg");
        let found = find_input(dir.path(), "scan", &exts()).unwrap();
        assert_eq!(found, dir.path().join("scan_a.jpeg"));
    }

    #[test]
    fn dotted_extensions_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "cat.bmp");
        let found = find_input(dir.path(), "", &[".bmp".to_string()]).unwrap();
        assert_eq!(found, dir.path().join("cat.bmp"));
    }

    #[test]
    fn directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("girl.png")).unwrap();
        let err = find_input(dir.path(), "girl", &exts()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn missing_directory_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_input(&dir.path().join("nope"), "", &exts()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }
}
