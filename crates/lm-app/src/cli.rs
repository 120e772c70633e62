use std::path::PathBuf;

use clap::Parser;

/// lumascii: convertit une image en grille ASCII ajustée à un affichage.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image d'entrée (PNG, JPEG, BMP, GIF). Sinon recherche par --dir/--prefix.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Dossier où chercher l'image par préfixe.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Préfixe du nom de l'image à chercher dans --dir.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Preset d'affichage : terminal, wide-editor, markdown.
    #[arg(long)]
    pub profile: Option<String>,

    /// Inverser la luminosité (fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Table JSON luminosité → caractère.
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Fichier texte de sortie.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ne pas afficher le résultat sur stdout.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that the image is given either by path or by prefix, not both.
    ///
    /// # Errors
    /// Returns an error if `--image` is combined with `--dir` or `--prefix`.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        if self.image.is_some() && (self.dir.is_some() || self.prefix.is_some()) {
            anyhow::bail!(
                "Une seule source à la fois. Spécifiez --image, OU --dir/--prefix."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_and_prefix_conflict() {
        let cli = Cli::parse_from(["lumascii", "--image", "a.png", "--prefix", "a"]);
        assert!(cli.validate_source().is_err());
    }

    #[test]
    fn defaults_parse() {
        let cli = Cli::parse_from(["lumascii"]);
        assert!(cli.validate_source().is_ok());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert!(!cli.invert);
    }
}
