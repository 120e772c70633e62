use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lumascii-calibrate: mesure la densité des glyphes d'un affichage.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Affiche la planche de glyphes à capturer dans l'affichage cible.
    Sheet {
        /// Glyphes par ligne.
        #[arg(long, default_value_t = 8)]
        columns: usize,
    },

    /// Analyse une capture de la planche et écrit la table de luminosité.
    Analyze {
        /// Capture d'écran de la planche (PNG, JPEG, BMP, GIF).
        #[arg(long)]
        image: PathBuf,

        /// Fichier JSON produit.
        #[arg(short, long, default_value = "luminosity_to_char.json")]
        output: PathBuf,

        /// Largeur d'une cellule en pixels.
        #[arg(long, default_value_t = 10)]
        cell_width: usize,

        /// Hauteur d'une cellule en pixels.
        #[arg(long, default_value_t = 22)]
        cell_height: usize,

        /// Glyphes par ligne sur la planche.
        #[arg(long, default_value_t = 8)]
        columns: usize,

        /// Glyphes à écarter de la table.
        #[arg(long, default_value = "@g")]
        exclude: String,

        /// Texte sombre sur fond clair dans la capture.
        #[arg(long, default_value_t = false)]
        dark_ink: bool,
    },
}
