use anyhow::Result;
use clap::Parser;
use lm_core::config::ConvertConfig;
use lm_core::profile::ProfilePreset;

mod cli;
mod convert;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    apply_overrides(&cli, &mut config)?;

    // 5. Convertir et écrire
    let text = convert::run(&config, cli.image.as_deref())?;
    if !cli.quiet {
        print!("{text}");
    }
    Ok(())
}

/// Load `--config` if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    if cli.config.exists() {
        lm_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConvertConfig::default())
    }
}

fn apply_overrides(cli: &cli::Cli, config: &mut ConvertConfig) -> Result<()> {
    if let Some(ref name) = cli.profile {
        config.preset = name.parse::<ProfilePreset>()?;
    }
    if cli.invert {
        config.inverted = Some(true);
    }
    if let Some(ref path) = cli.table {
        config.table = Some(path.clone());
    }
    if let Some(ref path) = cli.output {
        config.output = path.clone();
    }
    if let Some(ref dir) = cli.dir {
        config.input_dir = dir.clone();
    }
    if let Some(ref prefix) = cli.prefix {
        config.input_prefix = prefix.clone();
    }
    config.profile()?;
    Ok(())
}
