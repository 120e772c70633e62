use anyhow::Result;
use clap::Parser;
use lm_calibrate::analyze;
use lm_calibrate::sheet::{self, SheetLayout};

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    match cli.command {
        cli::Command::Sheet { columns } => {
            let layout = SheetLayout {
                columns,
                ..SheetLayout::default()
            };
            print!("{}", sheet::render_sheet(&layout));
        }
        cli::Command::Analyze {
            image,
            output,
            cell_width,
            cell_height,
            columns,
            exclude,
            dark_ink,
        } => {
            let layout = SheetLayout {
                cell_width,
                cell_height,
                columns,
                ..SheetLayout::default()
            };
            let excluded: Vec<char> = exclude.chars().collect();
            let table = analyze::analyze_sheet(&image, &layout, dark_ink, &excluded)?;
            table.save(&output)?;
            log::info!("Table écrite dans {}", output.display());
        }
    }
    Ok(())
}
