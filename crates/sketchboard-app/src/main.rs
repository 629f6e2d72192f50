//! Main application entry point.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sketchboard_app::{App, load_script};
use sketchboard_core::config::CanvasConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rendered frame.
    Svg,
    /// Committed shapes.
    Json,
}

/// Replay a script of canvas UI actions and write the result.
#[derive(Debug, Parser)]
#[command(name = "sketchboard", version, about)]
struct Cli {
    /// JSON script of UI actions.
    script: PathBuf,

    /// Canvas configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting Sketchboard");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CanvasConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CanvasConfig::default(),
    };

    let script = load_script(&cli.script)?;
    let mut app = App::new(config);
    app.run_script(&script)?;

    let output = match cli.format {
        OutputFormat::Svg => app.render_svg(),
        OutputFormat::Json => app.shapes_json()?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}
