//! Contour CLI
//!
//! Inspect SVG documents and rasterize them to PNG.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contour_core::Color;
use contour_svg::{ParseStatus, SvgDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::ContourConfig;

#[derive(Parser)]
#[command(name = "contour")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and rasterize SVG documents", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./contour.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory relative document paths resolve against
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print document size, path count and bounding box
    Info {
        /// SVG file
        file: PathBuf,
    },

    /// Rasterize a document to PNG
    Raster {
        /// SVG file
        file: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,

        /// Replace every fill color (#rrggbb or #rrggbbaa)
        #[arg(long)]
        fill: Option<String>,

        /// Fail when the parser reports an error
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ContourConfig::load(cli.config.as_deref())?;

    // Initialize logging
    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(log_directive(
        cli.verbose,
        env_filter.as_deref(),
        config.log_filter.as_deref(),
    ));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Info { file } => cmd_info(&config, cli.data_dir.as_deref(), &file),
        Commands::Raster {
            file,
            output,
            fill,
            strict,
        } => cmd_raster(
            &config,
            cli.data_dir.as_deref(),
            &file,
            &output,
            fill.as_deref(),
            strict,
        ),
    }
}

/// Pick the log filter: `--verbose`, then `RUST_LOG`, then the config file
fn log_directive<'a>(verbose: bool, env: Option<&'a str>, config: Option<&'a str>) -> &'a str {
    if verbose {
        return "debug";
    }
    env.filter(|directive| !directive.trim().is_empty())
        .or(config)
        .unwrap_or("info")
}

fn load_document(
    config: &ContourConfig,
    data_dir: Option<&Path>,
    file: &Path,
) -> Result<(SvgDocument, ParseStatus)> {
    let options = config.load_options(data_dir);
    let mut document = SvgDocument::new().with_surface_settings(config.raster.clone());
    let status = document
        .load(file, &options)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok((document, status))
}

fn cmd_info(config: &ContourConfig, data_dir: Option<&Path>, file: &Path) -> Result<()> {
    let (document, status) = load_document(config, data_dir, file)?;
    if !status.is_ok() {
        warn!("{}: {}", file.display(), status);
    }

    let bounds = document.bounding_box();
    println!("file:     {}", file.display());
    println!("status:   {}", status);
    println!("size:     {} x {}", document.width(), document.height());
    println!("paths:    {}", document.len());
    println!(
        "bounds:   x={} y={} w={} h={}",
        bounds.x(),
        bounds.y(),
        bounds.width(),
        bounds.height()
    );

    Ok(())
}

fn cmd_raster(
    config: &ContourConfig,
    data_dir: Option<&Path>,
    file: &Path,
    output: &Path,
    fill: Option<&str>,
    strict: bool,
) -> Result<()> {
    let (mut document, status) = load_document(config, data_dir, file)?;
    if strict {
        status
            .into_result()
            .with_context(|| format!("Failed to parse {}", file.display()))?;
    }

    if let Some(fill) = fill {
        let color = Color::parse_hex(fill)
            .with_context(|| format!("Invalid fill color '{}', expected #rrggbb", fill))?;
        document.set_fill_color(color);
    }

    let surface = document
        .rasterize()
        .with_context(|| format!("Failed to rasterize {}", file.display()))?;
    let png = surface.encode_png()?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Wrote {}x{} image to {}",
        surface.width(),
        surface.height(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_precedence() {
        assert_eq!(log_directive(false, None, None), "info");
        assert_eq!(log_directive(false, None, Some("warn")), "warn");
        assert_eq!(
            log_directive(false, Some("contour_svg=trace"), Some("warn")),
            "contour_svg=trace"
        );
        assert_eq!(log_directive(false, Some("  "), Some("warn")), "warn");
        assert_eq!(log_directive(true, Some("error"), Some("warn")), "debug");
    }

    #[test]
    fn test_cli_parses_raster_flags() {
        let cli = Cli::try_parse_from([
            "contour", "-v", "raster", "star.svg", "-o", "star.png", "--fill", "#ff0000",
            "--strict",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Raster {
                file,
                output,
                fill,
                strict,
            } => {
                assert_eq!(file, PathBuf::from("star.svg"));
                assert_eq!(output, PathBuf::from("star.png"));
                assert_eq!(fill.as_deref(), Some("#ff0000"));
                assert!(strict);
            }
            Commands::Info { .. } => panic!("expected raster"),
        }
    }
}
