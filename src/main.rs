use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use serp_extract::infrastructure::{init_logging_with_config, AppConfig, FeatureOptions};
use serp_extract::{Serp, SerpParser};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "serp-extract")]
#[command(about = "Extract structured records from saved search results pages", long_about = None)]
struct Args {
    /// Saved results pages (HTML)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Configuration file (TOML); defaults to the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma separated features to extract, replacing the configured set
    #[arg(short, long)]
    features: Option<String>,

    /// Pretty-print the JSON records
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging_with_config(config.logging.clone())?;

    let parser = SerpParser::from_config(&config.parsing).context("Invalid selector configuration")?;
    let features = match &args.features {
        Some(list) => FeatureOptions::from_list(list),
        None => config.parsing.features,
    };
    debug!("Enabled features: {:?}", features.enabled().collect::<Vec<_>>());

    let records: Vec<Serp> = args
        .files
        .par_iter()
        .map(|path| {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(parser.parse(&html, Some(&features)))
        })
        .collect::<Result<_>>()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        if args.pretty {
            serde_json::to_writer_pretty(&mut out, record)?;
        } else {
            serde_json::to_writer(&mut out, record)?;
        }
        writeln!(out)?;
    }

    info!("Extracted {} results pages", records.len());
    Ok(())
}
