use std::path::PathBuf;

use clap::Parser;

/// Command line configuration for the marker overlay demo.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct AppArgs {
    /// Planar-target descriptor the tracker should recognize.
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// TOML config file. Without this flag `marker-demo.toml` is picked up
    /// from the working directory when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hand score threshold override.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Seed for the synthetic camera feed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the main window (offscreen/headless).
    #[arg(long, default_value_t = false)]
    pub headless: bool,
}
