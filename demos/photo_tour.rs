//! Guided photo tour through a captured point cloud
//!
//! Loads the pose document, point cloud and photographs named in the viewer
//! config, then opens a window settled on the first pose.
//!
//! Controls:
//!   Right arrow / left click   next pose
//!   Left arrow                 previous pose
//!   Escape                     quit

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tourcrate_visualization::{Tour, TourViewer, ViewerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo_tour", about = "Step through captured camera poses over a point cloud")]
#[command(version)]
struct Cli {
    /// Viewer config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pose document (JSON)
    #[arg(long)]
    pose_data: Option<PathBuf>,

    /// Point cloud (PLY)
    #[arg(long)]
    point_cloud: Option<PathBuf>,

    /// Directory holding one photograph per pose
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Frames per transition
    #[arg(long)]
    transition_frames: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };

        if let Some(path) = &self.pose_data {
            config.pose_data = path.clone();
        }
        if let Some(path) = &self.point_cloud {
            config.point_cloud = path.clone();
        }
        if let Some(dir) = &self.image_dir {
            config.image_dir = dir.clone();
        }
        if let Some(frames) = self.transition_frames {
            config.transition_frames = frames;
        }

        config.validate().context("Invalid viewer config")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.viewer_config()?;
    info!("Pose data: {}", config.pose_data.display());
    info!("Point cloud: {}", config.point_cloud.display());
    info!("Images: {}", config.image_dir.display());

    let tour = Tour::load(&config)
        .with_context(|| format!("Failed to load tour from {}", config.point_cloud.display()))?;
    TourViewer::new(config, tour).run().context("Viewer exited with an error")?;

    Ok(())
}
