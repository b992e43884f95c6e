mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use parkspot_rs::{
    FrameSize, NearestFreeSpotFinder, QueryPoint, Region, ServiceConfig, SpotResponse,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "parkspot=debug,parkspot_rs=debug"
    } else {
        "parkspot=warn,parkspot_rs=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    let mut finder_config = config.pipeline.finder;
    if let (Some(width), Some(height)) = (args.width, args.height) {
        finder_config.frame = Some(FrameSize::new(width, height));
    }

    let contents = fs::read_to_string(&args.regions)
        .with_context(|| format!("reading regions from {}", args.regions.display()))?;
    let mut regions: Vec<Region> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing regions from {}", args.regions.display()))?;
    let labelled = config.class_names.label_unnamed(&mut regions);
    debug!(count = regions.len(), labelled, "regions loaded");

    let finder = NearestFreeSpotFinder::new(finder_config);
    let spot = finder
        .find_nearest(QueryPoint::new(args.x, args.y), &regions)
        .context("resolving nearest free spot")?;

    match spot {
        Some(p) => info!(x = p.x, y = p.y, "spot assigned"),
        None => info!("no free spot available"),
    }

    println!("{}", serde_json::to_string(&SpotResponse::from(spot))?);
    Ok(())
}
