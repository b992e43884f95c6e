use std::path::PathBuf;

use clap::Parser;

/// Find the free parking spot nearest to a clicked point.
///
/// Reads the regions detected on a frame from a JSON file and prints the
/// selection response as JSON.
#[derive(Parser, Debug)]
#[command(name = "parkspot", version, about)]
pub struct Args {
    /// JSON file with an array of regions: {"bbox": [x1, y1, x2, y2], "label": "free", "confidence": 0.9}.
    /// Regions given a "class_id" instead of a label are named from the config's class table.
    #[arg(short, long)]
    pub regions: PathBuf,

    /// Click x coordinate in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: f64,

    /// Click y coordinate in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: f64,

    /// Frame width; together with --height, clicks outside the frame are rejected
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Frame height
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// YAML service configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
