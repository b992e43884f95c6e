//! # parkspot-rs
//!
//! Nearest free parking spot lookup over object detection output.
//!
//! The core is a pure function: given a clicked point and the regions a
//! detector produced for a frame, return the centroid of the closest region
//! labelled `"free"`. Around it sit thin adapters for the contexts that call
//! it: a per-frame pipeline that wires any detector and tracker together, the
//! JSON request/response contracts of the spot selection endpoint, and a
//! registry of pending uploads.
//!
//! ```
//! use parkspot_rs::{Point, Region, find_nearest};
//!
//! let regions = vec![
//!     Region::new(0, 0, 10, 10, "free", 0.9),
//!     Region::new(100, 100, 110, 110, "free", 0.8),
//! ];
//! let spot = find_nearest(Point::new(1, 1), &regions).unwrap();
//! assert_eq!(spot, Some(Point::new(5, 5)));
//! ```

pub mod config;
pub mod integration;
pub mod session;
pub mod spot;

pub use config::{ConfigError, ServiceConfig};
pub use integration::{
    ClassNames, Frame, FrameAnnotation, NoopTracker, ParkingPipeline, PipelineConfig,
    PipelineError, RegionBuilder, RegionSource, TrackStatus, TrackedVehicle, VehicleTracker,
    VideoSummary,
};
pub use session::{SessionError, SpotRequest, SpotResponse, SpotSelection, UploadRegistry};
pub use spot::{
    BoundingBox, FREE_LABEL, FinderConfig, FrameSize, NearestFreeSpotFinder, Point, QueryPoint,
    Region, SpotAssigner, SpotError, SpotMatch, find_nearest,
};
