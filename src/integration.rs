//! Integration module for connecting detection and tracking backends with the
//! free spot lookup.
//!
//! Detection and tracking are external collaborators: this module only defines
//! the seams they plug into ([`RegionSource`], [`VehicleTracker`]) and the
//! per-frame pipeline that runs them.

mod builder;
mod detector;
mod frame;
mod labels;
mod pipeline;
mod track_state;
mod tracker;

pub use builder::RegionBuilder;
pub use detector::RegionSource;
pub use frame::{Frame, PREVIEW_SIZE, preview_frame_index};
pub use labels::{ClassNames, UNKNOWN_LABEL, VEHICLE_CLASS_IDS};
pub use pipeline::{
    FrameAnnotation, NumberedRegion, ParkingPipeline, PipelineConfig, PipelineError, VideoSummary,
};
pub use track_state::TrackStatus;
pub use tracker::{NoopTracker, TrackedVehicle, VehicleTracker};

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnModel, BurnRegionSource, BurnRegionSourceError, RawDetection};
