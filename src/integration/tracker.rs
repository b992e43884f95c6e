//! Trait for multi-object tracking backends.

use serde::{Deserialize, Serialize};

use crate::integration::track_state::TrackStatus;
use crate::spot::{BoundingBox, Region};

/// A vehicle track as reported by the tracker for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedVehicle {
    pub track_id: u64,
    pub bbox: BoundingBox,
    pub status: TrackStatus,
}

impl TrackedVehicle {
    pub fn new(track_id: u64, bbox: BoundingBox, status: TrackStatus) -> Self {
        Self {
            track_id,
            bbox,
            status,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TrackStatus::Confirmed
    }
}

/// Trait for multi-object trackers (DeepSORT, ByteTrack, ...).
///
/// The tracker owns its state across frames. One tracker instance belongs to
/// one video; it is never shared between requests.
pub trait VehicleTracker {
    /// Feed this frame's vehicle detections and return the current tracks.
    fn update(&mut self, detections: &[Region]) -> Vec<TrackedVehicle>;
}

impl<T: VehicleTracker + ?Sized> VehicleTracker for &mut T {
    fn update(&mut self, detections: &[Region]) -> Vec<TrackedVehicle> {
        (**self).update(detections)
    }
}

/// Tracker that tracks nothing, for pipelines that only resolve spots.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl VehicleTracker for NoopTracker {
    fn update(&mut self, _detections: &[Region]) -> Vec<TrackedVehicle> {
        Vec::new()
    }
}
