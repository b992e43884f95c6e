//! ParkingPipeline for combining detection, spot lookup and tracking.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::integration::frame::Frame;
use crate::integration::labels::VEHICLE_CLASS_IDS;
use crate::integration::tracker::{NoopTracker, TrackedVehicle, VehicleTracker};
use crate::session::SpotSelection;
use crate::spot::{
    FinderConfig, NearestFreeSpotFinder, Point, QueryPoint, Region, SpotError, SpotMatch,
};

use super::RegionSource;

/// Configuration for the [`ParkingPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub finder: FinderConfig,
    /// Forward vehicle detections to the tracker
    pub track_vehicles: bool,
    /// Class ids treated as vehicles
    pub vehicle_class_ids: Vec<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            finder: FinderConfig::default(),
            track_vehicles: true,
            vehicle_class_ids: VEHICLE_CLASS_IDS.to_vec(),
        }
    }
}

/// Errors from processing a frame.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("detection failed on frame {frame_index}")]
    Detection {
        frame_index: u64,
        #[source]
        source: E,
    },
    #[error(transparent)]
    Spot(#[from] SpotError),
}

/// A detected region with its 1-based on-screen number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberedRegion {
    pub number: usize,
    pub region: Region,
}

/// Everything to draw on one frame: no pixels, only overlay primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAnnotation {
    pub frame_index: u64,
    /// All detected regions, numbered in detector order
    pub regions: Vec<NumberedRegion>,
    /// Confirmed vehicle tracks
    pub vehicles: Vec<TrackedVehicle>,
    /// The user's click, when a selection was given
    pub click: Option<QueryPoint>,
    /// The nearest free spot to the click
    pub assigned: Option<SpotMatch>,
}

impl FrameAnnotation {
    pub fn assigned_spot(&self) -> Option<Point> {
        self.assigned.map(|spot| spot.centroid)
    }
}

/// Totals over a processed video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VideoSummary {
    pub frames_processed: u64,
    pub frames_with_spot: u64,
    pub last_assigned: Option<Point>,
}

impl VideoSummary {
    fn record(&mut self, annotation: &FrameAnnotation) {
        self.frames_processed += 1;
        if let Some(spot) = annotation.assigned_spot() {
            self.frames_with_spot += 1;
            self.last_assigned = Some(spot);
        }
    }
}

/// Runs a detector and a tracker over the frames of one video and resolves
/// the user's selection on every frame.
///
/// A pipeline belongs to a single video. The user's selection is passed to
/// each call rather than stored, so nothing leaks between requests.
pub struct ParkingPipeline<D: RegionSource, T: VehicleTracker = NoopTracker> {
    detector: D,
    tracker: T,
    finder: NearestFreeSpotFinder,
    config: PipelineConfig,
}

impl<D: RegionSource> ParkingPipeline<D, NoopTracker> {
    /// Create a pipeline that only resolves spots and tracks nothing.
    pub fn without_tracking(detector: D, config: PipelineConfig) -> Self {
        Self::new(
            detector,
            NoopTracker,
            PipelineConfig {
                track_vehicles: false,
                ..config
            },
        )
    }
}

impl<D: RegionSource, T: VehicleTracker> ParkingPipeline<D, T> {
    /// Create a new pipeline with the given detector, tracker and config.
    pub fn new(detector: D, tracker: T, config: PipelineConfig) -> Self {
        Self {
            detector,
            tracker,
            finder: NearestFreeSpotFinder::new(config.finder.clone()),
            config,
        }
    }

    /// Create a new pipeline with default configuration.
    pub fn with_default_config(detector: D, tracker: T) -> Self {
        Self::new(detector, tracker, PipelineConfig::default())
    }

    /// Process a single frame.
    ///
    /// Runs detection, resolves `selection` against this frame's free
    /// regions, and updates the tracker with the vehicle detections. The
    /// click is validated against the frame size.
    pub fn process_frame(
        &mut self,
        frame: &Frame<'_>,
        selection: Option<&SpotSelection>,
    ) -> Result<FrameAnnotation, PipelineError<D::Error>> {
        let regions = self
            .detector
            .detect(frame)
            .map_err(|source| PipelineError::Detection {
                frame_index: frame.index,
                source,
            })?;

        let assigned = match selection {
            Some(selection) => self
                .finder
                .locate_in(selection.click, &regions, Some(frame.size))?,
            None => None,
        };

        let vehicles = if self.config.track_vehicles {
            let detections: Vec<Region> = regions
                .iter()
                .filter(|region| self.is_vehicle(region))
                .cloned()
                .collect();
            self.tracker
                .update(&detections)
                .into_iter()
                .filter(TrackedVehicle::is_confirmed)
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            frame = frame.index,
            regions = regions.len(),
            vehicles = vehicles.len(),
            assigned = ?assigned.map(|spot| spot.centroid),
            "frame processed"
        );

        Ok(FrameAnnotation {
            frame_index: frame.index,
            regions: regions
                .into_iter()
                .enumerate()
                .map(|(i, region)| NumberedRegion {
                    number: i + 1,
                    region,
                })
                .collect(),
            vehicles,
            click: selection.map(|selection| selection.click),
            assigned,
        })
    }

    /// Process every frame of a video, handing each annotation to `on_frame`.
    ///
    /// Stops at the first error.
    pub fn process_frames<'a, I, F>(
        &mut self,
        frames: I,
        selection: Option<&SpotSelection>,
        mut on_frame: F,
    ) -> Result<VideoSummary, PipelineError<D::Error>>
    where
        I: IntoIterator<Item = Frame<'a>>,
        F: FnMut(FrameAnnotation),
    {
        let mut summary = VideoSummary::default();
        for frame in frames {
            let annotation = self.process_frame(&frame, selection)?;
            summary.record(&annotation);
            on_frame(annotation);
        }
        info!(
            frames = summary.frames_processed,
            frames_with_spot = summary.frames_with_spot,
            "video processed"
        );
        Ok(summary)
    }

    fn is_vehicle(&self, region: &Region) -> bool {
        region
            .class_id
            .is_some_and(|id| self.config.vehicle_class_ids.contains(&id))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn finder(&self) -> &NearestFreeSpotFinder {
        &self.finder
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }
}
