//! Nearest free parking spot lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spot::error::SpotError;
use crate::spot::point::{FrameSize, Point, QueryPoint};
use crate::spot::region::Region;

/// Label the detector assigns to unoccupied parking spaces.
pub const FREE_LABEL: &str = "free";

/// Distances closer than this are treated as equal; the earlier region wins.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-9;

/// Configuration for the [`NearestFreeSpotFinder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub free_label: String,
    pub min_confidence: f32,
    pub tie_tolerance: f64,
    /// When set, query points outside this frame are rejected.
    pub frame: Option<FrameSize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            free_label: FREE_LABEL.to_string(),
            min_confidence: 0.0,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            frame: None,
        }
    }
}

/// A resolved spot: the winning centroid plus where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpotMatch {
    pub centroid: Point,
    /// Index of the region in the input slice
    pub region_index: usize,
    /// Euclidean distance from the query point to `centroid`
    pub distance: f64,
}

/// Finds the free region whose centroid is closest to a query point.
///
/// The finder holds only its configuration, so one instance can be shared
/// across threads and requests.
#[derive(Debug, Clone, Default)]
pub struct NearestFreeSpotFinder {
    config: FinderConfig,
}

impl NearestFreeSpotFinder {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Free, well formed regions as `(index, centroid)` pairs in input order.
    ///
    /// Free regions with a degenerate box are skipped rather than failing
    /// the whole lookup.
    pub fn free_spots<'a>(
        &'a self,
        regions: &'a [Region],
    ) -> impl Iterator<Item = (usize, Point)> + 'a {
        regions
            .iter()
            .enumerate()
            .filter(|(_, region)| {
                region.has_label(&self.config.free_label)
                    && region.confidence >= self.config.min_confidence
            })
            .filter_map(|(idx, region)| {
                if region.bbox.is_well_formed() {
                    Some((idx, region.centroid()))
                } else {
                    debug!(index = idx, bbox = ?region.bbox, "skipping malformed free region");
                    None
                }
            })
    }

    /// Resolve the nearest free spot with its region index and distance.
    ///
    /// Returns `Ok(None)` when no free region is available.
    pub fn locate(
        &self,
        query: QueryPoint,
        regions: &[Region],
    ) -> Result<Option<SpotMatch>, SpotError> {
        self.locate_in(query, regions, self.config.frame)
    }

    /// Like [`locate`](Self::locate), validating the query against `frame`
    /// instead of the configured frame size.
    pub fn locate_in(
        &self,
        query: QueryPoint,
        regions: &[Region],
        frame: Option<FrameSize>,
    ) -> Result<Option<SpotMatch>, SpotError> {
        query.validate(frame)?;

        let mut best: Option<SpotMatch> = None;
        for (region_index, centroid) in self.free_spots(regions) {
            let distance = query.distance_to(centroid);
            // Strictly closer beyond the tolerance, so ties keep the earlier region.
            if best.is_none_or(|current| distance < current.distance - self.config.tie_tolerance)
            {
                best = Some(SpotMatch {
                    centroid,
                    region_index,
                    distance,
                });
            }
        }
        Ok(best)
    }

    /// Centroid of the nearest free region, or `None` if there is none.
    pub fn find_nearest(
        &self,
        query: impl Into<QueryPoint>,
        regions: &[Region],
    ) -> Result<Option<Point>, SpotError> {
        Ok(self
            .locate(query.into(), regions)?
            .map(|spot| spot.centroid))
    }
}

/// Centroid of the `"free"` region nearest to `query`, using default settings.
pub fn find_nearest(
    query: impl Into<QueryPoint>,
    regions: &[Region],
) -> Result<Option<Point>, SpotError> {
    NearestFreeSpotFinder::default().find_nearest(query, regions)
}
