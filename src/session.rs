//! Request state for the spot selection flow.
//!
//! An upload is registered and gets a video id; the user clicks on the
//! preview and sends a [`SpotRequest`]; the pending upload is taken out of the
//! [`UploadRegistry`] and processed with the click carried as a
//! [`SpotSelection`]. The answer goes back as a [`SpotResponse`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::spot::{FrameSize, Point, QueryPoint, SpotError};

/// Message returned when no free spot could be found.
pub const NO_SPOT_MESSAGE: &str = "No available parking spot found";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("video {0} is not pending processing")]
    UnknownVideo(Uuid),
    #[error(transparent)]
    Spot(#[from] SpotError),
}

/// Body of a spot selection request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRequest {
    pub video_id: Uuid,
    pub x: f64,
    pub y: f64,
}

impl SpotRequest {
    pub fn click(&self) -> QueryPoint {
        QueryPoint::new(self.x, self.y)
    }
}

/// A user's click for one video, carried explicitly through processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotSelection {
    pub video_id: Uuid,
    /// Click in source frame coordinates
    pub click: QueryPoint,
}

impl SpotSelection {
    pub fn new(video_id: Uuid, click: QueryPoint) -> Self {
        Self { video_id, click }
    }
}

/// Answer to a spot selection request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpotResponse {
    Assigned { assigned_x: i32, assigned_y: i32 },
    NotFound { message: String },
}

impl SpotResponse {
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NO_SPOT_MESSAGE.to_string(),
        }
    }

    pub fn spot(&self) -> Option<Point> {
        match self {
            Self::Assigned {
                assigned_x,
                assigned_y,
            } => Some(Point::new(*assigned_x, *assigned_y)),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<Option<Point>> for SpotResponse {
    fn from(spot: Option<Point>) -> Self {
        match spot {
            Some(p) => Self::Assigned {
                assigned_x: p.x,
                assigned_y: p.y,
            },
            None => Self::not_found(),
        }
    }
}

/// An uploaded video waiting for the user's click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVideo {
    pub path: PathBuf,
    pub frame_size: FrameSize,
    /// Size of the preview image the user clicks on
    pub preview_size: FrameSize,
    /// Where the processed video is written; next to the upload when unset
    pub output_dir: Option<PathBuf>,
}

impl PendingVideo {
    pub fn new(path: impl Into<PathBuf>, frame_size: FrameSize, preview_size: FrameSize) -> Self {
        Self {
            path: path.into(),
            frame_size,
            preview_size,
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Processed output keeps the upload's file name with a `processed_` prefix.
    pub fn processed_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => self.path.parent().unwrap_or_else(|| Path::new("")),
        };
        dir.join(format!("processed_{name}"))
    }
}

/// Uploads waiting for a click, keyed by video id.
///
/// Owned by the service and passed by reference to request handlers. Taking
/// an entry moves the video from pending to processing, so a second request
/// for the same id fails.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    pending: Mutex<HashMap<Uuid, PendingVideo>>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, PendingVideo>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an upload and return its new video id.
    pub fn register(&self, video: PendingVideo) -> Uuid {
        let video_id = Uuid::new_v4();
        debug!(%video_id, path = %video.path.display(), "upload registered");
        self.lock().insert(video_id, video);
        video_id
    }

    pub fn contains(&self, video_id: &Uuid) -> bool {
        self.lock().contains_key(video_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return a pending upload.
    pub fn take(&self, video_id: &Uuid) -> Result<PendingVideo, SessionError> {
        self.lock()
            .remove(video_id)
            .ok_or(SessionError::UnknownVideo(*video_id))
    }

    /// Start processing the video a request refers to.
    ///
    /// The click is mapped from preview to source coordinates and checked
    /// against the source frame. An invalid click leaves the upload pending
    /// so the user can click again.
    pub fn begin_processing(
        &self,
        request: &SpotRequest,
    ) -> Result<(PendingVideo, SpotSelection), SessionError> {
        let mut pending = self.lock();
        let video = pending
            .get(&request.video_id)
            .ok_or(SessionError::UnknownVideo(request.video_id))?;

        let click = request.click();
        click.validate(Some(video.preview_size))?;
        let click = video.frame_size.rescale(click, video.preview_size);
        click.validate(Some(video.frame_size))?;

        let video = pending
            .remove(&request.video_id)
            .ok_or(SessionError::UnknownVideo(request.video_id))?;
        info!(video_id = %request.video_id, x = click.x, y = click.y, "processing started");
        Ok((video, SpotSelection::new(request.video_id, click)))
    }
}
