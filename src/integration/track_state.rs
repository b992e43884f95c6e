use serde::{Deserialize, Serialize};

/// Lifecycle state of a track reported by an external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// Newly created track, not yet confirmed
    #[default]
    Tentative,
    /// Track confirmed over enough frames to be drawn
    Confirmed,
    /// Track dropped by the tracker
    Deleted,
}
