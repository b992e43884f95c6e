use serde::{Deserialize, Serialize};

use crate::spot::bbox::BoundingBox;
use crate::spot::point::Point;

/// A labelled box produced by the detector for a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: BoundingBox,
    /// Class name, e.g. `"free"` or `"occupied"`. Empty until resolved
    /// when only a class id was given.
    #[serde(default)]
    pub label: String,
    /// Detection confidence score in [0, 1]
    #[serde(default = "full_confidence")]
    pub confidence: f32,
    /// Raw class id from the model, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<usize>,
}

fn full_confidence() -> f32 {
    1.0
}

impl Region {
    pub fn new(
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self::from_bbox(BoundingBox::new(x1, y1, x2, y2), label, confidence)
    }

    pub fn from_bbox(bbox: BoundingBox, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            label: label.into(),
            confidence,
            class_id: None,
        }
    }

    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = Some(class_id);
        self
    }

    #[inline]
    pub fn centroid(&self) -> Point {
        self.bbox.centroid()
    }

    #[inline]
    pub fn has_label(&self, label: &str) -> bool {
        self.label == label
    }
}
