//! Builder for creating Region objects from various input formats.

use crate::integration::labels::{ClassNames, UNKNOWN_LABEL};
use crate::spot::{BoundingBox, Region};

/// Builder for creating `Region` objects from raw model output.
///
/// Coordinates are accepted as floats and truncated toward zero into integer
/// pixels when the region is built.
#[derive(Debug, Clone, Default)]
pub struct RegionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    score: f32,
    label: Option<String>,
    class_id: Option<usize>,
}

impl RegionBuilder {
    /// Create a new region builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, l: f32, t: f32, w: f32, h: f32) -> Self {
        self.x1 = l;
        self.y1 = t;
        self.x2 = l + w;
        self.y2 = t + h;
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Set the class label directly.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the raw class id reported by the model.
    pub fn class_id(mut self, class_id: usize) -> Self {
        self.class_id = Some(class_id);
        self
    }

    /// Build the final `Region`, resolving the label from `names` when only
    /// a class id was given.
    pub fn build_with_names(self, names: &ClassNames) -> Region {
        let label = match (&self.label, self.class_id) {
            (Some(label), _) => label.clone(),
            (None, Some(class_id)) => names.name(class_id).to_string(),
            (None, None) => UNKNOWN_LABEL.to_string(),
        };
        self.finish(label)
    }

    /// Build the final `Region`. Without a label it is [`UNKNOWN_LABEL`].
    pub fn build(self) -> Region {
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        self.finish(label)
    }

    fn finish(self, label: String) -> Region {
        let bbox = BoundingBox::new(
            self.x1 as i32,
            self.y1 as i32,
            self.x2 as i32,
            self.y2 as i32,
        );
        Region {
            bbox,
            label,
            confidence: self.score,
            class_id: self.class_id,
        }
    }
}
