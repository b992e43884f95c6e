//! Burn inference backend for parking space detection.
//!
//! This module provides a `BurnRegionSource` that implements `RegionSource`
//! for running detection models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use parkspot_rs::integration::{BurnModel, BurnRegionSource, ClassNames};
//! use burn::backend::NdArray;
//!
//! // Implement BurnModel for your detection model
//! struct MyYoloModel { /* ... */ }
//!
//! impl BurnModel<NdArray> for MyYoloModel {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<RawDetection> {
//!         // Run inference
//!     }
//! }
//!
//! let model = MyYoloModel::load("model.bin");
//! let detector = BurnRegionSource::new(model, Default::default(), ClassNames::parking());
//! ```

use burn::prelude::*;
use burn::tensor::Tensor;
use thiserror::Error;

use super::{ClassNames, Frame, RegionBuilder, RegionSource};
use crate::spot::Region;

/// Error type for Burn detection failures.
#[derive(Debug, Clone, Error)]
pub enum BurnRegionSourceError {
    /// Input frame has invalid dimensions.
    #[error("invalid input dimensions: expected {expected:?}, got {got:?}")]
    InvalidInputDimensions {
        expected: (u32, u32, u32),
        got: (u32, u32, u32),
    },
    /// Preprocessing failed.
    #[error("preprocessing error: {0}")]
    PreprocessingError(String),
}

/// Raw detection output from the model before NMS.
#[derive(Debug, Clone)]
pub struct RawDetection {
    /// Bounding box: [x1, y1, x2, y2] or [cx, cy, w, h] depending on model
    pub bbox: [f32; 4],
    /// Confidence score
    pub score: f32,
    /// Class ID, resolved to a label through `ClassNames`
    pub class_id: Option<usize>,
}

/// Trait for Burn-based detection models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor of shape [batch, channels, height, width].
    fn forward(&self, input: Tensor<B, 4>) -> Vec<RawDetection>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (u32, u32, u32) {
        (3, 640, 640) // Default YOLO input size
    }

    /// Whether bbox output is in XYWH format (vs TLBR).
    fn bbox_is_xywh(&self) -> bool {
        true // Most YOLO variants use XYWH
    }
}

/// Burn-based detector implementing `RegionSource`.
pub struct BurnRegionSource<B: Backend, M: BurnModel<B>> {
    model: M,
    device: B::Device,
    class_names: ClassNames,
    conf_threshold: f32,
}

impl<B: Backend, M: BurnModel<B>> BurnRegionSource<B, M> {
    /// Create a new Burn detector with the given model, device and label table.
    pub fn new(model: M, device: B::Device, class_names: ClassNames) -> Self {
        Self {
            model,
            device,
            class_names,
            conf_threshold: 0.25,
        }
    }

    /// Set the confidence threshold for filtering detections.
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Convert frame bytes (CHW, u8) to a normalised Burn tensor.
    pub fn preprocess(&self, frame: &Frame<'_>) -> Result<Tensor<B, 4>, BurnRegionSourceError> {
        let (channels, target_h, target_w) = self.model.input_size();
        let (width, height) = (frame.size.width, frame.size.height);

        if chw_len(channels, height, width) != Some(frame.data.len()) {
            let row_len = (height as usize).saturating_mul(channels as usize).max(1);
            let got_width = u32::try_from(frame.data.len() / row_len).unwrap_or(u32::MAX);
            return Err(BurnRegionSourceError::InvalidInputDimensions {
                expected: (channels, height, width),
                got: (channels, height, got_width),
            });
        }

        if height != target_h || width != target_w {
            return Err(BurnRegionSourceError::PreprocessingError(format!(
                "frame size {width}x{height} doesn't match model size {target_w}x{target_h}"
            )));
        }

        let data: Vec<f32> = frame.data.iter().map(|&x| x as f32 / 255.0).collect();

        let tensor = Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
            1,
            channels as usize,
            height as usize,
            width as usize,
        ]);

        Ok(tensor)
    }

    /// Convert raw model outputs to labelled regions.
    fn postprocess(&self, raw_detections: Vec<RawDetection>) -> Vec<Region> {
        raw_detections
            .into_iter()
            .filter(|d| d.score >= self.conf_threshold)
            .map(|d| {
                let mut builder = RegionBuilder::new().score(d.score);
                if let Some(class_id) = d.class_id {
                    builder = builder.class_id(class_id);
                }
                let builder = if self.model.bbox_is_xywh() {
                    builder.xywh(d.bbox[0], d.bbox[1], d.bbox[2], d.bbox[3])
                } else {
                    builder.tlbr(d.bbox[0], d.bbox[1], d.bbox[2], d.bbox[3])
                };
                builder.build_with_names(&self.class_names)
            })
            .collect()
    }
}

/// Byte length of a CHW u8 frame, or `None` if it does not fit in memory.
fn chw_len(channels: u32, height: u32, width: u32) -> Option<usize> {
    (channels as usize)
        .checked_mul(height as usize)?
        .checked_mul(width as usize)
}

impl<B: Backend, M: BurnModel<B>> RegionSource for BurnRegionSource<B, M> {
    type Error = BurnRegionSourceError;

    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Region>, Self::Error> {
        let tensor = self.preprocess(frame)?;
        let raw_detections = self.model.forward(tensor);
        Ok(self.postprocess(raw_detections))
    }
}
