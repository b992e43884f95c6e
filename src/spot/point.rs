//! Pixel points, user query points and frame dimensions.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::spot::error::SpotError;

/// Integer pixel coordinate. Box centroids are expressed as `Point`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a floating point `nalgebra` point for distance computations.
    #[inline]
    pub fn to_point2(&self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A point supplied by the user, typically a click on a preview frame.
///
/// Coordinates are floating point because clicks are rescaled from the
/// preview to the source resolution. They must be finite before use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub x: f64,
    pub y: f64,
}

impl QueryPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check the point and convert it for distance computations.
    ///
    /// Fails with [`SpotError::InvalidInput`] for non-finite coordinates and,
    /// when `frame` is given, with [`SpotError::OutOfFrame`] for points
    /// outside of it.
    pub fn validate(&self, frame: Option<FrameSize>) -> Result<Point2<f64>, SpotError> {
        if !self.is_finite() {
            return Err(SpotError::InvalidInput {
                x: self.x,
                y: self.y,
            });
        }
        if let Some(frame) = frame {
            if !frame.contains(self) {
                return Err(SpotError::OutOfFrame {
                    x: self.x,
                    y: self.y,
                    width: frame.width,
                    height: frame.height,
                });
            }
        }
        Ok(Point2::new(self.x, self.y))
    }

    /// Euclidean distance to a pixel point.
    pub fn distance_to(&self, point: Point) -> f64 {
        nalgebra::distance(&Point2::new(self.x, self.y), &point.to_point2())
    }
}

impl From<Point> for QueryPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x as f64, point.y as f64)
    }
}

impl From<(f64, f64)> for QueryPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `point` falls inside `[0, width) x [0, height)`.
    pub fn contains(&self, point: &QueryPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }

    /// Map a point taken on a frame of size `from` onto this frame size.
    ///
    /// Used to bring a click on the downscaled preview back to source
    /// resolution. A degenerate `from` size leaves the point unchanged.
    pub fn rescale(&self, point: QueryPoint, from: FrameSize) -> QueryPoint {
        if from.width == 0 || from.height == 0 {
            return point;
        }
        let sx = self.width as f64 / from.width as f64;
        let sy = self.height as f64 / from.height as f64;
        QueryPoint::new(point.x * sx, point.y * sy)
    }
}
