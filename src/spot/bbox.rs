use nalgebra::Point2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::spot::point::Point;

/// Axis-aligned bounding box in integer pixel coordinates.
///
/// Stored in TLBR form: (x1, y1) top-left, (x2, y2) bottom-right. Serializes
/// as the array `[x1, y1, x2, y2]`, the layout detectors emit as `xyxy`.
///
/// A box is well formed when `x1 < x2` and `y1 < y2`. Construction does not
/// enforce this because detector output is consumed as-is; consumers check
/// [`BoundingBox::is_well_formed`] and skip degenerate boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Create a box from TLBR coordinates.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn from_tlwh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x1, self.y1, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Area in square pixels, zero for degenerate boxes.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_well_formed() {
            self.width() as i64 * self.height() as i64
        } else {
            0
        }
    }

    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Center of the box, using floor division on each axis.
    ///
    /// `(x1 + x2) / 2` rounds toward negative infinity, so `(0, 0, 5, 5)`
    /// has centroid `(2, 2)` and `(-5, -5, 0, 0)` has centroid `(-3, -3)`.
    /// Sums are computed in `i64` and cannot overflow.
    #[inline]
    pub fn centroid(&self) -> Point {
        Point::new(
            floor_midpoint(self.x1, self.x2),
            floor_midpoint(self.y1, self.y2),
        )
    }
}

#[inline]
fn floor_midpoint(a: i32, b: i32) -> i32 {
    (a as i64 + b as i64).div_euclid(2) as i32
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_tlbr()
    }
}

/// Calculate the Euclidean distance matrix between query points and centroids.
///
/// Returns a matrix of shape (M, N) where M is the length of `queries`
/// and N is the length of `centroids`.
pub fn distance_matrix(queries: &[Point2<f64>], centroids: &[Point]) -> Array2<f64> {
    let mut dists = Array2::zeros((queries.len(), centroids.len()));
    for (i, q) in queries.iter().enumerate() {
        for (j, c) in centroids.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(q, &c.to_point2());
        }
    }
    dists
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_conversions() {
        let bbox = BoundingBox::new(10, 20, 40, 60);

        assert_eq!(bbox.to_tlbr(), [10, 20, 40, 60]);
        assert_eq!(bbox.to_tlwh(), [10, 20, 30, 40]);
        assert_eq!(BoundingBox::from_tlwh(10, 20, 30, 40), bbox);
        assert_eq!(bbox.area(), 1200);
    }

    #[test]
    fn test_centroid_even() {
        assert_eq!(BoundingBox::new(0, 0, 10, 10).centroid(), Point::new(5, 5));
        assert_eq!(
            BoundingBox::new(100, 100, 110, 110).centroid(),
            Point::new(105, 105)
        );
    }

    #[test]
    fn test_centroid_rounds_down() {
        // 5 / 2 = 2.5 -> 2
        assert_eq!(BoundingBox::new(0, 0, 5, 5).centroid(), Point::new(2, 2));
        // -5 / 2 = -2.5 -> -3, not -2
        assert_eq!(
            BoundingBox::new(-5, -5, 0, 0).centroid(),
            Point::new(-3, -3)
        );
    }

    #[test]
    fn test_centroid_no_overflow() {
        let bbox = BoundingBox::new(i32::MAX - 2, i32::MAX - 2, i32::MAX, i32::MAX);
        assert_eq!(bbox.centroid(), Point::new(i32::MAX - 1, i32::MAX - 1));
    }

    #[test]
    fn test_well_formed() {
        assert!(BoundingBox::new(0, 0, 1, 1).is_well_formed());
        assert!(!BoundingBox::new(5, 0, 5, 10).is_well_formed());
        assert!(!BoundingBox::new(0, 10, 10, 0).is_well_formed());
        assert_eq!(BoundingBox::new(0, 10, 10, 0).area(), 0);
    }

    #[test]
    fn test_serde_as_array() {
        let bbox = BoundingBox::new(1, 2, 3, 4);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1,2,3,4]");
        let back: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn test_distance_matrix() {
        let queries = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let centroids = [Point::new(3, 4), Point::new(10, 0)];
        let dists = distance_matrix(&queries, &centroids);

        assert_eq!(dists.dim(), (2, 2));
        assert!((dists[[0, 0]] - 5.0).abs() < 1e-12);
        assert!((dists[[0, 1]] - 10.0).abs() < 1e-12);
        assert!(dists[[1, 1]].abs() < 1e-12);
    }
}
