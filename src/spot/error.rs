use thiserror::Error;

/// Errors raised while resolving a spot for a query point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpotError {
    /// The query point has a NaN or infinite coordinate.
    #[error("invalid query point ({x}, {y}): coordinates must be finite")]
    InvalidInput { x: f64, y: f64 },
    /// The query point lies outside the frame it was taken from.
    #[error("query point ({x}, {y}) lies outside the {width}x{height} frame")]
    OutOfFrame {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
}
