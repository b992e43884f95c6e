//! Trait for object detection inference backends.

use crate::integration::frame::Frame;
use crate::spot::Region;

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into the parking
/// pipeline. Parking-space models label each box `"free"` or `"occupied"`;
/// vehicles carry their class id so they can be forwarded to a tracker.
///
/// # Example
///
/// ```ignore
/// use parkspot_rs::{Frame, Region, RegionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl RegionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Region>, Self::Error> {
///         // Run inference and return labelled regions
///         Ok(vec![])
///     }
/// }
/// ```
pub trait RegionSource {
    /// Error type for detection failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run inference on a frame and return labelled regions in model order.
    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Region>, Self::Error>;
}

impl<R: RegionSource + ?Sized> RegionSource for &mut R {
    type Error = R::Error;

    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<Region>, Self::Error> {
        (**self).detect(frame)
    }
}
