mod assignment;
mod bbox;
mod error;
mod finder;
mod point;
mod region;

pub use assignment::{AssignmentResult, SpotAssigner, linear_assignment};
pub use bbox::{BoundingBox, distance_matrix};
pub use error::SpotError;
pub use finder::{
    DEFAULT_TIE_TOLERANCE, FREE_LABEL, FinderConfig, NearestFreeSpotFinder, SpotMatch,
    find_nearest,
};
pub use point::{FrameSize, Point, QueryPoint};
pub use region::Region;
