use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::spot::Region;

/// Label used when the model reports a class id missing from the table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// COCO class ids of moving vehicles: car, motorcycle, bus, truck.
pub const VEHICLE_CLASS_IDS: [usize; 4] = [2, 3, 5, 7];

/// Class id to class name table of a detection model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassNames {
    names: HashMap<usize, String>,
}

impl ClassNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(|(id, n)| (id, n.into())).collect(),
        }
    }

    /// Build a table from names listed in class id order.
    pub fn from_ordered<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().enumerate())
    }

    /// Two-class parking model: 0 = free, 1 = occupied.
    pub fn parking() -> Self {
        Self::from_ordered(["free", "occupied"])
    }

    /// Name for `class_id`, or [`UNKNOWN_LABEL`].
    pub fn name(&self, class_id: usize) -> &str {
        self.names
            .get(&class_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Fill in the label of regions that carry a class id but no name.
    ///
    /// Returns how many regions were labelled.
    pub fn label_unnamed(&self, regions: &mut [Region]) -> usize {
        let mut labelled = 0;
        for region in regions.iter_mut().filter(|r| r.label.is_empty()) {
            if let Some(class_id) = region.class_id {
                region.label = self.name(class_id).to_string();
                labelled += 1;
            }
        }
        labelled
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let names = ClassNames::parking();
        assert_eq!(names.name(0), "free");
        assert_eq!(names.name(1), "occupied");
        assert_eq!(names.name(9), UNKNOWN_LABEL);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_label_unnamed() {
        let mut regions: Vec<Region> = serde_json::from_str(
            r#"[
                {"bbox": [0, 0, 10, 10], "class_id": 0},
                {"bbox": [0, 0, 10, 10], "class_id": 4},
                {"bbox": [0, 0, 10, 10], "label": "occupied", "class_id": 0},
                {"bbox": [0, 0, 10, 10]}
            ]"#,
        )
        .unwrap();

        assert_eq!(ClassNames::parking().label_unnamed(&mut regions), 2);
        assert_eq!(regions[0].label, "free");
        assert_eq!(regions[1].label, UNKNOWN_LABEL);
        assert_eq!(regions[2].label, "occupied");
        assert!(regions[3].label.is_empty());
    }

    #[test]
    fn test_deserialize_map() {
        let names: ClassNames = serde_json::from_str(r#"{"0": "free", "2": "car"}"#).unwrap();
        assert_eq!(names.name(2), "car");
        assert_eq!(names.name(1), UNKNOWN_LABEL);
    }
}
