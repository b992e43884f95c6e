//! One-to-one assignment of several query points to distinct free spots.

use nalgebra::Point2;
use ndarray::Array2;

use crate::spot::bbox::distance_matrix;
use crate::spot::error::SpotError;
use crate::spot::finder::{NearestFreeSpotFinder, SpotMatch};
use crate::spot::point::{Point, QueryPoint};
use crate::spot::region::Region;

/// Cost of the dummy cells used to square up the cost matrix.
const PADDING_COST: f64 = 1e6;

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

/// Solve the rectangular linear assignment problem on `cost_matrix`.
///
/// Pairs whose cost exceeds `thresh` are reported as unmatched.
pub fn linear_assignment(cost_matrix: &Array2<f64>, thresh: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_rows: vec![],
            unmatched_cols: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: vec![],
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);
    padded
        .slice_mut(ndarray::s![..num_rows, ..num_cols])
        .assign(cost_matrix);

    let mut matches = vec![];
    let mut unmatched_rows = vec![];
    let mut unmatched_cols_mask: Vec<bool> = vec![true; num_cols];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] <= thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_cols_mask[col_idx] = false;
                } else {
                    unmatched_rows.push(row_idx);
                }
            }
        }
        Err(_) => {
            unmatched_rows = (0..num_rows).collect();
        }
    }

    let unmatched_cols = unmatched_cols_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_rows,
        unmatched_cols,
    }
}

/// Assigns several query points to distinct free spots, minimising the
/// total distance.
///
/// Used when more than one user picks a spot on the same frame: no spot is
/// handed out twice. A single query resolves exactly like
/// [`NearestFreeSpotFinder::locate`].
#[derive(Debug, Clone, Default)]
pub struct SpotAssigner {
    finder: NearestFreeSpotFinder,
    max_distance: Option<f64>,
}

impl SpotAssigner {
    pub fn new(finder: NearestFreeSpotFinder) -> Self {
        Self {
            finder,
            max_distance: None,
        }
    }

    /// Leave queries unassigned when their spot would be farther than this.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    pub fn finder(&self) -> &NearestFreeSpotFinder {
        &self.finder
    }

    /// Assign each query to a distinct free spot.
    ///
    /// The result has one entry per query, in order. `None` means the query
    /// got no spot: there were fewer spots than queries, or the closest
    /// available one was beyond the distance limit.
    pub fn assign(
        &self,
        queries: &[QueryPoint],
        regions: &[Region],
    ) -> Result<Vec<Option<SpotMatch>>, SpotError> {
        let frame = self.finder.config().frame;
        let points = queries
            .iter()
            .map(|q| q.validate(frame))
            .collect::<Result<Vec<Point2<f64>>, _>>()?;

        if let [query] = queries {
            let spot = self
                .finder
                .locate(*query, regions)?
                .filter(|spot| self.within_limit(spot.distance));
            return Ok(vec![spot]);
        }

        let spots: Vec<(usize, Point)> = self.finder.free_spots(regions).collect();
        let centroids: Vec<Point> = spots.iter().map(|&(_, c)| c).collect();
        let dists = distance_matrix(&points, &centroids);

        let thresh = self.max_distance.unwrap_or(f64::INFINITY);
        let AssignmentResult { matches, .. } = linear_assignment(&dists, thresh);

        let mut assigned = vec![None; queries.len()];
        for (iquery, ispot) in matches {
            let (region_index, centroid) = spots[ispot];
            assigned[iquery] = Some(SpotMatch {
                centroid,
                region_index,
                distance: dists[[iquery, ispot]],
            });
        }
        Ok(assigned)
    }

    fn within_limit(&self, distance: f64) -> bool {
        self.max_distance.is_none_or(|max| distance <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spots() -> Vec<Region> {
        vec![
            Region::new(0, 0, 10, 10, "free", 0.9),
            Region::new(20, 0, 30, 10, "free", 0.9),
            Region::new(40, 0, 50, 10, "occupied", 0.9),
        ]
    }

    #[test]
    fn test_linear_assignment_empty() {
        let res = linear_assignment(&Array2::zeros((0, 3)), 1.0);
        assert!(res.matches.is_empty());
        assert_eq!(res.unmatched_cols, vec![0, 1, 2]);

        let res = linear_assignment(&Array2::zeros((2, 0)), 1.0);
        assert_eq!(res.unmatched_rows, vec![0, 1]);
    }

    #[test]
    fn test_linear_assignment_rectangular() {
        let cost = ndarray::array![[1.0, 5.0], [2.0, 9.0], [8.0, 1.0]];
        let res = linear_assignment(&cost, f64::INFINITY);
        let mut matches = res.matches.clone();
        matches.sort();
        assert_eq!(matches, vec![(0, 0), (2, 1)]);
        assert_eq!(res.unmatched_rows, vec![1]);
        assert!(res.unmatched_cols.is_empty());
    }

    #[test]
    fn test_assign_distinct_spots() {
        // Both queries are closest to the first spot; the one nearer to it keeps it.
        let queries = [QueryPoint::new(4.0, 5.0), QueryPoint::new(8.0, 5.0)];
        let assigned = SpotAssigner::default().assign(&queries, &spots()).unwrap();

        assert_eq!(assigned[0].unwrap().centroid, Point::new(5, 5));
        assert_eq!(assigned[1].unwrap().centroid, Point::new(25, 5));
    }

    #[test]
    fn test_more_queries_than_spots() {
        let queries = [
            QueryPoint::new(5.0, 5.0),
            QueryPoint::new(25.0, 5.0),
            QueryPoint::new(45.0, 5.0),
        ];
        let assigned = SpotAssigner::default().assign(&queries, &spots()).unwrap();
        assert_eq!(assigned.len(), 3);
        assert_eq!(assigned.iter().filter(|s| s.is_some()).count(), 2);
        assert_eq!(assigned[0].unwrap().region_index, 0);
        assert_eq!(assigned[1].unwrap().region_index, 1);
        assert!(assigned[2].is_none());
    }

    #[test]
    fn test_max_distance() {
        let assigner = SpotAssigner::default().with_max_distance(3.0);
        let assigned = assigner
            .assign(&[QueryPoint::new(5.0, 20.0)], &spots())
            .unwrap();
        assert_eq!(assigned, vec![None]);

        let assigned = assigner
            .assign(
                &[QueryPoint::new(5.0, 6.0), QueryPoint::new(25.0, 40.0)],
                &spots(),
            )
            .unwrap();
        assert_eq!(assigned[0].unwrap().centroid, Point::new(5, 5));
        assert!(assigned[1].is_none());
    }

    #[test]
    fn test_single_query_matches_locate() {
        let regions = vec![
            Region::new(10, 0, 20, 10, "free", 0.9),
            Region::new(0, 0, 10, 10, "free", 0.9),
        ];
        let q = QueryPoint::new(10.0, 5.0);
        let assigner = SpotAssigner::default();
        let assigned = assigner.assign(&[q], &regions).unwrap();
        let located = assigner.finder().locate(q, &regions).unwrap();
        assert_eq!(assigned, vec![located]);
    }

    #[test]
    fn test_invalid_query_rejected() {
        let queries = [QueryPoint::new(1.0, 1.0), QueryPoint::new(f64::NAN, 1.0)];
        assert!(SpotAssigner::default().assign(&queries, &spots()).is_err());
    }

    #[test]
    fn test_no_queries() {
        assert!(SpotAssigner::default().assign(&[], &spots()).unwrap().is_empty());
    }
}
