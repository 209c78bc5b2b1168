//! Injectable range-query capability for the node classifier.
//!
//! The classifier only needs one operation: "all points within `radius`
//! of a center". Keeping that behind a trait decouples it from a specific
//! spatial index; the kd-tree is the default, the linear scan doubles as a
//! reference oracle in tests.
use super::kdtree::KdTree;
use crate::intersect::IntersectionPoint;

/// Closed-ball neighborhood query over an external point slice.
pub trait RangeQuery {
    /// Indices of all points with Euclidean distance ≤ `radius` from
    /// `center`. A point at distance exactly `radius` is included.
    fn range_query(
        &self,
        points: &[IntersectionPoint],
        center: [f64; 2],
        radius: f64,
    ) -> Vec<usize>;
}

/// Balanced kd-tree index; the default for classification.
pub struct KdTreeIndex {
    tree: KdTree,
}

impl KdTreeIndex {
    pub fn build(points: &[IntersectionPoint]) -> Self {
        Self {
            tree: KdTree::build(points),
        }
    }
}

impl RangeQuery for KdTreeIndex {
    fn range_query(
        &self,
        points: &[IntersectionPoint],
        center: [f64; 2],
        radius: f64,
    ) -> Vec<usize> {
        self.tree.within_radius(points, center, radius)
    }
}

/// Exhaustive pairwise-distance scan; O(n) per query.
pub struct LinearScan;

impl RangeQuery for LinearScan {
    fn range_query(
        &self,
        points: &[IntersectionPoint],
        center: [f64; 2],
        radius: f64,
    ) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let dx = p.x as f64 - center[0];
                let dy = p.y as f64 - center[1];
                (dx * dx + dy * dy).sqrt() <= radius
            })
            .map(|(i, _)| i)
            .collect()
    }
}
