use super::index::{KdTreeIndex, RangeQuery};
use crate::error::AnalysisError;
use crate::intersect::IntersectionPoint;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Node-degree histogram restricted to the three reported classes.
///
/// `x_nodes` counts neighborhoods of size 4 (4-way crossings), `y_nodes`
/// size 3 (3-way junctions), `i_nodes` size 1 (isolated endpoints). Other
/// neighborhood sizes are tallied internally but not surfaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeCounts {
    #[serde(rename = "X-nodes")]
    pub x_nodes: usize,
    #[serde(rename = "Y-nodes")]
    pub y_nodes: usize,
    #[serde(rename = "I-nodes")]
    pub i_nodes: usize,
}

impl NodeCounts {
    /// Extract the three reported buckets from a neighborhood-size table.
    pub fn from_frequencies(frequencies: &HashMap<usize, usize>) -> Self {
        Self {
            x_nodes: frequencies.get(&4).copied().unwrap_or(0),
            y_nodes: frequencies.get(&3).copied().unwrap_or(0),
            i_nodes: frequencies.get(&1).copied().unwrap_or(0),
        }
    }
}

/// Classification output: the histogram plus deduplicated node centroids.
///
/// Centroids (integer-rounded neighborhood means) are carried for
/// rendering and have no effect on the counts.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeAnalysis {
    pub counts: NodeCounts,
    pub centroids: Vec<[i32; 2]>,
}

/// Group intersection points into topological nodes and classify them.
///
/// For every point, its cluster is the set of all points within `radius`
/// (closed ball, self included). This is a per-point neighborhood query,
/// NOT a transitive connected-component clustering: neighborhoods of
/// nearby points may overlap without being equal, and each point
/// contributes one histogram entry keyed by its own neighborhood size.
/// Four points mutually within radius therefore report `x_nodes == 4`,
/// one count per point. Substituting a canonical partition here would
/// change the histogram numerically.
///
/// `radius == 0` is valid and degenerates to exact-coincidence groups;
/// a negative or non-finite radius is rejected.
pub fn classify_nodes(
    points: &[IntersectionPoint],
    radius: f64,
) -> Result<NodeAnalysis, AnalysisError> {
    let index = KdTreeIndex::build(points);
    classify_nodes_with(&index, points, radius)
}

/// [`classify_nodes`] against a caller-provided range index.
pub fn classify_nodes_with<Q: RangeQuery + ?Sized>(
    index: &Q,
    points: &[IntersectionPoint],
    radius: f64,
) -> Result<NodeAnalysis, AnalysisError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(AnalysisError::InvalidRadius { radius });
    }
    if points.is_empty() {
        return Ok(NodeAnalysis::default());
    }

    let mut frequencies: HashMap<usize, usize> = HashMap::new();
    let mut centroids: BTreeSet<(i32, i32)> = BTreeSet::new();

    for point in points {
        let neighborhood = index.range_query(points, point.coords(), radius);
        // Self is always within radius 0 of itself.
        debug_assert!(!neighborhood.is_empty());
        *frequencies.entry(neighborhood.len()).or_insert(0) += 1;

        let n = neighborhood.len() as f64;
        let (sum_x, sum_y) = neighborhood.iter().fold((0.0f64, 0.0f64), |acc, &i| {
            (acc.0 + points[i].x as f64, acc.1 + points[i].y as f64)
        });
        centroids.insert((
            (sum_x / n).round() as i32,
            (sum_y / n).round() as i32,
        ));
    }

    Ok(NodeAnalysis {
        counts: NodeCounts::from_frequencies(&frequencies),
        centroids: centroids.into_iter().map(|(x, y)| [x, y]).collect(),
    })
}
