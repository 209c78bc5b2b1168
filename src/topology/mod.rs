//! Topological classification of fracture intersections.
//!
//! Groups nearby intersection points into nodes via per-point closed-ball
//! neighborhood queries and classifies each node by connection count:
//! X-nodes (4-way crossings), Y-nodes (3-way junctions), I-nodes (isolated
//! endpoints). The mapping from physical junction degree to neighborhood
//! size is empirical and tuned by the clustering radius, so the radius is
//! a caller parameter end to end.
//!
//! The range index behind the neighborhood query is injectable through
//! [`RangeQuery`]; correctness only requires matching an exhaustive
//! pairwise-distance scan.

mod classify;
mod index;
mod kdtree;

pub use classify::{classify_nodes, classify_nodes_with, NodeAnalysis, NodeCounts};
pub use index::{KdTreeIndex, LinearScan, RangeQuery};
pub use kdtree::KdTree;
