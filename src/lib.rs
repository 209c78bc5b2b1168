#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod config;
pub mod error;
pub mod image;
pub mod intersect;
pub mod topology;

// “Expert” modules – still public, but considered unstable internals.
pub mod edges;
pub mod preprocess;
pub mod render;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + results.
pub use crate::analyzer::{AnalysisReport, AnalyzerParams, FractureAnalysis, FractureAnalyzer};
pub use crate::error::AnalysisError;

// Analysis core, usable without the image pipeline.
pub use crate::intersect::{find_intersections, segment_intersection, IntersectionPoint};
pub use crate::topology::{classify_nodes, classify_nodes_with, NodeAnalysis, NodeCounts};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fracture_analyzer::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let analyzer = FractureAnalyzer::new(AnalyzerParams {
///     sensitivity: 50.0,
///     intersection_radius: 10.0,
///     ..Default::default()
/// });
///
/// let analysis = analyzer.process(img).expect("valid parameters");
/// println!(
///     "fractures={} X={} Y={} I={}",
///     analysis.report.fractures,
///     analysis.report.nodes.x_nodes,
///     analysis.report.nodes.y_nodes,
///     analysis.report.nodes.i_nodes,
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::analyzer::{AnalysisReport, AnalyzerParams, FractureAnalysis, FractureAnalyzer};
    pub use crate::image::ImageU8;
}
