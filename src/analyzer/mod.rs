//! Fracture analyzer orchestrating the detection → topology pipeline.
//!
//! Overview
//! - Normalizes the grayscale input and denoises it with a separable
//!   Gaussian blur.
//! - Builds an optional text-suppression mask (Otsu threshold + binary
//!   close) so lettering and annotations do not masquerade as fractures.
//! - Detects edges with Sobel gradients, non-maximum suppression, and
//!   two-threshold hysteresis driven by the `sensitivity` parameter.
//! - Extracts fracture segments with the region-growing extractor.
//! - Runs the analysis core: pairwise bounded intersections, then
//!   per-point neighborhood classification into X/Y/I nodes using the
//!   `intersection_radius` parameter.
//!
//! Modules
//! - [`params`] – configuration types used by the analyzer and CLI.
//! - `pipeline` – the [`FractureAnalyzer`] implementation and result types.

pub mod params;
mod pipeline;

pub use params::AnalyzerParams;
pub use pipeline::{AnalysisReport, FractureAnalysis, FractureAnalyzer, StageTimings};
