//! Parameter types configuring the analysis pipeline.
//!
//! Two knobs matter most and are the ones an interactive shell exposes:
//! `sensitivity` drives the edge detector's hysteresis thresholds, and
//! `intersection_radius` controls how close two intersection points must
//! be to belong to the same topological node.

use crate::segments::SegmentOptions;
use serde::Deserialize;

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Edge-detection sensitivity on the conventional 0–255 gradient
    /// scale. The hysteresis thresholds derive from it: low =
    /// `sensitivity`, high = `3 * sensitivity` (both normalized
    /// internally).
    pub sensitivity: f32,
    /// Clustering radius in pixels for grouping intersection points into
    /// nodes. Must be non-negative; zero groups only exact coincidences.
    pub intersection_radius: f64,
    /// Whether to build and apply the text-suppression mask before edge
    /// detection.
    pub suppress_text: bool,
    /// Segment extractor knobs. `mag_thresh` is overridden by the
    /// normalized sensitivity at run time.
    pub segments: SegmentOptions,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            sensitivity: 50.0,
            intersection_radius: 10.0,
            suppress_text: true,
            segments: SegmentOptions::default(),
        }
    }
}

impl AnalyzerParams {
    /// Hysteresis thresholds normalized to the `[0, 1]` intensity scale.
    pub(crate) fn hysteresis_thresholds(&self) -> (f32, f32) {
        let low = self.sensitivity / 255.0;
        (low, low * 3.0)
    }
}
