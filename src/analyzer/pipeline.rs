use super::params::AnalyzerParams;
use crate::edges::detect_edges;
use crate::error::AnalysisError;
use crate::image::ImageU8;
use crate::intersect::{find_intersections, IntersectionPoint};
use crate::preprocess::{gaussian_blur, text_suppression_mask};
use crate::segments::{extract_segments, Segment};
use crate::topology::{classify_nodes, NodeCounts};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Final counts reported to the caller, matching the analysis contract:
/// total fracture count plus the three node classes.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct AnalysisReport {
    pub fractures: usize,
    #[serde(flatten)]
    pub nodes: NodeCounts,
}

/// Wall-clock cost of each pipeline stage, in milliseconds.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageTimings {
    pub preprocess_ms: f64,
    pub edges_ms: f64,
    pub segments_ms: f64,
    pub intersect_ms: f64,
    pub topology_ms: f64,
    pub total_ms: f64,
}

/// Full analysis output: the report plus the intermediate artifacts a
/// renderer or tooling may want (segments, raw intersection points,
/// deduplicated node centroids).
#[derive(Clone, Debug, Serialize)]
pub struct FractureAnalysis {
    pub report: AnalysisReport,
    pub segments: Vec<Segment>,
    pub intersections: Vec<IntersectionPoint>,
    pub centroids: Vec<[i32; 2]>,
    pub timings: StageTimings,
}

/// Fracture analyzer orchestrating the detection and topology pipeline.
///
/// Stages: Gaussian blur → text-suppression mask → Canny-style edges →
/// segment extraction → pairwise intersections → node classification.
/// One call runs to completion on the calling thread; the analyzer keeps
/// no state between calls beyond its parameters.
pub struct FractureAnalyzer {
    params: AnalyzerParams,
}

impl FractureAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.params.sensitivity = sensitivity;
    }

    pub fn set_intersection_radius(&mut self, radius: f64) {
        self.params.intersection_radius = radius;
    }

    /// Run the full pipeline on a grayscale image.
    ///
    /// Fails only on invalid parameters or malformed intermediate data;
    /// an image with no detectable fractures yields a zero report.
    pub fn process(&self, gray: ImageU8<'_>) -> Result<FractureAnalysis, AnalysisError> {
        // Reject a bad radius before doing any pixel work.
        let radius = self.params.intersection_radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(AnalysisError::InvalidRadius { radius });
        }

        let t0 = Instant::now();
        let mut timings = StageTimings::default();

        // 1) Denoise + text mask.
        let stage = Instant::now();
        let normalized = gray.to_f32();
        let blurred = gaussian_blur(&normalized);
        let text_mask = self
            .params
            .suppress_text
            .then(|| text_suppression_mask(&blurred));
        timings.preprocess_ms = stage.elapsed().as_secs_f64() * 1000.0;

        // 2) Edge detection.
        let stage = Instant::now();
        let (low, high) = self.params.hysteresis_thresholds();
        let edges = detect_edges(&blurred, low, high);
        timings.edges_ms = stage.elapsed().as_secs_f64() * 1000.0;
        if edges.edge_count() == 0 {
            debug!("FractureAnalyzer::process no edge pixels above thresholds");
        }

        // 3) Segment extraction on edge pixels, honoring the text mask.
        let stage = Instant::now();
        let grow_mask = combine_masks(&edges.mask, text_mask.as_deref());
        let mut segment_options = self.params.segments;
        segment_options.mag_thresh = low;
        let segments = extract_segments(&edges.grad, Some(&grow_mask), &segment_options);
        timings.segments_ms = stage.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "FractureAnalyzer::process segments={} edge_pixels={}",
            segments.len(),
            edges.edge_count()
        );

        // 4) Pairwise intersections.
        let stage = Instant::now();
        let intersections = find_intersections(&segments)?;
        timings.intersect_ms = stage.elapsed().as_secs_f64() * 1000.0;

        // 5) Node classification.
        let stage = Instant::now();
        let analysis = classify_nodes(&intersections, radius)?;
        timings.topology_ms = stage.elapsed().as_secs_f64() * 1000.0;
        timings.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "FractureAnalyzer::process fractures={} intersections={} nodes: X={} Y={} I={}",
            segments.len(),
            intersections.len(),
            analysis.counts.x_nodes,
            analysis.counts.y_nodes,
            analysis.counts.i_nodes
        );

        Ok(FractureAnalysis {
            report: AnalysisReport {
                fractures: segments.len(),
                nodes: analysis.counts,
            },
            segments,
            intersections,
            centroids: analysis.centroids,
            timings,
        })
    }
}

/// Intersect the edge mask with an optional suppression mask.
fn combine_masks(edge_mask: &[u8], text_mask: Option<&[u8]>) -> Vec<u8> {
    match text_mask {
        None => edge_mask.to_vec(),
        Some(text) => edge_mask
            .iter()
            .zip(text.iter())
            .map(|(&e, &t)| if e != 0 && t != 0 { 255 } else { 0 })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerParams;

    #[test]
    fn empty_image_yields_zero_report() {
        let data = vec![0u8; 64 * 64];
        let image = ImageU8 {
            w: 64,
            h: 64,
            stride: 64,
            data: &data,
        };
        let analyzer = FractureAnalyzer::new(AnalyzerParams::default());
        let analysis = analyzer.process(image).unwrap();
        assert_eq!(analysis.report.fractures, 0);
        assert_eq!(analysis.report.nodes, NodeCounts::default());
        assert!(analysis.intersections.is_empty());
    }

    #[test]
    fn negative_radius_is_rejected_before_pixel_work() {
        let data = vec![0u8; 16];
        let image = ImageU8 {
            w: 4,
            h: 4,
            stride: 4,
            data: &data,
        };
        let analyzer = FractureAnalyzer::new(AnalyzerParams {
            intersection_radius: -3.0,
            ..Default::default()
        });
        let err = analyzer.process(image).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidRadius { radius: -3.0 });
    }

    #[test]
    fn combine_masks_requires_both_set() {
        let edges = [255, 0, 255, 255];
        let text = [255, 255, 0, 255];
        assert_eq!(combine_masks(&edges, Some(&text)), vec![255, 0, 0, 255]);
        assert_eq!(combine_masks(&edges, None), edges.to_vec());
    }
}
