use serde::Deserialize;

/// Knobs for the region-growing segment extractor.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Minimum gradient magnitude for a pixel to seed or join a region.
    pub mag_thresh: f32,
    /// Orientation tolerance (degrees) for region growth.
    pub angle_tol_deg: f32,
    /// Minimum endpoint distance for a region to count as a fracture.
    /// Mirrors the min-line-length gate of Hough-style detectors.
    pub min_length: f32,
    /// Minimum number of supporting pixels per region.
    pub min_region_size: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            mag_thresh: 0.1,
            angle_tol_deg: 22.5,
            min_length: 30.0,
            min_region_size: 12,
        }
    }
}
