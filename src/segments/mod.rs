//! Fracture segment extraction from the edge-gradient field.
//!
//! This module implements a lightweight, edge-based line-segment extractor
//! in the LSD family, used here as the fracture detector:
//!
//! - Region growing from seeds using orientation consistency: pixels whose
//!   gradient orientation lies within a tolerance of the seed orientation
//!   are grown into a region, enforcing a minimum gradient magnitude.
//! - PCA line fitting: the region's pixel coordinates are summarized
//!   online and a 2×2 covariance matrix is eigendecomposed for the
//!   principal direction.
//! - Endpoint projection: region pixels projected onto the principal axis
//!   give the segment endpoints.
//! - Significance tests: minimum region size, minimum length (standing in
//!   for a Hough detector's min-line-length gate), and a minimum fraction
//!   of orientation-aligned pixels.
//!
//! Orientation is taken modulo π; a fracture trace has no preferred
//! direction. An optional mask restricts growth, which the pipeline uses
//! to combine the Canny edge mask with the text-suppression mask.
//!
//! Complexity: region growing visits each pixel at most once, O(W·H);
//! fitting is linear in region size.

mod extractor;
mod options;
mod segment;

pub use options::SegmentOptions;
pub use segment::{Segment, SegmentId};

use crate::edges::Grad;

/// Extract fracture segments from a gradient field.
///
/// `mask`, when present, is a row-major `0`/`255` buffer; zero entries are
/// excluded from seeding and growth.
pub fn extract_segments(grad: &Grad, mask: Option<&[u8]>, options: &SegmentOptions) -> Vec<Segment> {
    extractor::FractureExtractor::new(grad, mask, options).extract()
}

#[cfg(test)]
mod tests;
