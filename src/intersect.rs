//! Pairwise bounded segment intersection.
//!
//! For every unordered pair of detected fracture segments, computes the
//! intersection of the two *bounded* segments (not their infinite
//! extensions) with the standard determinant formula, and keeps the point
//! only when it lies inside both segments' coordinate ranges on both axes.
//!
//! Precision note: parallelism is decided by an exact `denom == 0.0` test
//! with no epsilon, so near-parallel segments may or may not register an
//! intersection depending on floating-point rounding. Accepted points are
//! truncated (not rounded) to integer pixel coordinates.
//!
//! The pair scan is O(n²) with no spatial pre-filter; pairs are
//! independent, so the outer loop parallelizes freely.
use crate::error::AnalysisError;
use crate::segments::Segment;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Intersection of two fracture segments, in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub x: i32,
    pub y: i32,
}

impl IntersectionPoint {
    /// Coordinates as a float pair for distance computations.
    #[inline]
    pub fn coords(&self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &IntersectionPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Bounded intersection of two segments.
///
/// Returns `None` for parallel or collinear segments (`denom == 0.0`) and
/// for line intersections falling outside either segment's bounds. The
/// containment test is inclusive, so segments sharing an exact endpoint
/// report that endpoint.
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<IntersectionPoint> {
    let [x1, y1] = a.p0;
    let [x2, y2] = a.p1;
    let [x3, y3] = b.p0;
    let [x4, y4] = b.p1;

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }

    let det_a = x1 * y2 - y1 * x2;
    let det_b = x3 * y4 - y3 * x4;
    let px = (det_a * (x3 - x4) - (x1 - x2) * det_b) / denom;
    let py = (det_a * (y3 - y4) - (y1 - y2) * det_b) / denom;

    let within = |lo: f64, hi: f64, v: f64| v >= lo.min(hi) && v <= lo.max(hi);
    if within(x1, x2, px) && within(y1, y2, py) && within(x3, x4, px) && within(y3, y4, py) {
        Some(IntersectionPoint {
            x: px as i32,
            y: py as i32,
        })
    } else {
        None
    }
}

/// Compute all pairwise bounded intersections of `segments`.
///
/// Emission follows pair enumeration order (`i` ascending, then `j`), but
/// callers must not rely on it. Zero or one segment yields an empty list.
/// Fails fast on segments with non-finite coordinates.
pub fn find_intersections(segments: &[Segment]) -> Result<Vec<IntersectionPoint>, AnalysisError> {
    if let Some(index) = segments.iter().position(|s| !s.is_finite()) {
        return Err(AnalysisError::NonFiniteSegment { index });
    }
    if segments.len() < 2 {
        return Ok(Vec::new());
    }

    #[cfg(feature = "parallel")]
    let points = (0..segments.len() - 1)
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = &segments[i];
            segments[i + 1..]
                .iter()
                .filter_map(move |b| segment_intersection(a, b))
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let points = {
        let mut points = Vec::new();
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if let Some(p) = segment_intersection(a, b) {
                    points.push(p);
                }
            }
        }
        points
    };

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::{Segment, SegmentId};

    fn seg(id: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(SegmentId(id), x1, y1, x2, y2)
    }

    #[test]
    fn x_crossing_meets_at_center() {
        let a = seg(0, 0.0, 0.0, 10.0, 10.0);
        let b = seg(1, 0.0, 10.0, 10.0, 0.0);
        let points = find_intersections(&[a, b]).unwrap();
        assert_eq!(points, vec![IntersectionPoint { x: 5, y: 5 }]);
    }

    #[test]
    fn parallel_segments_never_intersect() {
        let a = seg(0, 0.0, 0.0, 10.0, 0.0);
        let b = seg(1, 0.0, 5.0, 10.0, 5.0);
        assert!(segment_intersection(&a, &b).is_none());
    }

    #[test]
    fn collinear_overlapping_segments_report_nothing() {
        // Same infinite line, overlapping ranges: denom == 0 wins.
        let a = seg(0, 0.0, 0.0, 10.0, 0.0);
        let b = seg(1, 5.0, 0.0, 15.0, 0.0);
        assert!(segment_intersection(&a, &b).is_none());
    }

    #[test]
    fn shared_endpoint_is_reported() {
        let a = seg(0, 0.0, 0.0, 5.0, 5.0);
        let b = seg(1, 5.0, 5.0, 10.0, 0.0);
        let p = segment_intersection(&a, &b).expect("shared endpoint");
        assert_eq!(p, IntersectionPoint { x: 5, y: 5 });
    }

    #[test]
    fn off_segment_line_crossing_is_rejected() {
        // Infinite lines cross at (5, 5), but b stops short of it.
        let a = seg(0, 0.0, 0.0, 10.0, 10.0);
        let b = seg(1, 0.0, 10.0, 4.0, 6.0);
        assert!(segment_intersection(&a, &b).is_none());
    }

    #[test]
    fn coordinates_truncate_toward_zero() {
        // Crossing at (4.5, 4.5) must report (4, 4), not (5, 5).
        let a = seg(0, 0.0, 0.0, 9.0, 9.0);
        let b = seg(1, 0.0, 9.0, 9.0, 0.0);
        let p = segment_intersection(&a, &b).expect("crossing");
        assert_eq!(p, IntersectionPoint { x: 4, y: 4 });
    }

    #[test]
    fn degenerate_inputs_yield_empty() {
        assert!(find_intersections(&[]).unwrap().is_empty());
        let single = [seg(0, 0.0, 0.0, 1.0, 1.0)];
        assert!(find_intersections(&single).unwrap().is_empty());
    }

    #[test]
    fn non_finite_segment_fails_fast() {
        let a = seg(0, 0.0, 0.0, 10.0, 10.0);
        let b = seg(1, f64::NAN, 0.0, 1.0, 1.0);
        let err = find_intersections(&[a, b]).unwrap_err();
        assert_eq!(err, AnalysisError::NonFiniteSegment { index: 1 });
    }

    #[test]
    fn output_bounded_by_pair_count() {
        // Star of 4 segments through one junction: C(4,2) = 6 raw points.
        let segs = [
            seg(0, 0.0, 5.0, 10.0, 5.0),
            seg(1, 5.0, 0.0, 5.0, 10.0),
            seg(2, 0.0, 0.0, 10.0, 10.0),
            seg(3, 0.0, 10.0, 10.0, 0.0),
        ];
        let points = find_intersections(&segs).unwrap();
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.x == 5 && p.y == 5));
    }

    #[test]
    fn accepted_points_lie_in_both_bounding_boxes() {
        let segs = [
            seg(0, 1.0, 2.0, 9.0, 8.0),
            seg(1, 2.0, 9.0, 8.0, 1.0),
            seg(2, 0.0, 5.0, 10.0, 5.5),
        ];
        let points = find_intersections(&segs).unwrap();
        assert!(points.len() <= 3);
        for p in &points {
            let inside = segs.iter().filter(|s| {
                let (xf, yf) = (p.x as f64, p.y as f64);
                // Truncation can push a point at most one pixel below the
                // exact location, so widen the box by one.
                xf >= s.p0[0].min(s.p1[0]).floor() - 1.0
                    && xf <= s.p0[0].max(s.p1[0]).ceil()
                    && yf >= s.p0[1].min(s.p1[1]).floor() - 1.0
                    && yf <= s.p0[1].max(s.p1[1]).ceil()
            });
            assert!(inside.count() >= 2, "point {p:?} outside generating pair");
        }
    }
}
