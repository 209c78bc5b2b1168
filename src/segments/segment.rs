use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Identifier referencing a fracture segment within one analysis pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// Detected fracture trace as an ordered pair of endpoints in pixel space.
///
/// Endpoints are immutable once produced; derived quantities are cached
/// lazily. Coordinates are `f64` so the intersection math downstream runs
/// at full precision regardless of the detector's output scale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub p0: [f64; 2],
    pub p1: [f64; 2],
    /// Average gradient magnitude over the supporting region.
    pub avg_mag: f32,
    /// Saliency proxy: `length * avg_mag`.
    pub strength: f32,
    #[serde(skip)]
    length: OnceLock<f64>,
    #[serde(skip)]
    direction: OnceLock<[f64; 2]>,
}

impl Segment {
    pub fn new(id: SegmentId, p0: [f64; 2], p1: [f64; 2], avg_mag: f32, strength: f32) -> Self {
        Self {
            id,
            p0,
            p1,
            avg_mag,
            strength,
            length: OnceLock::new(),
            direction: OnceLock::new(),
        }
    }

    /// Segment from a flat `(x1, y1, x2, y2)` coordinate tuple.
    pub fn from_coords(id: SegmentId, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(id, [x1, y1], [x2, y2], 0.0, 0.0)
    }

    pub fn midpoint(&self) -> [f64; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    fn compute_length(&self) -> f64 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| self.compute_length())
    }

    fn compute_direction(&self) -> [f64; 2] {
        let len = self.length();
        if len > 0.0 {
            [
                (self.p1[0] - self.p0[0]) / len,
                (self.p1[1] - self.p0[1]) / len,
            ]
        } else {
            [0.0, 0.0]
        }
    }

    /// Unit direction from `p0` to `p1`, zero for degenerate segments.
    pub fn direction(&self) -> [f64; 2] {
        *self.direction.get_or_init(|| self.compute_direction())
    }

    /// True when both endpoints carry finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.p0.iter().chain(self.p1.iter()).all(|c| c.is_finite())
    }
}
