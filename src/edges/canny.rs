//! Canny-style edge extraction: direction-aligned non-maximum suppression
//! followed by two-threshold hysteresis.
//!
//! For each pixel, NMS suppresses responses that are not strictly greater
//! than their two neighbors along the quantized gradient direction. The
//! survivors are then linked: pixels at or above the high threshold seed a
//! flood fill that keeps 8-connected survivors at or above the low
//! threshold. The result is a thin binary edge mask.
use super::grad::{sobel_gradients, Grad};
use crate::image::{ImageF32, ImageView};

const TAN_22_5_DEG: f32 = 0.41421356237;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Gradient buffers plus the binary edge mask (`0` / `255`, row-major).
pub struct CannyEdges {
    pub grad: Grad,
    pub mask: Vec<u8>,
}

impl CannyEdges {
    /// Number of pixels marked as edges.
    pub fn edge_count(&self) -> usize {
        self.mask.iter().filter(|&&v| v != 0).count()
    }
}

fn nms_survivors(grad: &Grad, low: f32) -> Vec<u8> {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut survivors = vec![0u8; w * h];
    if w < 3 || h < 3 {
        return survivors;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag <= neighbor1 || mag <= neighbor2 {
                continue;
            }

            survivors[y * w + x] = 1;
        }
    }

    survivors
}

/// Detect edges with hysteresis thresholds `low` and `high`.
///
/// Thresholds apply to the Sobel magnitude of the (normalized) input.
/// Callers conventionally use `high = 3 * low`, mirroring the sensitivity
/// convention of the analyzer parameters.
pub fn detect_edges(l: &ImageF32, low: f32, high: f32) -> CannyEdges {
    let grad = sobel_gradients(l);
    let w = grad.gx.w;
    let h = grad.gx.h;
    let survivors = nms_survivors(&grad, low);

    let mut mask = vec![0u8; w * h];
    let mut stack: Vec<usize> = Vec::with_capacity(256);
    for idx in 0..w * h {
        if survivors[idx] == 0 || mask[idx] != 0 {
            continue;
        }
        let x = idx % w;
        let y = idx / w;
        if grad.mag.get(x, y) < high {
            continue;
        }

        // Strong seed: walk connected weak survivors.
        mask[idx] = 255;
        stack.push(idx);
        while let Some(cur) = stack.pop() {
            let cx = (cur % w) as isize;
            let cy = (cur / w) as isize;
            for (dx, dy) in NEIGH_OFFSETS {
                let nx = cx + dx;
                let ny = cy + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if survivors[nidx] != 0 && mask[nidx] == 0 {
                    mask[nidx] = 255;
                    stack.push(nidx);
                }
            }
        }
    }

    CannyEdges { grad, mask }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageF32, ImageViewMut};

    // A 1-px dark line on a bright field: its two flank responses are
    // separated by a zero-gradient column, so NMS has no magnitude ties.
    fn line_image(width: usize, height: usize, line_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in 0..height {
            let row = img.row_mut(y);
            for x in 0..width {
                row[x] = if x == line_x { 0.0 } else { 1.0 };
            }
        }
        img
    }

    #[test]
    fn thin_line_survives_hysteresis() {
        let img = line_image(16, 16, 8);
        let edges = detect_edges(&img, 0.2, 0.6);
        assert!(edges.edge_count() > 0, "expected edge pixels on the line");
        // Edge pixels concentrate around the line column.
        for (idx, &v) in edges.mask.iter().enumerate() {
            if v != 0 {
                let x = idx % 16;
                assert!((7..=9).contains(&x), "edge pixel far from line: x={x}");
            }
        }
    }

    #[test]
    fn flat_image_yields_no_edges() {
        let img = ImageF32::new(16, 16);
        let edges = detect_edges(&img, 0.05, 0.15);
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn high_threshold_gates_weak_edges() {
        let img = line_image(16, 16, 8);
        let edges = detect_edges(&img, 0.2, 1e6);
        assert_eq!(
            edges.edge_count(),
            0,
            "no seed should pass an unreachable high threshold"
        );
    }
}
