//! Image preprocessing ahead of edge detection.
//!
//! - Separable 5-tap Gaussian blur with clamped borders for denoising.
//! - Otsu threshold plus a 3×3 binary close to build a text-suppression
//!   mask: annotation strokes (labels, scale bars) form compact blobs that
//!   survive the close, while thin fracture traces do not, so masking on
//!   the closed foreground keeps the traces and drops solid lettering.
//!
//! All operations work on normalized `[0, 1]` intensities and produce
//! either `ImageF32` buffers or row-major `u8` masks (`0` / `255`).
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Normalised 5-tap Gaussian kernel `[1, 4, 6, 4, 1] / 16`.
const GAUSSIAN_5TAP: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Blur with the separable 5-tap Gaussian, clamping indices at borders.
pub fn gaussian_blur(src: &ImageF32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let radius = GAUSSIAN_5TAP.len() / 2;
    for y in 0..h {
        let row = src.row(y);
        let dst = horiz.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let idx = clamp_index(x as isize + k as isize - radius as isize, w);
                acc += tap * row[idx];
            }
            dst[x] = acc;
        }
    }

    for y in 0..h {
        let rows: Vec<&[f32]> = (0..GAUSSIAN_5TAP.len())
            .map(|k| horiz.row(clamp_index(y as isize + k as isize - radius as isize, h)))
            .collect();
        let dst = out.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                acc += tap * rows[k][x];
            }
            dst[x] = acc;
        }
    }

    out
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

/// Otsu's threshold over a 256-bin histogram of `[0, 1]` intensities.
///
/// Returns the normalized threshold maximizing between-class variance.
/// A flat image yields `0.5`.
pub fn otsu_threshold(src: &ImageF32) -> f32 {
    let mut hist = [0u32; 256];
    let total = src.w * src.h;
    if total == 0 {
        return 0.5;
    }
    for y in 0..src.h {
        for &v in src.row(y) {
            let bin = (v.clamp(0.0, 1.0) * 255.0) as usize;
            hist[bin.min(255)] += 1;
        }
    }

    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_t = 127usize;
    let mut best_var = -1.0f64;
    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;
    for (t, &count) in hist.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total as f64 - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let var = weight_bg * weight_fg * (mean_bg - mean_fg) * (mean_bg - mean_fg);
        if var > best_var {
            best_var = var;
            best_t = t;
        }
    }

    best_t as f32 / 255.0
}

/// Binarize: pixels above `thresh` become `255`, the rest `0`.
pub fn binarize(src: &ImageF32, thresh: f32) -> Vec<u8> {
    let mut mask = vec![0u8; src.w * src.h];
    for y in 0..src.h {
        let row = src.row(y);
        let base = y * src.w;
        for x in 0..src.w {
            if row[x] > thresh {
                mask[base + x] = 255;
            }
        }
    }
    mask
}

/// 3×3 binary dilation on a row-major `0`/`255` mask.
pub fn dilate3x3(mask: &[u8], w: usize, h: usize) -> Vec<u8> {
    let mut out = vec![0u8; w * h];
    if w == 0 || h == 0 {
        return out;
    }
    for y in 0..h {
        for x in 0..w {
            let mut any_set = false;
            'probe: for dy in -1isize..=1 {
                let ny = y as isize + dy;
                if ny < 0 || ny >= h as isize {
                    continue;
                }
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    if nx < 0 || nx >= w as isize {
                        continue;
                    }
                    if mask[ny as usize * w + nx as usize] != 0 {
                        any_set = true;
                        break 'probe;
                    }
                }
            }
            if any_set {
                out[y * w + x] = 255;
            }
        }
    }
    out
}

/// 3×3 binary erosion on a row-major `0`/`255` mask.
pub fn erode3x3(mask: &[u8], w: usize, h: usize) -> Vec<u8> {
    // Erosion is dilation of the complement.
    let inverted: Vec<u8> = mask.iter().map(|&v| 255 - v).collect();
    let dilated = dilate3x3(&inverted, w, h);
    dilated.iter().map(|&v| 255 - v).collect()
}

/// 3×3 binary close: dilation followed by erosion.
pub fn close3x3(mask: &[u8], w: usize, h: usize) -> Vec<u8> {
    erode3x3(&dilate3x3(mask, w, h), w, h)
}

/// Build the text-suppression mask for a blurred image.
///
/// Otsu-binarizes, closes small gaps so lettering becomes solid blobs, and
/// inverts: a `255` entry marks a pixel the segment extractor may use.
pub fn text_suppression_mask(blurred: &ImageF32) -> Vec<u8> {
    let thresh = otsu_threshold(blurred);
    let binary = binarize(blurred, thresh);
    let closed = close3x3(&binary, blurred.w, blurred.h);
    closed.iter().map(|&v| 255 - v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageF32, ImageViewMut};

    fn gradient_image(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            let row = img.row_mut(y);
            for (x, px) in row.iter_mut().enumerate() {
                *px = x as f32 / (w - 1) as f32;
            }
        }
        img
    }

    #[test]
    fn blur_preserves_constant_image() {
        let mut img = ImageF32::new(9, 9);
        img.data.fill(0.25);
        let blurred = gaussian_blur(&img);
        for &v in &blurred.data {
            assert!((v - 0.25).abs() < 1e-6, "constant image changed: {v}");
        }
    }

    #[test]
    fn blur_smooths_impulse() {
        let mut img = ImageF32::new(9, 9);
        img.set(4, 4, 1.0);
        let blurred = gaussian_blur(&img);
        let center = blurred.get(4, 4);
        assert!(center < 1.0 && center > 0.0);
        // Energy spreads but is conserved away from borders.
        let sum: f32 = blurred.data.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "blur lost energy: sum={sum}");
    }

    #[test]
    fn otsu_separates_bimodal_image() {
        let mut img = ImageF32::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                img.set(x, y, if x < 8 { 0.1 } else { 0.9 });
            }
        }
        let t = otsu_threshold(&img);
        assert!(t > 0.1 && t < 0.9, "threshold outside modes: {t}");
    }

    #[test]
    fn close_fills_single_pixel_hole() {
        let w = 8;
        let h = 8;
        let mut mask = vec![255u8; w * h];
        mask[3 * w + 3] = 0;
        let closed = close3x3(&mask, w, h);
        assert_eq!(closed[3 * w + 3], 255);
    }

    #[test]
    fn text_mask_drops_bright_blob() {
        let mut img = gradient_image(16, 16);
        // Solid bright block standing in for lettering.
        for y in 4..8 {
            for x in 4..8 {
                img.set(x, y, 1.0);
            }
        }
        let mask = text_suppression_mask(&img);
        assert_eq!(mask[5 * 16 + 5], 0, "blob interior should be masked out");
    }
}
