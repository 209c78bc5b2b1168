//! Overlay rendering of analysis results.
//!
//! Draws detected fracture segments (green) and node centroids (red) over
//! the grayscale input and writes the result as a PNG, for visual
//! inspection of a run.
use crate::analyzer::FractureAnalysis;
use crate::image::io::ensure_parent_dir;
use crate::image::GrayImageU8;
use image::{Rgb, RgbImage};
use std::path::Path;

const FRACTURE_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const NODE_COLOR: Rgb<u8> = Rgb([220, 40, 40]);

/// Compose the overlay image in memory.
pub fn render_overlay(gray: &GrayImageU8, analysis: &FractureAnalysis) -> RgbImage {
    let w = gray.width() as u32;
    let h = gray.height() as u32;
    let mut out = RgbImage::new(w, h);
    for (y, row) in gray.bytes().chunks(gray.width().max(1)).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgb([v, v, v]));
        }
    }

    for segment in &analysis.segments {
        draw_line(
            &mut out,
            [segment.p0[0] as i64, segment.p0[1] as i64],
            [segment.p1[0] as i64, segment.p1[1] as i64],
            FRACTURE_COLOR,
        );
    }

    for &[cx, cy] in &analysis.centroids {
        draw_marker(&mut out, cx as i64, cy as i64, NODE_COLOR);
    }

    out
}

/// Render and save the overlay PNG, creating parent directories.
pub fn save_overlay(
    path: &Path,
    gray: &GrayImageU8,
    analysis: &FractureAnalysis,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    render_overlay(gray, analysis)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Integer Bresenham line, clipped to the image bounds.
fn draw_line(img: &mut RgbImage, from: [i64; 2], to: [i64; 2], color: Rgb<u8>) {
    let (mut x, mut y) = (from[0], from[1]);
    let dx = (to[0] - x).abs();
    let dy = -(to[1] - y).abs();
    let sx = if x < to[0] { 1 } else { -1 };
    let sy = if y < to[1] { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel_checked(img, x, y, color);
        if x == to[0] && y == to[1] {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// 3×3 square marker at a node centroid.
fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, color: Rgb<u8>) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            put_pixel_checked(img, cx + dx, cy + dy, color);
        }
    }
}

#[inline]
fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
