/// Light background buffer standing in for a scanned outcrop image.
pub fn light_background(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![220u8; width * height]
}

/// Draw a dark fracture stroke of ~3 px thickness between two points.
pub fn draw_stroke(img: &mut [u8], width: usize, from: (i64, i64), to: (i64, i64)) {
    let height = (img.len() / width) as i64;
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        for oy in -1..=1i64 {
            for ox in -1..=1i64 {
                let px = x + ox;
                let py = y + oy;
                if px >= 0 && py >= 0 && px < width as i64 && py < height {
                    img[py as usize * width + px as usize] = 30;
                }
            }
        }
        if x == to.0 && y == to.1 {
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
