use super::*;
use crate::edges::sobel_gradients;
use crate::image::{ImageF32, ImageViewMut};

fn step_image(width: usize, height: usize, split_x: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        let row = img.row_mut(y);
        for x in split_x..width {
            row[x] = 1.0;
        }
    }
    img
}

#[test]
fn extractor_finds_vertical_fracture() {
    let img = step_image(64, 64, 32);
    let grad = sobel_gradients(&img);
    let options = SegmentOptions {
        mag_thresh: 0.1,
        min_length: 8.0,
        ..Default::default()
    };
    let segs = extract_segments(&grad, None, &options);
    assert!(
        !segs.is_empty(),
        "expected at least one segment on a vertical edge"
    );
    let longest = segs
        .iter()
        .max_by(|a, b| a.length().partial_cmp(&b.length()).unwrap())
        .unwrap();
    let dir = longest.direction();
    assert!(
        dir[1].abs() > dir[0].abs(),
        "expected vertical-oriented segment, got dir={dir:?}"
    );
    assert!(
        longest.length() >= 16.0,
        "expected a long trace, got len={}",
        longest.length()
    );
}

#[test]
fn extractor_rejects_flat_image() {
    let img = ImageF32::new(32, 32);
    let grad = sobel_gradients(&img);
    let segs = extract_segments(&grad, None, &SegmentOptions::default());
    assert!(
        segs.is_empty(),
        "no segments should be detected in a flat image, got {segs:?}"
    );
}

#[test]
fn mask_excludes_region_from_extraction() {
    let img = step_image(64, 64, 32);
    let grad = sobel_gradients(&img);
    let mask = vec![0u8; 64 * 64];
    let options = SegmentOptions {
        mag_thresh: 0.1,
        min_length: 8.0,
        ..Default::default()
    };
    let segs = extract_segments(&grad, Some(&mask), &options);
    assert!(segs.is_empty(), "all-zero mask must suppress extraction");
}

#[test]
fn min_length_gate_filters_short_regions() {
    let img = step_image(64, 64, 32);
    let grad = sobel_gradients(&img);
    let options = SegmentOptions {
        mag_thresh: 0.1,
        min_length: 1000.0,
        ..Default::default()
    };
    let segs = extract_segments(&grad, None, &options);
    assert!(segs.is_empty(), "no segment can exceed the image diagonal");
}

#[test]
fn segment_ids_are_sequential() {
    let img = step_image(128, 64, 64);
    let grad = sobel_gradients(&img);
    let options = SegmentOptions {
        mag_thresh: 0.1,
        min_length: 8.0,
        ..Default::default()
    };
    let segs = extract_segments(&grad, None, &options);
    for (i, seg) in segs.iter().enumerate() {
        assert_eq!(seg.id, SegmentId(i as u32));
    }
}
