mod common;

use common::synthetic_image::{draw_stroke, light_background};
use fracture_analyzer::image::ImageU8;
use fracture_analyzer::{
    classify_nodes, find_intersections, AnalyzerParams, FractureAnalyzer, IntersectionPoint,
};

#[test]
fn crossing_strokes_produce_fractures_and_a_junction() {
    let width = 128usize;
    let height = 128usize;
    let mut buffer = light_background(width, height);
    draw_stroke(&mut buffer, width, (16, 16), (112, 112));
    draw_stroke(&mut buffer, width, (16, 112), (112, 16));

    let image = ImageU8 {
        w: width,
        h: height,
        stride: width,
        data: &buffer,
    };

    let params = AnalyzerParams {
        sensitivity: 50.0,
        intersection_radius: 10.0,
        // The synthetic scene has no lettering; skip the mask so thin
        // strokes are not nibbled at their flanks.
        suppress_text: false,
        ..Default::default()
    };
    let analyzer = FractureAnalyzer::new(params);
    let analysis = analyzer.process(image).expect("valid parameters");

    assert!(
        analysis.report.fractures >= 2,
        "expected both strokes detected, got {}",
        analysis.report.fractures
    );
    assert_eq!(analysis.report.fractures, analysis.segments.len());
    assert!(
        !analysis.intersections.is_empty(),
        "crossing strokes must intersect"
    );
    let near_center = analysis.intersections.iter().any(|p| {
        let d = (((p.x - 64).pow(2) + (p.y - 64).pow(2)) as f64).sqrt();
        d <= 16.0
    });
    assert!(
        near_center,
        "no intersection near the stroke crossing at (64, 64): {:?}",
        analysis.intersections
    );
    assert!(
        !analysis.centroids.is_empty() && analysis.centroids.len() <= analysis.intersections.len(),
        "centroid dedup should collapse crossings, got {} centroids from {} points",
        analysis.centroids.len(),
        analysis.intersections.len()
    );
}

#[test]
fn blank_image_reports_nothing() {
    let width = 96usize;
    let height = 96usize;
    let buffer = light_background(width, height);
    let image = ImageU8 {
        w: width,
        h: height,
        stride: width,
        data: &buffer,
    };

    let analyzer = FractureAnalyzer::new(AnalyzerParams::default());
    let analysis = analyzer.process(image).expect("valid parameters");
    assert_eq!(analysis.report.fractures, 0);
    assert_eq!(analysis.report.nodes.x_nodes, 0);
    assert_eq!(analysis.report.nodes.y_nodes, 0);
    assert_eq!(analysis.report.nodes.i_nodes, 0);
}

#[test]
fn core_round_trip_with_zero_radius_isolates_every_point() {
    use fracture_analyzer::segments::{Segment, SegmentId};

    // Three well-separated crossings.
    let segments = vec![
        Segment::from_coords(SegmentId(0), 0.0, 0.0, 10.0, 10.0),
        Segment::from_coords(SegmentId(1), 0.0, 10.0, 10.0, 0.0),
        Segment::from_coords(SegmentId(2), 100.0, 0.0, 110.0, 10.0),
        Segment::from_coords(SegmentId(3), 100.0, 10.0, 110.0, 0.0),
        Segment::from_coords(SegmentId(4), 200.0, 0.0, 210.0, 10.0),
        Segment::from_coords(SegmentId(5), 200.0, 10.0, 210.0, 0.0),
    ];
    let points = find_intersections(&segments).expect("finite segments");
    let distinct: std::collections::HashSet<IntersectionPoint> =
        points.iter().copied().collect();
    assert_eq!(distinct.len(), points.len(), "crossings are distinct");

    let analysis = classify_nodes(&points, 0.0).expect("valid radius");
    assert_eq!(analysis.counts.i_nodes, points.len());
    assert_eq!(analysis.counts.x_nodes, 0);
    assert_eq!(analysis.counts.y_nodes, 0);
}
