use fracture_analyzer::config;
use fracture_analyzer::image::{load_grayscale_image, write_json_file};
use fracture_analyzer::render::save_overlay;
use fracture_analyzer::{FractureAnalysis, FractureAnalyzer};
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "fracture_demo".to_string());
    let config = config::parse_cli(&program)?;

    let gray = load_grayscale_image(&config.input)?;
    let image = gray.as_view();

    let analyzer = FractureAnalyzer::new(config.params.clone());
    let analysis = analyzer
        .process(image)
        .map_err(|e| format!("Analysis failed: {e}"))?;

    print_text_summary(&analysis);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &analysis)?;
        println!("\nJSON report written to {}", path.display());
    }

    if let Some(path) = &config.output.overlay_out {
        save_overlay(path, &gray, &analysis)?;
        println!("Overlay written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(analysis: &FractureAnalysis) {
    let report = &analysis.report;
    println!("Fracture analysis");
    println!("  fractures: {}", report.fractures);
    println!("  X-nodes (4-way crossings): {}", report.nodes.x_nodes);
    println!("  Y-nodes (3-way junctions): {}", report.nodes.y_nodes);
    println!("  I-nodes (isolated endpoints): {}", report.nodes.i_nodes);
    println!("  raw intersections: {}", analysis.intersections.len());
    println!("  unique node centroids: {}", analysis.centroids.len());

    let t = &analysis.timings;
    println!(
        "\nTimings (ms): preprocess={:.3} edges={:.3} segments={:.3} intersect={:.3} topology={:.3} total={:.3}",
        t.preprocess_ms, t.edges_ms, t.segments_ms, t.intersect_ms, t.topology_ms, t.total_ms
    );
}
