//! Runtime configuration and CLI parsing for the demo binary.
use crate::analyzer::AnalyzerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON report; stdout summary only when absent.
    pub json_out: Option<PathBuf>,
    /// Where to write the overlay PNG with detected fractures and nodes.
    pub overlay_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: AnalyzerParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <image> [options]\n       {program} --config <config.json>\n\n\
Options:\n  \
  --sensitivity <v>  edge-detection sensitivity, 0-255 scale (default 50)\n  \
  --radius <v>       intersection clustering radius in pixels (default 10)\n  \
  --json <path>      write the JSON report to <path>\n  \
  --overlay <path>   write an overlay PNG to <path>\n  \
  --no-text-mask     disable the text-suppression mask"
    )
}

/// Parse CLI arguments into a runtime config.
///
/// Either a single `--config file.json`, or an image path followed by
/// flag overrides.
pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    parse_args(program, std::env::args().skip(1))
}

fn parse_args<I: Iterator<Item = String>>(
    program: &str,
    mut args: I,
) -> Result<RuntimeConfig, String> {
    let first = args.next().ok_or_else(|| usage(program))?;
    if first == "--help" || first == "-h" {
        return Err(usage(program));
    }
    if first == "--config" {
        let path = args
            .next()
            .ok_or_else(|| format!("--config requires a path\n\n{}", usage(program)))?;
        return load_config(Path::new(&path));
    }

    let mut config = RuntimeConfig {
        input: PathBuf::from(first),
        output: OutputConfig::default(),
        params: AnalyzerParams::default(),
    };

    while let Some(flag) = args.next() {
        let mut value_for = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} requires a value\n\n{}", usage(program)))
        };
        match flag.as_str() {
            "--sensitivity" => {
                let raw = value_for("--sensitivity")?;
                config.params.sensitivity = raw
                    .parse()
                    .map_err(|e| format!("Invalid --sensitivity {raw}: {e}"))?;
            }
            "--radius" => {
                let raw = value_for("--radius")?;
                config.params.intersection_radius = raw
                    .parse()
                    .map_err(|e| format!("Invalid --radius {raw}: {e}"))?;
            }
            "--json" => config.output.json_out = Some(PathBuf::from(value_for("--json")?)),
            "--overlay" => config.output.overlay_out = Some(PathBuf::from(value_for("--overlay")?)),
            "--no-text-mask" => config.params.suppress_text = false,
            other => return Err(format!("Unknown option {other}\n\n{}", usage(program))),
        }
    }

    Ok(config)
}
