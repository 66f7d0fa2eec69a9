use std::path::{Path, PathBuf};

use anyhow::Context;
use overlay_core::prelude::ModelComplexity;
use overlay_runtime::prelude::RuntimeConfig;
use serde::Deserialize;

use crate::cli::AppArgs;

const DEFAULT_CONFIG_NAME: &str = "marker-demo.toml";
const DEFAULT_WINDOW_TITLE: &str = "Marker Hand Overlay";

/// Fully resolved demo configuration: runtime tunables plus app chrome.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub window_title: String,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Default)]
struct DemoConfigFile {
    target_descriptor: Option<PathBuf>,
    detection_threshold: Option<f32>,
    seed: Option<u64>,
    predictor: Option<PredictorSection>,
    ui: Option<UiSection>,
}

#[derive(Debug, Deserialize, Default)]
struct PredictorSection {
    max_hands: Option<u32>,
    complexity: Option<ModelComplexity>,
    min_detection_confidence: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct UiSection {
    title: Option<String>,
}

/// Resolution order: built-in defaults, then the config file, then CLI flags.
pub fn load(args: &AppArgs) -> anyhow::Result<DemoConfig> {
    let file = match &args.config {
        Some(path) => from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_NAME);
            if default.exists() {
                from_path(default).unwrap_or_default()
            } else {
                DemoConfigFile::default()
            }
        }
    };
    Ok(resolve(file, args))
}

fn from_path(path: &Path) -> anyhow::Result<DemoConfigFile> {
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

fn resolve(file: DemoConfigFile, args: &AppArgs) -> DemoConfig {
    let mut runtime = RuntimeConfig::default();
    if let Some(path) = file.target_descriptor {
        runtime.tracking.target_descriptor = path;
    }
    if let Some(threshold) = file.detection_threshold {
        runtime.detection_threshold = threshold;
    }
    if let Some(predictor) = file.predictor {
        if let Some(max_hands) = predictor.max_hands {
            runtime.predictor.max_hands = max_hands;
        }
        if let Some(complexity) = predictor.complexity {
            runtime.predictor.complexity = complexity;
        }
        if let Some(confidence) = predictor.min_detection_confidence {
            runtime.predictor.min_detection_confidence = confidence;
        }
    }
    let mut seed = file.seed.unwrap_or(47);

    if let Some(target) = &args.target {
        runtime.tracking.target_descriptor = target.clone();
    }
    if let Some(threshold) = args.threshold {
        runtime.detection_threshold = threshold.clamp(0.0, 1.0);
    }
    if let Some(cli_seed) = args.seed {
        seed = cli_seed;
    }

    let window_title = file
        .ui
        .and_then(|ui| ui.title)
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string());

    DemoConfig {
        runtime,
        window_title,
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> AppArgs {
        AppArgs::parse_from(std::iter::once("marker_demo").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let config = resolve(DemoConfigFile::default(), &args(&[]));
        assert_eq!(config.window_title, DEFAULT_WINDOW_TITLE);
        assert_eq!(config.runtime.detection_threshold, 0.5);
        assert_eq!(config.seed, 47);
    }

    #[test]
    fn file_values_override_defaults() {
        let file: DemoConfigFile = toml::from_str(
            r#"
            target_descriptor = "assets/poster.tgt"
            detection_threshold = 0.65

            [predictor]
            max_hands = 2
            complexity = "full"

            [ui]
            title = "Poster Demo"
            "#,
        )
        .unwrap();
        let config = resolve(file, &args(&[]));
        assert_eq!(
            config.runtime.tracking.target_descriptor,
            PathBuf::from("assets/poster.tgt")
        );
        assert_eq!(config.runtime.detection_threshold, 0.65);
        assert_eq!(config.runtime.predictor.max_hands, 2);
        assert_eq!(config.runtime.predictor.complexity, ModelComplexity::Full);
        assert_eq!(config.window_title, "Poster Demo");
    }

    #[test]
    fn cli_flags_beat_the_file() {
        let file: DemoConfigFile = toml::from_str("detection_threshold = 0.65").unwrap();
        let config = resolve(file, &args(&["--threshold", "0.8", "--seed", "9"]));
        assert_eq!(config.runtime.detection_threshold, 0.8);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn threshold_flag_is_clamped() {
        let config = resolve(DemoConfigFile::default(), &args(&["--threshold", "1.7"]));
        assert_eq!(config.runtime.detection_threshold, 1.0);
    }
}
