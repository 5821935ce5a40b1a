//! JSON file I/O for layouts, configs and weights.
//!
//! Parse problems surface here, before any core function runs; a layout
//! that deserializes is structurally sound as far as the core cares.

use std::error::Error;
use std::fs;
use std::path::Path;

use lunahab_logic::models::{GeneratorConfig, Layout, ScoreWeights};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

pub fn load_layout(path: &Path) -> CliResult<Layout> {
    let data = fs::read_to_string(path)?;
    let layout = serde_json::from_str(&data)
        .map_err(|e| format!("layout file {} invalid: {e}", path.display()))?;
    Ok(layout)
}

pub fn save_layout(layout: &Layout, path: &Path) -> CliResult<()> {
    let data = serde_json::to_string_pretty(layout)?;
    fs::write(path, data)?;
    Ok(())
}

pub fn load_config(path: &Path) -> CliResult<GeneratorConfig> {
    let data = fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)
        .map_err(|e| format!("config file {} invalid: {e}", path.display()))?;
    Ok(config)
}

pub fn load_weights(path: Option<&Path>) -> CliResult<ScoreWeights> {
    match path {
        None => Ok(ScoreWeights::default()),
        Some(path) => {
            let data = fs::read_to_string(path)?;
            let weights = serde_json::from_str(&data)
                .map_err(|e| format!("weights file {} invalid: {e}", path.display()))?;
            Ok(weights)
        }
    }
}

pub fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> CliResult<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
