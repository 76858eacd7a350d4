//! Loading of the tuning file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use wave_arena_core::SimulationConfig;

/// Reads the tuning file at `path`, or the built-in tuning when there is none.
pub(crate) fn load(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse tuning file {}", path.display()))
}

/// Parses a possibly partial TOML tuning document.
pub(crate) fn parse(text: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
