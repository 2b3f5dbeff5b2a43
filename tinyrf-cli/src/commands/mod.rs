//! Subcommand implementations

pub mod decode;
pub mod encode;
pub mod simulate;
pub mod timing;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tinyrf_core::{config::validate_frame_size, EdgeEvent, LinkConfig, Pulse};
use tracing::info;

/// Pulse train and edge trace written by `encode` and read by `decode`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceFile {
    /// Frame size the trace was produced for
    pub frame_size: usize,

    /// Transmitted frames, hex encoded
    pub frames: Vec<String>,

    /// Nominal pulses
    pub pulses: Vec<Pulse>,

    /// Edges as the receiver observes them
    pub edges: Vec<EdgeEvent>,
}

/// Load a link configuration, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<LinkConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading link configuration from {}", path);
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => LinkConfig::DEFAULT,
    };

    config
        .validate()
        .with_context(|| "Invalid link configuration")?;
    Ok(config)
}

/// Decode a hex frame and check its size
pub fn parse_frame(frame_hex: &str) -> Result<Vec<u8>> {
    let frame = hex::decode(frame_hex.trim())
        .with_context(|| format!("Frame is not valid hex: {}", frame_hex))?;
    validate_frame_size(frame.len()).with_context(|| "Invalid frame")?;
    Ok(frame)
}
