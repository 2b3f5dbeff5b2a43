use anyhow::{Context, Result};
use std::fs;
use tinyrf_core::encoder::{encode_pulses, pulse_edges};
use tracing::info;

use super::{load_config, parse_frame, TraceFile};

pub fn execute(config_path: Option<&str>, frames_hex: &[String], output: &str) -> Result<()> {
    let config = load_config(config_path)?;

    let frames = frames_hex
        .iter()
        .map(|f| parse_frame(f))
        .collect::<Result<Vec<_>>>()?;
    let frame_size = match frames.first() {
        Some(frame) => frame.len(),
        None => anyhow::bail!("No frames given"),
    };
    if let Some(bad) = frames.iter().find(|f| f.len() != frame_size) {
        anyhow::bail!(
            "All frames must be {} bytes, got one of {} bytes",
            frame_size,
            bad.len()
        );
    }

    info!(
        "Encoding {} frame(s) of {} bytes, {} repetitions each",
        frames.len(),
        frame_size,
        config.repeat_count
    );

    let mut trace = TraceFile {
        frame_size,
        frames: frames_hex.iter().map(|f| f.trim().to_lowercase()).collect(),
        ..TraceFile::default()
    };
    // Bursts are separated by idle line, which the receiver's counter
    // reads as saturated
    for frame in &frames {
        let burst: Vec<_> =
            encode_pulses(&config.symbols, frame, config.repeat_count).collect();
        trace.edges.extend(pulse_edges(burst.iter().copied(), u8::MAX));
        trace.pulses.extend(burst);
    }

    let json = serde_json::to_string_pretty(&trace)
        .with_context(|| "Failed to serialize pulse trace")?;
    fs::write(output, json)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Wrote {} pulses / {} edges to {}",
        trace.pulses.len(),
        trace.edges.len(),
        output
    );

    Ok(())
}
