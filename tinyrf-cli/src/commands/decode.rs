use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use tinyrf_core::{config::validate_frame_size, scanner::scan_edges_with_stats};
use tracing::info;

use super::{load_config, TraceFile};

#[derive(Serialize, Deserialize)]
pub struct DecodedFrame {
    pub edge_index: usize,
    pub frame: String,
}

pub fn execute(
    config_path: Option<&str>,
    input: &str,
    frame_size: Option<usize>,
    output: Option<&str>,
    stats_only: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    info!("Decoding trace: {}", input);
    let content =
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))?;
    let trace: TraceFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse trace file: {}", input))?;

    let frame_size = frame_size.unwrap_or(trace.frame_size);
    validate_frame_size(frame_size).with_context(|| "Invalid frame size")?;

    info!("{} edges, {} byte frames", trace.edges.len(), frame_size);

    let (frames, stats) = scan_edges_with_stats(&config.tolerances(), frame_size, trace.edges);

    println!("\n=== Decode Results ===");
    println!("Edges scanned:     {}", stats.edges_scanned);
    println!("SYNCs found:       {}", stats.syncs_found);
    println!("Bits decoded:      {}", stats.bits_decoded);
    println!("Frames dropped:    {}", stats.frames_dropped);
    println!("Frames decoded:    {}", stats.frames_found);
    println!("Completion rate:   {:.2}%", stats.completion_rate());
    println!();

    if stats_only {
        return Ok(());
    }

    let decoded: Vec<DecodedFrame> = frames
        .iter()
        .map(|f| DecodedFrame {
            edge_index: f.edge_index,
            frame: hex::encode(&f.bytes),
        })
        .collect();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&decoded)
            .with_context(|| "Failed to serialize decoded frames")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Decoded frames written to: {}", output_path);
    } else if decoded.is_empty() {
        println!("{} No frames decoded", "✗".red());
    } else {
        println!("=== Decoded Frames ===");
        for frame in &decoded {
            println!(
                "{} edge {:>6}: {}",
                "✓".green(),
                frame.edge_index,
                frame.frame
            );
        }
    }

    Ok(())
}
