use anyhow::{Context, Result};
use colored::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use tinyrf_core::{
    encoder::{encode_pulses, pulse_edges},
    scanner::scan_edges_with_stats,
    EdgeEvent, Pulse,
};
use tracing::{debug, info};

use super::{load_config, parse_frame};

/// Channel impairments for a simulated link
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    /// Maximum deviation of each interval, in percent of nominal
    pub jitter_percent: u32,

    /// Random edges injected before each burst
    pub noise_edges: usize,

    /// Number of bursts sent
    pub bursts: usize,

    /// RNG seed
    pub seed: u64,
}

/// Outcome of a simulated link run
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub frame: String,
    pub bursts: usize,
    pub repeat_count: u8,
    pub jitter_percent: u32,
    pub noise_edges: usize,
    pub edges: usize,
    pub syncs_found: usize,
    pub frames_dropped: usize,
    pub frames_decoded: usize,
    pub frames_intact: usize,
    pub bursts_delivered: usize,
}

fn jitter(rng: &mut StdRng, ticks: u8, percent: u32) -> u8 {
    let spread = ticks as u32 * percent / 100;
    let low = (ticks as u32).saturating_sub(spread);
    let high = (ticks as u32 + spread).min(u8::MAX as u32);
    rng.gen_range(low..=high) as u8
}

/// Run `channel.bursts` bursts of `frame` through a noisy channel
pub fn run(
    config_path: Option<&str>,
    frame_hex: &str,
    channel: Channel,
) -> Result<SimulationReport> {
    let config = load_config(config_path)?;
    let frame = parse_frame(frame_hex)?;
    let mut rng = StdRng::seed_from_u64(channel.seed);

    let mut edges = Vec::new();
    let mut burst_ends = Vec::with_capacity(channel.bursts);
    for _ in 0..channel.bursts {
        for _ in 0..channel.noise_edges {
            edges.push(EdgeEvent::rising(rng.gen()));
            edges.push(EdgeEvent::falling(rng.gen()));
        }
        let pulses: Vec<Pulse> = encode_pulses(&config.symbols, &frame, config.repeat_count)
            .map(|p| {
                Pulse::new(
                    jitter(&mut rng, p.high, channel.jitter_percent),
                    jitter(&mut rng, p.low, channel.jitter_percent),
                )
            })
            .collect();
        // The counter saturates during the idle gap before a burst
        edges.extend(pulse_edges(pulses, u8::MAX));
        burst_ends.push(edges.len());
    }

    debug!("Simulated trace of {} edges", edges.len());
    let total_edges = edges.len();
    let (frames, stats) = scan_edges_with_stats(&config.tolerances(), frame.len(), edges);

    let intact: Vec<usize> = frames
        .iter()
        .filter(|f| f.bytes == frame)
        .map(|f| f.edge_index)
        .collect();
    // A burst is delivered when at least one intact copy ends inside it
    let mut start = 0;
    let mut delivered = 0;
    for end in &burst_ends {
        if intact.iter().any(|i| *i >= start && *i < *end) {
            delivered += 1;
        }
        start = *end;
    }

    Ok(SimulationReport {
        frame: hex::encode(&frame),
        bursts: channel.bursts,
        repeat_count: config.repeat_count,
        jitter_percent: channel.jitter_percent,
        noise_edges: channel.noise_edges,
        edges: total_edges,
        syncs_found: stats.syncs_found,
        frames_dropped: stats.frames_dropped,
        frames_decoded: stats.frames_found,
        frames_intact: intact.len(),
        bursts_delivered: delivered,
    })
}

pub fn execute(
    config_path: Option<&str>,
    frame_hex: &str,
    channel: Channel,
    output: Option<&str>,
) -> Result<()> {
    info!(
        "Simulating {} burst(s) with ±{}% jitter and {} noise edges",
        channel.bursts, channel.jitter_percent, channel.noise_edges
    );
    let report = run(config_path, frame_hex, channel)?;

    println!("\n=== Simulation Results ===");
    println!("Frame:              {}", report.frame);
    println!("Edges generated:    {}", report.edges);
    println!("SYNCs found:        {}", report.syncs_found);
    println!("Frames dropped:     {}", report.frames_dropped);
    println!("Frames decoded:     {}", report.frames_decoded);
    println!("Intact copies:      {}", report.frames_intact);

    let corrupted = report.frames_decoded - report.frames_intact;
    if corrupted > 0 {
        println!("Corrupted copies:   {}", corrupted.to_string().red());
    }

    println!();
    if report.bursts_delivered == report.bursts {
        println!("{} All {} bursts delivered", "✓".green(), report.bursts);
    } else if report.bursts_delivered > 0 {
        println!(
            "{} {}/{} bursts delivered",
            "!".yellow(),
            report.bursts_delivered,
            report.bursts
        );
    } else {
        println!("{} No burst delivered", "✗".red());
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize simulation report")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Simulation report written to: {}", output_path);
    }

    Ok(())
}
