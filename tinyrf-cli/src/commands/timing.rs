use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;
use tinyrf_core::{
    config::validate_frame_size,
    encoder::burst_ticks,
    timing::TimerSettings,
    tolerance::{SymbolWindows, ToleranceTable},
    LinkConfig,
};
use tracing::info;

use super::load_config;

/// Timer and tolerance figures for one configuration
#[derive(Debug, Serialize)]
pub struct TimingReport {
    pub clock_hz: u32,
    pub pulse_width_us: u32,
    pub prescaler: u16,
    pub clock_select_bits: u8,
    pub compare: u8,
    pub effective_pulse_width_ns: u64,
    pub tolerances: ToleranceTable,
    pub data_windows_overlap: bool,
    pub burst_ticks: u32,
    pub burst_us: u64,
}

/// Compute the report for `config` and a `frame_size`-byte frame
pub fn report(config: &LinkConfig, frame_size: usize) -> Result<TimingReport> {
    let settings: TimerSettings = config
        .validate()
        .with_context(|| "Invalid link configuration")?;
    validate_frame_size(frame_size).with_context(|| "Invalid frame size")?;
    let tolerances = config.tolerances();
    let frame = vec![0u8; frame_size];
    let ticks = burst_ticks(&config.symbols, &frame, config.repeat_count);
    let tick_ns = settings.pulse_width_ns(config.clock_hz);

    Ok(TimingReport {
        clock_hz: config.clock_hz,
        pulse_width_us: config.pulse_width_us,
        prescaler: settings.prescaler.divisor(),
        clock_select_bits: settings.prescaler.clock_select_bits(),
        compare: settings.compare,
        effective_pulse_width_ns: tick_ns,
        tolerances,
        data_windows_overlap: tolerances.data_windows_overlap(),
        burst_ticks: ticks,
        burst_us: ticks as u64 * tick_ns / 1000,
    })
}

fn print_windows(name: &str, windows: &SymbolWindows) {
    println!(
        "{:<6} high {:>3}..={:<3}  low {:>3}..={:<3}",
        name, windows.high.min, windows.high.max, windows.low.min, windows.low.max
    );
}

pub fn execute(config_path: Option<&str>, frame_size: usize, output: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let report = report(&config, frame_size)?;

    info!(
        "Clock {} Hz, pulse width {} us",
        report.clock_hz, report.pulse_width_us
    );

    println!("\n=== Timer ===");
    println!("Prescaler:          CLK/{}", report.prescaler);
    println!("Clock select bits:  {:03b}", report.clock_select_bits);
    println!("Compare value:      {}", report.compare);
    println!(
        "Effective width:    {} ns (requested {} ns)",
        report.effective_pulse_width_ns,
        report.pulse_width_us as u64 * 1000
    );

    println!("\n=== Tolerance Windows ===");
    print_windows("SYNC", &report.tolerances.sync);
    print_windows("ONE", &report.tolerances.one);
    print_windows("ZERO", &report.tolerances.zero);

    println!("\n=== Burst ===");
    println!(
        "{} byte frame x{}: {} ticks ({} us)",
        frame_size, config.repeat_count, report.burst_ticks, report.burst_us
    );

    println!();
    if report.data_windows_overlap {
        println!(
            "{} ONE and ZERO windows overlap; ambiguous pulses decode as ONE",
            "!".yellow()
        );
    } else {
        println!("{} Symbol windows are unambiguous", "✓".green());
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize timing report")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Timing report written to: {}", output_path);
    }

    Ok(())
}
