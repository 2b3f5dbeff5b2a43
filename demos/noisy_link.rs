//! Example decoding bursts through a jittery, noisy channel

use rand::{Rng, SeedableRng};
use tinyrf_core::{
    config::LinkConfig,
    encoder::{encode_pulses, pulse_edges},
    scanner::scan_edges_with_stats,
    EdgeEvent, Pulse,
};

/// Scale a tick count by up to +/-`percent`
fn jitter(rng: &mut impl Rng, ticks: u8, percent: u32) -> u8 {
    let spread = ticks as u32 * percent / 100;
    let low = (ticks as u32).saturating_sub(spread);
    let high = (ticks as u32 + spread).min(u8::MAX as u32);
    rng.gen_range(low..=high) as u8
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("TinyRF Noisy Link Example\n");

    let config = LinkConfig::DEFAULT;
    config.validate()?;
    let frames: [[u8; 3]; 4] = [
        [0x01, 0x02, 0x03],
        [0xCA, 0xFE, 0x00],
        [0x7F, 0x80, 0xFF],
        [0x55, 0xAA, 0x55],
    ];
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);

    for percent in [0u32, 20, 40, 60] {
        let mut trace = Vec::new();

        for frame in &frames {
            // Receiver noise floor between bursts
            for _ in 0..rng.gen_range(5..20) {
                trace.push(EdgeEvent::rising(rng.gen()));
                trace.push(EdgeEvent::falling(rng.gen()));
            }

            let pulses = encode_pulses(&config.symbols, frame, config.repeat_count)
                .map(|p| {
                    Pulse::new(
                        jitter(&mut rng, p.high, percent),
                        jitter(&mut rng, p.low, percent),
                    )
                })
                .collect::<Vec<_>>();
            trace.extend(pulse_edges(pulses, u8::MAX));
        }

        let (captured, stats) = scan_edges_with_stats(&config.tolerances(), 3, trace);
        let intact = frames
            .iter()
            .filter(|frame| captured.iter().any(|c| c.bytes == frame[..]))
            .count();

        println!("Jitter +/-{}%:", percent);
        println!("  Edges scanned:   {}", stats.edges_scanned);
        println!("  SYNCs found:     {}", stats.syncs_found);
        println!("  Frames dropped:  {}", stats.frames_dropped);
        println!("  Frames captured: {}", stats.frames_found);
        println!("  Completion rate: {:.1}%", stats.completion_rate());
        println!("  Distinct frames: {}/{}\n", intact, frames.len());
    }

    Ok(())
}
