use std::fs;
use tempfile::tempdir;

use tinyrf_cli::commands::simulate::{self, Channel};

fn channel(jitter_percent: u32, noise_edges: usize) -> Channel {
    Channel {
        jitter_percent,
        noise_edges,
        bursts: 5,
        seed: 42,
    }
}

#[test]
fn clean_channel_delivers_every_copy() {
    let report = simulate::run(None, "ab54", channel(0, 0)).unwrap();

    assert_eq!(report.bursts_delivered, 5);
    assert_eq!(report.frames_intact, 5 * 10);
    assert_eq!(report.frames_decoded, report.frames_intact);
    assert_eq!(report.frames_dropped, 0);
}

#[test]
fn noisy_channel_still_delivers() {
    // Default symbols keep every data pulse in its window up to 60% jitter
    let report = simulate::run(None, "deadbeef", channel(60, 40)).unwrap();

    assert_eq!(report.bursts_delivered, 5);
    assert!(report.frames_intact >= 5 * 9);
    assert!(report.frames_decoded >= report.frames_intact);
}

#[test]
fn same_seed_same_report() {
    let a = simulate::run(None, "0f", channel(40, 10)).unwrap();
    let b = simulate::run(None, "0f", channel(40, 10)).unwrap();
    assert_eq!(a.edges, b.edges);
    assert_eq!(a.frames_decoded, b.frames_decoded);
    assert_eq!(a.frames_dropped, b.frames_dropped);
}

#[test]
fn simulate_writes_report() {
    let td = tempdir().unwrap();
    let out_path = td.path().join("sim.json");

    simulate::execute(None, "c3", channel(10, 5), Some(out_path.to_str().unwrap())).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["frame"], "c3");
    assert_eq!(json["bursts"], 5);
    assert_eq!(json["repeat_count"], 10);
}

#[test]
fn simulate_rejects_bad_frame() {
    assert!(simulate::run(None, "xyz", channel(0, 0)).is_err());
    assert!(simulate::run(None, "", channel(0, 0)).is_err());
}
