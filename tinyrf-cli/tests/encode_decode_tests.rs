use std::fs;
use tempfile::tempdir;

use tinyrf_cli::commands::{decode, decode::DecodedFrame, encode, load_config, TraceFile};
use tinyrf_core::{scanner::scan_edges, EdgeEvent, LinkConfig, Pulse, PulseSymbol, SymbolTable};

fn frames(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn encode_writes_trace_with_trailing_sync() {
    let td = tempdir().unwrap();
    let out_path = td.path().join("trace.json");

    encode::execute(None, &frames(&["AB54"]), out_path.to_str().unwrap()).unwrap();

    let trace: TraceFile = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(trace.frame_size, 2);
    assert_eq!(trace.frames, vec!["ab54".to_string()]);
    // 10 repetitions of SYNC + 16 bits, then one trailing SYNC
    assert_eq!(trace.pulses.len(), 10 * 17 + 1);
    assert_eq!(trace.edges.len(), trace.pulses.len() * 2);
    assert_eq!(trace.pulses[0], SymbolTable::DEFAULT.pulse(PulseSymbol::Sync));
    assert_eq!(trace.pulses[1], Pulse::new(3, 1));
    assert_eq!(trace.pulses.last(), trace.pulses.first());
    assert_eq!(trace.edges[0].elapsed, u8::MAX);
}

#[test]
fn encode_then_decode_round_trip() {
    let td = tempdir().unwrap();
    let trace_path = td.path().join("trace.json");
    let out_path = td.path().join("frames.json");

    encode::execute(
        None,
        &frames(&["ab54", "0102"]),
        trace_path.to_str().unwrap(),
    )
    .unwrap();
    decode::execute(
        None,
        trace_path.to_str().unwrap(),
        None,
        Some(out_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let decoded: Vec<DecodedFrame> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(decoded.len(), 20);
    assert!(decoded[..10].iter().all(|f| f.frame == "ab54"));
    assert!(decoded[10..].iter().all(|f| f.frame == "0102"));
    assert!(decoded.windows(2).all(|w| w[0].edge_index < w[1].edge_index));
}

#[test]
fn encode_separates_bursts_with_idle_line() {
    let td = tempdir().unwrap();
    let trace_path = td.path().join("trace.json");

    encode::execute(
        None,
        &frames(&["ab54", "0102"]),
        trace_path.to_str().unwrap(),
    )
    .unwrap();

    let trace: TraceFile = serde_json::from_str(&fs::read_to_string(&trace_path).unwrap()).unwrap();
    let burst_edges = 2 * (10 * 17 + 1);
    assert_eq!(trace.edges.len(), 2 * burst_edges);
    assert_eq!(trace.edges[0], EdgeEvent::rising(u8::MAX));
    assert_eq!(trace.edges[burst_edges], EdgeEvent::rising(u8::MAX));

    // First repetition of the second frame survives
    let frames = scan_edges(&LinkConfig::DEFAULT.tolerances(), 2, trace.edges);
    let second: Vec<_> = frames.iter().filter(|f| f.bytes == [0x01, 0x02]).collect();
    assert_eq!(second.len(), 10);
    assert!(second[0].edge_index < burst_edges + 2 * 18);
}

#[test]
fn decode_with_wrong_frame_size_finds_fewer_frames() {
    let td = tempdir().unwrap();
    let trace_path = td.path().join("trace.json");
    let out_path = td.path().join("frames.json");

    encode::execute(None, &frames(&["aabbccdd"]), trace_path.to_str().unwrap()).unwrap();
    // Each 4-byte repetition reads as a 3-byte frame; the last byte is
    // ignored until the next SYNC
    decode::execute(
        None,
        trace_path.to_str().unwrap(),
        Some(3),
        Some(out_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let decoded: Vec<DecodedFrame> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(decoded.len(), 10);
    assert!(decoded.iter().all(|f| f.frame == "aabbcc"));
}

#[test]
fn decode_with_custom_config() {
    let td = tempdir().unwrap();
    let config_path = td.path().join("link.json");
    let trace_path = td.path().join("trace.json");
    let out_path = td.path().join("frames.json");

    let config = r#"{
      "repeat_count": 3,
      "symbols": {
        "sync": { "high": 2, "low": 40 },
        "one": { "high": 10, "low": 1 },
        "zero": { "high": 1, "low": 10 }
      }
    }"#;
    fs::write(&config_path, config).unwrap();
    let config_path = config_path.to_str().unwrap();

    encode::execute(
        Some(config_path),
        &frames(&["c0ffee"]),
        trace_path.to_str().unwrap(),
    )
    .unwrap();
    decode::execute(
        Some(config_path),
        trace_path.to_str().unwrap(),
        None,
        Some(out_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let decoded: Vec<DecodedFrame> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(decoded.len(), 3);
    assert!(decoded.iter().all(|f| f.frame == "c0ffee"));

    // Default windows read the custom ZERO as a SYNC and then drop every frame
    let default_out = td.path().join("default.json");
    decode::execute(
        None,
        trace_path.to_str().unwrap(),
        None,
        Some(default_out.to_str().unwrap()),
        false,
    )
    .unwrap();
    let decoded: Vec<DecodedFrame> =
        serde_json::from_str(&fs::read_to_string(&default_out).unwrap()).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn encode_rejects_bad_frames() {
    let td = tempdir().unwrap();
    let out = td.path().join("trace.json");
    let out = out.to_str().unwrap();

    assert!(encode::execute(None, &frames(&["zz"]), out).is_err());
    assert!(encode::execute(None, &frames(&[""]), out).is_err());
    assert!(encode::execute(None, &frames(&["0102", "03"]), out).is_err());
    assert!(encode::execute(None, &[], out).is_err());
    assert!(encode::execute(None, &["00".repeat(256)], out).is_err());
    assert!(!td.path().join("trace.json").exists());
}

#[test]
fn decode_missing_file_fails() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing.json");
    assert!(decode::execute(None, missing.to_str().unwrap(), None, None, true).is_err());
}

#[test]
fn decode_rejects_zero_frame_size() {
    let td = tempdir().unwrap();
    let trace_path = td.path().join("trace.json");
    fs::write(&trace_path, r#"{ "edges": [] }"#).unwrap();
    assert!(decode::execute(None, trace_path.to_str().unwrap(), None, None, true).is_err());
    assert!(decode::execute(None, trace_path.to_str().unwrap(), Some(1), None, true).is_ok());
}

#[test]
fn partial_config_uses_defaults() {
    let td = tempdir().unwrap();
    let config_path = td.path().join("link.json");
    fs::write(&config_path, r#"{ "repeat_count": 4, "rx_pin": 3 }"#).unwrap();

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.repeat_count, 4);
    assert_eq!(config.rx_pin, 3);
    assert_eq!(config.symbols, SymbolTable::DEFAULT);
    assert_eq!(config.pulse_width_us, 350);
}

#[test]
fn partial_symbol_table_uses_defaults() {
    let td = tempdir().unwrap();
    let config_path = td.path().join("link.json");
    let config = r#"{ "symbols": { "sync": { "high": 2, "low": 40 } } }"#;
    fs::write(&config_path, config).unwrap();

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.symbols.sync, Pulse::new(2, 40));
    assert_eq!(config.symbols.one, SymbolTable::DEFAULT.one);
    assert_eq!(config.symbols.zero, SymbolTable::DEFAULT.zero);
}

#[test]
fn invalid_config_is_rejected() {
    let td = tempdir().unwrap();
    let config_path = td.path().join("link.json");

    fs::write(&config_path, r#"{ "repeat_count": 0 }"#).unwrap();
    assert!(load_config(Some(config_path.to_str().unwrap())).is_err());

    let zero_high = r#"{ "symbols": { "sync": { "high": 0, "low": 31 } } }"#;
    fs::write(&config_path, zero_high).unwrap();
    assert!(load_config(Some(config_path.to_str().unwrap())).is_err());

    fs::write(&config_path, "not json").unwrap();
    assert!(load_config(Some(config_path.to_str().unwrap())).is_err());
}
