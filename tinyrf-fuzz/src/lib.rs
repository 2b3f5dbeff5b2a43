//! Fuzzing entry points for the tinyrf-core receive path
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder
//!
//! Input bytes are read in pairs: bit 0 of the first byte is the edge
//! polarity (1 = rising), the second byte is the elapsed tick count.

use tinyrf_core::{
    decoder::Decoder, receiver::Receiver, scanner::scan_edges_with_stats, tolerance::ToleranceTable,
    EdgeEvent, Pulse, SymbolTable,
};

fn edges(data: &[u8]) -> impl Iterator<Item = EdgeEvent> + '_ {
    data.chunks_exact(2).map(|pair| {
        if pair[0] & 1 == 1 {
            EdgeEvent::rising(pair[1])
        } else {
            EdgeEvent::falling(pair[1])
        }
    })
}

/// Feed arbitrary edges to a bare decoder; the first byte picks the frame size
pub fn fuzz_decode(data: &[u8]) {
    let Some((&size, rest)) = data.split_first() else {
        return;
    };
    let windows = ToleranceTable::from_symbols(&SymbolTable::DEFAULT);
    let mut decoder = Decoder::new(windows);
    let mut buffer = vec![0u8; size as usize];
    for event in edges(rest) {
        let _ = decoder.on_edge(event, &mut buffer);
    }
}

/// Feed arbitrary edges through the interrupt-side receiver
pub fn fuzz_receiver(data: &[u8]) {
    let rx = Receiver::<4>::new(ToleranceTable::from_symbols(&SymbolTable::DEFAULT));
    let Some((mut isr, slot)) = rx.split() else {
        return;
    };
    for event in edges(data) {
        isr.on_edge(event);
        if slot.has_frame() {
            let _ = slot.read_frame();
            slot.reset();
        }
    }
}

/// Scan arbitrary edges with a symbol table taken from the first six bytes
pub fn fuzz_scan(data: &[u8]) {
    if data.len() < 6 {
        return;
    }
    let (table, rest) = data.split_at(6);
    let symbols = SymbolTable::new(
        Pulse::new(table[0], table[1]),
        Pulse::new(table[2], table[3]),
        Pulse::new(table[4], table[5]),
    );
    let windows = ToleranceTable::from_symbols(&symbols);
    let (frames, stats) = scan_edges_with_stats(&windows, 2, edges(rest));
    assert_eq!(frames.len(), stats.frames_found);
}
