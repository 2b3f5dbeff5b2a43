//! Fixed pulse-train vectors
//!
//! Each vector pins down the exact pulses a transmitter emits for a frame
//! and what a receiver makes of them, so a change to symbol order, bit
//! order or burst framing shows up here first.

use tinyrf_core::{
    config::LinkConfig,
    decoder::DecodeStep,
    encoder::{burst_ticks, encode_pulses, pulse_edges},
    sim::{RecordingPin, SimHardware, SimTimeline},
    EdgeEvent, Link, Pulse, Receiver, ReceiverState, SymbolTable,
};

const S: Pulse = Pulse::new(1, 31);
const I: Pulse = Pulse::new(3, 1);
const O: Pulse = Pulse::new(1, 3);

/// 0xAB 0x54, one repetition, trailing SYNC
#[rustfmt::skip]
const VECTOR_AB54: [Pulse; 18] = [
    S,
    // 0xAB = 1010_1011
    I, O, I, O, I, O, I, I,
    // 0x54 = 0101_0100
    O, I, O, I, O, I, O, O,
    S,
];

fn frame(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

fn transmit<const N: usize>(bytes: &[u8; N], repeat: u8) -> Vec<Pulse> {
    let timeline = SimTimeline::new();
    let config = LinkConfig::DEFAULT.with_repeat_count(repeat);
    let mut link = Link::new(SimHardware::new(&timeline), config)
        .with_transmitter::<_, N>(RecordingPin::new(&timeline));
    link.initialize().unwrap();
    link.send(bytes).unwrap();
    timeline.pulses()
}

fn receive<const N: usize>(pulses: &[Pulse]) -> (ReceiverState, Option<[u8; N]>) {
    let rx = Receiver::<N>::new(LinkConfig::DEFAULT.tolerances());
    let (mut isr, slot) = rx.split().unwrap();
    for event in pulse_edges(pulses.iter().copied(), 0) {
        isr.on_edge(event);
    }
    (rx.state(), slot.read_frame())
}

#[test]
fn test_vector_ab54_transmit() {
    let bytes: [u8; 2] = frame("ab54").try_into().unwrap();
    assert_eq!(transmit(&bytes, 1), VECTOR_AB54.to_vec());
    assert_eq!(
        encode_pulses(&SymbolTable::DEFAULT, &bytes, 1).collect::<Vec<_>>(),
        VECTOR_AB54.to_vec()
    );
}

#[test]
fn test_vector_ab54_receive() {
    let (state, received) = receive::<2>(&VECTOR_AB54);
    assert_eq!(state, ReceiverState::Received);
    assert_eq!(received, Some([0xAB, 0x54]));
}

#[test]
fn test_vector_ab54_without_trailing_sync() {
    // The last bit's low interval is never closed by a rising edge
    let (state, received) = receive::<2>(&VECTOR_AB54[..17]);
    assert_eq!(state, ReceiverState::Receiving);
    assert_eq!(received, None);
}

#[test]
fn test_vector_burst_length() {
    let bytes = frame("ab54");
    // Every symbol of the default table spans 4 ticks except SYNC (32)
    assert_eq!(burst_ticks(&SymbolTable::DEFAULT, &bytes, 1), 32 + 16 * 4 + 32);
    assert_eq!(burst_ticks(&SymbolTable::DEFAULT, &bytes, 10), 10 * (32 + 16 * 4) + 32);
}

#[test]
fn test_vector_repeated_burst_shape() {
    let pulses = transmit(&[0xFF], 3);
    assert_eq!(pulses.len(), 3 * 9 + 1);
    for (i, pulse) in pulses.iter().enumerate() {
        let expected = if i % 9 == 0 { S } else { I };
        assert_eq!(*pulse, expected, "pulse {}", i);
    }
}

#[test]
fn test_vector_all_zero_frame() {
    let pulses = transmit(&[0x00, 0x00, 0x00], 1);
    assert_eq!(pulses.first(), Some(&S));
    assert_eq!(pulses.last(), Some(&S));
    assert!(pulses[1..25].iter().all(|p| *p == O));

    let (state, received) = receive::<3>(&pulses);
    assert_eq!(state, ReceiverState::Received);
    assert_eq!(received, Some([0, 0, 0]));
}

/// Drive a decoder to the receiving state, then feed one data symbol
fn data_symbol(high: u8, low: u8) -> (DecodeStep, ReceiverState) {
    let rx = Receiver::<1>::new(LinkConfig::DEFAULT.tolerances());
    let (mut isr, _slot) = rx.split().unwrap();
    isr.on_edge(EdgeEvent::rising(0));
    isr.on_edge(EdgeEvent::falling(1));
    assert_eq!(isr.on_edge(EdgeEvent::rising(31)), DecodeStep::Synced);
    isr.on_edge(EdgeEvent::falling(high));
    let step = isr.on_edge(EdgeEvent::rising(low));
    (step, rx.state())
}

#[test]
fn test_vector_tolerance_boundaries() {
    // ONE = (3, 1): high window [0, 5], low window [0, 1]
    assert_eq!(data_symbol(5, 1), (DecodeStep::Bit(true), ReceiverState::Receiving));
    assert_eq!(data_symbol(6, 1), (DecodeStep::Dropped, ReceiverState::Waiting));
    assert_eq!(data_symbol(3, 2), (DecodeStep::Dropped, ReceiverState::Waiting));

    // ZERO = (1, 3): high window [0, 1], low window [0, 5]
    assert_eq!(data_symbol(1, 5), (DecodeStep::Bit(false), ReceiverState::Receiving));
    assert_eq!(data_symbol(1, 6), (DecodeStep::Dropped, ReceiverState::Waiting));

    // (1, 1) is inside both; ONE wins
    assert_eq!(data_symbol(1, 1), (DecodeStep::Bit(true), ReceiverState::Receiving));
}

#[test]
fn test_vector_sync_boundaries() {
    // SYNC = (1, 31): low window [9, 52]
    let cases = [
        (8, DecodeStep::Ignored),
        (9, DecodeStep::Synced),
        (52, DecodeStep::Synced),
        (53, DecodeStep::Ignored),
    ];
    for (low, expected) in cases {
        let rx = Receiver::<1>::new(LinkConfig::DEFAULT.tolerances());
        let (mut isr, _slot) = rx.split().unwrap();
        isr.on_edge(EdgeEvent::rising(0));
        isr.on_edge(EdgeEvent::falling(1));
        assert_eq!(isr.on_edge(EdgeEvent::rising(low)), expected, "low {}", low);
    }
}
