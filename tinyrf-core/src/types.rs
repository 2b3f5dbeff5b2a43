//! Core types shared by the transmitter and the receiver

use serde::{Deserialize, Serialize};

/// The three symbols a pulse train is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PulseSymbol {
    /// Frame delimiter
    Sync,
    /// A `1` bit
    One,
    /// A `0` bit
    Zero,
}

impl PulseSymbol {
    /// Symbol carrying a data bit
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            PulseSymbol::One
        } else {
            PulseSymbol::Zero
        }
    }
}

/// A high interval followed by a low interval, both in pulse widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pulse {
    /// Number of pulse widths the line stays high
    pub high: u8,

    /// Number of pulse widths the line stays low afterwards
    pub low: u8,
}

impl Pulse {
    /// Create a pulse from high and low counts
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Total length in pulse widths
    pub const fn total(&self) -> u16 {
        self.high as u16 + self.low as u16
    }
}

/// Direction of a level change on the RX pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// Edge that leaves the line at `level`
    pub const fn into_level(level: bool) -> Self {
        if level {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// One observed edge, with the ticks elapsed since the previous edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeEvent {
    /// Polarity of the edge
    pub edge: Edge,

    /// Pulse counter value sampled on this edge
    pub elapsed: u8,
}

impl EdgeEvent {
    /// Rising edge after `elapsed` ticks of low
    pub const fn rising(elapsed: u8) -> Self {
        Self {
            edge: Edge::Rising,
            elapsed,
        }
    }

    /// Falling edge after `elapsed` ticks of high
    pub const fn falling(elapsed: u8) -> Self {
        Self {
            edge: Edge::Falling,
            elapsed,
        }
    }
}

/// Receiver hand-off state, shared between the edge interrupt and the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReceiverState {
    /// Searching for a SYNC pattern
    Waiting = 0,
    /// Accumulating the bits of a frame
    Receiving = 1,
    /// A complete frame waits for the application
    Received = 2,
}

impl ReceiverState {
    /// Convert from the raw state word.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => ReceiverState::Receiving,
            2 => ReceiverState::Received,
            _ => ReceiverState::Waiting,
        }
    }
}
