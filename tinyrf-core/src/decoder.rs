//! Pulse-train decoding state machine
//!
//! Fed one [`EdgeEvent`] per RX pin transition. Only rising edges are
//! evaluated: at a rising edge the previous interval was high and the
//! current one low, which together form one symbol.

use crate::constants::{BITS_PER_BYTE, INITIAL_PREV_TICKS};
use crate::tolerance::ToleranceTable;
use crate::types::{Edge, EdgeEvent};

#[cfg(feature = "logging")]
use tracing::trace;

/// Outcome of feeding one edge to the [`Decoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// Nothing changed (falling edge, or no SYNC while waiting)
    Ignored,
    /// A SYNC was recognised; a new frame starts
    Synced,
    /// A data bit was accepted
    Bit(bool),
    /// An out-of-tolerance symbol aborted the frame
    Dropped,
    /// The last bit of the frame was accepted
    FrameComplete,
}

/// Edge-driven frame decoder.
///
/// Writes bytes into the caller's buffer as they complete; the buffer
/// length is the frame size. After [`DecodeStep::FrameComplete`] or
/// [`DecodeStep::Dropped`] the decoder is back to searching for SYNC.
#[derive(Debug, Clone)]
pub struct Decoder {
    windows: ToleranceTable,
    receiving: bool,
    prev_ticks: u8,
    bit_counter: u8,
    byte_counter: usize,
    byte_buffer: u8,
}

impl Decoder {
    /// Decoder in the waiting state
    pub const fn new(windows: ToleranceTable) -> Self {
        Self {
            windows,
            receiving: false,
            prev_ticks: INITIAL_PREV_TICKS,
            bit_counter: 0,
            byte_counter: 0,
            byte_buffer: 0,
        }
    }

    /// Whether a frame is being accumulated
    pub const fn is_receiving(&self) -> bool {
        self.receiving
    }

    /// Bytes completed in the current frame
    pub const fn bytes_received(&self) -> usize {
        self.byte_counter
    }

    /// Return to the initial waiting state
    pub fn reset(&mut self) {
        *self = Self::new(self.windows);
    }

    /// Process one edge.
    pub fn on_edge(&mut self, event: EdgeEvent, frame: &mut [u8]) -> DecodeStep {
        let high = core::mem::replace(&mut self.prev_ticks, event.elapsed);
        let low = event.elapsed;

        if event.edge == Edge::Falling {
            return DecodeStep::Ignored;
        }

        if !self.receiving {
            if self.windows.is_sync(high, low) {
                #[cfg(feature = "logging")]
                trace!("SYNC ({}, {})", high, low);

                self.receiving = true;
                self.bit_counter = 0;
                self.byte_counter = 0;
                return DecodeStep::Synced;
            }
            return DecodeStep::Ignored;
        }

        let bit = match self.windows.classify_bit(high, low) {
            Some(bit) => bit,
            None => {
                #[cfg(feature = "logging")]
                trace!(
                    "Dropping frame after {} bytes: ({}, {}) out of tolerance",
                    self.byte_counter,
                    high,
                    low
                );

                self.receiving = false;
                return DecodeStep::Dropped;
            }
        };

        self.byte_buffer = (self.byte_buffer << 1) | bit as u8;
        self.bit_counter += 1;

        if self.bit_counter < BITS_PER_BYTE {
            return DecodeStep::Bit(bit);
        }

        self.bit_counter = 0;
        match frame.get_mut(self.byte_counter) {
            Some(slot) => *slot = self.byte_buffer,
            None => {
                self.receiving = false;
                return DecodeStep::Dropped;
            }
        }
        self.byte_counter += 1;

        if self.byte_counter >= frame.len() {
            #[cfg(feature = "logging")]
            trace!("Frame complete ({} bytes)", self.byte_counter);

            self.receiving = false;
            return DecodeStep::FrameComplete;
        }

        DecodeStep::Bit(bit)
    }
}
