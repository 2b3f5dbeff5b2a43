//! Receiver context shared between the edge interrupt and the main loop
//!
//! [`Receiver`] owns the state word and the frame buffer. It is split once
//! into an [`EdgeDecoder`], driven from the pin-change interrupt, and a
//! [`FrameSlot`], polled by application code. The state word is the only
//! synchronization between the two:
//!
//! - the interrupt writes the buffer only while the state is not
//!   `Received`, and publishes a frame with a release store of `Received`;
//! - the application reads the buffer only after an acquire load observes
//!   `Received`, and hands it back with a release store of `Waiting`.

use crate::decoder::{DecodeStep, Decoder};
use crate::hal::PulseClock;
use crate::tolerance::ToleranceTable;
use crate::types::{Edge, EdgeEvent, ReceiverState};
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use embedded_hal::digital::InputPin;

/// Compile-time frame size check.
pub(crate) struct FrameSize<const N: usize>;

impl<const N: usize> FrameSize<N> {
    pub(crate) const VALID: () = assert!(
        N >= crate::constants::MIN_FRAME_SIZE && N <= crate::constants::MAX_FRAME_SIZE,
        "frame size must be in range 1 - 255"
    );
}

/// Receive context for frames of `N` bytes.
///
/// Usually placed in a `static` so the interrupt handler and the main
/// loop can both reach it.
pub struct Receiver<const N: usize> {
    state: AtomicU8,
    split: AtomicBool,
    windows: ToleranceTable,
    buffer: UnsafeCell<[u8; N]>,
}

// SAFETY: the buffer is only written through the single `EdgeDecoder` while
// the state is not `Received`, and only read through `FrameSlot` while it
// is; the state transitions use release/acquire ordering.
unsafe impl<const N: usize> Sync for Receiver<N> {}

impl<const N: usize> Receiver<N> {
    /// Receiver in the waiting state
    pub const fn new(windows: ToleranceTable) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = FrameSize::<N>::VALID;
        Self {
            state: AtomicU8::new(ReceiverState::Waiting as u8),
            split: AtomicBool::new(false),
            windows,
            buffer: UnsafeCell::new([0; N]),
        }
    }

    /// Current hand-off state
    #[inline]
    pub fn state(&self) -> ReceiverState {
        ReceiverState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Split into the interrupt half and the application half.
    ///
    /// Returns `None` after the first call. The target must provide a
    /// `critical-section` implementation.
    pub fn split(&self) -> Option<(EdgeDecoder<'_, N>, FrameSlot<'_, N>)> {
        // Plain load and store inside a critical section; no CAS on the
        // smallest targets.
        let first = critical_section::with(|_| {
            if self.split.load(Ordering::Acquire) {
                return false;
            }
            self.split.store(true, Ordering::Release);
            true
        });
        if !first {
            return None;
        }
        Some((
            EdgeDecoder {
                receiver: self,
                decoder: Decoder::new(self.windows),
                last_level: true,
            },
            FrameSlot { receiver: self },
        ))
    }

    #[inline]
    fn set_state(&self, state: ReceiverState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Interrupt half of a [`Receiver`]
pub struct EdgeDecoder<'a, const N: usize> {
    receiver: &'a Receiver<N>,
    decoder: Decoder,
    last_level: bool,
}

impl<const N: usize> EdgeDecoder<'_, N> {
    /// Feed one edge with its elapsed tick count.
    ///
    /// Discarded without any effect while a frame waits for pickup.
    pub fn on_edge(&mut self, event: EdgeEvent) -> DecodeStep {
        if self.receiver.state() == ReceiverState::Received {
            return DecodeStep::Ignored;
        }

        // SAFETY: state is not `Received`, so the application half does not
        // read the buffer, and this is the only writer.
        let buffer = unsafe { &mut *self.receiver.buffer.get() };
        let step = self.decoder.on_edge(event, buffer);

        match step {
            DecodeStep::Synced => self.receiver.set_state(ReceiverState::Receiving),
            DecodeStep::Dropped => self.receiver.set_state(ReceiverState::Waiting),
            DecodeStep::FrameComplete => self.receiver.set_state(ReceiverState::Received),
            DecodeStep::Ignored | DecodeStep::Bit(_) => {}
        }
        step
    }

    /// Pin-change interrupt entry point.
    ///
    /// Skips invocations where the RX pin kept its level (the vector may be
    /// shared with other pins). Otherwise samples and resets the pulse
    /// counter and decodes the edge.
    pub fn on_pin_change<P, C>(&mut self, pin: &mut P, clock: &C) -> Result<DecodeStep, P::Error>
    where
        P: InputPin,
        C: PulseClock,
    {
        if self.receiver.state() == ReceiverState::Received {
            return Ok(DecodeStep::Ignored);
        }

        let level = pin.is_high()?;
        if level == self.last_level {
            return Ok(DecodeStep::Ignored);
        }
        self.last_level = level;

        let elapsed = clock.ticks();
        clock.reset();

        Ok(self.on_edge(EdgeEvent {
            edge: Edge::into_level(level),
            elapsed,
        }))
    }
}

/// Application half of a [`Receiver`]
pub struct FrameSlot<'a, const N: usize> {
    receiver: &'a Receiver<N>,
}

impl<const N: usize> FrameSlot<'_, N> {
    /// Whether a complete frame is waiting
    #[inline]
    pub fn has_frame(&self) -> bool {
        self.receiver.state() == ReceiverState::Received
    }

    /// Copy the waiting frame, or `None` if there is none
    pub fn read_frame(&self) -> Option<[u8; N]> {
        if !self.has_frame() {
            return None;
        }
        // SAFETY: the acquire load above saw `Received`; the interrupt half
        // does not touch the buffer until `reset` stores `Waiting`.
        Some(unsafe { *self.receiver.buffer.get() })
    }

    /// Release the buffer and resume listening.
    ///
    /// No-op unless a frame is waiting.
    pub fn reset(&self) {
        if self.has_frame() {
            self.receiver.set_state(ReceiverState::Waiting);
        }
    }

    /// Current hand-off state
    pub fn state(&self) -> ReceiverState {
        self.receiver.state()
    }
}
