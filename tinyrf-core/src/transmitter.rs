//! Blocking bit-banging transmitter

use crate::encoder::encode_pulses;
use crate::hal::{EdgeInterruptGuard, PulseClock, RfHardware};
use crate::receiver::FrameSize;
use crate::symbols::SymbolTable;
use crate::types::Pulse;
use embedded_hal::digital::OutputPin;

#[cfg(feature = "logging")]
use tracing::debug;

/// Drives an output pin with `N`-byte frames
pub struct Transmitter<P, const N: usize> {
    pin: P,
    symbols: SymbolTable,
    repeat_count: u8,
}

impl<P: OutputPin, const N: usize> Transmitter<P, N> {
    /// Transmitter sending each frame `repeat_count` times
    pub fn new(pin: P, symbols: SymbolTable, repeat_count: u8) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = FrameSize::<N>::VALID;
        Self {
            pin,
            symbols,
            repeat_count,
        }
    }

    /// Number of repetitions per burst
    pub fn repeat_count(&self) -> u8 {
        self.repeat_count
    }

    /// Symbol table in use
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Drive the pin low, as after a burst
    pub fn idle(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }

    /// Send one burst, blocking until the last pulse has been emitted.
    ///
    /// The RX edge interrupt is masked for the whole burst and restored to
    /// its previous state afterwards, including when a pin write fails.
    pub fn send<H: RfHardware>(
        &mut self,
        hardware: &mut H,
        frame: &[u8; N],
    ) -> Result<(), P::Error> {
        #[cfg(feature = "logging")]
        debug!("Sending {} byte frame x{}", N, self.repeat_count);

        let guard = EdgeInterruptGuard::acquire(hardware);
        for pulse in encode_pulses(&self.symbols, frame, self.repeat_count) {
            emit_pulse(&mut self.pin, &*guard, pulse)?;
        }
        Ok(())
    }

    /// Release the pin
    pub fn free(self) -> P {
        self.pin
    }
}

/// Hold the pin high then low, busy-waiting on the pulse counter
fn emit_pulse<P: OutputPin, C: PulseClock>(
    pin: &mut P,
    clock: &C,
    pulse: Pulse,
) -> Result<(), P::Error> {
    let total = pulse.total().min(u8::MAX as u16) as u8;

    clock.reset();
    pin.set_high()?;
    while clock.ticks() < pulse.high {
        core::hint::spin_loop();
    }
    pin.set_low()?;
    while clock.ticks() < total {
        core::hint::spin_loop();
    }
    Ok(())
}
