//! Hardware seam: pulse counter, timer setup and interrupt control
//!
//! Pins go through `embedded-hal`; the timer and the interrupt controller
//! have no portable abstraction, so platforms implement these traits.

use crate::timing::TimerSettings;

/// Free-running pulse counter, one tick per pulse width
pub trait PulseClock {
    /// Ticks elapsed since the last reset
    fn ticks(&self) -> u8;

    /// Zero the counter.
    ///
    /// When ticks come from a hardware timer, this must also clear the
    /// timer's count register, or every measured interval is off by up to
    /// one tick of phase.
    fn reset(&self);
}

impl<T: PulseClock + ?Sized> PulseClock for &T {
    fn ticks(&self) -> u8 {
        (**self).ticks()
    }

    fn reset(&self) {
        (**self).reset()
    }
}

/// Timer and interrupt controller owned by a link
pub trait RfHardware: PulseClock {
    /// Program the timer for one compare interrupt per pulse width
    fn configure_timer(&mut self, settings: &TimerSettings);

    /// Whether the RX pin-change interrupt is enabled
    fn edge_interrupt_enabled(&self) -> bool;

    /// Enable or disable the RX pin-change interrupt
    fn set_edge_interrupt(&mut self, enabled: bool);

    /// Globally enable interrupts
    fn enable_interrupts(&mut self);
}

/// Scoped ownership of the timer and TX pin.
///
/// Masks the RX edge interrupt while alive and restores the previous mask
/// on drop, on every exit path.
pub struct EdgeInterruptGuard<'a, H: RfHardware> {
    hardware: &'a mut H,
    was_enabled: bool,
}

impl<'a, H: RfHardware> EdgeInterruptGuard<'a, H> {
    /// Mask the edge interrupt until the guard drops
    pub fn acquire(hardware: &'a mut H) -> Self {
        let was_enabled = hardware.edge_interrupt_enabled();
        hardware.set_edge_interrupt(false);
        Self {
            hardware,
            was_enabled,
        }
    }
}

impl<H: RfHardware> core::ops::Deref for EdgeInterruptGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.hardware
    }
}

impl<H: RfHardware> core::ops::DerefMut for EdgeInterruptGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.hardware
    }
}

impl<H: RfHardware> Drop for EdgeInterruptGuard<'_, H> {
    fn drop(&mut self) {
        self.hardware.set_edge_interrupt(self.was_enabled);
    }
}
