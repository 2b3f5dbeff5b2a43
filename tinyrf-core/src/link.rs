//! Public contract of a TinyRF node
//!
//! A [`Link`] owns the platform hardware and whichever roles the node
//! plays. Roles are part of the type: `send` only exists on a link built
//! with a [`Transmitter`], and `has_frame` / `read_frame` / `reset` only on
//! one built with a [`FrameSlot`].
//!
//! ```compile_fail
//! use tinyrf_core::{config::LinkConfig, link::Link, receiver::Receiver};
//! # fn node<H: tinyrf_core::hal::RfHardware>(hw: H, rx: &Receiver<2>) {
//! let (_isr, slot) = rx.split().unwrap();
//! let mut link = Link::new(hw, LinkConfig::DEFAULT).with_receiver(slot);
//! link.send(&[0, 0]); // receive-only node: no `send`
//! # }
//! ```

use crate::config::LinkConfig;
use crate::error::ConfigError;
use crate::hal::RfHardware;
use crate::receiver::FrameSlot;
use crate::timing::TimerSettings;
use crate::transmitter::Transmitter;
use embedded_hal::digital::OutputPin;

#[cfg(feature = "logging")]
use crate::constants::MIN_RECOMMENDED_REPEAT_COUNT;
#[cfg(feature = "logging")]
use tracing::{info, warn};

/// Placeholder for a role the node does not play
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

/// Marker for the transmit role slot of a [`Link`]
pub trait TxRole {
    /// Whether the node transmits
    const ENABLED: bool;
}

/// Marker for the receive role slot of a [`Link`]
pub trait RxRole {
    /// Whether the node receives
    const ENABLED: bool;
}

impl TxRole for Disabled {
    const ENABLED: bool = false;
}

impl RxRole for Disabled {
    const ENABLED: bool = false;
}

impl<P, const N: usize> TxRole for Transmitter<P, N> {
    const ENABLED: bool = true;
}

impl<const N: usize> RxRole for FrameSlot<'_, N> {
    const ENABLED: bool = true;
}

/// A node on a point-to-point RF link
pub struct Link<H, T = Disabled, R = Disabled> {
    hardware: H,
    config: LinkConfig,
    tx: T,
    rx: R,
}

impl<H: RfHardware> Link<H> {
    /// Node with no roles yet
    pub fn new(hardware: H, config: LinkConfig) -> Self {
        Self {
            hardware,
            config,
            tx: Disabled,
            rx: Disabled,
        }
    }
}

impl<H: RfHardware, R> Link<H, Disabled, R> {
    /// Enable the transmit role on `pin` for `N`-byte frames
    pub fn with_transmitter<P: OutputPin, const N: usize>(
        self,
        pin: P,
    ) -> Link<H, Transmitter<P, N>, R> {
        let tx = Transmitter::new(pin, self.config.symbols, self.config.repeat_count);
        Link {
            hardware: self.hardware,
            config: self.config,
            tx,
            rx: self.rx,
        }
    }
}

impl<H: RfHardware, T> Link<H, T, Disabled> {
    /// Enable the receive role with the application half of a receiver
    pub fn with_receiver<'a, const N: usize>(
        self,
        slot: FrameSlot<'a, N>,
    ) -> Link<H, T, FrameSlot<'a, N>> {
        Link {
            hardware: self.hardware,
            config: self.config,
            tx: self.tx,
            rx: slot,
        }
    }
}

impl<H: RfHardware, T: TxRole, R: RxRole> Link<H, T, R> {
    /// Configure the timer and enable interrupts.
    ///
    /// Safe to call again; every call reprograms the same settings.
    pub fn initialize(&mut self) -> Result<TimerSettings, ConfigError> {
        let settings = self.config.validate()?;
        if T::ENABLED && R::ENABLED {
            self.config.validate_pins()?;
        }

        #[cfg(feature = "logging")]
        {
            info!(
                "Timer: {:?}, compare {} ({}ns per pulse)",
                settings.prescaler,
                settings.compare,
                settings.pulse_width_ns(self.config.clock_hz)
            );
            if T::ENABLED && self.config.repeat_count < MIN_RECOMMENDED_REPEAT_COUNT {
                warn!(
                    "Repeat count {} is low; use >= 10 for stable reception",
                    self.config.repeat_count
                );
            }
            if R::ENABLED && self.config.tolerances().data_windows_overlap() {
                warn!("ONE and ZERO tolerance windows overlap; ambiguous pulses read as ONE");
            }
        }

        self.hardware.configure_timer(&settings);
        if R::ENABLED {
            self.hardware.set_edge_interrupt(true);
        }
        self.hardware.enable_interrupts();

        Ok(settings)
    }

    /// Link configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Platform hardware
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Platform hardware, mutably
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Take the link apart
    pub fn free(self) -> (H, T, R) {
        (self.hardware, self.tx, self.rx)
    }
}

impl<H: RfHardware, P: OutputPin, R, const N: usize> Link<H, Transmitter<P, N>, R> {
    /// Send a frame `repeat_count` times, blocking until done
    pub fn send(&mut self, frame: &[u8; N]) -> Result<(), P::Error> {
        self.tx.send(&mut self.hardware, frame)
    }
}

impl<H: RfHardware, T, const N: usize> Link<H, T, FrameSlot<'_, N>> {
    /// Whether a received frame is waiting
    pub fn has_frame(&self) -> bool {
        self.rx.has_frame()
    }

    /// Copy the waiting frame
    pub fn read_frame(&self) -> Option<[u8; N]> {
        self.rx.read_frame()
    }

    /// Resume listening after a frame was consumed
    pub fn reset(&mut self) {
        self.rx.reset()
    }
}
