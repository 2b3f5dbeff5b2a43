//! Link configuration
//!
//! A configuration is meant to be a `const` item. [`LinkConfig::check`]
//! panics during constant evaluation, so an unsatisfiable timing or symbol
//! table fails the build:
//!
//! ```
//! use tinyrf_core::config::LinkConfig;
//!
//! const LINK: LinkConfig = LinkConfig::DEFAULT.with_clock_hz(9_600_000).check();
//! ```

use crate::constants::{
    DEFAULT_CLOCK_HZ, DEFAULT_PULSE_WIDTH_US, DEFAULT_REPEAT_COUNT, DEFAULT_RX_PIN,
    DEFAULT_TX_PIN, MAX_FRAME_SIZE, MIN_FRAME_SIZE,
};
use crate::error::ConfigError;
use crate::symbols::SymbolTable;
use crate::timing::TimerSettings;
use crate::tolerance::ToleranceTable;
use serde::{Deserialize, Serialize};

/// Parameters both ends of a link must share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// MCU clock in Hz
    pub clock_hz: u32,

    /// Width of one pulse in microseconds
    pub pulse_width_us: u32,

    /// Nominal pulse counts per symbol
    pub symbols: SymbolTable,

    /// Times each frame is sent per `send()`
    pub repeat_count: u8,

    /// Transmit pin number
    pub tx_pin: u8,

    /// Receive pin number
    pub rx_pin: u8,
}

impl LinkConfig {
    /// Reference configuration
    pub const DEFAULT: LinkConfig = LinkConfig {
        clock_hz: DEFAULT_CLOCK_HZ,
        pulse_width_us: DEFAULT_PULSE_WIDTH_US,
        symbols: SymbolTable::DEFAULT,
        repeat_count: DEFAULT_REPEAT_COUNT,
        tx_pin: DEFAULT_TX_PIN,
        rx_pin: DEFAULT_RX_PIN,
    };

    /// Set the MCU clock
    pub const fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    /// Set the pulse width
    pub const fn with_pulse_width_us(mut self, pulse_width_us: u32) -> Self {
        self.pulse_width_us = pulse_width_us;
        self
    }

    /// Set the symbol table
    pub const fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the repeat count
    pub const fn with_repeat_count(mut self, repeat_count: u8) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Set the TX and RX pin numbers
    pub const fn with_pins(mut self, tx_pin: u8, rx_pin: u8) -> Self {
        self.tx_pin = tx_pin;
        self.rx_pin = rx_pin;
        self
    }

    /// Timer settings for this clock and pulse width
    pub const fn timer_settings(&self) -> Result<TimerSettings, ConfigError> {
        TimerSettings::configure(self.clock_hz, self.pulse_width_us)
    }

    /// Tolerance windows for the receive side
    pub const fn tolerances(&self) -> ToleranceTable {
        ToleranceTable::from_symbols(&self.symbols)
    }

    /// Validate timing, symbols and repeat count.
    ///
    /// Pin conflicts only matter when both roles are enabled; see
    /// [`LinkConfig::validate_pins`].
    pub const fn validate(&self) -> Result<TimerSettings, ConfigError> {
        if let Err(e) = self.symbols.validate() {
            return Err(e);
        }
        if self.repeat_count == 0 {
            return Err(ConfigError::ZeroRepeatCount);
        }
        self.timer_settings()
    }

    /// Reject a node that transmits and receives on the same pin
    pub const fn validate_pins(&self) -> Result<(), ConfigError> {
        if self.tx_pin == self.rx_pin {
            return Err(ConfigError::PinConflict(self.tx_pin));
        }
        Ok(())
    }

    /// Validate or fail constant evaluation.
    ///
    /// Also checks pins, as a `const` configuration usually serves a node
    /// with both roles.
    pub const fn check(self) -> Self {
        if let Err(e) = self.validate() {
            panic!("{}", e.as_str());
        }
        if let Err(e) = self.validate_pins() {
            panic!("{}", e.as_str());
        }
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Validate a frame size chosen at runtime
pub const fn validate_frame_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_FRAME_SIZE || size > MAX_FRAME_SIZE {
        return Err(ConfigError::FrameSizeOutOfRange(size));
    }
    Ok(())
}
