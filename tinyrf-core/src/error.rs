//! Error types for TinyRF link configuration

use crate::types::PulseSymbol;

/// Errors that make a link configuration unusable.
///
/// Every variant is a configuration-time failure. Line noise is never an
/// error: the receiver drops malformed pulses and resynchronizes.
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No prescaler can stretch the timer to one pulse width
    #[cfg_attr(
        feature = "std",
        error("No timer prescaler can handle a {pulse_width_us}us pulse at {clock_hz}Hz")
    )]
    NoPrescaler {
        /// MCU clock in Hz.
        clock_hz: u32,
        /// Requested pulse width in microseconds.
        pulse_width_us: u32,
    },

    /// The compare value for the chosen prescaler does not fit 1..=255
    #[cfg_attr(
        feature = "std",
        error("Timer compare value {compare} out of range 1 - 255 (prescaler {divisor})")
    )]
    CounterOutOfRange {
        /// Prescaler divisor that was selected.
        divisor: u16,
        /// Compare value it would require.
        compare: u64,
    },

    /// A symbol has a zero high or low pulse count
    #[cfg_attr(feature = "std", error("{0:?} pulse counts must be > 0"))]
    ZeroPulseCount(PulseSymbol),

    /// A symbol's high + low pulse count exceeds the counter range
    #[cfg_attr(feature = "std", error("{0:?} high + low pulses must be <= 255"))]
    SymbolTooLong(PulseSymbol),

    /// Frame size outside 1..=255
    #[cfg_attr(feature = "std", error("Frame size {0} must be in range 1 - 255"))]
    FrameSizeOutOfRange(usize),

    /// Repeat count of zero would never transmit
    #[cfg_attr(feature = "std", error("Repeat count must be > 0"))]
    ZeroRepeatCount,

    /// Transmit and receive roles share a pin
    #[cfg_attr(feature = "std", error("TX pin and RX pin must not be the same (pin {0})"))]
    PinConflict(u8),
}

impl ConfigError {
    /// Static description usable in `const` panics
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::NoPrescaler { .. } => {
                "Couldn't find any valid timer prescaler value to handle pulse duration"
            }
            ConfigError::CounterOutOfRange { .. } => "Timer counter max value is out of range",
            ConfigError::ZeroPulseCount(_) => "Symbol pulse counts must be > 0",
            ConfigError::SymbolTooLong(_) => "Symbol high + low pulses must be <= 255",
            ConfigError::FrameSizeOutOfRange(_) => "Frame size must be in range 1 - 255",
            ConfigError::ZeroRepeatCount => "Repeat count must be > 0",
            ConfigError::PinConflict(_) => "TX pin and RX pin must not be the same",
        }
    }
}
