//! Symbol table agreed by both ends of the link

use crate::constants::{DEFAULT_ONE_PULSES, DEFAULT_SYNC_PULSES, DEFAULT_ZERO_PULSES};
use crate::error::ConfigError;
use crate::types::{Pulse, PulseSymbol};
use serde::{Deserialize, Serialize};

/// Nominal pulse counts for SYNC, ONE and ZERO.
///
/// Transmitter and receiver must be built with the same table; nothing on
/// the wire identifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTable {
    /// Frame delimiter
    pub sync: Pulse,

    /// `1` bit
    pub one: Pulse,

    /// `0` bit
    pub zero: Pulse,
}

impl SymbolTable {
    /// The table used by the reference hardware: SYNC (1,31), ONE (3,1), ZERO (1,3)
    pub const DEFAULT: SymbolTable = SymbolTable {
        sync: Pulse::new(DEFAULT_SYNC_PULSES.0, DEFAULT_SYNC_PULSES.1),
        one: Pulse::new(DEFAULT_ONE_PULSES.0, DEFAULT_ONE_PULSES.1),
        zero: Pulse::new(DEFAULT_ZERO_PULSES.0, DEFAULT_ZERO_PULSES.1),
    };

    /// Create a table from explicit pulses
    pub const fn new(sync: Pulse, one: Pulse, zero: Pulse) -> Self {
        Self { sync, one, zero }
    }

    /// Nominal pulse for a symbol
    pub const fn pulse(&self, symbol: PulseSymbol) -> Pulse {
        match symbol {
            PulseSymbol::Sync => self.sync,
            PulseSymbol::One => self.one,
            PulseSymbol::Zero => self.zero,
        }
    }

    /// Check every symbol fits the 8-bit pulse counter
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let symbols = [PulseSymbol::Sync, PulseSymbol::One, PulseSymbol::Zero];
        let mut i = 0;
        while i < symbols.len() {
            let pulse = self.pulse(symbols[i]);
            if pulse.high == 0 || pulse.low == 0 {
                return Err(ConfigError::ZeroPulseCount(symbols[i]));
            }
            if pulse.total() > u8::MAX as u16 {
                return Err(ConfigError::SymbolTooLong(symbols[i]));
            }
            i += 1;
        }
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
