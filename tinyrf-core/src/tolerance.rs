//! Receive tolerance windows derived from the symbol table
//!
//! Every nominal count `n` is accepted within `[n * 0.3, n * 1.7]`, both
//! bounds truncated to whole ticks and both inclusive.

use crate::constants::TOLERANCE_PERCENT;
use crate::symbols::SymbolTable;
use crate::types::{Pulse, PulseSymbol};
use serde::{Deserialize, Serialize};

/// Inclusive range of accepted tick counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceWindow {
    /// Smallest accepted count
    pub min: u8,

    /// Largest accepted count
    pub max: u8,
}

impl ToleranceWindow {
    /// Window around a nominal count.
    ///
    /// The upper bound saturates at the counter maximum.
    pub const fn around(nominal: u8) -> Self {
        let n = nominal as u16;
        let min = n * (100 - TOLERANCE_PERCENT) / 100;
        let max = n * (100 + TOLERANCE_PERCENT) / 100;
        Self {
            min: min as u8,
            max: if max > u8::MAX as u16 {
                u8::MAX
            } else {
                max as u8
            },
        }
    }

    /// Inclusive membership test
    #[inline]
    pub const fn contains(&self, ticks: u8) -> bool {
        ticks >= self.min && ticks <= self.max
    }

    /// Whether two windows share at least one tick value
    pub const fn intersects(&self, other: &ToleranceWindow) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// High and low windows for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolWindows {
    /// Window for the high interval
    pub high: ToleranceWindow,

    /// Window for the low interval
    pub low: ToleranceWindow,
}

impl SymbolWindows {
    /// Windows around a nominal pulse
    pub const fn around(pulse: Pulse) -> Self {
        Self {
            high: ToleranceWindow::around(pulse.high),
            low: ToleranceWindow::around(pulse.low),
        }
    }

    /// Whether a measured (high, low) pair falls in both windows
    #[inline]
    pub const fn matches(&self, high: u8, low: u8) -> bool {
        self.high.contains(high) && self.low.contains(low)
    }

    /// Whether some (high, low) pair would match both symbols
    pub const fn overlaps(&self, other: &SymbolWindows) -> bool {
        self.high.intersects(&other.high) && self.low.intersects(&other.low)
    }
}

/// Tolerance windows for every symbol, computed once from a [`SymbolTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceTable {
    /// SYNC windows
    pub sync: SymbolWindows,

    /// ONE windows
    pub one: SymbolWindows,

    /// ZERO windows
    pub zero: SymbolWindows,
}

impl ToleranceTable {
    /// Derive the windows for a symbol table
    pub const fn from_symbols(table: &SymbolTable) -> Self {
        Self {
            sync: SymbolWindows::around(table.sync),
            one: SymbolWindows::around(table.one),
            zero: SymbolWindows::around(table.zero),
        }
    }

    /// Windows for a symbol
    pub const fn windows(&self, symbol: PulseSymbol) -> &SymbolWindows {
        match symbol {
            PulseSymbol::Sync => &self.sync,
            PulseSymbol::One => &self.one,
            PulseSymbol::Zero => &self.zero,
        }
    }

    /// Whether a (high, low) pair is a SYNC
    #[inline]
    pub const fn is_sync(&self, high: u8, low: u8) -> bool {
        self.sync.matches(high, low)
    }

    /// Classify a (high, low) pair as a data bit.
    ///
    /// ONE is tested first, so an ambiguous pair reads as `true`.
    #[inline]
    pub const fn classify_bit(&self, high: u8, low: u8) -> Option<bool> {
        if self.one.matches(high, low) {
            Some(true)
        } else if self.zero.matches(high, low) {
            Some(false)
        } else {
            None
        }
    }

    /// Whether ONE and ZERO can be confused
    pub const fn data_windows_overlap(&self) -> bool {
        self.one.overlaps(&self.zero)
    }
}
