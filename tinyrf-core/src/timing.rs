//! Timing base: one timer tick per pulse width
//!
//! The 8-bit timer runs in clear-on-compare mode. The compare interrupt
//! fires once per pulse width and advances a [`TickCounter`], which both
//! the transmitter (busy-wait) and the receiver (edge sampling) read and
//! reset.

use crate::constants::{COUNTER_MAX, PRESCALER_DIVISORS};
use crate::error::ConfigError;
use crate::hal::PulseClock;
use core::sync::atomic::{AtomicU8, Ordering};
use serde::{Deserialize, Serialize};

/// Timer clock divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prescaler {
    /// CLK/1
    Div1,
    /// CLK/8
    Div8,
    /// CLK/64
    Div64,
    /// CLK/256
    Div256,
    /// CLK/1024
    Div1024,
}

impl Prescaler {
    /// All prescalers, finest first
    pub const ALL: [Prescaler; 5] = [
        Prescaler::Div1,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    /// Divisor applied to the MCU clock
    pub const fn divisor(&self) -> u16 {
        match self {
            Prescaler::Div1 => PRESCALER_DIVISORS[0],
            Prescaler::Div8 => PRESCALER_DIVISORS[1],
            Prescaler::Div64 => PRESCALER_DIVISORS[2],
            Prescaler::Div256 => PRESCALER_DIVISORS[3],
            Prescaler::Div1024 => PRESCALER_DIVISORS[4],
        }
    }

    /// CS02:CS00 clock-select bits for TCCR0B
    pub const fn clock_select_bits(&self) -> u8 {
        match self {
            Prescaler::Div1 => 0b001,
            Prescaler::Div8 => 0b010,
            Prescaler::Div64 => 0b011,
            Prescaler::Div256 => 0b100,
            Prescaler::Div1024 => 0b101,
        }
    }
}

/// Timer register values for one tick per pulse width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Selected clock divisor
    pub prescaler: Prescaler,

    /// Compare value; the timer clears after `compare + 1` prescaled clocks
    pub compare: u8,
}

impl TimerSettings {
    /// Pick timer settings for a clock and pulse width.
    ///
    /// Takes the finest prescaler whose counter can span one pulse width,
    /// then checks the compare value fits `1..=255`.
    pub const fn configure(clock_hz: u32, pulse_width_us: u32) -> Result<Self, ConfigError> {
        // Prescaled clocks per pulse, scaled by 1e6 to stay in integers
        let clocks_e6 = clock_hz as u64 * pulse_width_us as u64;
        let span_e6 = COUNTER_MAX as u64 * 1_000_000;

        let mut i = 0;
        while i < Prescaler::ALL.len() {
            let prescaler = Prescaler::ALL[i];
            let divisor = prescaler.divisor() as u64;
            if clocks_e6 <= divisor * span_e6 {
                let ticks = clocks_e6 / (1_000_000 * divisor);
                if ticks < 2 || ticks - 1 > COUNTER_MAX as u64 {
                    return Err(ConfigError::CounterOutOfRange {
                        divisor: prescaler.divisor(),
                        compare: ticks.saturating_sub(1),
                    });
                }
                return Ok(Self {
                    prescaler,
                    compare: (ticks - 1) as u8,
                });
            }
            i += 1;
        }

        Err(ConfigError::NoPrescaler {
            clock_hz,
            pulse_width_us,
        })
    }

    /// Timer clocks per tick
    pub const fn clocks_per_tick(&self) -> u64 {
        (self.compare as u64 + 1) * self.prescaler.divisor() as u64
    }

    /// Effective pulse width in nanoseconds at the given clock
    pub const fn pulse_width_ns(&self, clock_hz: u32) -> u64 {
        self.clocks_per_tick() * 1_000_000_000 / clock_hz as u64
    }
}

/// Software pulse counter advanced by the timer compare interrupt.
///
/// Saturates at 255 instead of wrapping so a long idle line never
/// aliases into a symbol window.
#[derive(Debug)]
pub struct TickCounter {
    ticks: AtomicU8,
}

impl TickCounter {
    /// Counter at zero
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU8::new(0),
        }
    }

    /// Call from the timer compare-match interrupt.
    ///
    /// Load and store are separate so targets without compare-and-swap
    /// work; the compare interrupt is the only writer besides `reset`.
    #[inline]
    pub fn on_compare_match(&self) {
        let ticks = self.ticks.load(Ordering::Relaxed);
        self.ticks.store(ticks.saturating_add(1), Ordering::Relaxed);
    }
}

impl TickCounter {
    /// Pair the counter with the routine that clears the hardware timer
    /// count, so a reset restarts a full tick.
    pub fn with_timer_clear<F: Fn()>(&self, clear_timer: F) -> TimerClock<'_, F> {
        TimerClock {
            counter: self,
            clear_timer,
        }
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseClock for TickCounter {
    #[inline]
    fn ticks(&self) -> u8 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Zeroes the software count only; see [`TickCounter::with_timer_clear`]
    #[inline]
    fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }
}

/// [`TickCounter`] whose reset also clears the hardware timer
#[derive(Debug)]
pub struct TimerClock<'a, F> {
    counter: &'a TickCounter,
    clear_timer: F,
}

impl<F: Fn()> PulseClock for TimerClock<'_, F> {
    #[inline]
    fn ticks(&self) -> u8 {
        self.counter.ticks()
    }

    #[inline]
    fn reset(&self) {
        (self.clear_timer)();
        self.counter.reset();
    }
}
