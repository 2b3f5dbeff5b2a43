//! Host simulation of the timer, interrupt controller and pins
//!
//! Time only advances when the pulse counter is read, one tick per read,
//! so the transmitter's busy-wait loops run to completion instantly and
//! deterministically.

use crate::hal::{PulseClock, RfHardware};
use crate::timing::TimerSettings;
use crate::types::Pulse;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Virtual time shared by simulated hardware and pins
#[derive(Debug, Default)]
pub struct SimTimeline {
    now: Cell<u32>,
    transitions: RefCell<Vec<(u32, bool)>>,
}

impl SimTimeline {
    /// Timeline at tick zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current absolute tick
    pub fn now(&self) -> u32 {
        self.now.get()
    }

    /// Move time forward
    pub fn advance(&self, ticks: u32) {
        self.now.set(self.now.get() + ticks);
    }

    /// Output level changes as `(tick, level)`
    pub fn transitions(&self) -> Vec<(u32, bool)> {
        self.transitions.borrow().clone()
    }

    fn record(&self, level: bool) {
        let mut transitions = self.transitions.borrow_mut();
        let last = transitions.last().map_or(false, |(_, l)| *l);
        if last != level {
            transitions.push((self.now.get(), level));
        }
    }

    /// Reconstruct the emitted pulses.
    ///
    /// The low of the last pulse runs until the current tick.
    pub fn pulses(&self) -> Vec<Pulse> {
        let transitions = self.transitions.borrow();
        let rises: Vec<u32> = transitions
            .iter()
            .filter(|(_, level)| *level)
            .map(|(t, _)| *t)
            .collect();
        let falls: Vec<u32> = transitions
            .iter()
            .filter(|(_, level)| !*level)
            .map(|(t, _)| *t)
            .collect();

        rises
            .iter()
            .zip(falls.iter())
            .enumerate()
            .map(|(i, (rise, fall))| {
                let end = rises.get(i + 1).copied().unwrap_or(self.now());
                Pulse::new(saturate(fall - rise), saturate(end - fall))
            })
            .collect()
    }
}

fn saturate(ticks: u32) -> u8 {
    ticks.min(u8::MAX as u32) as u8
}

/// Simulated timer and interrupt controller
#[derive(Debug)]
pub struct SimHardware<'a> {
    timeline: &'a SimTimeline,
    base: Cell<u32>,
    edge_interrupt: bool,
    interrupts: bool,
    timer: Option<TimerSettings>,
    mask_changes: Vec<bool>,
}

impl<'a> SimHardware<'a> {
    /// Hardware with the timer stopped and interrupts off
    pub fn new(timeline: &'a SimTimeline) -> Self {
        Self {
            timeline,
            base: Cell::new(timeline.now()),
            edge_interrupt: false,
            interrupts: false,
            timer: None,
            mask_changes: Vec::new(),
        }
    }

    /// Settings last programmed into the timer
    pub fn timer(&self) -> Option<TimerSettings> {
        self.timer
    }

    /// Whether interrupts were globally enabled
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts
    }

    /// Every value written to the edge-interrupt mask, in order
    pub fn mask_changes(&self) -> &[bool] {
        &self.mask_changes
    }
}

impl PulseClock for SimHardware<'_> {
    fn ticks(&self) -> u8 {
        self.timeline.advance(1);
        saturate(self.timeline.now() - self.base.get())
    }

    fn reset(&self) {
        self.base.set(self.timeline.now());
    }
}

impl RfHardware for SimHardware<'_> {
    fn configure_timer(&mut self, settings: &TimerSettings) {
        self.timer = Some(*settings);
    }

    fn edge_interrupt_enabled(&self) -> bool {
        self.edge_interrupt
    }

    fn set_edge_interrupt(&mut self, enabled: bool) {
        self.mask_changes.push(enabled);
        self.edge_interrupt = enabled;
    }

    fn enable_interrupts(&mut self) {
        self.interrupts = true;
    }
}

/// Output pin recording level changes on a timeline
#[derive(Debug)]
pub struct RecordingPin<'a> {
    timeline: &'a SimTimeline,
}

impl<'a> RecordingPin<'a> {
    /// Pin writing to `timeline`
    pub fn new(timeline: &'a SimTimeline) -> Self {
        Self { timeline }
    }
}

impl ErrorType for RecordingPin<'_> {
    type Error = Infallible;
}

impl OutputPin for RecordingPin<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.timeline.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.timeline.record(true);
        Ok(())
    }
}

/// Input pin reading a shared level
#[derive(Debug)]
pub struct LevelPin<'a> {
    level: &'a Cell<bool>,
}

impl<'a> LevelPin<'a> {
    /// Pin reporting `level`
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl ErrorType for LevelPin<'_> {
    type Error = Infallible;
}

impl InputPin for LevelPin<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_per_read() {
        let timeline = SimTimeline::new();
        let hw = SimHardware::new(&timeline);
        assert_eq!(hw.ticks(), 1);
        assert_eq!(hw.ticks(), 2);
        hw.reset();
        assert_eq!(hw.ticks(), 1);
        assert_eq!(timeline.now(), 3);
    }

    #[test]
    fn test_pulses_from_transitions() {
        let timeline = SimTimeline::new();
        let mut pin = RecordingPin::new(&timeline);
        pin.set_high().unwrap();
        timeline.advance(1);
        pin.set_low().unwrap();
        timeline.advance(31);
        pin.set_high().unwrap();
        timeline.advance(3);
        pin.set_low().unwrap();
        timeline.advance(1);

        assert_eq!(timeline.pulses(), vec![Pulse::new(1, 31), Pulse::new(3, 1)]);
    }

    #[test]
    fn test_repeated_level_not_recorded() {
        let timeline = SimTimeline::new();
        let mut pin = RecordingPin::new(&timeline);
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        pin.set_high().unwrap();
        assert_eq!(timeline.transitions(), vec![(0, true)]);
    }
}
