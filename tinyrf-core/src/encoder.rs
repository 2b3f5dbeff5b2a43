//! Frame encoding into symbols, pulses and edges
//!
//! A burst is `repeat` copies of `SYNC + frame bits (MSB first)`, closed by
//! one trailing SYNC. The trailing SYNC's rising edge is what terminates the
//! low interval of the last data bit at the receiver.
//!
//! Everything here is an allocation-free iterator so the transmitter can
//! drive pins from it directly on a microcontroller.

use crate::constants::BITS_PER_BYTE;
use crate::symbols::SymbolTable;
use crate::types::{EdgeEvent, Pulse, PulseSymbol};

/// Symbols of a complete burst
#[derive(Debug, Clone)]
pub struct Symbols<'a> {
    frame: &'a [u8],
    repeat: u8,
    index: usize,
}

impl<'a> Symbols<'a> {
    fn per_repeat(&self) -> usize {
        1 + self.frame.len() * BITS_PER_BYTE as usize
    }

    fn total(&self) -> usize {
        self.repeat as usize * self.per_repeat() + 1
    }

    fn symbol_at(&self, index: usize) -> PulseSymbol {
        let offset = index % self.per_repeat();
        if index >= self.repeat as usize * self.per_repeat() || offset == 0 {
            return PulseSymbol::Sync;
        }
        let bit = offset - 1;
        let byte = self.frame[bit / BITS_PER_BYTE as usize];
        let shift = BITS_PER_BYTE as usize - 1 - bit % BITS_PER_BYTE as usize;
        PulseSymbol::from_bit((byte >> shift) & 1 == 1)
    }
}

impl Iterator for Symbols<'_> {
    type Item = PulseSymbol;

    fn next(&mut self) -> Option<PulseSymbol> {
        if self.index >= self.total() {
            return None;
        }
        let symbol = self.symbol_at(self.index);
        self.index += 1;
        Some(symbol)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Symbols<'_> {}

/// Encode a frame into the symbols of one burst
pub fn encode_symbols(frame: &[u8], repeat: u8) -> Symbols<'_> {
    Symbols {
        frame,
        repeat,
        index: 0,
    }
}

/// Nominal pulses of a complete burst
#[derive(Debug, Clone)]
pub struct Pulses<'a> {
    symbols: Symbols<'a>,
    table: SymbolTable,
}

impl Iterator for Pulses<'_> {
    type Item = Pulse;

    fn next(&mut self) -> Option<Pulse> {
        self.symbols.next().map(|symbol| self.table.pulse(symbol))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.symbols.size_hint()
    }
}

impl ExactSizeIterator for Pulses<'_> {}

/// Encode a frame into the nominal pulses of one burst
pub fn encode_pulses<'a>(table: &SymbolTable, frame: &'a [u8], repeat: u8) -> Pulses<'a> {
    Pulses {
        symbols: encode_symbols(frame, repeat),
        table: *table,
    }
}

/// Edges a receiver would observe for a pulse train
#[derive(Debug, Clone)]
pub struct EdgeEvents<I> {
    pulses: I,
    prev_low: u8,
    pending_fall: Option<u8>,
}

impl<I: Iterator<Item = Pulse>> Iterator for EdgeEvents<I> {
    type Item = EdgeEvent;

    fn next(&mut self) -> Option<EdgeEvent> {
        if let Some(high) = self.pending_fall.take() {
            return Some(EdgeEvent::falling(high));
        }
        let pulse = self.pulses.next()?;
        let rising = EdgeEvent::rising(self.prev_low);
        self.prev_low = pulse.low;
        self.pending_fall = Some(pulse.high);
        Some(rising)
    }
}

/// Convert pulses into edge events.
///
/// Each pulse contributes a rising edge (timed by the previous low, or
/// `lead_in` for the first) and a falling edge timed by its high. The
/// final low has no closing edge.
pub fn pulse_edges<I>(pulses: I, lead_in: u8) -> EdgeEvents<I::IntoIter>
where
    I: IntoIterator<Item = Pulse>,
{
    EdgeEvents {
        pulses: pulses.into_iter(),
        prev_low: lead_in,
        pending_fall: None,
    }
}

/// Total duration of a burst in ticks
pub fn burst_ticks(table: &SymbolTable, frame: &[u8], repeat: u8) -> u32 {
    encode_pulses(table, frame, repeat)
        .map(|pulse| pulse.total() as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edge;

    #[test]
    fn test_symbols_msb_first_with_trailing_sync() {
        let symbols: Vec<_> = encode_symbols(&[0b1000_0001], 1).collect();
        assert_eq!(symbols.len(), 1 + 8 + 1);
        assert_eq!(symbols[0], PulseSymbol::Sync);
        assert_eq!(symbols[1], PulseSymbol::One);
        assert!(symbols[2..8].iter().all(|s| *s == PulseSymbol::Zero));
        assert_eq!(symbols[8], PulseSymbol::One);
        assert_eq!(symbols[9], PulseSymbol::Sync);
    }

    #[test]
    fn test_repeats_are_sync_delimited() {
        let symbols: Vec<_> = encode_symbols(&[0xFF, 0x00], 3).collect();
        assert_eq!(symbols.len(), 3 * 17 + 1);
        let syncs: Vec<_> = symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == PulseSymbol::Sync)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(syncs, vec![0, 17, 34, 51]);
    }

    #[test]
    fn test_exact_size() {
        let symbols = encode_symbols(&[1, 2, 3], 10);
        assert_eq!(symbols.len(), 10 * 25 + 1);
        let pulses = encode_pulses(&SymbolTable::DEFAULT, &[1, 2, 3], 10);
        assert_eq!(pulses.len(), 251);
    }

    #[test]
    fn test_edges_alternate() {
        let pulses = [Pulse::new(1, 31), Pulse::new(3, 1)];
        let edges: Vec<_> = pulse_edges(pulses, 0).collect();
        assert_eq!(
            edges,
            vec![
                EdgeEvent::rising(0),
                EdgeEvent::falling(1),
                EdgeEvent::rising(31),
                EdgeEvent::falling(3),
            ]
        );
        assert_eq!(edges[0].edge, Edge::Rising);
    }

    #[test]
    fn test_burst_duration() {
        // SYNC (32) + 8 bits of 4 ticks each, twice, plus trailing SYNC
        let ticks = burst_ticks(&SymbolTable::DEFAULT, &[0x5A], 2);
        assert_eq!(ticks, 2 * (32 + 8 * 4) + 32);
    }
}
