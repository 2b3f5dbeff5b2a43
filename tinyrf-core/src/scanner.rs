//! Recorded edge-trace scanner
//!
//! Runs the receive state machine over a whole capture and collects every
//! frame it completes, instead of stopping at the first one like the
//! interrupt-driven receiver does.

use crate::decoder::{DecodeStep, Decoder};
use crate::tolerance::ToleranceTable;
use crate::types::EdgeEvent;

#[cfg(feature = "logging")]
use tracing::debug;

/// A frame completed at a specific edge of the trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Index of the edge that completed the frame
    pub edge_index: usize,

    /// Frame bytes
    pub bytes: Vec<u8>,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total edges scanned
    pub edges_scanned: usize,

    /// SYNC patterns recognised
    pub syncs_found: usize,

    /// Data bits accepted
    pub bits_decoded: usize,

    /// Frames aborted by an out-of-tolerance symbol
    pub frames_dropped: usize,

    /// Frames completed
    pub frames_found: usize,
}

impl ScanStats {
    /// Completed frames per SYNC, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.syncs_found == 0 {
            0.0
        } else {
            (self.frames_found as f64 / self.syncs_found as f64) * 100.0
        }
    }
}

/// Scan a trace for `frame_size`-byte frames
pub fn scan_edges<I>(windows: &ToleranceTable, frame_size: usize, edges: I) -> Vec<CapturedFrame>
where
    I: IntoIterator<Item = EdgeEvent>,
{
    scan_edges_with_stats(windows, frame_size, edges).0
}

/// Scan a trace with statistics
pub fn scan_edges_with_stats<I>(
    windows: &ToleranceTable,
    frame_size: usize,
    edges: I,
) -> (Vec<CapturedFrame>, ScanStats)
where
    I: IntoIterator<Item = EdgeEvent>,
{
    let mut decoder = Decoder::new(*windows);
    let mut buffer = vec![0u8; frame_size];
    let mut frames = Vec::new();
    let mut stats = ScanStats::default();

    for (index, event) in edges.into_iter().enumerate() {
        stats.edges_scanned += 1;
        match decoder.on_edge(event, &mut buffer) {
            DecodeStep::Ignored => {}
            DecodeStep::Synced => stats.syncs_found += 1,
            DecodeStep::Bit(_) => stats.bits_decoded += 1,
            DecodeStep::Dropped => stats.frames_dropped += 1,
            DecodeStep::FrameComplete => {
                stats.bits_decoded += 1;
                stats.frames_found += 1;

                #[cfg(feature = "logging")]
                debug!("Frame complete at edge {}", index);

                frames.push(CapturedFrame {
                    edge_index: index,
                    bytes: buffer.clone(),
                });
            }
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} frames from {} edges ({} syncs, {} dropped)",
        stats.frames_found, stats.edges_scanned, stats.syncs_found, stats.frames_dropped
    );

    (frames, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_pulses, pulse_edges};
    use crate::symbols::SymbolTable;

    fn windows() -> ToleranceTable {
        ToleranceTable::from_symbols(&SymbolTable::DEFAULT)
    }

    #[test]
    fn test_every_repetition_is_captured() {
        let edges = pulse_edges(encode_pulses(&SymbolTable::DEFAULT, &[0xC3, 0x3C], 4), 0);
        let (frames, stats) = scan_edges_with_stats(&windows(), 2, edges);

        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.bytes == vec![0xC3, 0x3C]));
        assert_eq!(stats.syncs_found, 4);
        assert_eq!(stats.bits_decoded, 4 * 16);
        assert_eq!(stats.frames_dropped, 0);
        assert_eq!(stats.completion_rate(), 100.0);
    }

    #[test]
    fn test_empty_trace() {
        let (frames, stats) = scan_edges_with_stats(&windows(), 3, Vec::new());
        assert!(frames.is_empty());
        assert_eq!(stats.completion_rate(), 0.0);
    }
}
