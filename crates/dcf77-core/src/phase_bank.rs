//! Triple-Phase Detector Bank
//!
//! Three [`SymbolDetector`] instances run every tick with window starts
//! offset by `-Δ`, `0`, `+Δ` ticks. The bank gives the synchronization
//! controller simultaneous readings at three phase candidates around the
//! believed second boundary, so a phase shift can be probed without
//! restarting acquisition.
//!
//! `early` (started `+Δ` ahead) resolves first and confirms coarse
//! acquisition; `center` is the operating detector whose results are emitted
//! downstream; `late` is the symmetric trailing probe.

use crate::config::DecoderConfig;
use crate::symbol_detector::SymbolDetector;

/// Three phase-offset detector instances with named roles.
#[derive(Debug, Clone)]
pub struct PhaseBank {
    early: SymbolDetector,
    center: SymbolDetector,
    late: SymbolDetector,
}

impl PhaseBank {
    /// Create a bank with all three detectors at phase 0.
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            early: SymbolDetector::new(config),
            center: SymbolDetector::new(config),
            late: SymbolDetector::new(config),
        }
    }

    /// Advance all three detectors by one tick. Runs in every sync mode.
    pub fn advance_all(&mut self, sample: bool) {
        self.early.advance(sample);
        self.center.advance(sample);
        self.late.advance(sample);
    }

    /// Re-anchor the bank to an observed pulse start: `early` leads by
    /// `offset` ticks, `center` starts at nominal phase, `late` trails.
    pub fn anchor(&mut self, offset: i32) {
        self.early.reset(offset);
        self.center.reset(0);
        self.late.reset(-offset);
    }

    /// Leading detector, resolves `offset` ticks before `center`.
    pub fn early(&self) -> &SymbolDetector {
        &self.early
    }

    /// Operating detector; its resolved seconds are emitted downstream.
    pub fn center(&self) -> &SymbolDetector {
        &self.center
    }

    /// Trailing detector.
    pub fn late(&self) -> &SymbolDetector {
        &self.late
    }
}
