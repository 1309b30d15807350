//! Synchronization Controller
//!
//! The per-tick state machine that turns raw 1 kHz samples into a stream of
//! classified second-symbols while acquiring and defending phase lock:
//!
//! ```text
//!            rising edge anchors bank          quality < threshold
//!   ┌────────┐  good early second   ┌──────┐ ─────────────────────▶ ┌──────┐
//!   │ COARSE │ ────────────────────▶│ FINE │                        │ HOLD │
//!   └────────┘                      └──────┘ ◀───────────────────── └──────┘
//!        ▲                                     good non-mark second     │
//!        └──────────────────────────────────────────────────────────────┘
//!                       hold counter exceeds max_hold_symbols
//! ```
//!
//! [`SyncController::on_tick`] is the entire core: a pure state transition
//! invoked once per strobe by an external periodic source. It never blocks
//! and never allocates, so it fits inside a timer interrupt with a 1 ms
//! budget. Degraded signal is represented as data (low quality, hold
//! counter), never as an error.
//!
//! ## Example
//!
//! ```rust
//! use dcf77_core::config::DecoderConfig;
//! use dcf77_core::sync_controller::{SyncController, SyncMode};
//! use dcf77_core::symbol_detector::Symbol;
//! use dcf77_core::waveform::second;
//!
//! let config = DecoderConfig::default();
//! let mut ctl = SyncController::new(config.clone());
//!
//! // Some silence, then a clean ZERO second starting on a rising edge.
//! let mut samples = vec![false; 3];
//! samples.extend(second(Symbol::Zero, &config));
//! samples.extend(second(Symbol::One, &config));
//!
//! let events = ctl.process(&samples);
//! assert_eq!(ctl.mode(), SyncMode::Fine);
//! assert_eq!(events.last().unwrap().symbol, Symbol::One);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DecoderConfig;
use crate::edge_trigger::EdgeTrigger;
use crate::phase_bank::PhaseBank;
use crate::symbol_detector::Symbol;

/// Synchronization mode of the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Acquiring: waiting for a rising edge to anchor the window boundary.
    Coarse,
    /// Locked: trusting the free-running window boundary.
    Fine,
    /// Hold-over: coasting through degraded signal without dropping lock.
    Hold,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Coarse => write!(f, "coarse"),
            SyncMode::Fine => write!(f, "fine"),
            SyncMode::Hold => write!(f, "hold"),
        }
    }
}

/// One resolved second from the operating detector, emitted once per second
/// for a downstream minute-frame consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEvent {
    /// Classified second-symbol.
    pub symbol: Symbol,
    /// Combined 0..=1000 confidence of the classification.
    pub quality: u32,
}

/// Per-tick decoder core: edge trigger, triple-phase bank, and the
/// COARSE/FINE/HOLD state machine, all owned by one execution context.
#[derive(Debug, Clone)]
pub struct SyncController {
    config: DecoderConfig,
    bank: PhaseBank,
    edge: EdgeTrigger,
    mode: SyncMode,
    /// Consecutive degraded seconds observed while in hold-over.
    hold_counter: u32,
    /// Lock indicator: solid in FINE, blinking each resolved second in
    /// HOLD, dark in COARSE. Mirrors a front-panel LED.
    indicator: bool,
    ticks: u64,
}

impl SyncController {
    /// Create a controller in coarse acquisition.
    pub fn new(config: DecoderConfig) -> Self {
        let bank = PhaseBank::new(&config);
        Self {
            config,
            bank,
            edge: EdgeTrigger::new(),
            mode: SyncMode::Coarse,
            hold_counter: 0,
            indicator: false,
            ticks: 0,
        }
    }

    /// Process one strobe sample. Call exactly once per 1 ms tick.
    ///
    /// Returns the operating detector's resolved second, once per second,
    /// in any mode. Mode transitions happen here and only here.
    pub fn on_tick(&mut self, sample: bool) -> Option<SymbolEvent> {
        self.ticks += 1;
        let rising = self.edge.update(sample);

        // Coarse acquisition acts on the state left by the previous tick:
        // the early detector's ready flag survives until its next advance.
        if self.mode == SyncMode::Coarse {
            let early = self.bank.early();
            if early.ready() {
                // Minute-mark seconds carry no pulse and give the edge
                // trigger nothing to calibrate against, so they are
                // rejected as lock anchors.
                if early.last_symbol() != Symbol::MinuteMark
                    && early.last_quality() >= self.config.quality_threshold
                {
                    self.enter_fine("acquired");
                }
            } else if rising {
                self.bank.anchor(self.config.finesync_offset as i32);
                debug!(tick = self.ticks, "rising edge, re-anchoring detector bank");
            }
        }

        // All three detectors run every tick regardless of mode.
        self.bank.advance_all(sample);

        // Each resolved second is interpreted under exactly one mode: the
        // second that drops FINE to HOLD is not also counted against the
        // hold budget.
        match self.mode {
            SyncMode::Fine if self.bank.center().ready() => {
                let quality = self.bank.center().last_quality();
                if quality < self.config.quality_threshold {
                    // Signal degraded: stop relying on edges and coast on
                    // the free-running window. Symbol kind is irrelevant
                    // here.
                    self.mode = SyncMode::Hold;
                    self.hold_counter = 0;
                    info!(quality, "signal degraded, entering hold-over");
                }
            }
            SyncMode::Hold if self.bank.center().ready() => {
                self.indicator = !self.indicator;
                let center = self.bank.center();
                if center.last_quality() >= self.config.quality_threshold {
                    if center.last_symbol() != Symbol::MinuteMark {
                        self.hold_counter = 0;
                        self.enter_fine("reacquired");
                    }
                } else {
                    self.hold_counter += 1;
                    debug!(
                        hold_counter = self.hold_counter,
                        quality = center.last_quality(),
                        "degraded second in hold-over"
                    );
                    if self.hold_counter > self.config.max_hold_symbols {
                        self.mode = SyncMode::Coarse;
                        self.indicator = false;
                        info!(
                            seconds = self.hold_counter,
                            "hold-over exhausted, dropping lock for re-acquisition"
                        );
                    }
                }
            }
            _ => {}
        }

        if self.bank.center().ready() {
            Some(SymbolEvent {
                symbol: self.bank.center().last_symbol(),
                quality: self.bank.center().last_quality(),
            })
        } else {
            None
        }
    }

    fn enter_fine(&mut self, how: &str) {
        self.mode = SyncMode::Fine;
        self.indicator = true;
        info!(tick = self.ticks, "phase lock {how}");
    }

    /// Convenience block driver for tests, tools, and simulation. The
    /// interrupt path is [`Self::on_tick`].
    pub fn process(&mut self, samples: &[bool]) -> Vec<SymbolEvent> {
        let mut events = Vec::new();
        for &sample in samples {
            if let Some(event) = self.on_tick(sample) {
                events.push(event);
            }
        }
        events
    }

    /// Current synchronization mode.
    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Lock indicator state (solid in FINE, blinking in HOLD, dark in
    /// COARSE). Intended to drive an external LED or telemetry flag.
    pub fn indicator(&self) -> bool {
        self.indicator
    }

    /// Consecutive degraded seconds counted in the current hold-over.
    pub fn hold_counter(&self) -> u32 {
        self.hold_counter
    }

    /// Total ticks processed since creation or reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Detector bank, for phase diagnostics.
    pub fn bank(&self) -> &PhaseBank {
        &self.bank
    }

    /// Return to the power-on state: coarse acquisition, dark indicator.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}
