//! # DCF77 Decoder Core
//!
//! Decodes a longwave time-signal bitstream (DCF77-style amplitude-modulated
//! seconds) sampled as a boolean level at a fixed 1 kHz strobe into
//! classified second-symbols with per-symbol confidence, while acquiring and
//! defending phase lock against jitter, noise, and signal loss.
//!
//! ## Signal
//!
//! DCF77 reduces its carrier at the start of every second: for 100 ms to
//! encode a 0 bit, for 200 ms to encode a 1 bit, and not at all on second 59
//! to announce the minute boundary. Sampled at 1 kHz, one second is a
//! 1000-tick boolean window.
//!
//! ## Pipeline
//!
//! Per tick: raw sample → [`edge_trigger`] (coarse mode only) →
//! [`phase_bank`] (three phase-offset [`symbol_detector`] instances) →
//! [`sync_controller`] state machine (COARSE → FINE → HOLD), which emits one
//! `(symbol, quality)` event per resolved second from the centered detector.
//!
//! The whole core is a single synchronous state-transition function,
//! [`SyncController::on_tick`], designed to run to completion inside a
//! periodic 1 ms interrupt: no blocking, no allocation on the tick path, no
//! locking. Minute-frame assembly is a downstream consumer and is not
//! implemented here.
//!
//! ## Example
//!
//! ```rust
//! use dcf77_core::prelude::*;
//!
//! let config = DecoderConfig::default();
//! let mut decoder = SyncController::new(config.clone());
//!
//! // Silence, then a minute fragment: 0, 1, 1, minute mark.
//! let mut samples = vec![false; 5];
//! samples.extend(dcf77_core::waveform::minute(
//!     &[Symbol::Zero, Symbol::One, Symbol::One, Symbol::MinuteMark],
//!     &config,
//! ));
//!
//! let events = decoder.process(&samples);
//! assert_eq!(decoder.mode(), SyncMode::Fine);
//! let bits: Vec<Symbol> = events.iter().map(|e| e.symbol).collect();
//! assert_eq!(bits, [Symbol::Zero, Symbol::One, Symbol::One, Symbol::MinuteMark]);
//! ```

pub mod config;
pub mod edge_trigger;
pub mod logging;
pub mod phase_bank;
pub mod symbol_detector;
pub mod sync_controller;
pub mod waveform;

pub use config::DecoderConfig;
pub use symbol_detector::{Symbol, SymbolDetector};
pub use sync_controller::{SymbolEvent, SyncController, SyncMode};

/// Common imports for decoder users.
pub mod prelude {
    pub use crate::config::DecoderConfig;
    pub use crate::symbol_detector::{Symbol, SymbolDetector};
    pub use crate::sync_controller::{SymbolEvent, SyncController, SyncMode};
}
