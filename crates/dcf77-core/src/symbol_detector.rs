//! Quality-Weighted Symbol Detector
//!
//! Classifies one second of a DCF77-style amplitude-modulated signal into a
//! second-symbol by majority vote over a 1000-tick window (1 tick = 1 ms at
//! the 1 kHz strobe rate). Each tick's boolean sample feeds three competing
//! vote counters:
//!
//! ```text
//! tick      0         100        200                            1000
//!           |  short   |  long    |          silence             |
//!           | (0 or 1) | (1 only) |     (gap quality count)      |
//! ZERO:     ████████████
//! ONE:      ███████████████████████
//! MINUTE:   (no pulse at all)
//! ```
//!
//! At the window boundary the strictly-largest counter wins (ties resolve to
//! the earliest candidate in ZERO, ONE, MARK order) and the detector reports
//! a combined quality score: clean-silence ticks plus the winning vote count,
//! at most 1000 for a textbook second.
//!
//! ## Example
//!
//! ```rust
//! use dcf77_core::symbol_detector::{Symbol, SymbolDetector};
//! use dcf77_core::config::DecoderConfig;
//!
//! let config = DecoderConfig::default();
//! let mut det = SymbolDetector::new(&config);
//!
//! // A clean ZERO second: 100 ms pulse, then silence.
//! for tick in 0..1000 {
//!     det.advance(tick < 100);
//! }
//! assert!(det.ready());
//! assert_eq!(det.last_symbol(), Symbol::Zero);
//! assert_eq!(det.last_quality(), 1000);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::DecoderConfig;

/// Classified meaning of one second of signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// No usable classification (defensive default, never seen on real input).
    None,
    /// Data bit 0 (100 ms carrier reduction).
    Zero,
    /// Data bit 1 (200 ms carrier reduction).
    One,
    /// Second 59: no carrier reduction, announces the minute boundary.
    MinuteMark,
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::None => write!(f, "none"),
            Symbol::Zero => write!(f, "0"),
            Symbol::One => write!(f, "1"),
            Symbol::MinuteMark => write!(f, "minute"),
        }
    }
}

/// One windowed majority-vote detector instance.
///
/// `position` is signed: a phase-trial reset may start it ahead of
/// (`+offset`) or behind (`-offset`) the nominal window start, so a single
/// window can run a few ticks short or long while the bank probes timing.
#[derive(Debug, Clone)]
pub struct SymbolDetector {
    /// Window length in ticks (1000 at the nominal 1 kHz strobe).
    window: i32,
    /// End of the short-pulse phase (ZERO pulse duration).
    zero_end: i32,
    /// End of the long-pulse phase (ONE pulse duration).
    one_end: i32,

    /// Tick position within the current window.
    position: i32,
    /// Evidence for ZERO.
    vote0: u32,
    /// Evidence for ONE.
    vote1: u32,
    /// Evidence for MINUTE_MARK.
    vote_mark: u32,
    /// Clean-silence ticks observed in the window tail.
    gap_quality: u32,

    /// Last resolved classification.
    last_symbol: Symbol,
    /// Combined quality of the last resolved second.
    last_quality: u32,
    /// True for exactly the tick on which a window resolved.
    ready: bool,
}

impl SymbolDetector {
    /// Create a detector with zeroed state at window position 0.
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            window: config.window_ticks as i32,
            zero_end: config.zero_pulse_ticks as i32,
            one_end: config.one_pulse_ticks as i32,
            position: 0,
            vote0: 0,
            vote1: 0,
            vote_mark: 0,
            gap_quality: 0,
            last_symbol: Symbol::None,
            last_quality: 0,
            ready: false,
        }
    }

    /// Advance the window by one tick. Call exactly once per strobe.
    ///
    /// `sample` is `true` while the pulse (carrier reduction) is present.
    /// When the window boundary is reached the symbol is resolved, `ready`
    /// is raised for this tick only, and the window restarts at position 0.
    pub fn advance(&mut self, sample: bool) {
        self.ready = false;

        if self.position < self.zero_end {
            // Short-pulse phase: a pulse is still ambiguous between ZERO and
            // ONE; its absence is minute-mark evidence.
            if sample {
                self.vote0 += 1;
                self.vote1 += 1;
            } else {
                self.vote_mark += 1;
            }
        } else if self.position < self.one_end {
            // Long-pulse phase: only a ONE pulse lasts this far. Silence here
            // is consistent with both ZERO and the minute mark.
            if sample {
                self.vote1 += 1;
            } else {
                self.vote0 += 1;
                self.vote_mark += 1;
            }
        } else if !sample {
            // Silence phase: every symbol kind expects a quiet tail.
            self.gap_quality += 1;
        }

        self.position += 1;
        if self.position >= self.window {
            self.resolve();
        }
    }

    /// Externally re-anchor the window, keeping the last resolved result.
    ///
    /// `offset` shifts the window start relative to the current tick: a
    /// positive offset makes this instance resolve early, a negative one
    /// late. Vote and gap counters are zeroed.
    pub fn reset(&mut self, offset: i32) {
        self.position = offset;
        self.vote0 = 0;
        self.vote1 = 0;
        self.vote_mark = 0;
        self.gap_quality = 0;
        self.ready = false;
    }

    fn resolve(&mut self) {
        let (symbol, winning) =
            if self.vote0 == 0 && self.vote1 == 0 && self.vote_mark == 0 {
                (Symbol::None, 0)
            } else {
                // Strictly-largest wins; a later candidate must exceed, not
                // merely equal, so ties resolve to the earliest in
                // ZERO, ONE, MARK order.
                let mut symbol = Symbol::Zero;
                let mut winning = self.vote0;
                if self.vote1 > winning {
                    symbol = Symbol::One;
                    winning = self.vote1;
                }
                if self.vote_mark > winning {
                    symbol = Symbol::MinuteMark;
                    winning = self.vote_mark;
                }
                (symbol, winning)
            };

        self.last_symbol = symbol;
        self.last_quality = self.gap_quality + winning;
        self.ready = true;

        // Self-reset to phase 0: once locked the detector free-runs,
        // decoupled from edge detection.
        self.position = 0;
        self.vote0 = 0;
        self.vote1 = 0;
        self.vote_mark = 0;
        self.gap_quality = 0;
    }

    /// True for exactly the tick on which a window resolved.
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Last resolved classification.
    pub fn last_symbol(&self) -> Symbol {
        self.last_symbol
    }

    /// Combined 0..=1000 quality of the last resolved second.
    pub fn last_quality(&self) -> u32 {
        self.last_quality
    }

    /// Current tick position within the window (may be negative after a
    /// phase-trial reset).
    pub fn position(&self) -> i32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SymbolDetector {
        SymbolDetector::new(&DecoderConfig::default())
    }

    fn feed_pulse(det: &mut SymbolDetector, pulse_ticks: usize) {
        for tick in 0..1000 {
            det.advance(tick < pulse_ticks);
        }
    }

    #[test]
    fn short_pulse_resolves_zero() {
        let mut det = detector();
        feed_pulse(&mut det, 95);
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::Zero);
        // 95 short-phase votes + 100 absent long-phase votes, 800 gap ticks.
        assert_eq!(det.last_quality(), 995);
    }

    #[test]
    fn long_pulse_resolves_one() {
        let mut det = detector();
        feed_pulse(&mut det, 160);
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::One);
        // vote1 = 100 + 60 = 160 beats vote0 = 100 + 40 = 140.
        assert_eq!(det.last_quality(), 800 + 160);
    }

    #[test]
    fn silence_resolves_minute_mark() {
        let mut det = detector();
        feed_pulse(&mut det, 0);
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::MinuteMark);
        assert_eq!(det.last_quality(), 1000);
    }

    #[test]
    fn clean_seconds_reach_full_quality() {
        let mut det = detector();
        feed_pulse(&mut det, 100);
        assert_eq!(det.last_symbol(), Symbol::Zero);
        assert_eq!(det.last_quality(), 1000);

        feed_pulse(&mut det, 200);
        assert_eq!(det.last_symbol(), Symbol::One);
        assert_eq!(det.last_quality(), 1000);
    }

    #[test]
    fn ready_lasts_one_tick() {
        let mut det = detector();
        feed_pulse(&mut det, 100);
        assert!(det.ready());
        det.advance(true);
        assert!(!det.ready());
        assert_eq!(det.position(), 1);
    }

    #[test]
    fn resolved_window_is_idempotent() {
        let mut det = detector();
        feed_pulse(&mut det, 95);
        let (first_sym, first_q) = (det.last_symbol(), det.last_quality());
        assert_eq!(det.position(), 0);

        feed_pulse(&mut det, 95);
        assert_eq!(det.last_symbol(), first_sym);
        assert_eq!(det.last_quality(), first_q);
    }

    #[test]
    fn vote_tie_resolves_to_zero() {
        let mut det = detector();
        // A pulse covering exactly half the long phase ties the vote:
        // vote0 = 100 + 50 = 150, vote1 = 100 + 50 = 150, mark = 50.
        // ONE would have to exceed, so the tie resolves to ZERO.
        feed_pulse(&mut det, 150);
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::Zero);

        // Same tie built from a different pattern: present [0, 100),
        // absent [100, 150), present [150, 200).
        for tick in 0..1000 {
            let sample = tick < 100 || (150..200).contains(&tick);
            det.advance(sample);
        }
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::Zero);
    }

    #[test]
    fn positive_offset_shortens_one_window() {
        let mut det = detector();
        det.reset(10);
        let mut resolved_after = 0;
        for tick in 0.. {
            det.advance(false);
            if det.ready() {
                resolved_after = tick + 1;
                break;
            }
        }
        assert_eq!(resolved_after, 990);
        // Next window runs the full length again.
        for _ in 0..999 {
            det.advance(false);
            assert!(!det.ready());
        }
        det.advance(false);
        assert!(det.ready());
    }

    #[test]
    fn negative_offset_lengthens_one_window() {
        let mut det = detector();
        det.reset(-10);
        for _ in 0..1009 {
            det.advance(false);
            assert!(!det.ready());
        }
        det.advance(false);
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::MinuteMark);
    }

    #[test]
    fn reset_keeps_last_result() {
        let mut det = detector();
        feed_pulse(&mut det, 100);
        det.reset(0);
        assert!(!det.ready());
        assert_eq!(det.last_symbol(), Symbol::Zero);
        assert_eq!(det.last_quality(), 1000);
    }

    #[test]
    fn noisy_zero_degrades_quality() {
        let mut det = detector();
        // Alternating chatter: no phase of the window is clean.
        for tick in 0..1000 {
            det.advance(tick % 2 == 0);
        }
        assert!(det.ready());
        assert_eq!(det.last_symbol(), Symbol::Zero);
        assert!(det.last_quality() < 800, "quality {}", det.last_quality());
    }
}
