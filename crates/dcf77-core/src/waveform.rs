//! Second-Waveform Generator
//!
//! Synthesizes the boolean sample stream of DCF77-style seconds for testing
//! receiver logic without an antenna: a ZERO carries a 100 ms pulse, a ONE a
//! 200 ms pulse, and the minute mark no pulse at all. Optional per-tick flip
//! noise comes from a seeded xorshift64* generator so degraded-signal tests
//! stay deterministic.
//!
//! ## Example
//!
//! ```rust
//! use dcf77_core::config::DecoderConfig;
//! use dcf77_core::symbol_detector::Symbol;
//! use dcf77_core::waveform::second;
//!
//! let config = DecoderConfig::default();
//! let samples = second(Symbol::One, &config);
//! assert_eq!(samples.len(), 1000);
//! assert!(samples[150] && !samples[250]);
//! ```

use crate::config::DecoderConfig;
use crate::symbol_detector::Symbol;

/// Generate one clean second of samples for `symbol`.
///
/// [`Symbol::None`] has no broadcast waveform and maps to silence.
pub fn second(symbol: Symbol, config: &DecoderConfig) -> Vec<bool> {
    let pulse = match symbol {
        Symbol::Zero => config.zero_pulse_ticks,
        Symbol::One => config.one_pulse_ticks,
        Symbol::MinuteMark | Symbol::None => 0,
    };
    (0..config.window_ticks).map(|t| t < pulse).collect()
}

/// Generate a whole minute: `symbols` in order, one second each.
pub fn minute(symbols: &[Symbol], config: &DecoderConfig) -> Vec<bool> {
    let mut samples = Vec::with_capacity(symbols.len() * config.window_ticks as usize);
    for &sym in symbols {
        samples.extend(second(sym, config));
    }
    samples
}

/// Deterministic noisy second source.
///
/// Each generated tick is flipped with probability `flip_per_mille`/1000,
/// using an xorshift64* stream seeded at construction.
#[derive(Debug, Clone)]
pub struct NoisySecondSource {
    config: DecoderConfig,
    state: u64,
    flip_per_mille: u32,
}

impl NoisySecondSource {
    /// Create a source. `seed` must be nonzero; zero is remapped.
    pub fn new(config: DecoderConfig, seed: u64, flip_per_mille: u32) -> Self {
        Self {
            config,
            state: if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed },
            flip_per_mille: flip_per_mille.min(1000),
        }
    }

    /// Generate one second of `symbol` with flip noise applied.
    pub fn second(&mut self, symbol: Symbol) -> Vec<bool> {
        let mut samples = second(symbol, &self.config);
        for sample in &mut samples {
            if (self.next_u64() % 1000) < self.flip_per_mille as u64 {
                *sample = !*sample;
            }
        }
        samples
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64* (Vigna); period 2^64 - 1.
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_waveforms_match_pulse_lengths() {
        let config = DecoderConfig::default();

        let zero = second(Symbol::Zero, &config);
        assert_eq!(zero.iter().filter(|&&s| s).count(), 100);
        assert!(zero[..100].iter().all(|&s| s));

        let one = second(Symbol::One, &config);
        assert_eq!(one.iter().filter(|&&s| s).count(), 200);

        let mark = second(Symbol::MinuteMark, &config);
        assert!(mark.iter().all(|&s| !s));
    }

    #[test]
    fn minute_concatenates_seconds() {
        let config = DecoderConfig::default();
        let samples = minute(&[Symbol::Zero, Symbol::One, Symbol::MinuteMark], &config);
        assert_eq!(samples.len(), 3000);
        assert!(samples[0] && samples[1150] && !samples[2500]);
    }

    #[test]
    fn same_seed_reproduces_stream() {
        let config = DecoderConfig::default();
        let mut a = NoisySecondSource::new(config.clone(), 7, 100);
        let mut b = NoisySecondSource::new(config, 7, 100);
        assert_eq!(a.second(Symbol::Zero), b.second(Symbol::Zero));
        assert_eq!(a.second(Symbol::One), b.second(Symbol::One));
    }

    #[test]
    fn flip_rate_is_roughly_honored() {
        let config = DecoderConfig::default();
        let mut source = NoisySecondSource::new(config.clone(), 42, 100);
        let clean = second(Symbol::MinuteMark, &config);
        let noisy = source.second(Symbol::MinuteMark);
        let flips = clean
            .iter()
            .zip(noisy.iter())
            .filter(|(a, b)| a != b)
            .count();
        // 10% nominal over 1000 ticks; loose bounds keep this stable.
        assert!((50..200).contains(&flips), "flips = {}", flips);
    }

    #[test]
    fn zero_flip_rate_is_clean() {
        let config = DecoderConfig::default();
        let mut source = NoisySecondSource::new(config.clone(), 42, 0);
        assert_eq!(source.second(Symbol::One), second(Symbol::One, &config));
    }
}
