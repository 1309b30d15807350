//! Decode a synthesized noisy minute fragment and print the symbol stream.
//!
//! Run with: cargo run -p dcf77-core --example decode_minute
//! Set RUST_LOG=debug to watch edge anchoring and hold-over progress.

use dcf77_core::prelude::*;
use dcf77_core::waveform::NoisySecondSource;
use dcf77_core::{logging, waveform};

fn main() {
    logging::init();

    let config = DecoderConfig::default();
    let mut decoder = SyncController::new(config.clone());
    let mut source = NoisySecondSource::new(config.clone(), 0x77dc_f701, 20);

    // Receiver switched on mid-silence; acquisition needs a clean-ish edge.
    let mut events = decoder.process(&[false; 250]);

    let transmitted = [
        Symbol::Zero,
        Symbol::One,
        Symbol::Zero,
        Symbol::Zero,
        Symbol::One,
        Symbol::One,
        Symbol::Zero,
        Symbol::MinuteMark,
    ];
    for &sym in &transmitted {
        events.extend(decoder.process(&source.second(sym)));
    }

    println!("mode: {}  indicator: {}", decoder.mode(), decoder.indicator());
    for event in &events {
        println!("  {:>6}  quality {:>4}", event.symbol.to_string(), event.quality);
    }

    let decoded: Vec<Symbol> = events.iter().map(|e| e.symbol).collect();
    let ok = decoded.ends_with(&transmitted);
    println!(
        "decoded {} seconds, transmission {}",
        events.len(),
        if ok { "recovered" } else { "corrupted" }
    );
}
