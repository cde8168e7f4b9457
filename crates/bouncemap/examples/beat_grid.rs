//! Bounce map for a synthetic beat grid.
//!
//! Purpose
//! - Give a quick, reproducible timing point for "how long does a map for a
//!   short song take?" without needing a score or the CLI.
//! - Show the floating/connected split and the safe-area count on a typical
//!   rhythm: a steady pulse with some eighth-note runs.
//!
//! Why this shape
//! - Eighth notes every fourth bar make the square turn in tight spots,
//!   which is where the search backtracks.
//! - The seed is fixed; rerunning prints the same map.
//!
//! Run: `cargo run -p bouncemap --example beat_grid --release`

use std::time::Instant;

use bouncemap::prelude::*;

fn beat_grid(bars: usize, bpm: f64) -> Vec<f64> {
    let beat = 60.0 / bpm;
    let mut times = Vec::new();
    for bar in 0..bars {
        let start = (bar * 4) as f64 * beat;
        for k in 0..4 {
            times.push(start + k as f64 * beat + beat);
            if bar % 4 == 3 {
                times.push(start + k as f64 * beat + 1.5 * beat);
            }
        }
    }
    times
}

fn main() {
    let times = beat_grid(16, 120.0);
    let cfg = MapCfg::default();
    let scfg = SearchCfg {
        seed: 2024,
        ..SearchCfg::default()
    };

    let start = Instant::now();
    let map = generate_map(&times, &cfg, &scfg).expect("beat grid should have a bounce path");
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let floating = map.bounces.iter().filter(|b| b.floating).count();
    println!("timestamps      : {}", times.len());
    println!("bounces         : {}", map.bounces.len());
    println!("floating        : {floating}");
    println!("connected       : {}", map.bounces.len() - floating);
    println!("safe areas      : {}", map.safe_areas.len());
    println!("search calls    : {}", map.stats.calls);
    println!("rejections      : {}", map.stats.rejections);
    println!("duration (s)    : {:.3}", map.duration());
    println!("elapsed (ms)    : {elapsed_ms:.2}");
}
