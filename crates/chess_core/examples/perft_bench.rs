//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 4 over the built-in positions
//!   cargo run --release --example perft_bench -p chess_core
//!
//!   # Per-move breakdown for Kiwipete
//!   cargo run --release --example perft_bench -p chess_core -- 3 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use chess_core::{Position, perft, perft_divide};
use std::env;
use std::error::Error;
use std::time::{Duration, Instant};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_divide(&Position::from_fen(fen)?, depth),
        None => run_all_positions(depth)?,
    }
    Ok(())
}

fn run_divide(pos: &Position, depth: u8) {
    println!("Position: {pos}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let divided = perft_divide(pos, depth);
    let elapsed = start.elapsed();

    let mut total = 0;
    for (mv, nodes) in &divided {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!();
    println!("Nodes: {total}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(total, elapsed));
}

fn run_all_positions(depth: u8) -> Result<(), Box<dyn Error>> {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let mut pos = Position::from_fen(fen)?;
        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
