//! Step throughput of the packed-board engine across sizes, densities and edge modes

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use term_life::{Engine, Rules};

const SEED: u64 = 0x5eed;

fn seeded_engine(size: usize, density: f64, wrap: bool) -> Engine {
    let mut engine = Engine::new(size, size, Rules::CONWAY, wrap).expect("non-zero board size");
    engine.randomize(&mut StdRng::seed_from_u64(SEED), density);
    engine
}

/// Average milliseconds per generation
fn benchmark_step(size: usize, density: f64, wrap: bool, iterations: u32) -> f64 {
    let mut engine = seeded_engine(size, density, wrap);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.step();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Packed Board Step Benchmark ===\n");

    let sizes = [100, 500, 1000, 2000, 4000];
    let densities = [0.02, 0.1, 0.3, 0.5];
    let iterations = 20;

    println!("{:>10} {:>8} {:>12} {:>12} {:>14}",
        "Size", "Density", "Bounded", "Wrap", "Cells/sec");
    println!("{:-<60}", "");

    for size in sizes {
        for density in densities {
            let bounded_ms = benchmark_step(size, density, false, iterations);
            let wrap_ms = benchmark_step(size, density, true, iterations);
            let cells_per_sec = (size * size) as f64 / (bounded_ms / 1000.0);

            println!(
                "{:>10} {:>7.0}% {:>10.2}ms {:>10.2}ms {:>13.1}M",
                format!("{}x{}", size, size),
                density * 100.0,
                bounded_ms,
                wrap_ms,
                cells_per_sec / 1_000_000.0
            );
        }
    }

    println!("\n=== Quiescent Skip (2000x2000) ===\n");

    // Same seed and rules, so both engines walk through identical generations
    let size = 2000;
    let mut skipping = seeded_engine(size, 0.02, false);
    let mut scanning = seeded_engine(size, 0.02, false);
    scanning.set_skip_quiescent(false);

    let start = Instant::now();
    for _ in 0..iterations {
        skipping.step();
    }
    let skip_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

    let start = Instant::now();
    for _ in 0..iterations {
        scanning.step();
    }
    let scan_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

    println!("Skip quiescent:  {:.2} ms/gen", skip_ms);
    println!("Full scan:       {:.2} ms/gen", scan_ms);
    println!("Speedup:         {:.1}x", scan_ms / skip_ms);
}
