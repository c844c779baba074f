//! Benchmark execution: warm-up, timed runs, summary statistics.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use crate::cli::{Cli, EngineKind};
use crate::error::CliError;
use crate::io;

/// Loads the stream, replays it, and prints the report.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let stream = io::load_operations(&cli.ops_file)?;

    let threads = if cli.engine == EngineKind::Serial {
        NonZeroUsize::MIN
    } else {
        cli.num_threads
            .unwrap_or_else(|| thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    };

    println!("engine:     {}", cli.engine.name());
    println!("elements:   {}", stream.elements);
    println!("operations: {}", stream.ops.len());
    println!("threads:    {threads}");
    println!("runs:       {}", cli.num_runs);

    let mut results = Vec::new();

    // Warm-up on a throwaway instance: page in the stream and the allocator
    // before anything is timed.
    eprintln!("warm-up run...");
    cli.engine
        .build(stream.elements)
        .process(&stream.ops, &mut results, threads);

    let mut durations_ms = Vec::with_capacity(cli.num_runs as usize);
    for run_no in 1..=cli.num_runs {
        // A fresh engine per run: every run starts from all-singletons.
        let engine = cli.engine.build(stream.elements);
        let start = Instant::now();
        engine.process(&stream.ops, &mut results, threads);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;
        durations_ms.push(elapsed_ms);
        println!("run {run_no}: {elapsed_ms:.4} ms");
    }

    let summary = Summary::of(&durations_ms);
    println!("--- summary ---");
    println!("avg:     {:.4} ms", summary.avg);
    println!("min:     {:.4} ms", summary.min);
    println!("max:     {:.4} ms", summary.max);
    println!("std dev: {:.4} ms", summary.std_dev);
    Ok(())
}

/// Aggregate timing statistics over the timed runs, in milliseconds.
struct Summary {
    avg: f64,
    min: f64,
    max: f64,
    /// Sample standard deviation (n − 1); zero for a single run.
    std_dev: f64,
}

impl Summary {
    fn of(durations_ms: &[f64]) -> Summary {
        let n = durations_ms.len() as f64;
        let avg = durations_ms.iter().sum::<f64>() / n;
        let min = durations_ms.iter().copied().fold(f64::INFINITY, f64::min);
        let max = durations_ms
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if durations_ms.len() > 1 {
            let sq_sum = durations_ms
                .iter()
                .map(|d| (d - avg) * (d - avg))
                .sum::<f64>();
            (sq_sum / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Summary {
            avg,
            min,
            max,
            std_dev,
        }
    }
}
