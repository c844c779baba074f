//! Workload generation and correctness checking for the parfind engines.
//!
//! This crate provides deterministic generation of operation streams for
//! benchmarking, plus post-run invariant checkers used by the property and
//! stress tests.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{SizeTier, Workload, WorkloadConfig, generate_workload, write_ops_file};

/// Returns the path where the generated ops-file fixture for `tier` lives.
///
/// Files go under `target/bench-fixtures/` so they are automatically
/// gitignored and shared between the generator binary and the `parfind`
/// CLI.
pub fn ops_fixture_path(tier: SizeTier) -> PathBuf {
    bench_fixtures_dir().join(format!("{}.ops", tier.name()))
}

fn bench_fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
