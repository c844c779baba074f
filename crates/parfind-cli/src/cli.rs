//! Clap definition for the `parfind` binary.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use parfind_core::{
    CoarseUnionFind, Engine, FineUnionFind, IpcUnionFind, LockFreeUnionFind, PlainWriteUnionFind,
    SerialUnionFind,
};

/// Which engine implementation to benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Sequential baseline; always runs on one thread.
    Serial,
    /// One mutex in front of the whole forest.
    Coarse,
    /// One mutex per element, root-locking unions.
    Fine,
    /// CAS linking and CAS path compression.
    Lockfree,
    /// CAS linking, plain-store path compression.
    #[value(name = "lockfree_plain")]
    LockfreePlain,
    /// CAS linking plus the immediate-parent-check fast path.
    #[value(name = "lockfree_ipc")]
    LockfreeIpc,
}

impl EngineKind {
    /// Builds a fresh engine over `n` elements.
    pub fn build(self, n: usize) -> Box<dyn Engine> {
        match self {
            EngineKind::Serial => Box::new(SerialUnionFind::new(n)),
            EngineKind::Coarse => Box::new(CoarseUnionFind::new(n)),
            EngineKind::Fine => Box::new(FineUnionFind::new(n)),
            EngineKind::Lockfree => Box::new(LockFreeUnionFind::new(n)),
            EngineKind::LockfreePlain => Box::new(PlainWriteUnionFind::new(n)),
            EngineKind::LockfreeIpc => Box::new(IpcUnionFind::new(n)),
        }
    }

    /// The name shown in the report header, matching the CLI spelling.
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Serial => "serial",
            EngineKind::Coarse => "coarse",
            EngineKind::Fine => "fine",
            EngineKind::Lockfree => "lockfree",
            EngineKind::LockfreePlain => "lockfree_plain",
            EngineKind::LockfreeIpc => "lockfree_ipc",
        }
    }
}

/// Benchmark a union-find engine over a pre-recorded operation stream.
#[derive(Parser)]
#[command(name = "parfind", about = "Concurrent union-find benchmark driver")]
pub struct Cli {
    /// Engine implementation to run.
    #[arg(value_enum)]
    pub engine: EngineKind,

    /// Path to the operation-stream file (`N M` header, then `T a b` lines).
    pub ops_file: PathBuf,

    /// Number of timed runs (a warm-up run precedes them).
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub num_runs: u32,

    /// Worker thread count; defaults to all available cores.
    pub num_threads: Option<NonZeroUsize>,
}
