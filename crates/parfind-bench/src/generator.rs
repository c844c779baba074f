//! Deterministic operation-stream generator.
//!
//! Streams are drawn from a seeded [`StdRng`], so a `(config, seed)` pair
//! always produces the same workload — benchmarks and stress tests replay
//! identical streams across engines and thread counts.

use std::io::Write;
use std::path::Path;

use parfind_core::Operation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for the workload generator.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Seed for the random number generator.
    pub seed: u64,
    /// Universe size `N`.
    pub elements: usize,
    /// Number of operations to generate.
    pub operations: usize,
    /// Fraction of `Find` operations (0.0–1.0).
    pub find_ratio: f64,
    /// Fraction of `SameSet` operations (0.0–1.0); the remainder after
    /// finds and same-sets is unions.
    pub same_set_ratio: f64,
}

/// A generated operation stream.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Universe size `N`.
    pub elements: usize,
    /// The operations, in generation order.
    pub ops: Vec<Operation>,
}

/// Predefined workload sizes for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 1k elements, 10k operations.
    Small,
    /// 10k elements, 100k operations.
    Medium,
    /// 100k elements, 1M operations.
    Large,
    /// 1M elements, 4M operations.
    XLarge,
}

impl SizeTier {
    /// Lowercase tier name, used for fixture filenames.
    pub fn name(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
            SizeTier::XLarge => "xlarge",
        }
    }

    /// The default `WorkloadConfig` for this tier: half unions, 30% finds,
    /// 20% same-set queries.
    pub fn config(self, seed: u64) -> WorkloadConfig {
        let (elements, operations) = match self {
            SizeTier::Small => (1_000, 10_000),
            SizeTier::Medium => (10_000, 100_000),
            SizeTier::Large => (100_000, 1_000_000),
            SizeTier::XLarge => (1_000_000, 4_000_000),
        };
        WorkloadConfig {
            seed,
            elements,
            operations,
            find_ratio: 0.3,
            same_set_ratio: 0.2,
        }
    }
}

/// Generates the stream described by `config`.
///
/// Union operands are re-drawn while `a == b` (for universes larger than
/// one element), so generated unions are never trivial self-merges. An empty
/// universe yields an empty stream: there is no valid operand to draw.
pub fn generate_workload(config: &WorkloadConfig) -> Workload {
    if config.elements == 0 {
        return Workload {
            elements: 0,
            ops: Vec::new(),
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let ops = (0..config.operations)
        .map(|_| {
            let a = rng.gen_range(0..config.elements);
            let roll: f64 = rng.gen();
            if roll < config.find_ratio {
                Operation::find(a)
            } else if roll < config.find_ratio + config.same_set_ratio {
                Operation::same_set(a, rng.gen_range(0..config.elements))
            } else {
                let mut b = rng.gen_range(0..config.elements);
                while a == b && config.elements > 1 {
                    b = rng.gen_range(0..config.elements);
                }
                Operation::union(a, b)
            }
        })
        .collect();
    Workload {
        elements: config.elements,
        ops,
    }
}

/// Writes `workload` in the operation-stream text format the `parfind`
/// binary loads (`N M` header, then `T a b` lines).
pub fn write_ops_file(path: &Path, workload: &Workload) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    writeln!(out, "{} {}", workload.elements, workload.ops.len())?;
    for op in &workload.ops {
        writeln!(out, "{} {} {}", op.kind.tag(), op.a, op.b)?;
    }
    out.flush()
}
