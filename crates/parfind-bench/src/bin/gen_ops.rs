//! Generates tiered operation-stream fixtures to disk.
//!
//! Writes one `.ops` file per size tier to `target/bench-fixtures/`, in the
//! text format the `parfind` binary loads, so CLI benchmarking runs and the
//! criterion benches can share identical streams.

use std::error::Error;
use std::fs;

use parfind_bench::{SizeTier, generate_workload, ops_fixture_path, write_ops_file};

fn main() -> Result<(), Box<dyn Error>> {
    for tier in [
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
        SizeTier::XLarge,
    ] {
        let path = ops_fixture_path(tier);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        eprintln!("Generating {} tier...", tier.name());
        let workload = generate_workload(&tier.config(42));
        write_ops_file(&path, &workload)?;

        let meta = fs::metadata(&path)?;
        eprintln!(
            "{}: {} elements, {} ops, {:.1} MB",
            path.display(),
            workload.elements,
            workload.ops.len(),
            meta.len() as f64 / (1024.0 * 1024.0)
        );
    }
    Ok(())
}
