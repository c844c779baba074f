//! Concurrent union-find (disjoint set union) engines.
//!
//! This crate maintains a partition of `[0, n)` under merge (`union`) and
//! equivalence queries (`find`, `same_set`), and ships five interchangeable
//! engines behind one [`Engine`] surface:
//!
//! - [`SerialUnionFind`] — the sequential baseline and correctness oracle;
//! - [`CoarseUnionFind`] — one mutex in front of the whole forest;
//! - [`FineUnionFind`] — one mutex per element, locks taken only on the two
//!   candidate roots during a union;
//! - [`LockFreeUnionFind`] — one atomic word per element, CAS linking and
//!   CAS path compression;
//! - [`PlainWriteUnionFind`] — as above, with plain-store path compression;
//! - [`IpcUnionFind`] — as above, plus an immediate-parent-check fast path.
//!
//! [`Engine::process`] applies a pre-built operation stream across worker
//! threads and writes one result per operation; see [`executor::run_batch`].
//!
//! The crate never touches the filesystem and never prints; all I/O lives in
//! the `parfind` binary.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod coarse;
pub mod engine;
pub mod error;
pub mod executor;
pub mod fine;
pub mod lockfree;
pub mod lockfree_ipc;
pub mod lockfree_plain;
pub mod ops;
pub mod serial;

pub(crate) mod forest;
pub(crate) mod packed;

pub use coarse::CoarseUnionFind;
pub use engine::Engine;
pub use error::UfError;
pub use executor::run_batch;
pub use fine::FineUnionFind;
pub use lockfree::LockFreeUnionFind;
pub use lockfree_ipc::IpcUnionFind;
pub use lockfree_plain::PlainWriteUnionFind;
pub use ops::{OpKind, Operation, RESULT_BAD_KIND, RESULT_OUT_OF_BOUNDS};
pub use serial::SerialUnionFind;

/// Returns the current version of the parfind-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
