//! The operation ABI shared by every engine.
//!
//! A batch is a flat `Vec<Operation>`; each operation produces exactly one
//! `i64` result at its own index (see [`crate::executor::run_batch`]):
//!
//! - `Find` — the root index;
//! - `Union` — `1` if a merge happened, `0` if already joined;
//! - `SameSet` — `1` if in the same set, `0` otherwise;
//! - an out-of-bounds operand — [`RESULT_OUT_OF_BOUNDS`], and the batch
//!   continues.

/// Operation kind. The discriminants are the wire encoding used by
/// operation-stream files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// Merge the sets containing the two operands.
    Union = 0,
    /// Look up the representative of the first operand's set.
    Find = 1,
    /// Test whether the two operands share a set.
    SameSet = 2,
}

impl OpKind {
    /// Decodes the wire tag (`0` union, `1` find, `2` same-set).
    pub fn from_tag(tag: u8) -> Option<OpKind> {
        match tag {
            0 => Some(OpKind::Union),
            1 => Some(OpKind::Find),
            2 => Some(OpKind::SameSet),
            _ => None,
        }
    }

    /// The wire tag for this kind.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// One operation of a batch.
///
/// `b` is ignored for [`OpKind::Find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// What to do.
    pub kind: OpKind,
    /// First operand.
    pub a: usize,
    /// Second operand (unused for `Find`).
    pub b: usize,
}

impl Operation {
    /// A union of the sets containing `a` and `b`.
    pub fn union(a: usize, b: usize) -> Operation {
        Operation {
            kind: OpKind::Union,
            a,
            b,
        }
    }

    /// A root lookup for `a`.
    pub fn find(a: usize) -> Operation {
        Operation {
            kind: OpKind::Find,
            a,
            b: 0,
        }
    }

    /// A same-set test for `a` and `b`.
    pub fn same_set(a: usize, b: usize) -> Operation {
        Operation {
            kind: OpKind::SameSet,
            a,
            b,
        }
    }
}

/// Result slot value recorded when an operand is out of bounds. The rest of
/// the batch still runs.
pub const RESULT_OUT_OF_BOUNDS: i64 = -1;

/// Result slot value reserved for an unrecognized operation kind. Unreachable
/// from safe code — [`OpKind`] is a closed enum — but part of the documented
/// result encoding, and what a stream loader should map unknown tags to if it
/// chooses to pass them through instead of rejecting the file.
pub const RESULT_BAD_KIND: i64 = -2;
