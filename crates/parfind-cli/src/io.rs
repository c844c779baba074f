//! Operation-stream file loading and validation.
//!
//! This module is the only filesystem access in the workspace;
//! `parfind-core` never touches I/O.
//!
//! Format (whitespace-separated, blank lines skipped, trailing newlines
//! accepted):
//!
//! ```text
//! N M          number of elements, number of operations
//! T a b        M lines; T = 0 union, 1 find, 2 same-set
//! ```
//!
//! `a` (and `b` unless T = 1) must lie in `[0, N)`; violations fail here,
//! before any engine is built.

use std::path::Path;

use parfind_core::{OpKind, Operation};

use crate::error::CliError;

/// A validated operation stream.
#[derive(Debug)]
pub struct OpsFile {
    /// Universe size `N`.
    pub elements: usize,
    /// The `M` operations, in file order.
    pub ops: Vec<Operation>,
}

/// Reads and validates the stream at `path`.
pub fn load_operations(path: &Path) -> Result<OpsFile, CliError> {
    let text = std::fs::read_to_string(path).map_err(|err| CliError::Io {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;
    parse_operations(&text).map_err(|(line, detail)| CliError::Parse {
        path: path.to_path_buf(),
        line,
        detail,
    })
}

/// Parses the text format. Errors carry the 1-based line number.
fn parse_operations(text: &str) -> Result<OpsFile, (usize, String)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| (1, "missing `N M` header".to_owned()))?;
    let mut fields = header.split_whitespace();
    let elements = parse_field(&mut fields, header_no, "element count N")?;
    let expected: usize = parse_field(&mut fields, header_no, "operation count M")?;
    if fields.next().is_some() {
        return Err((header_no, "trailing fields after `N M` header".to_owned()));
    }

    let mut ops = Vec::with_capacity(expected);
    for (line_no, line) in lines {
        if ops.len() == expected {
            return Err((line_no, format!("more than {expected} operations")));
        }
        let mut fields = line.split_whitespace();
        let tag: u8 = parse_field(&mut fields, line_no, "operation tag T")?;
        let a: usize = parse_field(&mut fields, line_no, "operand a")?;
        let b: usize = parse_field(&mut fields, line_no, "operand b")?;
        if fields.next().is_some() {
            return Err((line_no, "trailing fields after `T a b`".to_owned()));
        }

        let kind = OpKind::from_tag(tag)
            .ok_or_else(|| (line_no, format!("operation tag must be 0, 1, or 2, got {tag}")))?;
        check_operand(a, elements, line_no)?;
        if kind != OpKind::Find {
            check_operand(b, elements, line_no)?;
        }
        ops.push(Operation { kind, a, b });
    }

    if ops.len() != expected {
        let line = text.lines().count().max(1);
        return Err((
            line,
            format!("expected {expected} operations, found {}", ops.len()),
        ));
    }
    Ok(OpsFile { elements, ops })
}

fn parse_field<T: std::str::FromStr>(
    fields: &mut std::str::SplitWhitespace<'_>,
    line_no: usize,
    what: &str,
) -> Result<T, (usize, String)> {
    let raw = fields
        .next()
        .ok_or_else(|| (line_no, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| (line_no, format!("invalid {what}: {raw:?}")))
}

fn check_operand(value: usize, elements: usize, line_no: usize) -> Result<(), (usize, String)> {
    if value < elements {
        Ok(())
    } else {
        Err((
            line_no,
            format!("operand {value} out of bounds for {elements} elements"),
        ))
    }
}
