//! Post-run invariant checkers for correctness validation.
//!
//! All checkers operate on a quiescent engine (after `process` returned)
//! through the public [`Engine`] surface and report failures as strings, so
//! test output names the first offending element instead of a bare panic.

use parfind_core::{Engine, OpKind, Operation};

/// Canonical signature of the partition induced by `engine`: element `i`
/// maps to the smallest-indexed element of its set encountered first, so two
/// engines induce the same partition iff their signatures are equal even
/// when their representatives differ.
pub fn partition_signature(engine: &dyn Engine) -> Result<Vec<usize>, String> {
    let mut canon: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
    let mut signature = Vec::with_capacity(engine.len());
    for element in 0..engine.len() {
        let root = engine
            .find(element)
            .map_err(|err| format!("find({element}) failed: {err}"))?;
        signature.push(*canon.entry(root).or_insert(element));
    }
    Ok(signature)
}

/// Verifies that `candidate` induces exactly the partition of `oracle`.
pub fn check_same_partition(oracle: &dyn Engine, candidate: &dyn Engine) -> Result<(), String> {
    if oracle.len() != candidate.len() {
        return Err(format!(
            "universe mismatch: oracle={}, candidate={}",
            oracle.len(),
            candidate.len()
        ));
    }
    let expected = partition_signature(oracle)?;
    let actual = partition_signature(candidate)?;
    for (element, (want, got)) in expected.iter().zip(&actual).enumerate() {
        if want != got {
            return Err(format!(
                "partitions diverge at element {element}: oracle puts it with {want}, candidate with {got}"
            ));
        }
    }
    Ok(())
}

/// Verifies the union return-value invariant: the number of unions that
/// reported a merge equals `N − K`, where `K` is the number of sets left.
pub fn check_union_returns(
    ops: &[Operation],
    results: &[i64],
    engine: &dyn Engine,
) -> Result<(), String> {
    if ops.len() != results.len() {
        return Err(format!(
            "result count mismatch: {} ops, {} results",
            ops.len(),
            results.len()
        ));
    }
    let merges: i64 = ops
        .iter()
        .zip(results)
        .filter(|(op, _)| op.kind == OpKind::Union)
        .map(|(_, &result)| result)
        .sum();
    let expected = engine.len() as i64 - engine.count_sets() as i64;
    if merges != expected {
        return Err(format!(
            "union returns sum to {merges}, but N - K = {expected}"
        ));
    }
    Ok(())
}

/// Verifies monotonicity: every pair that was ever merged is still joined.
pub fn check_merged_pairs_stay_joined(
    engine: &dyn Engine,
    merged: &[(usize, usize)],
) -> Result<(), String> {
    for &(a, b) in merged {
        let joined = engine
            .same_set(a, b)
            .map_err(|err| format!("same_set({a}, {b}) failed: {err}"))?;
        if !joined {
            return Err(format!("({a}, {b}) were merged but are no longer joined"));
        }
    }
    Ok(())
}
