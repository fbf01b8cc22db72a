//! Counts utilities
//!
//! Gantree: L1_Results → CountsUtils
//!
//! Merging of count dictionaries gathered from repeated executions and
//! marginalization onto a subset of bit positions.

use crate::error::RbResult;
use crate::types::{Bitstring, Counts, QubitId};

/// Sum several count dictionaries key by key
/// Gantree: merge_counts(list) -> Counts // 병합
///
/// Missing inputs are simply not passed in; an empty iterator yields an
/// empty dictionary.
pub fn merge_counts<'a, I>(counts: I) -> Counts
where
    I: IntoIterator<Item = &'a Counts>,
{
    let mut merged = Counts::new();
    for c in counts {
        for (key, &n) in c {
            *merged.entry(key.clone()).or_insert(0) += n;
        }
    }
    merged
}

/// Total number of shots recorded in a dictionary
pub fn total_shots(counts: &Counts) -> u64 {
    counts.values().sum()
}

/// Project counts onto the given bit positions
/// Gantree: marginalize(counts,indices) -> Counts // 주변화
///
/// Keys of the result are written over the selected positions only, with
/// `indices[0]` as the rightmost character.
pub fn marginalize(counts: &Counts, indices: &[QubitId]) -> RbResult<Counts> {
    let mut out = Counts::new();
    for (key, &n) in counts {
        let sub = Bitstring::parse(key)?.select(indices)?;
        *out.entry(sub.to_string()).or_insert(0) += n;
    }
    Ok(out)
}

/// Number of shots in which every selected position read 0
pub fn zero_count(counts: &Counts, indices: &[QubitId]) -> RbResult<u64> {
    let mut zeros = 0;
    for (key, &n) in counts {
        if Bitstring::parse(key)?.select(indices)?.is_all_zero() {
            zeros += n;
        }
    }
    Ok(zeros)
}

// ============================================================================
// Tests
// ============================================================================
