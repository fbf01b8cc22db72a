//! RB patterns
//!
//! Gantree: L1_Results → Pattern
//!
//! A pattern groups qubits benchmarked together as one subsystem. Several
//! disjoint patterns can run in parallel inside the same circuits; their
//! results occupy consecutive classical bit ranges in declaration order.

use crate::constants::fit;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

/// Ordered list of qubit groups
/// Gantree: RbPattern // 패턴 목록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RbPattern {
    groups: Vec<Vec<QubitId>>,
}

impl RbPattern {
    /// Create from explicit groups
    pub fn new(groups: Vec<Vec<QubitId>>) -> Self {
        Self { groups }
    }

    /// Single pattern benchmarking qubit 0
    pub fn single_qubit() -> Self {
        Self::new(vec![vec![0]])
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Qubits of pattern `index`
    pub fn group(&self, index: usize) -> Option<&[QubitId]> {
        self.groups.get(index).map(|g| g.as_slice())
    }

    /// Iterate over groups
    pub fn iter(&self) -> impl Iterator<Item = &[QubitId]> {
        self.groups.iter().map(|g| g.as_slice())
    }

    /// Number of qubits in pattern `index`
    pub fn num_qubits(&self, index: usize) -> usize {
        self.groups.get(index).map_or(0, |g| g.len())
    }

    /// Hilbert-space dimension `2^n` of pattern `index`
    /// Gantree: nrb(index) -> f64 // 차원
    pub fn nrb(&self, index: usize) -> f64 {
        fit::nrb(self.num_qubits(index))
    }

    /// Classical bit range holding pattern `index`
    /// Gantree: bit_range(index) -> Range // 비트 구간
    pub fn bit_range(&self, index: usize) -> Range<usize> {
        let start: usize = self.groups.iter().take(index).map(|g| g.len()).sum();
        start..start + self.num_qubits(index)
    }

    /// Classical bit positions of every pattern, in declaration order
    pub fn bit_positions(&self) -> Vec<Vec<QubitId>> {
        (0..self.len()).map(|i| self.bit_range(i).collect()).collect()
    }

    /// Check structural validity
    pub fn validate(&self) -> Result<(), String> {
        if self.groups.is_empty() {
            return Err("at least one pattern is required".to_string());
        }

        let mut seen = HashSet::new();
        for (i, group) in self.groups.iter().enumerate() {
            if group.is_empty() {
                return Err(format!("pattern {} is empty", i));
            }
            for &q in group {
                if !seen.insert(q) {
                    return Err(format!("qubit {} appears in more than one pattern", q));
                }
            }
        }

        Ok(())
    }
}

impl Default for RbPattern {
    fn default() -> Self {
        Self::single_qubit()
    }
}

impl From<Vec<Vec<QubitId>>> for RbPattern {
    fn from(groups: Vec<Vec<QubitId>>) -> Self {
        Self::new(groups)
    }
}

impl fmt::Display for RbPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.groups)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let p = RbPattern::default();
        assert_eq!(p.len(), 1);
        assert_eq!(p.group(0), Some(&[0][..]));
        assert_eq!(p.nrb(0), 2.0);
    }

    #[test]
    fn test_bit_ranges_are_cumulative() {
        let p = RbPattern::new(vec![vec![0, 1], vec![2], vec![3, 4, 5]]);
        assert_eq!(p.bit_range(0), 0..2);
        assert_eq!(p.bit_range(1), 2..3);
        assert_eq!(p.bit_range(2), 3..6);
        assert_eq!(p.bit_positions(), vec![vec![0, 1], vec![2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_bit_range_ignores_qubit_labels() {
        // positions follow declaration order, not qubit numbers
        let p = RbPattern::new(vec![vec![0, 2], vec![1]]);
        assert_eq!(p.bit_range(0), 0..2);
        assert_eq!(p.bit_range(1), 2..3);
        assert_eq!(p.nrb(0), 4.0);
        assert_eq!(p.nrb(1), 2.0);
    }

    #[test]
    fn test_validate() {
        assert!(RbPattern::default().validate().is_ok());
        assert!(RbPattern::new(vec![]).validate().is_err());
        assert!(RbPattern::new(vec![vec![0], vec![]]).validate().is_err());
        assert!(RbPattern::new(vec![vec![0, 1], vec![1]]).validate().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let p = RbPattern::new(vec![vec![0, 1], vec![2]]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[[0,1],[2]]");
        let back: RbPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
