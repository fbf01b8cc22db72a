//! Core types for RBFit
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Provides fundamental type aliases and validated wrapper types
//! used throughout the RBFit workspace.

use crate::error::{RbError, RbResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit (classical bit) position, 0-indexed
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

/// Seed identifier of one random sequence realization
/// Gantree: SeedId // pub type SeedId = u64
pub type SeedId = u64;

/// Number of Cliffords in a sequence
pub type CliffordLength = u64;

// ============================================================================
// Probability (Validated Wrapper)
// ============================================================================

/// Probability value in range [0, 1]
/// Gantree: Probability // 범위 검증 구조체
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability(f64);

impl Probability {
    /// Create a new Probability with validation
    pub fn new(value: f64) -> RbResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(RbError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Get the probability value
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Zero probability
    pub const ZERO: Self = Self(0.0);
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = RbError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Measured bitstring in little-endian order
/// Gantree: Bitstring // 비트열 타입
///
/// Count keys print the highest qubit first, so qubit 0 is the
/// rightmost character of the textual form. Spaces between classical
/// registers are ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    /// bits[i] is the value of qubit i
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from little-endian bits (index 0 = qubit 0)
    pub fn from_qubits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse a count key such as "0110" or "01 10"
    /// Gantree: parse(s) -> Self // 파싱
    pub fn parse(s: &str) -> RbResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .rev()
            .filter(|c| *c != ' ')
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(RbError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Value of qubit `index`
    pub fn qubit(&self, index: QubitId) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// True when every bit is 0 (the RB survival outcome)
    pub fn is_all_zero(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }

    /// Restrict to the given qubit positions
    ///
    /// Position `indices[j]` becomes qubit `j` of the result.
    pub fn select(&self, indices: &[QubitId]) -> RbResult<Self> {
        let bits = indices
            .iter()
            .map(|&q| {
                self.qubit(q).ok_or(RbError::QubitOutOfRange {
                    qubit: q,
                    width: self.len(),
                })
            })
            .collect::<RbResult<Vec<bool>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.bits.iter().rev() {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
