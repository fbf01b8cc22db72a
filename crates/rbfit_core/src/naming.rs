//! Circuit naming contract
//!
//! Gantree: L1_Results → CircuitName
//!
//! RB circuits are located in results by name:
//! `<type>_length_<lengthIndex>_seed_<seed>`.

use crate::constants::naming::{LENGTH_MARKER, LENGTH_TAG, SEED_TAG};
use crate::error::{RbError, RbResult};
use crate::types::SeedId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed RB circuit name
/// Gantree: CircuitName // 회로 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitName {
    /// Free-text experiment type (e.g. "rb", "rb_interleaved")
    pub experiment_type: String,
    /// Zero-based index into the declared length sequence
    pub length_index: usize,
    /// Seed of the random sequence
    pub seed: SeedId,
}

impl CircuitName {
    /// Create a new name
    pub fn new(experiment_type: impl Into<String>, length_index: usize, seed: SeedId) -> Self {
        Self {
            experiment_type: experiment_type.into(),
            length_index,
            seed,
        }
    }

    /// Parse a full circuit name
    /// Gantree: parse(name) -> Self // 파싱
    pub fn parse(name: &str) -> RbResult<Self> {
        let invalid = || RbError::InvalidCircuitName(name.to_string());

        let (experiment_type, rest) = name.split_once(LENGTH_MARKER).ok_or_else(invalid)?;
        let fields: Vec<&str> = rest.split('_').collect();
        // rest looks like "_<k>_seed_<s>"
        match fields.as_slice() {
            ["", k, tag, s] if *tag == SEED_TAG => Ok(Self {
                experiment_type: experiment_type.to_string(),
                length_index: k.parse().map_err(|_| invalid())?,
                seed: s.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }

    /// Seed encoded in the trailing `_<seed>` suffix
    pub fn seed_of(name: &str) -> RbResult<SeedId> {
        name.rsplit('_')
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| RbError::InvalidCircuitName(name.to_string()))
    }

    /// Experiment type: everything before the first `_length`
    pub fn experiment_type_of(name: &str) -> &str {
        name.split(LENGTH_MARKER).next().unwrap_or(name)
    }
}

impl fmt::Display for CircuitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.experiment_type, LENGTH_TAG, self.length_index, SEED_TAG, self.seed
        )
    }
}

impl FromStr for CircuitName {
    type Err = RbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
