//! Execution result container
//!
//! Gantree: L1_Results → ExperimentResult
//!
//! One execution batch: a list of named circuits with their measurement
//! counts. The fitters only read names and counts from it.

use crate::error::{RbError, RbResult};
use crate::naming::CircuitName;
use crate::types::{Counts, SeedId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Counts of one executed circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitResult {
    /// Circuit name (see [`CircuitName`])
    pub name: String,

    /// Measurement counts (bitstring -> count)
    pub counts: Counts,
}

impl CircuitResult {
    /// Create new circuit result
    pub fn new(name: impl Into<String>, counts: Counts) -> Self {
        Self {
            name: name.into(),
            counts,
        }
    }

    /// Get total count
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Result of one execution batch
/// Gantree: ExperimentResult // 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Executed circuits, in submission order
    pub results: Vec<CircuitResult>,

    /// Job ID (if applicable)
    #[serde(default)]
    pub job_id: Option<String>,

    /// Additional info
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl ExperimentResult {
    /// Create from circuit results
    pub fn new(results: Vec<CircuitResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    /// Set job ID
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Append a circuit
    pub fn push(&mut self, name: impl Into<String>, counts: Counts) {
        self.results.push(CircuitResult::new(name, counts));
    }

    /// Number of circuits in the batch
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Circuit names, in order
    pub fn circuit_names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }

    /// Counts of the named circuit
    /// Gantree: get_counts(name) -> Result<&Counts> // 카운트 조회
    pub fn get_counts(&self, name: &str) -> RbResult<&Counts> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.counts)
            .ok_or_else(|| RbError::MissingCircuit(name.to_string()))
    }

    /// Seeds referenced by the circuits, in first-seen order
    pub fn seeds(&self) -> RbResult<Vec<SeedId>> {
        let mut seeds = Vec::new();
        for name in self.circuit_names() {
            let seed = CircuitName::seed_of(name)?;
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
        Ok(seeds)
    }

    /// Experiment type of the first circuit
    pub fn experiment_type(&self) -> Option<&str> {
        self.results
            .first()
            .map(|r| CircuitName::experiment_type_of(&r.name))
    }

    // ========================================================================
    // JSON I/O
    // ========================================================================

    /// Parse from JSON text
    pub fn from_json(json: &str) -> RbResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> RbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> RbResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl fmt::Display for ExperimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExperimentResult(circuits={}, type={})",
            self.len(),
            self.experiment_type().unwrap_or("-")
        )
    }
}

/// Anything that can be handed to a fitter as a list of result batches
pub trait IntoResultBatch {
    /// Normalize into a list
    fn into_batch(self) -> Vec<ExperimentResult>;
}

impl IntoResultBatch for ExperimentResult {
    fn into_batch(self) -> Vec<ExperimentResult> {
        vec![self]
    }
}

impl IntoResultBatch for Vec<ExperimentResult> {
    fn into_batch(self) -> Vec<ExperimentResult> {
        self
    }
}

impl IntoResultBatch for &[ExperimentResult] {
    fn into_batch(self) -> Vec<ExperimentResult> {
        self.to_vec()
    }
}

impl<T: IntoResultBatch> IntoResultBatch for Option<T> {
    fn into_batch(self) -> Vec<ExperimentResult> {
        self.map(IntoResultBatch::into_batch).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> ExperimentResult {
        let mut r = ExperimentResult::default();
        for seed in [3u64, 1] {
            for k in 0..2 {
                let mut counts = Counts::new();
                counts.insert("0".to_string(), 90);
                counts.insert("1".to_string(), 10);
                r.push(CircuitName::new("rb", k, seed).to_string(), counts);
            }
        }
        r
    }

    #[test]
    fn test_get_counts() {
        let r = make_result();
        let c = r.get_counts("rb_length_1_seed_3").unwrap();
        assert_eq!(c.get("0"), Some(&90));
        assert!(matches!(
            r.get_counts("rb_length_5_seed_3"),
            Err(RbError::MissingCircuit(_))
        ));
    }

    #[test]
    fn test_seeds_first_seen_order() {
        let r = make_result();
        assert_eq!(r.seeds().unwrap(), vec![3, 1]);
    }

    #[test]
    fn test_experiment_type() {
        assert_eq!(make_result().experiment_type(), Some("rb"));
        assert_eq!(ExperimentResult::default().experiment_type(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let r = make_result().with_job_id("job-1");
        let json = r.to_json().unwrap();
        let back = ExperimentResult::from_json(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_from_minimal_json() {
        let json = r#"{"results":[{"name":"rb_length_0_seed_0","counts":{"0":7,"1":1}}]}"#;
        let r = ExperimentResult::from_json(json).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.results[0].total_counts(), 8);
        assert!(r.job_id.is_none());
    }

    #[test]
    fn test_into_batch() {
        assert_eq!(make_result().into_batch().len(), 1);
        assert_eq!(vec![make_result(), make_result()].into_batch().len(), 2);
        assert!(None::<ExperimentResult>.into_batch().is_empty());
    }
}
