//! Shared fitter interface
//!
//! Gantree: L3_Fitters → RbFitterBase
//!
//! The standard fitter answers every accessor with a single view; the
//! interleaved fitter answers with a reference/interleaved pair.

use crate::config::RbConfig;
use crate::data::{FitResult, PatternStatistics, SurvivalData};
use rbfit_core::{CliffordLength, ExperimentResult, RbPattern, RbResult, SeedId};
use rbfit_curve::{DecayModel, DecayParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common accessors and pipeline stages of RB fitters
/// Gantree: RbFitterBase // 피터 공통 인터페이스
pub trait RbFitterBase {
    /// How a fitter exposes a piece of its state (`&T` or a pair of `&T`)
    type View<'a, T: 'a>
    where
        Self: 'a;

    /// Result batches accepted by [`add_data`](RbFitterBase::add_data)
    type Batch;

    /// Which fit [`fit_data_pattern`](RbFitterBase::fit_data_pattern) targets
    /// (`()` for a single sequence, [`Sequence`] for a pair)
    type Selector;

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration shared by all stages
    fn config(&self) -> &RbConfig;

    /// Survival probabilities `[pattern][seed][length]`
    fn raw_data(&self) -> Self::View<'_, SurvivalData>;

    /// Per-pattern mean and deviation
    fn statistics(&self) -> Self::View<'_, Vec<PatternStatistics>>;

    /// Per-pattern decay fits; `None` until a pattern has been fitted
    fn fit(&self) -> Self::View<'_, Vec<Option<FitResult>>>;

    /// Known seeds, in discovery order
    fn seeds(&self) -> Self::View<'_, Vec<SeedId>>;

    /// Every result batch added so far
    fn results(&self) -> Self::View<'_, Vec<ExperimentResult>>;

    /// Clifford lengths per pattern
    fn lengths(&self) -> &[Vec<CliffordLength>] {
        &self.config().lengths
    }

    /// Qubit patterns
    fn patterns(&self) -> &RbPattern {
        &self.config().patterns
    }

    /// Model the survival data is fitted to
    fn decay_model(&self) -> DecayModel {
        DecayModel
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Ingest new batches; with `rerun_fit` recompute every stage
    fn add_data(&mut self, batch: Self::Batch, rerun_fit: bool) -> RbResult<()>;

    /// Reduce counts to survival probabilities
    fn calc_data(&mut self) -> RbResult<()>;

    /// Aggregate survival probabilities across seeds
    fn calc_statistics(&mut self) -> RbResult<()>;

    /// Fit every pattern from data-driven guesses
    fn fit_data(&mut self) -> RbResult<()>;

    /// Refit one pattern of the selected sequence from a caller-supplied guess
    fn fit_data_pattern(
        &mut self,
        index: usize,
        guess: DecayParams,
        selector: Self::Selector,
    ) -> RbResult<()>;
}

/// Reference and interleaved counterparts
/// Gantree: SequencePair<T> // (기준, 인터리브)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencePair<T> {
    /// Standard RB sequence
    pub reference: T,
    /// Sequence with the target gate interleaved
    pub interleaved: T,
}

impl<T> SequencePair<T> {
    /// Create a pair
    pub fn new(reference: T, interleaved: T) -> Self {
        Self {
            reference,
            interleaved,
        }
    }

    /// Member selected by `sequence`
    pub fn get(&self, sequence: Sequence) -> &T {
        match sequence {
            Sequence::Reference => &self.reference,
            Sequence::Interleaved => &self.interleaved,
        }
    }

    /// Apply `f` to both members
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SequencePair<U> {
        SequencePair {
            reference: f(self.reference),
            interleaved: f(self.interleaved),
        }
    }

    /// Borrow both members
    pub fn each_ref(&self) -> SequencePair<&T> {
        SequencePair::new(&self.reference, &self.interleaved)
    }
}

/// Which sequence of an interleaved experiment
/// Gantree: Sequence // 시퀀스 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sequence {
    /// Standard RB
    #[default]
    Reference,
    /// Interleaved RB
    Interleaved,
}

impl Sequence {
    /// Both sequences, reference first
    pub const ALL: [Sequence; 2] = [Sequence::Reference, Sequence::Interleaved];
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sequence::Reference => "Standard RB",
            Sequence::Interleaved => "Interleaved RB",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// Tests
// ============================================================================
