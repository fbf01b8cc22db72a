//! Interleaved RB fitter
//!
//! Gantree: L3_Fitters → InterleavedRbFitter
//!
//! Two independent [`RbFitter`]s, one per sequence, combined pattern by
//! pattern into an error estimate for the interleaved gate.

use crate::base::{RbFitterBase, Sequence, SequencePair};
use crate::config::RbConfig;
use crate::data::{FitResult, InterleavedFitResult, PatternStatistics, SurvivalData};
use crate::fitter::RbFitter;
use log::debug;
use rbfit_core::{ExperimentResult, IntoResultBatch, RbPattern, RbResult, SeedId};
use rbfit_curve::DecayParams;
use std::fmt;

/// Fitter for interleaved RB
/// Gantree: InterleavedRbFitter // 인터리브 RB 피터
#[derive(Debug, Clone)]
pub struct InterleavedRbFitter {
    fitters: SequencePair<RbFitter>,
    joint: Vec<InterleavedFitResult>,
}

impl InterleavedRbFitter {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from reference and interleaved results sharing one configuration
    ///
    /// Both pipelines run and are combined immediately, so both batches
    /// must be non-empty.
    pub fn new(
        reference: impl IntoResultBatch,
        interleaved: impl IntoResultBatch,
        config: RbConfig,
    ) -> RbResult<Self> {
        let mut fitters = SequencePair::new(
            RbFitter::empty(config.clone())?,
            RbFitter::empty(config)?,
        );
        fitters.reference.add_data(reference, false)?;
        fitters.interleaved.add_data(interleaved, false)?;

        let mut fitter = Self {
            fitters,
            joint: Vec::new(),
        };
        fitter.fit_data()?;
        Ok(fitter)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Reference-sequence fitter
    pub fn reference(&self) -> &RbFitter {
        &self.fitters.reference
    }

    /// Interleaved-sequence fitter
    pub fn interleaved(&self) -> &RbFitter {
        &self.fitters.interleaved
    }

    /// Fitter of one sequence
    pub fn fitter(&self, sequence: Sequence) -> &RbFitter {
        self.fitters.get(sequence)
    }

    /// Shared configuration
    pub fn config(&self) -> &RbConfig {
        self.fitters.reference.config()
    }

    /// Qubit patterns
    pub fn patterns(&self) -> &RbPattern {
        self.fitters.reference.patterns()
    }

    /// Survival data of both sequences
    pub fn raw_data(&self) -> SequencePair<&SurvivalData> {
        SequencePair::new(self.reference().raw_data(), self.interleaved().raw_data())
    }

    /// Statistics of both sequences
    pub fn statistics(&self) -> SequencePair<&[PatternStatistics]> {
        SequencePair::new(
            self.reference().statistics(),
            self.interleaved().statistics(),
        )
    }

    /// Decay fits of both sequences
    pub fn fit(&self) -> SequencePair<&[Option<FitResult>]> {
        SequencePair::new(self.reference().fit(), self.interleaved().fit())
    }

    /// Seeds of both sequences
    pub fn seeds(&self) -> SequencePair<&[SeedId]> {
        SequencePair::new(self.reference().seeds(), self.interleaved().seeds())
    }

    /// Batches of both sequences
    pub fn results(&self) -> SequencePair<&[ExperimentResult]> {
        SequencePair::new(self.reference().results(), self.interleaved().results())
    }

    /// Joint estimates, one per pattern
    pub fn fit_interleaved(&self) -> &[InterleavedFitResult] {
        &self.joint
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Add batches to both sequences
    /// Gantree: add_data(ref,int,rerun_fit) -> Result // 데이터 추가
    ///
    /// Both batches are validated before either child ingests. Children
    /// ingest without refitting; with `rerun_fit` both pipelines are rerun
    /// and recombined.
    pub fn add_data(
        &mut self,
        reference: impl IntoResultBatch,
        interleaved: impl IntoResultBatch,
        rerun_fit: bool,
    ) -> RbResult<()> {
        let reference = reference.into_batch();
        let interleaved = interleaved.into_batch();
        self.fitters.reference.check_batch(&reference)?;
        self.fitters.interleaved.check_batch(&interleaved)?;

        self.fitters.reference.add_data(reference, false)?;
        self.fitters.interleaved.add_data(interleaved, false)?;
        if rerun_fit {
            self.fit_data()?;
        }
        Ok(())
    }

    /// Recompute survival data of both sequences
    pub fn calc_data(&mut self) -> RbResult<()> {
        self.fitters.reference.calc_data()?;
        self.fitters.interleaved.calc_data()
    }

    /// Recompute statistics of both sequences
    pub fn calc_statistics(&mut self) -> RbResult<()> {
        self.fitters.reference.calc_statistics()?;
        self.fitters.interleaved.calc_statistics()
    }

    /// Rerun both pipelines and combine
    /// Gantree: fit_data() -> Result // 결합 피팅
    pub fn fit_data(&mut self) -> RbResult<()> {
        for fitter in [&mut self.fitters.reference, &mut self.fitters.interleaved] {
            fitter.calc_data()?;
            fitter.calc_statistics()?;
            fitter.fit_data()?;
        }
        self.combine()
    }

    /// Refit one pattern of one sequence, then recombine
    /// Gantree: fit_data_pattern(index,guess,sequence) -> Result // 패턴 재피팅
    pub fn fit_data_pattern(
        &mut self,
        index: usize,
        guess: DecayParams,
        sequence: Sequence,
    ) -> RbResult<()> {
        let fitter = match sequence {
            Sequence::Reference => &mut self.fitters.reference,
            Sequence::Interleaved => &mut self.fitters.interleaved,
        };
        fitter.fit_data_pattern(index, guess)?;
        self.combine()
    }

    /// Per-pattern joint estimate from the current child fits
    fn combine(&mut self) -> RbResult<()> {
        let patterns = self.patterns();
        let joint = (0..patterns.len())
            .map(|index| {
                let reference = self.fitters.reference.fit_pattern(index)?;
                let interleaved = self.fitters.interleaved.fit_pattern(index)?;
                Ok(InterleavedFitResult::from_fits(
                    patterns.nrb(index),
                    reference,
                    interleaved,
                ))
            })
            .collect::<RbResult<Vec<_>>>()?;

        for (index, est) in joint.iter().enumerate() {
            debug!("pattern {}: epc_est {:.3e} ± {:.1e}", index, est.epc_est, est.epc_est_err);
        }
        self.joint = joint;
        Ok(())
    }
}

impl RbFitterBase for InterleavedRbFitter {
    type View<'a, T: 'a> = SequencePair<&'a T> where Self: 'a;
    type Batch = SequencePair<Vec<ExperimentResult>>;
    type Selector = Sequence;

    fn config(&self) -> &RbConfig {
        InterleavedRbFitter::config(self)
    }

    fn raw_data(&self) -> SequencePair<&SurvivalData> {
        InterleavedRbFitter::raw_data(self)
    }

    fn statistics(&self) -> SequencePair<&Vec<PatternStatistics>> {
        self.fitters.each_ref().map(RbFitterBase::statistics)
    }

    fn fit(&self) -> SequencePair<&Vec<Option<FitResult>>> {
        self.fitters.each_ref().map(RbFitterBase::fit)
    }

    fn seeds(&self) -> SequencePair<&Vec<SeedId>> {
        self.fitters.each_ref().map(RbFitterBase::seeds)
    }

    fn results(&self) -> SequencePair<&Vec<ExperimentResult>> {
        self.fitters.each_ref().map(RbFitterBase::results)
    }

    fn add_data(&mut self, batch: Self::Batch, rerun_fit: bool) -> RbResult<()> {
        InterleavedRbFitter::add_data(self, batch.reference, batch.interleaved, rerun_fit)
    }

    fn calc_data(&mut self) -> RbResult<()> {
        InterleavedRbFitter::calc_data(self)
    }

    fn calc_statistics(&mut self) -> RbResult<()> {
        InterleavedRbFitter::calc_statistics(self)
    }

    fn fit_data(&mut self) -> RbResult<()> {
        InterleavedRbFitter::fit_data(self)
    }

    fn fit_data_pattern(
        &mut self,
        index: usize,
        guess: DecayParams,
        sequence: Sequence,
    ) -> RbResult<()> {
        InterleavedRbFitter::fit_data_pattern(self, index, guess, sequence)
    }
}

impl fmt::Display for InterleavedRbFitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InterleavedRbFitter(patterns={}, seeds={}/{})",
            self.patterns(),
            self.reference().seeds().len(),
            self.interleaved().seeds().len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
