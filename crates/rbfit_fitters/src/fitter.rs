//! Standard RB fitter
//!
//! Gantree: L3_Fitters → RbFitter
//!
//! Staged analysis of one RB experiment:
//!
//! ```text
//! add_data → calc_data → calc_statistics → fit_data
//!   seeds     survival     mean/std           A·alpha^m + B, EPC
//! ```

use crate::base::RbFitterBase;
use crate::config::RbConfig;
use crate::data::{FitResult, PatternStatistics, SurvivalData};
use crate::guess::initial_guess;
use log::{debug, info, warn};
use rbfit_core::{
    merge_counts, total_shots, zero_count, CircuitName, CliffordLength, ExperimentResult,
    IntoResultBatch, RbError, RbPattern, RbResult, SeedId,
};
use rbfit_curve::{curve_fit, DecayModel, DecayParams};
use std::fmt;

/// Fitter for a single RB sequence family
/// Gantree: RbFitter // 표준 RB 피터
#[derive(Debug, Clone)]
pub struct RbFitter {
    /// Patterns, lengths and fit options
    config: RbConfig,

    /// Every batch added, in arrival order
    results: Vec<ExperimentResult>,

    /// Known seeds, in discovery order (indexes the seed axis of raw data)
    seeds: Vec<SeedId>,

    /// Experiment type taken from the first circuit of the first batch
    experiment_type: Option<String>,

    raw_data: SurvivalData,
    statistics: Vec<PatternStatistics>,
    fits: Vec<Option<FitResult>>,
}

impl RbFitter {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a fitter and ingest the initial results
    ///
    /// A non-empty initial batch runs the whole pipeline.
    pub fn new(results: impl IntoResultBatch, config: RbConfig) -> RbResult<Self> {
        let mut fitter = Self::empty(config)?;
        fitter.add_data(results, true)?;
        Ok(fitter)
    }

    /// Create a fitter holding no results yet
    pub fn empty(config: RbConfig) -> RbResult<Self> {
        config.check()?;
        let num_patterns = config.num_patterns();
        Ok(Self {
            config,
            results: Vec::new(),
            seeds: Vec::new(),
            experiment_type: None,
            raw_data: SurvivalData::default(),
            statistics: Vec::new(),
            fits: vec![None; num_patterns],
        })
    }

    /// Create a fitter for the default pattern `[[0]]`
    pub fn with_lengths(
        results: impl IntoResultBatch,
        lengths: Vec<CliffordLength>,
    ) -> RbResult<Self> {
        Self::new(results, RbConfig::new(vec![lengths]))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration
    pub fn config(&self) -> &RbConfig {
        &self.config
    }

    /// Qubit patterns
    pub fn patterns(&self) -> &RbPattern {
        &self.config.patterns
    }

    /// Clifford lengths per pattern
    pub fn lengths(&self) -> &[Vec<CliffordLength>] {
        &self.config.lengths
    }

    /// Survival probabilities `[pattern][seed][length]`
    pub fn raw_data(&self) -> &SurvivalData {
        &self.raw_data
    }

    /// Per-pattern statistics
    pub fn statistics(&self) -> &[PatternStatistics] {
        &self.statistics
    }

    /// Per-pattern fits
    pub fn fit(&self) -> &[Option<FitResult>] {
        &self.fits
    }

    /// Fit of one pattern
    /// Gantree: fit_pattern(index) -> Result<&FitResult> // 패턴별 결과
    pub fn fit_pattern(&self, index: usize) -> RbResult<&FitResult> {
        self.check_pattern(index)?;
        self.fits
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(RbError::MissingFit(index))
    }

    /// Known seeds, in discovery order
    pub fn seeds(&self) -> &[SeedId] {
        &self.seeds
    }

    /// Every batch added so far
    pub fn results(&self) -> &[ExperimentResult] {
        &self.results
    }

    /// Experiment type inferred by the last [`calc_data`](Self::calc_data)
    pub fn experiment_type(&self) -> Option<&str> {
        self.experiment_type.as_deref()
    }

    /// Fitted model
    pub fn decay_model(&self) -> DecayModel {
        DecayModel
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Add result batches
    /// Gantree: add_data(results,rerun_fit) -> Result // 데이터 추가
    ///
    /// Every batch must hold exactly one circuit per length point; a batch
    /// that does not is rejected before any state changes. With `rerun_fit`
    /// the whole pipeline is recomputed from all retained batches.
    pub fn add_data(&mut self, new_results: impl IntoResultBatch, rerun_fit: bool) -> RbResult<()> {
        let batch = new_results.into_batch();
        if batch.is_empty() {
            return Ok(());
        }

        let discovered = self.check_batch(&batch)?;
        if !discovered.is_empty() {
            info!("new seeds {:?} ({} known)", discovered, self.seeds.len() + discovered.len());
        }

        self.seeds.extend(discovered);
        self.results.extend(batch);
        debug!(
            "add_data: {} batches retained, {} seeds",
            self.results.len(),
            self.seeds.len()
        );

        if rerun_fit {
            self.calc_data()?;
            self.calc_statistics()?;
            self.fit_data()?;
        }
        Ok(())
    }

    /// Validate a batch without ingesting it
    ///
    /// Returns the seeds the batch would add, in discovery order. Fails on
    /// a circuit-count mismatch or a name without a seed suffix.
    pub fn check_batch(&self, batch: &[ExperimentResult]) -> RbResult<Vec<SeedId>> {
        let expected = self.config.num_lengths();
        if let Some(bad) = batch.iter().find(|r| r.len() != expected) {
            return Err(RbError::ConfigurationMismatch {
                circuits: bad.len(),
                lengths: expected,
            });
        }

        let mut discovered = Vec::new();
        for name in batch.iter().flat_map(|r| r.circuit_names()) {
            let seed = CircuitName::seed_of(name)?;
            if !self.seeds.contains(&seed) && !discovered.contains(&seed) {
                discovered.push(seed);
            }
        }
        Ok(discovered)
    }

    /// Reduce counts to survival probabilities
    /// Gantree: calc_data() -> Result // 카운트 → 생존 확률
    ///
    /// Counts of the same circuit are summed across batches; each pattern
    /// reads the all-zero outcome of its own classical bit range. A circuit
    /// with no shots yields NaN.
    pub fn calc_data(&mut self) -> RbResult<()> {
        let experiment_type = self
            .results
            .first()
            .and_then(ExperimentResult::experiment_type)
            .ok_or(RbError::NoResults)?
            .to_string();

        let n_lengths = self.config.num_lengths();
        let positions = self.config.patterns.bit_positions();
        let mut values = vec![Vec::with_capacity(self.seeds.len()); positions.len()];

        for &seed in &self.seeds {
            let mut rows = vec![Vec::with_capacity(n_lengths); positions.len()];
            for k in 0..n_lengths {
                let name = CircuitName::new(experiment_type.as_str(), k, seed).to_string();
                let merged =
                    merge_counts(self.results.iter().filter_map(|r| r.get_counts(&name).ok()));
                let shots = total_shots(&merged) as f64;

                for (row, bits) in rows.iter_mut().zip(&positions) {
                    let zeros = zero_count(&merged, bits)? as f64;
                    row.push(zeros / shots);
                }
            }
            for (pattern, row) in values.iter_mut().zip(rows) {
                pattern.push(row);
            }
        }

        debug!(
            "calc_data: type '{}', {} patterns x {} seeds x {} lengths",
            experiment_type,
            positions.len(),
            self.seeds.len(),
            n_lengths
        );
        self.experiment_type = Some(experiment_type);
        self.raw_data = SurvivalData::new(values);
        Ok(())
    }

    /// Mean and population deviation across seeds
    /// Gantree: calc_statistics() -> Result // 통계
    pub fn calc_statistics(&mut self) -> RbResult<()> {
        if self.raw_data.num_seeds() == 0 {
            return Err(RbError::NoResults);
        }
        self.statistics = self
            .raw_data
            .iter()
            .map(PatternStatistics::from_seed_rows)
            .collect();
        debug!(
            "calc_statistics: {} patterns, {} seeds",
            self.statistics.len(),
            self.raw_data.num_seeds()
        );
        Ok(())
    }

    /// Fit every pattern from its data-driven guess
    /// Gantree: fit_data() -> Result // 전체 피팅
    ///
    /// Fits are replaced only if every pattern succeeds.
    pub fn fit_data(&mut self) -> RbResult<()> {
        let fits = (0..self.config.num_patterns())
            .map(|index| {
                let guess = self.guess(index)?;
                self.compute_fit(index, guess).map(Some)
            })
            .collect::<RbResult<Vec<_>>>()?;
        self.fits = fits;
        Ok(())
    }

    /// Refit one pattern from a caller-supplied guess
    /// Gantree: fit_data_pattern(index,guess) -> Result // 패턴 피팅
    pub fn fit_data_pattern(&mut self, index: usize, guess: DecayParams) -> RbResult<()> {
        let fit = self.compute_fit(index, guess)?;
        self.fits.resize(self.config.num_patterns(), None);
        self.fits[index] = Some(fit);
        Ok(())
    }

    /// Data-driven starting point for pattern `index`
    pub fn guess(&self, index: usize) -> RbResult<DecayParams> {
        let stats = self.pattern_statistics(index)?;
        Ok(initial_guess(
            stats,
            &self.config.lengths[index],
            self.config.patterns.nrb(index),
            self.config.fit.default_alpha_guess,
        ))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn check_pattern(&self, index: usize) -> RbResult<()> {
        let count = self.config.num_patterns();
        if index >= count {
            return Err(RbError::PatternOutOfRange { index, count });
        }
        Ok(())
    }

    fn pattern_statistics(&self, index: usize) -> RbResult<&PatternStatistics> {
        self.check_pattern(index)?;
        self.statistics.get(index).ok_or(RbError::NoResults)
    }

    fn compute_fit(&self, index: usize, guess: DecayParams) -> RbResult<FitResult> {
        let stats = self.pattern_statistics(index)?;
        let sigma = stats.sigma();
        if stats.std.is_some() && sigma.is_none() {
            warn!(
                "pattern {}: zero standard deviation at some length, fitting unweighted",
                index
            );
        }

        debug!("fit pattern {}: guess {}", index, guess);
        let xdata = self.config.xdata(index);
        let fit = curve_fit(
            &DecayModel,
            &xdata,
            &stats.mean,
            sigma,
            &guess.to_array(),
            &self.config.fit,
        )?;
        debug!(
            "fit pattern {}: {:?} after {} iterations",
            index, fit.params, fit.iterations
        );

        FitResult::from_vectors(self.config.patterns.nrb(index), &fit.params, &fit.params_err)
    }
}

impl RbFitterBase for RbFitter {
    type View<'a, T: 'a> = &'a T where Self: 'a;
    type Batch = Vec<ExperimentResult>;
    type Selector = ();

    fn config(&self) -> &RbConfig {
        &self.config
    }

    fn raw_data(&self) -> &SurvivalData {
        &self.raw_data
    }

    fn statistics(&self) -> &Vec<PatternStatistics> {
        &self.statistics
    }

    fn fit(&self) -> &Vec<Option<FitResult>> {
        &self.fits
    }

    fn seeds(&self) -> &Vec<SeedId> {
        &self.seeds
    }

    fn results(&self) -> &Vec<ExperimentResult> {
        &self.results
    }

    fn add_data(&mut self, batch: Self::Batch, rerun_fit: bool) -> RbResult<()> {
        RbFitter::add_data(self, batch, rerun_fit)
    }

    fn calc_data(&mut self) -> RbResult<()> {
        RbFitter::calc_data(self)
    }

    fn calc_statistics(&mut self) -> RbResult<()> {
        RbFitter::calc_statistics(self)
    }

    fn fit_data(&mut self) -> RbResult<()> {
        RbFitter::fit_data(self)
    }

    fn fit_data_pattern(&mut self, index: usize, guess: DecayParams, _: ()) -> RbResult<()> {
        RbFitter::fit_data_pattern(self, index, guess)
    }
}

impl fmt::Display for RbFitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RbFitter(patterns={}, seeds={}, results={})",
            self.config.patterns,
            self.seeds.len(),
            self.results.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
