//! Synthetic RB result generation
//!
//! Gantree: L4_Bench → Generators
//!
//! Produces execution batches that follow the circuit naming contract,
//! one [`ExperimentResult`] per seed. Every pattern survives a shot with
//! probability `A·alpha^L + B`; failed shots land on a random non-zero
//! outcome of that pattern's bits.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rbfit_core::{
    Bitstring, CircuitName, CliffordLength, Counts, ExperimentResult, Probability, RbError,
    RbPattern, RbResult, SeedId,
};
use rbfit_curve::{DecayModel, DecayParams};
use rbfit_fitters::RbConfig;

/// Default shots per circuit
pub const DEFAULT_SHOTS: u64 = 1024;

/// Synthetic RB data source
/// Gantree: SyntheticRb // 합성 RB 데이터
#[derive(Debug, Clone)]
pub struct SyntheticRb {
    /// Qubit groups, fixing the classical bit layout
    patterns: RbPattern,

    /// Clifford lengths per pattern
    lengths: Vec<Vec<CliffordLength>>,

    /// True decay per pattern
    params: Vec<DecayParams>,

    /// Shots per circuit
    shots: u64,

    /// Name prefix of the generated circuits
    experiment_type: String,

    /// Base RNG seed
    rng_seed: u64,

    /// Half-width of the per-seed survival offset
    seed_spread: f64,
}

impl SyntheticRb {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a generator for the layout of `config`
    ///
    /// `params` holds one true decay per pattern.
    pub fn new(config: &RbConfig, params: Vec<DecayParams>) -> RbResult<Self> {
        config.check()?;
        if params.len() != config.num_patterns() {
            return Err(RbError::InvalidConfig(format!(
                "{} decay parameter sets for {} patterns",
                params.len(),
                config.num_patterns()
            )));
        }

        Ok(Self {
            patterns: config.patterns.clone(),
            lengths: config.lengths.clone(),
            params,
            shots: DEFAULT_SHOTS,
            experiment_type: rbfit_core::names::RB_TYPE.to_string(),
            rng_seed: 42,
            seed_spread: 0.0,
        })
    }

    /// Single-qubit generator with a pure `A·alpha^L + B` decay
    pub fn single_qubit(lengths: Vec<CliffordLength>, params: DecayParams) -> RbResult<Self> {
        Self::new(&RbConfig::new(vec![lengths]), vec![params])
    }

    /// Set shots per circuit
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set base RNG seed
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Set circuit name prefix (e.g. `rb_interleaved`)
    pub fn with_experiment_type(mut self, experiment_type: impl Into<String>) -> Self {
        self.experiment_type = experiment_type.into();
        self
    }

    /// Shift each seed's survival curve by a uniform offset in `[-spread, spread]`
    pub fn with_seed_spread(mut self, spread: f64) -> Self {
        self.seed_spread = spread.abs();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// True decay of a pattern
    pub fn params(&self, pattern: usize) -> Option<&DecayParams> {
        self.params.get(pattern)
    }

    /// Shots per circuit
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Circuit name prefix
    pub fn experiment_type(&self) -> &str {
        &self.experiment_type
    }

    /// Noise-free survival probability of `pattern` at `length`
    pub fn survival(&self, pattern: usize, length: CliffordLength) -> Option<f64> {
        self.params
            .get(pattern)
            .map(|p| DecayModel.evaluate(length as f64, p))
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate one batch per seed
    /// Gantree: generate(seeds) -> Vec<ExperimentResult> // 배치 생성
    pub fn generate(
        &self,
        seeds: impl IntoIterator<Item = SeedId>,
    ) -> RbResult<Vec<ExperimentResult>> {
        seeds.into_iter().map(|s| self.generate_seed(s)).collect()
    }

    /// Generate the batch of a single seed
    pub fn generate_seed(&self, seed: SeedId) -> RbResult<ExperimentResult> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.rng_seed.wrapping_add(seed));
        let offsets: Vec<f64> = (0..self.patterns.len())
            .map(|_| {
                if self.seed_spread > 0.0 {
                    rng.gen_range(-self.seed_spread..=self.seed_spread)
                } else {
                    0.0
                }
            })
            .collect();

        let num_lengths = self.lengths.first().map_or(0, Vec::len);
        let mut batch = ExperimentResult::default()
            .with_job_id(format!("{}-seed-{}", self.experiment_type, seed));

        for k in 0..num_lengths {
            let survival = self.survival_at(k, &offsets)?;
            let counts = self.sample_counts(&survival, &mut rng);
            let name = CircuitName::new(self.experiment_type.as_str(), k, seed);
            batch.push(name.to_string(), counts);
        }

        debug!(
            "Generated seed {} ({} circuits, {} shots each)",
            seed,
            batch.len(),
            self.shots
        );
        Ok(batch)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Per-pattern survival at length index `k`, offset and clamped to [0, 1]
    fn survival_at(&self, k: usize, offsets: &[f64]) -> RbResult<Vec<Probability>> {
        self.params
            .iter()
            .zip(&self.lengths)
            .zip(offsets)
            .map(|((params, lengths), offset)| {
                let p = DecayModel.evaluate(lengths[k] as f64, params) + offset;
                Probability::new(p.clamp(0.0, 1.0))
            })
            .collect()
    }

    /// Draw `shots` outcomes over the whole register
    fn sample_counts(&self, survival: &[Probability], rng: &mut ChaCha8Rng) -> Counts {
        let width: usize = self.patterns.iter().map(<[_]>::len).sum();
        let mut counts = Counts::new();

        for _ in 0..self.shots {
            let mut bits = vec![false; width];
            for (i, p) in survival.iter().enumerate() {
                if rng.gen::<f64>() < p.value() {
                    continue;
                }
                let range = self.patterns.bit_range(i);
                let outcomes = 1u64 << range.len();
                let failure = rng.gen_range(1..outcomes);
                for (j, bit) in range.enumerate() {
                    bits[bit] = (failure >> j) & 1 == 1;
                }
            }
            *counts
                .entry(Bitstring::from_qubits(bits).to_string())
                .or_insert(0) += 1;
        }

        counts
    }
}

// ============================================================================
// Tests
// ============================================================================
