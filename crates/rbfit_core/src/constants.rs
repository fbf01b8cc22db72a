//! Constants for RBFit
//!
//! Gantree: L0_Foundation → Constants
//!
//! Fit defaults and the circuit naming contract.

// ============================================================================
// Fit Constants
// Gantree: fit // 피팅 상수
// ============================================================================

pub mod fit {
    //! Defaults for the exponential decay fit `A·alpha^m + B`

    /// Number of decay-model parameters (A, alpha, B)
    pub const NUM_PARAMS: usize = 3;

    /// Lower bounds for (A, alpha, B)
    /// Gantree: LOWER_BOUNDS: [f64; 3] = [-2, 0, -2]
    pub const LOWER_BOUNDS: [f64; NUM_PARAMS] = [-2.0, 0.0, -2.0];

    /// Upper bounds for (A, alpha, B)
    /// Gantree: UPPER_BOUNDS: [f64; 3] = [2, 1, 2]
    pub const UPPER_BOUNDS: [f64; NUM_PARAMS] = [2.0, 1.0, 2.0];

    /// Decay parameter used when the two-point estimate is not a decay
    /// Gantree: DEFAULT_ALPHA_GUESS: f64 = 0.99
    pub const DEFAULT_ALPHA_GUESS: f64 = 0.99;

    /// Optimizer iteration limit
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

    /// Relative cost-reduction tolerance
    pub const DEFAULT_FTOL: f64 = 1e-8;

    /// Relative step tolerance
    pub const DEFAULT_XTOL: f64 = 1e-8;

    /// Projected-gradient tolerance
    pub const DEFAULT_GTOL: f64 = 1e-8;

    /// Initial Levenberg-Marquardt damping factor
    pub const DEFAULT_INITIAL_DAMPING: f64 = 1e-3;

    /// Damping above which no descent step exists
    pub const MAX_DAMPING: f64 = 1e16;

    /// Hilbert-space dimension `2^n` of an n-qubit pattern
    #[inline]
    pub fn nrb(num_qubits: usize) -> f64 {
        2f64.powi(num_qubits as i32)
    }
}

// ============================================================================
// Naming Constants
// Gantree: naming // 회로 이름 규약
// ============================================================================

pub mod naming {
    //! Circuit naming contract `<type>_length_<k>_seed_<seed>`

    /// Marker separating the experiment type from the indices
    pub const LENGTH_MARKER: &str = "_length";

    /// Length-index field tag
    pub const LENGTH_TAG: &str = "length";

    /// Seed field tag
    pub const SEED_TAG: &str = "seed";

    /// Experiment type of standard RB sequences
    pub const RB_TYPE: &str = "rb";

    /// Experiment type of interleaved RB sequences
    pub const INTERLEAVED_TYPE: &str = "rb_interleaved";
}

// ============================================================================
// Tests
// ============================================================================
