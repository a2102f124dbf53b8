//! Configuration options for the search engine.

use std::time::Duration;

use crate::game::Value;

/// Tunable parameters for a search.
///
/// All fields have working defaults; use the builder methods to adjust the
/// ones you care about.
///
/// # Example
///
/// ```
/// use sapling_mcts::MctsParams;
/// use std::time::Duration;
///
/// let params = MctsParams::default()
///     .with_exploration(2.0)
///     .with_duration(Duration::from_millis(250))
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct MctsParams {
    /// Weight of the mean score in the selection priority (`c1`).
    pub exploitation: f64,

    /// Weight of the uncertainty spread in the selection priority (`c2`).
    ///
    /// Higher values favour sampling rarely visited moves.
    pub exploration: f64,

    /// Lower bound of the value scale; the Minimizer's best outcome.
    pub alpha: Value,

    /// Upper bound of the value scale; the Maximizer's best outcome.
    pub beta: Value,

    /// Soft deadline for a move search. The worker is signalled to stop once
    /// the deadline elapses and finishes its current chunk.
    pub duration: Duration,

    /// Hard cap on the root's accumulated √-rollout count; the worker stops
    /// on its own once the root exceeds it.
    pub maxsim: f64,

    /// Base number of rollouts performed per leaf visit.
    pub numrolls: u32,

    /// Root √-rollout count per unit increase of the adaptive rollout
    /// multiplier. As the root accumulates samples, each leaf visit performs
    /// `root_samples / simsperroll + numrolls` rollouts.
    pub simsperroll: f64,

    /// Node table capacity reserved beyond the carry-over cache size.
    pub extracache: usize,

    /// Number of descents the worker performs between checks of the stop
    /// flag. Cancellation latency is bounded by this many descents.
    pub advancechunks: u32,

    /// Whether to run the search on a background worker thread. With
    /// `false`, searches are no-ops and move choice falls back to whatever
    /// the (possibly carried-over) table already contains.
    pub background: bool,

    /// Spread samples evenly across root moves instead of concentrating on
    /// the current best. Used while pondering, so the readout covers all
    /// moves.
    pub uniform: bool,

    /// Store newly discovered terminals as inert, so proofs do not collapse
    /// their parents. The least-evil policy searches this way.
    pub inert: bool,

    /// Seed for the worker's random generator. `None` seeds from entropy;
    /// parallel workers derive per-worker seeds by offsetting this value.
    pub seed: Option<u64>,
}

impl Default for MctsParams {
    fn default() -> Self {
        MctsParams {
            exploitation: 1.0,
            exploration: 8f64.sqrt(),
            alpha: -1.0,
            beta: 1.0,
            duration: Duration::from_millis(1000),
            maxsim: 1e8,
            numrolls: 1,
            simsperroll: 1e6,
            extracache: 100_000,
            advancechunks: 100,
            background: true,
            uniform: false,
            inert: false,
            seed: None,
        }
    }
}

impl MctsParams {
    /// Sets the exploitation weight `c1`.
    pub fn with_exploitation(mut self, c1: f64) -> Self {
        self.exploitation = c1;
        self
    }

    /// Sets the exploration weight `c2`.
    pub fn with_exploration(mut self, c2: f64) -> Self {
        self.exploration = c2;
        self
    }

    /// Sets the value bounds `[alpha, beta]`.
    pub fn with_bounds(mut self, alpha: Value, beta: Value) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the soft search deadline.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the hard cap on root samples.
    pub fn with_maxsim(mut self, maxsim: f64) -> Self {
        self.maxsim = maxsim;
        self
    }

    /// Sets the base rollouts per leaf visit.
    pub fn with_numrolls(mut self, numrolls: u32) -> Self {
        self.numrolls = numrolls;
        self
    }

    /// Sets the root-sample count per adaptive rollout increment.
    pub fn with_simsperroll(mut self, simsperroll: f64) -> Self {
        self.simsperroll = simsperroll;
        self
    }

    /// Sets the extra node-table capacity reserved above the carry-over.
    pub fn with_extracache(mut self, extracache: usize) -> Self {
        self.extracache = extracache;
        self
    }

    /// Sets the number of descents between cancellation checks.
    pub fn with_advancechunks(mut self, advancechunks: u32) -> Self {
        self.advancechunks = advancechunks;
        self
    }

    /// Enables or disables the background worker.
    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Enables or disables uniform root exploration.
    pub fn with_uniform(mut self, uniform: bool) -> Self {
        self.uniform = uniform;
        self
    }

    /// Enables or disables inert terminal bookkeeping.
    pub fn with_inert(mut self, inert: bool) -> Self {
        self.inert = inert;
        self
    }

    /// Sets a deterministic seed for the worker's random generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
