//! # sapling-mcts
//!
//! Monte Carlo tree search for two-player zero-sum perfect-information
//! games, with a background worker, proof-aware node lifecycle and tree
//! carry-over between moves.
//!
//! The engine is generic over a game: implement [`GamePosition`] for your
//! position type and the engine does the rest. A search grows a tree keyed
//! by position in a hash table. Each node starts as a *bud* (children still
//! waiting for their first sample), matures into a *trunk* (all children
//! sampled, kept in a priority queue), and may collapse into a *terminal*
//! once its game value is proven — a child that is a proven win for the
//! player to move decides the whole node on the spot.
//!
//! ## Basic usage
//!
//! ```rust
//! use sapling_mcts::{Engine, GamePosition, MctsParams, Player, Value};
//! use std::time::Duration;
//!
//! // A one-move game: win or lose on the spot.
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct OneShot(u8);
//!
//! impl GamePosition for OneShot {
//!     type Label = &'static str;
//!
//!     fn player(&self) -> Player {
//!         Player::Maximizer
//!     }
//!
//!     fn actions(&self) -> Vec<(&'static str, OneShot)> {
//!         match self.0 {
//!             0 => vec![("win", OneShot(1)), ("lose", OneShot(2))],
//!             _ => vec![],
//!         }
//!     }
//!
//!     fn terminal(&self) -> Option<Value> {
//!         match self.0 {
//!             1 => Some(1.0),
//!             2 => Some(-1.0),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), sapling_mcts::SearchError> {
//! let params = MctsParams::default()
//!     .with_duration(Duration::from_millis(200))
//!     .with_seed(7);
//!
//! let mut engine = Engine::new(params);
//! let label = engine.act(&OneShot(0))?;
//! assert_eq!(label, Some("win"));
//! # Ok(())
//! # }
//! ```
//!
//! ## How a move is chosen
//!
//! 1. A worker thread repeatedly descends the tree, always following the
//!    child with the greatest upper-confidence priority, samples one new
//!    child at the bud it reaches with a batch of uniform random rollouts,
//!    and folds the score back along the path.
//! 2. The foreground sleeps until the deadline (or until the worker proves
//!    the root), raises the stop flag, and joins.
//! 3. The move with the best *lower* confidence bound is played. If several
//!    moves tie — typically all proven losses — a least-evil search with
//!    proof propagation disabled picks the one that loses slowest.
//! 4. The table entries still reachable through the played move are carried
//!    over to seed the next search.
//!
//! Between your own moves you can keep the worker busy on the opponent's
//! position with [`Engine::think`], which spreads samples uniformly over all
//! replies and hands its tree to the next [`Engine::act`].
//!
//! ## Customisation
//!
//! Every search knob lives on [`MctsParams`] (exploration weights, deadline,
//! sample caps, rollout batching, cancellation granularity). The root move
//! selector and the least-evil tie-breaker can be replaced wholesale with
//! [`Engine::with_bestactions`] and [`Engine::with_lessevil`]. For machines
//! with cores to spare, [`parallel_bestaction`] runs several independent
//! searches and combines their verdicts.

pub mod config;
pub mod engine;
pub mod game;
pub mod node;
pub mod parallel;
pub mod rollout;
pub mod root;
pub mod search;
pub mod select;
pub mod stats;
pub mod table;

pub use config::MctsParams;
pub use engine::{BestActionsFn, Engine, LessEvilFn, Thinking};
pub use game::{ActionFilter, GamePosition, Player, Value};
pub use node::{Node, PrioMove, SampleStat, Trunk};
pub use parallel::{parallel_bestaction, parallel_least_evil};
pub use root::{default_bestactions, least_evil, principal_variation};
pub use search::{advance_for, spawn, SearchHandle, SearchOutcome};
pub use stats::SearchStats;
pub use table::{CarryCache, NodeTable};

/// Error types for the search engine
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// No legal actions are available from the position being decided
    #[error("no legal actions available from the searched position")]
    NoLegalActions,

    /// A position reported no actions without being terminal
    #[error("position reports no actions but no terminal value either")]
    InvalidPosition,

    /// The background worker died; usually a panic in the game capability
    #[error("search worker panicked")]
    WorkerPanicked,
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
