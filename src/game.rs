//! Traits and value types describing the games the engine can search.
//!
//! The [`GamePosition`] trait is the only interface a game has to implement.
//! It deliberately knows nothing about trees, rollouts or workers: a position
//! enumerates its successors, names the player to move, and reports whether
//! the game is over.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Score of a position from the Maximizer's point of view.
///
/// Values live in the closed interval `[alpha, beta]` configured on
/// [`MctsParams`](crate::MctsParams) (default `[-1, +1]`). The Minimizer's
/// score of the same position is the negation.
pub type Value = f64;

/// The two sides of a zero-sum game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Prefers larger [`Value`]s.
    Maximizer,
    /// Prefers smaller [`Value`]s.
    Minimizer,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Maximizer => Player::Minimizer,
            Player::Minimizer => Player::Maximizer,
        }
    }

    /// The best value this player can hope for under the given bounds.
    pub fn bound(self, alpha: Value, beta: Value) -> Value {
        match self {
            Player::Maximizer => beta,
            Player::Minimizer => alpha,
        }
    }

    /// Combines two values, keeping the one this player prefers.
    pub fn objective(self, a: Value, b: Value) -> Value {
        match self {
            Player::Maximizer => a.max(b),
            Player::Minimizer => a.min(b),
        }
    }

    /// Maps a Maximizer-perspective value onto this player's scale.
    pub fn sign(self, v: Value) -> Value {
        match self {
            Player::Maximizer => v,
            Player::Minimizer => -v,
        }
    }
}

/// Predicate over positions, used to prune the carry-over cache after a move.
pub type ActionFilter<G> = Arc<dyn Fn(&G) -> bool + Send + Sync>;

/// Capability set a position type must provide to be searchable.
///
/// Positions are the keys of the engine's node table, so they must be
/// hashable and cheap to clone; games with large boards typically make the
/// position a small handle or a compactly packed board encoding.
///
/// # Contract
///
/// * `actions` returns the same successors, in the same order, every time it
///   is called on a given position.
/// * `terminal` returns `Some` exactly for positions with no further play,
///   and the value lies within the engine's `[alpha, beta]` bounds.
/// * A position with no actions and no terminal value is outside the
///   contract; the engine may panic or report
///   [`SearchError::InvalidPosition`](crate::SearchError::InvalidPosition)
///   when it runs into one.
pub trait GamePosition: Clone + Eq + Hash + Send + Sync + 'static {
    /// Name of a move, as returned to the caller and matched against
    /// [`action_filters`](GamePosition::action_filters).
    type Label: Clone + Eq + Debug + Send + Sync + 'static;

    /// The player to move in this position.
    fn player(&self) -> Player;

    /// All legal moves as `(label, successor)` pairs, in a stable order.
    fn actions(&self) -> Vec<(Self::Label, Self)>;

    /// Number of legal moves; must equal `self.actions().len()`.
    ///
    /// Games that can count moves without materialising them should override
    /// this, since the selection priority consults it on every visit.
    fn num_actions(&self) -> usize {
        self.actions().len()
    }

    /// `Some(value)` iff the game is over in this position.
    fn terminal(&self) -> Option<Value>;

    /// Per-label predicates describing which positions remain reachable
    /// after playing that label. Labels without an entry keep everything.
    ///
    /// The engine uses these to prune its carry-over cache between moves;
    /// a coarse over-approximation (keeping too much) is always safe.
    fn action_filters(&self) -> Vec<(Self::Label, ActionFilter<Self>)> {
        Vec::new()
    }
}
