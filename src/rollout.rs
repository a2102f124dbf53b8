//! Uniform random playouts.
//!
//! Rollouts estimate a position's value by playing uniformly random moves to
//! the end of the game. No heuristic guidance is applied; uniform play keeps
//! the estimates unbiased and the selection arithmetic sound.

use rand::Rng;

use crate::game::{GamePosition, Value};

/// Plays one uniformly random game from `gs` and returns the terminal value.
///
/// Deterministic for a fixed generator state: the same `rng` position yields
/// the same playout.
pub fn rollout<G: GamePosition, R: Rng>(gs: &G, rng: &mut R) -> Value {
    let mut current = gs.clone();
    loop {
        if let Some(v) = current.terminal() {
            return v;
        }
        let mut actions = current.actions();
        assert!(
            !actions.is_empty(),
            "non-terminal position reported no actions"
        );
        let idx = rng.gen_range(0..actions.len());
        current = actions.swap_remove(idx).1;
    }
}

/// Sum of `n` independent rollouts from the same position.
pub fn rollouts<G: GamePosition, R: Rng>(n: u32, gs: &G, rng: &mut R) -> Value {
    (0..n).map(|_| rollout(gs, rng)).sum()
}
