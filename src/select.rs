//! Selection arithmetic: priorities for descent, confidence bounds for the
//! final move choice.
//!
//! During descent the engine picks the child with the greatest *upper*
//! confidence priority, rewarding both a good mean and a thin sample. At the
//! root it picks the move with the greatest *lower* confidence bound, so the
//! played move is one whose quality is established rather than merely
//! hoped for.
//!
//! The spread term uses `log(num_actions)` of the parent over the child's
//! √-rollout count. With a single legal move the spread is zero, which is
//! harmless: there is nothing to discriminate.

use crate::config::MctsParams;
use crate::game::{Player, Value};

/// Uncertainty spread for a child holding `subsims` √-rollouts of a parent
/// with `log_actions = ln(num_actions)`.
pub fn exploration_term(params: &MctsParams, log_actions: f64, subsims: f64) -> f64 {
    params.exploration * (log_actions / subsims).sqrt()
}

/// Descent priority of a child, signed for the player choosing at the
/// parent: the mover always prefers the largest priority.
pub fn priority(
    params: &MctsParams,
    player: Player,
    mean: Value,
    subsims: f64,
    log_actions: f64,
) -> Value {
    player.sign(params.exploitation * mean + exploration_term(params, log_actions, subsims))
}

/// Priority with the mean ignored, used for uniform root exploration.
pub fn exploration_priority(
    params: &MctsParams,
    player: Player,
    log_actions: f64,
    subsims: f64,
) -> Value {
    player.sign(exploration_term(params, log_actions, subsims))
}

/// Lower confidence bound of a move for the player choosing it; the spread
/// is subtracted where [`priority`] adds it.
pub fn lower_bound(
    params: &MctsParams,
    player: Player,
    mean: Value,
    subsims: f64,
    log_actions: f64,
) -> Value {
    player.sign(params.exploitation * mean - exploration_term(params, log_actions, subsims))
}
