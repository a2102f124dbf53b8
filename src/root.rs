//! Move choice at the root after a search has finished.
//!
//! During descent the engine is optimistic (upper confidence bounds); when
//! the time comes to actually play, it turns pessimistic and ranks moves by
//! their *lower* confidence bound. A proven-terminal root instead replays
//! the proof, and when several moves tie — typically because they are all
//! proven losses — the least-evil search re-examines just those moves with
//! proof propagation disabled, to find the one that loses slowest.

use log::debug;

use crate::config::MctsParams;
use crate::game::{GamePosition, Value};
use crate::node::Node;
use crate::search;
use crate::select;
use crate::table::NodeTable;
use crate::{Result, SearchError};

/// The default root move selector.
///
/// Returns the moves worth playing, in action order:
///
/// * proven root: every child sharing the root's proven value (several on a
///   tie, which the least-evil policy then separates),
/// * expanded root: the single move with the best lower confidence bound,
///   unless the proven-terminal children already guarantee more than that
///   bound, in which case the proven children are returned,
/// * partially expanded root: the most-sampled child so far, or every move
///   when nothing has been sampled.
pub fn default_bestactions<G: GamePosition>(
    root: &G,
    table: &NodeTable<G>,
    params: &MctsParams,
) -> Vec<(G::Label, G)> {
    let mut actions = root.actions();
    if actions.is_empty() {
        return Vec::new();
    }
    let Some(node) = table.peek(root) else {
        return actions;
    };

    let terminal_value = |g: &G| match table.peek(g) {
        Some(Node::Terminal(v, _)) | Some(Node::InertTerminal(v)) => Some(*v),
        _ => None,
    };

    match node {
        Node::Terminal(v, _) | Node::InertTerminal(v) => actions
            .into_iter()
            .filter(|(_, child)| terminal_value(child) == Some(*v))
            .collect(),

        Node::Bud { done, .. } => {
            if done.is_empty() {
                return actions;
            }
            let mut best: Option<(&G, f64)> = None;
            for (child, stat) in done {
                if best.map_or(true, |(_, s)| stat.sqrt_rolls > s) {
                    best = Some((child, stat.sqrt_rolls));
                }
            }
            match best {
                Some((child, _)) => {
                    let chosen = child.clone();
                    actions.into_iter().filter(|(_, c)| *c == chosen).take(1).collect()
                }
                None => actions,
            }
        }

        Node::Trunk(t) => {
            let player = root.player();
            let log_actions = (root.num_actions() as f64).ln();
            let mut best: Option<(usize, Value)> = None;
            for (i, (_, child)) in actions.iter().enumerate() {
                let Some(pm) = t.moveq.iter().find(|pm| &pm.pmove == child) else {
                    continue;
                };
                let mean = table.peek(child).map(|n| n.mean()).unwrap_or(0.0);
                let lcb = select::lower_bound(params, player, mean, pm.subsims, log_actions);
                if best.map_or(true, |(_, b)| lcb > b) {
                    best = Some((i, lcb));
                }
            }
            match best {
                Some((i, bestval)) if bestval > player.sign(t.worstcase) => {
                    vec![actions.swap_remove(i)]
                }
                // The proven-terminal children guarantee at least as much as
                // the best unproven bound; hand them all to least-evil.
                _ => actions
                    .into_iter()
                    .filter(|(_, c)| t.terminals.contains(c))
                    .collect(),
            }
        }
    }
}

/// The default least-evil policy: a fresh search over just the candidate
/// moves with proof propagation disabled, decided by lower confidence bound.
///
/// Proven losses all look identical to the main search; disabling proofs
/// keeps their subtrees alive, so the uniform-rollout statistics can tell a
/// quick loss from one the opponent still has to work for. Ties fall back to
/// the earliest candidate in action order.
pub fn least_evil<G: GamePosition>(
    root: &G,
    candidates: &[(G::Label, G)],
    params: &MctsParams,
) -> Result<(G::Label, G)> {
    if candidates.is_empty() {
        return Err(SearchError::NoLegalActions);
    }
    if candidates.len() == 1 {
        return Ok(candidates[0].clone());
    }
    debug!("least-evil search over {} candidate moves", candidates.len());

    let mut params = params.clone();
    params.inert = true;
    params.uniform = false;

    let mut table = NodeTable::with_capacity(params.extracache);
    table.put(
        root.clone(),
        Node::Bud {
            done: Vec::new(),
            pending: candidates.iter().map(|(_, g)| g.clone()).collect(),
        },
    );
    let handle = search::spawn(root.clone(), table, params.clone());
    handle.run_for(params.duration);
    let outcome = handle.finish()?;
    Ok(pick_least_evil(root, candidates, &outcome.table, &params))
}

fn pick_least_evil<G: GamePosition>(
    root: &G,
    candidates: &[(G::Label, G)],
    table: &NodeTable<G>,
    params: &MctsParams,
) -> (G::Label, G) {
    let player = root.player();
    let log_actions = (root.num_actions() as f64).ln();
    let mut best: Option<(usize, Value)> = None;

    match table.peek(root) {
        Some(Node::Trunk(t)) => {
            for (i, (_, child)) in candidates.iter().enumerate() {
                let Some(pm) = t.moveq.iter().find(|pm| &pm.pmove == child) else {
                    continue;
                };
                let mean = table.peek(child).map(|n| n.mean()).unwrap_or(0.0);
                let lcb = select::lower_bound(params, player, mean, pm.subsims, log_actions);
                if best.map_or(true, |(_, b)| lcb > b) {
                    best = Some((i, lcb));
                }
            }
        }
        Some(Node::Bud { done, .. }) => {
            for (i, (_, child)) in candidates.iter().enumerate() {
                let Some((_, stat)) = done.iter().find(|(g, _)| g == child) else {
                    continue;
                };
                let lcb =
                    select::lower_bound(params, player, stat.mean(), stat.sqrt_rolls, log_actions);
                if best.map_or(true, |(_, b)| lcb > b) {
                    best = Some((i, lcb));
                }
            }
        }
        _ => {}
    }

    let idx = best.map(|(i, _)| i).unwrap_or(0);
    candidates[idx].clone()
}

/// Follows the table's preferred move from `root` for up to `max_len` plies
/// and returns the labels along the way.
///
/// The walk stops as soon as the choice is not unique (an unexpanded node, a
/// tie between proven moves) so the returned line is exactly the part of the
/// tree the search is confident about.
pub fn principal_variation<G: GamePosition>(
    root: &G,
    table: &NodeTable<G>,
    params: &MctsParams,
    max_len: usize,
) -> Vec<G::Label> {
    let mut pv = Vec::new();
    let mut current = root.clone();
    while pv.len() < max_len {
        let mut candidates = default_bestactions(&current, table, params);
        if candidates.len() != 1 {
            break;
        }
        let (label, next) = candidates.swap_remove(0);
        pv.push(label);
        current = next;
    }
    pv
}
