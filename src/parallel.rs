//! Multi-root parallelism: several independent searches of the same
//! position, combined after the fact.
//!
//! Each worker gets its own node table and its own random stream, so the
//! searches never contend; the price is that no statistics are shared while
//! they run. After joining, the per-move totals are summed across tables and
//! the usual lower-confidence-bound selector runs on the aggregate. A move
//! proven terminal in any one table is proven, full stop.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::MctsParams;
use crate::game::{GamePosition, Value};
use crate::node::Node;
use crate::search;
use crate::select;
use crate::table::NodeTable;
use crate::Result;

/// Searches `root` with `workers` independent workers and returns the move
/// with the best aggregated lower confidence bound.
///
/// Returns `None` when the position is terminal or has no moves. A single
/// legal move is returned without searching.
pub fn parallel_bestaction<G: GamePosition>(
    root: &G,
    params: &MctsParams,
    workers: usize,
) -> Result<Option<(G::Label, G)>> {
    if root.terminal().is_some() {
        return Ok(None);
    }
    let mut actions = root.actions();
    match actions.len() {
        0 => return Ok(None),
        1 => return Ok(Some(actions.swap_remove(0))),
        _ => {}
    }
    let tables = search_roots(root, &actions, params, workers, false)?;
    Ok(aggregate_choice(root, &actions, &tables, params))
}

/// Least-evil over `candidates` with `workers` independent inert searches,
/// aggregated the same way as [`parallel_bestaction`].
pub fn parallel_least_evil<G: GamePosition>(
    root: &G,
    candidates: &[(G::Label, G)],
    params: &MctsParams,
    workers: usize,
) -> Result<Option<(G::Label, G)>> {
    if candidates.is_empty() {
        return Ok(None);
    }
    if candidates.len() == 1 {
        return Ok(Some(candidates[0].clone()));
    }
    let mut params = params.clone();
    params.inert = true;
    params.uniform = false;
    let tables = search_roots(root, candidates, &params, workers, true)?;
    Ok(aggregate_choice(root, candidates, &tables, &params))
}

/// Runs one worker per table until the shared deadline, then joins them all.
///
/// With `restrict` set, each root bud is limited to the candidate children
/// instead of the position's full action list.
fn search_roots<G: GamePosition>(
    root: &G,
    candidates: &[(G::Label, G)],
    params: &MctsParams,
    workers: usize,
    restrict: bool,
) -> Result<Vec<NodeTable<G>>> {
    let workers = workers.max(1);
    debug!("parallel search with {} workers", workers);

    let mut handles = Vec::with_capacity(workers);
    for i in 0..workers {
        let mut worker_params = params.clone();
        worker_params.seed = params.seed.map(|s| s.wrapping_add(i as u64));
        let mut table = NodeTable::with_capacity(worker_params.extracache);
        if restrict {
            table.put(
                root.clone(),
                Node::Bud {
                    done: Vec::new(),
                    pending: candidates.iter().map(|(_, g)| g.clone()).collect(),
                },
            );
        }
        handles.push(search::spawn(root.clone(), table, worker_params));
    }

    let start = Instant::now();
    while handles.iter().any(|h| !h.is_finished()) {
        let remaining = params.duration.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(remaining.min(Duration::from_millis(5)));
    }

    let mut tables = Vec::with_capacity(handles.len());
    for handle in handles {
        tables.push(handle.finish()?.table);
    }
    Ok(tables)
}

/// Sums per-move wins and √-rollout counts across tables and applies the
/// lower-confidence-bound selector to the sums.
fn aggregate_choice<G: GamePosition>(
    root: &G,
    candidates: &[(G::Label, G)],
    tables: &[NodeTable<G>],
    params: &MctsParams,
) -> Option<(G::Label, G)> {
    let player = root.player();
    let log_actions = (root.num_actions() as f64).ln();
    let mut best: Option<(usize, Value)> = None;

    for (i, (_, child)) in candidates.iter().enumerate() {
        let mut wins = 0.0;
        let mut sims = 0.0;
        let mut proven: Option<Value> = None;

        for table in tables {
            match table.peek(root) {
                Some(Node::Trunk(t)) => {
                    if let Some(pm) = t.moveq.iter().find(|pm| &pm.pmove == child) {
                        let mean = table.peek(child).map(|n| n.mean()).unwrap_or(0.0);
                        wins += mean * pm.subsims;
                        sims += pm.subsims;
                    }
                }
                Some(Node::Bud { done, .. }) => {
                    if let Some((_, stat)) = done.iter().find(|(g, _)| g == child) {
                        wins += stat.wins;
                        sims += stat.sqrt_rolls;
                    }
                }
                _ => {}
            }
            if proven.is_none() {
                if let Some(Node::Terminal(v, _)) = table.peek(child) {
                    proven = Some(*v);
                }
            }
        }

        // A proven win for the mover beats any statistic.
        if proven == Some(player.bound(params.alpha, params.beta)) {
            return Some(candidates[i].clone());
        }

        let lcb = if sims > 0.0 {
            select::lower_bound(params, player, wins / sims, sims, log_actions)
        } else if let Some(v) = proven {
            player.sign(params.exploitation * v)
        } else {
            continue;
        };
        if best.map_or(true, |(_, b)| lcb > b) {
            best = Some((i, lcb));
        }
    }

    let idx = best.map(|(i, _)| i).unwrap_or(0);
    candidates.get(idx).cloned()
}
