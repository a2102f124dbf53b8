//! The search proper: single descents through the tree and the background
//! worker that performs them until told to stop.
//!
//! A descent follows the highest-priority child from the root down to a bud,
//! samples one pending child there with a batch of rollouts, and folds the
//! result back into every node along the path on the way out of the
//! recursion. Proven terminal values propagate during the same unwinding: a
//! child proven to be a win for the player to move collapses its parent
//! immediately, and a parent whose children are all proven collapses to the
//! best of their values.
//!
//! The worker owns the node table for the whole search. Cancellation is
//! cooperative: the stop flag is examined only between chunks of
//! `advancechunks` descents, so a raised flag takes effect within at most
//! one chunk.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MctsParams;
use crate::game::{GamePosition, Player, Value};
use crate::node::{Node, PrioMove, SampleStat, Trunk};
use crate::rollout::rollouts;
use crate::select;
use crate::stats::SearchStats;
use crate::table::NodeTable;
use crate::{Result, SearchError};

/// Everything a finished search hands back: the table it grew and counters
/// describing the run.
pub struct SearchOutcome<G: GamePosition> {
    /// The node table, to be mined for the move choice and carried over.
    pub table: NodeTable<G>,
    /// Counters describing the worker's run.
    pub stats: SearchStats,
}

/// One descent-at-a-time view over a node table.
///
/// The rollout batch size is fixed for the searcher's lifetime; the worker
/// re-creates the searcher at every chunk boundary with a batch size derived
/// from the root's accumulated samples.
pub(crate) struct Searcher<'a, G: GamePosition, R: Rng> {
    table: &'a mut NodeTable<G>,
    params: &'a MctsParams,
    rng: &'a mut R,
    numrolls: u32,
    sqrt_rolls: f64,
}

impl<'a, G: GamePosition, R: Rng> Searcher<'a, G, R> {
    pub fn new(
        table: &'a mut NodeTable<G>,
        params: &'a MctsParams,
        rng: &'a mut R,
        numrolls: u32,
    ) -> Searcher<'a, G, R> {
        Searcher {
            table,
            params,
            rng,
            numrolls,
            sqrt_rolls: f64::from(numrolls).sqrt(),
        }
    }

    /// Advances the tree below `root` by one descent and returns the
    /// Maximizer-score delta that was backpropagated into the root.
    pub fn advance_root(&mut self, root: &G) -> Result<Value> {
        self.advance(root, true)
    }

    fn advance(&mut self, gs: &G, at_root: bool) -> Result<Value> {
        let node = self.table.take_or_bud(gs);
        let (node, delta) = self.advance_node(gs, node, at_root)?;
        self.table.put(gs.clone(), node);
        Ok(delta)
    }

    fn advance_node(&mut self, gs: &G, node: Node<G>, at_root: bool) -> Result<(Node<G>, Value)> {
        match node {
            Node::InertTerminal(v) | Node::Terminal(v, _) => {
                let delta = v * self.sqrt_rolls;
                Ok((node, delta))
            }

            Node::Bud {
                mut done,
                mut pending,
            } => {
                if let Some(ngs) = pending.pop_front() {
                    let stat = self.expand_leaf(&ngs)?;
                    let delta = stat.wins;
                    done.push((ngs, stat));
                    Ok((Node::Bud { done, pending }, delta))
                } else if done.is_empty() {
                    // No children at all: the position violated the game
                    // contract (non-terminal yet without actions).
                    Err(SearchError::InvalidPosition)
                } else {
                    let trunk = Trunk::build(gs, done, self.params);
                    self.advance_node(gs, Node::Trunk(trunk), at_root)
                }
            }

            Node::Trunk(mut t) => {
                let player = gs.player();
                let log_actions = (gs.num_actions() as f64).ln();

                let pm = if at_root && self.params.uniform {
                    extract_exploratory(&mut t.moveq, player, log_actions, self.params)
                } else {
                    t.moveq.pop()
                };
                let Some(mut pm) = pm else {
                    // Every child was absorbed as terminal; the proven bound
                    // is the position's value.
                    let value = t.worstcase;
                    return Ok((Node::Terminal(value, t.terminals), value * self.sqrt_rolls));
                };

                let delta = self.advance(&pm.pmove, false)?;
                let (proof, child_mean) = match self.table.peek(&pm.pmove) {
                    Some(child) => (child.proven(), child.mean()),
                    None => return Err(SearchError::InvalidPosition),
                };

                if let Some(v) = proof {
                    if v == player.bound(self.params.alpha, self.params.beta) {
                        // The mover can force this child: the whole node is
                        // decided. Keep the proving child in front so the
                        // line can be replayed.
                        let mut line = Vec::with_capacity(1 + t.terminals.len() + t.moveq.len());
                        line.push(pm.pmove);
                        line.append(&mut t.terminals);
                        line.extend(t.moveq.into_iter().map(|m| m.pmove));
                        return Ok((Node::Terminal(v, line), delta));
                    }
                    t.terminals.push(pm.pmove);
                    t.worstcase = player.objective(t.worstcase, v);
                    if t.moveq.is_empty() {
                        return Ok((Node::Terminal(t.worstcase, t.terminals), delta));
                    }
                } else {
                    pm.subsims += self.sqrt_rolls;
                    pm.priority =
                        select::priority(self.params, player, child_mean, pm.subsims, log_actions);
                    t.moveq.push(pm);
                }

                t.sims += self.sqrt_rolls;
                t.wins += delta;
                Ok((Node::Trunk(t), delta))
            }
        }
    }

    /// Samples a pending child once: a batch of rollouts, plus the child's
    /// own table entry if it does not have one yet.
    fn expand_leaf(&mut self, ngs: &G) -> Result<SampleStat> {
        let score = rollouts(self.numrolls, ngs, self.rng);
        let stat = SampleStat {
            wins: score / self.sqrt_rolls,
            sqrt_rolls: self.sqrt_rolls,
        };
        if let Some(v) = ngs.terminal() {
            let node = if self.params.inert {
                Node::InertTerminal(v)
            } else {
                Node::Terminal(v, Vec::new())
            };
            self.table.put(ngs.clone(), node);
        } else if !self.table.contains(ngs) {
            self.table.put(ngs.clone(), Node::bud(ngs));
        }
        Ok(stat)
    }
}

/// Picks the queue entry with the greatest exploration-only priority,
/// ignoring the stored (mean-weighted) priorities.
fn extract_exploratory<G: GamePosition>(
    moveq: &mut std::collections::BinaryHeap<PrioMove<G>>,
    player: Player,
    log_actions: f64,
    params: &MctsParams,
) -> Option<PrioMove<G>> {
    if moveq.is_empty() {
        return None;
    }
    let mut entries = std::mem::take(moveq).into_vec();
    let mut best = 0;
    let mut best_prio = f64::NEG_INFINITY;
    for (i, pm) in entries.iter().enumerate() {
        let prio = select::exploration_priority(params, player, log_actions, pm.subsims);
        if prio > best_prio {
            best = i;
            best_prio = prio;
        }
    }
    let pm = entries.swap_remove(best);
    *moveq = entries.into();
    Some(pm)
}

/// Runs `descents` descents from `root` on the calling thread.
///
/// This is the synchronous core the background worker loops over; it is
/// public so embedders and benchmarks can drive a search without threads.
/// The adaptive rollout batch size is re-derived from the root's samples at
/// every `advancechunks` boundary, exactly as the worker does.
pub fn advance_for<G: GamePosition, R: Rng>(
    root: &G,
    table: &mut NodeTable<G>,
    params: &MctsParams,
    rng: &mut R,
    descents: u64,
) -> Result<()> {
    if let Some(v) = root.terminal() {
        table.put(root.clone(), Node::Terminal(v, Vec::new()));
        return Ok(());
    }
    let mut remaining = descents;
    while remaining > 0 {
        let root_node = table.get_or_bud(root);
        if root_node.is_terminal() {
            break;
        }
        let numrolls =
            ((root_node.sqrt_samples() / params.simsperroll) as u32 + params.numrolls).max(1);
        let chunk = remaining.min(u64::from(params.advancechunks).max(1));
        let mut searcher = Searcher::new(table, params, rng, numrolls);
        for _ in 0..chunk {
            searcher.advance_root(root)?;
        }
        remaining -= chunk;
    }
    Ok(())
}

enum HandleState<G: GamePosition> {
    Running(JoinHandle<Result<SearchOutcome<G>>>),
    Done(Box<SearchOutcome<G>>),
}

/// Handle to a running (or already finished) search.
///
/// Dropping the handle without calling [`finish`](SearchHandle::finish) or
/// [`wait`](SearchHandle::wait) detaches the worker; it will still stop at
/// its own stop predicate, but its table is lost.
pub struct SearchHandle<G: GamePosition> {
    stop: Arc<AtomicBool>,
    state: HandleState<G>,
}

impl<G: GamePosition> SearchHandle<G> {
    /// Raises the stop flag without waiting. The worker notices at its next
    /// chunk boundary.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// True once the worker has returned (always true for a no-op search).
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Running(handle) => handle.is_finished(),
            HandleState::Done(_) => true,
        }
    }

    /// Sleeps until `deadline` has elapsed or the worker stopped on its own,
    /// whichever comes first.
    pub fn run_for(&self, deadline: Duration) {
        let start = Instant::now();
        while !self.is_finished() {
            let elapsed = start.elapsed();
            if elapsed >= deadline {
                return;
            }
            thread::sleep((deadline - elapsed).min(Duration::from_millis(5)));
        }
    }

    /// Raises the stop flag, waits for the worker and returns its outcome.
    pub fn finish(self) -> Result<SearchOutcome<G>> {
        self.stop();
        self.join()
    }

    /// Waits for the worker to stop by its own predicate (proven root or
    /// sample cap) without raising the stop flag.
    pub fn wait(self) -> Result<SearchOutcome<G>> {
        self.join()
    }

    fn join(self) -> Result<SearchOutcome<G>> {
        match self.state {
            HandleState::Running(handle) => {
                handle.join().map_err(|_| SearchError::WorkerPanicked)?
            }
            HandleState::Done(outcome) => Ok(*outcome),
        }
    }
}

/// Starts a search from `root` over `table`.
///
/// With `background` enabled the search runs on its own worker thread and
/// the handle controls it; otherwise nothing is searched and the handle's
/// outcome returns the table unchanged.
pub fn spawn<G: GamePosition>(
    root: G,
    table: NodeTable<G>,
    params: MctsParams,
) -> SearchHandle<G> {
    let stop = Arc::new(AtomicBool::new(false));
    if !params.background {
        let mut stats = SearchStats::new();
        stats.tree_size = table.len();
        return SearchHandle {
            stop,
            state: HandleState::Done(Box::new(SearchOutcome { table, stats })),
        };
    }
    let flag = Arc::clone(&stop);
    let handle = thread::spawn(move || run_worker(root, table, params, flag));
    SearchHandle {
        stop,
        state: HandleState::Running(handle),
    }
}

fn run_worker<G: GamePosition>(
    root: G,
    mut table: NodeTable<G>,
    params: MctsParams,
    stop: Arc<AtomicBool>,
) -> Result<SearchOutcome<G>> {
    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let start = Instant::now();
    let mut stats = SearchStats::new();

    if let Some(v) = root.terminal() {
        table.put(root.clone(), Node::Terminal(v, Vec::new()));
        stats.proved = true;
    } else {
        loop {
            let root_node = table.get_or_bud(&root);
            if root_node.is_terminal() {
                stats.proved = true;
                break;
            }
            if let Node::Trunk(t) = root_node {
                if t.sims > params.maxsim {
                    break;
                }
            }
            advance_for(
                &root,
                &mut table,
                &params,
                &mut rng,
                u64::from(params.advancechunks),
            )?;
            stats.descents += u64::from(params.advancechunks);
            if stop.load(Ordering::Acquire) {
                stats.stopped_early = true;
                break;
            }
        }
    }

    stats.total_time = start.elapsed();
    stats.tree_size = table.len();
    stats.root_samples = table.peek(&root).map(|n| n.sqrt_samples()).unwrap_or(0.0);
    trace!(
        "worker stopped after {} descents over {} nodes ({:.1}/s)",
        stats.descents,
        stats.tree_size,
        stats.descents_per_second()
    );
    Ok(SearchOutcome { table, stats })
}
