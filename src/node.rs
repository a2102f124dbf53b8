//! The search tree's node model.
//!
//! Nodes are not linked by pointers; the tree structure lives in the
//! [`NodeTable`](crate::NodeTable), which maps positions to nodes. A node
//! moves through a one-way lifecycle:
//!
//! * it is born a [`Node::Bud`] with every child still pending,
//! * becomes a [`Node::Trunk`] once each child has been sampled at least
//!   once,
//! * and may collapse to [`Node::Terminal`] when the game value of the
//!   position is proven.
//!
//! Sample counts are kept as √-rollout weights: a visit that performed `n`
//! rollouts contributes `√n` to the counts and stores its score sum divided
//! by `√n`. This keeps the selection priority's `log/count` ratio on the
//! same scale no matter how many rollouts a single visit performs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::MctsParams;
use crate::game::{GamePosition, Value};
use crate::select;

/// Accumulated result of sampling one child from a bud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStat {
    /// Score sum, pre-normalised by the √-rollout count: `Σ score / √n`.
    pub wins: f64,
    /// √-rollout count of the sampling visit.
    pub sqrt_rolls: f64,
}

impl SampleStat {
    /// Mean Maximizer score of the sampled child.
    pub fn mean(&self) -> Value {
        self.wins / self.sqrt_rolls
    }
}

/// Queue entry pairing a child position with its selection priority.
///
/// Ordered by priority alone, so a [`BinaryHeap`] of these is a max-priority
/// queue; equality is identity of the move, not of the statistics.
#[derive(Debug, Clone)]
pub struct PrioMove<G: GamePosition> {
    /// Signed selection priority; larger is more urgent for the player to
    /// move at the owning trunk.
    pub priority: Value,
    /// Accumulated √-rollout count spent on this move.
    pub subsims: f64,
    /// The child position the entry stands for.
    pub pmove: G,
}

impl<G: GamePosition> PartialEq for PrioMove<G> {
    fn eq(&self, other: &Self) -> bool {
        self.pmove == other.pmove
    }
}

impl<G: GamePosition> Eq for PrioMove<G> {}

impl<G: GamePosition> PartialOrd for PrioMove<G> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<G: GamePosition> Ord for PrioMove<G> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority)
    }
}

/// A fully expanded interior node.
#[derive(Debug, Clone)]
pub struct Trunk<G: GamePosition> {
    /// Total √-rollout count accumulated below this node.
    pub sims: f64,
    /// Accumulated Maximizer score, on the same √-rollout scale as `sims`.
    pub wins: f64,
    /// Max-priority queue over the children not yet proven terminal.
    pub moveq: BinaryHeap<PrioMove<G>>,
    /// Children already proven terminal, in the order they were absorbed.
    pub terminals: Vec<G>,
    /// Best value the proven-terminal children guarantee the player to move;
    /// starts at the opponent's bound (the worst case for the mover).
    pub worstcase: Value,
}

impl<G: GamePosition> Trunk<G> {
    /// Builds a trunk from a bud's completed samples.
    ///
    /// Every child gets a queue entry priced by the selection priority; the
    /// accumulated totals are the sums over the samples.
    pub fn build(gs: &G, done: Vec<(G, SampleStat)>, params: &MctsParams) -> Trunk<G> {
        let player = gs.player();
        let log_actions = (gs.num_actions() as f64).ln();
        let mut sims = 0.0;
        let mut wins = 0.0;
        let mut moveq = BinaryHeap::with_capacity(done.len());
        for (pmove, stat) in done {
            let priority =
                select::priority(params, player, stat.mean(), stat.sqrt_rolls, log_actions);
            sims += stat.sqrt_rolls;
            wins += stat.wins;
            moveq.push(PrioMove {
                priority,
                subsims: stat.sqrt_rolls,
                pmove,
            });
        }
        Trunk {
            sims,
            wins,
            moveq,
            terminals: Vec::new(),
            worstcase: player.opponent().bound(params.alpha, params.beta),
        }
    }

    /// Mean Maximizer score of the subtree below this trunk.
    pub fn mean(&self) -> Value {
        self.wins / self.sims
    }
}

/// A node of the search tree, keyed by its position in the node table.
#[derive(Debug, Clone)]
pub enum Node<G: GamePosition> {
    /// Terminal whose value must not be used to prove anything about its
    /// parents. The least-evil search records every terminal this way, so
    /// that hopeless subtrees keep being compared instead of collapsing.
    InertTerminal(Value),

    /// Terminal with a proven game value. Carries the child positions known
    /// at collapse time (the proving child first) so the winning line can be
    /// replayed; leaf terminals carry none.
    Terminal(Value, Vec<G>),

    /// Partially expanded node: `done` holds the children sampled exactly
    /// once, `pending` the children not yet sampled, in action order.
    Bud {
        done: Vec<(G, SampleStat)>,
        pending: VecDeque<G>,
    },

    /// Fully expanded node.
    Trunk(Trunk<G>),
}

impl<G: GamePosition> Node<G> {
    /// A fresh bud with all of `gs`'s children pending.
    pub fn bud(gs: &G) -> Node<G> {
        Node::Bud {
            done: Vec::new(),
            pending: gs.actions().into_iter().map(|(_, next)| next).collect(),
        }
    }

    /// True for both kinds of terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(..) | Node::InertTerminal(..))
    }

    /// The proven value, for terminals whose proof may propagate.
    ///
    /// Inert terminals return `None` here; their value is visible through
    /// [`mean`](Node::mean) but never collapses a parent.
    pub fn proven(&self) -> Option<Value> {
        match self {
            Node::Terminal(v, _) => Some(*v),
            _ => None,
        }
    }

    /// Mean Maximizer score of the node's samples (the exact value for
    /// terminals, zero for an unsampled bud).
    pub fn mean(&self) -> Value {
        match self {
            Node::Terminal(v, _) | Node::InertTerminal(v) => *v,
            Node::Bud { done, .. } => {
                let sims: f64 = done.iter().map(|(_, s)| s.sqrt_rolls).sum();
                if sims == 0.0 {
                    0.0
                } else {
                    done.iter().map(|(_, s)| s.wins).sum::<f64>() / sims
                }
            }
            Node::Trunk(t) => t.mean(),
        }
    }

    /// Total √-rollout count accumulated at this node.
    pub fn sqrt_samples(&self) -> f64 {
        match self {
            Node::Terminal(..) | Node::InertTerminal(..) => 0.0,
            Node::Bud { done, .. } => done.iter().map(|(_, s)| s.sqrt_rolls).sum(),
            Node::Trunk(t) => t.sims,
        }
    }
}
