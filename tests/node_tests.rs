use std::collections::BinaryHeap;

use sapling_mcts::{GamePosition, MctsParams, Node, Player, PrioMove, SampleStat, Trunk, Value};

// Three moves per position, three plies deep, drawn at the bottom.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Tiny(u32);

impl GamePosition for Tiny {
    type Label = u32;

    fn player(&self) -> Player {
        if self.0.to_string().len() % 2 == 1 {
            Player::Maximizer
        } else {
            Player::Minimizer
        }
    }

    fn actions(&self) -> Vec<(u32, Tiny)> {
        if self.terminal().is_some() {
            return Vec::new();
        }
        (1..=3).map(|i| (i, Tiny(self.0 * 10 + i))).collect()
    }

    fn terminal(&self) -> Option<Value> {
        if self.0 >= 100 {
            Some(0.0)
        } else {
            None
        }
    }
}

fn stat(wins: f64, sqrt_rolls: f64) -> SampleStat {
    SampleStat { wins, sqrt_rolls }
}

#[test]
fn test_priomove_heap_is_a_max_queue() {
    let mut heap = BinaryHeap::new();
    for (priority, id) in [(0.1, 1u32), (0.9, 2), (-0.5, 3), (0.4, 4)] {
        heap.push(PrioMove {
            priority,
            subsims: 1.0,
            pmove: Tiny(id),
        });
    }

    let order: Vec<u32> = std::iter::from_fn(|| heap.pop()).map(|pm| pm.pmove.0).collect();
    assert_eq!(order, vec![2, 4, 1, 3]);
}

#[test]
fn test_priomove_equality_is_by_move() {
    let a = PrioMove {
        priority: 0.9,
        subsims: 1.0,
        pmove: Tiny(7),
    };
    let b = PrioMove {
        priority: -0.3,
        subsims: 5.0,
        pmove: Tiny(7),
    };
    let c = PrioMove {
        priority: 0.9,
        subsims: 1.0,
        pmove: Tiny(8),
    };

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_fresh_bud_pends_children_in_action_order() {
    let node: Node<Tiny> = Node::bud(&Tiny(1));
    let Node::Bud { done, pending } = node else {
        panic!("fresh node should be a bud");
    };

    assert!(done.is_empty());
    let pending: Vec<u32> = pending.iter().map(|g| g.0).collect();
    assert_eq!(pending, vec![11, 12, 13]);
}

#[test]
fn test_trunk_build_totals_and_partition() {
    let params = MctsParams::default();
    let gs = Tiny(1); // Maximizer to move
    let done = vec![
        (Tiny(11), stat(0.5, 1.0)),
        (Tiny(12), stat(-0.3, 1.0)),
        (Tiny(13), stat(0.1, 2.0)),
    ];

    let trunk = Trunk::build(&gs, done, &params);

    assert!((trunk.sims - 4.0).abs() < 1e-12);
    assert!((trunk.wins - 0.3).abs() < 1e-12);
    assert!(trunk.terminals.is_empty());
    assert_eq!(trunk.worstcase, params.alpha);

    // Every sampled child is queued exactly once.
    let mut queued: Vec<u32> = trunk.moveq.iter().map(|pm| pm.pmove.0).collect();
    queued.sort_unstable();
    assert_eq!(queued, vec![11, 12, 13]);

    // The queue totals match the trunk totals.
    let queued_sims: f64 = trunk.moveq.iter().map(|pm| pm.subsims).sum();
    assert!((queued_sims - trunk.sims).abs() < 1e-12);
}

#[test]
fn test_trunk_build_prefers_best_mean_for_maximizer() {
    let params = MctsParams::default();
    let done = vec![
        (Tiny(11), stat(0.5, 1.0)),
        (Tiny(12), stat(-0.3, 1.0)),
        (Tiny(13), stat(0.1, 2.0)),
    ];
    let mut trunk = Trunk::build(&Tiny(1), done, &params);

    // Equal sample counts for 11 and 12, so the better mean wins; the more
    // heavily sampled 13 has a thinner spread on top of a middling mean.
    let top = trunk.moveq.pop().expect("queue cannot be empty");
    assert_eq!(top.pmove.0, 11);
}

#[test]
fn test_trunk_worstcase_is_opponents_bound() {
    let params = MctsParams::default();
    let maximizer_trunk = Trunk::build(&Tiny(1), vec![(Tiny(11), stat(0.0, 1.0))], &params);
    assert_eq!(maximizer_trunk.worstcase, -1.0);

    let minimizer_trunk = Trunk::build(&Tiny(11), vec![(Tiny(111), stat(0.0, 1.0))], &params);
    assert_eq!(minimizer_trunk.worstcase, 1.0);
}

#[test]
fn test_node_means() {
    assert_eq!(Node::<Tiny>::Terminal(0.75, Vec::new()).mean(), 0.75);
    assert_eq!(Node::<Tiny>::InertTerminal(-0.25).mean(), -0.25);

    let bud: Node<Tiny> = Node::Bud {
        done: vec![(Tiny(11), stat(1.0, 1.0)), (Tiny(12), stat(0.0, 1.0))],
        pending: [Tiny(13)].into_iter().collect(),
    };
    assert!((bud.mean() - 0.5).abs() < 1e-12);
    assert!((bud.sqrt_samples() - 2.0).abs() < 1e-12);

    let unsampled: Node<Tiny> = Node::bud(&Tiny(1));
    assert_eq!(unsampled.mean(), 0.0);
    assert_eq!(unsampled.sqrt_samples(), 0.0);
}

#[test]
fn test_proofs_only_from_plain_terminals() {
    assert_eq!(Node::<Tiny>::Terminal(1.0, Vec::new()).proven(), Some(1.0));
    assert_eq!(Node::<Tiny>::InertTerminal(1.0).proven(), None);
    assert_eq!(Node::<Tiny>::bud(&Tiny(1)).proven(), None);

    assert!(Node::<Tiny>::Terminal(1.0, Vec::new()).is_terminal());
    assert!(Node::<Tiny>::InertTerminal(1.0).is_terminal());
    assert!(!Node::<Tiny>::bud(&Tiny(1)).is_terminal());
}
