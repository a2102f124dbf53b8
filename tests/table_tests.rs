use sapling_mcts::{GamePosition, Node, NodeTable, Player, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Cell(u32);

impl GamePosition for Cell {
    type Label = u32;

    fn player(&self) -> Player {
        Player::Maximizer
    }

    fn actions(&self) -> Vec<(u32, Cell)> {
        if self.0 >= 10 {
            return Vec::new();
        }
        vec![(0, Cell(self.0 * 2 + 10)), (1, Cell(self.0 * 2 + 11))]
    }

    fn terminal(&self) -> Option<Value> {
        if self.0 >= 10 {
            Some(0.0)
        } else {
            None
        }
    }
}

#[test]
fn test_first_lookup_creates_a_bud() {
    let mut table: NodeTable<Cell> = NodeTable::with_capacity(16);
    assert!(table.is_empty());
    assert!(!table.contains(&Cell(1)));

    let node = table.get_or_bud(&Cell(1));
    assert!(matches!(node, Node::Bud { .. }));
    assert_eq!(table.len(), 1);
    assert!(table.contains(&Cell(1)));

    // The second lookup returns the stored node, not a fresh one.
    table.put(Cell(1), Node::Terminal(1.0, Vec::new()));
    assert!(matches!(table.get_or_bud(&Cell(1)), Node::Terminal(..)));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_put_replaces() {
    let mut table: NodeTable<Cell> = NodeTable::with_capacity(4);
    table.put(Cell(2), Node::InertTerminal(0.5));
    table.put(Cell(2), Node::Terminal(-0.5, Vec::new()));

    assert_eq!(table.len(), 1);
    assert_eq!(table.peek(&Cell(2)).and_then(Node::proven), Some(-0.5));
}

#[test]
fn test_seeding_round_trips_through_the_cache() {
    let mut table: NodeTable<Cell> = NodeTable::with_capacity(8);
    table.put(Cell(1), Node::Terminal(1.0, Vec::new()));
    table.put(Cell(2), Node::InertTerminal(0.0));
    table.put(Cell(3), Node::bud(&Cell(3)));

    let cache = table.into_cache();
    assert_eq!(cache.len(), 3);

    let reseeded = NodeTable::seeded(cache, 100);
    assert_eq!(reseeded.len(), 3);
    assert_eq!(reseeded.peek(&Cell(1)).and_then(Node::proven), Some(1.0));
    assert!(matches!(reseeded.peek(&Cell(3)), Some(Node::Bud { .. })));
}

#[test]
fn test_filtered_cache_drops_rejected_positions() {
    let mut table: NodeTable<Cell> = NodeTable::with_capacity(8);
    for i in 0..6 {
        table.put(Cell(i), Node::InertTerminal(0.0));
    }

    let cache = table.into_cache_filtered(|cell| cell.0 % 2 == 0);
    assert_eq!(cache.len(), 3);
    assert!(cache.iter().all(|(cell, _)| cell.0 % 2 == 0));
}
