//! Hash-keyed node table and the carry-over cache.
//!
//! All tree structure lives here: a node is found by hashing its position,
//! never by chasing pointers. During a search the worker thread is the
//! table's only writer, so no locking is involved; the table is moved into
//! the worker and handed back at join.

use rustc_hash::FxHashMap;

use crate::game::GamePosition;
use crate::node::Node;

/// Snapshot of a node table, handed from one move's search to the next.
///
/// After a move is chosen the table is filtered down to the positions still
/// reachable through the played action and kept as the seed of the next
/// search.
pub type CarryCache<G> = Vec<(G, Node<G>)>;

/// Mapping from positions to their search nodes.
pub struct NodeTable<G: GamePosition> {
    map: FxHashMap<G, Node<G>>,
}

impl<G: GamePosition> NodeTable<G> {
    /// An empty table with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeTable<G> {
        NodeTable {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// A table seeded with a carry-over cache, sized for `extra` more nodes.
    pub fn seeded(cache: CarryCache<G>, extra: usize) -> NodeTable<G> {
        let mut table = NodeTable::with_capacity(cache.len() + extra);
        for (gs, node) in cache {
            table.map.insert(gs, node);
        }
        table
    }

    /// Number of nodes in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no position has a node yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// True if `gs` already has a node.
    pub fn contains(&self, gs: &G) -> bool {
        self.map.contains_key(gs)
    }

    /// The node for `gs`, if one exists.
    pub fn peek(&self, gs: &G) -> Option<&Node<G>> {
        self.map.get(gs)
    }

    /// The node for `gs`, lazily created as a fresh bud.
    pub fn get_or_bud(&mut self, gs: &G) -> &Node<G> {
        self.map
            .entry(gs.clone())
            .or_insert_with(|| Node::bud(gs))
    }

    /// Removes and returns the node for `gs`, creating a fresh bud if the
    /// position was never visited. The caller puts the updated node back.
    pub(crate) fn take_or_bud(&mut self, gs: &G) -> Node<G> {
        self.map.remove(gs).unwrap_or_else(|| Node::bud(gs))
    }

    /// Stores `node` under `gs`, replacing any previous node.
    pub fn put(&mut self, gs: G, node: Node<G>) {
        self.map.insert(gs, node);
    }

    /// Dissolves the table into a carry-over cache keeping every node.
    pub fn into_cache(self) -> CarryCache<G> {
        self.map.into_iter().collect()
    }

    /// Dissolves the table into a carry-over cache keeping only positions
    /// accepted by `keep`.
    pub fn into_cache_filtered<F>(self, keep: F) -> CarryCache<G>
    where
        F: Fn(&G) -> bool,
    {
        self.map.into_iter().filter(|(gs, _)| keep(gs)).collect()
    }
}
