//! The engine facade: pick a move, ponder in the background, and carry the
//! tree over from one move to the next.

use std::mem;

use log::debug;

use crate::config::MctsParams;
use crate::game::{ActionFilter, GamePosition};
use crate::root;
use crate::search::{self, SearchHandle, SearchOutcome};
use crate::table::{CarryCache, NodeTable};
use crate::Result;

/// Replacement for the default root move selector.
pub type BestActionsFn<G> = Box<
    dyn Fn(&G, &NodeTable<G>, &MctsParams) -> Vec<(<G as GamePosition>::Label, G)> + Send + Sync,
>;

/// Replacement for the default least-evil tie-breaker.
pub type LessEvilFn<G> = Box<
    dyn Fn(&G, &[(<G as GamePosition>::Label, G)], &MctsParams) -> Result<(<G as GamePosition>::Label, G)>
        + Send
        + Sync,
>;

/// A configured engine for one game type.
///
/// The engine owns the carry-over cache: each call to [`act`](Engine::act)
/// seeds its search with the previous move's surviving nodes and keeps the
/// nodes still reachable through the move it plays.
pub struct Engine<G: GamePosition> {
    params: MctsParams,
    cache: CarryCache<G>,
    bestactions: Option<BestActionsFn<G>>,
    lessevil: Option<LessEvilFn<G>>,
}

impl<G: GamePosition> Engine<G> {
    /// An engine with an empty carry-over cache.
    pub fn new(params: MctsParams) -> Engine<G> {
        Engine {
            params,
            cache: Vec::new(),
            bestactions: None,
            lessevil: None,
        }
    }

    /// Replaces the root move selector.
    pub fn with_bestactions<F>(mut self, selector: F) -> Self
    where
        F: Fn(&G, &NodeTable<G>, &MctsParams) -> Vec<(G::Label, G)> + Send + Sync + 'static,
    {
        self.bestactions = Some(Box::new(selector));
        self
    }

    /// Replaces the least-evil tie-breaker.
    pub fn with_lessevil<F>(mut self, policy: F) -> Self
    where
        F: Fn(&G, &[(G::Label, G)], &MctsParams) -> Result<(G::Label, G)> + Send + Sync + 'static,
    {
        self.lessevil = Some(Box::new(policy));
        self
    }

    /// The engine's parameters.
    pub fn params(&self) -> &MctsParams {
        &self.params
    }

    /// Number of nodes currently carried over.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Searches `gs` for the configured duration and returns the label of
    /// the move to play, or `None` when the position is terminal or has no
    /// moves.
    ///
    /// A position with a single legal move is answered immediately without
    /// searching.
    pub fn act(&mut self, gs: &G) -> Result<Option<G::Label>> {
        if gs.terminal().is_some() {
            self.cache.clear();
            return Ok(None);
        }
        let mut actions = gs.actions();
        if actions.is_empty() {
            return Ok(None);
        }
        if actions.len() == 1 {
            let (label, _) = actions.swap_remove(0);
            self.retain_cache(gs, &label);
            return Ok(Some(label));
        }

        let table = NodeTable::seeded(mem::take(&mut self.cache), self.params.extracache);
        let handle = search::spawn(gs.clone(), table, self.params.clone());
        handle.run_for(self.params.duration);
        let SearchOutcome { table, stats } = handle.finish()?;
        debug!(
            "search done: {} descents, {} nodes, root samples {:.1}",
            stats.descents, stats.tree_size, stats.root_samples
        );

        let mut candidates = match &self.bestactions {
            Some(custom) => custom(gs, &table, &self.params),
            None => root::default_bestactions(gs, &table, &self.params),
        };
        let (label, _) = match candidates.len() {
            0 => {
                self.cache = table.into_cache();
                return Ok(None);
            }
            1 => candidates.swap_remove(0),
            _ => match &self.lessevil {
                Some(custom) => custom(gs, &candidates, &self.params)?,
                None => root::least_evil(gs, &candidates, &self.params)?,
            },
        };
        debug!("playing {:?}", label);

        self.cache = match find_filter(gs, &label) {
            Some(keep) => table.into_cache_filtered(|p| keep(p)),
            None => table.into_cache(),
        };
        Ok(Some(label))
    }

    /// Starts pondering `gs` in the background, consuming the carry-over
    /// cache as the seed.
    ///
    /// Pondering searches with uniform root exploration, so the tree grows
    /// evenly across all replies rather than betting on one. Call
    /// [`finish_thinking`](Engine::finish_thinking) to stop the worker and
    /// reclaim its tree as the next carry-over.
    pub fn think(&mut self, gs: &G) -> Thinking<G> {
        let mut params = self.params.clone();
        params.uniform = true;
        let table = NodeTable::seeded(mem::take(&mut self.cache), params.extracache);
        Thinking {
            handle: search::spawn(gs.clone(), table, params),
        }
    }

    /// Stops a ponder started with [`think`](Engine::think) and absorbs its
    /// tree into the carry-over cache.
    pub fn finish_thinking(&mut self, thinking: Thinking<G>) -> Result<()> {
        let outcome = thinking.handle.finish()?;
        self.cache = outcome.table.into_cache();
        Ok(())
    }

    fn retain_cache(&mut self, gs: &G, label: &G::Label) {
        if let Some(keep) = find_filter(gs, label) {
            self.cache.retain(|(p, _)| keep(p));
        }
    }
}

/// A background ponder in flight.
pub struct Thinking<G: GamePosition> {
    handle: SearchHandle<G>,
}

impl<G: GamePosition> Thinking<G> {
    /// True once the worker stopped on its own (for instance by proving the
    /// position).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

fn find_filter<G: GamePosition>(gs: &G, label: &G::Label) -> Option<ActionFilter<G>> {
    gs.action_filters()
        .into_iter()
        .find(|(l, _)| l == label)
        .map(|(_, f)| f)
}
