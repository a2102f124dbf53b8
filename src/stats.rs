//! Statistics reported by a finished search.

use std::time::Duration;

/// Counters describing what a search worker did before it stopped.
#[derive(Debug, Clone)]
pub struct SearchStats {
    /// Number of root descents performed.
    pub descents: u64,

    /// Wall-clock time the worker ran for.
    pub total_time: Duration,

    /// Number of nodes in the table when the worker stopped.
    pub tree_size: usize,

    /// √-rollout count accumulated at the root.
    pub root_samples: f64,

    /// Whether the worker stopped because the stop flag was raised rather
    /// than by its own stop predicate.
    pub stopped_early: bool,

    /// Whether the root's value was proven terminal.
    pub proved: bool,
}

impl SearchStats {
    /// A zeroed statistics record.
    pub fn new() -> SearchStats {
        SearchStats {
            descents: 0,
            total_time: Duration::from_secs(0),
            tree_size: 0,
            root_samples: 0.0,
            stopped_early: false,
            proved: false,
        }
    }

    /// Descents per second over the whole run.
    pub fn descents_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.descents as f64 / self.total_time.as_secs_f64()
    }

    /// A human-readable multi-line summary.
    pub fn summary(&self) -> String {
        format!(
            "search statistics:\n\
             - descents: {}\n\
             - total time: {:.3} seconds\n\
             - tree size: {} nodes\n\
             - root samples: {:.1}\n\
             - descents per second: {:.1}\n\
             - stopped early: {}\n\
             - root proven: {}",
            self.descents,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.root_samples,
            self.descents_per_second(),
            self.stopped_early,
            self.proved
        )
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
