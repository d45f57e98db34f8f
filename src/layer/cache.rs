//! Visited-module cache
//!
//! Shared submodules show up more than once when a model is walked. The
//! cache remembers which instances were already counted so that later
//! occurrences are flagged as recursive. It is owned by the caller and
//! passed into the traversal; nothing here is process-wide.

use std::collections::HashSet;

/// Set of module instance ids already seen in the current run
#[derive(Debug, Clone, Default)]
pub struct VisitedModules {
    seen: HashSet<String>,
}

impl VisitedModules {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an instance id. Returns `true` the first time it is seen.
    pub fn mark(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string())
    }

    /// Check if an instance id has been seen
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Forget everything, ready for an independent run
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
