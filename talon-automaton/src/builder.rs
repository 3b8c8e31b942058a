// Link construction and fluent automaton assembly
//
// Failure and output links are wired in a single breadth-first pass over
// a fully inserted trie. BFS order matters: a state's failure link can
// only be resolved once every shallower state's link is known, and the
// output link of a state copies from its (strictly shallower) failure
// target.

use crate::matcher::Automaton;
use crate::trie::{StateId, Trie, ROOT};
use crate::{AutomatonConfig, AutomatonResult};
use std::collections::VecDeque;

/// Wire failure and output links into a fully inserted trie
///
/// Direct children of the root fall back to the root; every deeper state
/// falls back to the state for the longest proper suffix of its prefix
/// that is still a path in the trie.
pub(crate) fn wire_links(trie: &mut Trie) {
    let mut queue = VecDeque::new();
    queue.push_back(ROOT);

    while let Some(id) = queue.pop_front() {
        // Collect edges up front to avoid borrow checker issues while
        // mutating child states below
        for (byte, child) in trie.edges(id) {
            let failure = failure_target(trie, id, byte, child);

            // Nearest terminal on the failure chain; the failure target
            // is shallower, so its own output link is already final
            let output = if trie.state(failure).is_terminal() {
                Some(failure)
            } else {
                trie.state(failure).output
            };

            let state = trie.state_mut(child);
            state.failure = failure;
            state.output = output;

            queue.push_back(child);
        }
    }
}

/// Resolve the failure link for `child`, reached from `parent` on `byte`
fn failure_target(trie: &Trie, parent: StateId, byte: u8, child: StateId) -> StateId {
    let mut f = trie.state(parent).failure;
    loop {
        match trie.transition(f, byte) {
            // Root children land here: the walk starts at the root and
            // finds the child itself, whose only proper suffix is empty
            Some(t) if t == child => return ROOT,
            Some(t) => return t,
            None if f == ROOT => return ROOT,
            None => f = trie.state(f).failure,
        }
    }
}

/// Fluent builder producing a frozen, ready-to-search automaton
pub struct AutomatonBuilder {
    config: AutomatonConfig,
    patterns: Vec<String>,
}

impl AutomatonBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: AutomatonConfig::default(),
            patterns: Vec::new(),
        }
    }

    /// Override the configuration
    pub fn config(mut self, config: AutomatonConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a single pattern
    pub fn add_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add patterns from an iterator
    pub fn add_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Get the number of patterns added so far (duplicates included)
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Build the automaton: insert every pattern, then freeze
    ///
    /// Patterns are validated here, not at `add_pattern` time; the first
    /// invalid pattern aborts the build. Duplicates collapse through
    /// insert idempotence. Building with zero patterns succeeds and
    /// yields an automaton that matches nothing.
    pub fn build(self) -> AutomatonResult<Automaton> {
        let mut automaton = Automaton::with_config(self.config);
        for pattern in &self.patterns {
            automaton.insert(pattern)?;
        }
        automaton.build();
        Ok(automaton)
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
