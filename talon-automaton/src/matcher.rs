// Automaton matcher - scans a text over the built automaton
//
// Walks the text byte by byte, taking trie transitions where they
// exist and failure links on mismatch, and follows output links to
// report every overlapping occurrence. Runs in O(text length + total
// matches) time regardless of pattern count.

use crate::builder::{self, AutomatonBuilder};
use crate::trie::{PatternId, StateId, Trie, ROOT};
use crate::{AutomatonConfig, AutomatonError, AutomatonResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// A single pattern occurrence found in a searched text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// The pattern that matched
    pub pattern_id: PatternId,

    /// Byte offset of the first matched byte
    pub start: usize,

    /// Byte offset one past the last matched byte
    pub end: usize,

    /// The matched pattern text
    pub pattern: String,
}

/// The multi-pattern matching automaton
///
/// Lifecycle is mutable-then-frozen: patterns go in through `insert`,
/// `build` wires the failure and output links exactly once, and from
/// then on `search` and `is_match` are read-only and may run from any
/// number of threads over a shared reference.
#[derive(Clone)]
pub struct Automaton {
    /// Trie states plus failure and output links
    trie: Trie,

    /// Configuration
    config: AutomatonConfig,

    /// Set once by `build`; links are meaningful only afterwards
    built: bool,
}

impl Automaton {
    /// Create an empty automaton with default configuration
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    /// Create an empty automaton with custom configuration
    pub fn with_config(config: AutomatonConfig) -> Self {
        Self {
            trie: Trie::new(),
            config,
            built: false,
        }
    }

    /// Create a builder for constructing an automaton
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    /// Insert a pattern, returning its id
    ///
    /// Re-inserting an identical pattern is idempotent and returns the
    /// existing id. Fails on an empty pattern, on configured limit
    /// violations, and after `build` has frozen the automaton.
    pub fn insert(&mut self, pattern: &str) -> AutomatonResult<PatternId> {
        if self.built {
            return Err(AutomatonError::AlreadyBuilt);
        }

        if pattern.is_empty() {
            return Err(AutomatonError::EmptyPattern);
        }

        if self.config.max_pattern_length > 0 && pattern.len() > self.config.max_pattern_length {
            return Err(AutomatonError::PatternTooLong {
                length: pattern.len(),
                max: self.config.max_pattern_length,
            });
        }

        if let Some(id) = self.trie.pattern_id_of(pattern) {
            return Ok(id);
        }

        if self.config.max_patterns > 0 && self.trie.pattern_count() >= self.config.max_patterns {
            return Err(AutomatonError::TooManyPatterns {
                count: self.trie.pattern_count() + 1,
                max: self.config.max_patterns,
            });
        }

        let id = self.trie.insert(pattern);
        trace!(pattern_id = id, length = pattern.len(), "Pattern inserted");
        Ok(id)
    }

    /// Wire failure and output links and freeze the automaton
    ///
    /// Idempotent: calling again after the first build is a no-op.
    pub fn build(&mut self) {
        if self.built {
            return;
        }

        builder::wire_links(&mut self.trie);
        self.built = true;

        debug!(
            states = self.trie.state_count(),
            patterns = self.trie.pattern_count(),
            "Automaton built"
        );
    }

    /// Find every occurrence of every pattern in `text`
    ///
    /// Occurrences are reported in scan order: by end position, with
    /// all patterns completing at the same position grouped together,
    /// longest first. Overlapping and nested occurrences are all
    /// included.
    pub fn search(&self, text: &str) -> AutomatonResult<Vec<Match>> {
        self.check_searchable()?;

        let mut matches = Vec::new();
        let mut current = ROOT;

        for (i, &byte) in text.as_bytes().iter().enumerate() {
            current = self.advance(current, byte);

            if let Some(id) = self.trie.state(current).pattern {
                matches.push(self.match_record(id, i));
            }

            // Every state on the output chain is terminal by
            // construction, so each hop yields one match
            let mut link = self.trie.state(current).output;
            while let Some(out) = link {
                if let Some(id) = self.trie.state(out).pattern {
                    matches.push(self.match_record(id, i));
                }
                link = self.trie.state(out).output;
            }
        }

        trace!(
            text_len = text.len(),
            matches = matches.len(),
            "Search completed"
        );
        Ok(matches)
    }

    /// Does any pattern occur in `text`?
    ///
    /// Same scan as `search` but returns on the first hit and
    /// allocates nothing.
    pub fn is_match(&self, text: &str) -> AutomatonResult<bool> {
        self.check_searchable()?;

        let mut current = ROOT;
        for &byte in text.as_bytes() {
            current = self.advance(current, byte);

            let state = self.trie.state(current);
            if state.is_terminal() || state.output.is_some() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Take the transition on `byte`, falling back along failure links
    ///
    /// Each fallback strictly decreases the depth of `current` and the
    /// returned state is at most one level deeper, which is what bounds
    /// the total number of fallback hops by the text length.
    #[inline]
    fn advance(&self, mut current: StateId, byte: u8) -> StateId {
        loop {
            if let Some(next) = self.trie.transition(current, byte) {
                return next;
            }
            if current == ROOT {
                return ROOT;
            }
            current = self.trie.state(current).failure;
        }
    }

    fn match_record(&self, id: PatternId, end_index: usize) -> Match {
        let pattern = self.trie.pattern_text(id);
        Match {
            pattern_id: id,
            start: end_index + 1 - pattern.len(),
            end: end_index + 1,
            pattern: pattern.to_string(),
        }
    }

    /// A pattern-free automaton is searchable even without `build`;
    /// one with patterns must be built first or its links are garbage
    fn check_searchable(&self) -> AutomatonResult<()> {
        if self.built || self.trie.pattern_count() == 0 {
            Ok(())
        } else {
            Err(AutomatonError::NotBuilt)
        }
    }

    /// Has `build` completed?
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Get the number of automaton states, including the root
    pub fn state_count(&self) -> usize {
        self.trie.state_count()
    }

    /// Get the number of distinct inserted patterns
    pub fn pattern_count(&self) -> usize {
        self.trie.pattern_count()
    }

    /// Get the pattern text for an id
    pub fn pattern(&self, id: PatternId) -> Option<&str> {
        self.trie.pattern(id)
    }

    /// Get the estimated memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.trie.memory_usage()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("built", &self.built)
            .field("state_count", &self.trie.state_count())
            .field("pattern_count", &self.trie.pattern_count())
            .field("memory_usage", &self.trie.memory_usage())
            .finish()
    }
}
