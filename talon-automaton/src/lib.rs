// Talon Automaton - Aho-Corasick multi-pattern matcher
//
// This crate implements the classic Aho-Corasick algorithm for matching
// a fixed set of pattern strings against input text in a single pass:
// - Trie construction over pattern bytes
// - Failure link (suffix link) computation in breadth-first order
// - Output link chaining for overlapping and nested matches
// - Amortized linear-time search: O(text length + matches reported)
//
// ## Lifecycle
//
// ```text
// insert* ──> build ──> search*
// ```
//
// Patterns are inserted first, `build` runs exactly once and freezes the
// automaton, after which `search` may be invoked any number of times on
// any number of texts without further mutation. Searches on a frozen
// automaton are read-only and safe to run concurrently.

mod builder;
mod matcher;
mod trie;

#[cfg(test)]
mod perf;

pub use builder::AutomatonBuilder;
pub use matcher::{Automaton, Match};
pub use trie::PatternId;

use thiserror::Error;

/// Errors that can occur in the automaton
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("Empty patterns are not supported")]
    EmptyPattern,

    #[error("Pattern too long: {length} bytes (max: {max})")]
    PatternTooLong { length: usize, max: usize },

    #[error("Too many patterns: {count} (max: {max})")]
    TooManyPatterns { count: usize, max: usize },

    #[error("Automaton has patterns but was never built; call build() before searching")]
    NotBuilt,

    #[error("Automaton is already built; patterns cannot be inserted after build()")]
    AlreadyBuilt,
}

/// Result type for automaton operations
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Configuration for the automaton
#[derive(Debug, Clone)]
pub struct AutomatonConfig {
    /// Maximum number of distinct patterns (0 = unlimited)
    pub max_patterns: usize,

    /// Maximum pattern length in bytes (0 = unlimited)
    pub max_pattern_length: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            max_patterns: 10_000,
            max_pattern_length: 4096,
        }
    }
}
