// Trie store - automaton states and parent-to-child transitions
//
// This module owns the state arena. States are created only during
// pattern insertion; failure and output links are wired afterwards by
// the link builder and remain plain indices into the same arena. The
// trie edges are the only ownership edges, so the tree-plus-back-edges
// shape of the finished automaton cannot form reference cycles.

use ahash::AHashMap;

/// Unique identifier for an automaton state (index into the state arena)
pub(crate) type StateId = u32;

/// Unique identifier for an inserted pattern (index into the pattern table)
pub type PatternId = u32;

/// The root state always occupies the first arena slot
pub(crate) const ROOT: StateId = 0;

/// A single automaton state, representing one prefix of one or more
/// inserted patterns (the root represents the empty prefix)
#[derive(Debug, Clone)]
pub(crate) struct State {
    /// Transitions: input byte -> child state
    pub(crate) transitions: AHashMap<u8, StateId>,

    /// State for the longest proper suffix of this state's prefix that
    /// is itself a prefix in the trie; the root points to itself
    pub(crate) failure: StateId,

    /// Nearest terminal state on the failure chain, excluding this state
    pub(crate) output: Option<StateId>,

    /// Pattern that ends exactly at this state, if any
    pub(crate) pattern: Option<PatternId>,
}

impl State {
    fn new() -> Self {
        Self {
            transitions: AHashMap::default(),
            failure: ROOT,
            output: None,
            pattern: None,
        }
    }

    /// Does some inserted pattern end exactly at this state?
    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.pattern.is_some()
    }
}

/// Arena of automaton states plus the pattern table
#[derive(Debug, Clone)]
pub(crate) struct Trie {
    /// All states; the root occupies index 0
    states: Vec<State>,

    /// Distinct inserted patterns in insertion order
    patterns: Vec<String>,

    /// Estimated memory usage in bytes
    memory_usage: usize,
}

impl Trie {
    /// Create a trie holding only the root state
    pub(crate) fn new() -> Self {
        Self {
            states: vec![State::new()],
            patterns: Vec::new(),
            memory_usage: std::mem::size_of::<State>(),
        }
    }

    /// Allocate a new state in the arena
    fn alloc(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State::new());
        self.memory_usage += std::mem::size_of::<State>();
        id
    }

    #[inline]
    pub(crate) fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    #[inline]
    pub(crate) fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id as usize]
    }

    /// Look up the child reached from `id` on `byte`
    #[inline]
    pub(crate) fn transition(&self, id: StateId, byte: u8) -> Option<StateId> {
        self.states[id as usize].transitions.get(&byte).copied()
    }

    /// Snapshot the outgoing edges of a state
    ///
    /// Link construction mutates child states while walking failure
    /// chains over the same arena, so callers iterate over a copy.
    pub(crate) fn edges(&self, id: StateId) -> Vec<(u8, StateId)> {
        self.states[id as usize]
            .transitions
            .iter()
            .map(|(&byte, &child)| (byte, child))
            .collect()
    }

    /// Find the child for `byte`, creating it if missing
    fn child_or_create(&mut self, parent: StateId, byte: u8) -> StateId {
        if let Some(child) = self.transition(parent, byte) {
            return child;
        }

        let child = self.alloc();
        self.states[parent as usize].transitions.insert(byte, child);
        self.memory_usage += std::mem::size_of::<u8>() + std::mem::size_of::<StateId>();
        child
    }

    /// Insert a pattern, creating one new state per missing trie edge,
    /// and mark the final state terminal
    ///
    /// The caller guarantees the pattern is non-empty and not already
    /// present; limits and ordering policies are enforced at the public
    /// API layer.
    pub(crate) fn insert(&mut self, pattern: &str) -> PatternId {
        let mut current = ROOT;
        for &byte in pattern.as_bytes() {
            current = self.child_or_create(current, byte);
        }

        let id = self.patterns.len() as PatternId;
        self.patterns.push(pattern.to_string());
        self.memory_usage += pattern.len();
        self.states[current as usize].pattern = Some(id);
        id
    }

    /// Id of an already-inserted pattern, if the exact pattern is present
    pub(crate) fn pattern_id_of(&self, pattern: &str) -> Option<PatternId> {
        let mut current = ROOT;
        for &byte in pattern.as_bytes() {
            current = self.transition(current, byte)?;
        }
        self.states[current as usize].pattern
    }

    /// Pattern text for a known id
    #[inline]
    pub(crate) fn pattern_text(&self, id: PatternId) -> &str {
        &self.patterns[id as usize]
    }

    /// Pattern text for an arbitrary id
    pub(crate) fn pattern(&self, id: PatternId) -> Option<&str> {
        self.patterns.get(id as usize).map(String::as_str)
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.memory_usage
    }
}
