//! Deterministic Finite Automaton (DFA) and its matcher.

use crate::automaton::minimize;
use crate::automaton::state::{Position, StateId, StateSet};
use crate::automaton::symbol::{Alphabet, SymbolId};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A Deterministic Finite Automaton over a closed [`Alphabet`].
///
/// Automata produced by subset construction carry an explicit sink state and a total
/// transition table. Minimized automata drop the sink; a missing transition then means
/// the input can no longer be accepted.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    states: StateSet,
    /// Start state (None if the language is empty after minimization)
    start_state: Option<StateId>,
    final_states: StateSet,
    /// Non-accepting state that absorbs every otherwise undefined transition
    sink: Option<StateId>,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Syntax tree positions behind each state (if created via subset construction)
    state_mapping: Option<IndexMap<StateId, Vec<Position>>>,
}

impl Dfa {
    /// Create a DFA with no states over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            states: StateSet::with_capacity(16),
            start_state: None,
            final_states: StateSet::with_capacity(16),
            sink: None,
            transitions: HashMap::new(),
            state_mapping: None,
        }
    }

    pub fn add_state(&mut self, state: StateId) {
        self.states.insert(state);
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.add_state(state);
        self.start_state = Some(state);
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.add_state(state);
        self.final_states.insert(state);
    }

    /// Mark `state` as the sink.
    pub fn set_sink(&mut self, state: StateId) {
        self.add_state(state);
        self.sink = Some(state);
    }

    /// Add a transition, replacing any existing one for `(source, symbol)`.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.add_state(source);
        self.add_state(destination);
        self.transitions.insert((source, symbol), destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    pub fn sink(&self) -> Option<StateId> {
        self.sink
    }

    /// Set the positions each state was built from.
    pub fn set_state_mapping(&mut self, mapping: IndexMap<StateId, Vec<Position>>) {
        self.state_mapping = Some(mapping);
    }

    /// Positions each state was built from; `None` after minimization.
    pub fn state_mapping(&self) -> Option<&IndexMap<StateId, Vec<Position>>> {
        self.state_mapping.as_ref()
    }

    /// Get all transitions as an iterator, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Whether every `(state, symbol)` pair has a transition.
    pub fn is_total(&self) -> bool {
        self.states
            .iter()
            .all(|state| self.alphabet.ids().all(|sym| self.transition(state, sym).is_some()))
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.final_states.is_empty() {
            return true;
        }
        !self
            .reachable_states()
            .iter()
            .any(|state| self.final_states.contains(state))
    }

    /// All states reachable from the start state, found breadth-first.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.states.len() + 1);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for symbol in self.alphabet.ids() {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Minimize the DFA. Returns a new DFA.
    pub fn minimize(&self) -> Dfa {
        minimize::minimize(self)
    }

    /// Prefix membership: does some prefix of `text` (possibly empty) belong to the language?
    ///
    /// Returns `false` as soon as a symbol outside the alphabet, or one with no transition,
    /// is met before an accepting prefix.
    pub fn matches(&self, text: &str) -> bool {
        self.try_matches(text).unwrap_or(false)
    }

    /// Like [`Dfa::matches`], but a symbol outside the alphabet is reported as
    /// [`Error::UndefinedSymbol`] instead of a plain rejection.
    pub fn try_matches(&self, text: &str) -> Result<bool> {
        let Some(mut current) = self.start_state else {
            return Ok(false);
        };

        for (offset, c) in text.chars().enumerate() {
            if self.is_final(current) {
                return Ok(true);
            }
            let symbol = self
                .alphabet
                .id(c)
                .ok_or(Error::UndefinedSymbol { symbol: c, offset })?;
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }

        Ok(self.is_final(current))
    }

    /// Whole-string membership: is `text` itself in the language?
    pub fn accepts(&self, text: &str) -> bool {
        let Some(mut current) = self.start_state else {
            return false;
        };

        for c in text.chars() {
            let next = self
                .alphabet
                .id(c)
                .and_then(|symbol| self.transition(current, symbol));
            match next {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_final(current)
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alphabet:\n{:?}", self.alphabet)?;
        writeln!(f, "States:\n{:?}", self.states)?;
        match self.start_state {
            Some(start) => writeln!(f, "Initial state:\n{start}")?,
            None => writeln!(f, "Initial state:\n-")?,
        }
        writeln!(f, "Transitions:")?;
        let mut edges: Vec<_> = self.transitions().collect();
        edges.sort_unstable();
        for (src, sym, dst) in edges {
            let symbol = self.alphabet.symbol(sym).unwrap_or('?');
            writeln!(f, "{src} + {symbol} -> {dst}")?;
        }
        write!(f, "Final states:\n{:?}", self.final_states)
    }
}
