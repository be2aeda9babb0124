//! Symbol types for automata transitions.

use indexmap::IndexSet;
use std::fmt;

/// A symbol identifier: the index of a character within its [`Alphabet`].
pub type SymbolId = u32;

/// The closed set of symbols an automaton is defined over.
///
/// Characters are interned in insertion order; the n-th distinct character gets id `n`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<char>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol and return its id. Re-inserting returns the existing id.
    pub fn insert(&mut self, symbol: char) -> SymbolId {
        let (idx, _) = self.symbols.insert_full(symbol);
        idx as SymbolId
    }

    /// The id of `symbol`, or `None` if it is outside the alphabet.
    pub fn id(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol).map(|idx| idx as SymbolId)
    }

    /// The character behind `id`.
    pub fn symbol(&self, id: SymbolId) -> Option<char> {
        self.symbols.get_index(id as usize).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbol ids, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len()).map(|idx| idx as SymbolId)
    }

    /// Iterate over `(id, symbol)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, char)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(idx, &symbol)| (idx as SymbolId, symbol))
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut alphabet = Self::new();
        for symbol in iter {
            alphabet.insert(symbol);
        }
        alphabet
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.symbols.iter()).finish()
    }
}
