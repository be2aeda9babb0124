//! State and position identifiers, and the bit set used for both.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A DFA state identifier.
pub type StateId = u32;

/// A leaf position in the attributed syntax tree.
pub type Position = u32;

/// A set of small integer ids backed by a fixed-size bit set.
///
/// Equality and hashing look only at membership, never at capacity, so two sets built
/// with different capacities but holding the same ids are the same key. The subset
/// construction relies on this to deduplicate states by value.
#[derive(Clone, Default)]
pub struct IdSet {
    bits: FixedBitSet,
}

/// A set of DFA states.
pub type StateSet = IdSet;

/// A set of syntax tree positions; also the identity of a state during subset construction.
pub type PositionSet = IdSet;

impl IdSet {
    /// Create a new empty set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a set containing a single id.
    pub fn singleton(id: u32, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(id);
        set
    }

    /// Insert an id, growing the set if needed.
    pub fn insert(&mut self, id: u32) {
        let idx = id as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    pub fn contains(&self, id: u32) -> bool {
        let idx = id as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.bits.ones().map(|i| i as u32)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &IdSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Create a new set that is the union of this set and another.
    pub fn union(&self, other: &IdSet) -> IdSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Members in ascending order.
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl PartialEq for IdSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for IdSet {}

impl Hash for IdSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for id in self.bits.ones() {
            id.hash(state);
        }
        self.len().hash(state);
    }
}

impl fmt::Debug for IdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u32> for IdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
