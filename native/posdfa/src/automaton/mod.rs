//! Finite automata built from attributed syntax trees.
//!
//! This module provides:
//! - Position-set subset construction (followpos method, no intermediate NFA)
//! - Table-filling DFA minimization
//! - Prefix and whole-string matching

pub mod dfa;
pub mod minimize;
pub mod state;
pub mod subset_construction;
pub mod symbol;

pub use dfa::Dfa;
pub use minimize::minimize;
pub use state::{IdSet, Position, PositionSet, StateId, StateSet};
pub use subset_construction::{INITIAL_STATE, SINK_STATE, subset_construction};
pub use symbol::{Alphabet, SymbolId};
