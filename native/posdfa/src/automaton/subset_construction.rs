//! Direct DFA construction from followpos sets.
//!
//! Each DFA state is a set of syntax tree positions. The start state is `firstpos(root)`.
//! On symbol `c`, a state moves to the union of `followpos(p)` over its positions `p`
//! labelled `c`. No NFA is ever materialized.

use crate::automaton::dfa::Dfa;
use crate::automaton::state::{PositionSet, StateId};
use crate::automaton::symbol::{Alphabet, SymbolId};
use crate::regex::syntax_tree::{SyntaxTree, Terminal};
use indexmap::IndexMap;

/// The sink: the empty position set, never accepting.
pub const SINK_STATE: StateId = 0;

/// The state built from `firstpos(root)`.
pub const INITIAL_STATE: StateId = 1;

/// Build a total DFA over `alphabet` from an attributed syntax tree.
///
/// Leaves whose symbol is outside `alphabet` contribute no transitions; the compiler
/// rejects such patterns before getting here.
pub fn subset_construction(tree: &SyntaxTree, alphabet: &Alphabet) -> Dfa {
    let width = tree.len_positions();
    let end_marker = tree.end_marker();

    // Maps each discovered position set to its DFA state ID
    let mut state_mapping: IndexMap<PositionSet, StateId> = IndexMap::new();
    let mut dfa = Dfa::new(alphabet.clone());
    dfa.set_sink(SINK_STATE);

    // Queue of DFA states to process (as position sets)
    let mut worklist: Vec<PositionSet> = Vec::new();

    let initial_set = tree.root().firstpos.clone();
    if initial_set.is_empty() {
        dfa.set_start_state(SINK_STATE);
    } else {
        state_mapping.insert(initial_set.clone(), INITIAL_STATE);
        dfa.set_start_state(INITIAL_STATE);
        worklist.push(initial_set);
    }

    while let Some(current_set) = worklist.pop() {
        let Some(&current_state) = state_mapping.get(&current_set) else {
            continue;
        };

        if end_marker.is_some_and(|marker| current_set.contains(marker)) {
            dfa.add_final_state(current_state);
        }

        // Group the followpos sets of this state's positions by their symbol
        let mut moves: IndexMap<SymbolId, PositionSet> = IndexMap::new();
        for position in current_set.iter() {
            let Some(Terminal::Symbol(c)) = tree.terminal(position) else {
                continue;
            };
            let Some(symbol) = alphabet.id(c) else {
                continue;
            };
            moves
                .entry(symbol)
                .or_insert_with(|| PositionSet::with_capacity(width))
                .union_with(tree.followpos(position));
        }

        for (symbol, next_set) in moves {
            let next_state = if next_set.is_empty() {
                SINK_STATE
            } else if let Some(&existing) = state_mapping.get(&next_set) {
                existing
            } else {
                let new_state = state_mapping.len() as StateId + INITIAL_STATE;
                log::trace!("subset construction: state {new_state} = {next_set:?}");
                state_mapping.insert(next_set.clone(), new_state);
                worklist.push(next_set);
                new_state
            };
            dfa.add_transition(current_state, symbol, next_state);
        }
    }

    // Close the table: every missing (state, symbol) pair goes to the sink
    let states: Vec<StateId> = dfa.states().iter().collect();
    for state in states {
        for symbol in alphabet.ids() {
            if dfa.transition(state, symbol).is_none() {
                dfa.add_transition(state, symbol, SINK_STATE);
            }
        }
    }

    log::debug!(
        "subset construction: {} positions -> {} states ({} final)",
        width,
        dfa.num_states(),
        dfa.final_states().len()
    );

    let mut mapping: IndexMap<StateId, Vec<u32>> = IndexMap::with_capacity(state_mapping.len() + 1);
    mapping.insert(SINK_STATE, Vec::new());
    mapping.extend(
        state_mapping
            .into_iter()
            .map(|(positions, state)| (state, positions.to_vec())),
    );
    dfa.set_state_mapping(mapping);

    dfa
}
