//! DFA minimization by table filling.
//!
//! **Algorithm:** states are renumbered densely with the sink at index 0 (a virtual sink
//! is added if the DFA has none, absorbing every missing transition). Pairs with exactly
//! one accepting member are marked distinguishable, then marks are propagated backwards
//! along an inverse transition map until a fixpoint is reached. Reachable states that are
//! never separated share an equivalence class. States that cannot be told apart from the
//! sink are dead and are dropped along with every transition into them.
//!
//! Class ids start at 1; id 0 stands for the eliminated sink and never appears in the
//! result. Ids are handed out in ascending state order, so running the minimizer on its
//! own output renumbers nothing.

use crate::automaton::dfa::Dfa;
use crate::automaton::state::StateId;
use fixedbitset::FixedBitSet;
use std::collections::{HashMap, VecDeque};

/// Class id reserved for the sink and everything equivalent to it.
const ELIMINATED: StateId = 0;

/// Dense index of the sink in the distinguishability table.
const SINK: usize = 0;

/// Symmetric `n × n` table of distinguishable state pairs.
struct PairTable {
    n: usize,
    bits: FixedBitSet,
}

impl PairTable {
    fn new(n: usize) -> Self {
        Self {
            n,
            bits: FixedBitSet::with_capacity(n * n),
        }
    }

    fn is_marked(&self, i: usize, j: usize) -> bool {
        self.bits.contains(i * self.n + j)
    }

    fn mark(&mut self, i: usize, j: usize) {
        self.bits.insert(i * self.n + j);
        self.bits.insert(j * self.n + i);
    }
}

/// Minimize `dfa`, returning a new automaton with equivalent states merged and dead or
/// unreachable states removed.
pub fn minimize(dfa: &Dfa) -> Dfa {
    let alphabet = dfa.alphabet();
    let num_symbols = alphabet.len();

    // --- Step 1: Dense indexing, sink first ---
    let mut index_of: HashMap<StateId, usize> = HashMap::new();
    let mut state_of: Vec<Option<StateId>> = vec![dfa.sink()];
    if let Some(sink) = dfa.sink() {
        index_of.insert(sink, SINK);
    }
    for state in dfa.states().iter() {
        if Some(state) != dfa.sink() {
            index_of.insert(state, state_of.len());
            state_of.push(Some(state));
        }
    }
    let n = state_of.len();

    // Total transition table; anything undefined goes to the sink.
    let mut table = vec![vec![SINK; num_symbols]; n];
    for (idx, state) in state_of.iter().enumerate() {
        let Some(state) = *state else {
            continue;
        };
        for symbol in alphabet.ids() {
            table[idx][symbol as usize] = dfa
                .transition(state, symbol)
                .and_then(|dst| index_of.get(&dst).copied())
                .unwrap_or(SINK);
        }
    }

    let is_final: Vec<bool> = state_of
        .iter()
        .map(|state| state.is_some_and(|s| dfa.is_final(s)))
        .collect();

    // --- Step 2: Reachability ---
    let reachable_states = dfa.reachable_states();
    let reachable: Vec<bool> = state_of
        .iter()
        .map(|state| state.is_some_and(|s| reachable_states.contains(s)))
        .collect();

    // --- Step 3: Inverse transition map ---
    // predecessors[target][symbol] = states moving to target on symbol
    let mut predecessors: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); num_symbols]; n];
    for (source, row) in table.iter().enumerate() {
        for (symbol, &target) in row.iter().enumerate() {
            predecessors[target][symbol].push(source);
        }
    }

    // --- Step 4: Table filling ---
    let mut distinct = PairTable::new(n);
    let mut worklist: VecDeque<(usize, usize)> = VecDeque::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if is_final[i] != is_final[j] {
                distinct.mark(i, j);
                worklist.push_back((i, j));
            }
        }
    }

    while let Some((i, j)) = worklist.pop_front() {
        for symbol in 0..num_symbols {
            for &r in &predecessors[i][symbol] {
                for &s in &predecessors[j][symbol] {
                    if !distinct.is_marked(r, s) {
                        distinct.mark(r, s);
                        worklist.push_back((r, s));
                    }
                }
            }
        }
    }

    // --- Step 5: Equivalence classes ---
    let mut class: Vec<Option<StateId>> = vec![None; n];
    for (idx, slot) in class.iter_mut().enumerate() {
        if !distinct.is_marked(SINK, idx) {
            *slot = Some(ELIMINATED);
        }
    }

    let mut num_classes: StateId = 0;
    for i in 1..n {
        if !reachable[i] || class[i].is_some() {
            continue;
        }
        num_classes += 1;
        class[i] = Some(num_classes);
        for j in (i + 1)..n {
            if class[j].is_none() && !distinct.is_marked(i, j) {
                class[j] = Some(num_classes);
            }
        }
    }

    // --- Step 6: Rebuild ---
    let live = |idx: usize| class[idx].filter(|&c| c != ELIMINATED);

    let mut minimized = Dfa::new(alphabet.clone());
    for c in 1..=num_classes {
        minimized.add_state(c);
    }

    if let Some(start) = dfa
        .start_state()
        .and_then(|s| index_of.get(&s).copied())
        .and_then(live)
    {
        minimized.set_start_state(start);
    }

    for (idx, row) in table.iter().enumerate() {
        let Some(source) = live(idx) else {
            continue;
        };
        if is_final[idx] {
            minimized.add_final_state(source);
        }
        for symbol in alphabet.ids() {
            if let Some(destination) = live(row[symbol as usize]) {
                minimized.add_transition(source, symbol, destination);
            }
        }
    }

    log::debug!(
        "minimize: {} states -> {} classes ({} final)",
        dfa.num_states(),
        minimized.num_states(),
        minimized.final_states().len()
    );

    minimized
}
