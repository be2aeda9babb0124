//! Property-based tests for compilation and minimization.
//!
//! Random patterns over `{a, b, c}` are compiled and checked against a reference
//! matcher that works on the pattern's structure directly. For every pattern we verify:
//! 1. The compiled DFA accepts exactly the strings the reference accepts
//! 2. Minimization preserves the language, for both whole-string and prefix matching
//! 3. Minimization is a fixpoint and never grows the automaton
//! 4. The result does not depend on the order the alphabet is given in
//! 5. Symbols the pattern never uses change nothing but the alphabet

use posdfa::{Dfa, compile};
use proptest::prelude::*;
use std::collections::BTreeSet;

const ALPHABET: [char; 3] = ['a', 'b', 'c'];
const MAX_LEN: usize = 5;

// ============================================================================
// Reference Regular Expressions
// ============================================================================

#[derive(Debug, Clone)]
enum Re {
    Lit(char),
    Union(Box<Re>, Box<Re>),
    Concat(Box<Re>, Box<Re>),
    Star(Box<Re>),
}

impl Re {
    fn render(&self) -> String {
        match self {
            Re::Lit(c) => c.to_string(),
            Re::Union(l, r) => format!("({}|{})", l.render(), r.render()),
            Re::Concat(l, r) => format!("{}{}", l.render(), r.render()),
            Re::Star(r) => format!("({})*", r.render()),
        }
    }

    /// Every index at which a match starting at `start` can end.
    fn ends(&self, text: &[char], start: usize) -> BTreeSet<usize> {
        match self {
            Re::Lit(c) => {
                if text.get(start) == Some(c) {
                    BTreeSet::from([start + 1])
                } else {
                    BTreeSet::new()
                }
            }
            Re::Union(l, r) => {
                let mut ends = l.ends(text, start);
                ends.extend(r.ends(text, start));
                ends
            }
            Re::Concat(l, r) => l
                .ends(text, start)
                .into_iter()
                .flat_map(|mid| r.ends(text, mid))
                .collect(),
            Re::Star(r) => {
                let mut reached = BTreeSet::from([start]);
                let mut frontier = vec![start];
                while let Some(pos) = frontier.pop() {
                    for end in r.ends(text, pos) {
                        if reached.insert(end) {
                            frontier.push(end);
                        }
                    }
                }
                reached
            }
        }
    }

    fn full_match(&self, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        self.ends(&chars, 0).contains(&chars.len())
    }
}

// ============================================================================
// Test Data Generators
// ============================================================================

fn re_strategy() -> impl Strategy<Value = Re> {
    let leaf = prop::sample::select(ALPHABET.to_vec()).prop_map(Re::Lit);
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Re::Union(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Re::Concat(Box::new(l), Box::new(r))),
            inner.prop_map(|r| Re::Star(Box::new(r))),
        ]
    })
}

/// All strings over `symbols` up to `max_len` characters.
fn strings_over(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut strings = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|s| symbols.iter().map(move |&c| format!("{s}{c}")))
            .collect();
        strings.extend(layer.iter().cloned());
    }
    strings
}

fn all_strings() -> Vec<String> {
    strings_over(&ALPHABET, MAX_LEN)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn sorted_transitions(dfa: &Dfa) -> Vec<(u32, u32, u32)> {
    let mut edges: Vec<_> = dfa.transitions().collect();
    edges.sort_unstable();
    edges
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn compiled_dfa_agrees_with_reference(re in re_strategy()) {
        init();
        let pattern = re.render();
        let dfa = compile(ALPHABET, &pattern).unwrap();
        for text in all_strings() {
            prop_assert_eq!(dfa.accepts(&text), re.full_match(&text), "{} on {:?}", pattern, text);
        }
    }

    #[test]
    fn minimization_preserves_language(re in re_strategy()) {
        init();
        let pattern = re.render();
        let dfa = compile(ALPHABET, &pattern).unwrap();
        let minimized = dfa.minimize();
        for text in all_strings() {
            prop_assert_eq!(
                dfa.accepts(&text),
                minimized.accepts(&text),
                "{} on {:?}",
                pattern,
                text
            );
            prop_assert_eq!(
                dfa.matches(&text),
                minimized.matches(&text),
                "{} on {:?}",
                pattern,
                text
            );
        }
    }

    #[test]
    fn minimization_preserves_language_over_wider_alphabet(re in re_strategy()) {
        init();
        // 'd' never appears in the pattern, so every string holding it is rejected whole
        let wider = ['a', 'b', 'c', 'd'];
        let pattern = re.render();
        let dfa = compile(wider, &pattern).unwrap();
        let minimized = dfa.minimize();
        prop_assert_eq!(minimized.alphabet().len(), wider.len());

        for text in strings_over(&wider, MAX_LEN - 1) {
            prop_assert_eq!(
                dfa.accepts(&text),
                minimized.accepts(&text),
                "{} on {:?}",
                pattern,
                text
            );
            prop_assert_eq!(
                dfa.matches(&text),
                minimized.matches(&text),
                "{} on {:?}",
                pattern,
                text
            );
            if text.contains('d') {
                prop_assert!(!minimized.accepts(&text), "{} on {:?}", pattern, text);
            } else {
                prop_assert_eq!(minimized.accepts(&text), re.full_match(&text));
            }
        }
    }

    #[test]
    fn prefix_matching_means_some_prefix_accepted(re in re_strategy()) {
        let dfa = compile(ALPHABET, &re.render()).unwrap().minimize();
        for text in all_strings() {
            let any_prefix = (0..=text.len()).any(|k| dfa.accepts(&text[..k]));
            prop_assert_eq!(dfa.matches(&text), any_prefix, "{:?}", text);
        }
    }

    #[test]
    fn minimization_is_idempotent(re in re_strategy()) {
        let dfa = compile(ALPHABET, &re.render()).unwrap();
        let once = dfa.minimize();
        let twice = once.minimize();

        prop_assert!(once.num_states() < dfa.num_states());
        prop_assert_eq!(once.states(), twice.states());
        prop_assert_eq!(once.start_state(), twice.start_state());
        prop_assert_eq!(once.final_states(), twice.final_states());
        prop_assert_eq!(sorted_transitions(&once), sorted_transitions(&twice));
    }

    #[test]
    fn alphabet_order_does_not_matter(re in re_strategy()) {
        let pattern = re.render();
        let forward = compile(ALPHABET, &pattern).unwrap().minimize();
        let backward = compile(ALPHABET.into_iter().rev(), &pattern).unwrap().minimize();

        prop_assert_eq!(forward.num_states(), backward.num_states());
        prop_assert_eq!(forward.final_states().len(), backward.final_states().len());
        for text in all_strings() {
            prop_assert_eq!(forward.accepts(&text), backward.accepts(&text), "{:?}", text);
        }
    }
}
