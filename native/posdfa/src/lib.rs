//! Regular expressions compiled straight to minimal DFAs.
//!
//! Patterns are turned into an attributed syntax tree (nullable, firstpos, lastpos,
//! followpos), from which a DFA is built by subset construction over position sets. The
//! DFA can then be minimized by table filling and queried.
//!
//! ```
//! let dfa = posdfa::compile("abc".chars(), "ab*")?.minimize();
//! assert!(dfa.matches("abbbc"));
//! assert!(!dfa.matches("ba"));
//! assert!(dfa.accepts("abb"));
//! # Ok::<(), posdfa::Error>(())
//! ```

pub mod automaton;
pub mod compile;
pub mod error;
pub mod regex;

#[cfg(feature = "python")]
mod python_bindings;

pub use automaton::{Alphabet, Dfa, minimize};
pub use compile::{Compiler, compile};
pub use error::{Error, Result, Unmatched};
pub use regex::Syntax;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn posdfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::automaton(m)
}
