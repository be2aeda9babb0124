//! PyO3 bindings for the compiler.
//!
//! Exposes an `Automaton` class so Python callers can compile `(alphabet, pattern)` pairs
//! and query the result.

use crate::automaton::{Alphabet, Dfa};
use crate::compile::Compiler;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

/// A compiled pattern.
#[pyclass(name = "Automaton", module = "posdfa")]
#[derive(Clone)]
pub struct PyAutomaton {
    dfa: Dfa,
}

#[pymethods]
impl PyAutomaton {
    /// Compile `pattern` over `alphabet`, any iterable of one-character strings.
    #[new]
    fn new(alphabet: &Bound<'_, PyAny>, pattern: &str) -> PyResult<Self> {
        let mut symbols = Vec::new();
        for item in alphabet.try_iter()? {
            symbols.push(item?.extract::<char>()?);
        }
        // Python sets have no stable order
        symbols.sort_unstable();
        let alphabet: Alphabet = symbols.into_iter().collect();

        let dfa = Compiler::default()
            .compile(&alphabet, pattern)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { dfa })
    }

    /// Return the minimal equivalent automaton.
    fn minimize(&self) -> PyAutomaton {
        PyAutomaton {
            dfa: self.dfa.minimize(),
        }
    }

    /// True if some prefix of `text` is accepted.
    fn simulate(&self, text: &str) -> bool {
        self.dfa.matches(text)
    }

    /// True if `text` as a whole is accepted.
    fn accepts(&self, text: &str) -> bool {
        self.dfa.accepts(text)
    }

    fn is_empty(&self) -> bool {
        self.dfa.is_empty()
    }

    #[getter]
    fn start_state(&self) -> Option<u32> {
        self.dfa.start_state()
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.dfa.num_states()
    }

    /// Get the final states as a set of integer indices.
    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.dfa.final_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    fn __str__(&self) -> String {
        self.dfa.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, final={})",
            self.dfa.num_states(),
            self.dfa.final_states().len()
        )
    }
}

/// Register the automaton classes on `m`.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    Ok(())
}
