//! Error types for pattern compilation and matching.

use std::fmt;
use thiserror::Error;

/// Which side of a parenthesis pair is missing its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    /// An `(` was never closed.
    Open,
    /// A `)` has no `(` to close.
    Close,
}

impl fmt::Display for Unmatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unmatched::Open => f.write_str("unclosed '('"),
            Unmatched::Close => f.write_str("')' without matching '('"),
        }
    }
}

/// Errors that can occur while compiling a pattern or matching against an automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern's parentheses do not balance.
    #[error("mismatched parentheses: {0}")]
    MismatchedParentheses(Unmatched),

    /// The pattern ends with an escape character that escapes nothing.
    #[error("dangling escape at offset {offset}")]
    DanglingEscape { offset: usize },

    /// A pattern literal is not a member of the alphabet.
    #[error("symbol {symbol:?} at offset {offset} is not in the alphabet")]
    UnknownSymbol { symbol: char, offset: usize },

    /// An operator does not have enough operands, as in `*a`, `a|` or `()`.
    #[error("operator '{operator}' is missing an operand")]
    MissingOperand { operator: char },

    /// Operands were left over with no operator to combine them.
    #[error("{count} operands left without an operator")]
    DanglingOperands { count: usize },

    /// The postfix stream contained no tokens at all.
    #[error("pattern is empty")]
    EmptyPattern,

    /// Matching met a symbol outside the automaton's alphabet.
    ///
    /// Only [`Dfa::try_matches`](crate::Dfa::try_matches) reports this; the plain matcher
    /// treats it as a rejection.
    #[error("symbol {symbol:?} at offset {offset} is not in the alphabet")]
    UndefinedSymbol { symbol: char, offset: usize },
}

/// A specialized `Result` type for posdfa operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::MismatchedParentheses(Unmatched::Close).to_string(),
            "mismatched parentheses: ')' without matching '('"
        );
        assert_eq!(
            Error::UnknownSymbol { symbol: 'z', offset: 3 }.to_string(),
            "symbol 'z' at offset 3 is not in the alphabet"
        );
        assert_eq!(
            Error::MissingOperand { operator: '|' }.to_string(),
            "operator '|' is missing an operand"
        );
    }
}
