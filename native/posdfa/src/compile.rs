//! The compile pipeline: pattern text to DFA.

use crate::automaton::{Alphabet, Dfa, subset_construction};
use crate::error::{Error, Result};
use crate::regex::token::{OperatorKind, Syntax, Token};
use crate::regex::{SyntaxTree, insert_concatenation, to_postfix};

/// Compiles patterns under a fixed [`Syntax`].
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    syntax: Syntax,
}

impl Compiler {
    pub fn new(syntax: Syntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Tokenize `pattern`, check its literals against `alphabet`, and make concatenation
    /// explicit.
    pub fn infix(&self, alphabet: &Alphabet, pattern: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (offset, token) in self.syntax.tokenize_with_offsets(pattern)? {
            if let Token::Literal(symbol) = token {
                if !alphabet.contains(symbol) {
                    return Err(Error::UnknownSymbol { symbol, offset });
                }
            }
            tokens.push(token);
        }

        Ok(insert_concatenation(
            &tokens,
            self.syntax.operator(OperatorKind::Concat),
            self.syntax.ends_atom(),
            self.syntax.starts_atom(),
        ))
    }

    /// The pattern in postfix order, followed by the end marker.
    ///
    /// The marker is concatenated after the whole pattern (`p # .`, i.e. `(p)#`), so it
    /// follows every alternative. An empty pattern becomes the lone marker and matches
    /// only the empty string; a non-empty pattern with no operands (`()`) is an error.
    pub fn postfix(&self, alphabet: &Alphabet, pattern: &str) -> Result<Vec<Token>> {
        let infix = self.infix(alphabet, pattern)?;
        let mut postfix = to_postfix(&infix)?;

        if postfix.is_empty() {
            if !infix.is_empty() {
                return Err(Error::EmptyPattern);
            }
            postfix.push(Token::EndMarker);
        } else {
            postfix.push(Token::EndMarker);
            postfix.push(Token::Operator(self.syntax.operator(OperatorKind::Concat)));
        }

        Ok(postfix)
    }

    /// The attributed syntax tree of the pattern.
    pub fn syntax_tree(&self, alphabet: &Alphabet, pattern: &str) -> Result<SyntaxTree> {
        SyntaxTree::from_postfix(&self.postfix(alphabet, pattern)?)
    }

    /// Compile `pattern` into a total (unminimized) DFA over `alphabet`.
    pub fn compile(&self, alphabet: &Alphabet, pattern: &str) -> Result<Dfa> {
        let tree = self.syntax_tree(alphabet, pattern)?;
        log::debug!(
            "compile: {pattern:?} has {} positions over {} symbols",
            tree.len_positions(),
            alphabet.len()
        );
        Ok(subset_construction(&tree, alphabet))
    }
}

/// Compile `pattern` over `alphabet` with the default syntax.
///
/// The result is total and unminimized; call [`Dfa::minimize`] for the minimal automaton.
pub fn compile(alphabet: impl IntoIterator<Item = char>, pattern: &str) -> Result<Dfa> {
    let alphabet: Alphabet = alphabet.into_iter().collect();
    Compiler::default().compile(&alphabet, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unmatched;
    use crate::regex::render_postfix;

    #[test]
    fn test_postfix_includes_end_marker() {
        let compiler = Compiler::default();
        let alphabet: Alphabet = "ab".chars().collect();
        let postfix = compiler.postfix(&alphabet, "(a|b)*abb").unwrap();
        assert_eq!(render_postfix(&postfix, compiler.syntax()), "ab|*a.b.b.#.");
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(
            compile("ab".chars(), "a(b|c)").unwrap_err(),
            Error::UnknownSymbol {
                symbol: 'c',
                offset: 4
            }
        );
        // Escaped metacharacters must be in the alphabet too
        assert!(compile("ab".chars(), r"a\*").is_err());
        assert!(compile("a*".chars(), r"a\*").is_ok());
    }

    #[test]
    fn test_structural_errors() {
        let abc = || "abc".chars();
        assert_eq!(
            compile(abc(), "(ab").unwrap_err(),
            Error::MismatchedParentheses(Unmatched::Open)
        );
        assert_eq!(
            compile(abc(), "ab)").unwrap_err(),
            Error::MismatchedParentheses(Unmatched::Close)
        );
        assert_eq!(
            compile(abc(), "*a").unwrap_err(),
            Error::MissingOperand { operator: '*' }
        );
        assert!(matches!(
            compile(abc(), "a|").unwrap_err(),
            Error::MissingOperand { .. }
        ));
        assert!(matches!(
            compile(abc(), "a()").unwrap_err(),
            Error::MissingOperand { .. }
        ));
        assert_eq!(
            compile(abc(), "ab\\").unwrap_err(),
            Error::DanglingEscape { offset: 2 }
        );
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(compile("ab".chars(), "()").unwrap_err(), Error::EmptyPattern);
    }

    #[test]
    fn test_paren_errors_not_masked() {
        assert_eq!(
            compile("ab".chars(), "a)b(").unwrap_err(),
            Error::MismatchedParentheses(Unmatched::Close)
        );
    }

    #[test]
    fn test_empty_pattern_matches_empty_string() {
        let dfa = compile("ab".chars(), "").unwrap();
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
        assert!(dfa.matches("anything"));
    }

    #[test]
    fn test_end_marker_follows_every_alternative() {
        let dfa = compile("abc".chars(), "a|bc").unwrap();
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("bc"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn test_dot_is_literal() {
        let dfa = compile("a.".chars(), "a.a").unwrap();
        assert!(dfa.accepts("a.a"));
        assert!(!dfa.accepts("aa"));
    }

    #[test]
    fn test_custom_syntax() {
        use crate::regex::token::Operator;

        let syntax = Syntax::default()
            .with_operator(Operator::new(OperatorKind::Union, '+', 0))
            .with_escape('%');
        let alphabet: Alphabet = "ab|".chars().collect();
        let dfa = Compiler::new(syntax).compile(&alphabet, "a+b%|").unwrap();
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("b|"));
        assert!(!dfa.accepts("b"));
    }
}
