//! Insertion of the explicit concatenation operator.
//!
//! User patterns leave concatenation implicit (`ab` means `a.b`). Before the shunting-yard
//! pass the operator is made explicit between every pair of adjacent tokens where the
//! first can end an atom and the second can start one.

use crate::regex::token::{Operator, Token, TokenPredicate};

/// Insert `concat` between each adjacent pair `(current, next)` for which
/// `ends_atom(current) && starts_atom(next)`.
///
/// Works on tokens, so an escaped operator is already a literal and never splits here.
pub fn insert_concatenation(
    tokens: &[Token],
    concat: Operator,
    ends_atom: TokenPredicate,
    starts_atom: TokenPredicate,
) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 2);

    for (idx, &token) in tokens.iter().enumerate() {
        result.push(token);
        if let Some(next) = tokens.get(idx + 1) {
            if ends_atom(&token) && starts_atom(next) {
                result.push(Token::Operator(concat));
            }
        }
    }

    result
}
