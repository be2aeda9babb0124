//! Infix to postfix conversion (shunting-yard).

use crate::error::{Error, Result, Unmatched};
use crate::regex::token::{OperatorKind, Syntax, Token};

/// Convert an infix token stream with explicit concatenation into postfix order.
///
/// An incoming operator first pops every stacked operator of priority greater than or
/// equal to its own, which makes equal priorities left-associative.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Literal(_) | Token::EndMarker => output.push(token),
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(Error::MismatchedParentheses(Unmatched::Close)),
                }
            },
            Token::Operator(incoming) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if top.priority < incoming.priority {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(token);
            }
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(Error::MismatchedParentheses(Unmatched::Open));
        }
        output.push(token);
    }

    log::trace!("postfix: {} tokens in, {} out", tokens.len(), output.len());
    Ok(output)
}

/// Render tokens as text.
///
/// Literals that would otherwise read as syntax (metacharacters, the concatenation symbol,
/// and `#`) are escaped. Only meant for diagnostics.
pub fn render_postfix(tokens: &[Token], syntax: &Syntax) -> String {
    let concat = syntax.operator(OperatorKind::Concat).symbol;
    let mut text = String::with_capacity(tokens.len());
    for token in tokens {
        if let Token::Literal(c) = *token {
            if syntax.is_meta(c) || c == concat || c == '#' {
                text.push(syntax.escape());
            }
        }
        text.push_str(&token.to_string());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(infix: &str) -> Result<String> {
        let syntax = Syntax::default().with_explicit_concatenation();
        let tokens = syntax.tokenize(infix)?;
        Ok(render_postfix(&to_postfix(&tokens)?, &syntax))
    }

    #[test]
    fn test_textbook_conversion() {
        let result = postfix("a.(a|b)*.(a|b)").unwrap();
        assert_eq!(result, "aab|*.ab|.");
        assert!(result.ends_with('.'));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("a|b.c").unwrap(), "abc.|");
        assert_eq!(postfix("a.b|c").unwrap(), "ab.c|");
        assert_eq!(postfix("a.b*").unwrap(), "ab*.");
        assert_eq!(postfix("(a|b).c").unwrap(), "ab|c.");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(postfix("a.b.c").unwrap(), "ab.c.");
        assert_eq!(postfix("a|b|c").unwrap(), "ab|c|");
    }

    #[test]
    fn test_single_token() {
        assert_eq!(postfix("a").unwrap(), "a");
        assert_eq!(postfix("").unwrap(), "");
    }

    #[test]
    fn test_escaped_operators_are_operands() {
        assert_eq!(postfix(r"\|.\*").unwrap(), r"\|\*.");
    }

    #[test]
    fn test_unmatched_close_paren() {
        assert_eq!(
            postfix("a)"),
            Err(Error::MismatchedParentheses(Unmatched::Close))
        );
        assert_eq!(
            postfix("(a|b))*"),
            Err(Error::MismatchedParentheses(Unmatched::Close))
        );
    }

    #[test]
    fn test_unclosed_open_paren() {
        assert_eq!(
            postfix("(a|b"),
            Err(Error::MismatchedParentheses(Unmatched::Open))
        );
    }

    #[test]
    fn test_no_state_between_calls() {
        assert!(postfix("((a").is_err());
        assert_eq!(postfix("a|b").unwrap(), "ab|");
    }
}
