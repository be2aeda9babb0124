//! Pattern tokens, operator table, and the tokenizer.

use crate::error::{Error, Result};
use std::fmt;

/// The three regular operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Union,
    Concat,
    Star,
}

/// An operator together with its textual symbol and binding priority.
///
/// Higher priority binds tighter. Equal priorities associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    pub kind: OperatorKind,
    pub symbol: char,
    pub priority: u8,
}

impl Operator {
    pub const fn new(kind: OperatorKind, symbol: char, priority: u8) -> Self {
        Self {
            kind,
            symbol,
            priority,
        }
    }
}

/// Default union operator: `|`, lowest priority.
pub const UNION: Operator = Operator::new(OperatorKind::Union, '|', 0);
/// Default concatenation operator: `.`, inserted implicitly.
pub const CONCAT: Operator = Operator::new(OperatorKind::Concat, '.', 1);
/// Default Kleene star: `*`, highest priority.
pub const STAR: Operator = Operator::new(OperatorKind::Star, '*', 2);

/// A lexical unit of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol to be matched literally.
    Literal(char),
    /// The synthetic end-of-pattern marker; its position accepts.
    EndMarker,
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    /// The operator kind, if this is an operator token.
    pub fn operator_kind(&self) -> Option<OperatorKind> {
        match self {
            Token::Operator(op) => Some(op.kind),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{c}"),
            Token::EndMarker => f.write_str("#"),
            Token::Operator(op) => write!(f, "{}", op.symbol),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// A token predicate, used to decide where implicit concatenation goes.
pub type TokenPredicate = fn(&Token) -> bool;

/// Default "may end an atom" test: literals, `)`, a star, or the end marker.
pub fn default_ends_atom(token: &Token) -> bool {
    match token {
        Token::Literal(_) | Token::EndMarker | Token::RightParen => true,
        Token::Operator(op) => op.kind == OperatorKind::Star,
        Token::LeftParen => false,
    }
}

/// Default "may start an atom" test: literals, `(`, or the end marker.
pub fn default_starts_atom(token: &Token) -> bool {
    matches!(token, Token::Literal(_) | Token::EndMarker | Token::LeftParen)
}

/// Pattern syntax configuration.
///
/// The default recognises `|` and `*` as operators, `(`/`)` for grouping, and `\` as the
/// escape character. Concatenation is implicit: `.` is an ordinary literal unless
/// [`Syntax::with_explicit_concatenation`] is used.
#[derive(Clone)]
pub struct Syntax {
    union: Operator,
    concat: Operator,
    star: Operator,
    escape: char,
    explicit_concat: bool,
    ends_atom: TokenPredicate,
    starts_atom: TokenPredicate,
}

impl fmt::Debug for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syntax")
            .field("union", &self.union)
            .field("concat", &self.concat)
            .field("star", &self.star)
            .field("escape", &self.escape)
            .field("explicit_concat", &self.explicit_concat)
            .finish_non_exhaustive()
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            union: UNION,
            concat: CONCAT,
            star: STAR,
            escape: '\\',
            explicit_concat: false,
            ends_atom: default_ends_atom,
            starts_atom: default_starts_atom,
        }
    }
}

impl Syntax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the operator of the same kind.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        match operator.kind {
            OperatorKind::Union => self.union = operator,
            OperatorKind::Concat => self.concat = operator,
            OperatorKind::Star => self.star = operator,
        }
        self
    }

    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Recognise the concatenation symbol in pattern text instead of treating it as a literal.
    pub fn with_explicit_concatenation(mut self) -> Self {
        self.explicit_concat = true;
        self
    }

    /// Replace the predicates that decide where implicit concatenation is inserted.
    pub fn with_atom_predicates(
        mut self,
        ends_atom: TokenPredicate,
        starts_atom: TokenPredicate,
    ) -> Self {
        self.ends_atom = ends_atom;
        self.starts_atom = starts_atom;
        self
    }

    pub fn operator(&self, kind: OperatorKind) -> Operator {
        match kind {
            OperatorKind::Union => self.union,
            OperatorKind::Concat => self.concat,
            OperatorKind::Star => self.star,
        }
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    pub fn ends_atom(&self) -> TokenPredicate {
        self.ends_atom
    }

    pub fn starts_atom(&self) -> TokenPredicate {
        self.starts_atom
    }

    /// Whether `c` has a special meaning when it appears unescaped.
    pub fn is_meta(&self, c: char) -> bool {
        c == self.escape || c == '(' || c == ')' || self.visible_operator(c).is_some()
    }

    fn visible_operator(&self, c: char) -> Option<Operator> {
        if c == self.union.symbol {
            Some(self.union)
        } else if c == self.star.symbol {
            Some(self.star)
        } else if self.explicit_concat && c == self.concat.symbol {
            Some(self.concat)
        } else {
            None
        }
    }

    /// Split a pattern into tokens.
    ///
    /// The escape character followed by any character yields that character as a literal.
    /// A trailing lone escape is an error.
    pub fn tokenize(&self, pattern: &str) -> Result<Vec<Token>> {
        Ok(self
            .tokenize_with_offsets(pattern)?
            .into_iter()
            .map(|(_, token)| token)
            .collect())
    }

    /// Like [`Syntax::tokenize`], pairing each token with the character offset it starts at.
    pub fn tokenize_with_offsets(&self, pattern: &str) -> Result<Vec<(usize, Token)>> {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars().enumerate();

        while let Some((offset, c)) = chars.next() {
            let token = if c == self.escape {
                match chars.next() {
                    Some((_, escaped)) => Token::Literal(escaped),
                    None => return Err(Error::DanglingEscape { offset }),
                }
            } else if c == '(' {
                Token::LeftParen
            } else if c == ')' {
                Token::RightParen
            } else if let Some(op) = self.visible_operator(c) {
                Token::Operator(op)
            } else {
                Token::Literal(c)
            };
            tokens.push((offset, token));
        }

        Ok(tokens)
    }
}
