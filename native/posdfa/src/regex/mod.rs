//! Pattern front end.
//!
//! `pattern -> tokens -> explicit concatenation -> postfix -> attributed syntax tree`

pub mod concat;
pub mod postfix;
pub mod syntax_tree;
pub mod token;

pub use concat::insert_concatenation;
pub use postfix::{render_postfix, to_postfix};
pub use syntax_tree::{NodeId, NodeKind, SyntaxNode, SyntaxTree, Terminal};
pub use token::{Operator, OperatorKind, Syntax, Token, TokenPredicate};
