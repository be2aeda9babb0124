//! Attributed syntax tree: nullable, firstpos, lastpos and followpos.
//!
//! The tree is built from a postfix token stream by a stack machine and stored in an
//! arena. Children are always allocated before their parents, so walking the arena in
//! index order is a post-order traversal, which is what the followpos pass needs. No step
//! recurses, so pattern nesting depth is bounded only by memory.

use crate::automaton::{Position, PositionSet};
use crate::error::{Error, Result, Unmatched};
use crate::regex::token::{Operator, OperatorKind, Token};

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// What a leaf stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Symbol(char),
    /// The synthetic marker appended to the pattern; reaching it means a full match.
    EndMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf { terminal: Terminal, position: Position },
    Union(NodeId, NodeId),
    Concat(NodeId, NodeId),
    Star(NodeId),
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub nullable: bool,
    pub firstpos: PositionSet,
    pub lastpos: PositionSet,
}

/// A syntax tree with per-node position attributes and a per-position followpos table.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
    /// Leaf node of each position.
    leaves: Vec<NodeId>,
    followpos: Vec<PositionSet>,
    end_marker: Option<Position>,
    empty: PositionSet,
}

impl SyntaxTree {
    /// Build the tree from a postfix token stream and compute all attributes.
    ///
    /// Positions are handed out in the order leaves appear in `postfix`.
    pub fn from_postfix(postfix: &[Token]) -> Result<Self> {
        let width = postfix
            .iter()
            .filter(|t| matches!(t, Token::Literal(_) | Token::EndMarker))
            .count();

        let mut nodes: Vec<SyntaxNode> = Vec::with_capacity(postfix.len());
        let mut leaves: Vec<NodeId> = Vec::with_capacity(width);
        let mut stack: Vec<NodeId> = Vec::new();
        let mut end_marker = None;

        for token in postfix {
            let node = match *token {
                Token::Literal(c) => {
                    Self::leaf(Terminal::Symbol(c), &mut leaves, nodes.len(), width)
                }
                Token::EndMarker => {
                    end_marker = Some(leaves.len() as Position);
                    Self::leaf(Terminal::EndMarker, &mut leaves, nodes.len(), width)
                }
                Token::Operator(op) => match op.kind {
                    OperatorKind::Union => {
                        let (left, right) = pop_pair(&mut stack, op)?;
                        union(&nodes, left, right)
                    }
                    OperatorKind::Concat => {
                        let (left, right) = pop_pair(&mut stack, op)?;
                        concat(&nodes, left, right)
                    }
                    OperatorKind::Star => {
                        let child = stack
                            .pop()
                            .ok_or(Error::MissingOperand { operator: op.symbol })?;
                        star(&nodes, child)
                    }
                },
                // Parentheses never survive the rewriter.
                Token::LeftParen => return Err(Error::MismatchedParentheses(Unmatched::Open)),
                Token::RightParen => return Err(Error::MismatchedParentheses(Unmatched::Close)),
            };
            nodes.push(node);
            stack.push(nodes.len() - 1);
        }

        let root = match stack.as_slice() {
            [root] => *root,
            [] => return Err(Error::EmptyPattern),
            rest => return Err(Error::DanglingOperands { count: rest.len() }),
        };

        let followpos = compute_followpos(&nodes, width);

        Ok(Self {
            nodes,
            root,
            leaves,
            followpos,
            end_marker,
            empty: PositionSet::default(),
        })
    }

    fn leaf(terminal: Terminal, leaves: &mut Vec<NodeId>, id: NodeId, width: usize) -> SyntaxNode {
        let position = leaves.len() as Position;
        leaves.push(id);
        SyntaxNode {
            kind: NodeKind::Leaf { terminal, position },
            nullable: false,
            firstpos: PositionSet::singleton(position, width),
            lastpos: PositionSet::singleton(position, width),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.nodes[self.root]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id)
    }

    /// All nodes in post-order.
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    /// Number of leaf positions.
    pub fn len_positions(&self) -> usize {
        self.leaves.len()
    }

    /// The terminal at `position`.
    pub fn terminal(&self, position: Position) -> Option<Terminal> {
        let id = *self.leaves.get(position as usize)?;
        match self.nodes[id].kind {
            NodeKind::Leaf { terminal, .. } => Some(terminal),
            _ => None,
        }
    }

    /// The followpos set of `position`. Positions outside the tree have an empty set.
    pub fn followpos(&self, position: Position) -> &PositionSet {
        self.followpos.get(position as usize).unwrap_or(&self.empty)
    }

    /// Position of the end-marker leaf, if the pattern has one.
    pub fn end_marker(&self) -> Option<Position> {
        self.end_marker
    }
}

fn pop_pair(stack: &mut Vec<NodeId>, op: Operator) -> Result<(NodeId, NodeId)> {
    let missing = Error::MissingOperand { operator: op.symbol };
    let right = stack.pop().ok_or_else(|| missing.clone())?;
    let left = stack.pop().ok_or(missing)?;
    Ok((left, right))
}

fn union(nodes: &[SyntaxNode], left: NodeId, right: NodeId) -> SyntaxNode {
    let (l, r) = (&nodes[left], &nodes[right]);
    SyntaxNode {
        kind: NodeKind::Union(left, right),
        nullable: l.nullable || r.nullable,
        firstpos: l.firstpos.union(&r.firstpos),
        lastpos: l.lastpos.union(&r.lastpos),
    }
}

fn concat(nodes: &[SyntaxNode], left: NodeId, right: NodeId) -> SyntaxNode {
    let (l, r) = (&nodes[left], &nodes[right]);
    SyntaxNode {
        kind: NodeKind::Concat(left, right),
        nullable: l.nullable && r.nullable,
        firstpos: if l.nullable {
            l.firstpos.union(&r.firstpos)
        } else {
            l.firstpos.clone()
        },
        lastpos: if r.nullable {
            l.lastpos.union(&r.lastpos)
        } else {
            r.lastpos.clone()
        },
    }
}

fn star(nodes: &[SyntaxNode], child: NodeId) -> SyntaxNode {
    let c = &nodes[child];
    SyntaxNode {
        kind: NodeKind::Star(child),
        nullable: true,
        firstpos: c.firstpos.clone(),
        lastpos: c.lastpos.clone(),
    }
}

/// Post-order pass over the arena.
///
/// For `l.r`, everything in `firstpos(r)` can follow each position in `lastpos(l)`.
/// For `n*`, everything in `firstpos(n)` can follow each position in `lastpos(n)`.
fn compute_followpos(nodes: &[SyntaxNode], width: usize) -> Vec<PositionSet> {
    let mut followpos = vec![PositionSet::with_capacity(width); width];

    for node in nodes {
        match node.kind {
            NodeKind::Concat(left, right) => {
                for p in nodes[left].lastpos.iter() {
                    followpos[p as usize].union_with(&nodes[right].firstpos);
                }
            }
            NodeKind::Star(_) => {
                for p in node.lastpos.iter() {
                    followpos[p as usize].union_with(&node.firstpos);
                }
            }
            NodeKind::Leaf { .. } | NodeKind::Union(..) => {}
        }
    }

    followpos
}
