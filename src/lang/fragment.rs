//! Shapes of the raw tail tuples produced by the grammar.
//!
//! The grammar hands the reducer a head value plus a list of tuples. Only
//! one slot of each tuple carries a payload; the rest held whitespace or
//! punctuation and arrive as [`Discard`].

use super::node::{Case, Ident, KeyValuePair, Node, OpType};

/// A grammar slot whose content the reducer ignores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

/// `<ws> op <ws> operand`
pub type ExpressionTail = (Discard, OpType, Discard, Node);

/// `<ws> , <ws> node`
pub type NodeTail = (Discard, Discard, Discard, Node);

/// `<ws> , <ws> ident`
pub type IdentListTail = (Discard, Discard, Discard, Ident);

/// `<ws> , <ws> key: value`
pub type KeyValuePairTail = (Discard, Discard, Discard, KeyValuePair);

/// `<separator> <ws> statements`
pub type BlockTail = (Discard, Discard, Vec<Node>);

/// `<separator> <ws> case`
pub type CaseBlockTail = (Discard, Discard, Case);
