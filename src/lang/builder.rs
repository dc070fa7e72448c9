//! Reduction of raw grammar fragments into AST nodes.
//!
//! Each grammar rule hands its matched pieces to one of these functions.
//! Chains arrive as a head plus an ordered tail; the builders fold them
//! left to right with plain loops so long operator chains and big literal
//! lists never grow the call stack.
//!
//! Precedence is already encoded by the grammar's nesting. The reducer only
//! ever folds one precedence level at a time.

use std::str::FromStr;

use super::fragment::{
    BlockTail, CaseBlockTail, ExpressionTail, IdentListTail, KeyValuePairTail, NodeTail,
};
use super::node::{Addendum, Block, Case, Ident, KeyValuePair, Keyword, Node, OpType};
use super::reduce_error::ReduceError;

impl FromStr for Keyword {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Keyword::True),
            "false" => Ok(Keyword::False),
            "null" => Ok(Keyword::Null),
            other => Err(ReduceError::UnknownKeyword(other.to_string())),
        }
    }
}

impl FromStr for OpType {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "=" => OpType::Assign,
            "+" => OpType::Plus,
            "-" => OpType::Dash,
            "*" => OpType::Star,
            "/" => OpType::Slash,
            "%" => OpType::Modulo,
            "**" => OpType::DblStar,
            "||" => OpType::DblPipe,
            "&&" => OpType::DblAmp,
            "==" => OpType::Eq,
            "!=" => OpType::Neq,
            ">=" => OpType::GtEq,
            ">" => OpType::Gt,
            "<=" => OpType::LtEq,
            "<" => OpType::Lt,
            "&" => OpType::Amp,
            "|" => OpType::Pipe,
            "^" => OpType::Caret,
            ".." => OpType::DblDot,
            "..." => OpType::TplDot,
            "!" => OpType::Bang,
            other => return Err(ReduceError::UnknownOperator(other.to_string())),
        })
    }
}

/// Map an operator symbol to its [`OpType`].
pub fn parse_op(symbol: &str) -> Result<OpType, ReduceError> {
    symbol.parse()
}

// ───────────────────────────── Literals ─────────────────────────────

pub fn new_keyword(text: &str) -> Result<Node, ReduceError> {
    Ok(Node::Keyword(text.parse()?))
}

/// Numeric literal. Text that is not a valid float becomes NaN.
pub fn parse_number(text: &str) -> Node {
    Node::Number(text.trim().parse().unwrap_or(f64::NAN))
}

pub fn new_string(value: impl Into<String>) -> Node {
    Node::String(value.into())
}

pub fn new_ident(name: impl Into<String>) -> Ident {
    Ident { name: name.into() }
}

// ──────────────────────────── Expressions ───────────────────────────

pub fn new_unary(op: OpType, right: Node) -> Node {
    Node::Unary {
        op,
        right: Box::new(right),
    }
}

pub fn new_return(node: Node) -> Node {
    Node::Return(Box::new(node))
}

/// Fold `head (op operand)*` into left-nested infix nodes.
///
/// An empty tail returns `head` untouched.
pub fn new_infix(head: Node, tail: Vec<ExpressionTail>) -> Node {
    tail.into_iter().fold(head, |left, (_, op, _, right)| Node::Infix {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

/// Wrap `target` with each addendum in source order.
///
/// The first addendum ends up innermost; an empty list returns `target`.
pub fn new_postfix(target: Node, addendums: Vec<Addendum>) -> Node {
    addendums.into_iter().fold(target, |target, addendum| Node::Postfix {
        target: Box::new(target),
        addendum,
    })
}

pub fn new_member(member: Ident) -> Addendum {
    Addendum::Member(member)
}

pub fn new_call(params: Option<Vec<Node>>) -> Addendum {
    Addendum::Call(params.unwrap_or_default())
}

pub fn new_index(index: Node) -> Addendum {
    Addendum::Index(Box::new(index))
}

// ─────────────────────────────── Lists ──────────────────────────────

pub fn new_node_list(head: Node, tail: Vec<NodeTail>) -> Vec<Node> {
    prepend(head, tail.into_iter().map(|(_, _, _, node)| node))
}

pub fn new_ident_list(head: Ident, tail: Vec<IdentListTail>) -> Vec<Ident> {
    prepend(head, tail.into_iter().map(|(_, _, _, ident)| ident))
}

pub fn new_key_value_pair(key: Node, value: Node) -> KeyValuePair {
    KeyValuePair { key, value }
}

pub fn new_key_value_pair_list(
    head: KeyValuePair,
    tail: Vec<KeyValuePairTail>,
) -> Vec<KeyValuePair> {
    prepend(head, tail.into_iter().map(|(_, _, _, pair)| pair))
}

fn prepend<T>(head: T, rest: impl Iterator<Item = T>) -> Vec<T> {
    let mut items = Vec::with_capacity(1 + rest.size_hint().0);
    items.push(head);
    items.extend(rest);
    items
}

// ──────────────────────────── Structure ─────────────────────────────

/// Start from `top` and append each tail group's statements, one level flat.
pub fn new_block(top: Vec<Node>, body: Vec<BlockTail>) -> Block {
    let mut nodes = top;
    for (_, _, group) in body {
        nodes.extend(group);
    }
    Block { nodes }
}

/// Re-tag a block's statements as a parenthesised group.
pub fn new_group(block: Block) -> Node {
    Node::Group(block.nodes)
}

pub fn new_func_literal(params: Option<Vec<Ident>>, body: Node) -> Node {
    Node::Function {
        params: params.unwrap_or_default(),
        body: Box::new(body),
    }
}

pub fn new_array_literal(nodes: Option<Vec<Node>>) -> Node {
    Node::Array(nodes.unwrap_or_default())
}

pub fn new_set_literal(nodes: Option<Vec<Node>>) -> Node {
    Node::Set(nodes.unwrap_or_default())
}

pub fn new_map_literal(pairs: Option<Vec<KeyValuePair>>) -> Node {
    Node::Map(pairs.unwrap_or_default())
}

// ──────────────────────────── Control flow ──────────────────────────

pub fn new_case(condition: Node, consequence: Node) -> Case {
    Case {
        condition,
        consequence,
    }
}

pub fn new_case_block(head: Case, tail: Vec<CaseBlockTail>) -> Vec<Case> {
    prepend(head, tail.into_iter().map(|(_, _, case)| case))
}

pub fn new_if(cases: Vec<Case>) -> Node {
    Node::If(cases)
}

pub fn new_switch(test: Block, cases: Vec<Case>) -> Node {
    Node::Switch { test, cases }
}
