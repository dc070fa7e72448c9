use std::fmt;

/// Reserved literal keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    True,
    False,
    Null,
}

/// Operator tokens as delivered by the grammar.
///
/// The set is closed; `lang::builder::parse_op` maps source symbols onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Assign,
    Plus,
    Dash,
    Star,
    Slash,
    Modulo,
    DblStar,
    DblPipe,
    DblAmp,
    Eq,
    Neq,
    GtEq,
    Gt,
    LtEq,
    Lt,
    Amp,
    Pipe,
    Caret,
    DblDot,
    TplDot,
    Bang,
}

impl OpType {
    /// Source symbol this operator was parsed from.
    pub fn symbol(self) -> &'static str {
        match self {
            OpType::Assign => "=",
            OpType::Plus => "+",
            OpType::Dash => "-",
            OpType::Star => "*",
            OpType::Slash => "/",
            OpType::Modulo => "%",
            OpType::DblStar => "**",
            OpType::DblPipe => "||",
            OpType::DblAmp => "&&",
            OpType::Eq => "==",
            OpType::Neq => "!=",
            OpType::GtEq => ">=",
            OpType::Gt => ">",
            OpType::LtEq => "<=",
            OpType::Lt => "<",
            OpType::Amp => "&",
            OpType::Pipe => "|",
            OpType::Caret => "^",
            OpType::DblDot => "..",
            OpType::TplDot => "...",
            OpType::Bang => "!",
        }
    }

    /// Upper-case tag name, e.g. `DBL_STAR`.
    pub fn name(self) -> &'static str {
        match self {
            OpType::Assign => "ASSIGN",
            OpType::Plus => "PLUS",
            OpType::Dash => "DASH",
            OpType::Star => "STAR",
            OpType::Slash => "SLASH",
            OpType::Modulo => "MODULO",
            OpType::DblStar => "DBL_STAR",
            OpType::DblPipe => "DBL_PIPE",
            OpType::DblAmp => "DBL_AMP",
            OpType::Eq => "EQ",
            OpType::Neq => "NEQ",
            OpType::GtEq => "GTEQ",
            OpType::Gt => "GT",
            OpType::LtEq => "LTEQ",
            OpType::Lt => "LT",
            OpType::Amp => "AMP",
            OpType::Pipe => "PIPE",
            OpType::Caret => "CARET",
            OpType::DblDot => "DBL_DOT",
            OpType::TplDot => "TPL_DOT",
            OpType::Bang => "BANG",
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

/// An ordered statement sequence.
///
/// Top-level programs and nested bodies are both blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub nodes: Vec<Node>,
}

/// A `key: value` entry of a map literal.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    pub key: Node,
    pub value: Node,
}

/// One arm of an `if` or `switch`.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub condition: Node,
    pub consequence: Node,
}

/// Postfix modifier attached to a target expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Addendum {
    /// `target.member`
    Member(Ident),
    /// `target(params...)`
    Call(Vec<Node>),
    /// `target[index]`
    Index(Box<Node>),
}

/// Abstract Syntax Tree node.
///
/// Nodes are immutable once built. Every list-valued variant keeps
/// source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // ───────────────────────────── Literals ─────────────────────────────
    Keyword(Keyword),
    Ident(Ident),
    Number(f64),
    String(String),

    // ──────────────────────────── Expressions ───────────────────────────
    /// Binary operator application. Chains nest to the left.
    Infix {
        left: Box<Node>,
        op: OpType,
        right: Box<Node>,
    },
    /// Prefix operator application: `-x`, `!x`.
    Unary { op: OpType, right: Box<Node> },
    Return(Box<Node>),

    /// Member access, call or index applied to `target`.
    ///
    /// `a.b[0]()` nests three deep with the call outermost.
    Postfix {
        target: Box<Node>,
        addendum: Addendum,
    },

    // ──────────────────────────── Structure ─────────────────────────────
    Block(Block),
    /// Parenthesised statement sequence.
    Group(Vec<Node>),
    Function {
        params: Vec<Ident>,
        body: Box<Node>,
    },

    // ───────────────────────────── Collections ──────────────────────────
    Array(Vec<Node>),
    Set(Vec<Node>),
    Map(Vec<KeyValuePair>),

    // ──────────────────────────── Control flow ──────────────────────────
    If(Vec<Case>),
    Switch { test: Block, cases: Vec<Case> },
}

/// Tag of a [`Node`] variant, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Keyword,
    Ident,
    Number,
    String,
    Infix,
    Unary,
    Return,
    Postfix,
    Block,
    Group,
    Function,
    Array,
    Set,
    Map,
    If,
    Switch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Keyword => "KEYWORD",
            NodeKind::Ident => "IDENT",
            NodeKind::Number => "NUMBER",
            NodeKind::String => "STRING",
            NodeKind::Infix => "INFIX",
            NodeKind::Unary => "UNARY",
            NodeKind::Return => "RETURN",
            NodeKind::Postfix => "POSTFIX",
            NodeKind::Block => "BLOCK",
            NodeKind::Group => "GROUP",
            NodeKind::Function => "FUNCTION",
            NodeKind::Array => "ARRAY",
            NodeKind::Set => "SET",
            NodeKind::Map => "MAP",
            NodeKind::If => "IF",
            NodeKind::Switch => "SWITCH",
        };
        write!(f, "{}", name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Keyword(_) => NodeKind::Keyword,
            Node::Ident(_) => NodeKind::Ident,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Infix { .. } => NodeKind::Infix,
            Node::Unary { .. } => NodeKind::Unary,
            Node::Return(_) => NodeKind::Return,
            Node::Postfix { .. } => NodeKind::Postfix,
            Node::Block(_) => NodeKind::Block,
            Node::Group(_) => NodeKind::Group,
            Node::Function { .. } => NodeKind::Function,
            Node::Array(_) => NodeKind::Array,
            Node::Set(_) => NodeKind::Set,
            Node::Map(_) => NodeKind::Map,
            Node::If(_) => NodeKind::If,
            Node::Switch { .. } => NodeKind::Switch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let unary = Node::Unary {
            op: OpType::Dash,
            right: Box::new(Node::Number(1.0)),
        };
        assert_eq!(unary.kind().to_string(), "UNARY");
        assert_eq!(Node::Group(vec![]).kind().to_string(), "GROUP");
        assert_eq!(
            Node::Switch {
                test: Block::default(),
                cases: vec![]
            }
            .kind(),
            NodeKind::Switch
        );
    }

    #[test]
    fn test_op_names() {
        assert_eq!(OpType::DblStar.to_string(), "DBL_STAR");
        assert_eq!(OpType::GtEq.to_string(), "GTEQ");
        assert_eq!(OpType::TplDot.symbol(), "...");
    }
}
