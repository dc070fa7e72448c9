use thiserror::Error;

use crate::bytecode::instructions::InstructionError;
use crate::lang::node::{NodeKind, OpType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A node kind the bytecode compiler has no lowering for.
    #[error("compile error: cannot compile '{0}' node")]
    UnsupportedNode(NodeKind),

    /// An infix operator with no matching opcode.
    #[error("compile error: no instruction for operator '{}' ({0})", .0.symbol())]
    UnsupportedOperator(OpType),

    /// The constant pool outgrew what a CONSTANT operand can address.
    #[error("compile error: constant index {index} exceeds the pool limit of {max}")]
    ConstantPoolOverflow { index: usize, max: usize },

    /// Internal encoding failure; the compiler emitted a malformed instruction.
    #[error("compile error: {0}")]
    Encoding(#[from] InstructionError),
}
