use thiserror::Error;

use crate::lang::object::ObjectType;
use crate::runtime::vm_bc::VmState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("runtime error: cannot perform '{op}' operation between {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: ObjectType,
        right: ObjectType,
    },

    #[error("runtime error: division by zero")]
    DivideByZero,

    #[error("runtime error: unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("runtime error: stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    #[error("runtime error: attempted to pop from an empty stack")]
    StackUnderflow,

    #[error("runtime error: constant index {index} is outside the pool of {len}")]
    ConstantOutOfRange { index: usize, len: usize },

    #[error("runtime error: instruction at offset {offset} is missing operand bytes")]
    TruncatedInstruction { offset: usize },

    #[error("runtime error: vm cannot run from state {0:?}")]
    InvalidState(VmState),
}

impl RuntimeError {
    pub fn type_mismatch(op: &'static str, left: ObjectType, right: ObjectType) -> Self {
        RuntimeError::TypeMismatch { op, left, right }
    }
}
