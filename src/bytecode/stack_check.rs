//! Static validation of a compiled unit.
//!
//! A single linear pass over the instruction bytes. There are no jumps, so
//! the stack height at every instruction is known exactly.

use thiserror::Error;

use crate::bytecode::Bytecode;
use crate::bytecode::instructions::{InstructionError, read_operand};
use crate::bytecode::op::OpCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackCheckError {
    #[error("stack-check error: {0}")]
    Decode(#[from] InstructionError),

    #[error(
        "stack-check error: constant index {index} at offset {offset} is outside the pool of {len}"
    )]
    ConstantOutOfRange {
        offset: usize,
        index: usize,
        len: usize,
    },

    #[error("stack-check error: stack underflow at offset {offset}, {op} needs {needed} items")]
    Underflow {
        offset: usize,
        op: OpCode,
        needed: usize,
    },
}

/// Stack heights observed by [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackProfile {
    pub max_depth: usize,
    pub final_depth: usize,
}

/// Returns (pops, pushes) for an opcode.
fn effect(op: OpCode) -> (usize, usize) {
    match op {
        OpCode::Constant => (0, 1),
        OpCode::Add | OpCode::Subtract | OpCode::Multiply | OpCode::Divide => (2, 1),
    }
}

/// Decode every instruction, check constant references and simulate the
/// stack height from empty.
pub fn check(bc: &Bytecode) -> Result<StackProfile, StackCheckError> {
    let bytes = bc.instructions.as_bytes();
    let mut ip = 0;
    let mut height = 0usize;
    let mut max_depth = 0usize;

    while ip < bytes.len() {
        let op = OpCode::try_from(bytes[ip])?;
        let def = op.definition();

        if op == OpCode::Constant {
            let index = read_operand(bytes, ip + 1, def.operand_widths[0])
                .ok_or(InstructionError::Truncated { op, offset: ip })?;
            if index >= bc.constants.len() {
                return Err(StackCheckError::ConstantOutOfRange {
                    offset: ip,
                    index,
                    len: bc.constants.len(),
                });
            }
        } else if ip + def.instruction_len() > bytes.len() {
            return Err(InstructionError::Truncated { op, offset: ip }.into());
        }

        let (pops, pushes) = effect(op);
        height = height
            .checked_sub(pops)
            .ok_or(StackCheckError::Underflow {
                offset: ip,
                op,
                needed: pops,
            })?;
        height += pushes;
        max_depth = max_depth.max(height);

        ip += def.instruction_len();
    }

    Ok(StackProfile {
        max_depth,
        final_depth: height,
    })
}
