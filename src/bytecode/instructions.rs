use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bytecode::op::OpCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    #[error("unknown opcode 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("{op} expects {expected} operand(s), got {found}")]
    OperandCount {
        op: OpCode,
        expected: usize,
        found: usize,
    },

    #[error("operand {operand} of {op} does not fit in {width} byte(s)")]
    OperandOverflow {
        op: OpCode,
        operand: usize,
        width: usize,
    },

    #[error("{op} at offset {offset} is missing operand bytes")]
    Truncated { op: OpCode, offset: usize },
}

/// Encode one instruction: opcode byte, then each operand big-endian in
/// its declared width.
pub fn make(op: OpCode, operands: &[usize]) -> Result<Vec<u8>, InstructionError> {
    let def = op.definition();

    if operands.len() != def.operand_widths.len() {
        return Err(InstructionError::OperandCount {
            op,
            expected: def.operand_widths.len(),
            found: operands.len(),
        });
    }

    let mut bytes = Vec::with_capacity(def.instruction_len());
    bytes.push(op as u8);

    for (&operand, &width) in operands.iter().zip(def.operand_widths) {
        if width < std::mem::size_of::<usize>() && operand >> (8 * width) != 0 {
            return Err(InstructionError::OperandOverflow {
                op,
                operand,
                width,
            });
        }
        for shift in (0..width).rev() {
            bytes.push((operand >> (8 * shift)) as u8);
        }
    }

    Ok(bytes)
}

/// Read a `width`-byte big-endian operand starting at `offset`.
///
/// Returns `None` if the stream ends first.
pub fn read_operand(bytes: &[u8], offset: usize, width: usize) -> Option<usize> {
    let end = offset.checked_add(width)?;
    let field = bytes.get(offset..end)?;
    Some(
        field
            .iter()
            .fold(0usize, |acc, &byte| (acc << 8) | byte as usize),
    )
}

/// Growable instruction byte stream.
///
/// Only the written prefix is ever visible; spare capacity stays hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructions {
    bytes: Vec<u8>,
}

impl Instructions {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one encoded instruction. Returns the offset it starts at.
    ///
    /// Nothing is written when encoding fails.
    pub fn push(&mut self, op: OpCode, operands: &[usize]) -> Result<usize, InstructionError> {
        let encoded = make(op, operands)?;
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(&encoded);
        Ok(offset)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Instructions {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
