use std::fmt;

use crate::bytecode::instructions::InstructionError;

// =============================================================================
// OPCODE - one-byte instruction tags
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // constants
    /// Push a constant from the pool: `CONSTANT <index:u16>`
    Constant = 0x01,

    // arithmetic ( left right -- result )
    Add = 0x10,
    Subtract = 0x11,
    Divide = 0x12,
    Multiply = 0x13,
}

/// Static description of an opcode: mnemonic plus operand byte widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition {
    pub name: &'static str,
    pub operand_widths: &'static [usize],
}

impl Definition {
    /// Total encoded length, opcode byte included.
    pub fn instruction_len(&self) -> usize {
        1 + self.operand_widths.iter().sum::<usize>()
    }
}

const CONSTANT: Definition = Definition {
    name: "Constant",
    operand_widths: &[2],
};
const ADD: Definition = Definition {
    name: "Add",
    operand_widths: &[],
};
const SUBTRACT: Definition = Definition {
    name: "Subtract",
    operand_widths: &[],
};
const MULTIPLY: Definition = Definition {
    name: "Multiply",
    operand_widths: &[],
};
const DIVIDE: Definition = Definition {
    name: "Divide",
    operand_widths: &[],
};

impl OpCode {
    pub fn definition(self) -> &'static Definition {
        match self {
            OpCode::Constant => &CONSTANT,
            OpCode::Add => &ADD,
            OpCode::Subtract => &SUBTRACT,
            OpCode::Multiply => &MULTIPLY,
            OpCode::Divide => &DIVIDE,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = InstructionError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(OpCode::Constant),
            0x10 => Ok(OpCode::Add),
            0x11 => Ok(OpCode::Subtract),
            0x12 => Ok(OpCode::Divide),
            0x13 => Ok(OpCode::Multiply),
            other => Err(InstructionError::UnknownOpcode(other)),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition().name)
    }
}

/// Look up the definition for a raw opcode byte.
pub fn lookup(byte: u8) -> Result<&'static Definition, InstructionError> {
    Ok(OpCode::try_from(byte)?.definition())
}
