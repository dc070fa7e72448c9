use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bytecode::instructions::Instructions;
use crate::lang::object::Object;

#[derive(Debug, Error)]
#[error("bytecode serialization failed: {0}")]
pub struct BytecodeError(#[from] postcard::Error);

/// A compiled unit: instruction stream plus its constant pool.
///
/// Instructions refer to constants by their position in `constants`.
/// The pool is append-only and never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bytecode {
    pub instructions: Instructions,
    pub constants: Vec<Object>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self {
            instructions: Instructions::new(),
            constants: Vec::new(),
        }
    }

    /// Serialize the whole unit with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BytecodeError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BytecodeError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::op::OpCode;

    #[test]
    fn test_serialized_unit_reloads() {
        let mut bc = Bytecode::new();
        bc.constants.push(Object::Number(1.5));
        bc.constants.push(Object::String("hi".to_string()));
        bc.constants.push(Object::Null);
        bc.instructions.push(OpCode::Constant, &[0]).unwrap();
        bc.instructions.push(OpCode::Constant, &[1]).unwrap();
        bc.instructions.push(OpCode::Add, &[]).unwrap();

        let bytes = bc.to_bytes().unwrap();
        assert_eq!(Bytecode::from_bytes(&bytes).unwrap(), bc);
    }

    #[test]
    fn test_garbage_fails_to_load() {
        assert!(Bytecode::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}
