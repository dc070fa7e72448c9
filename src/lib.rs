//! # Hacc
//!
//! A small compiled-language core: typed AST reduction, a bytecode
//! compiler with a compact binary instruction format, and a stack-based
//! virtual machine.
//!
//! ```text
//! grammar fragments ─► lang::builder ─► Block ─► bytecode::compile ─► Bytecode ─► runtime::Vm
//! ```

pub mod bytecode;
pub mod lang;
pub mod runtime;

use thiserror::Error;

use crate::bytecode::compile_error::CompileError;
use crate::lang::node::Block;
use crate::lang::object::Object;
use crate::runtime::{RuntimeError, Vm};

/// Any failure of the compile-and-run pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Compile `block` and execute it on a fresh VM.
///
/// Returns the object left on top of the operand stack, if any.
pub fn compile_and_run(block: &Block) -> Result<Option<Object>, Error> {
    let bytecode = bytecode::compile(block)?;
    Ok(Vm::new(bytecode).run()?)
}
