//! Stack-based execution of compiled bytecode.

pub mod operations;
pub mod runtime_error;
pub mod vm_bc;

pub use runtime_error::RuntimeError;
pub use vm_bc::{STACK_SIZE, Vm, VmConfig, VmState};
