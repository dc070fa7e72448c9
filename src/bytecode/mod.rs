pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod instructions;
pub mod ir;
pub mod op;
pub mod stack_check;

pub use compile::{Compiler, compile};
pub use instructions::Instructions;
pub use ir::Bytecode;
pub use op::OpCode;
