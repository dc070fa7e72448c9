//! # Hacc language model
//!
//! AST node types, the reducer that builds them from raw grammar
//! fragments, and the runtime object model shared by the compiler and
//! the virtual machine.

pub mod builder;
pub mod fragment;
pub mod node;
pub mod object;
pub mod reduce_error;
