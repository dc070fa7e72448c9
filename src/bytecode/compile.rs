use tracing::{debug, trace};

use crate::{
    bytecode::{Bytecode, OpCode, compile_error::CompileError},
    lang::{
        node::{Block, Node, OpType},
        object::Object,
    },
};

/// Highest pool index a CONSTANT operand can encode.
pub const MAX_CONSTANT_INDEX: usize = u16::MAX as usize;

/// Pending step of the compiler's tree walk.
enum Work<'a> {
    Visit(&'a Node),
    /// Emitted once both operands have been compiled.
    Operator(OpType),
}

/// Tree-walking code generator.
///
/// Lowers literals to CONSTANT loads and the four arithmetic infix
/// operators to their opcodes. Every other node kind is rejected.
pub struct Compiler {
    /// Output bytecode
    bytecode: Bytecode,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            bytecode: Bytecode::new(),
        }
    }

    pub fn compile(mut self, block: &Block) -> Result<Bytecode, CompileError> {
        self.compile_nodes(&block.nodes)?;

        debug!(
            bytes = self.bytecode.instructions.len(),
            constants = self.bytecode.constants.len(),
            "compiled block"
        );

        Ok(self.bytecode)
    }

    /// Statements are compiled back to back. Nothing is popped between
    /// them, so each statement's value stays on the stack.
    fn compile_nodes(&mut self, nodes: &[Node]) -> Result<(), CompileError> {
        for node in nodes {
            self.compile_node(node)?;
        }
        Ok(())
    }

    /// Walks `root` with an explicit work list instead of recursion, so the
    /// depth of an operator chain never reaches the call stack.
    fn compile_node(&mut self, root: &Node) -> Result<(), CompileError> {
        let mut work = vec![Work::Visit(root)];

        while let Some(item) = work.pop() {
            let node = match item {
                Work::Visit(node) => node,
                Work::Operator(op) => {
                    let opcode = arithmetic_opcode(op)?;
                    self.emit(opcode, &[])?;
                    continue;
                }
            };

            match node {
                Node::Block(block) => work.extend(block.nodes.iter().rev().map(Work::Visit)),

                // Popped in order: left, right, then the operator.
                Node::Infix { left, op, right } => {
                    work.push(Work::Operator(*op));
                    work.push(Work::Visit(right));
                    work.push(Work::Visit(left));
                }

                Node::Number(n) => self.emit_constant(Object::Number(*n))?,
                Node::String(s) => self.emit_constant(Object::String(s.clone()))?,

                Node::Keyword(_)
                | Node::Ident(_)
                | Node::Unary { .. }
                | Node::Return(_)
                | Node::Postfix { .. }
                | Node::Group(_)
                | Node::Function { .. }
                | Node::Array(_)
                | Node::Set(_)
                | Node::Map(_)
                | Node::If(_)
                | Node::Switch { .. } => return Err(CompileError::UnsupportedNode(node.kind())),
            }
        }

        Ok(())
    }

    fn emit_constant(&mut self, obj: Object) -> Result<(), CompileError> {
        let index = self.add_constant(obj)?;
        self.emit(OpCode::Constant, &[index])
    }

    fn add_constant(&mut self, obj: Object) -> Result<usize, CompileError> {
        let index = self.bytecode.constants.len();
        if index > MAX_CONSTANT_INDEX {
            return Err(CompileError::ConstantPoolOverflow {
                index,
                max: MAX_CONSTANT_INDEX,
            });
        }
        self.bytecode.constants.push(obj);
        Ok(index)
    }

    fn emit(&mut self, op: OpCode, operands: &[usize]) -> Result<(), CompileError> {
        let offset = self.bytecode.instructions.push(op, operands)?;
        trace!(offset, %op, ?operands, "emit");
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn arithmetic_opcode(op: OpType) -> Result<OpCode, CompileError> {
    match op {
        OpType::Plus => Ok(OpCode::Add),
        OpType::Dash => Ok(OpCode::Subtract),
        OpType::Star => Ok(OpCode::Multiply),
        OpType::Slash => Ok(OpCode::Divide),
        other => Err(CompileError::UnsupportedOperator(other)),
    }
}

/// Compile a block into a fresh [`Bytecode`] unit.
pub fn compile(block: &Block) -> Result<Bytecode, CompileError> {
    Compiler::new().compile(block)
}
