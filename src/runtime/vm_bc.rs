use tracing::{debug, trace};

use crate::bytecode::instructions::read_operand;
use crate::bytecode::{Bytecode, OpCode};
use crate::lang::object::Object;
use crate::runtime::operations;
use crate::runtime::runtime_error::RuntimeError;

/// Default operand stack capacity.
pub const STACK_SIZE: usize = 2048;

#[derive(Debug, Clone)]
pub struct VmConfig {
    pub stack_size: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            stack_size: STACK_SIZE,
        }
    }
}

/// Lifecycle of a [`Vm`]. A VM runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Ready,
    Running,
    Halted,
    Faulted,
}

/// Stack-based bytecode interpreter.
///
/// The operand stack is allocated once with a fixed number of slots; `sp`
/// indexes the next free slot.
pub struct Vm {
    constants: Vec<Object>,
    instructions: Vec<u8>,
    /// Slots below `sp` are always `Some`; slots at or above it are `None`.
    stack: Box<[Option<Object>]>,
    sp: usize,
    state: VmState,
}

impl Vm {
    pub fn new(bytecode: Bytecode) -> Self {
        Self::with_config(bytecode, VmConfig::default())
    }

    pub fn with_config(bytecode: Bytecode, config: VmConfig) -> Self {
        Self {
            constants: bytecode.constants,
            instructions: bytecode.instructions.into_bytes(),
            stack: vec![None; config.stack_size].into_boxed_slice(),
            sp: 0,
            state: VmState::Ready,
        }
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    /// Live portion of the operand stack, bottom first.
    pub fn stack(&self) -> impl Iterator<Item = &Object> {
        self.stack[..self.sp].iter().filter_map(Option::as_ref)
    }

    pub fn stack_top(&self) -> Option<&Object> {
        self.sp
            .checked_sub(1)
            .and_then(|top| self.stack[top].as_ref())
    }

    /// Execute the instruction stream to the end.
    ///
    /// Returns the object left on top of the stack, if any.
    pub fn run(&mut self) -> Result<Option<Object>, RuntimeError> {
        if self.state != VmState::Ready {
            return Err(RuntimeError::InvalidState(self.state));
        }
        self.state = VmState::Running;

        match self.exec() {
            Ok(()) => {
                self.state = VmState::Halted;
                debug!(sp = self.sp, "vm halted");
                Ok(self.stack_top().cloned())
            }
            Err(e) => {
                self.state = VmState::Faulted;
                debug!(error = %e, sp = self.sp, "vm faulted");
                Err(e)
            }
        }
    }

    fn exec(&mut self) -> Result<(), RuntimeError> {
        let mut ip: usize = 0;

        while ip < self.instructions.len() {
            let byte = self.instructions[ip];
            let op = OpCode::try_from(byte).map_err(|_| RuntimeError::UnknownOpcode {
                opcode: byte,
                offset: ip,
            })?;

            trace!(ip, %op, sp = self.sp, "exec");

            match op {
                OpCode::Constant => {
                    let width = op.definition().operand_widths[0];
                    let index = read_operand(&self.instructions, ip + 1, width)
                        .ok_or(RuntimeError::TruncatedInstruction { offset: ip })?;
                    let constant = self.constants.get(index).cloned().ok_or(
                        RuntimeError::ConstantOutOfRange {
                            index,
                            len: self.constants.len(),
                        },
                    )?;
                    self.push(constant)?;
                }

                OpCode::Add => self.binary_op(operations::add)?,
                OpCode::Subtract => self.binary_op(operations::subtract)?,
                OpCode::Multiply => self.binary_op(operations::multiply)?,
                OpCode::Divide => self.binary_op(operations::divide)?,
            }

            ip += op.definition().instruction_len();
        }

        Ok(())
    }

    /// Pop right, then left, and push `f(left, right)`.
    fn binary_op<F>(&mut self, f: F) -> Result<(), RuntimeError>
    where
        F: Fn(&Object, &Object) -> Result<Object, RuntimeError>,
    {
        let right = self.pop()?;
        let left = self.pop()?;
        let result = f(&left, &right)?;
        self.push(result)
    }

    fn push(&mut self, obj: Object) -> Result<(), RuntimeError> {
        if self.sp >= self.stack.len() {
            return Err(RuntimeError::StackOverflow {
                capacity: self.stack.len(),
            });
        }
        self.stack[self.sp] = Some(obj);
        self.sp += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<Object, RuntimeError> {
        if self.sp == 0 {
            return Err(RuntimeError::StackUnderflow);
        }
        self.sp -= 1;
        // Occupied by the slot invariant; the error arm is unreachable.
        self.stack[self.sp]
            .take()
            .ok_or(RuntimeError::StackUnderflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::Instructions;
    use crate::lang::object::ObjectType;

    fn unit(constants: Vec<Object>, ops: &[(OpCode, &[usize])]) -> Bytecode {
        let mut bc = Bytecode::new();
        bc.constants = constants;
        for (op, operands) in ops {
            bc.instructions.push(*op, operands).unwrap();
        }
        bc
    }

    fn run(bc: Bytecode) -> Result<Option<Object>, RuntimeError> {
        Vm::new(bc).run()
    }

    fn n(v: f64) -> Object {
        Object::Number(v)
    }

    #[test]
    fn test_add_chain() {
        let bc = unit(
            vec![n(1.0), n(3.0), n(15.0)],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Add, &[]),
                (OpCode::Constant, &[2]),
                (OpCode::Add, &[]),
            ],
        );
        assert_eq!(run(bc), Ok(Some(n(19.0))));
    }

    #[test]
    fn test_operand_order() {
        // 10 - 4, 10 / 4: left was pushed first
        let sub = unit(
            vec![n(10.0), n(4.0)],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Subtract, &[]),
            ],
        );
        assert_eq!(run(sub), Ok(Some(n(6.0))));

        let div = unit(
            vec![n(10.0), n(4.0)],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Divide, &[]),
            ],
        );
        assert_eq!(run(div), Ok(Some(n(2.5))));
    }

    #[test]
    fn test_empty_program_has_no_result() {
        let mut vm = Vm::new(Bytecode::new());
        assert_eq!(vm.run(), Ok(None));
        assert_eq!(vm.state(), VmState::Halted);
        assert!(vm.stack_top().is_none());
    }

    #[test]
    fn test_statements_stay_on_stack() {
        let bc = unit(
            vec![n(1.0), n(2.0)],
            &[(OpCode::Constant, &[0]), (OpCode::Constant, &[1])],
        );
        let mut vm = Vm::new(bc);
        assert_eq!(vm.run(), Ok(Some(n(2.0))));
        assert_eq!(vm.stack().collect::<Vec<_>>(), vec![&n(1.0), &n(2.0)]);
    }

    #[test]
    fn test_divide_by_zero_faults() {
        let bc = unit(
            vec![n(5.0), n(0.0)],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Divide, &[]),
            ],
        );
        let mut vm = Vm::new(bc);
        assert_eq!(vm.run(), Err(RuntimeError::DivideByZero));
        assert_eq!(vm.state(), VmState::Faulted);
    }

    #[test]
    fn test_type_mismatch_faults() {
        let bc = unit(
            vec![n(1.0), Object::String("a".to_string())],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Multiply, &[]),
            ],
        );
        assert_eq!(
            run(bc),
            Err(RuntimeError::TypeMismatch {
                op: "*",
                left: ObjectType::Number,
                right: ObjectType::String
            })
        );
    }

    #[test]
    fn test_stack_overflow() {
        let ops: Vec<(OpCode, &[usize])> = (0..=STACK_SIZE)
            .map(|_| (OpCode::Constant, &[0usize] as &[usize]))
            .collect();
        let mut vm = Vm::new(unit(vec![n(1.0)], &ops));
        assert_eq!(
            vm.run(),
            Err(RuntimeError::StackOverflow {
                capacity: STACK_SIZE
            })
        );
        assert_eq!(vm.stack().count(), STACK_SIZE);
    }

    #[test]
    fn test_full_stack_is_allowed() {
        let ops: Vec<(OpCode, &[usize])> = (0..STACK_SIZE)
            .map(|_| (OpCode::Constant, &[0usize] as &[usize]))
            .collect();
        assert_eq!(run(unit(vec![n(1.0)], &ops)), Ok(Some(n(1.0))));
    }

    #[test]
    fn test_configured_stack_size() {
        let bc = unit(
            vec![n(1.0)],
            &[(OpCode::Constant, &[0]), (OpCode::Constant, &[0])],
        );
        let mut vm = Vm::with_config(bc, VmConfig { stack_size: 1 });
        assert_eq!(
            vm.run(),
            Err(RuntimeError::StackOverflow { capacity: 1 })
        );
    }

    #[test]
    fn test_stack_underflow() {
        let mut vm = Vm::new(unit(vec![], &[(OpCode::Add, &[])]));
        assert_eq!(vm.run(), Err(RuntimeError::StackUnderflow));

        let mut vm = Vm::new(Bytecode::new());
        assert_eq!(vm.pop(), Err(RuntimeError::StackUnderflow));
    }

    #[test]
    fn test_unknown_opcode() {
        let bc = Bytecode {
            instructions: Instructions::from(vec![0x10, 0xee]),
            constants: vec![],
        };
        // Add runs first and underflows before the bad byte is reached.
        assert_eq!(run(bc), Err(RuntimeError::StackUnderflow));

        let bc = Bytecode {
            instructions: Instructions::from(vec![0x01, 0x00, 0x00, 0xee]),
            constants: vec![n(1.0)],
        };
        let mut vm = Vm::new(bc);
        assert_eq!(
            vm.run(),
            Err(RuntimeError::UnknownOpcode {
                opcode: 0xee,
                offset: 3
            })
        );
        assert_eq!(vm.state(), VmState::Faulted);
        assert_eq!(vm.stack_top(), Some(&n(1.0)));
    }

    #[test]
    fn test_bad_constant_reference() {
        let bc = Bytecode {
            instructions: Instructions::from(vec![0x01, 0x00, 0x05]),
            constants: vec![n(1.0)],
        };
        assert_eq!(
            run(bc),
            Err(RuntimeError::ConstantOutOfRange { index: 5, len: 1 })
        );

        let bc = Bytecode {
            instructions: Instructions::from(vec![0x01, 0x00]),
            constants: vec![n(1.0)],
        };
        assert_eq!(
            run(bc),
            Err(RuntimeError::TruncatedInstruction { offset: 0 })
        );
    }

    #[test]
    fn test_runs_only_once() {
        let mut vm = Vm::new(unit(vec![n(2.0)], &[(OpCode::Constant, &[0])]));
        assert_eq!(vm.run(), Ok(Some(n(2.0))));
        assert_eq!(
            vm.run(),
            Err(RuntimeError::InvalidState(VmState::Halted))
        );
        assert_eq!(vm.stack_top(), Some(&n(2.0)));
    }

    #[test]
    fn test_stack_view_tracks_pops() {
        let bc = unit(
            vec![n(4.0), n(5.0), n(6.0)],
            &[
                (OpCode::Constant, &[0]),
                (OpCode::Constant, &[1]),
                (OpCode::Constant, &[2]),
                (OpCode::Multiply, &[]),
            ],
        );
        let mut vm = Vm::new(bc);
        assert_eq!(vm.run(), Ok(Some(n(30.0))));
        assert_eq!(vm.stack().collect::<Vec<_>>(), vec![&n(4.0), &n(30.0)]);
        assert!(vm.stack[vm.sp..].iter().all(Option::is_none));
    }
}
