use crate::bytecode::instructions::{InstructionError, Instructions, read_operand};
use crate::bytecode::op::OpCode;
use crate::bytecode::Bytecode;
use crate::lang::object::{Object, format_number};

/// Decode an instruction stream into one `Mnemonic operand...` line per
/// instruction.
pub fn decompile(instructions: &Instructions) -> Result<String, InstructionError> {
    let bytes = instructions.as_bytes();
    let mut lines = Vec::new();
    let mut ip = 0;

    while ip < bytes.len() {
        let op = OpCode::try_from(bytes[ip])?;
        let def = op.definition();

        let mut line = def.name.to_string();
        let mut offset = ip + 1;
        for &width in def.operand_widths {
            let operand = read_operand(bytes, offset, width)
                .ok_or(InstructionError::Truncated { op, offset: ip })?;
            line.push(' ');
            line.push_str(&operand.to_string());
            offset += width;
        }

        lines.push(line);
        ip = offset;
    }

    Ok(lines.join("\n"))
}

/// List pool entries as `index: TYPE(value)`.
///
/// Only numbers and strings are listed; booleans and null are skipped.
pub fn describe_constants(constants: &[Object]) -> String {
    constants
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            Object::Number(n) => Some(format!("{}: {}({})", i, c.kind(), format_number(*n))),
            Object::String(s) => Some(format!("{}: {}({})", i, c.kind(), s)),
            Object::Boolean(_) | Object::Null => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full listing of a compiled unit: constants first, then instructions.
pub fn disassemble(bc: &Bytecode) -> Result<String, InstructionError> {
    Ok(format!(
        "Constants:\n{}\n\nBytecode:\n{}",
        describe_constants(&bc.constants),
        decompile(&bc.instructions)?
    ))
}
