use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value in the Hacc language.
///
/// Objects are what the constant pool stores and what the VM moves around
/// on its operand stack. They are immutable; arithmetic always produces a
/// fresh object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Object {
    /// 64-bit floating-point number.
    Number(f64),

    /// UTF-8 string value.
    String(String),

    Boolean(bool),

    Null,
}

/// Tag of an [`Object`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Number,
    String,
    Boolean,
    Null,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Number => "NUMBER",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
        };
        write!(f, "{}", name)
    }
}

impl Object {
    pub fn kind(&self) -> ObjectType {
        match self {
            Object::Number(_) => ObjectType::Number,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
        }
    }
}

impl fmt::Display for Object {
    /// Inspection format: strings quoted, booleans and null upper-case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(n) => write!(f, "{}", format_number(*n)),
            Object::String(s) => write!(f, "\"{}\"", s),
            Object::Boolean(true) => write!(f, "TRUE"),
            Object::Boolean(false) => write!(f, "FALSE"),
            Object::Null => write!(f, "NULL"),
        }
    }
}

/// Render a number the way the language prints it.
///
/// Integral values drop the fraction (`19`, not `19.0`), negative zero
/// prints as `0`, and magnitudes from `1e21` up or below `1e-6` switch to
/// exponent form with a signed exponent (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    let abs = n.abs();
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if abs >= 1e21 || abs < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else {
        n.to_string()
    }
}
