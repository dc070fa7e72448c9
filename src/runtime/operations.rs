//! Arithmetic over runtime objects.
//!
//! Each operation takes the left and right operands by reference and
//! returns a new object.

use crate::lang::object::Object;
use crate::runtime::runtime_error::RuntimeError;

/// Number + Number adds, String + String concatenates.
pub fn add(left: &Object, right: &Object) -> Result<Object, RuntimeError> {
    match (left, right) {
        (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a + b)),
        (Object::String(a), Object::String(b)) => Ok(Object::String(format!("{}{}", a, b))),
        _ => Err(RuntimeError::type_mismatch("+", left.kind(), right.kind())),
    }
}

pub fn subtract(left: &Object, right: &Object) -> Result<Object, RuntimeError> {
    match (left, right) {
        (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a - b)),
        _ => Err(RuntimeError::type_mismatch("-", left.kind(), right.kind())),
    }
}

pub fn multiply(left: &Object, right: &Object) -> Result<Object, RuntimeError> {
    match (left, right) {
        (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a * b)),
        _ => Err(RuntimeError::type_mismatch("*", left.kind(), right.kind())),
    }
}

/// Fails with `DivideByZero` before dividing when the divisor is zero.
pub fn divide(left: &Object, right: &Object) -> Result<Object, RuntimeError> {
    match (left, right) {
        (Object::Number(_), Object::Number(b)) if *b == 0.0 => Err(RuntimeError::DivideByZero),
        (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a / b)),
        _ => Err(RuntimeError::type_mismatch("/", left.kind(), right.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::object::ObjectType;

    fn n(v: f64) -> Object {
        Object::Number(v)
    }

    fn s(v: &str) -> Object {
        Object::String(v.to_string())
    }

    #[test]
    fn test_number_arithmetic() {
        assert_eq!(add(&n(1.0), &n(2.0)), Ok(n(3.0)));
        assert_eq!(subtract(&n(1.0), &n(2.0)), Ok(n(-1.0)));
        assert_eq!(multiply(&n(1.5), &n(2.0)), Ok(n(3.0)));
        assert_eq!(divide(&n(9.0), &n(2.0)), Ok(n(4.5)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(add(&s("a"), &s("b")), Ok(s("ab")));
        assert_eq!(add(&s(""), &s("")), Ok(s("")));
    }

    #[test]
    fn test_mixed_operands_mismatch() {
        let err = add(&s("a"), &n(1.0)).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::TypeMismatch {
                op: "+",
                left: ObjectType::String,
                right: ObjectType::Number
            }
        );
        assert_eq!(
            err.to_string(),
            "runtime error: cannot perform '+' operation between STRING and NUMBER"
        );
    }

    #[test]
    fn test_strings_only_add() {
        assert!(matches!(
            subtract(&s("a"), &s("b")),
            Err(RuntimeError::TypeMismatch { op: "-", .. })
        ));
        assert!(matches!(
            multiply(&s("a"), &s("b")),
            Err(RuntimeError::TypeMismatch { op: "*", .. })
        ));
        assert!(matches!(
            divide(&Object::Null, &Object::Boolean(true)),
            Err(RuntimeError::TypeMismatch { op: "/", .. })
        ));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(&n(5.0), &n(0.0)), Err(RuntimeError::DivideByZero));
        assert_eq!(divide(&n(5.0), &n(-0.0)), Err(RuntimeError::DivideByZero));
        assert_eq!(divide(&n(0.0), &n(5.0)), Ok(n(0.0)));
    }

    #[test]
    fn test_zero_check_only_for_numbers() {
        assert!(matches!(
            divide(&s("x"), &n(0.0)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }
}
