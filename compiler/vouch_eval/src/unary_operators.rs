//! Unary operator implementations.

use vouch_ir::UnaryOp;
use vouch_runtime::Value;

use crate::errors::{Fault, OpResult};

/// Evaluate `-x` or `!x`.
///
/// Negation is defined on `int`, `long`, `float` and `double` (integer
/// negation of the minimum value wraps to itself); `!` only on `boolean`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> OpResult {
    match (op, value) {
        (UnaryOp::Neg, Value::Int(v)) => Ok(Value::Int(v.wrapping_neg())),
        (UnaryOp::Neg, Value::Long(v)) => Ok(Value::Long(v.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
        (UnaryOp::Neg, Value::Double(v)) => Ok(Value::Double(-v)),
        (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
        _ => Err(Fault::Unsupported),
    }
}
