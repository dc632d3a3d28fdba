//! Binary and comparison operator implementations.
//!
//! Dispatch is a match on the operand pair. Arithmetic applies only when
//! both sides already have the same kind (`int`, `long`, `float`,
//! `double`): the quoting front-end inserts explicit `Conv` ops for binary
//! numeric promotion, so a mixed pair means an op shape we do not model.

use vouch_ir::{BinaryOp, CompareOp};
use vouch_runtime::{division_by_zero, Value};

use crate::errors::{Fault, OpResult};

/// Evaluate an arithmetic, bitwise or shift operator.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    if op.is_shift() {
        return evaluate_shift(left, right, op);
    }
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Long(a), Value::Long(b)) => eval_long_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Double(a), Value::Double(b)) => eval_double_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        _ => Err(Fault::Unsupported),
    }
}

/// 32-bit two's complement arithmetic; overflow wraps.
fn eval_int_binary(a: i32, b: i32, op: BinaryOp) -> OpResult {
    let value = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div if b == 0 => return Err(division_by_zero().into()),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if b == 0 => return Err(division_by_zero().into()),
        BinaryOp::Mod => a.wrapping_rem(b),
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
        BinaryOp::Shl | BinaryOp::AShr | BinaryOp::LShr => return Err(Fault::Unsupported),
    };
    Ok(Value::Int(value))
}

/// 64-bit two's complement arithmetic; overflow wraps.
fn eval_long_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    let value = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div if b == 0 => return Err(division_by_zero().into()),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if b == 0 => return Err(division_by_zero().into()),
        BinaryOp::Mod => a.wrapping_rem(b),
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
        BinaryOp::Shl | BinaryOp::AShr | BinaryOp::LShr => return Err(Fault::Unsupported),
    };
    Ok(Value::Long(value))
}

/// IEEE-754 single precision. `%` is the truncating remainder, like `fmod`.
fn eval_float_binary(a: f32, b: f32, op: BinaryOp) -> OpResult {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => return Err(Fault::Unsupported),
    };
    Ok(Value::Float(value))
}

fn eval_double_binary(a: f64, b: f64, op: BinaryOp) -> OpResult {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => return Err(Fault::Unsupported),
    };
    Ok(Value::Double(value))
}

/// Non-short-circuit `&`, `|`, `^` on booleans.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> OpResult {
    let value = match op {
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
        _ => return Err(Fault::Unsupported),
    };
    Ok(Value::Bool(value))
}

/// Shifts on an `int` or `long` left operand.
///
/// The amount may be any integral kind and is masked to the operand width
/// (`& 31` or `& 63`).
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = ">>> reinterprets the bits as unsigned"
)]
fn evaluate_shift(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    let amount = right.as_i64().ok_or(Fault::Unsupported)?;
    match left {
        Value::Int(a) => {
            let n = shift_amount(amount, 31);
            Ok(Value::Int(match op {
                BinaryOp::Shl => *a << n,
                BinaryOp::AShr => *a >> n,
                _ => ((*a as u32) >> n) as i32,
            }))
        }
        Value::Long(a) => {
            let n = shift_amount(amount, 63);
            Ok(Value::Long(match op {
                BinaryOp::Shl => *a << n,
                BinaryOp::AShr => *a >> n,
                _ => ((*a as u64) >> n) as i64,
            }))
        }
        _ => Err(Fault::Unsupported),
    }
}

#[inline]
fn shift_amount(amount: i64, mask: i64) -> u32 {
    u32::try_from(amount & mask).unwrap_or(0)
}

/// Evaluate `==`, `!=`, `<`, `<=`, `>`, `>=`.
///
/// Relational operators need two numeric operands and compare in `f64`
/// when either side is floating, in `i64` otherwise. `NaN` is unordered,
/// so every relational test against it is `false`.
pub fn evaluate_compare(left: &Value, right: &Value, op: CompareOp) -> OpResult {
    if op.is_equality() {
        let equal = values_equal(left, right);
        return Ok(Value::Bool(if op == CompareOp::Eq { equal } else { !equal }));
    }
    if !is_numeric(left) || !is_numeric(right) {
        return Err(Fault::Unsupported);
    }
    let result = if is_floating(left) || is_floating(right) {
        let (a, b) = left.as_f64().zip(right.as_f64()).ok_or(Fault::Unsupported)?;
        relate(a, b, op)
    } else {
        let (a, b) = left.as_i64().zip(right.as_i64()).ok_or(Fault::Unsupported)?;
        relate(a, b, op)
    };
    Ok(Value::Bool(result))
}

/// Equality as `==` sees it.
///
/// Two numeric primitives are promoted to the wider kind and compared by
/// value (`NaN != NaN`, `0.0 == -0.0`). Everything else goes through
/// `Value`'s `equals` semantics.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if is_numeric(left) && is_numeric(right) {
        if is_floating(left) || is_floating(right) {
            if let Some((a, b)) = left.as_f64().zip(right.as_f64()) {
                return relate(a, b, CompareOp::Eq);
            }
        } else if let Some((a, b)) = left.as_i64().zip(right.as_i64()) {
            return a == b;
        }
    }
    left == right
}

fn relate<T: PartialOrd>(a: T, b: T, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Neq => a != b,
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}

fn is_numeric(value: &Value) -> bool {
    matches!(
        value,
        Value::Byte(_)
            | Value::Short(_)
            | Value::Char(_)
            | Value::Int(_)
            | Value::Long(_)
            | Value::Float(_)
            | Value::Double(_)
    )
}

fn is_floating(value: &Value) -> bool {
    matches!(value, Value::Float(_) | Value::Double(_))
}
