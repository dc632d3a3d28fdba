//! Primitive conversions (`Conv` ops).
//!
//! Covers every pair among `byte`, `short`, `char`, `int`, `long`, `float`
//! and `double`:
//! - integral narrowing keeps the low-order bits
//! - floating to `int`/`long` rounds toward zero and saturates, `NaN` is 0
//! - floating to `byte`/`short`/`char` converts to `int` first, then narrows
//! - conversions to `float` round to nearest, ties to even

use vouch_ir::PrimitiveType;
use vouch_runtime::Value;

use crate::errors::{Fault, OpResult};

/// Source operand of a conversion, widened to one of two carriers.
#[derive(Copy, Clone)]
enum Source {
    Integral(i64),
    Float(f32),
    Double(f64),
}

impl Source {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(Source::Float(*v)),
            Value::Double(v) => Some(Source::Double(*v)),
            Value::Bool(_) => None,
            other => other.as_i64().map(Source::Integral),
        }
    }
}

/// Convert `value` to `target`.
///
/// Identity conversions (including `boolean` to `boolean`) return the
/// value unchanged; anything else outside the numeric matrix is
/// unsupported.
pub fn convert(value: &Value, target: PrimitiveType) -> OpResult {
    if value.primitive_type() == Some(target) {
        return Ok(value.clone());
    }
    let source = Source::of(value).ok_or(Fault::Unsupported)?;
    convert_numeric(source, target).ok_or(Fault::Unsupported)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "Conv implements the source language's narrowing rules"
)]
fn convert_numeric(source: Source, target: PrimitiveType) -> Option<Value> {
    let value = match target {
        PrimitiveType::Long => Value::Long(match source {
            Source::Integral(v) => v,
            Source::Float(v) => v as i64,
            Source::Double(v) => v as i64,
        }),
        PrimitiveType::Float => Value::Float(match source {
            Source::Integral(v) => v as f32,
            Source::Float(v) => v,
            Source::Double(v) => v as f32,
        }),
        PrimitiveType::Double => Value::Double(match source {
            Source::Integral(v) => v as f64,
            Source::Float(v) => f64::from(v),
            Source::Double(v) => v,
        }),
        PrimitiveType::Int | PrimitiveType::Short | PrimitiveType::Byte | PrimitiveType::Char => {
            let bits = match source {
                Source::Integral(v) => v,
                Source::Float(v) => i64::from(v as i32),
                Source::Double(v) => i64::from(v as i32),
            };
            match target {
                PrimitiveType::Int => Value::Int(bits as i32),
                PrimitiveType::Short => Value::Short(bits as i16),
                PrimitiveType::Byte => Value::Byte(bits as i8),
                _ => Value::Char(bits as u16),
            }
        }
        PrimitiveType::Boolean | PrimitiveType::Void => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integral_narrowing_keeps_low_bits() {
        assert_eq!(convert(&Value::Int(300), PrimitiveType::Byte), Ok(Value::Byte(44)));
        assert_eq!(convert(&Value::Int(-1), PrimitiveType::Char), Ok(Value::Char(0xFFFF)));
        assert_eq!(
            convert(&Value::Long(0x1_0000_0005), PrimitiveType::Int),
            Ok(Value::Int(5))
        );
        assert_eq!(convert(&Value::Char(65), PrimitiveType::Int), Ok(Value::Int(65)));
    }

    #[test]
    fn floating_to_integral_saturates() {
        assert_eq!(convert(&Value::Double(3.9), PrimitiveType::Int), Ok(Value::Int(3)));
        assert_eq!(convert(&Value::Double(-3.9), PrimitiveType::Int), Ok(Value::Int(-3)));
        assert_eq!(
            convert(&Value::Double(1e20), PrimitiveType::Int),
            Ok(Value::Int(i32::MAX))
        );
        assert_eq!(
            convert(&Value::Float(f32::NAN), PrimitiveType::Long),
            Ok(Value::Long(0))
        );
        // through int: 1e10 saturates to i32::MAX, whose low byte is 0xFF
        assert_eq!(convert(&Value::Double(1e10), PrimitiveType::Byte), Ok(Value::Byte(-1)));
    }

    #[test]
    fn widening_is_exact() {
        assert_eq!(convert(&Value::Int(2), PrimitiveType::Double), Ok(Value::Double(2.0)));
        assert_eq!(
            convert(&Value::Float(0.5), PrimitiveType::Double),
            Ok(Value::Double(0.5))
        );
        assert_eq!(convert(&Value::Byte(-2), PrimitiveType::Long), Ok(Value::Long(-2)));
    }

    #[test]
    fn float_narrowing_rounds_to_nearest() {
        assert_eq!(
            convert(&Value::Double(0.1), PrimitiveType::Float),
            Ok(Value::Float(0.1))
        );
        assert_eq!(
            convert(&Value::Long(16_777_217), PrimitiveType::Float),
            Ok(Value::Float(16_777_216.0))
        );
    }

    #[test]
    fn booleans_only_convert_to_themselves() {
        assert_eq!(
            convert(&Value::Bool(true), PrimitiveType::Boolean),
            Ok(Value::Bool(true))
        );
        assert_eq!(convert(&Value::Bool(true), PrimitiveType::Int), Err(Fault::Unsupported));
        assert_eq!(convert(&Value::string("1"), PrimitiveType::Int), Err(Fault::Unsupported));
    }
}
