//! Tests for binary and comparison operators.

use crate::errors::Fault;
use crate::operators::{evaluate_binary, evaluate_compare, values_equal};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vouch_ir::{BinaryOp, CompareOp};
use vouch_runtime::Value;

fn throw_message(result: Result<Value, Fault>) -> String {
    match result {
        Err(Fault::Throw(thrown)) => thrown.to_string(),
        other => panic!("expected a throw, got {other:?}"),
    }
}

mod arithmetic {
    use super::*;
    use super::assert_eq;

    #[test]
    fn int_operations_wrap() {
        assert_eq!(
            evaluate_binary(&Value::Int(i32::MAX), &Value::Int(1), BinaryOp::Add).unwrap(),
            Value::Int(i32::MIN)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(i32::MAX), &Value::Int(10), BinaryOp::Mod).unwrap(),
            Value::Int(7)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(i32::MIN), &Value::Int(-1), BinaryOp::Div).unwrap(),
            Value::Int(i32::MIN)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(-7), &Value::Int(2), BinaryOp::Div).unwrap(),
            Value::Int(-3)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(-7), &Value::Int(2), BinaryOp::Mod).unwrap(),
            Value::Int(-1)
        );
    }

    #[test]
    fn integer_division_by_zero_throws() {
        assert_eq!(
            throw_message(evaluate_binary(&Value::Int(6), &Value::Int(0), BinaryOp::Div)),
            "java.lang.ArithmeticException: / by zero"
        );
        assert_eq!(
            throw_message(evaluate_binary(&Value::Long(6), &Value::Long(0), BinaryOp::Mod)),
            "java.lang.ArithmeticException: / by zero"
        );
    }

    #[test]
    fn floating_division_by_zero_follows_ieee() {
        assert_eq!(
            evaluate_binary(&Value::Double(1.0), &Value::Double(0.0), BinaryOp::Div).unwrap(),
            Value::Double(f64::INFINITY)
        );
        assert_eq!(
            evaluate_binary(&Value::Float(0.0), &Value::Float(0.0), BinaryOp::Div).unwrap(),
            Value::Float(f32::NAN)
        );
    }

    #[test]
    fn double_results_keep_rounding_error() {
        assert_eq!(
            evaluate_binary(&Value::Double(0.1), &Value::Double(0.2), BinaryOp::Add).unwrap(),
            Value::Double(0.300_000_000_000_000_04)
        );
        assert_eq!(
            evaluate_binary(&Value::Double(0.1), &Value::Double(0.2), BinaryOp::Mod).unwrap(),
            Value::Double(0.1)
        );
    }

    #[test]
    fn mixed_kinds_are_unsupported() {
        assert_eq!(
            evaluate_binary(&Value::Int(1), &Value::Long(1), BinaryOp::Add),
            Err(Fault::Unsupported)
        );
        assert_eq!(
            evaluate_binary(&Value::Double(1.0), &Value::Double(1.0), BinaryOp::And),
            Err(Fault::Unsupported)
        );
        assert_eq!(
            evaluate_binary(&Value::string("a"), &Value::string("b"), BinaryOp::Add),
            Err(Fault::Unsupported)
        );
    }
}

mod bitwise {
    use super::*;
    use super::assert_eq;

    #[test]
    fn int_bitwise() {
        assert_eq!(
            evaluate_binary(&Value::Int(255), &Value::Int(291), BinaryOp::And).unwrap(),
            Value::Int(35)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(35), &Value::Int(12816), BinaryOp::Or).unwrap(),
            Value::Int(12851)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(20), &Value::Int(10), BinaryOp::Xor).unwrap(),
            Value::Int(30)
        );
    }

    #[test]
    fn boolean_logical_operators() {
        assert_eq!(
            evaluate_binary(&Value::Bool(true), &Value::Bool(false), BinaryOp::Or).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            evaluate_binary(&Value::Bool(true), &Value::Bool(true), BinaryOp::Xor).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn shifts_mask_the_amount() {
        assert_eq!(
            evaluate_binary(&Value::Int(1), &Value::Int(33), BinaryOp::Shl).unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            evaluate_binary(&Value::Long(1), &Value::Int(65), BinaryOp::Shl).unwrap(),
            Value::Long(2)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(1), &Value::Long(32), BinaryOp::Shl).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(-8), &Value::Int(1), BinaryOp::AShr).unwrap(),
            Value::Int(-4)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(-1), &Value::Int(28), BinaryOp::LShr).unwrap(),
            Value::Int(15)
        );
        assert_eq!(
            evaluate_binary(&Value::Long(-1), &Value::Char(60), BinaryOp::LShr).unwrap(),
            Value::Long(15)
        );
    }

    #[test]
    fn shifts_need_integral_operands() {
        assert_eq!(
            evaluate_binary(&Value::Double(1.0), &Value::Int(1), BinaryOp::Shl),
            Err(Fault::Unsupported)
        );
        assert_eq!(
            evaluate_binary(&Value::Int(1), &Value::Float(1.0), BinaryOp::Shl),
            Err(Fault::Unsupported)
        );
    }
}

mod comparison {
    use super::*;
    use super::assert_eq;

    #[test]
    fn relational_promotes_to_wider_kind() {
        assert_eq!(
            evaluate_compare(&Value::Int(2), &Value::Long(3), CompareOp::Lt).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            evaluate_compare(&Value::Char(97), &Value::Int(97), CompareOp::Ge).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            evaluate_compare(&Value::Int(2), &Value::Double(2.5), CompareOp::Gt).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn nan_is_unordered() {
        for op in [CompareOp::Lt, CompareOp::Le, CompareOp::Gt, CompareOp::Ge, CompareOp::Eq] {
            assert_eq!(
                evaluate_compare(&Value::Double(f64::NAN), &Value::Double(f64::NAN), op).unwrap(),
                Value::Bool(false),
                "{op:?}"
            );
        }
        assert_eq!(
            evaluate_compare(&Value::Double(f64::NAN), &Value::Double(f64::NAN), CompareOp::Neq)
                .unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn relational_on_references_is_unsupported() {
        assert_eq!(
            evaluate_compare(&Value::string("a"), &Value::string("b"), CompareOp::Lt),
            Err(Fault::Unsupported)
        );
        assert_eq!(
            evaluate_compare(&Value::Bool(true), &Value::Bool(false), CompareOp::Gt),
            Err(Fault::Unsupported)
        );
    }

    #[test]
    fn equality() {
        assert!(values_equal(&Value::Int(4), &Value::Long(4)));
        assert!(values_equal(&Value::Double(0.0), &Value::Double(-0.0)));
        assert!(values_equal(&Value::Int(2), &Value::Double(2.0)));
        assert!(values_equal(&Value::string("a"), &Value::string("a")));
        assert!(!values_equal(&Value::string("1"), &Value::Int(1)));
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Bool(true), &Value::Int(1)));
    }
}

proptest! {
    #[test]
    fn int_add_matches_wrapping(a: i32, b: i32) {
        prop_assert_eq!(
            evaluate_binary(&Value::Int(a), &Value::Int(b), BinaryOp::Add).unwrap(),
            Value::Int(a.wrapping_add(b))
        );
    }

    #[test]
    fn shift_amount_is_periodic(a: i32, n in 0_i32..32) {
        prop_assert_eq!(
            evaluate_binary(&Value::Int(a), &Value::Int(n), BinaryOp::Shl).unwrap(),
            evaluate_binary(&Value::Int(a), &Value::Int(n + 32), BinaryOp::Shl).unwrap()
        );
    }

    #[test]
    fn lt_and_ge_are_complementary(a: i64, b: i64) {
        let lt = evaluate_compare(&Value::Long(a), &Value::Long(b), CompareOp::Lt).unwrap();
        let ge = evaluate_compare(&Value::Long(a), &Value::Long(b), CompareOp::Ge).unwrap();
        prop_assert_eq!(lt.as_bool().map(|v| !v), ge.as_bool());
    }
}
