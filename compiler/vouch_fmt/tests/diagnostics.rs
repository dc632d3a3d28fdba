//! End-to-end diagnostics: quoted predicate in, formatted model out.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use vouch_eval::Evaluator;
use vouch_fmt::{AssertionFormatter, DefaultAssertionFormatter};
use vouch_ir::{
    class_names, BinaryOp, CompareOp, ConstructorRef, FieldRef, IrBuilder, MethodRef,
    PrimitiveType, TypeRef, ValueRef,
};
use vouch_runtime::{ClassDef, ClassRegistry, Quoted, QuotedBuilder, Value};

fn quote(f: impl FnOnce(&mut IrBuilder) -> ValueRef) -> Quoted {
    QuotedBuilder::new().lambda(f)
}

fn diagnostic_in(registry: &ClassRegistry, quoted: &Quoted) -> String {
    let model = Evaluator::new(registry).build(quoted).unwrap();
    DefaultAssertionFormatter::default().format_assertion(&model)
}

fn diagnostic(quoted: &Quoted) -> String {
    diagnostic_in(&ClassRegistry::with_builtins(), quoted)
}

fn int_array(items: &[i32]) -> Value {
    Value::array(TypeRef::INT, items.iter().copied().map(Value::Int).collect())
}

mod arithmetic {
    use super::*;
    use super::assert_eq;

    #[test]
    fn precedence_is_reflected_in_each_line() {
        let quoted = quote(|b| {
            let two = b.constant(2);
            let lhs = b.constant(2);
            let rhs = b.constant(2);
            let product = b.binary(BinaryOp::Mul, lhs, rhs);
            let sum = b.binary(BinaryOp::Add, two, product);
            let six = b.constant(6);
            b.compare(CompareOp::Eq, sum, six)
        });
        assert_eq!(
            diagnostic(&quoted),
            "2 * 2 -> 4\n\
             2 + 2 * 2 -> 6\n\
             2 + 2 * 2 == 6 -> true\n"
        );
    }

    #[test]
    fn division_by_zero_propagates() {
        let quoted = quote(|b| {
            let three = b.constant(3);
            let two = b.constant(2);
            let product = b.binary(BinaryOp::Mul, three, two);
            let zero = b.constant(0);
            let quotient = b.binary(BinaryOp::Div, product, zero);
            let five = b.constant(5);
            b.compare(CompareOp::Ge, quotient, five)
        });
        assert_eq!(
            diagnostic(&quoted),
            "3 * 2 -> 6\n\
             (3 * 2) / 0 -> throws java.lang.ArithmeticException: / by zero\n\
             (3 * 2) / 0 >= 5 -> throws java.lang.ArithmeticException: / by zero\n"
        );
    }

    #[test]
    fn parenthesized_left_operand() {
        let quoted = quote(|b| {
            let three = b.constant(3);
            let two = b.constant(2);
            let product = b.binary(BinaryOp::Mul, three, two);
            let four = b.constant(4);
            let quotient = b.binary(BinaryOp::Div, product, four);
            let one = b.constant(1);
            b.compare(CompareOp::Eq, quotient, one)
        });
        assert_eq!(
            diagnostic(&quoted),
            "3 * 2 -> 6\n\
             (3 * 2) / 4 -> 1\n\
             (3 * 2) / 4 == 1 -> true\n"
        );
    }

    #[test]
    fn static_fields() {
        let quoted = quote(|b| {
            let max = b.field_load(
                None,
                FieldRef::new(TypeRef::class(class_names::INTEGER), "MAX_VALUE", TypeRef::INT),
            );
            let ten = b.constant(10);
            let rem = b.binary(BinaryOp::Mod, max, ten);
            let two = b.constant(2);
            let diff = b.binary(BinaryOp::Sub, rem, two);
            let five = b.constant(5);
            b.compare(CompareOp::Ge, diff, five)
        });
        assert_eq!(
            diagnostic(&quoted),
            "Integer.MAX_VALUE -> 2147483647\n\
             Integer.MAX_VALUE % 10 -> 7\n\
             Integer.MAX_VALUE % 10 - 2 -> 5\n\
             Integer.MAX_VALUE % 10 - 2 >= 5 -> true\n"
        );
    }

    #[test]
    fn bitwise_operators() {
        let quoted = quote(|b| {
            let a = b.constant(0xFF);
            let c = b.constant(0x123);
            let and = b.binary(BinaryOp::And, a, c);
            let d = b.constant(0x3210);
            let or = b.binary(BinaryOp::Or, and, d);
            let x = b.constant(20);
            let y = b.constant(10);
            let xor = b.binary(BinaryOp::Xor, x, y);
            b.compare(CompareOp::Eq, or, xor)
        });
        assert_eq!(
            diagnostic(&quoted),
            "255 & 291 -> 35\n\
             255 & 291 | 12816 -> 12851\n\
             20 ^ 10 -> 30\n\
             (255 & 291 | 12816) == (20 ^ 10) -> false\n"
        );
    }

    #[test]
    fn double_rounding_is_visible() {
        let quoted = quote(|b| {
            let a = b.constant(0.1);
            let c = b.constant(0.2);
            let sum = b.binary(BinaryOp::Add, a, c);
            let d = b.constant(0.3);
            b.compare(CompareOp::Eq, sum, d)
        });
        assert_eq!(
            diagnostic(&quoted),
            "0.1 + 0.2 -> 0.30000000000000004\n\
             0.1 + 0.2 == 0.3 -> false\n"
        );
    }

    #[test]
    fn float_results_carry_suffix() {
        let quoted = quote(|b| {
            let a = b.constant(0.1_f32);
            let c = b.constant(0.2_f32);
            let product = b.binary(BinaryOp::Mul, a, c);
            let d = b.constant(0.02_f32);
            b.compare(CompareOp::Eq, product, d)
        });
        assert_eq!(
            diagnostic(&quoted),
            "0.1F * 0.2F -> 0.020000001F\n\
             0.1F * 0.2F == 0.02F -> false\n"
        );
    }

    #[test]
    fn widening_of_constants_is_not_reported() {
        let quoted = quote(|b| {
            let lhs = b.constant(2.0);
            let two = b.constant(2);
            let widened = b.conv(PrimitiveType::Double, two);
            let sum = b.binary(BinaryOp::Add, lhs, widened);
            let four = b.constant(4);
            let rhs = b.conv(PrimitiveType::Double, four);
            b.compare(CompareOp::Eq, sum, rhs)
        });
        assert_eq!(
            diagnostic(&quoted),
            "2.0 + (double)2 -> 4.0\n\
             2.0 + (double)2 == (double)4 -> true\n"
        );
    }

    #[test]
    fn shifts_print_their_symbols() {
        let quoted = quote(|b| {
            let minus = b.constant(-1);
            let width = b.constant(28);
            let lshr = b.binary(BinaryOp::LShr, minus, width);
            let one = b.constant(1);
            let far = b.constant(33);
            let shl = b.binary(BinaryOp::Shl, one, far);
            let eight = b.constant(8);
            let two = b.constant(2);
            let ashr = b.binary(BinaryOp::AShr, eight, two);
            let sum = b.binary(BinaryOp::Add, shl, ashr);
            b.compare(CompareOp::Eq, lshr, sum)
        });
        assert_eq!(
            diagnostic(&quoted),
            "-1 >>> 28 -> 15\n\
             1 << 33 -> 2\n\
             8 >> 2 -> 2\n\
             (1 << 33) + (8 >> 2) -> 4\n\
             -1 >>> 28 == (1 << 33) + (8 >> 2) -> false\n"
        );
    }

    #[test]
    fn negated_negative_literal_keeps_its_sign() {
        let quoted = quote(|b| {
            let minus = b.constant(-1);
            let neg = b.neg(minus);
            let zero = b.constant(0);
            b.compare(CompareOp::Lt, neg, zero)
        });
        assert_eq!(diagnostic(&quoted), "-(-1) < 0 -> false\n");
    }

    #[test]
    fn constant_predicate_still_reports_itself() {
        let quoted = quote(|b| b.constant(false));
        assert_eq!(diagnostic(&quoted), "false -> false\n");
    }
}

mod variables {
    use super::*;
    use super::assert_eq;

    #[test]
    fn array_local_is_reported_per_load() {
        let mut q = QuotedBuilder::new();
        let x = q.local("x", TypeRef::array_of(TypeRef::INT), int_array(&[1, 2, 3]));
        let quoted = q.lambda(|b| {
            let load = b.var_load(x);
            let one = b.constant(1);
            let element = b.array_load(load, one);
            let load = b.var_load(x);
            let length = b.array_length(load);
            b.compare(CompareOp::Eq, element, length)
        });
        assert_eq!(
            diagnostic(&quoted),
            "x -> [1, 2, 3]\n\
             x[1] -> 2\n\
             x -> [1, 2, 3]\n\
             x.length -> 3\n\
             x[1] == x.length -> false\n"
        );
    }

    #[test]
    fn index_out_of_bounds() {
        let mut q = QuotedBuilder::new();
        let x = q.local("x", TypeRef::array_of(TypeRef::INT), int_array(&[1, 2, 3]));
        let quoted = q.lambda(|b| {
            let load = b.var_load(x);
            let five = b.constant(5);
            let element = b.array_load(load, five);
            let zero = b.constant(0);
            b.compare(CompareOp::Eq, element, zero)
        });
        assert_eq!(
            diagnostic(&quoted),
            "x -> [1, 2, 3]\n\
             x[5] -> throws java.lang.ArrayIndexOutOfBoundsException: Index 5 out of bounds for length 3\n\
             x[5] == 0 -> throws java.lang.ArrayIndexOutOfBoundsException: Index 5 out of bounds for length 3\n"
        );
    }

    #[test]
    fn cast_then_call() {
        let mut q = QuotedBuilder::new();
        let obj = q.local("obj", TypeRef::object(), Value::string("Hello"));
        let quoted = q.lambda(|b| {
            let load = b.var_load(obj);
            let cast = b.cast(TypeRef::string(), load);
            let length = b.invoke_virtual(
                cast,
                MethodRef::new(TypeRef::string(), "length", Vec::new(), TypeRef::INT),
                &[],
            );
            let five = b.constant(5);
            b.compare(CompareOp::Eq, length, five)
        });
        assert_eq!(
            diagnostic(&quoted),
            "obj -> \"Hello\"\n\
             (String)obj -> \"Hello\"\n\
             ((String)obj).length() -> 5\n\
             ((String)obj).length() == 5 -> true\n"
        );
    }

    #[test]
    fn receiver_prints_as_this() {
        let mut q = QuotedBuilder::new();
        let this = q.receiver(TypeRef::string(), Value::string("abc"));
        let quoted = q.lambda(|b| {
            let length = b.invoke_virtual(
                this,
                MethodRef::new(TypeRef::string(), "length", Vec::new(), TypeRef::INT),
                &[],
            );
            let three = b.constant(3);
            b.compare(CompareOp::Eq, length, three)
        });
        assert_eq!(
            diagnostic(&quoted),
            "this -> \"abc\"\n\
             this.length() -> 3\n\
             this.length() == 3 -> true\n"
        );
    }

    #[test]
    fn missing_receiver_is_unsupported() {
        let mut q = QuotedBuilder::new();
        let this = ValueRef::Param(q.param(TypeRef::string()));
        let quoted = q.lambda(|b| {
            let length = b.invoke_virtual(
                this,
                MethodRef::new(TypeRef::string(), "length", Vec::new(), TypeRef::INT),
                &[],
            );
            let three = b.constant(3);
            b.compare(CompareOp::Eq, length, three)
        });
        assert_eq!(
            diagnostic(&quoted),
            "Unsupported node: this (parameter)\n\
             Unsupported node: this.length() (invoke)\n\
             Unsupported node: this.length() == 3 (eq)\n"
        );
    }
}

mod construction {
    use super::*;
    use super::assert_eq;

    #[test]
    fn multi_dimensional_array_is_abbreviated() {
        let quoted = quote(|b| {
            let ten = b.constant(10);
            let five = b.constant(5);
            let array = b.new_array(TypeRef::INT, &[ten, five]);
            let length = b.array_length(array);
            let ten = b.constant(10);
            b.compare(CompareOp::Eq, length, ten)
        });
        assert_eq!(
            diagnostic(&quoted),
            "new int[10][5] -> [[0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], \
             [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], ...]\n\
             new int[10][5].length -> 10\n\
             new int[10][5].length == 10 -> true\n"
        );
    }

    #[test]
    fn list_factory_and_contains() {
        let list = TypeRef::class(class_names::LIST);
        let quoted = quote(|b| {
            let items: Vec<ValueRef> = ["a", "b", "c", "d"]
                .iter()
                .map(|s| b.constant(*s))
                .collect();
            let of_method = MethodRef::new(list.clone(), "of", vec![TypeRef::object(); 4], list.clone());
            let of = b.invoke(of_method, &items);
            let contains =
                MethodRef::new(list.clone(), "contains", vec![TypeRef::object()], TypeRef::BOOLEAN);
            let e = b.constant("e");
            b.invoke_virtual(of, contains, &[e])
        });
        assert_eq!(
            diagnostic(&quoted),
            "List.of(\"a\",\"b\",\"c\",\"d\") -> [\"a\", \"b\", \"c\", \"d\"]\n\
             List.of(\"a\",\"b\",\"c\",\"d\").contains(\"e\") -> false\n"
        );
    }

    #[test]
    fn records_print_their_components() {
        let registry = ClassRegistry::with_builtins();
        registry.register(ClassDef::record(
            "demo.Point",
            &[("x", TypeRef::INT), ("y", TypeRef::INT)],
        ));
        let point = TypeRef::class("demo.Point");
        let quoted = quote(|b| {
            let one = b.constant(1);
            let two = b.constant(2);
            let created = b.new_object(
                ConstructorRef::new(point.clone(), vec![TypeRef::INT, TypeRef::INT]),
                &[one, two],
            );
            let x = b.invoke_virtual(
                created,
                MethodRef::new(point.clone(), "x", Vec::new(), TypeRef::INT),
                &[],
            );
            let two = b.constant(2);
            b.compare(CompareOp::Eq, x, two)
        });
        assert_eq!(
            diagnostic_in(&registry, &quoted),
            "new Point(1,2) -> Point[x=1, y=2]\n\
             new Point(1,2).x() -> 1\n\
             new Point(1,2).x() == 2 -> false\n"
        );
    }
}

mod statics {
    use super::*;
    use super::assert_eq;

    #[test]
    fn inherited_members_print_the_declaring_class() {
        let registry = ClassRegistry::with_builtins();
        registry.register(
            ClassDef::new("demo.Limits")
                .static_field("MAX", Value::Int(3))
                .static_method("clamp", 1, |args| match args {
                    [Value::Int(n)] => Ok(Value::Int((*n).min(3))),
                    _ => Ok(Value::Null),
                }),
        );
        registry.register(ClassDef::new("demo.StrictLimits").extends("demo.Limits"));
        let strict = TypeRef::class("demo.StrictLimits");
        let quoted = quote(|b| {
            let ten = b.constant(10);
            let clamped = b.invoke(
                MethodRef::new(strict.clone(), "clamp", vec![TypeRef::INT], TypeRef::INT),
                &[ten],
            );
            let max = b.field_load(None, FieldRef::new(strict, "MAX", TypeRef::INT));
            b.compare(CompareOp::Lt, clamped, max)
        });
        assert_eq!(
            diagnostic_in(&registry, &quoted),
            "Limits.clamp(10) -> 3\n\
             Limits.MAX -> 3\n\
             Limits.clamp(10) < Limits.MAX -> false\n"
        );
    }
}

mod conditionals {
    use super::*;
    use super::assert_eq;

    #[test]
    fn or_stops_at_first_true_operand() {
        let quoted = quote(|b| {
            let lhs = b.body(|b| {
                let two = b.constant(2);
                let three = b.constant(3);
                b.compare(CompareOp::Lt, two, three)
            });
            let rhs = b.body(|b| {
                let four = b.constant(4);
                let five = b.constant(5);
                b.compare(CompareOp::Gt, four, five)
            });
            b.cond_or(vec![lhs, rhs])
        });
        assert_eq!(
            diagnostic(&quoted),
            "2 < 3 -> true\n\
             2 < 3 || 4 > 5 -> true\n"
        );
    }

    #[test]
    fn and_never_reaches_the_trap() {
        let quoted = quote(|b| {
            let lhs = b.body(|b| {
                let two = b.constant(2);
                let three = b.constant(3);
                b.compare(CompareOp::Gt, two, three)
            });
            let rhs = b.body(|b| {
                let one = b.constant(1);
                let zero = b.constant(0);
                let quotient = b.binary(BinaryOp::Div, one, zero);
                let zero = b.constant(0);
                b.compare(CompareOp::Eq, quotient, zero)
            });
            b.cond_and(vec![lhs, rhs])
        });
        assert_eq!(
            diagnostic(&quoted),
            "2 > 3 -> false\n\
             2 > 3 && 1 / 0 == 0 -> false\n"
        );
    }

    #[test]
    fn non_lambda_root_is_unsupported() {
        let mut b = IrBuilder::new();
        let root = b.constant(true);
        let root = root.op().unwrap();
        let quoted = Quoted::new(b.finish(), root, Default::default());
        assert_eq!(diagnostic(&quoted), "Unsupported node: true (constant)\n");
    }
}
