use std::any::Any;
use std::fmt;

use pretty_assertions::assert_eq;
use vouch_ir::TypeRef;
use vouch_runtime::{HostObject, RecordObject, Throwable, Value};

use super::{DefaultValueFormatter, ValueFormatter};

fn format(value: &Value) -> String {
    DefaultValueFormatter::default().format(value)
}

/// Host object with a fixed `toString()`.
#[derive(Debug)]
struct Text(&'static str);

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl HostObject for Text {
    fn class_name(&self) -> &str {
        "demo.Text"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

mod scalars {
    use super::*;
    use super::assert_eq;

    #[test]
    fn integers() {
        assert_eq!(format(&Value::Int(0)), "0");
        assert_eq!(format(&Value::Int(i32::MAX)), "2147483647");
        assert_eq!(format(&Value::Int(i32::MIN)), "-2147483648");
        assert_eq!(format(&Value::Byte(-7)), "-7");
        assert_eq!(format(&Value::Short(300)), "300");
        assert_eq!(format(&Value::Long(42)), "42L");
    }

    #[test]
    fn floating_point() {
        assert_eq!(format(&Value::Float(0.0)), "0.0F");
        assert_eq!(format(&Value::Float(0.1)), "0.1F");
        assert_eq!(format(&Value::Double(0.0)), "0.0");
        assert_eq!(format(&Value::Double(0.1 + 0.2)), "0.30000000000000004");
        assert_eq!(format(&Value::Double(1e10)), "1.0E10");
    }

    #[test]
    fn special_floating_point_values_use_constant_names() {
        assert_eq!(format(&Value::Double(f64::NEG_INFINITY)), "Double.NEGATIVE_INFINITY");
        assert_eq!(format(&Value::Double(f64::INFINITY)), "Double.POSITIVE_INFINITY");
        assert_eq!(format(&Value::Double(f64::NAN)), "Double.NaN");
        assert_eq!(format(&Value::Float(f32::NEG_INFINITY)), "Float.NEGATIVE_INFINITY");
        assert_eq!(format(&Value::Float(f32::INFINITY)), "Float.POSITIVE_INFINITY");
        assert_eq!(format(&Value::Float(f32::NAN)), "Float.NaN");
    }

    #[test]
    fn booleans_and_null() {
        assert_eq!(format(&Value::Bool(true)), "true");
        assert_eq!(format(&Value::Bool(false)), "false");
        assert_eq!(format(&Value::Null), "null");
    }

    #[test]
    fn chars() {
        assert_eq!(format(&Value::char('a')), "'a'");
        assert_eq!(format(&Value::char('\'')), "'\\''");
        assert_eq!(format(&Value::char('\n')), "'\\n'");
        assert_eq!(format(&Value::char('\u{7}')), "'\\u0007'");
    }
}

mod strings {
    use super::*;
    use super::assert_eq;

    #[test]
    fn quoted_and_escaped() {
        assert_eq!(format(&Value::string("")), "\"\"");
        assert_eq!(format(&Value::string("hello")), "\"hello\"");
        assert_eq!(format(&Value::string("\u{1}")), "\"\\u0001\"");
        assert_eq!(
            format(&Value::string("Hello\n\rWorld!")),
            "\"Hello\\n\\rWorld!\""
        );
        assert_eq!(
            format(&Value::string("\\\u{c}\t\u{8}'\"")),
            "\"\\\\\\f\\t\\b\\'\\\"\""
        );
    }

    #[test]
    fn long_strings_are_abbreviated() {
        let long = "Very long string! ".repeat(9);
        assert_eq!(
            format(&Value::string(long.trim_end())),
            "\"Very long string! Very long string! Very long string! Very long string! \
             Very long string! Very long...\""
        );
    }

    #[test]
    fn string_exactly_at_budget_is_not_marked() {
        let exact = "x".repeat(99);
        assert_eq!(format(&Value::string(exact.as_str())), format!("\"{exact}\""));
    }

    #[test]
    fn short_hint_still_leaves_ten_characters() {
        let formatter = DefaultValueFormatter::new(3);
        assert_eq!(
            formatter.format(&Value::string("abcdefghijklmnop")),
            "\"abcdefghij...\""
        );
    }
}

mod sequences {
    use super::*;
    use super::assert_eq;

    #[test]
    fn maps_render_as_entry_collections() {
        assert_eq!(format(&Value::map(Vec::new())), "[]");
        assert_eq!(
            format(&Value::map(vec![(Value::Int(1), Value::string("two"))])),
            "[1=two]"
        );
        assert_eq!(
            format(&Value::map(vec![
                (Value::Int(1), Value::string("two")),
                (Value::Int(2), Value::string("four")),
            ])),
            "[1=two, 2=four]"
        );
    }

    #[test]
    fn arrays_render_their_elements() {
        assert_eq!(format(&Value::array(TypeRef::object(), Vec::new())), "[]");
        assert_eq!(format(&Value::array(TypeRef::object(), vec![Value::Null])), "[null]");
        assert_eq!(
            format(&Value::array(TypeRef::INT, vec![Value::Int(1), Value::Int(2), Value::Int(3)])),
            "[1, 2, 3]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::BOOLEAN, vec![Value::Bool(true), Value::Bool(false)])),
            "[true, false]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::BYTE, vec![Value::Byte(1), Value::Byte(2)])),
            "[1, 2]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::SHORT, vec![Value::Short(1), Value::Short(2)])),
            "[1, 2]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::LONG, vec![Value::Long(1), Value::Long(2)])),
            "[1L, 2L]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::FLOAT, vec![Value::Float(1.0), Value::Float(2.0)])),
            "[1.0F, 2.0F]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::DOUBLE, vec![Value::Double(1.0), Value::Double(2.0)])),
            "[1.0, 2.0]"
        );
        assert_eq!(
            format(&Value::array(TypeRef::CHAR, vec![Value::char('a'), Value::char('b')])),
            "['a', 'b']"
        );
    }

    #[test]
    fn lists_quote_string_elements() {
        let list = Value::list(vec![Value::string("a"), Value::string("b")]);
        assert_eq!(format(&list), "[\"a\", \"b\"]");
    }

    #[test]
    fn long_sequences_are_cut_after_the_hint() {
        let list = Value::list(vec![Value::string("element"); 17]);
        assert_eq!(
            format(&list),
            "[\"element\", \"element\", \"element\", \"element\", \"element\", \"element\", \
             \"element\", \"element\", \"element\", \"element\", ...]"
        );
    }

    #[test]
    fn nested_arrays_share_one_budget() {
        let row = || Value::array(TypeRef::INT, vec![Value::Int(0); 5]);
        let grid = Value::array(TypeRef::array_of(TypeRef::INT), (0..10).map(|_| row()).collect());
        assert_eq!(
            format(&grid),
            "[[0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], \
             [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], ...]"
        );
    }
}

mod objects {
    use super::*;
    use super::assert_eq;

    #[test]
    fn objects_use_to_string() {
        assert_eq!(format(&Value::object(Text("hello"))), "hello");
        let point = RecordObject::new(
            "demo.Point",
            vec![("x".into(), Value::Int(1)), ("y".into(), Value::Int(2))],
        );
        assert_eq!(format(&Value::object(point)), "Point[x=1, y=2]");
    }

    #[test]
    fn long_to_string_is_abbreviated() {
        let text = Value::object(Text(
            "VeryveryveryverylongobjecttoString|VeryveryveryverylongobjecttoString|\
             VeryveryveryverylongobjecttoString|VeryveryveryverylongobjecttoString",
        ));
        assert_eq!(
            format(&text),
            "VeryveryveryverylongobjecttoString|VeryveryveryverylongobjecttoString|\
             VeryveryveryverylongobjecttoSt..."
        );
    }

    #[test]
    fn throwables_print_class_and_message() {
        let thrown = Value::throwable(Throwable::with_message(
            "java.lang.ArithmeticException",
            "/ by zero",
        ));
        assert_eq!(format(&thrown), "java.lang.ArithmeticException: / by zero");
    }
}

#[test]
fn closures_are_value_formatters() {
    let formatter = |value: &Value| format!("<{value}>");
    assert_eq!(ValueFormatter::format(&formatter, &Value::Int(3)), "<3>");
}

#[test]
fn length_hint_is_configurable() {
    let formatter = DefaultValueFormatter::new(20);
    assert_eq!(formatter.length_hint(), 20);
    let list = Value::list((0..20).map(Value::Int).collect());
    assert_eq!(formatter.format(&list), "[0, 1, 2, 3, 4, 5, 6, ...]");
}
