//! Built-in classes: the parts of `java.lang` and `java.util` that quoted
//! predicates commonly touch, plus the exception hierarchy.

use std::cmp::Ordering;

use vouch_ir::{class_names as cn, TypeRef};

use super::{ClassDef, ClassRegistry};
use crate::throwable::{
    exception_names as ex, illegal_argument, index_out_of_bounds, null_pointer, number_format,
    string_index_out_of_bounds, Throwable,
};
use crate::value::Value;

type NativeResult = Result<Value, Throwable>;

pub(super) fn register_all(registry: &ClassRegistry) {
    registry.register(object_class());
    registry.register(ClassDef::new(cn::COMPARABLE).method("compareTo", 1, compare_to));
    registry.register(char_sequence_class());
    registry.register(string_class());
    registry.register(number_class());
    registry.register(boolean_class());
    registry.register(character_class());
    for def in integral_classes() {
        registry.register(def);
    }
    registry.register(float_class());
    registry.register(double_class());
    registry.register(math_class());
    registry.register(ClassDef::new(cn::ITERABLE));
    registry.register(collection_class());
    registry.register(list_class());
    registry.register(map_class());
    for def in exception_classes() {
        registry.register(def);
    }
}

// Argument helpers

static NULL: Value = Value::Null;

fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&NULL)
}

/// Argument `index` as a string; `null` throws.
fn str_arg(args: &[Value], index: usize) -> Result<&str, Throwable> {
    arg(args, index).as_str().ok_or_else(null_pointer)
}

fn int_arg(args: &[Value], index: usize) -> Result<i32, Throwable> {
    arg(args, index)
        .as_index()
        .ok_or_else(|| illegal_argument(format!("argument {index} is not an int")))
}

fn size_value(n: usize) -> Value {
    Value::Int(i32::try_from(n).unwrap_or(i32::MAX))
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

// java.lang.Object

fn object_class() -> ClassDef {
    ClassDef::new(cn::OBJECT)
        .method("toString", 0, |args| Ok(Value::string(arg(args, 0).to_string())))
        .method("equals", 1, |args| Ok(Value::Bool(arg(args, 0) == arg(args, 1))))
}

/// `Comparable.compareTo` for boxed primitives.
fn compare_to(args: &[Value]) -> NativeResult {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let ordering = match (a, b) {
        (Value::Null, _) | (_, Value::Null) => return Err(null_pointer()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Float(_) | Value::Double(_), _) | (_, Value::Float(_) | Value::Double(_)) => {
            let (x, y) = a.as_f64().zip(b.as_f64()).ok_or_else(|| incomparable(a, b))?;
            x.total_cmp(&y)
        }
        _ => {
            let (x, y) = a.as_i64().zip(b.as_i64()).ok_or_else(|| incomparable(a, b))?;
            x.cmp(&y)
        }
    };
    Ok(Value::Int(ordering as i32))
}

#[cold]
fn incomparable(a: &Value, b: &Value) -> Throwable {
    let name = |v: &Value| v.class_name().map_or_else(|| "null".to_string(), |c| c.into_owned());
    Throwable::with_message(
        ex::CLASS_CAST,
        format!("class {} cannot be cast to class {}", name(b), name(a)),
    )
}

// java.lang.CharSequence / java.lang.String

fn length(args: &[Value]) -> NativeResult {
    Ok(size_value(str_arg(args, 0)?.encode_utf16().count()))
}

fn is_empty(args: &[Value]) -> NativeResult {
    Ok(Value::Bool(str_arg(args, 0)?.is_empty()))
}

fn char_at(args: &[Value]) -> NativeResult {
    let units = utf16(str_arg(args, 0)?);
    let index = int_arg(args, 1)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| units.get(i))
        .map(|unit| Value::Char(*unit))
        .ok_or_else(|| {
            string_index_out_of_bounds(format!(
                "Index {index} out of bounds for length {}",
                units.len()
            ))
        })
}

fn char_sequence_class() -> ClassDef {
    ClassDef::new(cn::CHAR_SEQUENCE)
        .method("length", 0, length)
        .method("isEmpty", 0, is_empty)
        .method("charAt", 1, char_at)
}

fn index_of(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn substring(args: &[Value]) -> NativeResult {
    let units = utf16(str_arg(args, 0)?);
    let begin = int_arg(args, 1)?;
    let end = match args.get(2) {
        Some(_) => int_arg(args, 2)?,
        None => i32::try_from(units.len()).unwrap_or(i32::MAX),
    };
    let range = usize::try_from(begin)
        .ok()
        .zip(usize::try_from(end).ok())
        .filter(|(b, e)| b <= e && *e <= units.len());
    match range {
        Some((b, e)) => Ok(Value::string(String::from_utf16_lossy(&units[b..e]))),
        None => Err(string_index_out_of_bounds(format!(
            "begin {begin}, end {end}, length {}",
            units.len()
        ))),
    }
}

/// `String.hashCode`: `s[0]*31^(n-1) + ... + s[n-1]` in wrapping `int`.
fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0_i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn string_compare(args: &[Value]) -> NativeResult {
    let a = utf16(str_arg(args, 0)?);
    let b = utf16(str_arg(args, 1)?);
    let diff = a
        .iter()
        .zip(&b)
        .find(|(x, y)| x != y)
        .map_or_else(
            || i64::try_from(a.len()).unwrap_or(i64::MAX) - i64::try_from(b.len()).unwrap_or(i64::MAX),
            |(x, y)| i64::from(*x) - i64::from(*y),
        );
    Ok(Value::Int(i32::try_from(diff).unwrap_or(0)))
}

fn string_class() -> ClassDef {
    ClassDef::new(cn::STRING)
        .extends(cn::CHAR_SEQUENCE)
        .extends(cn::COMPARABLE)
        .method("length", 0, length)
        .method("isEmpty", 0, is_empty)
        .method("charAt", 1, char_at)
        .method("contains", 1, |args| {
            Ok(Value::Bool(str_arg(args, 0)?.contains(str_arg(args, 1)?)))
        })
        .method("startsWith", 1, |args| {
            Ok(Value::Bool(str_arg(args, 0)?.starts_with(str_arg(args, 1)?)))
        })
        .method("endsWith", 1, |args| {
            Ok(Value::Bool(str_arg(args, 0)?.ends_with(str_arg(args, 1)?)))
        })
        .method("equals", 1, |args| Ok(Value::Bool(arg(args, 0) == arg(args, 1))))
        .method("equalsIgnoreCase", 1, |args| {
            let other = arg(args, 1).as_str();
            let this = str_arg(args, 0)?;
            Ok(Value::Bool(other.is_some_and(|o| o.to_lowercase() == this.to_lowercase())))
        })
        .method("indexOf", 1, |args| {
            let units = utf16(str_arg(args, 0)?);
            let found = match arg(args, 1) {
                Value::Char(c) => units.iter().position(|u| u == c),
                Value::Int(c) => units.iter().position(|u| i32::from(*u) == *c),
                _ => index_of(&units, &utf16(str_arg(args, 1)?)),
            };
            Ok(found.map_or(Value::Int(-1), size_value))
        })
        .method("toUpperCase", 0, |args| Ok(Value::string(str_arg(args, 0)?.to_uppercase())))
        .method("toLowerCase", 0, |args| Ok(Value::string(str_arg(args, 0)?.to_lowercase())))
        .method("trim", 0, |args| {
            Ok(Value::string(str_arg(args, 0)?.trim_matches(|c: char| c <= ' ')))
        })
        .method("concat", 1, |args| {
            Ok(Value::string(format!("{}{}", str_arg(args, 0)?, str_arg(args, 1)?)))
        })
        .method("substring", 1, substring)
        .method("substring", 2, substring)
        .method("hashCode", 0, |args| Ok(Value::Int(string_hash(str_arg(args, 0)?))))
        .method("compareTo", 1, string_compare)
        .method("toString", 0, |args| Ok(arg(args, 0).clone()))
        .static_method("valueOf", 1, |args| Ok(Value::string(arg(args, 0).to_string())))
}

// Boxes

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "Number conversions follow the source language's narrowing rules"
)]
fn number_class() -> ClassDef {
    fn number(args: &[Value]) -> Result<&Value, Throwable> {
        match arg(args, 0) {
            Value::Null => Err(null_pointer()),
            v if v.as_f64().is_some() => Ok(v),
            v => Err(illegal_argument(format!("not a number: {v}"))),
        }
    }
    ClassDef::new(cn::NUMBER)
        .method("intValue", 0, |args| {
            Ok(Value::Int(match number(args)? {
                Value::Long(v) => *v as i32,
                Value::Float(v) => *v as i32,
                Value::Double(v) => *v as i32,
                v => v.as_index().unwrap_or_default(),
            }))
        })
        .method("longValue", 0, |args| {
            Ok(Value::Long(match number(args)? {
                Value::Float(v) => *v as i64,
                Value::Double(v) => *v as i64,
                v => v.as_i64().unwrap_or_default(),
            }))
        })
        .method("floatValue", 0, |args| {
            Ok(Value::Float(match number(args)? {
                Value::Long(v) => *v as f32,
                Value::Double(v) => *v as f32,
                v => v.as_f64().unwrap_or_default() as f32,
            }))
        })
        .method("doubleValue", 0, |args| {
            Ok(Value::Double(number(args)?.as_f64().unwrap_or_default()))
        })
}

fn boolean_class() -> ClassDef {
    ClassDef::new(cn::BOOLEAN)
        .extends(cn::COMPARABLE)
        .static_field("TRUE", Value::Bool(true))
        .static_field("FALSE", Value::Bool(false))
        .static_method("parseBoolean", 1, |args| {
            Ok(Value::Bool(
                arg(args, 0).as_str().is_some_and(|s| s.eq_ignore_ascii_case("true")),
            ))
        })
        .static_method("valueOf", 1, |args| match arg(args, 0) {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => Ok(Value::Bool(
                other.as_str().is_some_and(|s| s.eq_ignore_ascii_case("true")),
            )),
        })
        .method("booleanValue", 0, |args| {
            arg(args, 0).as_bool().map(Value::Bool).ok_or_else(null_pointer)
        })
}

fn character_class() -> ClassDef {
    fn classify(args: &[Value], test: fn(char) -> bool) -> NativeResult {
        match arg(args, 0) {
            Value::Char(unit) => Ok(Value::Bool(
                char::from_u32(u32::from(*unit)).is_some_and(test),
            )),
            _ => Err(null_pointer()),
        }
    }
    ClassDef::new(cn::CHARACTER)
        .extends(cn::COMPARABLE)
        .static_field("MIN_VALUE", Value::Char(0))
        .static_field("MAX_VALUE", Value::Char(u16::MAX))
        .static_method("isDigit", 1, |args| classify(args, |c| c.is_ascii_digit()))
        .static_method("isLetter", 1, |args| classify(args, char::is_alphabetic))
        .static_method("isWhitespace", 1, |args| classify(args, char::is_whitespace))
        .method("charValue", 0, |args| match arg(args, 0) {
            Value::Char(c) => Ok(Value::Char(*c)),
            _ => Err(null_pointer()),
        })
}

/// `Byte`, `Short`, `Integer`, `Long`.
#[expect(clippy::cast_possible_truncation, reason = "Long.hashCode folds to int")]
fn integral_classes() -> Vec<ClassDef> {
    fn parse<T: std::str::FromStr>(args: &[Value], wrap: fn(T) -> Value) -> NativeResult {
        let text = str_arg(args, 0).map_err(|_| {
            Throwable::with_message(ex::NUMBER_FORMAT, "Cannot parse null string: null")
        })?;
        text.parse::<T>().map(wrap).map_err(|_| number_format(text))
    }
    fn box_class(name: &str) -> ClassDef {
        ClassDef::new(name)
            .extends(cn::NUMBER)
            .extends(cn::COMPARABLE)
            .method("hashCode", 0, |args| match arg(args, 0) {
                Value::Long(v) => Ok(Value::Int((*v ^ (*v >> 32)) as i32)),
                v => Ok(Value::Int(v.as_index().unwrap_or_default())),
            })
            .static_method("compare", 2, compare_to)
    }
    vec![
        box_class(cn::BYTE)
            .static_field("MIN_VALUE", Value::Byte(i8::MIN))
            .static_field("MAX_VALUE", Value::Byte(i8::MAX))
            .static_method("parseByte", 1, |args| parse(args, Value::Byte)),
        box_class(cn::SHORT)
            .static_field("MIN_VALUE", Value::Short(i16::MIN))
            .static_field("MAX_VALUE", Value::Short(i16::MAX))
            .static_method("parseShort", 1, |args| parse(args, Value::Short)),
        box_class(cn::INTEGER)
            .static_field("MIN_VALUE", Value::Int(i32::MIN))
            .static_field("MAX_VALUE", Value::Int(i32::MAX))
            .static_method("parseInt", 1, |args| parse(args, Value::Int))
            .static_method("valueOf", 1, |args| match arg(args, 0) {
                Value::Str(_) => parse(args, Value::Int),
                v => v.as_index().map(Value::Int).ok_or_else(null_pointer),
            })
            .static_method("toString", 1, |args| Ok(Value::string(arg(args, 0).to_string())))
            .static_method("signum", 1, |args| Ok(Value::Int(int_arg(args, 0)?.signum()))),
        box_class(cn::LONG)
            .static_field("MIN_VALUE", Value::Long(i64::MIN))
            .static_field("MAX_VALUE", Value::Long(i64::MAX))
            .static_method("parseLong", 1, |args| parse(args, Value::Long))
            .static_method("valueOf", 1, |args| match arg(args, 0) {
                Value::Str(_) => parse(args, Value::Long),
                v => v.as_i64().map(Value::Long).ok_or_else(null_pointer),
            })
            .static_method("toString", 1, |args| Ok(Value::string(arg(args, 0).to_string()))),
    ]
}

/// Text accepted by `Double.parseDouble` / `Float.parseFloat`.
fn parse_floating(args: &[Value]) -> Result<f64, Throwable> {
    let text = str_arg(args, 0)?;
    let trimmed = text.trim_matches(|c: char| c <= ' ');
    let body = trimmed
        .strip_suffix(['d', 'D', 'f', 'F'])
        .unwrap_or(trimmed);
    match body {
        "NaN" => Ok(f64::NAN),
        "Infinity" | "+Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        _ if body.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            Err(number_format(text))
        }
        _ => body.parse::<f64>().map_err(|_| number_format(text)),
    }
}

#[expect(clippy::cast_possible_truncation, reason = "parseFloat rounds to float")]
fn float_class() -> ClassDef {
    ClassDef::new(cn::FLOAT)
        .extends(cn::NUMBER)
        .extends(cn::COMPARABLE)
        .static_field("MAX_VALUE", Value::Float(f32::MAX))
        .static_field("MIN_VALUE", Value::Float(f32::from_bits(1)))
        .static_field("NaN", Value::Float(f32::NAN))
        .static_field("POSITIVE_INFINITY", Value::Float(f32::INFINITY))
        .static_field("NEGATIVE_INFINITY", Value::Float(f32::NEG_INFINITY))
        .static_method("parseFloat", 1, |args| Ok(Value::Float(parse_floating(args)? as f32)))
        .static_method("isNaN", 1, |args| Ok(Value::Bool(matches!(arg(args, 0), Value::Float(v) if v.is_nan()))))
        .static_method("compare", 2, compare_to)
}

fn double_class() -> ClassDef {
    ClassDef::new(cn::DOUBLE)
        .extends(cn::NUMBER)
        .extends(cn::COMPARABLE)
        .static_field("MAX_VALUE", Value::Double(f64::MAX))
        .static_field("MIN_VALUE", Value::Double(f64::from_bits(1)))
        .static_field("NaN", Value::Double(f64::NAN))
        .static_field("POSITIVE_INFINITY", Value::Double(f64::INFINITY))
        .static_field("NEGATIVE_INFINITY", Value::Double(f64::NEG_INFINITY))
        .static_method("parseDouble", 1, |args| Ok(Value::Double(parse_floating(args)?)))
        .static_method("valueOf", 1, |args| match arg(args, 0) {
            Value::Str(_) => Ok(Value::Double(parse_floating(args)?)),
            v => v.as_f64().map(Value::Double).ok_or_else(null_pointer),
        })
        .static_method("isNaN", 1, |args| {
            Ok(Value::Bool(arg(args, 0).as_f64().is_some_and(f64::is_nan)))
        })
        .static_method("compare", 2, compare_to)
}

// java.lang.Math

/// Pick `a` or `b` by `prefer_a`, with `NaN` winning and `-0.0 < 0.0`.
fn float_extreme(a: f64, b: f64, max: bool) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    let prefer_a = match a.total_cmp(&b) {
        Ordering::Greater => max,
        Ordering::Less => !max,
        Ordering::Equal => true,
    };
    if prefer_a {
        a
    } else {
        b
    }
}

#[expect(clippy::cast_possible_truncation, reason = "float results stay float")]
fn extreme(args: &[Value], max: bool) -> NativeResult {
    let pick = |o: Ordering| if max { o.is_ge() } else { o.is_le() };
    match (arg(args, 0), arg(args, 1)) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(if pick(a.cmp(b)) { *a } else { *b })),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(
            float_extreme(f64::from(*a), f64::from(*b), max) as f32,
        )),
        (Value::Float(_) | Value::Double(_), _) | (_, Value::Float(_) | Value::Double(_)) => {
            let (a, b) = arg(args, 0).as_f64().zip(arg(args, 1).as_f64()).ok_or_else(null_pointer)?;
            Ok(Value::Double(float_extreme(a, b, max)))
        }
        (a, b) => {
            let (a, b) = a.as_i64().zip(b.as_i64()).ok_or_else(null_pointer)?;
            Ok(Value::Long(if pick(a.cmp(&b)) { a } else { b }))
        }
    }
}

fn math_class() -> ClassDef {
    ClassDef::new(cn::MATH)
        .static_field("PI", Value::Double(std::f64::consts::PI))
        .static_field("E", Value::Double(std::f64::consts::E))
        .static_method("abs", 1, |args| match arg(args, 0) {
            Value::Int(v) => Ok(Value::Int(v.wrapping_abs())),
            Value::Long(v) => Ok(Value::Long(v.wrapping_abs())),
            Value::Float(v) => Ok(Value::Float(v.abs())),
            Value::Double(v) => Ok(Value::Double(v.abs())),
            v => v.as_index().map(|i| Value::Int(i.wrapping_abs())).ok_or_else(null_pointer),
        })
        .static_method("max", 2, |args| extreme(args, true))
        .static_method("min", 2, |args| extreme(args, false))
        .static_method("sqrt", 1, |args| {
            arg(args, 0).as_f64().map(|v| Value::Double(v.sqrt())).ok_or_else(null_pointer)
        })
        .static_method("pow", 2, |args| {
            let (a, b) = arg(args, 0).as_f64().zip(arg(args, 1).as_f64()).ok_or_else(null_pointer)?;
            Ok(Value::Double(a.powf(b)))
        })
}

// java.util

fn elements(args: &[Value]) -> Result<&[Value], Throwable> {
    match arg(args, 0) {
        Value::List(items) => Ok(items.as_slice()),
        _ => Err(null_pointer()),
    }
}

fn collection_class() -> ClassDef {
    ClassDef::new(cn::COLLECTION)
        .extends(cn::ITERABLE)
        .method("size", 0, |args| Ok(size_value(elements(args)?.len())))
        .method("isEmpty", 0, |args| Ok(Value::Bool(elements(args)?.is_empty())))
        .method("contains", 1, |args| {
            let needle = arg(args, 1);
            Ok(Value::Bool(elements(args)?.iter().any(|item| item == needle)))
        })
}

fn list_class() -> ClassDef {
    ClassDef::new(cn::LIST)
        .extends(cn::COLLECTION)
        .variadic_static_method("of", |args| {
            if args.iter().any(Value::is_null) {
                return Err(null_pointer());
            }
            Ok(Value::list(args.to_vec()))
        })
        .method("get", 1, |args| {
            let items = elements(args)?;
            let index = int_arg(args, 1)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| index_out_of_bounds(i64::from(index), items.len()))
        })
        .method("indexOf", 1, |args| {
            let needle = arg(args, 1);
            let found = elements(args)?.iter().position(|item| item == needle);
            Ok(found.map_or(Value::Int(-1), size_value))
        })
}

fn entries(args: &[Value]) -> Result<&[(Value, Value)], Throwable> {
    match arg(args, 0) {
        Value::Map(entries) => Ok(entries.as_slice()),
        _ => Err(null_pointer()),
    }
}

fn map_class() -> ClassDef {
    ClassDef::new(cn::MAP)
        .variadic_static_method("of", |args| {
            if args.len() % 2 != 0 {
                return Err(illegal_argument("Map.of takes key/value pairs"));
            }
            let mut pairs: Vec<(Value, Value)> = Vec::with_capacity(args.len() / 2);
            for pair in args.chunks_exact(2) {
                let (key, value) = (&pair[0], &pair[1]);
                if key.is_null() || value.is_null() {
                    return Err(null_pointer());
                }
                if pairs.iter().any(|(k, _)| k == key) {
                    return Err(illegal_argument(format!("duplicate key: {key}")));
                }
                pairs.push((key.clone(), value.clone()));
            }
            Ok(Value::map(pairs))
        })
        .method("size", 0, |args| Ok(size_value(entries(args)?.len())))
        .method("isEmpty", 0, |args| Ok(Value::Bool(entries(args)?.is_empty())))
        .method("get", 1, |args| {
            let key = arg(args, 1);
            Ok(entries(args)?
                .iter()
                .find(|(k, _)| k == key)
                .map_or(Value::Null, |(_, v)| v.clone()))
        })
        .method("getOrDefault", 2, |args| {
            let key = arg(args, 1);
            Ok(entries(args)?
                .iter()
                .find(|(k, _)| k == key)
                .map_or_else(|| arg(args, 2).clone(), |(_, v)| v.clone()))
        })
        .method("containsKey", 1, |args| {
            let key = arg(args, 1);
            Ok(Value::Bool(entries(args)?.iter().any(|(k, _)| k == key)))
        })
        .method("containsValue", 1, |args| {
            let value = arg(args, 1);
            Ok(Value::Bool(entries(args)?.iter().any(|(_, v)| v == value)))
        })
}

// Exceptions

fn exception_classes() -> Vec<ClassDef> {
    const HIERARCHY: &[(&str, &str)] = &[
        (ex::THROWABLE, cn::OBJECT),
        (ex::EXCEPTION, ex::THROWABLE),
        (ex::ERROR, ex::THROWABLE),
        (ex::RUNTIME_EXCEPTION, ex::EXCEPTION),
        (ex::ARITHMETIC, ex::RUNTIME_EXCEPTION),
        (ex::NULL_POINTER, ex::RUNTIME_EXCEPTION),
        (ex::CLASS_CAST, ex::RUNTIME_EXCEPTION),
        (ex::INDEX_OUT_OF_BOUNDS, ex::RUNTIME_EXCEPTION),
        (ex::ARRAY_INDEX_OUT_OF_BOUNDS, ex::INDEX_OUT_OF_BOUNDS),
        (ex::STRING_INDEX_OUT_OF_BOUNDS, ex::INDEX_OUT_OF_BOUNDS),
        (ex::NEGATIVE_ARRAY_SIZE, ex::RUNTIME_EXCEPTION),
        (ex::ILLEGAL_ARGUMENT, ex::RUNTIME_EXCEPTION),
        (ex::NUMBER_FORMAT, ex::ILLEGAL_ARGUMENT),
        (ex::ILLEGAL_STATE, ex::RUNTIME_EXCEPTION),
        (ex::UNSUPPORTED_OPERATION, ex::RUNTIME_EXCEPTION),
        (ex::REFLECTIVE_OPERATION, ex::EXCEPTION),
        (ex::CLASS_NOT_FOUND, ex::REFLECTIVE_OPERATION),
        (ex::NO_SUCH_METHOD, ex::REFLECTIVE_OPERATION),
        (ex::LINKAGE_ERROR, ex::ERROR),
        (ex::INCOMPATIBLE_CLASS_CHANGE, ex::LINKAGE_ERROR),
        (ex::NO_SUCH_FIELD, ex::INCOMPATIBLE_CLASS_CHANGE),
        (ex::VIRTUAL_MACHINE_ERROR, ex::ERROR),
        (ex::OUT_OF_MEMORY, ex::VIRTUAL_MACHINE_ERROR),
    ];
    HIERARCHY
        .iter()
        .map(|&(name, parent)| {
            let def = ClassDef::new(name)
                .extends(parent)
                .constructor(Vec::new(), move |_| Ok(Value::throwable(Throwable::new(name, None))))
                .constructor(vec![TypeRef::string()], move |args| {
                    let message = arg(args, 0).as_str().map(str::to_string);
                    Ok(Value::throwable(Throwable::new(name, message)))
                });
            if name == ex::THROWABLE {
                def.method("getMessage", 0, |args| match arg(args, 0) {
                    Value::Throwable(t) => Ok(t.message().map_or(Value::Null, Value::string)),
                    _ => Err(null_pointer()),
                })
            } else {
                def
            }
        })
        .collect()
}
