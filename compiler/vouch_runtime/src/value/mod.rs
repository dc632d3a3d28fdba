//! Runtime values of the quoted language.
//!
//! # Heap Values
//!
//! Strings, arrays, collections, host objects and throwables are shared
//! through `Heap<T>`, whose constructor is private to this crate:
//!
//! ```text
//! let s = Value::string("hello");           // OK
//! let xs = Value::array(TypeRef::INT, vec![]); // OK
//! let s = Value::Str(Heap::new(...));       // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Equality
//!
//! `PartialEq` follows `Object.equals`: boxed primitives are equal only to
//! the same box type with the same bits (so `NaN` equals `NaN`), strings and
//! collections compare by content, arrays by identity.

mod heap;
mod number;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use vouch_ir::{class_names, Literal, PrimitiveType, TypeRef};

use crate::object::HostObject;
use crate::throwable::Throwable;

pub use heap::Heap;
pub use number::{java_double_string, java_float_string};

/// An array: component type plus elements.
#[derive(Clone, Debug)]
pub struct ArrayValue {
    pub component: TypeRef,
    pub items: Heap<Vec<Value>>,
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::array_of(self.component.clone())
    }
}

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,

    // Primitives (boxed when they flow through references)
    Bool(bool),
    Byte(i8),
    Short(i16),
    /// UTF-16 code unit.
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),

    // Heap types
    Str(Heap<String>),
    Array(ArrayValue),
    /// Immutable list, as produced by `List.of`.
    List(Heap<Vec<Value>>),
    /// Immutable map in insertion order, as produced by `Map.of`.
    Map(Heap<Vec<(Value, Value)>>),
    /// Instance of a registered host class.
    Object(Heap<dyn HostObject>),
    /// An exception object used as a value.
    Throwable(Heap<Throwable>),
}

// Factory methods

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }

    pub fn array(component: TypeRef, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue {
            component,
            items: Heap::new(items),
        })
    }

    pub fn object(object: impl HostObject + 'static) -> Self {
        let shared: Arc<dyn HostObject> = Arc::new(object);
        Value::Object(Heap::from_arc(shared))
    }

    pub fn throwable(throwable: Throwable) -> Self {
        Value::Throwable(Heap::new(throwable))
    }

    pub fn char(c: char) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "chars are UTF-16 code units")]
        let unit = u32::from(c) as u16;
        Value::Char(unit)
    }

    /// Runtime value of a constant.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Byte(v) => Value::Byte(*v),
            Literal::Short(v) => Value::Short(*v),
            Literal::Char(v) => Value::Char(*v),
            Literal::Int(v) => Value::Int(*v),
            Literal::Long(v) => Value::Long(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Double(v) => Value::Double(*v),
            Literal::Str(s) => Value::string(&**s),
        }
    }

    /// Default value of an array element of type `ty`.
    pub fn zero(ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Primitive(p) => match p {
                PrimitiveType::Boolean => Value::Bool(false),
                PrimitiveType::Byte => Value::Byte(0),
                PrimitiveType::Short => Value::Short(0),
                PrimitiveType::Char => Value::Char(0),
                PrimitiveType::Int => Value::Int(0),
                PrimitiveType::Long => Value::Long(0),
                PrimitiveType::Float => Value::Float(0.0),
                PrimitiveType::Double => Value::Double(0.0),
                PrimitiveType::Void => Value::Null,
            },
            TypeRef::Array(_) | TypeRef::Class(_) => Value::Null,
        }
    }
}

// Inspection

impl Value {
    /// Primitive kind of a boxed primitive value.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Byte(_) => Some(PrimitiveType::Byte),
            Value::Short(_) => Some(PrimitiveType::Short),
            Value::Char(_) => Some(PrimitiveType::Char),
            Value::Int(_) => Some(PrimitiveType::Int),
            Value::Long(_) => Some(PrimitiveType::Long),
            Value::Float(_) => Some(PrimitiveType::Float),
            Value::Double(_) => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    /// Fully-qualified runtime class name; `None` for `null`.
    pub fn class_name(&self) -> Option<Cow<'_, str>> {
        let name = match self {
            Value::Null => return None,
            Value::Str(_) => Cow::Borrowed(class_names::STRING),
            Value::Array(array) => Cow::Owned(array.type_ref().to_string()),
            Value::List(_) => Cow::Borrowed(class_names::LIST),
            Value::Map(_) => Cow::Borrowed(class_names::MAP),
            Value::Object(object) => Cow::Borrowed(object.class_name()),
            Value::Throwable(throwable) => Cow::Borrowed(throwable.class()),
            _ => Cow::Borrowed(self.primitive_type()?.box_class()),
        };
        Some(name)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Value usable as an array index or dimension (`int` after promotion).
    pub fn as_index(&self) -> Option<i32> {
        match self {
            Value::Byte(v) => Some(i32::from(*v)),
            Value::Short(v) => Some(i32::from(*v)),
            Value::Char(v) => Some(i32::from(*v)),
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Any integral primitive widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            other => other.as_index().map(i64::from),
        }
    }

    /// Any numeric primitive widened to `f64`.
    #[expect(clippy::cast_precision_loss, reason = "long to double widening rounds like the source language")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            Value::Long(v) => Some(*v as f64),
            other => other.as_index().map(f64::from),
        }
    }

    /// Elements of an array or list.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(array) => Some(array.items.as_slice()),
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// A UTF-16 code unit as a Rust `char`, with unpaired surrogates replaced.
pub(crate) fn unit_to_char(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Binary-name letter of a primitive, as in `[I`.
fn descriptor(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(p) => match p {
            PrimitiveType::Boolean => "Z",
            PrimitiveType::Byte => "B",
            PrimitiveType::Short => "S",
            PrimitiveType::Char => "C",
            PrimitiveType::Int => "I",
            PrimitiveType::Long => "J",
            PrimitiveType::Float => "F",
            PrimitiveType::Double => "D",
            PrimitiveType::Void => "V",
        }
        .to_string(),
        TypeRef::Array(component) => format!("[{}", descriptor(component)),
        TypeRef::Class(name) => format!("L{name};"),
    }
}

/// `toString()` of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{}", unit_to_char(*v)),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => f.write_str(&java_float_string(*v)),
            Value::Double(v) => f.write_str(&java_double_string(*v)),
            Value::Str(s) => f.write_str(s),
            Value::Array(array) => {
                // Identity string: `[I@1b6d3586`.
                #[expect(clippy::cast_possible_truncation, reason = "identity hash codes are 32 bits")]
                let hash = Heap::addr(&array.items) as u32;
                write!(f, "[{}@{hash:x}", descriptor(&array.component))
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Value::Object(object) => write!(f, "{}", &**object),
            Value::Throwable(throwable) => write!(f, "{}", &**throwable),
        }
    }
}

/// Float box equality: same bits after collapsing every `NaN` to one.
fn float_bits_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits_eq(f64::from(*a), f64::from(*b)),
            (Value::Double(a), Value::Double(b)) => float_bits_eq(*a, *b),
            (Value::Str(a), Value::Str(b)) => **a == **b,
            // Arrays do not override equals
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(&a.items, &b.items),
            (Value::List(a), Value::List(b)) => **a == **b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| key == other_key && value == other_value)
                    })
            }
            (Value::Object(a), Value::Object(b)) => a.host_eq(&**b),
            (Value::Throwable(a), Value::Throwable(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}
