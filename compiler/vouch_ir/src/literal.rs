//! Constant payloads carried by `OpKind::Constant`.

use std::sync::Arc;

use crate::types::TypeRef;

/// A literal constant of the quoted language.
///
/// `Char` holds a UTF-16 code unit, matching the quoted language's `char`.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Arc<str>),
}

impl Literal {
    /// Static type of the literal; `null` is typed as `java.lang.Object`.
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Literal::Null => TypeRef::object(),
            Literal::Bool(_) => TypeRef::BOOLEAN,
            Literal::Byte(_) => TypeRef::BYTE,
            Literal::Short(_) => TypeRef::SHORT,
            Literal::Char(_) => TypeRef::CHAR,
            Literal::Int(_) => TypeRef::INT,
            Literal::Long(_) => TypeRef::LONG,
            Literal::Float(_) => TypeRef::FLOAT,
            Literal::Double(_) => TypeRef::DOUBLE,
            Literal::Str(_) => TypeRef::string(),
        }
    }

    /// A `char` literal from a Rust `char` in the Basic Multilingual Plane.
    ///
    /// Supplementary characters are truncated to their low 16 bits, the same
    /// as a narrowing conversion would.
    pub fn char(c: char) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "char literals are UTF-16 code units")]
        let unit = u32::from(c) as u16;
        Literal::Char(unit)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<i8> for Literal {
    fn from(v: i8) -> Self {
        Literal::Byte(v)
    }
}

impl From<i16> for Literal {
    fn from(v: i16) -> Self {
        Literal::Short(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Long(v)
    }
}

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Literal::Float(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Double(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(Arc::from(v))
    }
}
