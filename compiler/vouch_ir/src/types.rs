//! Type references and member descriptors.
//!
//! Types are named the way the quoted language names them: primitives by
//! keyword (`int`, `double`), classes by fully-qualified name
//! (`java.lang.String`), arrays by component type.

use std::fmt;
use std::sync::Arc;

/// Fully-qualified names of the classes the engine itself refers to.
pub mod class_names {
    pub const OBJECT: &str = "java.lang.Object";
    pub const STRING: &str = "java.lang.String";
    pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
    pub const COMPARABLE: &str = "java.lang.Comparable";
    pub const NUMBER: &str = "java.lang.Number";
    pub const BOOLEAN: &str = "java.lang.Boolean";
    pub const BYTE: &str = "java.lang.Byte";
    pub const SHORT: &str = "java.lang.Short";
    pub const CHARACTER: &str = "java.lang.Character";
    pub const INTEGER: &str = "java.lang.Integer";
    pub const LONG: &str = "java.lang.Long";
    pub const FLOAT: &str = "java.lang.Float";
    pub const DOUBLE: &str = "java.lang.Double";
    pub const MATH: &str = "java.lang.Math";
    pub const ITERABLE: &str = "java.lang.Iterable";
    pub const COLLECTION: &str = "java.util.Collection";
    pub const LIST: &str = "java.util.List";
    pub const MAP: &str = "java.util.Map";
}

/// Primitive types of the quoted language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    /// Source keyword, e.g. `int`.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// Class of the boxed form, e.g. `java.lang.Integer` for `int`.
    pub const fn box_class(self) -> &'static str {
        match self {
            Self::Boolean => class_names::BOOLEAN,
            Self::Byte => class_names::BYTE,
            Self::Short => class_names::SHORT,
            Self::Char => class_names::CHARACTER,
            Self::Int => class_names::INTEGER,
            Self::Long => class_names::LONG,
            Self::Float => class_names::FLOAT,
            Self::Double => class_names::DOUBLE,
            Self::Void => "java.lang.Void",
        }
    }

    /// `byte`, `short`, `char`, `int` or `long`.
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Char | Self::Int | Self::Long
        )
    }
}

/// Reference to a type in the quoted program.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Array(Box<TypeRef>),
    /// Class or interface, by fully-qualified name.
    Class(Arc<str>),
}

impl TypeRef {
    pub const BOOLEAN: TypeRef = TypeRef::Primitive(PrimitiveType::Boolean);
    pub const BYTE: TypeRef = TypeRef::Primitive(PrimitiveType::Byte);
    pub const SHORT: TypeRef = TypeRef::Primitive(PrimitiveType::Short);
    pub const CHAR: TypeRef = TypeRef::Primitive(PrimitiveType::Char);
    pub const INT: TypeRef = TypeRef::Primitive(PrimitiveType::Int);
    pub const LONG: TypeRef = TypeRef::Primitive(PrimitiveType::Long);
    pub const FLOAT: TypeRef = TypeRef::Primitive(PrimitiveType::Float);
    pub const DOUBLE: TypeRef = TypeRef::Primitive(PrimitiveType::Double);
    pub const VOID: TypeRef = TypeRef::Primitive(PrimitiveType::Void);

    /// Class type by fully-qualified name.
    pub fn class(name: &str) -> Self {
        TypeRef::Class(Arc::from(name))
    }

    /// `java.lang.String`.
    pub fn string() -> Self {
        Self::class(class_names::STRING)
    }

    /// `java.lang.Object`.
    pub fn object() -> Self {
        Self::class(class_names::OBJECT)
    }

    /// Array type with the given component.
    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// Array type of `dims` dimensions over `element`.
    pub fn array_dims(element: TypeRef, dims: usize) -> Self {
        (0..dims).fold(element, |ty, _| TypeRef::array_of(ty))
    }

    /// Component type for arrays.
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array component, e.g. `int` for `int[][]`.
    pub fn deep_component(&self) -> &TypeRef {
        let mut ty = self;
        while let TypeRef::Array(component) = ty {
            ty = component;
        }
        ty
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Source name without package qualifiers: `String`, `int[]`, `Point`
    /// for `demo.Outer$Point`.
    pub fn simple_name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.keyword().to_string(),
            TypeRef::Array(component) => format!("{}[]", component.simple_name()),
            TypeRef::Class(name) => {
                let tail = name.rsplit('.').next().unwrap_or(name);
                tail.rsplit('$').next().unwrap_or(tail).to_string()
            }
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(p: PrimitiveType) -> Self {
        TypeRef::Primitive(p)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Array(component) => write!(f, "{component}[]"),
            TypeRef::Class(name) => f.write_str(name),
        }
    }
}

/// Field descriptor: declaring type, name and field type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldRef {
    pub owner: TypeRef,
    pub name: Arc<str>,
    pub ty: TypeRef,
}

impl FieldRef {
    pub fn new(owner: TypeRef, name: &str, ty: TypeRef) -> Self {
        FieldRef {
            owner,
            name: Arc::from(name),
            ty,
        }
    }
}

/// Method descriptor: declaring type, name and signature.
///
/// `params` excludes the receiver.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodRef {
    pub owner: TypeRef,
    pub name: Arc<str>,
    pub params: Vec<TypeRef>,
    pub ret: TypeRef,
}

impl MethodRef {
    pub fn new(owner: TypeRef, name: &str, params: Vec<TypeRef>, ret: TypeRef) -> Self {
        MethodRef {
            owner,
            name: Arc::from(name),
            params,
            ret,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// Constructor descriptor.
///
/// For array types, `params` holds one `int` per dimension operand.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstructorRef {
    pub ty: TypeRef,
    pub params: Vec<TypeRef>,
}

impl ConstructorRef {
    pub fn new(ty: TypeRef, params: Vec<TypeRef>) -> Self {
        ConstructorRef { ty, params }
    }
}

impl fmt::Display for ConstructorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.<init>(", self.ty)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
