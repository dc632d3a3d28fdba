//! Host objects: instances of classes registered by the embedder.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use vouch_ir::TypeRef;

use crate::value::Value;

/// An instance of a host class.
///
/// `Display` is the object's `toString()`. Equality defaults to identity,
/// like `Object.equals`.
pub trait HostObject: fmt::Debug + fmt::Display + Send + Sync {
    /// Fully-qualified class name.
    fn class_name(&self) -> &str;

    /// Value of an instance field, if the object has one by that name.
    fn field(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// `equals(other)`.
    fn host_eq(&self, other: &dyn HostObject) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn HostObject)
    }

    fn as_any(&self) -> &dyn Any;
}

/// A record instance: named components with structural equality.
///
/// Prints as `Point[x=1, y=2]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordObject {
    class: Arc<str>,
    components: Vec<(Arc<str>, Value)>,
}

impl RecordObject {
    pub fn new(class: &str, components: Vec<(Arc<str>, Value)>) -> Self {
        RecordObject {
            class: Arc::from(class),
            components,
        }
    }

    pub fn components(&self) -> &[(Arc<str>, Value)] {
        &self.components
    }
}

impl fmt::Display for RecordObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", TypeRef::Class(Arc::clone(&self.class)).simple_name())?;
        for (i, (name, value)) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}

impl HostObject for RecordObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.components
            .iter()
            .find(|(component, _)| &**component == name)
            .map(|(_, value)| value.clone())
    }

    fn host_eq(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<RecordObject>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i32, y: i32) -> RecordObject {
        RecordObject::new(
            "demo.Shapes$Point",
            vec![("x".into(), Value::Int(x)), ("y".into(), Value::Int(y))],
        )
    }

    #[test]
    fn records_print_simple_name_and_components() {
        assert_eq!(point(1, 2).to_string(), "Point[x=1, y=2]");
    }

    #[test]
    fn records_compare_structurally() {
        assert!(point(1, 2).host_eq(&point(1, 2)));
        assert!(!point(1, 2).host_eq(&point(2, 1)));
        assert_eq!(point(3, 4).field("y"), Some(Value::Int(4)));
        assert_eq!(point(3, 4).field("z"), None);
    }
}
