//! Member access: fields, method calls, construction, casts and arrays.
//!
//! Field and method descriptors are resolved against the registry before
//! any operand is evaluated; an unresolvable descriptor is a
//! `ResolveError`. Constructor and type lookups for `new`, casts and
//! `instanceof` throw instead, like reflective lookups do.

use vouch_ir::{ConstructorRef, FieldRef, MethodRef, Op, TypeRef, ValueRef};
use vouch_runtime::{
    array_index_out_of_bounds, class_cast, exception_names, no_such_method, null_pointer,
    NativeFn, Throwable, Value,
};

use super::{Evaluated, Walk};
use crate::arrays::allocate;
use crate::errors::{unknown_class, unknown_field, unknown_method, Fault, OpResult, ResolveError};
use crate::node::Node;

impl Walk<'_, '_, '_> {
    /// Static field when `op` has no operand, instance field otherwise.
    pub(super) fn field_load(&self, origin: ValueRef, op: &Op, field: &FieldRef) -> Result<Node, ResolveError> {
        let owner = class_of(&field.owner)?;
        let registry = self.registry();
        if !registry.contains(owner) {
            return Err(unknown_class(owner));
        }
        if op.operands.is_empty() {
            let value = registry
                .static_field(owner, &field.name)
                .ok_or_else(|| unknown_field(owner, &field.name))?;
            return Ok(Node::value(origin, value, Vec::new()));
        }
        if !registry.has_instance_field(owner, &field.name) {
            return Err(unknown_field(owner, &field.name));
        }
        self.apply(origin, op, |values| match values {
            [Value::Null] => Err(null_pointer().into()),
            [Value::Object(object)] => object
                .field(&field.name)
                .ok_or_else(|| Throwable::with_message(exception_names::NO_SUCH_FIELD, &*field.name).into()),
            _ => Err(Fault::Unsupported),
        })
    }

    /// Static or virtual method call.
    ///
    /// A virtual call dispatches on the receiver's runtime class: an
    /// override found there wins over the resolved declaration.
    pub(super) fn invoke(
        &self,
        origin: ValueRef,
        op: &Op,
        method: &MethodRef,
        has_receiver: bool,
    ) -> Result<Node, ResolveError> {
        let owner = class_of(&method.owner)?;
        let registry = self.registry();
        if !registry.contains(owner) {
            return Err(unknown_class(owner));
        }
        let arity = method.arity();
        let declared = if has_receiver {
            registry.find_method(owner, &method.name, arity)
        } else {
            registry.find_static_method(owner, &method.name, arity)
        }
        .ok_or_else(|| unknown_method(method))?;

        self.apply(origin, op, |values| {
            if !has_receiver {
                return call(&declared, values).map_err(Fault::from);
            }
            let receiver = values.first().ok_or(Fault::Unsupported)?;
            if receiver.is_null() {
                return Err(null_pointer().into());
            }
            let target = receiver
                .class_name()
                .and_then(|class| registry.find_method(&class, &method.name, arity))
                .unwrap_or_else(|| declared.clone());
            call(&target, values).map_err(Fault::from)
        })
    }

    /// Array creation or constructor call.
    pub(super) fn new_instance(&self, origin: ValueRef, op: &Op, ctor: &ConstructorRef) -> Result<Node, ResolveError> {
        if ctor.ty.is_array() {
            let max = self.evaluator.max_array_elements;
            return self.apply(origin, op, |values| {
                let dims = values
                    .iter()
                    .map(Value::as_index)
                    .collect::<Option<Vec<_>>>()
                    .ok_or(Fault::Unsupported)?;
                allocate(&ctor.ty, &dims, max)
            });
        }

        let (children, values) = match self.eval_operands(&op.operands)? {
            Evaluated::Ready(children, values) => (children, values),
            Evaluated::Failed(children) => return Ok(Node::derived(origin, children)),
        };
        let registry = self.registry();
        let result = registry
            .check_type(&ctor.ty)
            .and_then(|()| {
                let class = class_of(&ctor.ty).map_err(|_| no_such_method(ctor.to_string()))?;
                registry
                    .find_constructor(class, &ctor.params)
                    .ok_or_else(|| no_such_method(ctor.to_string()))
            })
            .map_err(Fault::from)
            .and_then(|constructor| call(&constructor, &values).map_err(Fault::from));
        Ok(Node::from_result(origin, result, children))
    }

    /// Checked reference cast. `null` passes every cast.
    pub(super) fn cast(&self, value: &Value, ty: &TypeRef) -> OpResult {
        if value.is_null() {
            self.registry().check_type(ty)?;
            return Ok(Value::Null);
        }
        if ty.as_primitive().is_some_and(|p| value.primitive_type() == Some(p)) {
            return Ok(value.clone());
        }
        if self.registry().instance_of(value, ty)? {
            return Ok(value.clone());
        }
        let from = value.class_name().unwrap_or_default();
        Err(class_cast(&from, &ty.to_string()).into())
    }
}

/// `array[index]`.
pub(super) fn array_load(values: &[Value]) -> OpResult {
    let [array, index] = values else {
        return Err(Fault::Unsupported);
    };
    let index = index.as_index().ok_or(Fault::Unsupported)?;
    match array {
        Value::Null => Err(null_pointer().into()),
        Value::Array(array) => usize::try_from(index)
            .ok()
            .and_then(|i| array.get(i))
            .cloned()
            .ok_or_else(|| array_index_out_of_bounds(index, array.len()).into()),
        _ => Err(Fault::Unsupported),
    }
}

/// `array.length`.
pub(super) fn array_length(values: &[Value]) -> OpResult {
    match values {
        [Value::Null] => Err(null_pointer().into()),
        [Value::Array(array)] => Ok(Value::Int(i32::try_from(array.len()).unwrap_or(i32::MAX))),
        _ => Err(Fault::Unsupported),
    }
}

fn call(f: &NativeFn, args: &[Value]) -> Result<Value, Throwable> {
    f(args)
}

/// Class name of a member's owner; arrays and primitives own no members.
fn class_of(ty: &TypeRef) -> Result<&str, ResolveError> {
    match ty {
        TypeRef::Class(name) => Ok(&**name),
        other => Err(unknown_class(&other.to_string())),
    }
}
