//! Quoted predicates: an IR arena, its root lambda, and the values captured
//! when the predicate was quoted.

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashMap;
use vouch_ir::{IrBuilder, OpArena, OpId, ParamId, TypeRef, ValueRef};

use crate::value::Value;

/// A captured binding.
#[derive(Clone, Debug, PartialEq)]
pub enum Captured {
    /// A local variable slot, boxed in a one-field cell.
    Cell(Value),
    /// A bare value (e.g. the receiver bound to a block parameter).
    Value(Value),
}

impl Captured {
    /// The bound value, with one level of cell unwrapped.
    pub fn value(&self) -> &Value {
        match self {
            Captured::Cell(value) | Captured::Value(value) => value,
        }
    }
}

/// A quoted predicate, ready for evaluation.
#[derive(Debug)]
pub struct Quoted {
    arena: OpArena,
    root: OpId,
    captured: FxHashMap<ValueRef, Captured>,
}

impl Quoted {
    pub fn new(arena: OpArena, root: OpId, captured: FxHashMap<ValueRef, Captured>) -> Self {
        Quoted {
            arena,
            root,
            captured,
        }
    }

    pub fn arena(&self) -> &OpArena {
        &self.arena
    }

    /// The root op; well-formed input is a `Lambda`.
    pub fn root(&self) -> OpId {
        self.root
    }

    pub fn captured(&self, value: ValueRef) -> Option<&Captured> {
        self.captured.get(&value)
    }
}

/// Builds a `Quoted` the way a quoting front-end would: declare captured
/// locals and the receiver first, then the lambda body.
///
/// ```text
/// let mut q = QuotedBuilder::new();
/// let x = q.local("x", TypeRef::INT, Value::Int(2));
/// let quoted = q.lambda(|b| {
///     let x = b.var_load(x);
///     let two = b.constant(2);
///     b.compare(CompareOp::Eq, x, two)
/// });
/// ```
#[derive(Debug, Default)]
pub struct QuotedBuilder {
    ir: IrBuilder,
    receivers: Vec<ParamId>,
    captured: FxHashMap<ValueRef, Captured>,
}

impl QuotedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a captured local variable holding `value`.
    ///
    /// Returns the variable slot, to be read with `var_load`.
    pub fn local(&mut self, name: &str, ty: TypeRef, value: Value) -> ValueRef {
        let var = self.ir.var(name, ty);
        self.captured.insert(var, Captured::Cell(value));
        var
    }

    /// Bind the predicate's receiver (`this`) to `value`.
    pub fn receiver(&mut self, ty: TypeRef, value: Value) -> ValueRef {
        let param = self.ir.param(ty);
        self.receivers.push(param);
        let param = ValueRef::Param(param);
        self.captured.insert(param, Captured::Value(value));
        param
    }

    /// Close the predicate body and produce the `Quoted`.
    pub fn lambda(mut self, f: impl FnOnce(&mut IrBuilder) -> ValueRef) -> Quoted {
        let root = self.ir.lambda(&self.receivers, f);
        Quoted::new(self.ir.finish(), root, self.captured)
    }
}

impl Deref for QuotedBuilder {
    type Target = IrBuilder;

    fn deref(&self) -> &IrBuilder {
        &self.ir
    }
}

impl DerefMut for QuotedBuilder {
    fn deref_mut(&mut self) -> &mut IrBuilder {
        &mut self.ir
    }
}
