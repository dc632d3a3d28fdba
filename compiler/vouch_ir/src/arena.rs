//! Contiguous storage for the ops of one quoted predicate.

use std::fmt::Write;

use crate::op::{Body, Op, OpId, OpKind, ParamId};
use crate::types::TypeRef;

/// Arena for ops and block parameters.
///
/// Ops are immutable once allocated; ids are only handed out by `alloc`, so
/// every `OpId` produced by this arena indexes it.
#[derive(Clone, Debug, Default)]
pub struct OpArena {
    ops: Vec<Op>,
    params: Vec<TypeRef>,
}

impl OpArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an op and return its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` ops.
    pub fn alloc(&mut self, op: Op) -> OpId {
        let index = u32::try_from(self.ops.len())
            .unwrap_or_else(|_| panic!("op arena exceeded {} ops", u32::MAX));
        self.ops.push(op);
        OpId::new(index)
    }

    /// Allocate a block parameter of the given type.
    pub fn new_param(&mut self, ty: TypeRef) -> ParamId {
        let index = u32::try_from(self.params.len())
            .unwrap_or_else(|_| panic!("op arena exceeded {} parameters", u32::MAX));
        self.params.push(ty);
        ParamId::new(index)
    }

    #[inline]
    pub fn get(&self, id: OpId) -> &Op {
        &self.ops[id.index()]
    }

    pub fn param_type(&self, id: ParamId) -> &TypeRef {
        &self.params[id.index()]
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Structural text of one op, e.g. `%4 = add %2 %3 : int`.
    ///
    /// Nested bodies are written inline between braces. Used as the
    /// fallback rendering for ops the decompiler has no form for.
    pub fn dump(&self, id: OpId) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, id);
        out
    }

    fn dump_into(&self, out: &mut String, id: OpId) {
        let op = self.get(id);
        // Writing to a String cannot fail.
        let _ = write!(out, "%{} = {}", id.raw(), op.kind.name());
        match &op.kind {
            OpKind::Constant(lit) => {
                let _ = write!(out, " @{lit:?}");
            }
            OpKind::Var { name } => {
                let _ = write!(out, " @\"{name}\"");
            }
            OpKind::FieldLoad(field) => {
                let _ = write!(out, " @{}.{}", field.owner, field.name);
            }
            OpKind::Invoke { method, .. } => {
                let _ = write!(out, " @{method}");
            }
            OpKind::New(ctor) => {
                let _ = write!(out, " @{ctor}");
            }
            OpKind::Cast(ty) | OpKind::InstanceOf(ty) => {
                let _ = write!(out, " @{ty}");
            }
            _ => {}
        }
        for operand in &op.operands {
            let _ = write!(out, " {operand}");
        }
        if let Some(ty) = &op.result_type {
            let _ = write!(out, " : {ty}");
        }
        for body in op.kind.bodies() {
            self.dump_body(out, body);
        }
    }

    fn dump_body(&self, out: &mut String, body: &Body) {
        out.push_str(" {");
        for block in &body.blocks {
            for (i, param) in block.params.iter().enumerate() {
                let sep = if i == 0 { " ^(" } else { ", " };
                let _ = write!(out, "{sep}^{}: {}", param.index(), self.param_type(*param));
                if i + 1 == block.params.len() {
                    out.push(')');
                }
            }
            for &op in &block.ops {
                out.push(' ');
                self.dump_into(out, op);
                out.push(';');
            }
        }
        out.push_str(" }");
    }
}
