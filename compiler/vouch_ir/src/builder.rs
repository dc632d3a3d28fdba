//! Programmatic construction of quoted expression trees.
//!
//! `IrBuilder` plays the part of a quoting front-end: it appends ops to the
//! innermost open block and closes regions with the right terminator
//! (`Yield` for conditional bodies, `Return` for lambdas).

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::arena::OpArena;
use crate::literal::Literal;
use crate::op::{Block, Body, Op, OpId, OpKind, Operands, ParamId, ValueRef};
use crate::operators::{BinaryOp, CompareOp, UnaryOp};
use crate::types::{ConstructorRef, FieldRef, MethodRef, PrimitiveType, TypeRef};

/// Builder for an `OpArena`.
///
/// Ops created while no block is open (e.g. captured `Var` slots) live in
/// the arena without belonging to any block.
#[derive(Debug, Default)]
pub struct IrBuilder {
    arena: OpArena,
    open_blocks: Vec<Block>,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the ops built so far.
    pub fn arena(&self) -> &OpArena {
        &self.arena
    }

    /// Finish building and hand out the arena.
    pub fn finish(self) -> OpArena {
        self.arena
    }

    /// Append an arbitrary op to the current block.
    pub fn push(&mut self, kind: OpKind, operands: Operands, result_type: Option<TypeRef>) -> OpId {
        let id = self.arena.alloc(Op::new(kind, operands, result_type));
        if let Some(block) = self.open_blocks.last_mut() {
            block.ops.push(id);
        }
        id
    }

    fn value(&mut self, kind: OpKind, operands: Operands, result_type: Option<TypeRef>) -> ValueRef {
        ValueRef::Result(self.push(kind, operands, result_type))
    }

    /// Allocate a block parameter, to be listed in a lambda's entry block.
    pub fn param(&mut self, ty: TypeRef) -> ParamId {
        self.arena.new_param(ty)
    }

    pub fn constant(&mut self, literal: impl Into<Literal>) -> ValueRef {
        let literal = literal.into();
        let ty = literal.type_ref();
        self.value(OpKind::Constant(literal), SmallVec::new(), Some(ty))
    }

    pub fn null(&mut self) -> ValueRef {
        self.constant(Literal::Null)
    }

    /// Declare a local variable slot.
    pub fn var(&mut self, name: &str, ty: TypeRef) -> ValueRef {
        self.value(
            OpKind::Var {
                name: Arc::from(name),
            },
            SmallVec::new(),
            Some(ty),
        )
    }

    pub fn var_load(&mut self, var: ValueRef) -> ValueRef {
        let ty = self.type_of(var);
        self.value(OpKind::VarLoad, smallvec![var], ty)
    }

    pub fn field_load(&mut self, receiver: Option<ValueRef>, field: FieldRef) -> ValueRef {
        let ty = field.ty.clone();
        let operands = receiver.into_iter().collect();
        self.value(OpKind::FieldLoad(field), operands, Some(ty))
    }

    /// Static method call.
    pub fn invoke(&mut self, method: MethodRef, args: &[ValueRef]) -> ValueRef {
        let ty = method.ret.clone();
        self.value(
            OpKind::Invoke {
                method,
                has_receiver: false,
            },
            args.iter().copied().collect(),
            Some(ty),
        )
    }

    /// Instance method call on `receiver`.
    pub fn invoke_virtual(&mut self, receiver: ValueRef, method: MethodRef, args: &[ValueRef]) -> ValueRef {
        let ty = method.ret.clone();
        let operands = std::iter::once(receiver).chain(args.iter().copied()).collect();
        self.value(
            OpKind::Invoke {
                method,
                has_receiver: true,
            },
            operands,
            Some(ty),
        )
    }

    /// Object construction through the constructor `ctor`.
    pub fn new_object(&mut self, ctor: ConstructorRef, args: &[ValueRef]) -> ValueRef {
        let ty = ctor.ty.clone();
        self.value(OpKind::New(ctor), args.iter().copied().collect(), Some(ty))
    }

    /// Array creation, one dimension operand per `[n]`.
    ///
    /// `element` is the innermost component type: `new int[10][5]` is
    /// `new_array(TypeRef::INT, &[ten, five])`.
    pub fn new_array(&mut self, element: TypeRef, dims: &[ValueRef]) -> ValueRef {
        let ty = TypeRef::array_dims(element, dims.len());
        let ctor = ConstructorRef::new(ty.clone(), vec![TypeRef::INT; dims.len()]);
        self.value(OpKind::New(ctor), dims.iter().copied().collect(), Some(ty))
    }

    pub fn array_load(&mut self, array: ValueRef, index: ValueRef) -> ValueRef {
        let ty = self
            .type_of(array)
            .and_then(|ty| ty.component().cloned());
        self.value(OpKind::ArrayLoad, smallvec![array, index], ty)
    }

    pub fn array_length(&mut self, array: ValueRef) -> ValueRef {
        self.value(OpKind::ArrayLength, smallvec![array], Some(TypeRef::INT))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ValueRef, right: ValueRef) -> ValueRef {
        let ty = self.type_of(left);
        self.value(OpKind::Binary(op), smallvec![left, right], ty)
    }

    pub fn compare(&mut self, op: CompareOp, left: ValueRef, right: ValueRef) -> ValueRef {
        self.value(OpKind::Compare(op), smallvec![left, right], Some(TypeRef::BOOLEAN))
    }

    pub fn not(&mut self, operand: ValueRef) -> ValueRef {
        self.value(OpKind::Unary(UnaryOp::Not), smallvec![operand], Some(TypeRef::BOOLEAN))
    }

    pub fn neg(&mut self, operand: ValueRef) -> ValueRef {
        let ty = self.type_of(operand);
        self.value(OpKind::Unary(UnaryOp::Neg), smallvec![operand], ty)
    }

    /// Primitive conversion, e.g. the implicit `(double)` of `2.0 + 2`.
    pub fn conv(&mut self, target: PrimitiveType, operand: ValueRef) -> ValueRef {
        self.value(OpKind::Conv, smallvec![operand], Some(TypeRef::Primitive(target)))
    }

    pub fn cast(&mut self, target: TypeRef, operand: ValueRef) -> ValueRef {
        self.value(OpKind::Cast(target.clone()), smallvec![operand], Some(target))
    }

    pub fn instance_of(&mut self, target: TypeRef, operand: ValueRef) -> ValueRef {
        self.value(OpKind::InstanceOf(target), smallvec![operand], Some(TypeRef::BOOLEAN))
    }

    /// Build a single-block body terminated by `Yield`.
    pub fn body(&mut self, f: impl FnOnce(&mut Self) -> ValueRef) -> Body {
        self.open_blocks.push(Block::default());
        let result = f(self);
        self.push(OpKind::Yield, smallvec![result], None);
        let block = self.open_blocks.pop().unwrap_or_default();
        Body {
            blocks: vec![block],
        }
    }

    /// Short-circuit `&&` over the given bodies.
    pub fn cond_and(&mut self, bodies: Vec<Body>) -> ValueRef {
        self.value(OpKind::CondAnd(bodies), SmallVec::new(), Some(TypeRef::BOOLEAN))
    }

    /// Short-circuit `||` over the given bodies.
    pub fn cond_or(&mut self, bodies: Vec<Body>) -> ValueRef {
        self.value(OpKind::CondOr(bodies), SmallVec::new(), Some(TypeRef::BOOLEAN))
    }

    /// `cond ? then : otherwise`.
    pub fn ternary(&mut self, cond: Body, then: Body, otherwise: Body) -> ValueRef {
        let ty = then
            .terminator()
            .and_then(|t| self.arena.get(t).operand(0))
            .and_then(|v| self.type_of(v));
        self.value(OpKind::Ternary(vec![cond, then, otherwise]), SmallVec::new(), ty)
    }

    /// An op outside the supported vocabulary.
    pub fn other(&mut self, name: &str, operands: &[ValueRef], result_type: Option<TypeRef>) -> ValueRef {
        self.value(
            OpKind::Other {
                name: Arc::from(name),
            },
            operands.iter().copied().collect(),
            result_type,
        )
    }

    /// Build a lambda whose single block takes `params` and returns the
    /// closure's value.
    pub fn lambda(&mut self, params: &[ParamId], f: impl FnOnce(&mut Self) -> ValueRef) -> OpId {
        self.open_blocks.push(Block {
            params: params.to_vec(),
            ops: Vec::new(),
        });
        let result = f(self);
        self.push(OpKind::Return, smallvec![result], None);
        let block = self.open_blocks.pop().unwrap_or_default();
        self.push(
            OpKind::Lambda(Body {
                blocks: vec![block],
            }),
            SmallVec::new(),
            None,
        )
    }

    /// Static type of an operand, when known.
    pub fn type_of(&self, value: ValueRef) -> Option<TypeRef> {
        match value {
            ValueRef::Result(id) => self.arena.get(id).result_type.clone(),
            ValueRef::Param(p) => Some(self.arena.param_type(p).clone()),
        }
    }
}
