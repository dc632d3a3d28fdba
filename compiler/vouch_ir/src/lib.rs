//! Vouch IR - reified expression trees.
//!
//! This crate contains the data structures the host's quoting layer hands to
//! the engine:
//! - `OpArena` holding every `Op` of a quoted predicate, addressed by `OpId`
//! - `ValueRef` naming an operand (an op result or a block parameter)
//! - `Body`/`Block` regions for lambdas and conditional operators
//! - `TypeRef`/`PrimitiveType` and member descriptors (`FieldRef`, `MethodRef`,
//!   `ConstructorRef`)
//! - `IrBuilder`, the programmatic stand-in for a quoting front-end
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: ops never own other ops, operands are `ValueRef`
//!   indices into the arena
//! - **Closed vocabulary**: `OpKind` is one enum; anything outside it is
//!   carried as `OpKind::Other` so the evaluator can report it as unsupported

mod arena;
mod builder;
mod literal;
mod op;
mod operators;
mod types;

pub use arena::OpArena;
pub use builder::IrBuilder;
pub use literal::Literal;
pub use op::{Block, Body, Op, OpId, OpKind, Operands, ParamId, ValueRef};
pub use operators::{BinaryOp, CompareOp, UnaryOp};
pub use types::{class_names, ConstructorRef, FieldRef, MethodRef, PrimitiveType, TypeRef};
