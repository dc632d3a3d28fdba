//! Decompiler: renders ops back to source expressions.
//!
//! The output is meant for humans reading a diagnostic and need not be a
//! compilable expression. Operands are wrapped in parentheses only when
//! precedence requires it (see [`Precedence::fits_in`]).
//!
//! # Forms
//!
//! | Op | Text |
//! |---|---|
//! | constant | value formatter output |
//! | variable load | variable name |
//! | field load | `recv.name`, `Owner.name` |
//! | invoke | `recv.name(a, b)`, `Owner.name(a,b)` |
//! | new | `new Type(a,b)`, `new int[n][m]` |
//! | cast, conversion | `(Type)x` |
//! | anything else | structural dump `text:kind` |
//!
//! `Owner` is the class declaring a static member when a registry is
//! attached and knows it, the descriptor's owner otherwise.

mod precedence;

pub use precedence::Precedence;

use std::sync::Arc;

use vouch_eval::ensure_sufficient_stack;
use vouch_ir::{Body, Op, OpArena, OpId, OpKind, TypeRef, UnaryOp, ValueRef};
use vouch_runtime::{ClassRegistry, Value};

use crate::value::ValueFormatter;

/// Renders the ops of one arena.
#[derive(Clone, Copy)]
pub struct Decompiler<'a> {
    arena: &'a OpArena,
    formatter: &'a dyn ValueFormatter,
    registry: Option<&'a ClassRegistry>,
}

impl<'a> Decompiler<'a> {
    /// `formatter` renders constants.
    pub fn new(arena: &'a OpArena, formatter: &'a dyn ValueFormatter) -> Self {
        Decompiler {
            arena,
            formatter,
            registry: None,
        }
    }

    /// Name static members by the class that declares them in `registry`.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a ClassRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Text of the expression `id` computes, never parenthesized.
    pub fn op_text(&self, id: OpId) -> String {
        ensure_sufficient_stack(|| self.render(id))
    }

    /// Text of `id` as an operand of an operator of precedence `outer`.
    pub fn op_text_in(&self, id: OpId, outer: Precedence) -> String {
        let text = self.op_text(id);
        if Precedence::of(&self.arena.get(id).kind).fits_in(outer) {
            text
        } else {
            format!("({text})")
        }
    }

    /// Text of an operand in outermost position. Block parameters are the
    /// predicate's receiver and print as `this`.
    pub fn value_text(&self, value: ValueRef) -> String {
        self.value_text_in(value, Precedence::Parentheses)
    }

    pub fn value_text_in(&self, value: ValueRef, outer: Precedence) -> String {
        match value {
            ValueRef::Result(id) => self.op_text_in(id, outer),
            ValueRef::Param(_) => "this".to_string(),
        }
    }

    fn render(&self, id: OpId) -> String {
        let op = self.arena.get(id);
        let prec = Precedence::of(&op.kind);
        match (&op.kind, op.operands.as_slice()) {
            (OpKind::Constant(literal), []) => self.formatter.format(&Value::from_literal(literal)),
            (OpKind::Var { name }, _) => name.to_string(),
            (OpKind::VarLoad, [var]) => self.value_text(*var),
            (OpKind::FieldLoad(field), [receiver]) => {
                format!("{}.{}", self.value_text_in(*receiver, prec), field.name)
            }
            (OpKind::FieldLoad(field), []) => {
                let owner = self.declaring_class(&field.owner, |registry, class| {
                    registry.static_field_owner(class, &field.name)
                });
                format!("{owner}.{}", field.name)
            }
            (
                OpKind::Invoke {
                    method,
                    has_receiver: true,
                },
                [receiver, args @ ..],
            ) => format!(
                "{}.{}({})",
                self.value_text_in(*receiver, prec),
                method.name,
                self.join(args, ", ")
            ),
            (
                OpKind::Invoke {
                    method,
                    has_receiver: false,
                },
                args,
            ) => {
                let owner = self.declaring_class(&method.owner, |registry, class| {
                    registry.static_method_owner(class, &method.name, method.arity())
                });
                format!("{owner}.{}({})", method.name, self.join(args, ","))
            }
            (OpKind::New(ctor), dims) if ctor.ty.is_array() => {
                let mut text = format!("new {}", ctor.ty.deep_component().simple_name());
                for &dim in dims {
                    text.push('[');
                    text.push_str(&self.value_text(dim));
                    text.push(']');
                }
                text
            }
            (OpKind::New(ctor), args) => {
                format!("new {}({})", ctor.ty.simple_name(), self.join(args, ","))
            }
            (OpKind::ArrayLoad, [array, index]) => format!(
                "{}[{}]",
                self.value_text_in(*array, prec),
                self.value_text(*index)
            ),
            (OpKind::ArrayLength, [array]) => format!("{}.length", self.value_text_in(*array, prec)),
            (OpKind::Binary(bin), [left, right]) => self.infix(*left, bin.as_symbol(), *right, prec),
            (OpKind::Compare(cmp), [left, right]) => self.infix(*left, cmp.as_symbol(), *right, prec),
            (OpKind::Unary(unary), [operand]) => {
                let text = self.value_text_in(*operand, prec);
                if *unary == UnaryOp::Neg && text.starts_with('-') {
                    format!("-({text})")
                } else {
                    format!("{}{text}", unary.as_symbol())
                }
            }
            (OpKind::Conv, [operand]) => match &op.result_type {
                Some(ty) => format!("({}){}", ty.simple_name(), self.value_text_in(*operand, prec)),
                None => self.fallback(id, op),
            },
            (OpKind::Cast(ty), [operand]) => {
                format!("({}){}", ty.simple_name(), self.value_text_in(*operand, prec))
            }
            (OpKind::InstanceOf(ty), [operand]) => format!(
                "{} instanceof {}",
                self.value_text_in(*operand, prec),
                ty.simple_name()
            ),
            (OpKind::CondAnd(bodies), []) => self.join_bodies(bodies, " && ", prec),
            (OpKind::CondOr(bodies), []) => self.join_bodies(bodies, " || ", prec),
            (OpKind::Ternary(bodies), []) => match bodies.as_slice() {
                [cond, then, otherwise] => format!(
                    "{} ? {} : {}",
                    self.body_text(cond, prec),
                    self.body_text(then, prec),
                    self.body_text(otherwise, prec)
                ),
                _ => self.fallback(id, op),
            },
            (OpKind::Return, [value]) => format!("return {}", self.value_text(*value)),
            (OpKind::Yield, [value]) => self.value_text(*value),
            _ => self.fallback(id, op),
        }
    }

    /// Simple name of the class declaring a static member of `owner`.
    fn declaring_class(
        &self,
        owner: &TypeRef,
        lookup: impl FnOnce(&ClassRegistry, &str) -> Option<Arc<str>>,
    ) -> String {
        let declared = match (self.registry, owner) {
            (Some(registry), TypeRef::Class(class)) => lookup(registry, &**class),
            _ => None,
        };
        match declared {
            Some(class) => TypeRef::class(&*class).simple_name(),
            None => owner.simple_name(),
        }
    }

    fn infix(&self, left: ValueRef, symbol: &str, right: ValueRef, prec: Precedence) -> String {
        format!(
            "{} {symbol} {}",
            self.value_text_in(left, prec),
            self.value_text_in(right, prec)
        )
    }

    fn join(&self, values: &[ValueRef], separator: &str) -> String {
        values
            .iter()
            .map(|&value| self.value_text(value))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn join_bodies(&self, bodies: &[Body], separator: &str, prec: Precedence) -> String {
        bodies
            .iter()
            .map(|body| self.body_text(body, prec))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Text of the value a conditional operand body yields.
    fn body_text(&self, body: &Body, prec: Precedence) -> String {
        let Some(terminator) = body.terminator() else {
            return String::new();
        };
        let op = self.arena.get(terminator);
        match (&op.kind, op.operands.as_slice()) {
            (OpKind::Yield | OpKind::Return, [value]) => self.value_text_in(*value, prec),
            _ => self.op_text_in(terminator, prec),
        }
    }

    /// Structural dump for ops without a source form.
    fn fallback(&self, id: OpId, op: &Op) -> String {
        tracing::trace!(op = %ValueRef::Result(id), kind = op.kind.name(), "no source form");
        format!("{}:{}", self.arena.dump(id), op.kind.name())
    }
}

impl std::fmt::Debug for Decompiler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decompiler")
            .field("ops", &self.arena.len())
            .finish_non_exhaustive()
    }
}
