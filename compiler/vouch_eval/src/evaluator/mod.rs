//! The evaluator: walks a quoted predicate and builds its `Model`.
//!
//! # Evaluation Order
//!
//! Operands are evaluated left to right. The first operand that does not
//! produce a value stops evaluation of its siblings, and the parent becomes
//! a derived failure over the children evaluated so far. `&&`/`||` stop at
//! the first operand that decides the result; a ternary evaluates only the
//! chosen branch.
//!
//! # Failures
//!
//! Runtime failures are nodes (`Node::Exception`, `Node::Unsupported`).
//! Only references the class registry cannot resolve abort the walk, as a
//! `ResolveError`.

mod members;

use vouch_ir::{Body, Op, OpArena, OpId, OpKind, ValueRef};
use vouch_runtime::{ClassRegistry, Quoted, Value};

use crate::arrays::DEFAULT_MAX_ARRAY_ELEMENTS;
use crate::conversions::convert;
use crate::errors::{Fault, OpResult, ResolveError};
use crate::node::{Model, Node};
use crate::operators::{evaluate_binary, evaluate_compare};
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;

/// Builds models of quoted predicates against a class registry.
///
/// ```text
/// let registry = ClassRegistry::with_builtins();
/// let model = Evaluator::new(&registry)
///     .max_array_elements(1 << 20)
///     .build(&quoted)?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'r> {
    registry: &'r ClassRegistry,
    max_array_elements: usize,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Evaluator {
            registry,
            max_array_elements: DEFAULT_MAX_ARRAY_ELEMENTS,
        }
    }

    /// Cap on the number of elements a single array creation may allocate.
    #[must_use]
    pub fn max_array_elements(mut self, max: usize) -> Self {
        self.max_array_elements = max;
        self
    }

    /// Evaluate `quoted` and build its model.
    ///
    /// The root must be a lambda whose single block ends in its only
    /// `Return`; the model's root is the node of the returned expression.
    /// Any other shape yields an unsupported root with no children.
    #[tracing::instrument(level = "debug", skip_all, fields(ops = quoted.arena().len()))]
    pub fn build<'q>(&self, quoted: &'q Quoted) -> Result<Model<'q>, ResolveError>
    where
        'r: 'q,
    {
        let arena = quoted.arena();
        let root = match lambda_result(arena, quoted.root()) {
            Some(result) => Walk {
                evaluator: self,
                arena,
                quoted,
            }
            .eval(result)?,
            None => {
                tracing::debug!(root = %arena.dump(quoted.root()), "root is not a single-return lambda");
                Node::unsupported(ValueRef::Result(quoted.root()), Vec::new())
            }
        };
        Ok(Model::new(quoted, self.registry, root))
    }
}

/// Operand of the single `Return` of a single-block lambda.
fn lambda_result(arena: &OpArena, root: OpId) -> Option<ValueRef> {
    let OpKind::Lambda(body) = &arena.get(root).kind else {
        return None;
    };
    let [block] = body.blocks.as_slice() else {
        return None;
    };
    let mut returns = block
        .ops
        .iter()
        .filter(|&&id| arena.get(id).kind == OpKind::Return);
    let ret = *returns.next()?;
    if returns.next().is_some() || block.terminator() != Some(ret) {
        return None;
    }
    arena.get(ret).operand(0)
}

/// Operands evaluated left to right.
enum Evaluated {
    /// Every operand produced a value.
    Ready(Vec<Node>, Vec<Value>),
    /// Evaluation stopped at the last node in the list.
    Failed(Vec<Node>),
}

/// One evaluation of one quoted predicate.
struct Walk<'e, 'r, 'q> {
    evaluator: &'e Evaluator<'r>,
    arena: &'q OpArena,
    quoted: &'q Quoted,
}

impl Walk<'_, '_, '_> {
    fn registry(&self) -> &ClassRegistry {
        self.evaluator.registry
    }

    fn eval(&self, value: ValueRef) -> Result<Node, ResolveError> {
        match value {
            ValueRef::Param(_) => Ok(match self.quoted.captured(value) {
                Some(captured) => Node::value(value, captured.value().clone(), Vec::new()),
                None => Node::unsupported(value, Vec::new()),
            }),
            ValueRef::Result(id) => ensure_sufficient_stack(|| self.eval_op(id)),
        }
    }

    fn eval_op(&self, id: OpId) -> Result<Node, ResolveError> {
        let op = self.arena.get(id);
        let origin = ValueRef::Result(id);
        tracing::trace!(%origin, kind = op.kind.name(), "eval");
        match &op.kind {
            OpKind::Constant(literal) => Ok(Node::value(origin, Value::from_literal(literal), Vec::new())),
            OpKind::VarLoad => Ok(self.var_load(origin, op)),
            OpKind::FieldLoad(field) => self.field_load(origin, op, field),
            OpKind::Invoke {
                method,
                has_receiver,
            } => self.invoke(origin, op, method, *has_receiver),
            OpKind::New(ctor) => self.new_instance(origin, op, ctor),
            OpKind::ArrayLoad => self.apply(origin, op, members::array_load),
            OpKind::ArrayLength => self.apply(origin, op, members::array_length),
            OpKind::Binary(bin) => self.apply(origin, op, |values| match values {
                [left, right] => evaluate_binary(left, right, *bin),
                _ => Err(Fault::Unsupported),
            }),
            OpKind::Compare(cmp) => self.apply(origin, op, |values| match values {
                [left, right] => evaluate_compare(left, right, *cmp),
                _ => Err(Fault::Unsupported),
            }),
            OpKind::Unary(unary) => self.apply(origin, op, |values| match values {
                [operand] => evaluate_unary(operand, *unary),
                _ => Err(Fault::Unsupported),
            }),
            OpKind::Conv => {
                let target = op.result_type.as_ref().and_then(|ty| ty.as_primitive());
                self.apply(origin, op, |values| match (values, target) {
                    ([operand], Some(target)) => convert(operand, target),
                    _ => Err(Fault::Unsupported),
                })
            }
            OpKind::Cast(ty) => self.apply(origin, op, |values| match values {
                [operand] => self.cast(operand, ty),
                _ => Err(Fault::Unsupported),
            }),
            OpKind::InstanceOf(ty) => self.apply(origin, op, |values| match values {
                [operand] => Ok(Value::Bool(self.registry().instance_of(operand, ty)?)),
                _ => Err(Fault::Unsupported),
            }),
            OpKind::CondAnd(bodies) => self.short_circuit(origin, bodies, true),
            OpKind::CondOr(bodies) => self.short_circuit(origin, bodies, false),
            OpKind::Ternary(bodies) => self.ternary(origin, bodies),
            OpKind::Return | OpKind::Yield => match op.operand(0) {
                Some(operand) => self.eval(operand),
                None => Ok(Node::unsupported(origin, Vec::new())),
            },
            OpKind::Var { .. }
            | OpKind::Lambda(_)
            | OpKind::Other { .. } => {
                tracing::debug!(%origin, kind = op.kind.name(), "unsupported op");
                Ok(Node::unsupported(origin, Vec::new()))
            }
        }
    }

    /// Evaluate `operands` left to right, stopping at the first failure.
    fn eval_operands(&self, operands: &[ValueRef]) -> Result<Evaluated, ResolveError> {
        let mut children = Vec::with_capacity(operands.len());
        let mut values = Vec::with_capacity(operands.len());
        for &operand in operands {
            let child = self.eval(operand)?;
            match child.result() {
                Some(value) => values.push(value.clone()),
                None => {
                    children.push(child);
                    return Ok(Evaluated::Failed(children));
                }
            }
            children.push(child);
        }
        Ok(Evaluated::Ready(children, values))
    }

    /// Evaluate all operands of `op`, then apply `f` to their values.
    fn apply(
        &self,
        origin: ValueRef,
        op: &Op,
        f: impl FnOnce(&[Value]) -> OpResult,
    ) -> Result<Node, ResolveError> {
        Ok(match self.eval_operands(&op.operands)? {
            Evaluated::Ready(children, values) => Node::from_result(origin, f(&values), children),
            Evaluated::Failed(children) => Node::derived(origin, children),
        })
    }

    /// `VarLoad`: the captured value of the loaded slot.
    fn var_load(&self, origin: ValueRef, op: &Op) -> Node {
        match op.operand(0).and_then(|var| self.quoted.captured(var)) {
            Some(captured) => Node::value(origin, captured.value().clone(), Vec::new()),
            None => {
                tracing::debug!(%origin, "no captured value for variable");
                Node::unsupported(origin, Vec::new())
            }
        }
    }

    /// `&&` (`is_and`) or `||` over `bodies`, stopping at the first operand
    /// whose value differs from `is_and`.
    fn short_circuit(&self, origin: ValueRef, bodies: &[Body], is_and: bool) -> Result<Node, ResolveError> {
        let mut children = Vec::with_capacity(bodies.len());
        for body in bodies {
            let Some(value) = self.body_result(body) else {
                return Ok(Node::derived(origin, children));
            };
            let child = self.eval(value)?;
            let decided = child.result().and_then(Value::as_bool);
            children.push(child);
            match decided {
                None => return Ok(Node::derived(origin, children)),
                Some(b) if b != is_and => return Ok(Node::value(origin, Value::Bool(b), children)),
                Some(_) => {}
            }
        }
        Ok(Node::value(origin, Value::Bool(is_and), children))
    }

    /// `cond ? then : otherwise`; children are the condition and the taken
    /// branch.
    fn ternary(&self, origin: ValueRef, bodies: &[Body]) -> Result<Node, ResolveError> {
        let [cond, then, otherwise] = bodies else {
            return Ok(Node::unsupported(origin, Vec::new()));
        };
        let Some(cond) = self.body_result(cond) else {
            return Ok(Node::unsupported(origin, Vec::new()));
        };
        let cond = self.eval(cond)?;
        let Some(flag) = cond.result().and_then(Value::as_bool) else {
            return Ok(Node::derived(origin, vec![cond]));
        };
        let branch = if flag { then } else { otherwise };
        let Some(branch) = self.body_result(branch) else {
            return Ok(Node::derived(origin, vec![cond]));
        };
        let branch = self.eval(branch)?;
        let value = branch.result().cloned();
        let children = vec![cond, branch];
        Ok(match value {
            Some(value) => Node::value(origin, value, children),
            None => Node::derived(origin, children),
        })
    }

    /// Value yielded by a single-block body.
    fn body_result(&self, body: &Body) -> Option<ValueRef> {
        let [block] = body.blocks.as_slice() else {
            return None;
        };
        let terminator = self.arena.get(block.terminator()?);
        match terminator.kind {
            OpKind::Yield | OpKind::Return => terminator.operand(0),
            _ => None,
        }
    }
}
