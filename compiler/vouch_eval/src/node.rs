//! The annotated evaluation tree.
//!
//! One `Node` per evaluated op. A node records the outcome of its op and
//! owns the nodes of the operands that were actually evaluated, in
//! evaluation order. Short-circuited operands and untaken ternary branches
//! have no node.

use vouch_ir::{OpArena, OpKind, UnaryOp, ValueRef};
use vouch_runtime::{ClassRegistry, Quoted, Throwable, Value};

use crate::errors::{Fault, OpResult};

/// Outcome of evaluating one op.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Value {
        origin: ValueRef,
        value: Value,
        children: Vec<Node>,
    },
    Exception {
        origin: ValueRef,
        throwable: Throwable,
        children: Vec<Node>,
    },
    Unsupported {
        origin: ValueRef,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn value(origin: ValueRef, value: Value, children: Vec<Node>) -> Self {
        Node::Value {
            origin,
            value,
            children,
        }
    }

    pub fn unsupported(origin: ValueRef, children: Vec<Node>) -> Self {
        Node::Unsupported { origin, children }
    }

    /// Node for an op whose own application produced `result`.
    pub fn from_result(origin: ValueRef, result: OpResult, children: Vec<Node>) -> Self {
        match result {
            Ok(value) => Node::value(origin, value, children),
            Err(Fault::Throw(throwable)) => {
                tracing::debug!(%origin, %throwable, "op threw");
                Node::Exception {
                    origin,
                    throwable,
                    children,
                }
            }
            Err(Fault::Unsupported) => Node::unsupported(origin, children),
        }
    }

    /// Failure of a parent whose evaluated `children` did not all succeed.
    ///
    /// The first exception child makes the parent throw the same
    /// throwable; otherwise the parent is unsupported. `children` is kept
    /// as is.
    pub fn derived(origin: ValueRef, children: Vec<Node>) -> Self {
        let thrown = children.iter().find_map(|child| match child {
            Node::Exception { throwable, .. } => Some(throwable.clone()),
            _ => None,
        });
        tracing::debug!(%origin, exception = thrown.is_some(), "derived failure");
        match thrown {
            Some(throwable) => Node::Exception {
                origin,
                throwable,
                children,
            },
            None => Node::unsupported(origin, children),
        }
    }

    /// The op (or block parameter) this node evaluates.
    pub fn origin(&self) -> ValueRef {
        match self {
            Node::Value { origin, .. }
            | Node::Exception { origin, .. }
            | Node::Unsupported { origin, .. } => *origin,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Value { children, .. }
            | Node::Exception { children, .. }
            | Node::Unsupported { children, .. } => children,
        }
    }

    /// The computed value, for value nodes.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Node::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value { .. })
    }

    /// Whether this value node adds nothing to a diagnostic.
    ///
    /// Trivial: a constant, a negation of a trivial node, or a conversion
    /// of a constant. Exception and unsupported nodes are never trivial.
    pub fn is_trivial(&self, arena: &OpArena) -> bool {
        let Node::Value {
            origin, children, ..
        } = self
        else {
            return false;
        };
        let Some(id) = origin.op() else {
            return false;
        };
        match (&arena.get(id).kind, children.as_slice()) {
            (OpKind::Constant(_), []) => true,
            (OpKind::Unary(UnaryOp::Neg), [child]) => child.is_trivial(arena),
            (OpKind::Conv, [child]) => {
                child.children().is_empty()
                    && child.is_value()
                    && child
                        .origin()
                        .op()
                        .is_some_and(|c| matches!(arena.get(c).kind, OpKind::Constant(_)))
            }
            _ => false,
        }
    }
}

/// The evaluation tree of one quoted predicate.
#[derive(Debug)]
pub struct Model<'q> {
    quoted: &'q Quoted,
    registry: &'q ClassRegistry,
    root: Node,
}

impl<'q> Model<'q> {
    pub fn new(quoted: &'q Quoted, registry: &'q ClassRegistry, root: Node) -> Self {
        Model {
            quoted,
            registry,
            root,
        }
    }

    pub fn quoted(&self) -> &'q Quoted {
        self.quoted
    }

    /// The registry the predicate was evaluated against.
    pub fn registry(&self) -> &'q ClassRegistry {
        self.registry
    }

    pub fn arena(&self) -> &'q OpArena {
        self.quoted.arena()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The predicate's value, when it evaluated to a boolean.
    pub fn outcome(&self) -> Option<bool> {
        self.root.result().and_then(Value::as_bool)
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}
