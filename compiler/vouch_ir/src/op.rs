//! Ops, operand references and regions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::literal::Literal;
use crate::operators::{BinaryOp, CompareOp, UnaryOp};
use crate::types::{ConstructorRef, FieldRef, MethodRef, TypeRef};

/// Index into the op arena.
///
/// # Design
/// `OpId(u32)` instead of `Box<Op>`: equality is an integer compare and an
/// id can key the captured-value map directly.
#[derive(Copy, Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct OpId(u32);

impl OpId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        OpId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Hash for OpId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpId({})", self.0)
    }
}

/// Index of a block parameter in the op arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ParamId(u32);

impl ParamId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ParamId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An operand: either the result of an op or a block parameter.
///
/// Block parameters stand for the quoted predicate's receiver and are
/// rendered as `this`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueRef {
    Result(OpId),
    Param(ParamId),
}

impl ValueRef {
    /// The producing op, if this is an op result.
    pub fn op(self) -> Option<OpId> {
        match self {
            ValueRef::Result(id) => Some(id),
            ValueRef::Param(_) => None,
        }
    }
}

impl From<OpId> for ValueRef {
    fn from(id: OpId) -> Self {
        ValueRef::Result(id)
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Result(id) => write!(f, "%{}", id.raw()),
            ValueRef::Param(p) => write!(f, "^{}", p.index()),
        }
    }
}

/// Operand list; almost every op has at most two.
pub type Operands = SmallVec<[ValueRef; 2]>;

/// One node of the quoted expression tree.
#[derive(Clone, PartialEq, Debug)]
pub struct Op {
    pub kind: OpKind,
    pub operands: Operands,
    /// Static result type. Required for `Conv` (the conversion target) and
    /// for array `New`.
    pub result_type: Option<TypeRef>,
}

impl Op {
    pub fn new(kind: OpKind, operands: Operands, result_type: Option<TypeRef>) -> Self {
        Op {
            kind,
            operands,
            result_type,
        }
    }

    pub fn operand(&self, index: usize) -> Option<ValueRef> {
        self.operands.get(index).copied()
    }
}

/// The closed op vocabulary.
///
/// Anything the quoting front-end produces outside this set arrives as
/// `Other` and evaluates to an unsupported node.
#[derive(Clone, PartialEq, Debug)]
pub enum OpKind {
    Constant(Literal),
    /// Local variable slot declared outside the lambda; operand-less.
    Var { name: Arc<str> },
    /// Load of a `Var`; operand 0 is the var op's result.
    VarLoad,
    /// Instance field when it has one operand (the receiver), static otherwise.
    FieldLoad(FieldRef),
    /// Method call; with a receiver, operand 0 is the receiver.
    Invoke { method: MethodRef, has_receiver: bool },
    /// Object construction or multi-dimensional array creation.
    New(ConstructorRef),
    ArrayLoad,
    ArrayLength,
    Binary(BinaryOp),
    Compare(CompareOp),
    Unary(UnaryOp),
    /// Primitive conversion to `result_type`.
    Conv,
    Cast(TypeRef),
    InstanceOf(TypeRef),
    CondAnd(Vec<Body>),
    CondOr(Vec<Body>),
    /// Bodies are condition, then-branch and else-branch.
    Ternary(Vec<Body>),
    Return,
    Yield,
    Lambda(Body),
    Other { name: Arc<str> },
}

impl OpKind {
    /// Code-model name of the op kind, used in diagnostics and dumps.
    pub fn name(&self) -> &str {
        match self {
            OpKind::Constant(_) => "constant",
            OpKind::Var { .. } => "var",
            OpKind::VarLoad => "var.load",
            OpKind::FieldLoad(_) => "field.load",
            OpKind::Invoke { .. } => "invoke",
            OpKind::New(_) => "new",
            OpKind::ArrayLoad => "array.load",
            OpKind::ArrayLength => "array.length",
            OpKind::Binary(op) => op.name(),
            OpKind::Compare(op) => op.name(),
            OpKind::Unary(op) => op.name(),
            OpKind::Conv => "conv",
            OpKind::Cast(_) => "cast",
            OpKind::InstanceOf(_) => "instanceof",
            OpKind::CondAnd(_) => "java.cand",
            OpKind::CondOr(_) => "java.cor",
            OpKind::Ternary(_) => "java.cexpression",
            OpKind::Return => "return",
            OpKind::Yield => "yield",
            OpKind::Lambda(_) => "lambda",
            OpKind::Other { name } => name,
        }
    }

    /// Child regions of the op.
    pub fn bodies(&self) -> &[Body] {
        match self {
            OpKind::CondAnd(bodies) | OpKind::CondOr(bodies) | OpKind::Ternary(bodies) => bodies,
            OpKind::Lambda(body) => std::slice::from_ref(body),
            _ => &[],
        }
    }
}

/// A region of one or more blocks.
///
/// The engine only understands single-block bodies.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Body {
    pub blocks: Vec<Block>,
}

impl Body {
    pub fn entry_block(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Terminator of the entry block: the op whose operand is the body's value.
    pub fn terminator(&self) -> Option<OpId> {
        self.entry_block().and_then(Block::terminator)
    }
}

/// A linear sequence of ops. The last op is the terminator.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub params: Vec<ParamId>,
    pub ops: Vec<OpId>,
}

impl Block {
    pub fn terminator(&self) -> Option<OpId> {
        self.ops.last().copied()
    }
}
