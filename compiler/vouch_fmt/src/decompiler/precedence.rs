//! Operator precedence for decompilation.

use vouch_ir::{BinaryOp, CompareOp, OpKind};

/// Binding strength of an expression form, strongest first.
///
/// The derived ordering is the table order: `Literal < Dereference < ...
/// < Parentheses`, so a smaller value binds tighter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Literal,
    /// `a.b`, `a[i]`, `a.f()`
    Dereference,
    Postfix,
    /// Prefix operators and casts.
    Unary,
    Multiplicative,
    Additive,
    Shift,
    /// Ordering tests and `instanceof`.
    Relational,
    Equality,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    Ternary,
    Assignment,
    /// Outermost context: nothing needs parentheses here.
    Parentheses,
}

impl Precedence {
    /// Precedence of the expression an op renders as.
    pub fn of(kind: &OpKind) -> Self {
        match kind {
            OpKind::Ternary(_) => Precedence::Ternary,
            OpKind::CondAnd(_) => Precedence::LogicalAnd,
            OpKind::CondOr(_) => Precedence::LogicalOr,
            OpKind::Binary(op) => match op {
                BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
                BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Precedence::Multiplicative,
                BinaryOp::Shl | BinaryOp::AShr | BinaryOp::LShr => Precedence::Shift,
                BinaryOp::And => Precedence::BitwiseAnd,
                BinaryOp::Xor => Precedence::BitwiseXor,
                BinaryOp::Or => Precedence::BitwiseOr,
            },
            OpKind::Compare(CompareOp::Eq | CompareOp::Neq) => Precedence::Equality,
            OpKind::Compare(_) | OpKind::InstanceOf(_) => Precedence::Relational,
            OpKind::Unary(_) | OpKind::Conv | OpKind::Cast(_) => Precedence::Unary,
            OpKind::ArrayLoad
            | OpKind::Invoke { .. }
            | OpKind::FieldLoad(_)
            | OpKind::ArrayLength => Precedence::Dereference,
            _ => Precedence::Literal,
        }
    }

    /// Whether an expression of this precedence can appear bare inside an
    /// operator of precedence `outer`.
    ///
    /// Equal precedence needs parentheses, except for chained dereferences
    /// (`a.b().c[0]`).
    pub fn fits_in(self, outer: Precedence) -> bool {
        self < outer || (self == outer && self == Precedence::Dereference)
    }
}
