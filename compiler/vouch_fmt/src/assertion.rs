//! Assertion diagnostics.
//!
//! A diagnostic lists the evaluated subexpressions of a predicate in
//! post-order, one line each:
//!
//! ```text
//! 2 * 2 -> 4
//! 2 + 2 * 2 -> 6
//! 2 + 2 * 2 == 5 -> false
//! ```
//!
//! Constants and other trivial nodes are left out, except as the
//! predicate itself.

use std::fmt::{self, Write};
use std::sync::Arc;

use vouch_eval::{ensure_sufficient_stack, Model, Node};
use vouch_ir::{OpArena, ValueRef};
use vouch_runtime::Value;

use crate::decompiler::Decompiler;
use crate::value::{DefaultValueFormatter, ValueFormatter};

/// Renders the model of a failed predicate.
///
/// Any `Fn(&Model) -> String` is an assertion formatter.
pub trait AssertionFormatter {
    fn format_assertion(&self, model: &Model<'_>) -> String;
}

impl<F> AssertionFormatter for F
where
    F: Fn(&Model<'_>) -> String,
{
    fn format_assertion(&self, model: &Model<'_>) -> String {
        self(model)
    }
}

/// One line per non-trivial node, children first, ending with the root.
#[derive(Clone)]
pub struct DefaultAssertionFormatter {
    value_formatter: Arc<dyn ValueFormatter + Send + Sync>,
}

impl DefaultAssertionFormatter {
    /// Formatter rendering values with `value_formatter`.
    pub fn new(value_formatter: Arc<dyn ValueFormatter + Send + Sync>) -> Self {
        DefaultAssertionFormatter { value_formatter }
    }

    fn write_node(
        &self,
        out: &mut String,
        decompiler: &Decompiler<'_>,
        arena: &OpArena,
        node: &Node,
        is_root: bool,
    ) {
        ensure_sufficient_stack(|| {
            for child in node.children() {
                self.write_node(out, decompiler, arena, child, false);
            }
            let text = decompiler.value_text(node.origin());
            // Writing to a String cannot fail.
            match node {
                Node::Unsupported { origin, .. } => {
                    let kind = match origin {
                        ValueRef::Result(id) => arena.get(*id).kind.name(),
                        ValueRef::Param(_) => "parameter",
                    };
                    let _ = writeln!(out, "Unsupported node: {text} ({kind})");
                }
                Node::Exception { throwable, .. } => {
                    let thrown = self.value_formatter.format(&Value::throwable(throwable.clone()));
                    let _ = writeln!(out, "{text} -> throws {thrown}");
                }
                Node::Value { value, .. } => {
                    if is_root || !node.is_trivial(arena) {
                        let _ = writeln!(out, "{text} -> {}", self.value_formatter.format(value));
                    }
                }
            }
        });
    }
}

impl Default for DefaultAssertionFormatter {
    fn default() -> Self {
        Self::new(Arc::new(DefaultValueFormatter::default()))
    }
}

impl AssertionFormatter for DefaultAssertionFormatter {
    #[tracing::instrument(level = "trace", skip_all)]
    fn format_assertion(&self, model: &Model<'_>) -> String {
        let arena = model.arena();
        let decompiler =
            Decompiler::new(arena, &*self.value_formatter).with_registry(model.registry());
        let mut out = String::new();
        self.write_node(&mut out, &decompiler, arena, model.root(), true);
        out
    }
}

impl fmt::Debug for DefaultAssertionFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAssertionFormatter")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vouch_eval::Evaluator;
    use vouch_ir::{BinaryOp, CompareOp, PrimitiveType, TypeRef};
    use vouch_runtime::{ClassRegistry, Quoted, QuotedBuilder};

    fn diagnostic(quoted: &Quoted) -> String {
        let registry = ClassRegistry::with_builtins();
        let model = Evaluator::new(&registry).build(quoted).unwrap();
        DefaultAssertionFormatter::default().format_assertion(&model)
    }

    #[test]
    fn lines_are_post_order_without_constants() {
        let quoted = QuotedBuilder::new().lambda(|b| {
            let two = b.constant(2);
            let lhs = b.constant(2);
            let rhs = b.constant(2);
            let product = b.binary(BinaryOp::Mul, lhs, rhs);
            let sum = b.binary(BinaryOp::Add, two, product);
            let five = b.constant(5);
            b.compare(CompareOp::Eq, sum, five)
        });
        assert_eq!(
            diagnostic(&quoted),
            "2 * 2 -> 4\n2 + 2 * 2 -> 6\n2 + 2 * 2 == 5 -> false\n"
        );
    }

    #[test]
    fn trivial_root_keeps_its_line() {
        let constant = QuotedBuilder::new().lambda(|b| b.constant(false));
        assert_eq!(diagnostic(&constant), "false -> false\n");

        let negated = QuotedBuilder::new().lambda(|b| {
            let one = b.constant(1);
            b.neg(one)
        });
        assert_eq!(diagnostic(&negated), "-1 -> -1\n");

        let widened = QuotedBuilder::new().lambda(|b| {
            let zero = b.constant(0);
            b.conv(PrimitiveType::Long, zero)
        });
        assert_eq!(diagnostic(&widened), "(long)0 -> 0L\n");
    }

    #[test]
    fn exceptions_repeat_on_every_ancestor() {
        let quoted = QuotedBuilder::new().lambda(|b| {
            let one = b.constant(1);
            let zero = b.constant(0);
            let quotient = b.binary(BinaryOp::Div, one, zero);
            let one = b.constant(1);
            b.compare(CompareOp::Eq, quotient, one)
        });
        assert_eq!(
            diagnostic(&quoted),
            "1 / 0 -> throws java.lang.ArithmeticException: / by zero\n\
             1 / 0 == 1 -> throws java.lang.ArithmeticException: / by zero\n"
        );
    }

    #[test]
    fn unsupported_nodes_name_their_kind() {
        let mut q = QuotedBuilder::new();
        let x = q.local("x", TypeRef::INT, Value::Int(3));
        let quoted = q.lambda(|b| {
            let load = b.var_load(x);
            let switched = b.other("java.switch", &[load], Some(TypeRef::INT));
            let three = b.constant(3);
            b.compare(CompareOp::Eq, switched, three)
        });
        assert_eq!(
            diagnostic(&quoted),
            "Unsupported node: %2 = java.switch %1 : int:java.switch (java.switch)\n\
             Unsupported node: %2 = java.switch %1 : int:java.switch == 3 (eq)\n"
        );
    }

    #[test]
    fn custom_value_formatter_is_used() {
        let quoted = QuotedBuilder::new().lambda(|b| {
            let one = b.constant(1);
            let two = b.constant(2);
            b.compare(CompareOp::Gt, one, two)
        });
        let registry = ClassRegistry::with_builtins();
        let model = Evaluator::new(&registry).build(&quoted).unwrap();
        let formatter = DefaultAssertionFormatter::new(Arc::new(|value: &Value| format!("<{value}>")));
        assert_eq!(formatter.format_assertion(&model), "<1> > <2> -> <false>\n");
    }

    #[test]
    fn functions_are_assertion_formatters() {
        fn outcome(model: &Model<'_>) -> String {
            format!("outcome {:?}", model.outcome())
        }

        let quoted = QuotedBuilder::new().lambda(|b| b.constant(false));
        let registry = ClassRegistry::with_builtins();
        let model = Evaluator::new(&registry).build(&quoted).unwrap();
        assert_eq!(outcome.format_assertion(&model), "outcome Some(false)");
    }
}
