//! Vouch Eval - evaluator and model builder for quoted predicates.
//!
//! # Architecture
//!
//! - `Evaluator`: walks a `Quoted` predicate and builds a `Model`
//! - `Node`: per-op outcome (value, exception or unsupported) plus the
//!   nodes of the operands that were evaluated
//! - `evaluate_binary` / `evaluate_compare`: enum-based dispatch for
//!   arithmetic, bitwise, shift and comparison operators
//! - `evaluate_unary`: negation and logical not
//! - `convert`: the primitive conversion matrix behind `Conv`
//!
//! Values, throwables and the class registry come from `vouch_runtime`.

mod arrays;
mod conversions;
pub mod errors;
mod evaluator;
mod node;
mod operators;
mod stack;
mod unary_operators;

pub use arrays::{allocate, DEFAULT_MAX_ARRAY_ELEMENTS};
pub use conversions::convert;
pub use errors::{Fault, OpResult, ResolveError};
pub use evaluator::Evaluator;
pub use node::{Model, Node};
pub use operators::{evaluate_binary, evaluate_compare, values_equal};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
