//! Evaluation outcomes and fatal resolution errors.
//!
//! Two kinds of failure exist, and they travel differently:
//! - `Fault`: the op could not produce a value. A thrown `Throwable` becomes
//!   an exception node, anything else an unsupported node. Faults are part
//!   of the model and never leave the evaluator.
//! - `ResolveError`: the quoted tree names a class or member the registry
//!   does not know. That is a broken input, not a user failure, so it aborts
//!   `Evaluator::build`.

use std::fmt;
use std::sync::Arc;

use vouch_runtime::{Throwable, Value};

/// Why an op produced no value.
#[derive(Clone, Debug, PartialEq)]
pub enum Fault {
    /// Evaluation raised an exception.
    Throw(Throwable),
    /// The op or its operand shapes are outside what the evaluator handles.
    Unsupported,
}

impl From<Throwable> for Fault {
    fn from(throwable: Throwable) -> Self {
        Fault::Throw(throwable)
    }
}

/// Result of applying one op to already evaluated operands.
pub type OpResult = Result<Value, Fault>;

/// The quoted tree references something the class registry cannot resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    UnknownClass { name: Arc<str> },
    UnknownField { owner: Arc<str>, name: Arc<str> },
    UnknownMethod { signature: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownClass { name } => write!(f, "cannot resolve class {name}"),
            ResolveError::UnknownField { owner, name } => {
                write!(f, "cannot resolve field {owner}.{name}")
            }
            ResolveError::UnknownMethod { signature } => {
                write!(f, "cannot resolve method {signature}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

#[cold]
pub(crate) fn unknown_class(name: &str) -> ResolveError {
    ResolveError::UnknownClass {
        name: Arc::from(name),
    }
}

#[cold]
pub(crate) fn unknown_field(owner: &str, name: &str) -> ResolveError {
    ResolveError::UnknownField {
        owner: Arc::from(owner),
        name: Arc::from(name),
    }
}

#[cold]
pub(crate) fn unknown_method(signature: impl fmt::Display) -> ResolveError {
    ResolveError::UnknownMethod {
        signature: signature.to_string(),
    }
}
