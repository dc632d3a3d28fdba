//! Assertion failures.

use thiserror::Error;
use vouch_eval::ResolveError;

/// Why an assertion did not pass.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The predicate was false, threw, or could not be evaluated.
    ///
    /// Displays as the message (or `failed`) followed by the diagnostic.
    #[error("{}\n{}", .message.as_deref().unwrap_or("failed"), .diagnostic)]
    Failed {
        message: Option<String>,
        diagnostic: String,
    },

    /// The predicate refers to a class or member the registry lacks.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl AssertionError {
    /// The per-subexpression report, for failed predicates.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            AssertionError::Failed { diagnostic, .. } => Some(diagnostic),
            AssertionError::Resolve(_) => None,
        }
    }
}
