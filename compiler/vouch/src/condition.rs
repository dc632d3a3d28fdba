//! Predicates the asserter accepts.

use vouch_runtime::Quoted;

/// A quoted boolean predicate.
pub trait Condition {
    /// The predicate's expression tree and captured values.
    fn quoted(&self) -> &Quoted;

    /// Run the predicate natively, when the host can.
    ///
    /// Used when the expression tree cannot be evaluated at all.
    fn evaluate(&self) -> Option<bool> {
        None
    }
}

impl Condition for Quoted {
    fn quoted(&self) -> &Quoted {
        self
    }
}

/// A quoted predicate together with the closure it was quoted from.
///
/// ```text
/// let x = 3;
/// let condition = Reified::new(quoted_x_eq_3, move || x == 3);
/// vouch::assert_true(&condition);
/// ```
#[derive(Debug)]
pub struct Reified<F> {
    quoted: Quoted,
    direct: F,
}

impl<F> Reified<F>
where
    F: Fn() -> bool,
{
    pub fn new(quoted: Quoted, direct: F) -> Self {
        Reified { quoted, direct }
    }
}

impl<F> Condition for Reified<F>
where
    F: Fn() -> bool,
{
    fn quoted(&self) -> &Quoted {
        &self.quoted
    }

    fn evaluate(&self) -> Option<bool> {
        Some((self.direct)())
    }
}
