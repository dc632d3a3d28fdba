//! Vouch Formatter
//!
//! Turns an evaluated `Model` into the text of an assertion failure.
//!
//! # Architecture
//!
//! - [`value`]: `ValueFormatter` and the default value rendering (literal
//!   syntax, escaping, abbreviation against a length hint)
//! - [`decompiler`]: `Decompiler` and `Precedence`, rendering ops back to
//!   source expressions with the parentheses precedence requires
//! - [`assertion`]: `AssertionFormatter`, one line per reported node in
//!   post-order
//!
//! ```text
//! 2 * 2 -> 4
//! 2 + 2 * 2 -> 6
//! 2 + 2 * 2 == 7 -> false
//! ```

pub mod assertion;
pub mod decompiler;
pub mod value;

pub use assertion::{AssertionFormatter, DefaultAssertionFormatter};
pub use decompiler::{Decompiler, Precedence};
pub use value::{DefaultValueFormatter, ValueFormatter, DEFAULT_LENGTH_HINT};
