//! Vouch - power assertions for quoted predicates.
//!
//! A predicate is handed over as a [`Quoted`] expression tree. When it does
//! not hold, the failure message lists every evaluated subexpression with
//! its value:
//!
//! ```text
//! failed
//! 2 * 2 -> 4
//! 2 + 2 * 2 -> 6
//! 2 + 2 * 2 == 5 -> false
//! ```
//!
//! # Entry points
//!
//! - [`check`]: `Result`-returning assertion with the process-wide defaults
//! - [`assert_true`] / [`assert_true_with`]: panic on failure
//! - [`Asserter`]: an explicitly configured assertion engine
//!
//! Classes used by quoted predicates are resolved against [`registry()`],
//! which starts out with the built-in `java.lang`/`java.util` classes.

mod asserter;
mod condition;
mod config;
mod error;

use std::sync::{Arc, Once, OnceLock};

pub use asserter::{Asserter, AsserterBuilder};
pub use condition::{Condition, Reified};
pub use config::Config;
pub use error::AssertionError;

pub use vouch_eval::{Model, Node, ResolveError};
pub use vouch_fmt::{
    AssertionFormatter, DefaultAssertionFormatter, DefaultValueFormatter, ValueFormatter,
};
pub use vouch_ir as ir;
pub use vouch_runtime::{ClassDef, ClassRegistry, Quoted, QuotedBuilder, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=vouch=debug` or
/// `RUST_LOG=vouch_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// The class registry shared by the default asserter.
///
/// Register host classes here before asserting on predicates that use them.
pub fn registry() -> Arc<ClassRegistry> {
    static REGISTRY: OnceLock<Arc<ClassRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(ClassRegistry::with_builtins())))
}

/// The asserter behind [`check`], configured from the environment.
fn default_asserter() -> &'static Asserter {
    static ASSERTER: OnceLock<Asserter> = OnceLock::new();
    ASSERTER.get_or_init(|| Asserter::builder().config(Config::from_env()).build())
}

/// Evaluate `condition`; `Err` carries the diagnostic when it does not hold.
pub fn check<C: Condition + ?Sized>(condition: &C) -> Result<(), AssertionError> {
    default_asserter().check(condition)
}

/// Like [`check`], with `message` as the first line of the failure.
pub fn check_with<C: Condition + ?Sized>(message: &str, condition: &C) -> Result<(), AssertionError> {
    default_asserter().check_with(message, condition)
}

/// Assert that `condition` holds.
///
/// # Panics
/// Panics with the diagnostic when it does not.
#[track_caller]
pub fn assert_true<C: Condition + ?Sized>(condition: &C) {
    if let Err(error) = check(condition) {
        panic!("{error}");
    }
}

/// Assert that `condition` holds, with `message` heading the failure.
///
/// # Panics
/// Panics with the message and diagnostic when it does not.
#[track_caller]
pub fn assert_true_with<C: Condition + ?Sized>(message: &str, condition: &C) {
    if let Err(error) = check_with(message, condition) {
        panic!("{error}");
    }
}
