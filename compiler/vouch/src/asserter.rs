//! The configured assertion engine.

use std::fmt;
use std::sync::Arc;

use vouch_eval::{Evaluator, Model, Node};
use vouch_fmt::{AssertionFormatter, DefaultAssertionFormatter, DefaultValueFormatter, ValueFormatter};
use vouch_runtime::ClassRegistry;

use crate::condition::Condition;
use crate::config::Config;
use crate::error::AssertionError;

/// Evaluates conditions and formats the failures.
///
/// ```text
/// let asserter = Asserter::builder()
///     .registry(registry)
///     .length_hint(40)
///     .build();
/// asserter.check(&quoted)?;
/// ```
#[derive(Clone)]
pub struct Asserter {
    registry: Arc<ClassRegistry>,
    assertion_formatter: Arc<dyn AssertionFormatter + Send + Sync>,
    max_array_elements: usize,
}

impl Asserter {
    pub fn builder() -> AsserterBuilder {
        AsserterBuilder::default()
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Evaluate `condition`; `Err` carries the diagnostic when it does not
    /// hold.
    pub fn check<C: Condition + ?Sized>(&self, condition: &C) -> Result<(), AssertionError> {
        self.verify(None, condition)
    }

    /// Like [`Asserter::check`], with `message` heading the failure.
    pub fn check_with<C: Condition + ?Sized>(
        &self,
        message: &str,
        condition: &C,
    ) -> Result<(), AssertionError> {
        self.verify(Some(message), condition)
    }

    /// # Panics
    /// Panics with the diagnostic when `condition` does not hold.
    #[track_caller]
    pub fn assert_true<C: Condition + ?Sized>(&self, condition: &C) {
        if let Err(error) = self.check(condition) {
            panic!("{error}");
        }
    }

    /// # Panics
    /// Panics with `message` and the diagnostic when `condition` does not
    /// hold.
    #[track_caller]
    pub fn assert_true_with<C: Condition + ?Sized>(&self, message: &str, condition: &C) {
        if let Err(error) = self.check_with(message, condition) {
            panic!("{error}");
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn verify<C: Condition + ?Sized>(
        &self,
        message: Option<&str>,
        condition: &C,
    ) -> Result<(), AssertionError> {
        let model = Evaluator::new(&self.registry)
            .max_array_elements(self.max_array_elements)
            .build(condition.quoted())?;

        let passed = match model.root() {
            Node::Unsupported { .. } => {
                let direct = condition.evaluate();
                tracing::debug!(?direct, "model unsupported, evaluating directly");
                direct == Some(true)
            }
            _ => model.outcome() == Some(true),
        };
        if passed {
            tracing::debug!("assertion passed");
            return Ok(());
        }
        tracing::debug!("assertion failed");
        Err(self.failure(message, &model))
    }

    fn failure(&self, message: Option<&str>, model: &Model<'_>) -> AssertionError {
        AssertionError::Failed {
            message: message.map(str::to_string),
            diagnostic: self.assertion_formatter.format_assertion(model),
        }
    }
}

impl fmt::Debug for Asserter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asserter")
            .field("max_array_elements", &self.max_array_elements)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Asserter`].
///
/// Unset parts default to the shared [`crate::registry()`], the
/// [`DefaultValueFormatter`] and the [`DefaultAssertionFormatter`].
#[derive(Default)]
pub struct AsserterBuilder {
    registry: Option<Arc<ClassRegistry>>,
    value_formatter: Option<Arc<dyn ValueFormatter + Send + Sync>>,
    assertion_formatter: Option<Arc<dyn AssertionFormatter + Send + Sync>>,
    config: Config,
}

impl AsserterBuilder {
    /// Resolve classes against `registry`.
    #[must_use]
    pub fn registry(mut self, registry: Arc<ClassRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Render values with `formatter` in the default diagnostic.
    ///
    /// Ignored when an assertion formatter is set.
    #[must_use]
    pub fn value_formatter(mut self, formatter: impl ValueFormatter + Send + Sync + 'static) -> Self {
        self.value_formatter = Some(Arc::new(formatter));
        self
    }

    /// Produce diagnostics with `formatter`.
    #[must_use]
    pub fn assertion_formatter(
        mut self,
        formatter: impl AssertionFormatter + Send + Sync + 'static,
    ) -> Self {
        self.assertion_formatter = Some(Arc::new(formatter));
        self
    }

    /// Length hint of the default value formatter.
    #[must_use]
    pub fn length_hint(mut self, length_hint: usize) -> Self {
        self.config.length_hint = length_hint;
        self
    }

    #[must_use]
    pub fn max_array_elements(mut self, max: usize) -> Self {
        self.config.max_array_elements = max;
        self
    }

    /// Take both limits from `config`.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Asserter {
        let config = self.config;
        let assertion_formatter = self.assertion_formatter.unwrap_or_else(|| {
            let values = self
                .value_formatter
                .unwrap_or_else(|| Arc::new(DefaultValueFormatter::new(config.length_hint)));
            Arc::new(DefaultAssertionFormatter::new(values))
        });
        Asserter {
            registry: self.registry.unwrap_or_else(crate::registry),
            assertion_formatter,
            max_array_elements: config.max_array_elements,
        }
    }
}

impl fmt::Debug for AsserterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsserterBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
