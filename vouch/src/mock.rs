//! Configurable stand-in for the app's dependency.
//!
//! A [`MockBehavior`] is a tiny rule interpreter: rules are tried in the order
//! they were added and the first matching predicate decides the outcome. When
//! nothing matches, the default outcome applies.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app::{AppError, Dependency};
use crate::input::StructuredInput;

/// Response returned by the demo mock when nothing goes wrong
pub const WORKING: &str = "Working!";

/// Number the demo failure rule reacts to
pub const CURSED_NUMBER: i32 = 666;

/// Message carried by the demo failure rule
pub const CURSED_MESSAGE: &str = "The power of Christ compels thee!";

/// What a mock answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Return(String),
    Fail(String),
}

impl Outcome {
    fn resolve(&self) -> Result<String, AppError> {
        match self {
            Outcome::Return(value) => Ok(value.clone()),
            Outcome::Fail(message) => Err(AppError::configured_failure(message.clone())),
        }
    }
}

type Predicate = Arc<dyn Fn(&StructuredInput) -> bool + Send + Sync>;

struct Rule {
    label: String,
    predicate: Predicate,
    outcome: Outcome,
}

/// Ordered `(predicate, outcome)` rules plus a default outcome
#[derive(Clone)]
pub struct MockBehavior {
    rules: Vec<Arc<Rule>>,
    default: Outcome,
}

impl MockBehavior {
    /// Behavior with no rules and the given default
    pub fn new(default: Outcome) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Behavior that returns `value` unless a rule says otherwise
    pub fn returning(value: impl Into<String>) -> Self {
        Self::new(Outcome::Return(value.into()))
    }

    /// Behavior used by the demo suites
    pub fn demo(config: DemoConfig) -> Self {
        let behavior = Self::returning(WORKING);
        if config.fail_on_666 {
            behavior.fail_when(
                format!("number == {}", CURSED_NUMBER),
                |input| input.number() == CURSED_NUMBER,
                CURSED_MESSAGE,
            )
        } else {
            behavior
        }
    }

    /// Append a rule; earlier rules take precedence
    pub fn when<F>(mut self, label: impl Into<String>, predicate: F, outcome: Outcome) -> Self
    where
        F: Fn(&StructuredInput) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(Rule {
            label: label.into(),
            predicate: Arc::new(predicate),
            outcome,
        }));
        self
    }

    /// Append a rule that fails with `message`
    pub fn fail_when<F>(self, label: impl Into<String>, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&StructuredInput) -> bool + Send + Sync + 'static,
    {
        self.when(label, predicate, Outcome::Fail(message.into()))
    }

    /// Number of rules, not counting the default
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The outcome that applies to `input`
    pub fn outcome_for(&self, input: &StructuredInput) -> &Outcome {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(input))
            .map(|rule| &rule.outcome)
            .unwrap_or(&self.default)
    }
}

impl fmt::Debug for MockBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<(&str, &Outcome)> = self
            .rules
            .iter()
            .map(|rule| (rule.label.as_str(), &rule.outcome))
            .collect();
        f.debug_struct("MockBehavior")
            .field("rules", &rules)
            .field("default", &self.default)
            .finish()
    }
}

/// Switches for the demo mock configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoConfig {
    /// Fail whenever `number == 666`
    pub fail_on_666: bool,
}

impl DemoConfig {
    pub fn with_failure_rule() -> Self {
        Self { fail_on_666: true }
    }
}

/// A [`Dependency`] that answers from a [`MockBehavior`]
#[derive(Debug)]
pub struct MockDependency {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockDependency {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the dependency has been consulted
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn behavior(&self) -> &MockBehavior {
        &self.behavior
    }
}

impl Dependency for MockDependency {
    fn respond(&self, input: &StructuredInput) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.behavior.outcome_for(input).resolve()
    }
}
