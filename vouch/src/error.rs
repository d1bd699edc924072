//! Error types and result handling for property and table tests.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use thiserror::Error;

use crate::app::AppError;
use crate::config::ConfigError;

/// Error type for property testing failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// No generator has been registered for the requested type
    #[error("No generator registered for type {type_name}")]
    UnregisteredType { type_name: &'static str },

    /// Property test failed with a specific message and optional context
    #[error("Property failed: {message}{}{}", fmt_context(.context), fmt_iteration(.iteration))]
    PropertyFailed {
        message: String,
        context: Option<String>,
        iteration: Option<usize>,
    },

    /// The test body panicked
    #[error("Test body panicked: {message}")]
    BodyPanicked { message: String },

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The system under test or one of its collaborators failed
    #[error(transparent)]
    App(#[from] AppError),
}

fn fmt_context(context: &Option<String>) -> String {
    context
        .as_ref()
        .map(|ctx| format!(" (context: {})", ctx))
        .unwrap_or_default()
}

fn fmt_iteration(iteration: &Option<usize>) -> String {
    iteration
        .map(|iter| format!(" (iteration: {})", iter))
        .unwrap_or_default()
}

impl PropertyError {
    /// Create a simple property failed error
    pub fn property_failed(message: impl Into<String>) -> Self {
        Self::PropertyFailed {
            message: message.into(),
            context: None,
            iteration: None,
        }
    }

    /// Create a property failed error with context
    pub fn property_failed_with_context(
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::PropertyFailed {
            message: message.into(),
            context: Some(context.into()),
            iteration: None,
        }
    }

    /// Create an unregistered type error for `T`
    pub fn unregistered<T: ?Sized>() -> Self {
        Self::UnregisteredType {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Attach the iteration index if the error does not carry one yet
    pub(crate) fn at_iteration(self, iteration: usize) -> Self {
        match self {
            PropertyError::PropertyFailed {
                message,
                context,
                iteration: None,
            } => PropertyError::PropertyFailed {
                message,
                context,
                iteration: Some(iteration),
            },
            other => other,
        }
    }

    /// The wrapped application error, if this failure came from the system under test
    pub fn app_error(&self) -> Option<&AppError> {
        match self {
            PropertyError::App(err) => Some(err),
            _ => None,
        }
    }
}

/// Turn a caught panic payload into a property error
pub(crate) fn panic_to_error(payload: Box<dyn std::any::Any + Send>) -> PropertyError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };
    PropertyError::BodyPanicked { message }
}

/// Result of a property test execution
pub type PropertyResult<T> = Result<TestSuccess<T>, TestFailure<T>>;

/// Information about a successful test run
#[derive(Debug)]
pub struct TestSuccess<T> {
    /// Number of iterations completed
    pub iterations: usize,
    /// Seed the run was drawn from
    pub seed: u64,
    /// Total time spent on the test
    pub duration: Duration,
    _phantom: PhantomData<T>,
}

impl<T> TestSuccess<T> {
    /// Create a new TestSuccess instance
    pub fn new(iterations: usize, seed: u64, duration: Duration) -> Self {
        Self {
            iterations,
            seed,
            duration,
            _phantom: PhantomData,
        }
    }
}

/// Information about a failed test run
#[derive(Debug)]
pub struct TestFailure<T> {
    /// The error that caused the failure
    pub error: PropertyError,
    /// Input that caused the failure
    pub input: T,
    /// Iteration number where the failure occurred
    pub failed_iteration: usize,
    /// Seed the run was drawn from
    pub seed: u64,
    /// Total time spent on the test
    pub duration: Duration,
}

impl<T> TestFailure<T> {
    /// Create a new TestFailure instance
    pub fn new(
        error: PropertyError,
        input: T,
        failed_iteration: usize,
        seed: u64,
        duration: Duration,
    ) -> Self {
        Self {
            error,
            input,
            failed_iteration,
            seed,
            duration,
        }
    }

    /// Get a detailed report of the test failure
    pub fn detailed_report(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut report = String::new();

        report.push_str(&format!(
            "Property test failed on iteration {}\n",
            self.failed_iteration
        ));
        report.push_str(&format!("Error: {}\n", self.error));
        report.push_str(&format!("Input: {:?}\n", self.input));
        report.push_str(&format!("Total test time: {:?}\n", self.duration));
        report.push_str(&format!(
            "Seed: {} (use this to reproduce the failure)\n",
            self.seed
        ));

        report
    }

    /// Get a concise summary of the test failure
    pub fn summary(&self) -> String
    where
        T: fmt::Debug,
    {
        format!(
            "Property failed with input {:?} on iteration {}: {}",
            self.input, self.failed_iteration, self.error
        )
    }
}

impl<T: fmt::Debug> fmt::Display for TestFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

impl<T: fmt::Debug> std::error::Error for TestFailure<T> {}
