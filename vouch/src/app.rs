//! The system under test and its dependency interface.
//!
//! [`App`] knows nothing about mocks: it is handed any [`Dependency`] at the
//! call site and forwards the input to it unchanged.

use thiserror::Error;

use crate::input::StructuredInput;

/// Errors raised by the system under test and its collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The input argument was missing
    #[error("Input must not be absent")]
    NullInput,

    /// The dependency argument was missing
    #[error("Dependency must not be absent")]
    NullDependency,

    /// A collaborator was configured to fail for this input
    #[error("{message}")]
    ConfiguredFailure { message: String },
}

impl AppError {
    /// Create a configured failure
    pub fn configured_failure(message: impl Into<String>) -> Self {
        Self::ConfiguredFailure {
            message: message.into(),
        }
    }

    /// Whether this failure was requested by a mock rule rather than raised by a bug
    pub fn is_configured_failure(&self) -> bool {
        matches!(self, AppError::ConfiguredFailure { .. })
    }
}

/// The single capability the app consumes
pub trait Dependency: Send + Sync {
    /// Produce a response for the given input
    fn respond(&self, input: &StructuredInput) -> Result<String, AppError>;
}

impl<D: Dependency + ?Sized> Dependency for &D {
    fn respond(&self, input: &StructuredInput) -> Result<String, AppError> {
        (**self).respond(input)
    }
}

impl<D: Dependency + ?Sized> Dependency for Box<D> {
    fn respond(&self, input: &StructuredInput) -> Result<String, AppError> {
        (**self).respond(input)
    }
}

/// The production dependency: every field rendered back to back
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatDependency;

impl Dependency for ConcatDependency {
    fn respond(&self, input: &StructuredInput) -> Result<String, AppError> {
        Ok(format!(
            "{}{}{}{}{}",
            input.text().unwrap_or_default(),
            input.number(),
            if input.even() { "True" } else { "False" },
            input.id().hyphenated(),
            input.half()
        ))
    }
}

/// The system under test
#[derive(Debug, Clone, Copy, Default)]
pub struct App;

impl App {
    pub fn new() -> Self {
        Self
    }

    /// Forward `input` to `dependency` and return its answer verbatim
    pub fn run(
        &self,
        input: Option<&StructuredInput>,
        dependency: Option<&dyn Dependency>,
    ) -> Result<String, AppError> {
        let input = input.ok_or(AppError::NullInput)?;
        let dependency = dependency.ok_or(AppError::NullDependency)?;
        dependency.respond(input)
    }
}
