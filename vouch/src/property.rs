//! Property definitions.

use crate::error::PropertyError;

/// A test body run against one input
///
/// Implemented for every closure `Fn(T) -> Result<O, E>` whose error converts
/// into [`PropertyError`], so `?` on application errors works inside a body.
pub trait Property<T> {
    type Output;

    /// Test the property with the given input
    fn test(&self, input: T) -> Result<Self::Output, PropertyError>;
}

impl<T, F, O, E> Property<T> for F
where
    F: Fn(T) -> Result<O, E>,
    E: Into<PropertyError>,
{
    type Output = O;

    fn test(&self, input: T) -> Result<O, PropertyError> {
        self(input).map_err(Into::into)
    }
}

/// Adapter turning a `bool` predicate into a property
pub struct Predicate<F> {
    predicate: F,
}

impl<F> Predicate<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<T, F> Property<T> for Predicate<F>
where
    F: Fn(T) -> bool,
{
    type Output = ();

    fn test(&self, input: T) -> Result<(), PropertyError> {
        if (self.predicate)(input) {
            Ok(())
        } else {
            Err(PropertyError::property_failed("Property returned false"))
        }
    }
}

/// Fail with `message` unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), PropertyError> {
    if condition {
        Ok(())
    } else {
        Err(PropertyError::property_failed(message))
    }
}

/// Fail unless `actual == expected`
pub fn ensure_eq<V>(actual: V, expected: V) -> Result<(), PropertyError>
where
    V: PartialEq + std::fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(PropertyError::property_failed_with_context(
            "values differ",
            format!("expected {:?}, got {:?}", expected, actual),
        ))
    }
}
