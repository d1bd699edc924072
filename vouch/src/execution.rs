//! Property-mode execution: draw, test, stop at the first failure.

use std::fmt;
use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use crate::config::TestConfig;
use crate::error::{PropertyError, PropertyResult, TestFailure, TestSuccess, panic_to_error};
use crate::generator::{Generator, GeneratorRegistry};
use crate::input::LogLabel;
use crate::property::Property;
use crate::rng::seeded;

/// Core property test execution struct
pub struct PropertyTest<T, G, P> {
    generator: G,
    property: P,
    config: TestConfig,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, G, P> PropertyTest<T, G, P>
where
    T: Clone + fmt::Debug + LogLabel,
    G: Generator<T>,
    P: Property<T>,
{
    /// Create a new property test with the given generator, property, and configuration
    pub fn new(generator: G, property: P, config: TestConfig) -> Self {
        Self {
            generator,
            property,
            config,
            _phantom: PhantomData,
        }
    }

    /// Like [`PropertyTest::new`], rejecting an invalid configuration up front
    pub fn try_new(generator: G, property: P, config: TestConfig) -> Result<Self, PropertyError> {
        config.validate()?;
        Ok(Self::new(generator, property, config))
    }

    /// Execute the property test
    ///
    /// Runs `config.iterations` independent draws and returns at the first
    /// failing one. A panicking body counts as a failure of that iteration.
    pub fn run(self) -> PropertyResult<T> {
        let test_start = Instant::now();
        let (seed, mut rng) = seeded(self.config.seed);

        let span = tracing::info_span!(
            "property",
            input_type = std::any::type_name::<T>(),
            seed,
            iterations = self.config.iterations
        );
        let _entered = span.enter();

        for iteration in 0..self.config.iterations {
            let input = self
                .generator
                .generate(&mut rng, &self.config.generator_config);

            if self.config.log_iterations {
                tracing::info!(iteration, "{}", input.log_label());
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| self.property.test(input.clone())))
                .unwrap_or_else(|payload| Err(panic_to_error(payload)));

            if let Err(error) = outcome {
                let error = error.at_iteration(iteration);
                tracing::warn!(iteration, input = ?input, %error, "property failed");
                return Err(TestFailure::new(
                    error,
                    input,
                    iteration,
                    seed,
                    test_start.elapsed(),
                ));
            }
        }

        tracing::debug!("property passed");
        Ok(TestSuccess::new(
            self.config.iterations,
            seed,
            test_start.elapsed(),
        ))
    }
}

/// Check a property with the default configuration
pub fn check<T, G, P>(generator: G, property: P) -> PropertyResult<T>
where
    T: Clone + fmt::Debug + LogLabel,
    G: Generator<T>,
    P: Property<T>,
{
    check_with_config(generator, property, TestConfig::default())
}

/// Check a property with a custom configuration
pub fn check_with_config<T, G, P>(generator: G, property: P, config: TestConfig) -> PropertyResult<T>
where
    T: Clone + fmt::Debug + LogLabel,
    G: Generator<T>,
    P: Property<T>,
{
    PropertyTest::new(generator, property, config).run()
}

/// Check a property using the generator registered for `T`
///
/// The outer `Err` means the run could not start: nothing is registered
/// for `T`, or the configuration is invalid. No iteration runs in that case.
pub fn check_registered<T, P>(
    registry: &GeneratorRegistry,
    property: P,
    config: TestConfig,
) -> Result<PropertyResult<T>, PropertyError>
where
    T: Clone + fmt::Debug + LogLabel + 'static,
    P: Property<T>,
{
    let generator = registry.lookup::<T>()?;
    Ok(PropertyTest::try_new(generator, property, config)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ConstantGenerator;
    use crate::primitives::IntGenerator;
    use crate::property::{Predicate, ensure};
    use std::cell::Cell;

    fn quiet(iterations: usize) -> TestConfig {
        TestConfig::with_iterations(iterations).log_iterations(false)
    }

    #[test]
    fn test_passing_property_runs_every_iteration() {
        let calls = Cell::new(0usize);
        let result = check_with_config(
            IntGenerator::new(0i32, 10),
            |x: i32| {
                calls.set(calls.get() + 1);
                ensure((0..=10).contains(&x), "out of range")
            },
            quiet(250),
        );
        let success = result.unwrap();
        assert_eq!(success.iterations, 250);
        assert_eq!(calls.get(), 250);
    }

    #[test]
    fn test_zero_iterations_passes_vacuously() {
        let calls = Cell::new(0usize);
        let result = check_with_config(
            ConstantGenerator::new(1i32),
            |_x: i32| {
                calls.set(calls.get() + 1);
                ensure(false, "never runs")
            },
            quiet(0),
        );
        assert_eq!(result.unwrap().iterations, 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_single_iteration_runs_once() {
        let calls = Cell::new(0usize);
        let result = check_with_config(
            ConstantGenerator::new(1i32),
            |_x: i32| {
                calls.set(calls.get() + 1);
                ensure(true, "")
            },
            quiet(1),
        );
        assert!(result.is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = Cell::new(0usize);
        let result = check_with_config(
            IntGenerator::new(0i32, 1),
            |x: i32| {
                calls.set(calls.get() + 1);
                ensure(x == 0, "hit one")
            },
            quiet(10_000).seed(3),
        );
        let failure = result.unwrap_err();
        assert_eq!(failure.input, 1);
        assert_eq!(calls.get(), failure.failed_iteration + 1);
        assert_eq!(failure.seed, 3);
        assert!(matches!(
            failure.error,
            PropertyError::PropertyFailed {
                iteration: Some(i),
                ..
            } if i == failure.failed_iteration
        ));
    }

    #[test]
    fn test_failure_is_reproducible_from_seed() {
        let property = |x: i32| ensure(x < 900, "too big");
        let first = check_with_config(IntGenerator::new(0i32, 1024), property, quiet(1000))
            .unwrap_err();
        let replay = check_with_config(
            IntGenerator::new(0i32, 1024),
            property,
            quiet(1000).seed(first.seed),
        )
        .unwrap_err();
        assert_eq!(first.input, replay.input);
        assert_eq!(first.failed_iteration, replay.failed_iteration);
    }

    #[test]
    fn test_predicate_failure_message() {
        let result = check_with_config(
            ConstantGenerator::new(3i32),
            Predicate::new(|x: i32| x % 2 == 0),
            quiet(10),
        );
        let failure = result.unwrap_err();
        assert_eq!(failure.failed_iteration, 0);
        assert!(failure.summary().contains("Property returned false"));
    }

    #[test]
    fn test_panicking_body_is_a_failure() {
        let result = check_with_config(
            ConstantGenerator::new(5i32),
            |x: i32| -> Result<(), PropertyError> { panic!("body blew up on {x}") },
            quiet(3),
        );
        let failure = result.unwrap_err();
        assert_eq!(failure.failed_iteration, 0);
        assert_eq!(
            failure.error,
            PropertyError::BodyPanicked {
                message: "body blew up on 5".to_string()
            }
        );
    }

    #[test]
    fn test_check_registered_requires_registration() {
        let registry = GeneratorRegistry::new();
        let outcome = check_registered::<i32, _>(&registry, |_x: i32| ensure(true, ""), quiet(5));
        assert!(matches!(
            outcome,
            Err(PropertyError::UnregisteredType { .. })
        ));
    }

    #[test]
    fn test_check_registered_uses_registered_generator() {
        let mut registry = GeneratorRegistry::new();
        registry.register::<i32, _>(ConstantGenerator::new(8));
        let outcome =
            check_registered::<i32, _>(&registry, |x: i32| ensure(x == 8, "wrong"), quiet(20))
                .unwrap();
        assert_eq!(outcome.unwrap().iterations, 20);
    }

    #[test]
    fn test_check_registered_rejects_bad_config() {
        let registry = GeneratorRegistry::with_defaults();
        let mut config = quiet(1);
        config.generator_config.size_hint = 0;
        let outcome = check_registered::<crate::input::StructuredInput, _>(
            &registry,
            |_x: crate::input::StructuredInput| ensure(true, ""),
            config,
        );
        assert!(matches!(outcome, Err(PropertyError::Config(_))));
    }

    #[test]
    fn test_huge_size_hint_is_valid_and_runs() {
        let registry = GeneratorRegistry::with_defaults();
        let mut config = quiet(200).seed(21);
        config.generator_config = crate::config::GeneratorConfig::new(usize::MAX, 5).unwrap();
        let outcome = check_registered::<crate::input::StructuredInput, _>(
            &registry,
            |input: crate::input::StructuredInput| {
                ensure(input.text().is_none_or(|t| t.chars().count() <= 32), "text too long")
            },
            config,
        )
        .unwrap();
        assert_eq!(outcome.unwrap().iterations, 200);
    }
}
