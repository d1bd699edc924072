//! The two demo suites run against [`App`] with a fresh mock per case.
//!
//! Both suites assert the same thing: with the demo mock wired in, the app
//! answers [`WORKING`] verbatim.

use std::ops::Range;

use crate::app::App;
use crate::config::{ParallelConfig, TestConfig};
use crate::error::{PropertyError, PropertyResult};
use crate::execution::check_registered;
use crate::generator::GeneratorRegistry;
use crate::input::{StructuredInput, table_inputs};
use crate::mock::{DemoConfig, MockBehavior, MockDependency, WORKING};
use crate::property::ensure_eq;
use crate::table::{TableReport, TableTest};

/// Table used by [`range_test`] when the caller has no preference
pub const DEFAULT_TABLE: Range<i32> = 0..1000;

/// The body shared by both suites
pub fn app_answers_working(
    demo: DemoConfig,
) -> impl Fn(StructuredInput) -> Result<(), PropertyError> + Copy + Send + Sync {
    move |input: StructuredInput| {
        let mock = MockDependency::new(MockBehavior::demo(demo));
        let response = App::new().run(Some(&input), Some(&mock))?;
        ensure_eq(response.as_str(), WORKING)
    }
}

/// Property mode: `config.iterations` generated inputs, stop at the first failure
pub fn property_test(
    config: TestConfig,
    demo: DemoConfig,
) -> Result<PropertyResult<StructuredInput>, PropertyError> {
    let registry = GeneratorRegistry::with_defaults();
    property_test_with_registry(&registry, config, demo)
}

/// Property mode drawing inputs from a caller-provided registry
pub fn property_test_with_registry(
    registry: &GeneratorRegistry,
    config: TestConfig,
    demo: DemoConfig,
) -> Result<PropertyResult<StructuredInput>, PropertyError> {
    tracing::debug!(?demo, "starting demo property test");
    check_registered::<StructuredInput, _>(registry, app_answers_working(demo), config)
}

/// Table mode: one entry per number in `range`, every entry reported
pub fn range_test(range: Range<i32>, demo: DemoConfig) -> TableReport<StructuredInput> {
    tracing::debug!(?demo, start = range.start, end = range.end, "starting demo table test");
    TableTest::new(table_inputs(range), app_answers_working(demo)).run()
}

/// Table mode spread over several threads; reports match [`range_test`]
pub fn range_test_parallel(
    range: Range<i32>,
    demo: DemoConfig,
    parallel: ParallelConfig,
) -> TableReport<StructuredInput> {
    tracing::debug!(?demo, threads = parallel.num_threads, "starting parallel demo table test");
    TableTest::new(table_inputs(range), app_answers_working(demo))
        .parallel(parallel)
        .run_parallel()
}
