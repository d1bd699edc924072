//! Basic usage examples demonstrating the core Vouch API
//!
//! Runs a property over generated inputs, the demo table with the failure
//! rule switched on, then a property over hand-picked boundary numbers.

use uuid::Uuid;
use vouch::demo;
use vouch::{
    App, ConcatDependency, DemoConfig, GeneratorRegistry, LogSession, MockBehavior,
    MockDependency, OneOfGenerator, StructuredInput, TestConfig, TestRunner, check_registered,
    check_with_config, ensure, ensure_eq,
};

// Example 1: a property against the real dependency
fn example_1_concat_dependency() {
    println!("=== Example 1: Property over generated inputs ===");

    let registry = GeneratorRegistry::with_defaults();
    let config = TestConfig::with_iterations(1_000).log_iterations(false);

    let outcome = check_registered::<StructuredInput, _>(
        &registry,
        |input: StructuredInput| {
            let answer = App::new().run(Some(&input), Some(&ConcatDependency))?;
            ensure(
                answer.ends_with(&input.half().to_string()),
                "answer should end with the half value",
            )
        },
        config,
    );

    match outcome {
        Ok(result) => println!("{}", TestRunner::format_result(&result)),
        Err(err) => println!("✗ could not start: {}", err),
    }
}

// Example 2: the demo table, every entry reported
fn example_2_demo_table() {
    println!("\n=== Example 2: Demo table with the 666 rule ===");

    let report = demo::range_test(0..1000, DemoConfig::with_failure_rule());
    println!("{}", TestRunner::format_table(&report));
}

// Example 3: boundary numbers picked from a fixed list
fn example_3_boundary_numbers() {
    println!("\n=== Example 3: Boundary numbers with OneOfGenerator ===");

    let boundaries = OneOfGenerator::new(vec![0, 1, 665, 666, 667, 1023, 1024]);
    let config = TestConfig::with_iterations(200).log_iterations(false);

    let result = check_with_config(
        boundaries,
        |number: i32| {
            let input = StructuredInput::new(None, number, Uuid::nil());
            let mock = MockDependency::new(MockBehavior::demo(DemoConfig::with_failure_rule()));
            let answer = App::new().run(Some(&input), Some(&mock))?;
            ensure_eq(answer.as_str(), "Working!")
        },
        config,
    );
    println!("{}", TestRunner::format_result(&result));
}

fn main() {
    let _session = LogSession::start(tracing::Level::WARN);

    example_1_concat_dependency();
    example_2_demo_table();
    example_3_boundary_numbers();
}
