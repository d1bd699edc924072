#![allow(clippy::result_large_err)]

//! # Vouch - Property and Table Testing for Rust
//!
//! Vouch runs a test body either against many randomly generated inputs
//! (property mode, stops at the first failure) or against a fixed table of
//! inputs (table mode, reports every entry). Generators are looked up by type
//! in an explicit [`GeneratorRegistry`], and the bundled [`App`] can be wired
//! to a rule-driven [`MockDependency`] for demonstration suites.
//!
//! ## Quick Start
//!
//! ```rust
//! use vouch::{IntGenerator, TestConfig, check_with_config, ensure};
//!
//! let config = TestConfig::with_iterations(500).seed(7).log_iterations(false);
//! let result = check_with_config(
//!     IntGenerator::new(0i32, 1024),
//!     |x: i32| ensure(x <= 1024, "out of range"),
//!     config,
//! );
//! assert_eq!(result.unwrap().iterations, 500);
//! ```
//!
//! ## Demo suites
//!
//! ```rust
//! use vouch::demo;
//! use vouch::mock::DemoConfig;
//!
//! let report = demo::range_test(0..1000, DemoConfig::with_failure_rule());
//! let failing: Vec<i32> = report.failures().map(|e| e.input.number()).collect();
//! assert_eq!(failing, vec![666]);
//! ```

// Public modules
pub mod app;
pub mod config;
pub mod demo;
pub mod error;
pub mod execution;
pub mod generator;
pub mod input;
pub mod logging;
pub mod mock;
pub mod primitives;
pub mod property;
pub mod rng;
pub mod table;
pub mod test_runner;

// Re-export the main public API
pub use app::{App, AppError, ConcatDependency, Dependency};
pub use config::{ConfigError, GeneratorConfig, ParallelConfig, TestConfig};
pub use error::PropertyError;
pub use execution::{PropertyTest, check, check_registered, check_with_config};
pub use generator::{
    BoxedGenerator, ConstantGenerator, Generator, GeneratorRegistry, OneOfGenerator,
};
pub use input::{LogLabel, StructuredInput, StructuredInputGenerator};
pub use logging::LogSession;
pub use mock::{DemoConfig, MockBehavior, MockDependency, Outcome};
pub use primitives::*;
pub use property::{Predicate, Property, ensure, ensure_eq};
pub use rng::{create_rng, create_seeded_rng};
pub use table::{EntryOutcome, TableEntry, TableFailure, TableReport, TableTest, check_table};
pub use test_runner::{TestResult, TestRunner};

// Re-export common types
pub use error::{PropertyResult, TestFailure, TestSuccess};
