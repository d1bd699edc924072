//! Table-mode execution: one run per fixed entry, every entry reported.
//!
//! Unlike property mode, a failing entry never stops the run. Errors and
//! panics raised by the body are captured into that entry's outcome.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use crate::config::ParallelConfig;
use crate::error::{PropertyError, panic_to_error};
use crate::input::LogLabel;
use crate::property::Property;

/// Outcome of a single table entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Passed,
    Failed { error: PropertyError },
}

impl EntryOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, EntryOutcome::Passed)
    }

    pub fn error(&self) -> Option<&PropertyError> {
        match self {
            EntryOutcome::Passed => None,
            EntryOutcome::Failed { error } => Some(error),
        }
    }
}

/// One evaluated entry
#[derive(Debug, Clone)]
pub struct TableEntry<T> {
    /// Position in the original table
    pub index: usize,
    pub input: T,
    pub outcome: EntryOutcome,
}

/// Result of a whole table run, entries in table order
#[derive(Debug)]
pub struct TableReport<T> {
    entries: Vec<TableEntry<T>>,
    duration: Duration,
}

impl<T> TableReport<T> {
    /// True when every entry passed (an empty table passes)
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome.is_passed())
    }

    pub fn entries(&self) -> &[TableEntry<T>] {
        &self.entries
    }

    /// Failing entries, in table order
    pub fn failures(&self) -> impl Iterator<Item = &TableEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| !entry.outcome.is_passed())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// `Ok` with the entry count when all passed, otherwise every failing entry
    pub fn into_result(self) -> Result<usize, TableFailure<T>> {
        if self.passed() {
            return Ok(self.entries.len());
        }
        let total = self.entries.len();
        let failures = self
            .entries
            .into_iter()
            .filter(|entry| !entry.outcome.is_passed())
            .collect();
        Err(TableFailure { total, failures })
    }
}

/// The failing entries of a table run
#[derive(Debug)]
pub struct TableFailure<T> {
    /// Number of entries evaluated
    pub total: usize,
    pub failures: Vec<TableEntry<T>>,
}

impl<T: fmt::Debug> fmt::Display for TableFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} table entries failed",
            self.failures.len(),
            self.total
        )?;
        for entry in &self.failures {
            write!(f, "\n  entry {}: {:?}", entry.index, entry.input)?;
            if let Some(error) = entry.outcome.error() {
                write!(f, "\n    error: {}", error)?;
            }
        }
        Ok(())
    }
}

impl<T: fmt::Debug> std::error::Error for TableFailure<T> {}

/// Table test execution struct
pub struct TableTest<T, P> {
    entries: Vec<T>,
    property: P,
    parallel: ParallelConfig,
    log_entries: bool,
}

impl<T, P> TableTest<T, P>
where
    T: Clone + fmt::Debug + LogLabel,
    P: Property<T>,
{
    /// Create a sequential table test over `entries`
    pub fn new(entries: impl IntoIterator<Item = T>, property: P) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            property,
            parallel: ParallelConfig::disabled(),
            log_entries: true,
        }
    }

    /// Turn per-entry logging on or off
    pub fn log_entries(mut self, enabled: bool) -> Self {
        self.log_entries = enabled;
        self
    }

    /// Run entries sequentially, in order
    pub fn run(self) -> TableReport<T> {
        let start = Instant::now();
        let span = tracing::info_span!("table", entries = self.entries.len());
        let _entered = span.enter();

        let outcomes: Vec<EntryOutcome> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, input)| evaluate(&self.property, index, input, self.log_entries))
            .collect();

        finish(self.entries, outcomes, start)
    }
}

impl<T, P> TableTest<T, P>
where
    T: Clone + fmt::Debug + LogLabel + Send + Sync,
    P: Property<T> + Sync,
{
    /// Evaluate entries on several threads
    pub fn parallel(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// Run with the configured parallelism; entries are still reported in table order
    pub fn run_parallel(self) -> TableReport<T> {
        let threads = self.parallel.num_threads.min(self.entries.len());
        if !self.parallel.enabled || threads <= 1 {
            return self.run();
        }

        let start = Instant::now();
        let chunk_size = self.entries.len().div_ceil(threads);
        let property = &self.property;
        let log_entries = self.log_entries;
        tracing::debug!(threads, chunk_size, "running table in parallel");

        let scoped = crossbeam::scope(|s| {
            let handles: Vec<_> = self
                .entries
                .chunks(chunk_size)
                .enumerate()
                .map(|(chunk, inputs)| {
                    let offset = chunk * chunk_size;
                    let handle = s.spawn(move |_| {
                        inputs
                            .iter()
                            .enumerate()
                            .map(|(i, input)| evaluate(property, offset + i, input, log_entries))
                            .collect::<Vec<_>>()
                    });
                    (inputs.len(), handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(len, handle)| match handle.join() {
                    Ok(outcomes) => outcomes,
                    Err(payload) => {
                        let error = panic_to_error(payload);
                        vec![EntryOutcome::Failed { error }; len]
                    }
                })
                .collect::<Vec<_>>()
        });

        let outcomes = match scoped {
            Ok(outcomes) => outcomes,
            Err(payload) => {
                let error = panic_to_error(payload);
                vec![EntryOutcome::Failed { error }; self.entries.len()]
            }
        };

        finish(self.entries, outcomes, start)
    }
}

fn evaluate<T, P>(property: &P, index: usize, input: &T, log: bool) -> EntryOutcome
where
    T: Clone + LogLabel,
    P: Property<T>,
{
    if log {
        tracing::info!(index, "{}", input.log_label());
    }
    let result = catch_unwind(AssertUnwindSafe(|| property.test(input.clone())))
        .unwrap_or_else(|payload| Err(panic_to_error(payload)));
    match result {
        Ok(_) => EntryOutcome::Passed,
        Err(error) => {
            tracing::warn!(index, %error, "table entry failed");
            EntryOutcome::Failed { error }
        }
    }
}

fn finish<T>(inputs: Vec<T>, outcomes: Vec<EntryOutcome>, start: Instant) -> TableReport<T> {
    let entries = inputs
        .into_iter()
        .zip(outcomes)
        .enumerate()
        .map(|(index, (input, outcome))| TableEntry {
            index,
            input,
            outcome,
        })
        .collect();
    TableReport {
        entries,
        duration: start.elapsed(),
    }
}

/// Run `property` once per entry, sequentially
pub fn check_table<T, P>(entries: impl IntoIterator<Item = T>, property: P) -> TableReport<T>
where
    T: Clone + fmt::Debug + LogLabel,
    P: Property<T>,
{
    TableTest::new(entries, property).run()
}
