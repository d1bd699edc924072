//! Configuration types for controlling test behavior and generation parameters.

use thiserror::Error;

/// Iteration count used when a test does not ask for one
pub const DEFAULT_ITERATIONS: usize = 100_000;

/// Environment variable overriding the iteration count
pub const ITERATIONS_ENV: &str = "VOUCH_ITERATIONS";

/// Environment variable fixing the seed of every property run
pub const SEED_ENV: &str = "VOUCH_SEED";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Size hint must leave room for at least one element
    #[error("Invalid size hint: {0} (must be > 0)")]
    InvalidSizeHint(usize),

    /// Max depth must be > 0
    #[error("Invalid max depth: {0} (must be > 0)")]
    InvalidMaxDepth(usize),

    /// Parallel execution needs at least one worker
    #[error("Invalid thread count: {0} (must be > 0)")]
    InvalidThreads(usize),

    /// An environment override could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Configuration for generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Hint for the size of generated collections and strings
    pub size_hint: usize,
    /// Maximum depth for nested structures
    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size_hint: 10,
            max_depth: 5,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator configuration with validation
    pub fn new(size_hint: usize, max_depth: usize) -> Result<Self, ConfigError> {
        let config = Self {
            size_hint,
            max_depth,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the generator configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_hint == 0 {
            return Err(ConfigError::InvalidSizeHint(self.size_hint));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }
}

/// Configuration for individual property tests
///
/// Zero iterations is a valid configuration: the property passes vacuously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    /// Number of test iterations to run
    pub iterations: usize,
    /// Optional seed for reproducible tests
    pub seed: Option<u64>,
    /// Generator configuration overrides
    pub generator_config: GeneratorConfig,
    /// Emit one log event per iteration
    pub log_iterations: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            generator_config: GeneratorConfig::default(),
            log_iterations: true,
        }
    }
}

impl TestConfig {
    /// Create a configuration running `iterations` draws
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Fix the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn per-iteration logging on or off
    pub fn log_iterations(mut self, enabled: bool) -> Self {
        self.log_iterations = enabled;
        self
    }

    /// Validate the test configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator_config.validate()
    }

    /// Default configuration with `VOUCH_ITERATIONS` and `VOUCH_SEED` applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from a variable lookup; unset variables leave fields alone
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup(ITERATIONS_ENV) {
            self.iterations = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ITERATIONS_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(SEED_ENV) {
            let seed = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: SEED_ENV,
                value: value.clone(),
            })?;
            self.seed = Some(seed);
        }
        self.validate()?;
        Ok(self)
    }
}

/// Configuration for parallel table execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of threads to use for parallel execution
    pub num_threads: usize,
    /// Whether to enable parallel execution
    pub enabled: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            enabled: true,
        }
    }
}

impl ParallelConfig {
    /// Sequential execution
    pub fn disabled() -> Self {
        Self {
            num_threads: 1,
            enabled: false,
        }
    }

    /// Use exactly `num_threads` workers
    pub fn with_threads(num_threads: usize) -> Result<Self, ConfigError> {
        if num_threads == 0 {
            return Err(ConfigError::InvalidThreads(num_threads));
        }
        Ok(Self {
            num_threads,
            enabled: true,
        })
    }
}
