//! Scoped installation of the `tracing` sink.

use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// A thread-local subscriber that stays installed while the session lives
///
/// Dropping the session restores whatever subscriber was active before,
/// including when a run is abandoned early through `?` or a panic.
#[must_use = "logging stops as soon as the session is dropped"]
pub struct LogSession {
    _guard: DefaultGuard,
}

impl LogSession {
    /// Log to stderr at `level`, unless `RUST_LOG` says otherwise
    pub fn start(level: tracing::Level) -> Self {
        Self::start_with_writer(level, std::io::stderr)
    }

    /// Log to an arbitrary writer, mostly for capturing output in tests
    pub fn start_with_writer<W>(level: tracing::Level, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .finish();

        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
