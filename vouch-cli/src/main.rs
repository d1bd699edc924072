use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use vouch::config::{DEFAULT_ITERATIONS, ITERATIONS_ENV, SEED_ENV};
use vouch::{
    DemoConfig, LogSession, ParallelConfig, TestConfig, TestResult, TestRunner, demo,
};

#[derive(Parser)]
#[command(name = "vouch")]
#[command(about = "Run the vouch demo property and table suites", long_about = None)]
#[command(version)]
struct Cli {
    /// Minimum level of log events written to stderr (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo property test over generated inputs
    Property {
        /// Number of generated inputs
        #[arg(short = 'n', long, env = ITERATIONS_ENV, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Seed for a reproducible run
        #[arg(short, long, env = SEED_ENV)]
        seed: Option<u64>,

        /// Make the mock fail when number == 666
        #[arg(long)]
        fail_on_666: bool,

        /// Skip the per-iteration log event
        #[arg(short, long)]
        quiet: bool,
    },
    /// Run the demo table test over a fixed range of numbers
    Table {
        /// First number of the table
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i32,

        /// End of the table (exclusive)
        #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
        to: i32,

        /// Make the mock fail when number == 666
        #[arg(long)]
        fail_on_666: bool,

        /// Evaluate entries on several threads
        #[arg(short, long)]
        parallel: bool,

        /// Worker threads for --parallel (defaults to the number of CPUs)
        #[arg(long, requires = "parallel")]
        threads: Option<usize>,
    },
    /// Run both suites with their defaults
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Commands::Table { from, to, .. } = &cli.command
        && from > to
    {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                format!("--from ({}) must not be greater than --to ({})", from, to),
            )
            .exit();
    }
    let _session = LogSession::start(cli.log_level);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Property {
            iterations,
            seed,
            fail_on_666,
            quiet,
        } => {
            let mut config = TestConfig::with_iterations(iterations).log_iterations(!quiet);
            if let Some(seed) = seed {
                config = config.seed(seed);
            }
            run_property(config, DemoConfig { fail_on_666 })
        }
        Commands::Table {
            from,
            to,
            fail_on_666,
            parallel,
            threads,
        } => {
            let parallel = match (parallel, threads) {
                (false, _) => None,
                (true, None) => Some(ParallelConfig::default()),
                (true, Some(n)) => {
                    Some(ParallelConfig::with_threads(n).context("Invalid --threads value")?)
                }
            };
            run_table(from, to, DemoConfig { fail_on_666 }, parallel)
        }
        Commands::All => {
            let config = TestConfig::from_env().context("Failed to read test configuration")?;
            let property_passed = run_property(config, DemoConfig::default())?;
            println!();
            let range = demo::DEFAULT_TABLE;
            let table_passed = run_table(range.start, range.end, DemoConfig::default(), None)?;
            Ok(property_passed && table_passed)
        }
    }
}

fn run_property(config: TestConfig, demo_config: DemoConfig) -> Result<bool> {
    tracing::info!(iterations = config.iterations, seed = ?config.seed, "running property suite");

    let outcome =
        demo::property_test(config, demo_config).context("Property test could not start")?;
    let result = TestResult::from_property_result(&outcome);

    print_status("property", &result);
    println!("{}", TestRunner::format_result(&outcome));

    Ok(result.is_passed())
}

fn run_table(
    from: i32,
    to: i32,
    demo_config: DemoConfig,
    parallel: Option<ParallelConfig>,
) -> Result<bool> {
    tracing::info!(from, to, parallel = parallel.is_some(), "running table suite");

    let report = match parallel {
        Some(parallel) => demo::range_test_parallel(from..to, demo_config, parallel),
        None => demo::range_test(from..to, demo_config),
    };
    let result = TestResult::from_table_report(&report);

    print_status("table", &result);
    println!("{}", TestRunner::format_table(&report));

    Ok(result.is_passed())
}

fn print_status(suite: &str, result: &TestResult) {
    let status = if result.is_passed() {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    println!(
        "{} {} ({} case{})",
        suite.cyan().bold(),
        status,
        result.cases(),
        if result.cases() == 1 { "" } else { "s" }
    );
}
