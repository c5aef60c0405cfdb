//! # Entry point for the lambda driver application
//!
//! This binary is the only part of the system that touches a file handle,
//! an environment variable, or `std::process::exit`. It reads a source
//! file line by line, feeding each line to [`kernel::parse_line`] to build
//! up an [`kernel::Environment`], then asks the kernel to reduce and render
//! the binding named `main`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use kernel::{Environment, KernelError};

/// A minimal untyped lambda-calculus interpreter.
#[derive(Parser, Debug)]
#[command(name = "lambda-driver", version, about)]
struct CommandLineArguments {
    /// Path to the source file to interpret.
    source: PathBuf,

    /// Raise logging verbosity. May be repeated (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log every reduction step the kernel performs, at debug level.
    #[arg(long)]
    trace: bool,
}

/// Exit code used for usage errors, parse errors, and runtime (recursion)
/// errors, matching the reference implementation's convention.
const EXIT_FAILURE: u8 = 1;

/// Vestigial exit code, preserved from the reference implementation's own
/// defensive check for being invoked with no `argv[0]` at all. Rust's
/// `std::env::args()` cannot actually produce this condition, so this path
/// is unreachable in practice.
#[allow(dead_code)]
const EXIT_NO_ARGV0: u8 = 69;

fn main() -> ExitCode {
    let args = CommandLineArguments::parse();
    init_logging(&args);

    match run(&args) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(args: &CommandLineArguments) {
    let default_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let default_level = if args.trace {
        log::LevelFilter::Trace
    } else {
        default_level
    };
    // RUST_LOG, when set, takes precedence over the verbosity flags.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.to_string()),
    )
    .init();
}

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

fn run(args: &CommandLineArguments) -> Result<String, DriverError> {
    info!("reading source file {}", args.source.display());
    let mut env = load_environment(&args.source)?;
    Ok(kernel::run_main(&mut env)?)
}

fn load_environment(path: &std::path::Path) -> Result<Environment, DriverError> {
    let file = File::open(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut env = Environment::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match kernel::parse_line(&line) {
            Ok(Some(binding)) => env.set(binding),
            Ok(None) => {}
            Err(err) => {
                info!("parse error on line {}", number + 1);
                return Err(DriverError::Kernel(err));
            }
        }
    }
    Ok(env)
}

