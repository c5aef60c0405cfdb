//! # Kernel errors
//!
//! The kernel never panics on a user-triggered condition and never exits the
//! process: every fallible operation returns a [`KernelError`], which the
//! driver is responsible for reporting and translating into an exit code.
//! This keeps the kernel usable from contexts other than the bundled CLI
//! (an embedder, a test harness) without dragging `std::process::exit`
//! along for the ride.

use thiserror::Error;

/// Errors that can arise while parsing or reducing a lambda-calculus
/// program.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum KernelError {
    /// The parser encountered a token it could not make sense of at the
    /// given position.
    #[error("parse error at position {position}: {message}")]
    Parse {
        /// Byte offset into the line being parsed at which the error was
        /// detected.
        position: usize,
        /// A human-readable description of what went wrong.
        message: String,
    },
    /// Reduction re-entered a top-level binding whose expansion was already
    /// in progress, directly or through an intermediate binding.
    #[error("ERROR: Recursion detected in function `{name}`.")]
    Recursion {
        /// The name of the binding that was re-entered.
        name: String,
    },
    /// The binding named `main` was not found in the environment once the
    /// whole source file had been parsed.
    #[error("no binding named `main` was found")]
    MissingMain,
    /// An internal invariant of the kernel was violated. Unlike the other
    /// variants, this does not indicate a problem with the user's program:
    /// it indicates a bug in the interpreter itself.
    #[error("internal kernel invariant violated: {0}")]
    Internal(&'static str),
}

impl KernelError {
    /// Convenience constructor for [`KernelError::Parse`].
    pub fn parse<M: Into<String>>(position: usize, message: M) -> Self {
        KernelError::Parse {
            position,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`KernelError::Recursion`].
    pub fn recursion<N: Into<String>>(name: N) -> Self {
        KernelError::Recursion { name: name.into() }
    }
}

/// A specialized `Result` for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_error_renders_position_and_message() {
        let err = KernelError::parse(4, "expected '.'");
        assert_eq!(err.to_string(), "parse error at position 4: expected '.'");
    }

    #[test]
    fn recursion_error_matches_reference_wording() {
        let err = KernelError::recursion("loop");
        assert_eq!(
            err.to_string(),
            "ERROR: Recursion detected in function `loop`."
        );
    }
}
