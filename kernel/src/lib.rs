//! # The lambda driver kernel
//!
//! This library implements an interpreter for a minimal untyped lambda
//! calculus augmented with top-level named definitions: parsing source
//! text into a [`term::Term`] tree, storing named bindings in an
//! [`env::Environment`], reducing a binding to normal form, and classifying
//! the residual term as a Church numeral, a Church boolean, or a plain
//! structural value.
//!
//! Every fallible operation returns a [`error::KernelError`] rather than
//! panicking or touching the process environment directly: this crate has
//! no knowledge of files, command-line arguments, or exit codes. The
//! `driver` binary crate is the sole owner of those concerns; see its own
//! top-level documentation.

pub mod classify;
pub mod env;
pub mod error;
pub mod kernel_panic;
pub mod name;
pub mod parser;
pub mod reduce;
pub mod term;

use log::debug;

pub use env::{Binding, DisplayHint, Environment};
pub use error::{KernelError, Result};
pub use parser::parse_line;
pub use reduce::reduce_binding;
pub use term::Term;

/// Reduces the binding named `main` in `env` and renders the result
/// according to its display hint. This is the single call the driver makes
/// once a source file has been fully parsed into `env`.
///
/// # Errors
///
/// Returns [`KernelError::MissingMain`] if no binding named `main` exists,
/// or any error [`reduce_binding`] itself can return.
pub fn run_main(env: &mut Environment) -> Result<String> {
    if !env.contains(env::MAIN) {
        return Err(KernelError::MissingMain);
    }
    warn_on_undefined_free_variables(env);
    reduce_binding(env, env::MAIN)?;
    let binding = env
        .binding(env::MAIN)
        .expect("main binding disappeared after reduction");
    Ok(classify::render(&binding.term, binding.display_hint))
}

/// Logs a debug diagnostic for every free variable of `main`'s term that
/// does not resolve to a top-level binding. This is not an error: such a
/// reference simply remains free through reduction (see
/// [`crate::error::KernelError`]'s documentation of the error taxonomy),
/// but it is worth surfacing to a caller running with raised verbosity.
fn warn_on_undefined_free_variables(env: &Environment) {
    let Some(main) = env.get(env::MAIN) else {
        return;
    };
    main.for_each_free_variable(&mut |name| {
        if !env.contains(name) {
            debug!("`main` references undefined name `{name}`; it will remain free");
        }
    });
}
