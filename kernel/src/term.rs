//! # Lambda terms
//!
//! The interpreter's terms are the terms of the untyped λ-calculus,
//! extended with a flat namespace of top-level named definitions. The
//! grammar is recursively defined, as follows:
//!
//! ```text
//!     t ::= x | \x. t | t t
//! ```
//!
//! Here `x` ranges over identifiers. An occurrence of `x` is either *bound*
//! by an enclosing abstraction `\x. …`, or *free*, in which case it refers
//! either to a variable bound further out (when the term is itself a
//! sub-term of a larger abstraction) or to a top-level binding resolved
//! against the [`crate::env::Environment`] at reduction time.
//!
//! Unlike a term representation backed by a shared heap of handles, each
//! `Term` here owns its sub-terms outright through `Box`. There is no
//! interning, no dangling-handle invariant to maintain, and no aliasing
//! between environment entries: every clone is a genuine deep copy. This is
//! sufficient because the only client of this crate is the bundled driver,
//! not untrusted code across a trust boundary.

use std::fmt;

/// Lambda terms: variables, applications, and abstractions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A reference to a bound variable or to a top-level binding.
    Variable(String),
    /// `\param. body`, a single-argument function.
    Abstraction {
        /// The name of the newly-introduced formal parameter.
        param: String,
        /// The function's body.
        body: Box<Term>,
    },
    /// `func arg`, the application of one term to another.
    Application {
        /// The term being applied to `arg`.
        func: Box<Term>,
        /// The term being consumed by `func`.
        arg: Box<Term>,
    },
}

impl Term {
    /// Creates a new variable reference.
    #[inline]
    pub fn variable<T: Into<String>>(name: T) -> Self {
        Term::Variable(name.into())
    }

    /// Creates a new abstraction over `body` with formal parameter `param`.
    #[inline]
    pub fn abstraction<T: Into<String>>(param: T, body: Term) -> Self {
        Term::Abstraction {
            param: param.into(),
            body: Box::new(body),
        }
    }

    /// Creates a new application of `func` to `arg`.
    #[inline]
    pub fn application(func: Term, arg: Term) -> Self {
        Term::Application {
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    /// Returns `Some(name)` iff the term is a variable.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `Some((param, body))` iff the term is an abstraction.
    pub fn as_abstraction(&self) -> Option<(&str, &Term)> {
        match self {
            Term::Abstraction { param, body } => Some((param, body)),
            _ => None,
        }
    }

    /// Returns `Some((func, arg))` iff the term is an application.
    pub fn as_application(&self) -> Option<(&Term, &Term)> {
        match self {
            Term::Application { func, arg } => Some((func, arg)),
            _ => None,
        }
    }

    /// Returns `true` iff the term is a variable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.as_variable().is_some()
    }

    /// Returns `true` iff the term is an abstraction.
    #[inline]
    pub fn is_abstraction(&self) -> bool {
        self.as_abstraction().is_some()
    }

    /// Returns `true` iff the term is an application.
    #[inline]
    pub fn is_application(&self) -> bool {
        self.as_application().is_some()
    }

    /// Walks the term, invoking `visit` on every variable name that occurs
    /// free, i.e. not under a binder for that name.
    pub fn for_each_free_variable<F: FnMut(&str)>(&self, visit: &mut F) {
        fn go<F: FnMut(&str)>(term: &Term, bound: &mut Vec<String>, visit: &mut F) {
            match term {
                Term::Variable(name) => {
                    if !bound.iter().any(|b| b == name) {
                        visit(name);
                    }
                }
                Term::Abstraction { param, body } => {
                    bound.push(param.clone());
                    go(body, bound, visit);
                    bound.pop();
                }
                Term::Application { func, arg } => {
                    go(func, bound, visit);
                    go(arg, bound, visit);
                }
            }
        }
        go(self, &mut Vec::new(), visit)
    }
}

/// Renders a term using the interpreter's surface syntax, with every
/// freshened identifier shown in its raw, unstripped form. Used internally
/// for diagnostics; user-facing rendering goes through
/// [`crate::classify::pretty_print`], which strips freshening prefixes.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{name}"),
            Term::Abstraction { param, body } => write!(f, "\\{param}.{body}"),
            Term::Application { func, arg } => write!(f, "({func})({arg})"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constructors_round_trip_through_accessors() {
        let var = Term::variable("x");
        assert_eq!(var.as_variable(), Some("x"));

        let abs = Term::abstraction("x", Term::variable("x"));
        let (param, body) = abs.as_abstraction().unwrap();
        assert_eq!(param, "x");
        assert_eq!(body, &Term::variable("x"));

        let app = Term::application(Term::variable("f"), Term::variable("a"));
        let (func, arg) = app.as_application().unwrap();
        assert_eq!(func, &Term::variable("f"));
        assert_eq!(arg, &Term::variable("a"));
    }

    #[test]
    fn free_variables_exclude_bound_occurrences() {
        // \x. x y -- y is free, x is not.
        let term = Term::abstraction(
            "x",
            Term::application(Term::variable("x"), Term::variable("y")),
        );
        let mut free = Vec::new();
        term.for_each_free_variable(&mut |name| free.push(name.to_string()));
        assert_eq!(free, vec!["y".to_string()]);
    }

    #[test]
    fn display_uses_conventional_surface_syntax() {
        let term = Term::application(
            Term::abstraction("x", Term::variable("x")),
            Term::variable("y"),
        );
        assert_eq!(term.to_string(), "(\\x.x)(y)");
    }
}
