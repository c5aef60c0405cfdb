//! # The binding environment
//!
//! Bindings are parsed sequentially from the source file, and a later
//! binding may reference an earlier one (or redefine it — the source file's
//! bindings are themselves mutable state, assembled line by line). The
//! environment mirrors this: it is an *ordered* collection, since insertion
//! order is the only order a source file gives us, even though that order
//! is never itself observed once parsing is complete.
//!
//! Lookups are by linear scan rather than through a hash table. The
//! environment of a typical source file holds a handful of bindings, so the
//! asymptotics are irrelevant; what matters is preserving the exact
//! replace-in-place semantics a hash map would not give for free (a hash
//! map's entry order is not its insertion order).

use crate::term::Term;

/// Controls how the driver decodes the residual term bound to `main` once
/// reduction has finished. Only the `main` binding may carry a hint other
/// than [`DisplayHint::None`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayHint {
    /// No decoding: pretty-print the residual term structurally.
    None,
    /// Decode the residual term as a Church numeral.
    Int,
    /// Decode the residual term as a Church boolean.
    Bool,
}

/// A single top-level definition: a name, the term it is bound to, and
/// (for `main` only) a display hint controlling how the final result is
/// rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// The binding's name.
    pub name: String,
    /// The term the name is bound to.
    pub term: Term,
    /// How to render the term once reduced, if at all.
    pub display_hint: DisplayHint,
}

impl Binding {
    /// Creates a new binding with no display hint.
    pub fn new<N: Into<String>>(name: N, term: Term) -> Self {
        Binding {
            name: name.into(),
            term,
            display_hint: DisplayHint::None,
        }
    }

    /// Creates a new binding carrying a display hint.
    pub fn with_hint<N: Into<String>>(name: N, term: Term, display_hint: DisplayHint) -> Self {
        Binding {
            name: name.into(),
            term,
            display_hint,
        }
    }
}

/// The name reserved for the interpreter's entry point.
pub const MAIN: &str = "main";

/// An ordered, insertion-preserving collection of uniquely-named bindings.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: Vec<Binding>,
}

impl Environment {
    /// Creates a new, empty environment.
    pub fn new() -> Self {
        Environment {
            bindings: Vec::new(),
        }
    }

    /// Registers `binding`, replacing any existing binding with the same
    /// name in place (so later references to earlier positions in the
    /// source file still see a consistent name list), or appending it if
    /// the name is new.
    pub fn set(&mut self, binding: Binding) {
        match self.bindings.iter_mut().find(|b| b.name == binding.name) {
            Some(slot) => *slot = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Returns the term bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.term)
    }

    /// Returns the full binding for `name`, if any.
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Returns `true` iff a binding named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    /// Removes the binding named `name`, if any.
    pub fn delete(&mut self, name: &str) {
        self.bindings.retain(|b| b.name != name);
    }

    /// Replaces the term bound to `name` in place, leaving its display hint
    /// and position untouched.
    ///
    /// # Panics
    ///
    /// Panics if no binding named `name` exists; callers are expected to
    /// have checked [`Environment::contains`] (or to know the name was just
    /// parsed into the environment) beforehand.
    pub fn update_term(&mut self, name: &str, term: Term) {
        let slot = self
            .bindings
            .iter_mut()
            .find(|b| b.name == name)
            .expect("update_term called on an unregistered binding");
        slot.term = term;
    }

    /// Iterates over every top-level binding name currently registered, in
    /// insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_appends_new_bindings_in_order() {
        let mut env = Environment::new();
        env.set(Binding::new("a", Term::variable("a")));
        env.set(Binding::new("b", Term::variable("b")));
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut env = Environment::new();
        env.set(Binding::new("a", Term::variable("a")));
        env.set(Binding::new("b", Term::variable("b")));
        env.set(Binding::new("a", Term::variable("replaced")));
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(env.get("a"), Some(&Term::variable("replaced")));
    }

    #[test]
    fn get_and_contains_reflect_registered_names() {
        let mut env = Environment::new();
        assert!(!env.contains("a"));
        env.set(Binding::new("a", Term::variable("a")));
        assert!(env.contains("a"));
        assert_eq!(env.get("a"), Some(&Term::variable("a")));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn delete_removes_a_binding() {
        let mut env = Environment::new();
        env.set(Binding::new("a", Term::variable("a")));
        env.delete("a");
        assert!(!env.contains("a"));
    }
}
