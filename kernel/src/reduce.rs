//! # Reduction engine
//!
//! Reduction is normal-order, with named top-level definitions unfolded
//! on demand the first time reduction reaches a free variable that
//! resolves against the [`Environment`]. Each unfolding clones the bound
//! term, alpha-renames its bound variables with a fresh prefix (see
//! [`crate::name`]), and continues reducing the freshened clone in place of
//! the original variable occurrence.
//!
//! Self- and mutual-recursion are caught by tracking the set of top-level
//! names whose expansion is currently in progress, on the reduction call
//! stack (`current_names`). A lookup that would re-enter a name already in
//! that set is a recursion error, whether the re-entry is direct (`f = f`)
//! or indirect (`f = g`, `g = f`).

use log::{debug, trace};

use crate::env::Environment;
use crate::error::{KernelError, Result};
use crate::kernel_panic;
use crate::name::{freshen, is_freshened, Counter};
use crate::term::Term;

/// The stack of top-level binding names whose expansion is currently in
/// progress, innermost last. Used to detect direct and mutual recursion.
#[derive(Debug, Default)]
struct ExpansionStack {
    names: Vec<String>,
}

impl ExpansionStack {
    fn new() -> Self {
        ExpansionStack { names: Vec::new() }
    }

    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn push(&mut self, name: String) {
        self.names.push(name);
    }

    fn pop(&mut self) -> Result<()> {
        self.names
            .pop()
            .map(|_| ())
            .ok_or_else(|| KernelError::Internal(kernel_panic::UNBALANCED_EXPANSION_STACK))
    }
}

/// Reduces the binding named `name` in `env` to normal form (or until no
/// further progress is possible), mutating the environment's copy in
/// place.
///
/// Returns [`KernelError::Recursion`] if reduction would re-enter a
/// top-level binding whose expansion is already on the stack, and
/// [`KernelError::MissingMain`]-compatible errors are the caller's
/// responsibility to raise if `name` is absent beforehand.
pub fn reduce_binding(env: &mut Environment, name: &str) -> Result<()> {
    let mut term = env
        .get(name)
        .cloned()
        .ok_or_else(|| KernelError::Internal("reduce_binding called on an unregistered name"))?;

    let mut counter = Counter::new();
    let mut stack = ExpansionStack::new();
    stack.push(name.to_string());
    reduce(env, &mut stack, &mut term, &mut counter)?;
    stack.pop()?;

    env.update_term(name, term);
    Ok(())
}

/// Reduces `term` in place. Returns `Ok(true)` when no further progress is
/// possible (the term is in normal form, or stuck), `Ok(false)` when the
/// term changed and may admit further reduction at an outer call site.
fn reduce(
    env: &Environment,
    current_names: &mut ExpansionStack,
    term: &mut Term,
    counter: &mut Counter,
) -> Result<bool> {
    match term {
        Term::Variable(name) => {
            let name = name.clone();
            reduce_variable(env, current_names, term, name, counter)
        }
        Term::Abstraction { body, .. } => {
            if body.is_variable() {
                return Ok(true);
            }
            reduce(env, current_names, body, counter)
        }
        Term::Application { .. } => reduce_application(env, current_names, term, counter),
    }
}

fn reduce_variable(
    env: &Environment,
    current_names: &mut ExpansionStack,
    term: &mut Term,
    name: String,
    counter: &mut Counter,
) -> Result<bool> {
    if current_names.contains(&name) {
        return Err(KernelError::recursion(name));
    }

    let bound = match env.get(&name) {
        Some(bound) => bound.clone(),
        None => return Ok(true),
    };

    let prefix = freshen(counter.next(), &name);
    let mut freshened = bound;
    prefix_args(&mut freshened, &prefix, env);

    trace!("unfolding `{name}` with fresh prefix `{prefix}`");

    current_names.push(name);
    let result = reduce(env, current_names, &mut freshened, counter);
    current_names.pop()?;
    result?;

    *term = freshened;
    Ok(false)
}

fn reduce_application(
    env: &Environment,
    current_names: &mut ExpansionStack,
    term: &mut Term,
    counter: &mut Counter,
) -> Result<bool> {
    let Term::Application { func, arg } = term else {
        unreachable!("reduce_application called on a non-application term")
    };

    reduce(env, current_names, arg, counter)?;

    loop {
        let done = reduce(env, current_names, func, counter)?;
        if func.is_abstraction() || done {
            break;
        }
    }

    if let Term::Abstraction { param, body } = func.as_mut() {
        let mut substituted = *body.clone();
        update(&mut substituted, param, arg);
        debug!("beta-reducing application of `\\{param}. ...`");
        *term = substituted;
        return reduce(env, current_names, term, counter).map(|_| false);
    }

    Ok(true)
}

/// Rewrites the bound variables introduced within `term` to fresh,
/// uniquely-prefixed names, leaving references to top-level bindings (and
/// names already freshened) untouched. This is the "prefixing" step
/// performed whenever a named definition's body is cloned for unfolding.
fn prefix_args(term: &mut Term, prefix: &str, env: &Environment) {
    fn go(term: &mut Term, prefix: &str, env: &Environment, bound: &mut Vec<String>) {
        match term {
            Term::Variable(name) => {
                if bound.iter().any(|b| b == name) {
                    *name = freshen_scoped(prefix, name);
                } else if !env.contains(name) && !is_freshened(name) {
                    *name = freshen_scoped(prefix, name);
                }
            }
            Term::Abstraction { param, body } => {
                let fresh_param = freshen_scoped(prefix, param);
                bound.push(param.clone());
                *param = fresh_param;
                go(body, prefix, env, bound);
                bound.pop();
            }
            Term::Application { func, arg } => {
                go(func, prefix, env, bound);
                go(arg, prefix, env, bound);
            }
        }
    }
    go(term, prefix, env, &mut Vec::new())
}

fn freshen_scoped(prefix: &str, original: &str) -> String {
    format!("{prefix}-{original}")
}

/// Substitutes `replacement` for every free occurrence of `param` within
/// `term`, cloning `replacement` at each occurrence. Shadowing is not
/// tracked: by the time substitution runs, every binder reachable from
/// `term` has already been freshened by [`prefix_args`], so no bound name
/// within `term` can collide with `param`.
fn update(term: &mut Term, param: &str, replacement: &Term) {
    match term {
        Term::Variable(name) => {
            if name == param {
                *term = replacement.clone();
            }
        }
        Term::Abstraction { body, .. } => update(body, param, replacement),
        Term::Application { func, arg } => {
            update(func, param, replacement);
            update(arg, param, replacement);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::env::Binding;
    use pretty_assertions::assert_eq;

    fn reduce_main(source_bindings: Vec<(&str, Term)>) -> Result<Term> {
        let mut env = Environment::new();
        for (name, term) in source_bindings {
            env.set(Binding::new(name, term));
        }
        reduce_binding(&mut env, "main")?;
        Ok(env.get("main").unwrap().clone())
    }

    #[test]
    fn beta_reduction_substitutes_the_argument() {
        // (\x. x) y -> y
        let result = reduce_main(vec![(
            "main",
            Term::application(
                Term::abstraction("x", Term::variable("x")),
                Term::variable("y"),
            ),
        )])
        .unwrap();
        assert_eq!(result, Term::variable("y"));
    }

    #[test]
    fn unfolding_a_named_definition_reaches_normal_form() {
        // id = \x.x ; main = id
        let result = reduce_main(vec![
            ("id", Term::abstraction("x", Term::variable("x"))),
            ("main", Term::variable("id")),
        ])
        .unwrap();
        assert_eq!(result, Term::abstraction("x", Term::variable("x")));
    }

    #[test]
    fn direct_self_recursion_is_detected() {
        // loop = \x. loop x ; main = loop
        let err = reduce_main(vec![
            (
                "loop",
                Term::abstraction(
                    "x",
                    Term::application(Term::variable("loop"), Term::variable("x")),
                ),
            ),
            ("main", Term::variable("loop")),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR: Recursion detected in function `loop`."
        );
    }

    #[test]
    fn mutual_recursion_is_detected() {
        // f = g ; g = f ; main = f
        let err = reduce_main(vec![
            ("f", Term::variable("g")),
            ("g", Term::variable("f")),
            ("main", Term::variable("f")),
        ])
        .unwrap_err();
        assert!(matches!(err, KernelError::Recursion { .. }));
    }

    #[test]
    fn repeated_unfolding_does_not_alias_bound_variables() {
        // twice = \f.\x. f (f x) applied to succ and zero should not have
        // the two inner unfoldings of `f` collide.
        let succ = Term::abstraction(
            "n",
            Term::abstraction(
                "f",
                Term::abstraction(
                    "x",
                    Term::application(
                        Term::variable("f"),
                        Term::application(
                            Term::application(Term::variable("n"), Term::variable("f")),
                            Term::variable("x"),
                        ),
                    ),
                ),
            ),
        );
        let twice = Term::abstraction(
            "f",
            Term::abstraction(
                "x",
                Term::application(
                    Term::variable("f"),
                    Term::application(Term::variable("f"), Term::variable("x")),
                ),
            ),
        );
        let zero = Term::abstraction("f", Term::abstraction("x", Term::variable("x")));
        let main = Term::application(
            Term::application(Term::variable("twice"), Term::variable("succ")),
            zero,
        );
        let result = reduce_main(vec![("succ", succ), ("twice", twice), ("main", main)]).unwrap();
        // Expect a Church-style \f.\x. f (f x) shape (numeral 2), with no
        // panics from colliding bound names.
        let (_, body) = result.as_abstraction().unwrap();
        assert!(body.as_abstraction().is_some());
    }
}
