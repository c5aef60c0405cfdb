//! # Result classification and pretty-printing
//!
//! Once `main` has been reduced, its display hint determines how the
//! residual term is rendered: as a decimal integer (decoded from a Church
//! numeral), as a boolean literal (decoded from a Church boolean), or
//! structurally, via [`pretty_print`], which is also the fallback when a
//! hinted term does not actually match the expected shape.

use crate::env::DisplayHint;
use crate::name::display_name;
use crate::term::Term;

/// Renders `term` according to `hint`, falling back to structural
/// pretty-printing if `term` does not match the shape the hint expects.
pub fn render(term: &Term, hint: DisplayHint) -> String {
    match hint {
        DisplayHint::Int => decode_numeral(term)
            .map(|n| n.to_string())
            .unwrap_or_else(|| pretty_print(term)),
        DisplayHint::Bool => decode_boolean(term)
            .map(|b| b.to_string())
            .unwrap_or_else(|| pretty_print(term)),
        DisplayHint::None => pretty_print(term),
    }
}

/// Decodes `term` as a Church numeral: `\f. \x. f (f (... (f x) ...))`.
/// Returns `None` if the term does not have this shape.
pub fn decode_numeral(term: &Term) -> Option<u64> {
    let (f, rest) = term.as_abstraction()?;
    let (x, mut body) = rest.as_abstraction()?;

    let mut count = 0u64;
    loop {
        match body.as_variable() {
            Some(name) if name == x => return Some(count),
            _ => {}
        }
        let (func, arg) = body.as_application()?;
        match func.as_variable() {
            Some(name) if name == f => {
                count += 1;
                body = arg;
            }
            _ => return None,
        }
    }
}

/// Decodes `term` as a Church boolean: `\a.\b.a` (true) or `\a.\b.b`
/// (false). Returns `None` if the term does not have this shape.
pub fn decode_boolean(term: &Term) -> Option<bool> {
    let (a, rest) = term.as_abstraction()?;
    let (b, body) = rest.as_abstraction()?;
    match body.as_variable()? {
        name if name == a => Some(true),
        name if name == b => Some(false),
        _ => None,
    }
}

/// Renders `term` structurally, stripping freshening prefixes from every
/// identifier so reduction-internal renaming never leaks into the output.
pub fn pretty_print(term: &Term) -> String {
    match term {
        Term::Variable(name) => display_name(name).to_string(),
        Term::Abstraction { param, body } => {
            format!("\\{}.{}", display_name(param), pretty_print(body))
        }
        Term::Application { func, arg } => {
            format!("({})({})", pretty_print(func), pretty_print(arg))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn church_numeral(n: u64) -> Term {
        let mut body = Term::variable("x");
        for _ in 0..n {
            body = Term::application(Term::variable("f"), body);
        }
        Term::abstraction("f", Term::abstraction("x", body))
    }

    #[test]
    fn decodes_church_numerals() {
        for n in [0, 1, 2, 10] {
            assert_eq!(decode_numeral(&church_numeral(n)), Some(n));
        }
    }

    #[test]
    fn decodes_church_booleans() {
        let ctrue = Term::abstraction("a", Term::abstraction("b", Term::variable("a")));
        let cfalse = Term::abstraction("a", Term::abstraction("b", Term::variable("b")));
        assert_eq!(decode_boolean(&ctrue), Some(true));
        assert_eq!(decode_boolean(&cfalse), Some(false));
    }

    #[test]
    fn non_matching_shape_falls_back_to_structural_print() {
        let term = Term::variable("x");
        assert_eq!(render(&term, DisplayHint::Int), "x");
        assert_eq!(render(&term, DisplayHint::Bool), "x");
    }

    #[test]
    fn pretty_print_strips_freshening_prefixes() {
        let term = Term::abstraction("3-x", Term::variable("3-x"));
        assert_eq!(pretty_print(&term), "\\x.x");
    }
}
