//! # Recursive-descent parser
//!
//! The grammar accepted per line is:
//!
//! ```text
//!     line        := '--' …             -- comment, ignored
//!                  | name ('int'|'num'|'bool')? '=' term
//!     term        := atom (term)?       -- application is left-associative
//!     atom        := variable
//!                  | '\' variable '.' term
//!                  | '(' term ')'
//!     variable    := identifier
//! ```
//!
//! Errors are reported as [`KernelError::Parse`], carrying the byte offset
//! into the line at which the parser gave up and a short message naming what
//! it expected. There is no panicking path: reaching end-of-input while a
//! production still expects a token is itself a reportable parse error,
//! never a silent truncation.

use crate::env::{Binding, DisplayHint};
use crate::error::{KernelError, Result};
use crate::term::Term;

const DELIMITERS: &[char] = &['.', '\\', '(', ')', '='];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn error<M: Into<String>>(&self, message: M) -> KernelError {
        KernelError::parse(self.pos, message)
    }

    /// Scans a maximal run of non-delimiter characters starting at the
    /// current position. Returns an error naming `what` (the syntactic
    /// category expected, e.g. "identifier" or "abstraction parameter") if
    /// nothing could be scanned, and an error if the scanned text contains
    /// the reserved `-` marker.
    fn scan_identifier(&mut self, what: &str) -> Result<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !is_delimiter(c)) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error(format!("expected {what}")));
        }
        let text = &self.input[start..self.pos];
        if text.contains('-') {
            return Err(KernelError::parse(
                start,
                format!("identifier '{text}' may not contain '-'"),
            ));
        }
        Ok(text)
    }
}

/// Parses a single source line into a [`Binding`].
///
/// Returns `Ok(None)` for blank lines and lines beginning with `--`
/// (comments). The type annotation (`int`, `num`, or `bool`) is only
/// accepted when the binding's name is exactly `main`.
pub fn parse_line(line: &str) -> Result<Option<Binding>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("--") {
        return Ok(None);
    }

    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();
    let name = cursor.scan_identifier("a binding name")?.to_string();
    cursor.skip_whitespace();

    let display_hint = if name == crate::env::MAIN {
        parse_optional_hint(&mut cursor)?
    } else {
        DisplayHint::None
    };

    cursor.skip_whitespace();
    match cursor.bump() {
        Some('=') => {}
        Some(other) => {
            return Err(KernelError::parse(
                cursor.pos - other.len_utf8(),
                "expected '='",
            ))
        }
        None => return Err(cursor.error("expected '='")),
    }
    cursor.skip_whitespace();

    let term = parse_term(&mut cursor)?;
    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(cursor.error(format!(
            "unexpected trailing input starting with '{}'",
            cursor.peek().unwrap_or_default()
        )));
    }

    Ok(Some(Binding::with_hint(name, term, display_hint)))
}

fn parse_optional_hint(cursor: &mut Cursor<'_>) -> Result<DisplayHint> {
    let checkpoint = cursor.pos;
    let word_start = cursor.pos;
    while matches!(cursor.peek(), Some(c) if !is_delimiter(c)) {
        cursor.bump();
    }
    let word = &cursor.input[word_start..cursor.pos];
    let hint = match word {
        "int" | "num" => Some(DisplayHint::Int),
        "bool" => Some(DisplayHint::Bool),
        _ => None,
    };
    match hint {
        Some(hint) => Ok(hint),
        None => {
            cursor.pos = checkpoint;
            Ok(DisplayHint::None)
        }
    }
}

/// Parses a single term starting at the cursor's current position. Stops at
/// end of input or at a `)` that closes an enclosing parenthesis (the `)`
/// itself is left unconsumed for the caller to handle).
fn parse_term(cursor: &mut Cursor<'_>) -> Result<Term> {
    cursor.skip_whitespace();
    let mut term = parse_atom(cursor)?;
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None | Some(')') => break,
            Some('.') => return Err(cursor.error("unexpected '.'")),
            Some(_) => {
                let arg = parse_atom(cursor)?;
                term = Term::application(term, arg);
            }
        }
    }
    Ok(term)
}

fn parse_atom(cursor: &mut Cursor<'_>) -> Result<Term> {
    cursor.skip_whitespace();
    match cursor.peek() {
        Some('\\') => {
            cursor.bump();
            cursor.skip_whitespace();
            let param = cursor.scan_identifier("abstraction parameter")?.to_string();
            cursor.skip_whitespace();
            match cursor.bump() {
                Some('.') => {}
                Some(_) => return Err(cursor.error("expected '.' after abstraction parameter")),
                None => return Err(cursor.error("expected '.' after abstraction parameter")),
            }
            let body = parse_term(cursor)?;
            Ok(Term::abstraction(param, body))
        }
        Some('(') => {
            cursor.bump();
            let inner = parse_term(cursor)?;
            match cursor.bump() {
                Some(')') => Ok(inner),
                _ => Err(cursor.error("expected ')'")),
            }
        }
        Some('.') => Err(cursor.error("unexpected '.'")),
        Some(')') => Err(cursor.error("unexpected ')'")),
        Some(_) => {
            let name = cursor.scan_identifier("a term")?.to_string();
            Ok(Term::variable(name))
        }
        None => Err(cursor.error("expected a term")),
    }
}
