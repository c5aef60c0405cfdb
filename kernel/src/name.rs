//! # Fresh name generation
//!
//! The interpreter uses an explicit name-carrying syntax for its terms,
//! rather than de Bruijn indices. One consequence of this design decision is
//! the need to generate a "fresh" name, distinct from every name already in
//! scope, whenever a named definition is unfolded. This module implements
//! that functionality.
//!
//! Freshness here does not mean "globally unique across the whole program":
//! it means "tagged with a prefix no user-written identifier can ever
//! produce". The parser rejects any source identifier containing `-`
//! (see [`crate::parser`]), so prefixing a name with `N-` where `N` is a
//! decimal counter is sufficient to guarantee the result never collides
//! with anything the user wrote, and never collides with a previous
//! freshening either, since the counter only increases.

use log::trace;
use std::fmt;

use crate::kernel_panic;

/// A monotonically increasing counter used to mint fresh name prefixes
/// during reduction. Each unfolding of a named definition, and each
/// recursive step into a sub-term, draws the next value.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    next: u64,
}

impl Counter {
    /// Creates a new counter starting at zero.
    #[inline]
    pub fn new() -> Self {
        Counter { next: 0 }
    }

    /// Draws the next value from the counter, advancing it.
    ///
    /// # Panics
    ///
    /// Panics if the counter has been exhausted (drawn `u64::MAX` times).
    /// This is not a condition any real program can reach in practice.
    #[inline]
    pub fn next(&mut self) -> u64 {
        let current = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect(kernel_panic::FRESH_NAME_GENERATION_FAILED);
        trace!("issuing fresh-name counter value {current}");
        current
    }
}

/// Builds a freshened identifier from a counter value and the identifier
/// being freshened, in the reserved `N-original` form.
#[inline]
pub fn freshen(counter: u64, original: &str) -> String {
    format!("{counter}-{original}")
}

/// Returns `true` iff `identifier` is already in freshened form, i.e.
/// contains the reserved `-` marker.
#[inline]
pub fn is_freshened(identifier: &str) -> bool {
    identifier.contains('-')
}

/// Strips a freshened identifier down to the portion a user would
/// recognize: everything after the first `-`. Identifiers that were never
/// freshened are returned unchanged.
///
/// This is how the pretty-printer hides reduction-internal renaming from
/// the user: see [`crate::classify::pretty_print`].
pub fn display_name(identifier: &str) -> &str {
    match identifier.split_once('-') {
        Some((_, rest)) => rest,
        None => identifier,
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.next)
    }
}
