//! # Internal invariant messages
//!
//! Most failures the kernel can encounter are a consequence of the program
//! being reduced: a parse error, a recursive binding. Those are reported
//! through [`crate::error::KernelError`] and are entirely expected.
//!
//! A much smaller class of failure is a violation of an invariant the
//! kernel's own construction is supposed to guarantee — for instance, the
//! reducer observing a `main` binding shape that the classifier's own
//! precondition checks should have ruled out beforehand. These are bugs in
//! the interpreter, not in the user's program, and are reported through
//! [`crate::error::KernelError::Internal`] rather than silently producing a
//! wrong answer.

/// Raised when the fresh-name counter is exhausted. Not reachable in
/// practice: see [`crate::name::Counter::next`].
pub const FRESH_NAME_GENERATION_FAILED: &str = "fresh name counter exhausted";

/// Raised when the reducer's `current_names` guard stack is popped more
/// times than it was pushed — would indicate a bug in the unfolding logic.
pub const UNBALANCED_EXPANSION_STACK: &str =
    "reduction expansion stack popped without a matching push";
