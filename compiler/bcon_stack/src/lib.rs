//! Stack growth guard for deeply nested configuration documents.
//!
//! BCON containers, type expressions, and destructuring patterns nest
//! arbitrarily, and both the parser and the evaluator walk them recursively.
//! Wrapping each recursive step in [`ensure_sufficient_stack`] keeps a
//! pathological document from overflowing the native stack.
//!
//! On native targets the stack is grown on demand through `stacker`.
//! On `wasm32` the guard is a passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn parse_expr(&mut self) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| self.parse_expr_inner())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
