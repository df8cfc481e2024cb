//! Stack growth for the recursive-descent parser.
//!
//! Every `(` costs one trip through the whole rule chain and every `x =`
//! one call of the assignment rule, so input depth maps straight onto native
//! stack depth. The rules that recurse wrap their bodies in
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated segment
//! when the current one runs low.

/// Space that must remain on the current stack before a rule recurses.
const RED_ZONE: usize = 128 * 1024;

/// Size of each segment allocated once the red zone is reached.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Runs `f`, first switching to a new stack segment if fewer than
/// [`RED_ZONE`] bytes are left.
///
/// ## Example
/// ```
/// use reckon::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Runs `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
