/// Headroom that must remain before a recursive step runs on the current
/// segment. One parser precedence cascade or one evaluator step stays well
/// below this.
const HEADROOM: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Runs `f`, switching to a new stack segment first when less than
/// [`HEADROOM`] bytes are left.
///
/// The parser calls this once per expression, unary operator and statement,
/// and the evaluator once per expression, statement and user function call,
/// so nesting depth is bounded by memory rather than by the thread's stack.
///
/// # Example
/// ```
/// use npp::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(HEADROOM, SEGMENT, f)
}
