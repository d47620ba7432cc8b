//! Stack growth for deep hierarchy walks.
//!
//! Tag resolution recurses once per parent type, implemented interface,
//! enclosing type and composed tag. Nothing bounds those chains by a
//! constant, so every recursive step runs through [`ensure_sufficient_stack`]
//! instead of relying on a hard-coded depth limit.
//!
//! On native targets the stack is grown with `stacker`; on WASM the closure
//! is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn search(&self, ty: TypeId) -> Option<Hit> {
///     ensure_sufficient_stack(|| {
///         // ... recurse into parent / interfaces / meta-tags ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
