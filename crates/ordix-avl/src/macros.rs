//! Internal macros.

/// Checks a caller contract on a hot path.
///
/// Active under `debug_assertions` or the `strict-invariants` feature and
/// compiled out otherwise. A failed check is a programmer error and panics.
macro_rules! avl_invariant {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "strict-invariants")) {
            assert!($cond, $($arg)+);
        }
    };
}
