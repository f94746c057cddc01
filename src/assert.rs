//! Assertions for caller contracts that are too hot to check unconditionally.
//!
//! They behave like `debug_assert!` unless the `strict_assertions` feature is
//! enabled, in which case they are always checked.

/// `assert!` with `strict_assertions`, `debug_assert!` otherwise.
#[macro_export]
macro_rules! strict_assert {
    ($($arg:tt)*) => {
        #[cfg(feature = "strict_assertions")]
        assert!($($arg)*);
        #[cfg(not(feature = "strict_assertions"))]
        debug_assert!($($arg)*);
    };
}

/// `assert_eq!` with `strict_assertions`, `debug_assert_eq!` otherwise.
#[macro_export]
macro_rules! strict_assert_eq {
    ($($arg:tt)*) => {
        #[cfg(feature = "strict_assertions")]
        assert_eq!($($arg)*);
        #[cfg(not(feature = "strict_assertions"))]
        debug_assert_eq!($($arg)*);
    };
}
