//! `format!`-style level macros with error-context recovery.
//!
//! Each macro formats its arguments like [`format!`] and inspects every
//! positional argument whose type implements [`std::error::Error`]. In
//! argument order, the first such error whose attached context differs from
//! the entry's context selects the context the line is enriched from.
//!
//! ```
//! use ctxlog_logger::{Logger, errorf};
//! use ctxlog_shared::{Context, attach};
//! use std::io;
//!
//! let logger = Logger::nul();
//! let failure = attach(&Context::background(), io::Error::other("disk full"));
//! errorf!(logger, "upload failed: {}", failure);
//! ```
//!
//! Errors are recognised by their static type. Owned errors, references to
//! errors (`&err`) and `&dyn Error` values are all inspected; deeper
//! references such as `&&err` are not supported.
//! Named arguments (`name = value`) are not supported; use inline captures
//! such as `{name}` instead.

#[doc(hidden)]
/// Support items for the formatted macros.
///
/// The macros call `as_logged_error` on `&&&MacroArg(arg)`. Method lookup
/// tries the traits below from the outermost reference inwards, so a
/// borrowed error is claimed by [`BorrowedLoggedError`] before
/// [`AsLoggedError`] can demand a `'static` borrow.
pub mod __private {
    use std::error::Error;

    /// Wraps a borrowed argument for error detection.
    pub struct MacroArg<'a, T: ?Sized>(pub &'a T);

    /// Views a value as a type-erased error.
    pub trait AsDynError {
        /// `self` as `dyn Error`.
        fn as_dyn_error(&self) -> &(dyn Error + 'static);
    }

    impl<E: Error + 'static> AsDynError for E {
        fn as_dyn_error(&self) -> &(dyn Error + 'static) {
            self
        }
    }

    impl AsDynError for dyn Error + 'static {
        fn as_dyn_error(&self) -> &(dyn Error + 'static) {
            self
        }
    }

    impl AsDynError for dyn Error + Send + 'static {
        fn as_dyn_error(&self) -> &(dyn Error + 'static) {
            self
        }
    }

    impl AsDynError for dyn Error + Send + Sync + 'static {
        fn as_dyn_error(&self) -> &(dyn Error + 'static) {
            self
        }
    }

    /// Selected for arguments that borrow an error, for any borrow lifetime.
    pub trait BorrowedLoggedError<'a> {
        /// The borrowed error.
        fn as_logged_error(&self) -> Option<&'a (dyn Error + 'static)>;
    }

    impl<'a, 'b: 'a, E> BorrowedLoggedError<'a> for &&MacroArg<'a, &'b E>
    where
        E: AsDynError + ?Sized,
    {
        fn as_logged_error(&self) -> Option<&'a (dyn Error + 'static)> {
            let error: &'b E = *self.0;
            Some(error.as_dyn_error())
        }
    }

    /// Selected for arguments that are errors.
    pub trait AsLoggedError<'a> {
        /// The argument as an error.
        fn as_logged_error(&self) -> Option<&'a (dyn Error + 'static)>;
    }

    impl<'a, T: Error + 'static> AsLoggedError<'a> for &MacroArg<'a, T> {
        fn as_logged_error(&self) -> Option<&'a (dyn Error + 'static)> {
            Some(self.0)
        }
    }

    /// Fallback for arguments that are not errors.
    pub trait NotLoggedError<'a> {
        /// Always `None`.
        fn as_logged_error(&self) -> Option<&'a (dyn Error + 'static)> {
            None
        }
    }

    impl<'a, T: ?Sized> NotLoggedError<'a> for MacroArg<'a, T> {}
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ctxlog_formatted {
    ($entry:expr, $method:ident, $fmt:literal, [$($bound:ident)*], ) => {{
        #[allow(unused_imports, reason = "unused when no argument is given")]
        use $crate::__private::{
            AsLoggedError as _, BorrowedLoggedError as _, NotLoggedError as _,
        };
        #[allow(unused_mut, reason = "unused when no argument is given")]
        let mut errors: ::std::vec::Vec<&(dyn ::std::error::Error + 'static)> =
            ::std::vec::Vec::new();
        $(
            if let ::std::option::Option::Some(error) =
                (&&&$crate::__private::MacroArg($bound)).as_logged_error()
            {
                errors.push(error);
            }
        )*
        $entry.$method(&errors, ::std::format_args!($fmt $(, $bound)*))
    }};
    ($entry:expr, $method:ident, $fmt:literal, [$($bound:ident)*], $head:expr $(, $tail:expr)*) => {
        match &$head {
            arg => $crate::__ctxlog_formatted!($entry, $method, $fmt, [$($bound)* arg], $($tail),*),
        }
    };
}

/// Formatted Trace line. See the [module docs](crate::macros).
#[macro_export]
macro_rules! tracef {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, tracef, $fmt, [], $($arg),*)
    };
}

/// Formatted Debug line. See the [module docs](crate::macros).
#[macro_export]
macro_rules! debugf {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, debugf, $fmt, [], $($arg),*)
    };
}

/// Formatted Info line. See the [module docs](crate::macros).
#[macro_export]
macro_rules! infof {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, infof, $fmt, [], $($arg),*)
    };
}

/// Formatted Warn line. See the [module docs](crate::macros).
#[macro_export]
macro_rules! warnf {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, warnf, $fmt, [], $($arg),*)
    };
}

/// Formatted Error line, enriched from the first error argument carrying a
/// foreign context. See the [module docs](crate::macros).
#[macro_export]
macro_rules! errorf {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, errorf, $fmt, [], $($arg),*)
    };
}

/// Formatted Fatal line followed by termination with code 1.
/// See the [module docs](crate::macros).
#[macro_export]
macro_rules! fatalf {
    ($entry:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__ctxlog_formatted!($entry, fatalf, $fmt, [], $($arg),*)
    };
}
