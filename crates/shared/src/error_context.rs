//! Attach an execution [`Context`] to an error and recover it later.
//!
//! Producers wrap an error with [`attach`] close to where it happened; the code
//! that finally logs it calls [`recover`] to get that context back, even when
//! the error has since been wrapped by other error types (the `source()` chain
//! is searched).

use crate::Context;
use std::error::Error;
use std::fmt;

/// Boxed error payload wrapped by [`ContextError`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error carrying the context it was produced in.
///
/// `Display` is the wrapped error's message; the wrapped error is the
/// `source()`.
#[derive(Debug)]
pub struct ContextError {
    context: Context,
    inner: BoxError,
}

impl ContextError {
    /// The attached context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Borrow the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Consume and return the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, formatter)
    }
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

/// Wrap `error` so that it carries `context`.
pub fn attach(context: &Context, error: impl Into<BoxError>) -> ContextError {
    ContextError {
        context: context.clone(),
        inner: error.into(),
    }
}

/// Return the context attached to `error`, or `default` when none is attached.
///
/// The error and its `source()` chain are searched in order; the first
/// [`ContextError`] found wins.
#[must_use]
pub fn recover(default: &Context, error: &(dyn Error + 'static)) -> Context {
    let mut current = Some(error);
    while let Some(candidate) = current {
        if let Some(attached) = candidate.downcast_ref::<ContextError>() {
            return attached.context.clone();
        }
        current = candidate.source();
    }
    default.clone()
}

/// `Result` helper attaching a context to the error variant.
pub trait AttachContext<T> {
    /// Map `Err(e)` to `Err(attach(context, e))`.
    fn attach_context(self, context: &Context) -> Result<T, ContextError>;
}

impl<T, E> AttachContext<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn attach_context(self, context: &Context) -> Result<T, ContextError> {
        self.map_err(|error| attach(context, error))
    }
}
