//! Context and context-carrying error fixtures.

use ctxlog_shared::{Context, ContextError, CorrelationId, attach};
use std::io;

/// A context carrying the given correlation id.
pub fn request_context(id: &str) -> Context {
    let id = CorrelationId::parse(id).expect("fixture correlation id");
    Context::background().with_correlation_id(id)
}

/// An I/O error with `message`, attached to `context`.
pub fn error_in(context: &Context, message: &str) -> ContextError {
    attach(context, io::Error::other(message.to_string()))
}

/// A plain error with no attached context.
pub fn plain_error(message: &str) -> io::Error {
    io::Error::other(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_shared::recover;

    #[test]
    fn error_in_carries_the_context() {
        let origin = request_context("req_origin");
        let error = error_in(&origin, "boom");

        assert!(recover(&Context::background(), &error).same(&origin));
        assert_eq!(error.to_string(), "boom");
    }
}
