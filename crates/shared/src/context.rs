//! Immutable, chainable execution context.
//!
//! A [`Context`] is a persistent linked list of typed values. Adding a value
//! never mutates the receiver: it returns a child that points at its parent,
//! so a context can be shared freely across threads and tasks while every call
//! tree sees exactly the values it was handed.
//!
//! Values are addressed by zero-sized key types implementing [`ContextKey`],
//! which keeps lookups type-checked and lets each crate own private keys.

use crate::{ErrorCode, ErrorEnvelope};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Key type addressing one slot in a [`Context`].
pub trait ContextKey: 'static {
    /// Type stored under this key.
    type Value: Send + Sync + 'static;
}

/// Immutable chain of typed values threaded through a call tree.
///
/// Equality is identity: two contexts are equal only when they are the same
/// link of the same chain (or both are the background context).
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

struct Node {
    parent: Context,
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
}

impl Context {
    /// The empty root context.
    #[must_use]
    pub const fn background() -> Self {
        Self { node: None }
    }

    /// Return a child context carrying `value` under key `K`.
    ///
    /// Shadows any value already stored under `K` further up the chain.
    #[must_use]
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            node: Some(Arc::new(Node {
                parent: self.clone(),
                key: TypeId::of::<K>(),
                value: Box::new(value),
            })),
        }
    }

    /// Look up the nearest value stored under key `K`.
    #[must_use]
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let wanted = TypeId::of::<K>();
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            if node.key == wanted {
                return node.value.downcast_ref::<K::Value>();
            }
            current = node.parent.node.as_deref();
        }
        None
    }

    /// Returns true when `self` and `other` are the same context link.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Number of values stored along the chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.node.as_deref();
        }
        depth
    }

    /// Return a child context carrying a correlation id.
    #[must_use]
    pub fn with_correlation_id(&self, id: CorrelationId) -> Self {
        self.with_value::<CorrelationIdKey>(id)
    }

    /// Return the nearest correlation id, if any.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.value::<CorrelationIdKey>()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Context")
            .field("depth", &self.depth())
            .field("correlation_id", &self.correlation_id())
            .finish()
    }
}

/// A correlation identifier carried in a [`Context`] for log enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(Arc<str>);

impl CorrelationId {
    /// Parse a correlation identifier from user input.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ErrorEnvelope> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "correlationId must be non-empty",
            ));
        }
        Ok(Self(Arc::<str>::from(trimmed)))
    }

    /// Create a new request id, best-effort unique within this process.
    #[must_use]
    pub fn new_request_id() -> Self {
        let n = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(Arc::<str>::from(format!("req_{n}")))
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Context key for the request correlation id.
#[derive(Debug)]
pub struct CorrelationIdKey;

impl ContextKey for CorrelationIdKey {
    type Value = CorrelationId;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TenantKey;

    impl ContextKey for TenantKey {
        type Value = String;
    }

    struct AttemptKey;

    impl ContextKey for AttemptKey {
        type Value = u32;
    }

    #[test]
    fn values_are_found_nearest_first() {
        let root = Context::background().with_value::<TenantKey>("acme".to_string());
        let child = root
            .with_value::<AttemptKey>(1)
            .with_value::<TenantKey>("globex".to_string());

        assert_eq!(child.value::<TenantKey>().map(String::as_str), Some("globex"));
        assert_eq!(child.value::<AttemptKey>(), Some(&1));
        assert_eq!(root.value::<TenantKey>().map(String::as_str), Some("acme"));
        assert_eq!(root.value::<AttemptKey>(), None);
    }

    #[test]
    fn with_value_never_mutates_parent() {
        let parent = Context::background();
        let child = parent.with_value::<AttemptKey>(3);

        assert_eq!(parent.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert!(parent.value::<AttemptKey>().is_none());
    }

    #[test]
    fn equality_is_identity() {
        let a = Context::background().with_value::<AttemptKey>(1);
        let b = Context::background().with_value::<AttemptKey>(1);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(Context::background(), Context::default());
    }

    #[test]
    fn correlation_id_rejects_blank_input() {
        assert!(CorrelationId::parse("   ").is_err());
        let id = CorrelationId::parse(" req_7 ").expect("valid id");
        assert_eq!(id.as_str(), "req_7");
    }

    #[test]
    fn correlation_id_round_trips_through_context() {
        let id = CorrelationId::new_request_id();
        let ctx = Context::background().with_correlation_id(id.clone());

        assert_eq!(ctx.correlation_id(), Some(&id));
        assert!(id.as_str().starts_with("req_"));
    }
}
