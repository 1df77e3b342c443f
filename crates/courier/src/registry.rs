//! The handler registry: endpoint key → handler.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;

use courier_core::Result;

use crate::context::Context;

/// A registered handler: owns its future, shareable across dispatches.
pub type BoxedHandler = Arc<dyn Fn(Context) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Wraps an async function into the registry's handler shape.
pub fn into_handler<F, Fut>(f: F) -> BoxedHandler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// A flat map from endpoint key to handler.
///
/// Registration is last-write-wins: re-registering a key silently replaces
/// the previous handler. Lookups clone the `Arc`, so dispatch never holds
/// the lock across an await.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, BoxedHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, key: String, handler: BoxedHandler) {
        self.handlers.write().insert(key, handler);
    }

    pub fn lookup(&self, key: &str) -> Option<BoxedHandler> {
        self.handlers.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> BoxedHandler {
        into_handler(|_ctx| async { Ok(()) })
    }

    #[test]
    fn register_and_lookup() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register("/start".into(), noop());
        assert!(registry.contains("/start"));
        assert!(registry.lookup("/start").is_some());
        assert!(registry.lookup("/stop").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregistration_replaces() {
        let registry = HandlerRegistry::new();
        registry.register("/start".into(), noop());
        registry.register("/start".into(), noop());
        assert_eq!(registry.len(), 1);
    }
}
