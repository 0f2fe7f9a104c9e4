//! Chain of responsibility for request validation.
//!
//! Handlers are grouped by a mark and run in ascending `order` within their
//! group. The first handler to fail stops the chain.

use railseat_core::{AllocationError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// One link in a validation chain over `T`.
pub trait ChainHandler<T>: Send + Sync {
    /// Group this handler belongs to.
    fn mark(&self) -> &'static str;

    /// Position inside the group; lower runs first.
    fn order(&self) -> i32;

    /// Check `request`.
    ///
    /// # Errors
    ///
    /// Returns the error that stops the chain.
    fn handle(&self, request: &T) -> Result<()>;
}

/// Chains of [`ChainHandler`]s keyed by mark.
pub struct ChainContext<T> {
    chains: HashMap<&'static str, Vec<Arc<dyn ChainHandler<T>>>>,
}

impl<T> ChainContext<T> {
    /// Context without any chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    /// Add `handler` to the chain named by its mark.
    ///
    /// Handlers with equal `order` keep registration order.
    pub fn register(&mut self, handler: Arc<dyn ChainHandler<T>>) {
        let chain = self.chains.entry(handler.mark()).or_default();
        chain.push(handler);
        chain.sort_by_key(|handler| handler.order());
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, handler: impl ChainHandler<T> + 'static) -> Self {
        self.register(Arc::new(handler));
        self
    }

    /// Number of handlers in the chain `mark`.
    #[must_use]
    pub fn len(&self, mark: &str) -> usize {
        self.chains.get(mark).map_or(0, Vec::len)
    }

    /// Run the chain `mark` over `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidRequest`] if no chain is registered
    /// under `mark`, otherwise the first handler error.
    pub fn handle(&self, mark: &str, request: &T) -> Result<()> {
        let chain = self.chains.get(mark).ok_or_else(|| {
            AllocationError::InvalidRequest(format!("[{mark}] chain is undefined"))
        })?;
        for handler in chain {
            tracing::trace!(mark, order = handler.order(), "Running chain handler");
            handler.handle(request)?;
        }
        Ok(())
    }
}

impl<T> Default for ChainContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ChainContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut marks: Vec<_> = self.chains.iter().map(|(m, c)| (*m, c.len())).collect();
        marks.sort_unstable();
        f.debug_struct("ChainContext").field("chains", &marks).finish()
    }
}
