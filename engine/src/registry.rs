//! Handler registry
//!
//! The registry provides:
//! - Registration of one [`PurchaseHandler`] per class key
//! - Validation of every request through the purchase filter chain
//! - Dispatch to the handler registered for the request's class

use crate::chain::ChainContext;
use crate::config::EngineConfig;
use crate::filters::{PURCHASE_FILTER_MARK, purchase_chain};
use crate::handler::{ClassHandler, PurchaseHandler};
use railseat_core::environment::InventoryProvider;
use railseat_core::{AllocationError, AllocationRequest, AllocationResponse, Result, SeatClass};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe `class key -> handler` registry.
///
/// ## Example
///
/// ```ignore
/// let registry = HandlerRegistry::with_defaults(&EngineConfig::from_env());
/// let response = registry.dispatch(&inventory, &request)?;
/// ```
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<&'static str, Arc<dyn PurchaseHandler>>>>,
    chain: Arc<ChainContext<AllocationRequest>>,
    lock_prefix: String,
}

impl HandlerRegistry {
    /// Registry without handlers, validating with `config`'s limits.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            chain: Arc::new(purchase_chain(config.max_passengers)),
            lock_prefix: config.lock_prefix.clone(),
        }
    }

    /// Registry with a [`ClassHandler`] for every seat class.
    #[must_use]
    pub fn with_defaults(config: &EngineConfig) -> Self {
        let registry = Self::new(config);
        for seat_class in SeatClass::ALL {
            registry.register(Arc::new(ClassHandler::from_config(seat_class, config)));
        }
        registry
    }

    /// Register a handler under its mark.
    ///
    /// Returns `true` if a handler with the same mark was replaced.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another thread)
    #[allow(clippy::expect_used)]
    pub fn register(&self, handler: Arc<dyn PurchaseHandler>) -> bool {
        let mut handlers = self
            .handlers
            .write()
            .expect("Handler registry lock poisoned - indicates a panic in another thread");
        let mark = handler.mark();
        tracing::debug!(mark, "Registering purchase handler");
        handlers.insert(mark, handler).is_some()
    }

    /// Handler registered under `mark`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get(&self, mark: &str) -> Option<Arc<dyn PurchaseHandler>> {
        let handlers = self
            .handlers
            .read()
            .expect("Handler registry lock poisoned - indicates a panic in another thread");
        handlers.get(mark).cloned()
    }

    /// Registered marks, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn marks(&self) -> Vec<&'static str> {
        let handlers = self
            .handlers
            .read()
            .expect("Handler registry lock poisoned - indicates a panic in another thread");
        let mut marks: Vec<&'static str> = handlers.keys().copied().collect();
        marks.sort_unstable();
        marks
    }

    /// Prefix of the lock names guarding allocations dispatched here.
    #[must_use]
    pub fn lock_prefix(&self) -> &str {
        &self.lock_prefix
    }

    /// Validate `request`, then hand it to the handler of its class.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidRequest`] if a filter rejects the
    /// request, [`AllocationError::UnknownSeatClass`] if no handler serves
    /// its class, or the handler's error.
    pub fn dispatch(
        &self,
        provider: &dyn InventoryProvider,
        request: &AllocationRequest,
    ) -> Result<AllocationResponse> {
        self.chain.handle(PURCHASE_FILTER_MARK, request)?;

        let mark = request.seat_class.mark();
        let handler = self
            .get(mark)
            .ok_or_else(|| AllocationError::UnknownSeatClass(mark.to_string()))?;

        tracing::debug!(
            mark,
            train_id = %request.segment.train_id,
            passengers = request.passenger_count(),
            "Dispatching seat selection"
        );
        handler.select_seats(provider, request)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("marks", &self.marks())
            .field("chain", &self.chain)
            .field("lock_prefix", &self.lock_prefix)
            .finish()
    }
}
