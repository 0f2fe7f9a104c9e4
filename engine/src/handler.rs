//! Per-class purchase handlers.

use crate::config::EngineConfig;
use crate::orchestrator::Allocator;
use railseat_core::environment::InventoryProvider;
use railseat_core::{AllocationError, AllocationRequest, AllocationResponse, Result, SeatClass};

/// Seat selection for one seat class, looked up by its mark.
pub trait PurchaseHandler: Send + Sync {
    /// Class key this handler is registered under.
    fn mark(&self) -> &'static str;

    /// Seat class served.
    fn seat_class(&self) -> SeatClass;

    /// Pick seats for every passenger of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the party cannot be seated.
    fn select_seats(
        &self,
        provider: &dyn InventoryProvider,
        request: &AllocationRequest,
    ) -> Result<AllocationResponse>;
}

/// Handler backed by an [`Allocator`] for one class.
#[derive(Clone, Copy, Debug)]
pub struct ClassHandler {
    allocator: Allocator,
}

impl ClassHandler {
    /// Handler for `seat_class` with its standard layout.
    #[must_use]
    pub const fn new(seat_class: SeatClass) -> Self {
        Self {
            allocator: Allocator::for_class(seat_class),
        }
    }

    /// Handler for `seat_class` with the configured party thresholds.
    #[must_use]
    pub fn from_config(seat_class: SeatClass, config: &EngineConfig) -> Self {
        Self {
            allocator: Allocator::new(seat_class, config.layout(seat_class)),
        }
    }

    /// Allocator behind this handler.
    #[must_use]
    pub const fn allocator(&self) -> &Allocator {
        &self.allocator
    }
}

impl PurchaseHandler for ClassHandler {
    fn mark(&self) -> &'static str {
        self.allocator.seat_class().mark()
    }

    fn seat_class(&self) -> SeatClass {
        self.allocator.seat_class()
    }

    fn select_seats(
        &self,
        provider: &dyn InventoryProvider,
        request: &AllocationRequest,
    ) -> Result<AllocationResponse> {
        if request.seat_class != self.seat_class() {
            return Err(AllocationError::InvalidRequest(format!(
                "{} request sent to the {} handler",
                request.seat_class,
                self.seat_class()
            )));
        }
        self.allocator.allocate(provider, request)
    }
}
