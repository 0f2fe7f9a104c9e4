//! Lock-guarded allocation for callers.
//!
//! The engine itself never locks. Callers that want the inventory snapshot
//! to hold for the whole allocation wrap the call in the segment's named
//! lock, which is what [`allocate_locked`] does.

use crate::registry::HandlerRegistry;
use railseat_core::environment::{InventoryProvider, NamedLock};
use railseat_core::{AllocationError, AllocationRequest, AllocationResponse, Result};

/// Dispatch `request` while holding its segment lock.
///
/// The lock is released whether or not the allocation succeeds.
///
/// # Errors
///
/// Returns [`AllocationError::Lock`] if the lock cannot be taken or released,
/// otherwise whatever [`HandlerRegistry::dispatch`] returns.
pub async fn allocate_locked<L>(
    lock: &L,
    registry: &HandlerRegistry,
    provider: &dyn InventoryProvider,
    request: &AllocationRequest,
) -> Result<AllocationResponse>
where
    L: NamedLock + ?Sized,
{
    let name = request.lock_name_with_prefix(registry.lock_prefix());
    lock.lock(&name).await.map_err(AllocationError::Lock)?;
    tracing::trace!(lock = %name, "Segment lock acquired");

    let result = registry.dispatch(provider, request);

    match lock.unlock(&name).await {
        Ok(()) => {
            tracing::trace!(lock = %name, "Segment lock released");
            result
        }
        Err(error) => {
            tracing::warn!(lock = %name, %error, "Failed to release segment lock");
            result.and(Err(AllocationError::Lock(error)))
        }
    }
}
