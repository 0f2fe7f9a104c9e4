//! Allocation metrics.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `seat_allocation_requests_total{class,outcome}` - Allocation calls by seat class and outcome
//! - `seat_allocation_degradations_total{tier}` - Fallbacks taken below the preferred strategy
//! - `seat_allocation_seats_assigned_total{class}` - Seats handed out
//!
//! ## Histograms
//! - `seat_allocation_party_size{class}` - Passengers per request

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use railseat_core::{AllocationError, AllocationResponse, SeatClass};
use thiserror::Error;

/// Metrics exporter errors
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build the Prometheus exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),

    /// Failed to install the global recorder
    #[error("Failed to install metrics recorder: {0}")]
    Install(String),
}

/// Fallback rung taken when the preferred strategy could not seat the party.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degradation {
    /// Whole party in one carriage, not side by side
    SameCarriage,
    /// Party spread over several carriages
    SplitCarriages,
    /// Preferred seats missed, whole party seated in a later carriage
    PreferredOverflow,
    /// Preferred seats missed, party spread over several carriages
    PreferredSplit,
}

impl Degradation {
    /// Label value used on `seat_allocation_degradations_total`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameCarriage => "same_carriage",
            Self::SplitCarriages => "split_carriages",
            Self::PreferredOverflow => "preferred_overflow",
            Self::PreferredSplit => "preferred_split",
        }
    }
}

/// Initialize and register all allocation metric descriptions.
///
/// Call once at startup, before any metrics are recorded.
pub fn register_allocation_metrics() {
    describe_counter!(
        "seat_allocation_requests_total",
        "Total allocation requests by seat class and outcome"
    );
    describe_counter!(
        "seat_allocation_degradations_total",
        "Total fallbacks taken below the preferred seating strategy, by tier"
    );
    describe_counter!(
        "seat_allocation_seats_assigned_total",
        "Total seats assigned by seat class"
    );
    describe_histogram!(
        "seat_allocation_party_size",
        "Number of passengers per allocation request"
    );

    tracing::info!("Allocation metrics registered");
}

/// Register descriptions and install a Prometheus recorder.
///
/// Render the exposition text with [`PrometheusHandle::render`].
///
/// # Errors
///
/// Returns [`MetricsError`] if the exporter cannot be built, or if another
/// recorder is already installed in this process.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, MetricsError> {
    register_allocation_metrics();

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("seat_allocation_party_size".to_string()),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))
}

/// Outcome label for a finished allocation.
#[must_use]
pub const fn outcome_label(result: &Result<AllocationResponse, AllocationError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(AllocationError::InvalidRequest(_)) => "invalid_request",
        Err(AllocationError::InsufficientInventory { .. }) => "insufficient_inventory",
        Err(AllocationError::Provider(_)) => "provider_error",
        Err(AllocationError::PartialAllocation { .. }) => "partial",
        Err(AllocationError::UnknownSeatClass(_)) => "unknown_class",
        Err(AllocationError::Lock(_)) => "lock_error",
    }
}

/// Record a finished allocation call.
pub fn record_allocation(
    seat_class: SeatClass,
    passengers: usize,
    result: &Result<AllocationResponse, AllocationError>,
) {
    let class = seat_class.to_string();
    let outcome = outcome_label(result);
    metrics::counter!(
        "seat_allocation_requests_total",
        "class" => class.clone(),
        "outcome" => outcome
    )
    .increment(1);
    #[allow(clippy::cast_precision_loss)]
    let party_size = passengers as f64;
    metrics::histogram!("seat_allocation_party_size", "class" => class.clone()).record(party_size);
    if let Ok(response) = result {
        let seats = u64::try_from(response.len()).unwrap_or(u64::MAX);
        metrics::counter!("seat_allocation_seats_assigned_total", "class" => class).increment(seats);
    }
}

/// Record one fallback step.
pub fn record_degradation(tier: Degradation) {
    metrics::counter!("seat_allocation_degradations_total", "tier" => tier.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(outcome_label(&Ok(AllocationResponse::default())), "success");
        assert_eq!(
            outcome_label(&Err(AllocationError::InsufficientInventory {
                requested: 3,
                available: 1,
            })),
            "insufficient_inventory"
        );
        assert_eq!(
            outcome_label(&Err(AllocationError::PartialAllocation {
                requested: 3,
                partial: Vec::new(),
            })),
            "partial"
        );
    }

    #[test]
    fn recording_without_a_recorder_is_a_no_op() {
        register_allocation_metrics();
        record_degradation(Degradation::SameCarriage);
        record_allocation(SeatClass::Business, 2, &Ok(AllocationResponse::default()));
        assert_eq!(Degradation::PreferredSplit.as_str(), "preferred_split");
    }
}
