//! Engine configuration.
//!
//! Every value has a default and can be overridden from the environment.
//! Unset or unparsable variables fall back to the default.

use railseat_core::request::DEFAULT_LOCK_PREFIX;
use railseat_core::{SeatClass, SeatLayout};
use serde::{Deserialize, Serialize};
use std::env;

/// Largest party accepted when `SEAT_ALLOCATION_MAX_PASSENGERS` is unset.
pub const DEFAULT_MAX_PASSENGERS: usize = 5;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest party a single request may carry
    pub max_passengers: usize,
    /// Business-class parties up to this size are seated as one group
    pub business_small_party: usize,
    /// First-class parties up to this size are seated as one group
    pub first_small_party: usize,
    /// Second-class parties up to this size are seated as one group
    pub second_small_party: usize,
    /// Prefix of the distributed-lock name guarding a segment
    pub lock_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passengers: DEFAULT_MAX_PASSENGERS,
            business_small_party: SeatLayout::BUSINESS.small_party_max(),
            first_small_party: SeatLayout::FIRST_CLASS.small_party_max(),
            second_small_party: SeatLayout::SECOND_CLASS.small_party_max(),
            lock_prefix: DEFAULT_LOCK_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_passengers: env::var("SEAT_ALLOCATION_MAX_PASSENGERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_passengers),
            business_small_party: env::var("SEAT_ALLOCATION_BUSINESS_SMALL_PARTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.business_small_party),
            first_small_party: env::var("SEAT_ALLOCATION_FIRST_SMALL_PARTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.first_small_party),
            second_small_party: env::var("SEAT_ALLOCATION_SECOND_SMALL_PARTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.second_small_party),
            lock_prefix: env::var("SEAT_ALLOCATION_LOCK_PREFIX")
                .unwrap_or(defaults.lock_prefix),
        }
    }

    /// Layout of `seat_class` with the configured small-party threshold.
    ///
    /// The threshold is clamped to the row width, since a single group
    /// has to fit in one row.
    #[must_use]
    pub fn layout(&self, seat_class: SeatClass) -> SeatLayout {
        let small_party = match seat_class {
            SeatClass::Business => self.business_small_party,
            SeatClass::FirstClass => self.first_small_party,
            SeatClass::SecondClass => self.second_small_party,
        };
        seat_class.layout().with_small_party_max(small_party)
    }
}
