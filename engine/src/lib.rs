//! # Railseat Engine
//!
//! Seat allocation for train-ticket purchases.
//!
//! Given a train segment, a seat class, a party of passengers and optionally
//! the seats they picked, the engine assigns every passenger a
//! `(carriage, seat)` drawn from the free inventory. It keeps parties
//! together when it can and degrades step by step when it cannot.
//!
//! ## Modules
//!
//! - [`grid`]: occupancy matrix of one carriage
//! - [`solver`]: adjacent and non-adjacent seat pickers
//! - [`matcher`]: honoring user-chosen seats
//! - [`orchestrator`]: the per-class allocation algorithm and its fallbacks
//! - [`handler`] / [`registry`]: per-class handlers looked up by class key
//! - [`chain`] / [`filters`]: request validation
//! - [`guard`]: running an allocation under the segment's named lock
//! - [`config`] / [`metrics`]: ambient configuration and telemetry
//!
//! ## Example
//!
//! ```ignore
//! use railseat_engine::{EngineConfig, HandlerRegistry};
//!
//! let registry = HandlerRegistry::with_defaults(&EngineConfig::from_env());
//! let response = registry.dispatch(&inventory, &request)?;
//! for assignment in &response {
//!     println!("{}: {}/{}", assignment.passenger_id, assignment.carriage_number, assignment.seat_number);
//! }
//! ```

pub mod chain;
pub mod config;
pub mod filters;
pub mod grid;
pub mod guard;
pub mod handler;
pub mod matcher;
pub mod metrics;
pub mod orchestrator;
pub mod registry;
pub mod solver;

// Re-export commonly used types
pub use chain::{ChainContext, ChainHandler};
pub use config::EngineConfig;
pub use grid::{CarriageGrid, SeatClaim, SeatGrid};
pub use guard::allocate_locked;
pub use handler::{ClassHandler, PurchaseHandler};
pub use matcher::{PreferredSeatMatcher, chosen_seats_available};
pub use orchestrator::Allocator;
pub use registry::HandlerRegistry;
