//! Seat Allocation Demo
//!
//! Runs a handful of purchases against an in-memory business-class train and
//! prints each allocation as JSON, followed by the Prometheus metrics they
//! produced:
//! - A couple seated side by side
//! - A chosen seat honored, then moved to the front row once taken
//! - A party of four seated as two pairs
//! - A party of five split across carriages
//! - A party too large for the train
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=railseat_engine=debug cargo run -p seat-demo
//! ```

use railseat_core::{AllocationRequest, SeatClass};
use railseat_engine::metrics::install_prometheus_recorder;
use railseat_engine::{EngineConfig, HandlerRegistry, allocate_locked};
use railseat_testing::{InMemoryInventory, InMemoryLock, helpers};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,railseat_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let prometheus = install_prometheus_recorder()?;
    let config = EngineConfig::from_env();
    let registry = HandlerRegistry::with_defaults(&config);
    let lock = InMemoryLock::new();

    println!("\n🚄 ============================================");
    println!("   Railseat - Seat Allocation Demo");
    println!("============================================\n");
    println!("Handlers: {:?}\n", registry.marks());

    let fresh = InMemoryInventory::builder().full_carriage("01").build();
    let front_row = InMemoryInventory::builder()
        .carriage_with_taken("01", ["02F"])
        .build();
    let crowded = InMemoryInventory::builder()
        .carriage("01", ["01A"])
        .full_carriage("02")
        .build();
    let thin = InMemoryInventory::builder()
        .carriage("01", ["01A", "01C", "01F"])
        .carriage("02", ["01A", "01C", "01F"])
        .build();
    let single_seat = InMemoryInventory::builder().carriage("01", ["01A"]).build();

    let scenarios: Vec<(&str, &InMemoryInventory, AllocationRequest)> = vec![
        (
            "Couple, adjacent seats",
            &fresh,
            helpers::request(SeatClass::Business, 2),
        ),
        (
            "Single passenger choosing 02F",
            &fresh,
            helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]),
        ),
        (
            "Single passenger choosing 02F, already taken",
            &front_row,
            helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]),
        ),
        (
            "Couple, first carriage nearly full",
            &crowded,
            helpers::request(SeatClass::Business, 2),
        ),
        (
            "Party of four, seated in pairs",
            &fresh,
            helpers::request(SeatClass::Business, 4),
        ),
        (
            "Party of five, split across carriages",
            &thin,
            helpers::request(SeatClass::Business, 5),
        ),
        (
            "Party of five on a one-seat train",
            &single_seat,
            helpers::request(SeatClass::Business, 5),
        ),
    ];

    for (step, (title, inventory, request)) in scenarios.into_iter().enumerate() {
        println!("{}. {title}", step + 1);
        match allocate_locked(&lock, &registry, inventory, &request).await {
            Ok(response) => println!("{}\n", serde_json::to_string_pretty(&response)?),
            Err(error) => println!("   ✗ {error}\n"),
        }
    }

    println!("📊 Metrics\n");
    println!("{}", prometheus.render());

    Ok(())
}
