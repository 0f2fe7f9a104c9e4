//! End-to-end allocation scenarios on business-class carriages
//!
//! Business class is a 2 × 3 grid with columns `A C F`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use railseat_core::{AllocationError, ProviderError, SeatClass};
use railseat_engine::Allocator;
use railseat_testing::{InMemoryInventory, helpers};

// ============================================================================
// Test Fixtures
// ============================================================================

fn business() -> Allocator {
    Allocator::for_class(SeatClass::Business)
}

fn seats(response: &railseat_core::AllocationResponse) -> Vec<(&str, &str)> {
    response.seats()
}

// ============================================================================
// Adjacency
// ============================================================================

#[test]
fn couple_sits_side_by_side_in_the_first_row() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request = helpers::request(SeatClass::Business, 2);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("01", "01A"), ("01", "01C")]);
    let ids: Vec<_> = response.iter().map(|a| a.passenger_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn couple_moves_to_the_next_carriage_when_the_first_has_no_pair() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A"])
        .full_carriage("02")
        .build();
    let request = helpers::request(SeatClass::Business, 2);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("02", "01A"), ("02", "01C")]);
}

#[test]
fn party_of_four_is_seated_as_two_pairs() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request = helpers::request(SeatClass::Business, 4);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("01", "01A"), ("01", "01C"), ("01", "02A"), ("01", "02C")]
    );
}

#[test]
fn party_of_four_moves_on_when_a_pair_does_not_fit() {
    // Carriage 01 seats the first pair but has no second pair.
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01C", "02A", "02F"])
        .full_carriage("02")
        .build();
    let request = helpers::request(SeatClass::Business, 4);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("02", "01A"), ("02", "01C"), ("02", "02A"), ("02", "02C")]
    );
}

#[test]
fn party_of_three_takes_a_whole_row() {
    let inventory = InMemoryInventory::builder()
        .carriage_with_taken("01", ["01C"])
        .build();
    let request = helpers::request(SeatClass::Business, 3);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("01", "02A"), ("01", "02C"), ("01", "02F")]
    );
}

// ============================================================================
// Chosen seats
// ============================================================================

#[test]
fn free_chosen_seat_is_honored() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request = helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("01", "02F")]);
}

#[test]
fn taken_chosen_seat_falls_back_to_the_front_row() {
    let inventory = InMemoryInventory::builder()
        .carriage_with_taken("01", ["02F"])
        .build();
    let request = helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("01", "01F")]);
}

#[test]
fn chosen_seat_is_searched_in_later_carriages() {
    let inventory = InMemoryInventory::builder()
        .carriage_with_taken("01", ["02F", "01F"])
        .full_carriage("02")
        .build();
    let request = helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("02", "02F")]);
}

#[test]
fn missed_chosen_seat_still_seats_the_passenger() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "02C"])
        .build();
    let request = helpers::request(SeatClass::Business, 1).with_chosen_seats(["02F"]);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("01", "01A")]);
}

#[test]
fn several_chosen_seats_are_honored_before_filling() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request =
        helpers::request(SeatClass::Business, 3).with_chosen_seats(["02F", "01A"]);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("01", "02F"), ("01", "01A"), ("01", "01C")]
    );
}

// ============================================================================
// Degradation
// ============================================================================

#[test]
fn party_of_five_is_split_across_carriages() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01C", "01F"])
        .carriage("02", ["01A", "01C", "01F"])
        .build();
    let request = helpers::request(SeatClass::Business, 5);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![
            ("01", "01A"),
            ("01", "01C"),
            ("01", "01F"),
            ("02", "01A"),
            ("02", "01C"),
        ]
    );
    assert_eq!(response.carriages(), vec!["01", "02"]);
}

#[test]
fn couple_without_a_pair_anywhere_stays_in_one_carriage() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01F"])
        .carriage("02", ["01A", "01F", "02C"])
        .build();
    let request = helpers::request(SeatClass::Business, 2);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("02", "01A"), ("02", "01F")]);
}

#[test]
fn party_of_three_without_pairs_stays_in_one_carriage() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01F", "02A", "02F"])
        .build();
    let request = helpers::request(SeatClass::Business, 3);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("01", "01A"), ("01", "01F"), ("01", "02A")]
    );
}

#[test]
fn split_fallback_drains_carriages_in_order() {
    // Neither carriage has a spare seat beyond the party, so the split tier runs.
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01F"])
        .carriage("02", ["02C"])
        .build();
    let request = helpers::request(SeatClass::Business, 2);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(seats(&response), vec![("01", "01A"), ("01", "01F")]);
}

#[test]
fn whole_inventory_can_be_sold() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "02F"])
        .carriage("02", ["01C"])
        .build();
    let request = helpers::request(SeatClass::Business, 3);

    let response = business().allocate(&inventory, &request).unwrap();

    assert_eq!(
        seats(&response),
        vec![("01", "01A"), ("01", "02F"), ("02", "01C")]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn empty_party_is_rejected() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request = helpers::request(SeatClass::Business, 0);

    let error = business().allocate(&inventory, &request).unwrap_err();

    assert!(matches!(error, AllocationError::InvalidRequest(_)));
}

#[test]
fn oversized_party_is_rejected_before_any_seat_query() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A", "01C"])
        .build();
    let request = helpers::request(SeatClass::Business, 3);

    let error = business().allocate(&inventory, &request).unwrap_err();

    assert_eq!(
        error,
        AllocationError::InsufficientInventory {
            requested: 3,
            available: 2
        }
    );
    assert!(!error.is_retryable());
    assert_eq!(inventory.seat_queries(), 0);
}

#[test]
fn stale_remaining_counts_yield_a_partial_allocation() {
    let inventory = InMemoryInventory::builder()
        .carriage("01", ["01A"])
        .remaining_counts(vec![4])
        .build();
    let request = helpers::request(SeatClass::Business, 2);

    let error = business().allocate(&inventory, &request).unwrap_err();

    match error {
        AllocationError::PartialAllocation { requested, partial } => {
            assert_eq!(requested, 2);
            assert_eq!(partial.len(), 1);
            assert_eq!(partial[0].passenger_id, "p1");
            assert_eq!(partial[0].seat_number, "01A");
        }
        other => panic!("expected a partial allocation, got {other:?}"),
    }
}

#[test]
fn misaligned_remaining_counts_are_a_backend_error() {
    let inventory = InMemoryInventory::builder()
        .full_carriage("01")
        .full_carriage("02")
        .remaining_counts(vec![6])
        .build();
    let request = helpers::request(SeatClass::Business, 1);

    let error = business().allocate(&inventory, &request).unwrap_err();

    assert!(matches!(
        error,
        AllocationError::Provider(ProviderError::Backend(_))
    ));
}

#[test]
fn provider_errors_propagate_unchanged() {
    let inventory = InMemoryInventory::builder()
        .full_carriage("01")
        .failing_with(ProviderError::Unavailable("seat table offline".into()))
        .build();
    let request = helpers::request(SeatClass::Business, 1);

    let error = business().allocate(&inventory, &request).unwrap_err();

    assert_eq!(
        error,
        AllocationError::Provider(ProviderError::Unavailable("seat table offline".into()))
    );
}

#[test]
fn chosen_seat_outside_the_class_grid_is_invalid() {
    let inventory = InMemoryInventory::builder().full_carriage("01").build();
    let request = helpers::request(SeatClass::Business, 1).with_chosen_seats(["03A"]);

    let error = business().allocate(&inventory, &request).unwrap_err();

    assert!(matches!(error, AllocationError::InvalidRequest(_)));
}

// ============================================================================
// Other classes
// ============================================================================

#[test]
fn first_class_party_of_four_fills_one_row() {
    let inventory = InMemoryInventory::builder()
        .seat_class(SeatClass::FirstClass)
        .carriage_with_taken("03", ["01D"])
        .build();
    let request = helpers::request(SeatClass::FirstClass, 4);

    let response = Allocator::for_class(SeatClass::FirstClass)
        .allocate(&inventory, &request)
        .unwrap();

    assert_eq!(
        seats(&response),
        vec![("03", "02A"), ("03", "02C"), ("03", "02D"), ("03", "02F")]
    );
}

#[test]
fn second_class_ignores_business_carriages() {
    let inventory = InMemoryInventory::builder()
        .full_carriage("01")
        .seat_class(SeatClass::SecondClass)
        .full_carriage("05")
        .build();
    let request = helpers::request(SeatClass::SecondClass, 2);

    let response = Allocator::for_class(SeatClass::SecondClass)
        .allocate(&inventory, &request)
        .unwrap();

    assert_eq!(seats(&response), vec![("05", "01A"), ("05", "01B")]);
    assert_eq!(response.assignments()[0].seat_type, SeatClass::SecondClass);
}
