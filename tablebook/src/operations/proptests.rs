//! Property-based tests for the booking and cancellation plans.
//!
//! Random request sequences are driven through plan and execute against a
//! real database; afterwards the ledger must still hold at most one
//! confirmed reservation per table, day and slot.

use std::collections::HashSet;

use proptest::prelude::*;

use super::{BookOptions, BookPlan, CancelOptions, CancelPlan, PlanExecutor};
use crate::availability::{find_available, AvailabilityQuery};
use crate::clock::FixedClock;
use crate::database::test_util::{add_table, add_user, create_test_database, day};
use crate::database::Database;
use crate::error::Error;
use crate::{Actor, ReservationStatus, Role, TimeSlot};

#[derive(Debug, Clone)]
enum Request {
    Book {
        table: usize,
        day_offset: u32,
        slot: usize,
        guests: u32,
    },
    CancelNth(usize),
}

fn request_strategy() -> impl Strategy<Value = Request> {
    prop_oneof![
        3 => (0usize..3, 0u32..3, 0usize..TimeSlot::ALL.len(), 1u32..=6).prop_map(
            |(table, day_offset, slot, guests)| Request::Book {
                table,
                day_offset,
                slot,
                guests,
            }
        ),
        1 => (0usize..8).prop_map(Request::CancelNth),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn confirmed_reservations_never_share_a_slot(
        requests in prop::collection::vec(request_strategy(), 1..25)
    ) {
        let db = create_test_database();
        let conn = db.connection();
        let clock = FixedClock::new(day(2025, 1, 15));
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let actor = Actor::new(user.id, Role::Customer);
        let tables = [add_table(conn, 1, 2), add_table(conn, 2, 4), add_table(conn, 3, 6)];
        let mut booked = Vec::new();

        for request in requests {
            match request {
                Request::Book { table, day_offset, slot, guests } => {
                    let table = &tables[table];
                    let options = BookOptions::new(
                        actor,
                        table.id,
                        day(2025, 1, 20 + day_offset),
                        TimeSlot::ALL[slot],
                        guests,
                    );
                    match BookPlan::new(options, &clock).build_plan(conn) {
                        Ok(plan) => {
                            prop_assert!(guests <= table.capacity);
                            let result = PlanExecutor::new(conn).execute(&plan).unwrap();
                            booked.extend(result.reservation_id);
                        }
                        Err(Error::CapacityExceeded { .. }) => {
                            prop_assert!(guests > table.capacity);
                        }
                        Err(Error::Conflict { .. }) => {}
                        Err(other) => prop_assert!(false, "unexpected error: {}", other),
                    }
                }
                Request::CancelNth(n) => {
                    if let Some(&id) = booked.get(n) {
                        let outcome = CancelPlan::new(CancelOptions::new(actor, id))
                            .build_plan(conn)
                            .and_then(|plan| PlanExecutor::new(conn).execute(&plan));
                        prop_assert!(
                            matches!(outcome, Ok(_) | Err(Error::AlreadyCancelled { .. })),
                            "cancel failed: {:?}",
                            outcome.err()
                        );
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for details in Database::list_all_reservations(conn).unwrap() {
            let r = details.reservation;
            if r.status == ReservationStatus::Confirmed {
                prop_assert!(seen.insert((r.table_id, r.date, r.time_slot)));

                let query = AvailabilityQuery::new(r.date, r.time_slot, 1);
                let free = find_available(conn, &query).unwrap();
                prop_assert!(free.iter().all(|t| t.id != r.table_id));
            }
        }
    }
}
