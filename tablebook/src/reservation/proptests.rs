//! Property-based tests for reservation types.

use super::{NewReservation, ReservationId, ReservationStatus, ReservationUpdate};
use crate::date::CalendarDay;
use crate::slot::TimeSlot;
use crate::table::TableId;
use crate::user::UserId;
use proptest::prelude::*;

fn day_strategy() -> impl Strategy<Value = CalendarDay> {
    (2020i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| CalendarDay::from_ymd(y, m, d).unwrap())
}

fn slot_strategy() -> impl Strategy<Value = TimeSlot> {
    prop::sample::select(TimeSlot::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Any positive party size builds; zero never does.
    #[test]
    fn guests_must_be_positive(guests in 0u32..100, day in day_strategy(), slot in slot_strategy()) {
        let result = NewReservation::builder(UserId::new(1), TableId::new(1), day, slot)
            .number_of_guests(guests)
            .build();
        prop_assert_eq!(result.is_ok(), guests > 0);
    }

    // Display and FromStr agree for ids.
    #[test]
    fn reservation_id_display_parse(id in 1i64..i64::MAX) {
        let parsed: ReservationId = ReservationId::new(id).to_string().parse().unwrap();
        prop_assert_eq!(parsed.value(), id);
    }

    // Day keys sort the same way the days do.
    #[test]
    fn day_key_order_matches_day_order(a in day_strategy(), b in day_strategy()) {
        prop_assert_eq!(a.cmp(&b), a.key().cmp(&b.key()));
    }

    // Applying an update twice is the same as applying it once.
    #[test]
    fn update_apply_is_idempotent(
        day in prop::option::of(day_strategy()),
        slot in prop::option::of(slot_strategy()),
        guests in prop::option::of(1u32..20),
        cancel in any::<bool>(),
    ) {
        let now = chrono::Utc::now();
        let original = super::Reservation {
            id: ReservationId::new(1),
            user_id: UserId::new(1),
            table_id: TableId::new(1),
            date: CalendarDay::from_ymd(2025, 1, 20).unwrap(),
            time_slot: TimeSlot::SevenPm,
            number_of_guests: 2,
            status: ReservationStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };
        let update = ReservationUpdate {
            date: day,
            time_slot: slot,
            number_of_guests: guests,
            status: cancel.then_some(ReservationStatus::Cancelled),
        };
        let once = update.apply(&original);
        let twice = update.apply(&once);
        prop_assert_eq!(once, twice);
    }
}
