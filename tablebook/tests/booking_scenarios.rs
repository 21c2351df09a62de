//! End-to-end booking scenarios through `ReservationService`.
//!
//! "Today" is pinned to 2025-01-15 with a `FixedClock`.

mod common;

use common::{add_actor, add_table, create_test_database, day};
use tablebook::availability::AvailabilityQuery;
use tablebook::operations::{
    BookOptions, CancelOptions, CreateTableOptions, EditReservationOptions, UpdateTableOptions,
};
use tablebook::service::ReservationService;
use tablebook::{
    Error, FixedClock, NewTable, ReservationStatus, ReservationUpdate, Role, TableUpdate,
    TimeSlot,
};

fn clock() -> FixedClock {
    FixedClock::new(day(2025, 1, 15))
}

#[test]
fn test_book_conflict_cancel_cycle() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 4);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);
    let date = day(2025, 1, 20);
    let query = AvailabilityQuery::new(date, TimeSlot::SevenPm, 2);

    let booked = service
        .book(BookOptions::new(guest, table.id, date, TimeSlot::SevenPm, 4))
        .unwrap()
        .record
        .unwrap();
    assert_eq!(booked.reservation.status, ReservationStatus::Confirmed);
    assert_eq!(booked.table.capacity, 4);

    let err = service
        .book(BookOptions::new(guest, table.id, date, TimeSlot::SevenPm, 4))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
    assert!(service.find_available(&query).unwrap().is_empty());

    let cancelled = service
        .cancel(CancelOptions::new(guest, booked.reservation.id))
        .unwrap()
        .record
        .unwrap();
    assert_eq!(cancelled.reservation.status, ReservationStatus::Cancelled);

    let free = service.find_available(&query).unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, table.id);

    let err = service
        .cancel(CancelOptions::new(guest, booked.reservation.id))
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyCancelled { .. }));
}

#[test]
fn test_capacity_message_names_real_capacity() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 2, 2);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    let err = service
        .book(BookOptions::new(guest, table.id, day(2025, 1, 20), TimeSlot::SixPm, 3))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CapacityExceeded {
            capacity: 2,
            requested: 3,
            ..
        }
    ));
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_past_day_rejected_today_accepted() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 4);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    let err = service
        .book(BookOptions::new(guest, table.id, day(2025, 1, 14), TimeSlot::OnePm, 2))
        .unwrap_err();
    assert!(matches!(err, Error::PastDate { .. }));

    service
        .book(BookOptions::new(guest, table.id, day(2025, 1, 15), TimeSlot::OnePm, 2))
        .unwrap();
}

#[test]
fn test_inactive_table_hidden_and_unbookable() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 4);
    add_table(&db, 2, 4);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    service
        .update_table(UpdateTableOptions {
            actor: admin,
            table_id: table.id,
            update: TableUpdate::default().with_active(false),
        })
        .unwrap();

    let query = AvailabilityQuery::new(day(2025, 1, 20), TimeSlot::TwelvePm, 1);
    let numbers: Vec<u32> = service
        .find_available(&query)
        .unwrap()
        .iter()
        .map(|t| t.table_number)
        .collect();
    assert_eq!(numbers, vec![2]);

    let err = service
        .book(BookOptions::new(guest, table.id, day(2025, 1, 20), TimeSlot::TwelvePm, 2))
        .unwrap_err();
    assert!(matches!(err, Error::TableInactive { table_number: 1 }));

    assert_eq!(service.list_tables(&admin, true).unwrap().len(), 1);
    assert_eq!(service.list_tables(&admin, false).unwrap().len(), 2);
}

#[test]
fn test_non_owner_cancel_forbidden_admin_allowed() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 4);
    let owner = add_actor(&db, "ada@example.com", Role::Customer);
    let other = add_actor(&db, "bob@example.com", Role::Customer);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    let id = service
        .book(BookOptions::new(owner, table.id, day(2025, 2, 1), TimeSlot::TenPm, 2))
        .unwrap()
        .record
        .unwrap()
        .reservation
        .id;

    let err = service.cancel(CancelOptions::new(other, id)).unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    service.cancel(CancelOptions::new(admin, id)).unwrap();
}

#[test]
fn test_admin_edit_skips_capacity_but_not_slot_uniqueness() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 2);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);
    let date = day(2025, 1, 20);

    let first = service
        .book(BookOptions::new(guest, table.id, date, TimeSlot::SixPm, 2))
        .unwrap()
        .record
        .unwrap()
        .reservation
        .id;
    service
        .book(BookOptions::new(guest, table.id, date, TimeSlot::SevenPm, 2))
        .unwrap();

    let outcome = service
        .edit_reservation(
            EditReservationOptions::new(admin, first).with_update(ReservationUpdate {
                number_of_guests: Some(5),
                ..ReservationUpdate::default()
            }),
        )
        .unwrap();
    assert_eq!(outcome.record.unwrap().reservation.number_of_guests, 5);
    assert_eq!(outcome.execution.warnings.len(), 1);

    let err = service
        .edit_reservation(
            EditReservationOptions::new(admin, first).with_update(ReservationUpdate {
                time_slot: Some(TimeSlot::SevenPm),
                ..ReservationUpdate::default()
            }),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}

#[test]
fn test_cancelled_reservation_stays_cancelled() {
    let (_dir, mut db) = create_test_database();
    let table = add_table(&db, 1, 4);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);
    let date = day(2025, 1, 20);

    let id = service
        .book(BookOptions::new(guest, table.id, date, TimeSlot::SixPm, 2))
        .unwrap()
        .record
        .unwrap()
        .reservation
        .id;
    service.cancel(CancelOptions::new(guest, id)).unwrap();

    let err = service
        .edit_reservation(
            EditReservationOptions::new(admin, id).with_update(ReservationUpdate {
                date: Some(day(2025, 2, 1)),
                status: Some(ReservationStatus::Confirmed),
                ..ReservationUpdate::default()
            }),
        )
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyCancelled { .. }));

    let stored = service.get_reservation(&admin, id).unwrap().reservation;
    assert_eq!(stored.status, ReservationStatus::Cancelled);
    assert_eq!(stored.date, date);
}

#[test]
fn test_listing_orders() {
    let (_dir, mut db) = create_test_database();
    let one = add_table(&db, 1, 4);
    let two = add_table(&db, 2, 4);
    let guest = add_actor(&db, "ada@example.com", Role::Customer);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    let date = day(2025, 1, 20);
    for (table, slot) in [
        (two.id, TimeSlot::EightPm),
        (one.id, TimeSlot::EightPm),
        (two.id, TimeSlot::ElevenAm),
    ] {
        service
            .book(BookOptions::new(guest, table, date, slot, 2))
            .unwrap();
    }
    service
        .book(BookOptions::new(guest, one.id, day(2025, 1, 21), TimeSlot::OnePm, 2))
        .unwrap();

    let by_day: Vec<(TimeSlot, u32)> = service
        .reservations_for_date(&admin, date)
        .unwrap()
        .iter()
        .map(|d| (d.reservation.time_slot, d.table.table_number))
        .collect();
    assert_eq!(
        by_day,
        vec![
            (TimeSlot::ElevenAm, 2),
            (TimeSlot::EightPm, 1),
            (TimeSlot::EightPm, 2),
        ]
    );

    let mine = service.my_reservations(&guest).unwrap();
    assert_eq!(mine.len(), 4);
    assert_eq!(mine[0].reservation.date, day(2025, 1, 21));
    assert!(mine.iter().all(|d| d.user.is_none()));

    let all = service.all_reservations(&admin).unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|d| d.user.is_some()));
}

#[test]
fn test_duplicate_table_number() {
    let (_dir, mut db) = create_test_database();
    add_table(&db, 1, 4);
    let admin = add_actor(&db, "root@example.com", Role::Admin);
    let clock = clock();
    let mut service = ReservationService::new(&mut db, &clock);

    let err = service
        .create_table(CreateTableOptions {
            actor: admin,
            table: NewTable::new(1, 6).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTable { table_number: 1 }));
    assert_eq!(err.status().code(), 409);
}
