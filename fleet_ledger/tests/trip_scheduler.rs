mod common;
use common::{add_driver, add_route, add_truck, count, date, fk_check_empty, setup_db};

use fleet_ledger::FleetError;
use fleet_ledger::models::TripFields;
use fleet_ledger::trips::{SqliteScheduler, TripScheduler};

struct Refs {
    driver: i32,
    truck: i32,
    route: i32,
}

fn refs(conn: &mut diesel::SqliteConnection) -> Refs {
    Refs {
        driver: add_driver(conn, "Ivan", "Horvat"),
        truck: add_truck(conn, "ZG-1"),
        route: add_route(conn, "Zagreb - Split"),
    }
}

fn fields(r: &Refs, y: i32, m: u32, d: u32) -> TripFields {
    TripFields {
        trip_date: date(y, m, d),
        driver_id: r.driver,
        truck_id: r.truck,
        route_id: r.route,
    }
}

#[test]
fn create_and_list_upcoming_with_display_fields() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    let s = SqliteScheduler::new();

    let trip = s.create_trip(&mut conn, fields(&r, 2025, 1, 10)).unwrap();
    assert!(trip.id > 0);
    assert_eq!(trip.trip_date, date(2025, 1, 10));

    let upcoming = s.list_upcoming_trips(&mut conn, r.driver, date(2025, 1, 10)).unwrap();
    assert_eq!(upcoming.len(), 1);
    let v = &upcoming[0];
    assert_eq!(v.id, trip.id);
    assert_eq!(v.driver_first_name, "Ivan");
    assert_eq!(v.driver_last_name, "Horvat");
    assert_eq!(v.registration, "ZG-1");
    assert_eq!(v.route, "Zagreb - Split");
    fk_check_empty(&mut conn);
}

#[test]
fn upcoming_excludes_past_and_orders_by_date_then_id() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    let other_driver = add_driver(&mut conn, "Ana", "Kovač");
    let s = SqliteScheduler;

    s.create_trip(&mut conn, fields(&r, 2025, 1, 5)).unwrap();
    s.create_trip(&mut conn, fields(&r, 2025, 1, 9)).unwrap();
    let on_today = s.create_trip(&mut conn, fields(&r, 2025, 1, 10)).unwrap();
    let late = s.create_trip(&mut conn, fields(&r, 2025, 2, 1)).unwrap();
    let first = s.create_trip(&mut conn, fields(&r, 2025, 1, 12)).unwrap();
    let second = s.create_trip(&mut conn, fields(&r, 2025, 1, 12)).unwrap();
    s.create_trip(
        &mut conn,
        TripFields {
            driver_id: other_driver,
            ..fields(&r, 2025, 1, 20)
        },
    )
    .unwrap();

    let upcoming = s.list_upcoming_trips(&mut conn, r.driver, date(2025, 1, 10)).unwrap();
    let ids: Vec<i32> = upcoming.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![on_today.id, first.id, second.id, late.id]);
}

#[test]
fn trip_dated_today_is_upcoming_and_yesterday_is_not() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    let s = SqliteScheduler;

    let yesterday = s.create_trip(&mut conn, fields(&r, 2025, 1, 9)).unwrap();
    let today = s.create_trip(&mut conn, fields(&r, 2025, 1, 10)).unwrap();

    let upcoming = s.list_upcoming_trips(&mut conn, r.driver, date(2025, 1, 10)).unwrap();
    let ids: Vec<i32> = upcoming.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![today.id]);
    assert_eq!(upcoming[0].date, date(2025, 1, 10));

    // The day before, both are still ahead.
    let upcoming = s.list_upcoming_trips(&mut conn, r.driver, date(2025, 1, 9)).unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].id, yesterday.id);
}

#[test]
fn unknown_references_are_not_found() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);

    let err = SqliteScheduler
        .create_trip(
            &mut conn,
            TripFields {
                route_id: 9999,
                ..fields(&r, 2025, 1, 10)
            },
        )
        .unwrap_err();
    assert!(matches!(err, FleetError::NotFound(_)));
    assert_eq!(count(&mut conn, "trips"), 0);
}

#[test]
fn missing_references_are_invalid() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);

    let err = SqliteScheduler
        .create_trip(
            &mut conn,
            TripFields {
                driver_id: 0,
                ..fields(&r, 2025, 1, 10)
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "driverId is required");

    let err = SqliteScheduler
        .list_upcoming_trips(&mut conn, 0, date(2025, 1, 1))
        .unwrap_err();
    assert!(matches!(err, FleetError::InvalidArgument(_)));
}

#[test]
fn update_replaces_fields_and_checks_existence() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    let other_route = add_route(&mut conn, "Rijeka - Osijek");
    let s = SqliteScheduler;

    let trip = s.create_trip(&mut conn, fields(&r, 2025, 1, 10)).unwrap();
    let updated = s
        .update_trip(
            &mut conn,
            trip.id,
            TripFields {
                route_id: other_route,
                ..fields(&r, 2025, 3, 3)
            },
        )
        .unwrap();
    assert_eq!(updated.id, trip.id);
    assert_eq!(updated.route_id, other_route);
    assert_eq!(s.get_trip(&mut conn, trip.id).unwrap(), updated);

    let err = s
        .update_trip(&mut conn, 9999, fields(&r, 2025, 3, 3))
        .unwrap_err();
    assert_eq!(err.to_string(), "trip 9999 not found");
}

#[test]
fn delete_removes_and_second_delete_is_not_found() {
    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    let s = SqliteScheduler;

    let trip = s.create_trip(&mut conn, fields(&r, 2025, 1, 10)).unwrap();
    s.delete_trip(&mut conn, trip.id).unwrap();
    assert_eq!(count(&mut conn, "trips"), 0);

    let err = s.delete_trip(&mut conn, trip.id).unwrap_err();
    assert!(matches!(err, FleetError::NotFound(_)));
}

#[test]
fn trips_do_not_check_truck_state() {
    use fleet_ledger::registry::{SqliteRegistry, TruckRegistry};
    use fleet_ledger::status::TruckStatus;

    let (_db, mut conn) = setup_db();
    let r = refs(&mut conn);
    SqliteRegistry
        .update_status(&mut conn, r.truck, TruckStatus::InService)
        .unwrap();

    assert!(SqliteScheduler.create_trip(&mut conn, fields(&r, 2025, 1, 10)).is_ok());
}
