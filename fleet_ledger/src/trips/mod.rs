//! Trip Scheduler: dated trips binding a driver, a truck, and a route.
//!
//! Trips only reference their participants by id. Foreign keys guarantee the
//! ids exist; nothing checks whether the truck is available or assigned on
//! the trip date.

pub mod repo;

pub use repo::SqliteScheduler;

use chrono::NaiveDate;
use diesel::SqliteConnection;

use crate::error::FleetResult;
use crate::models::{Trip, TripFields, TripView};

/// Portable surface, SQLite implementation lives in `repo.rs`.
pub trait TripScheduler {
    /// Trips for `driver_id` dated on or after `today`, ordered by date then id.
    fn list_upcoming_trips(
        &self,
        conn: &mut SqliteConnection,
        driver_id: i32,
        today: NaiveDate,
    ) -> FleetResult<Vec<TripView>>;

    /// A single trip, or `NotFound`.
    fn get_trip(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<Trip>;

    /// Insert a trip; unknown driver/truck/route ids are `NotFound`.
    fn create_trip(&self, conn: &mut SqliteConnection, fields: TripFields) -> FleetResult<Trip>;

    /// Replace every field of trip `id`. `NotFound` when no row matched.
    fn update_trip(
        &self,
        conn: &mut SqliteConnection,
        id: i32,
        fields: TripFields,
    ) -> FleetResult<Trip>;

    /// Delete trip `id`. `NotFound` when no row matched.
    fn delete_trip(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<()>;
}
