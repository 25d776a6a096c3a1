//! Diesel models mapping to the database schema.
//!
//! These types mirror the tables created by the embedded migrations and
//! declared in [`crate::schema`]:
//! - [`crate::schema::trucks`] : fleet vehicles and their [`TruckStatus`]
//! - [`crate::schema::warehouses`] : facilities trucks can be assigned to
//! - [`crate::schema::truck_assignments`] : at most one row per truck
//! - [`crate::schema::drivers`] / [`crate::schema::routes`] : referenced by trips
//! - [`crate::schema::trips`] : scheduled truck movements
//!
//! Row structs double as API payloads (camelCase JSON). Dates serialize as
//! `yyyy-mm-dd`.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::*;
use crate::status::TruckStatus;

/// A row in [`crate::schema::trucks`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = trucks, check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    /// Database primary key.
    pub id: i32,
    /// Licence plate, unique and upper-cased.
    pub registration: String,
    /// Date the truck was registered.
    pub registration_date: NaiveDate,
    /// Current operational status.
    pub status: TruckStatus,
}

/// Insertable form of [`Truck`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trucks)]
pub struct NewTruck<'a> {
    /// Licence plate; callers normalize before inserting.
    pub registration: &'a str,
    /// Date the truck was registered.
    pub registration_date: NaiveDate,
    /// Initial status.
    pub status: TruckStatus,
}

/// Public projection of a [`crate::schema::warehouses`] row.
///
/// The password hash belongs to the login collaborator and is never selected here.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = warehouses, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Warehouse {
    /// Database primary key.
    pub id: i32,
    /// Unique display name (login key).
    pub name: String,
}

/// Insertable/changeset form for warehouses, used by seeding.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = warehouses)]
pub struct NewWarehouse<'a> {
    /// Unique display name.
    pub name: &'a str,
    /// Opaque credential hash.
    pub password_hash: &'a str,
}

/// A row in [`crate::schema::truck_assignments`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = truck_assignments, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Assignment {
    /// FK to [`Truck::id`]; also the primary key.
    pub truck_id: i32,
    /// FK to [`Warehouse::id`].
    pub warehouse_id: i32,
    /// RFC3339 UTC timestamp set by the database.
    pub assigned_at: String,
}

/// Insertable form of [`Assignment`].
#[derive(Debug, Insertable)]
#[diesel(table_name = truck_assignments)]
pub struct NewAssignment {
    /// FK to [`Truck::id`].
    pub truck_id: i32,
    /// FK to [`Warehouse::id`].
    pub warehouse_id: i32,
}

/// A row in [`crate::schema::drivers`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = drivers, check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Database primary key.
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Insertable form of [`Driver`].
#[derive(Debug, Insertable)]
#[diesel(table_name = drivers)]
pub struct NewDriver<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
}

/// A row in [`crate::schema::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = routes, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Route {
    /// Database primary key.
    pub id: i32,
    /// Human readable description, e.g. "Zagreb - Split".
    pub description: String,
}

/// Insertable form of [`Route`].
#[derive(Debug, Insertable)]
#[diesel(table_name = routes)]
pub struct NewRoute<'a> {
    /// Human readable description.
    pub description: &'a str,
}

/// A row in [`crate::schema::trips`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = trips, check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Database primary key.
    pub id: i32,
    /// Planned date of the trip.
    #[serde(rename = "date")]
    pub trip_date: NaiveDate,
    /// FK to [`Driver::id`].
    pub driver_id: i32,
    /// FK to [`Truck::id`].
    pub truck_id: i32,
    /// FK to [`Route::id`].
    pub route_id: i32,
}

/// Insertable/changeset form of [`Trip`]; `update` replaces every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = trips)]
pub struct TripFields {
    /// Planned date of the trip.
    pub trip_date: NaiveDate,
    /// FK to [`Driver::id`].
    pub driver_id: i32,
    /// FK to [`Truck::id`].
    pub truck_id: i32,
    /// FK to [`Route::id`].
    pub route_id: i32,
}

/// Display row for a driver's upcoming trips: a trip joined with driver,
/// truck, and route details.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    /// Trip primary key.
    pub id: i32,
    /// Planned date of the trip.
    pub date: NaiveDate,
    /// Driver id.
    pub driver_id: i32,
    /// Driver given name.
    pub driver_first_name: String,
    /// Driver family name.
    pub driver_last_name: String,
    /// Truck id.
    pub truck_id: i32,
    /// Truck licence plate.
    pub registration: String,
    /// Route id.
    pub route_id: i32,
    /// Route description.
    pub route: String,
}
