//! Truck Registry: truck records and their status field.
//!
//! The status set is flat (see [`crate::status`]): any status may replace any
//! other. The SQLite implementation lives in [`repo`].

pub mod repo;

pub use repo::SqliteRegistry;

use chrono::NaiveDate;
use diesel::SqliteConnection;
use serde::Serialize;

use crate::error::{FleetError, FleetResult};
use crate::models::Truck;
use crate::status::TruckStatus;

/// Identity/status pair returned by a successful status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// Truck id.
    pub id: i32,
    /// Status now stored for the truck.
    pub status: TruckStatus,
}

/// Portable surface over truck storage.
pub trait TruckRegistry {
    /// All trucks ordered by id.
    fn list_trucks(&self, conn: &mut SqliteConnection) -> FleetResult<Vec<Truck>>;

    /// A single truck, or `NotFound`.
    fn get_truck(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<Truck>;

    /// Persist `status` for truck `id`. `NotFound` when no row was affected.
    fn update_status(
        &self,
        conn: &mut SqliteConnection,
        id: i32,
        status: TruckStatus,
    ) -> FleetResult<StatusChange>;

    /// Insert a new truck. Duplicate registrations are a `Conflict`.
    fn register_truck(
        &self,
        conn: &mut SqliteConnection,
        registration: &str,
        registration_date: NaiveDate,
        status: TruckStatus,
    ) -> FleetResult<Truck>;
}

/// Parse a client-supplied status, mapping unknown values to `InvalidArgument`.
pub fn parse_status(raw: &str) -> FleetResult<TruckStatus> {
    raw.parse::<TruckStatus>()
        .map_err(|e| FleetError::InvalidArgument(e.to_string()))
}

/// Canonical plate form: trimmed, inner whitespace collapsed, upper-case.
pub fn normalize_registration(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
