//! SQLite truck registry.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{FleetError, FleetResult, ensure_id};
use crate::models::{NewTruck, Truck};
use crate::registry::{StatusChange, TruckRegistry, normalize_registration};
use crate::schema::trucks;
use crate::status::TruckStatus;

/// Truck registry backed by the `trucks` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteRegistry;

impl SqliteRegistry {
    /// Create a registry handle.
    pub fn new() -> Self {
        Self
    }
}

impl TruckRegistry for SqliteRegistry {
    fn list_trucks(&self, conn: &mut SqliteConnection) -> FleetResult<Vec<Truck>> {
        let rows = trucks::table
            .select(Truck::as_select())
            .order(trucks::id.asc())
            .load(conn)?;
        tracing::debug!(count = rows.len(), "listed trucks");
        Ok(rows)
    }

    fn get_truck(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<Truck> {
        trucks::table
            .find(id)
            .select(Truck::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| FleetError::not_found(format!("truck {id} not found")))
    }

    fn update_status(
        &self,
        conn: &mut SqliteConnection,
        id: i32,
        status: TruckStatus,
    ) -> FleetResult<StatusChange> {
        ensure_id("id", id)?;

        let updated: Option<(i32, TruckStatus)> = diesel::update(trucks::table.find(id))
            .set(trucks::status.eq(status))
            .returning((trucks::id, trucks::status))
            .get_result(conn)
            .optional()?;

        match updated {
            Some((id, status)) => {
                tracing::info!(truck_id = id, status = status.label(), "truck status updated");
                Ok(StatusChange { id, status })
            }
            None => Err(FleetError::not_found(format!("truck {id} not found"))),
        }
    }

    fn register_truck(
        &self,
        conn: &mut SqliteConnection,
        registration: &str,
        registration_date: NaiveDate,
        status: TruckStatus,
    ) -> FleetResult<Truck> {
        let plate = normalize_registration(registration);
        if plate.is_empty() {
            return Err(FleetError::invalid("registration is required"));
        }

        let row = NewTruck {
            registration: &plate,
            registration_date,
            status,
        };
        let truck = diesel::insert_into(trucks::table)
            .values(&row)
            .returning(Truck::as_returning())
            .get_result(conn)
            .map_err(|e| match FleetError::from(e) {
                FleetError::Conflict(_) => {
                    FleetError::Conflict(format!("truck {plate} is already registered"))
                }
                other => other,
            })?;

        tracing::info!(truck_id = truck.id, registration = %truck.registration, "truck registered");
        Ok(truck)
    }
}
