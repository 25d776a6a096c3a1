//! Trip scheduler (SQLite).

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{FleetError, FleetResult, ensure_id};
use crate::models::{Trip, TripFields, TripView};
use crate::schema::{drivers, routes, trips, trucks};
use crate::trips::TripScheduler;

/// Trip scheduler backed by the `trips` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteScheduler;

impl SqliteScheduler {
    /// Create a scheduler handle.
    pub fn new() -> Self {
        Self
    }
}

fn check_refs(fields: &TripFields) -> FleetResult<()> {
    ensure_id("driverId", fields.driver_id)?;
    ensure_id("truckId", fields.truck_id)?;
    ensure_id("routeId", fields.route_id)?;
    Ok(())
}

// FK failures carry no column name in SQLite, so the message names all three.
fn missing_reference(err: diesel::result::Error) -> FleetError {
    match FleetError::from(err) {
        FleetError::NotFound(_) => {
            FleetError::not_found("driver, truck or route does not exist")
        }
        other => other,
    }
}

impl TripScheduler for SqliteScheduler {
    fn list_upcoming_trips(
        &self,
        conn: &mut SqliteConnection,
        driver_id: i32,
        today: NaiveDate,
    ) -> FleetResult<Vec<TripView>> {
        ensure_id("driverId", driver_id)?;

        let rows = trips::table
            .inner_join(drivers::table)
            .inner_join(trucks::table)
            .inner_join(routes::table)
            .filter(trips::driver_id.eq(driver_id))
            .filter(trips::trip_date.ge(today))
            .order((trips::trip_date.asc(), trips::id.asc()))
            .select((
                trips::id,
                trips::trip_date,
                drivers::id,
                drivers::first_name,
                drivers::last_name,
                trucks::id,
                trucks::registration,
                routes::id,
                routes::description,
            ))
            .load::<TripView>(conn)?;

        tracing::debug!(driver_id, %today, count = rows.len(), "listed upcoming trips");
        Ok(rows)
    }

    fn get_trip(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<Trip> {
        ensure_id("id", id)?;
        trips::table
            .find(id)
            .select(Trip::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| FleetError::not_found(format!("trip {id} not found")))
    }

    fn create_trip(&self, conn: &mut SqliteConnection, fields: TripFields) -> FleetResult<Trip> {
        check_refs(&fields)?;

        let trip = diesel::insert_into(trips::table)
            .values(&fields)
            .returning(Trip::as_returning())
            .get_result(conn)
            .map_err(missing_reference)?;

        tracing::info!(
            trip_id = trip.id,
            driver_id = trip.driver_id,
            truck_id = trip.truck_id,
            date = %trip.trip_date,
            "trip created"
        );
        Ok(trip)
    }

    fn update_trip(
        &self,
        conn: &mut SqliteConnection,
        id: i32,
        fields: TripFields,
    ) -> FleetResult<Trip> {
        ensure_id("id", id)?;
        check_refs(&fields)?;

        let updated = diesel::update(trips::table.find(id))
            .set(&fields)
            .returning(Trip::as_returning())
            .get_result(conn)
            .optional()
            .map_err(missing_reference)?;

        match updated {
            Some(trip) => {
                tracing::info!(trip_id = id, "trip updated");
                Ok(trip)
            }
            None => Err(FleetError::not_found(format!("trip {id} not found"))),
        }
    }

    fn delete_trip(&self, conn: &mut SqliteConnection, id: i32) -> FleetResult<()> {
        ensure_id("id", id)?;

        let removed = diesel::delete(trips::table.find(id)).execute(conn)?;
        if removed == 0 {
            return Err(FleetError::not_found(format!("trip {id} not found")));
        }
        tracing::info!(trip_id = id, "trip deleted");
        Ok(())
    }
}
