//! Assignment ledger (SQLite).

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{FleetError, FleetResult, ensure_id};
use crate::ledger::AssignmentLedger;
use crate::models::{NewAssignment, Truck};
use crate::schema::{truck_assignments, trucks};
use crate::warehouses;

/// Assignment ledger backed by the `truck_assignments` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteLedger;

impl SqliteLedger {
    /// Create a ledger handle.
    pub fn new() -> Self {
        Self
    }
}

fn current_warehouse(conn: &mut SqliteConnection, truck_id: i32) -> QueryResult<Option<i32>> {
    truck_assignments::table
        .find(truck_id)
        .select(truck_assignments::warehouse_id)
        .first(conn)
        .optional()
}

impl AssignmentLedger for SqliteLedger {
    fn assign(
        &self,
        conn: &mut SqliteConnection,
        truck_id: i32,
        warehouse_id: i32,
    ) -> FleetResult<()> {
        ensure_id("truckId", truck_id)?;
        ensure_id("warehouseId", warehouse_id)?;

        conn.immediate_transaction::<_, FleetError, _>(|conn| {
            let truck_exists: bool =
                diesel::select(exists(trucks::table.find(truck_id))).get_result(conn)?;
            if !truck_exists {
                return Err(FleetError::not_found(format!("truck {truck_id} not found")));
            }
            warehouses::get(conn, warehouse_id)?;

            if let Some(holder) = current_warehouse(conn, truck_id)? {
                tracing::warn!(truck_id, holder, requested = warehouse_id, "assignment rejected");
                return Err(FleetError::Conflict(format!(
                    "truck {truck_id} is already assigned to warehouse {holder}"
                )));
            }

            diesel::insert_into(truck_assignments::table)
                .values(&NewAssignment {
                    truck_id,
                    warehouse_id,
                })
                .execute(conn)?;
            Ok(())
        })?;

        tracing::info!(truck_id, warehouse_id, "truck assigned");
        Ok(())
    }

    fn unassign(
        &self,
        conn: &mut SqliteConnection,
        truck_id: i32,
        warehouse_id: i32,
    ) -> FleetResult<usize> {
        ensure_id("truckId", truck_id)?;
        ensure_id("warehouseId", warehouse_id)?;

        let removed = diesel::delete(
            truck_assignments::table
                .filter(truck_assignments::truck_id.eq(truck_id))
                .filter(truck_assignments::warehouse_id.eq(warehouse_id)),
        )
        .execute(conn)?;

        if removed == 0 {
            tracing::debug!(truck_id, warehouse_id, "unassign matched no assignment");
        } else {
            tracing::info!(truck_id, warehouse_id, "truck unassigned");
        }
        Ok(removed)
    }

    fn list_assigned_trucks(
        &self,
        conn: &mut SqliteConnection,
        warehouse_id: i32,
    ) -> FleetResult<Vec<Truck>> {
        ensure_id("warehouseId", warehouse_id)?;
        let rows = trucks::table
            .inner_join(truck_assignments::table)
            .filter(truck_assignments::warehouse_id.eq(warehouse_id))
            .select(Truck::as_select())
            .order(trucks::id.asc())
            .load(conn)?;
        Ok(rows)
    }

    fn list_available_trucks(&self, conn: &mut SqliteConnection) -> FleetResult<Vec<Truck>> {
        let rows = trucks::table
            .left_join(truck_assignments::table)
            .filter(truck_assignments::truck_id.nullable().is_null())
            .select(Truck::as_select())
            .order(trucks::id.asc())
            .load(conn)?;
        Ok(rows)
    }

    fn warehouse_of(
        &self,
        conn: &mut SqliteConnection,
        truck_id: i32,
    ) -> FleetResult<Option<i32>> {
        ensure_id("truckId", truck_id)?;
        Ok(current_warehouse(conn, truck_id)?)
    }
}
