//! Assignment Ledger: which truck belongs to which warehouse.
//!
//! A truck is either assigned to exactly one warehouse or unassigned
//! ("available"). At any instant the set of trucks is partitioned into the
//! available set and one assigned set per warehouse.
//!
//! Assignment is guarded twice: `truck_assignments.truck_id` is the primary
//! key, and [`AssignmentLedger::assign`] checks for an existing row inside an
//! immediate transaction so the caller gets a `Conflict` naming the current
//! warehouse instead of a bare constraint error.

pub mod repo;

pub use repo::SqliteLedger;

use diesel::SqliteConnection;

use crate::error::FleetResult;
use crate::models::Truck;

/// Portable surface, SQLite implementation lives in `repo.rs`.
pub trait AssignmentLedger {
    /// Record that `truck_id` now belongs to `warehouse_id`.
    ///
    /// `NotFound` when either side does not exist, `Conflict` when the truck
    /// is already assigned (to this or any other warehouse).
    fn assign(
        &self,
        conn: &mut SqliteConnection,
        truck_id: i32,
        warehouse_id: i32,
    ) -> FleetResult<()>;

    /// Remove the `(truck_id, warehouse_id)` assignment if present.
    ///
    /// Idempotent: returns the number of rows removed, which is zero when the
    /// pair was not assigned.
    fn unassign(
        &self,
        conn: &mut SqliteConnection,
        truck_id: i32,
        warehouse_id: i32,
    ) -> FleetResult<usize>;

    /// Trucks currently assigned to `warehouse_id`, ordered by id.
    fn list_assigned_trucks(
        &self,
        conn: &mut SqliteConnection,
        warehouse_id: i32,
    ) -> FleetResult<Vec<Truck>>;

    /// Trucks with no assignment, ordered by id.
    fn list_available_trucks(&self, conn: &mut SqliteConnection) -> FleetResult<Vec<Truck>>;

    /// Warehouse currently holding `truck_id`, if any.
    fn warehouse_of(&self, conn: &mut SqliteConnection, truck_id: i32)
    -> FleetResult<Option<i32>>;
}
