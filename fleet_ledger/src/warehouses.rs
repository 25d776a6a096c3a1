//! Read-only warehouse lookups.
//!
//! Warehouses are created by seeding and authenticated by the login
//! collaborator. The core only needs to know that an id exists, and the
//! collaborator needs to resolve a login name to an id.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::{FleetError, FleetResult};
use crate::models::Warehouse;
use crate::schema::warehouses;

/// Fetch a warehouse by id.
pub fn get(conn: &mut SqliteConnection, id: i32) -> FleetResult<Warehouse> {
    warehouses::table
        .find(id)
        .select(Warehouse::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| FleetError::not_found(format!("warehouse {id} not found")))
}

/// Resolve a warehouse by its unique login name.
pub fn find_by_name(conn: &mut SqliteConnection, name: &str) -> FleetResult<Option<Warehouse>> {
    let found = warehouses::table
        .filter(warehouses::name.eq(name.trim()))
        .select(Warehouse::as_select())
        .first(conn)
        .optional()?;
    Ok(found)
}
