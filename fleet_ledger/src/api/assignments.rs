//! Assignment endpoints; every warehouse id passes through [`CallerWarehouse`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::identity::CallerWarehouse;
use super::{AppState, message, required_id};
use crate::error::FleetResult;
use crate::ledger::{AssignmentLedger, SqliteLedger};
use crate::models::Truck;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/trucks/available", get(list_available))
        .route("/warehouses/{id}/trucks", get(list_assigned))
        .route("/assignments", post(assign).delete(unassign))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentBody {
    truck_id: Option<i32>,
    warehouse_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WarehouseQuery {
    warehouse_id: Option<i32>,
}

async fn list_available(
    State(state): State<AppState>,
    caller: CallerWarehouse,
    query: Result<Query<WarehouseQuery>, QueryRejection>,
) -> FleetResult<Json<Vec<Truck>>> {
    let Query(query) = query?;
    let warehouse_id = caller.resolve(query.warehouse_id)?;
    tracing::debug!(warehouse_id, "listing available trucks");

    let trucks = state.run(|conn| SqliteLedger.list_available_trucks(conn)).await?;
    Ok(Json(trucks))
}

async fn list_assigned(
    State(state): State<AppState>,
    caller: CallerWarehouse,
    id: Result<Path<i32>, PathRejection>,
) -> FleetResult<Json<Vec<Truck>>> {
    let Path(id) = id?;
    let warehouse_id = caller.resolve(Some(id))?;

    let trucks = state
        .run(move |conn| SqliteLedger.list_assigned_trucks(conn, warehouse_id))
        .await?;
    Ok(Json(trucks))
}

async fn assign(
    State(state): State<AppState>,
    caller: CallerWarehouse,
    body: Result<Json<AssignmentBody>, JsonRejection>,
) -> FleetResult<(StatusCode, Json<serde_json::Value>)> {
    let Json(body) = body?;
    let truck_id = required_id("truckId", body.truck_id)?;
    let warehouse_id = caller.resolve(body.warehouse_id)?;

    state
        .run(move |conn| SqliteLedger.assign(conn, truck_id, warehouse_id))
        .await?;
    Ok((StatusCode::CREATED, message("truck assigned")))
}

async fn unassign(
    State(state): State<AppState>,
    caller: CallerWarehouse,
    body: Result<Json<AssignmentBody>, JsonRejection>,
) -> FleetResult<Json<serde_json::Value>> {
    let Json(body) = body?;
    let truck_id = required_id("truckId", body.truck_id)?;
    let warehouse_id = caller.resolve(body.warehouse_id)?;

    state
        .run(move |conn| SqliteLedger.unassign(conn, truck_id, warehouse_id))
        .await?;
    Ok(message("truck unassigned"))
}
