//! Truck listing, registration, and status endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AppState, required_id};
use crate::error::{FleetError, FleetResult};
use crate::ledger::{AssignmentLedger, SqliteLedger};
use crate::models::Truck;
use crate::registry::{SqliteRegistry, TruckRegistry, parse_status};
use crate::status::TruckStatus;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/trucks",
            get(list_trucks).put(update_status).post(register_truck),
        )
        .route("/trucks/{id}", get(get_truck))
        .route("/trucks/{id}/assignment", get(truck_assignment))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    id: Option<i32>,
    status: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdated {
    message: &'static str,
    id: i32,
    status: TruckStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    registration: Option<String>,
    registration_date: Option<NaiveDate>,
    status: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TruckAssignment {
    truck_id: i32,
    warehouse_id: Option<i32>,
}

async fn list_trucks(State(state): State<AppState>) -> FleetResult<Json<Vec<Truck>>> {
    let trucks = state.run(|conn| SqliteRegistry.list_trucks(conn)).await?;
    Ok(Json(trucks))
}

async fn get_truck(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> FleetResult<Json<Truck>> {
    let Path(id) = id?;
    let truck = state.run(move |conn| SqliteRegistry.get_truck(conn, id)).await?;
    Ok(Json(truck))
}

async fn update_status(
    State(state): State<AppState>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> FleetResult<Json<StatusUpdated>> {
    let Json(body) = body?;
    let id = required_id("id", body.id)?;
    let raw = body
        .status
        .ok_or_else(|| FleetError::invalid("status is required"))?;
    let status = parse_status(&raw)?;

    let change = state
        .run(move |conn| SqliteRegistry.update_status(conn, id, status))
        .await?;
    Ok(Json(StatusUpdated {
        message: "status updated",
        id: change.id,
        status: change.status,
    }))
}

async fn register_truck(
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> FleetResult<(StatusCode, Json<Truck>)> {
    let Json(body) = body?;
    let registration = body
        .registration
        .ok_or_else(|| FleetError::invalid("registration is required"))?;
    let registration_date = body
        .registration_date
        .ok_or_else(|| FleetError::invalid("registrationDate is required"))?;
    let status = match body.status {
        Some(raw) => parse_status(&raw)?,
        None => TruckStatus::default(),
    };

    let truck = state
        .run(move |conn| {
            SqliteRegistry.register_truck(conn, &registration, registration_date, status)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

async fn truck_assignment(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> FleetResult<Json<TruckAssignment>> {
    let Path(truck_id) = id?;
    let warehouse_id = state
        .run(move |conn| {
            SqliteRegistry.get_truck(conn, truck_id)?;
            SqliteLedger.warehouse_of(conn, truck_id)
        })
        .await?;
    Ok(Json(TruckAssignment {
        truck_id,
        warehouse_id,
    }))
}
