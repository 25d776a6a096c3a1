//! Trip endpoints. "Today" comes from the state's [`super::Clock`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{AppState, message, required_id};
use crate::error::{FleetError, FleetResult};
use crate::models::{Trip, TripFields, TripView};
use crate::trips::{SqliteScheduler, TripScheduler};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/trips",
            get(list_upcoming)
                .post(create_trip)
                .put(update_trip)
                .delete(delete_trip),
        )
        .route("/trips/{id}", get(get_trip))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriverQuery {
    driver_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripBody {
    id: Option<i32>,
    date: Option<NaiveDate>,
    driver_id: Option<i32>,
    truck_id: Option<i32>,
    route_id: Option<i32>,
}

impl TripBody {
    fn fields(&self) -> FleetResult<TripFields> {
        Ok(TripFields {
            trip_date: self
                .date
                .ok_or_else(|| FleetError::invalid("date is required"))?,
            driver_id: required_id("driverId", self.driver_id)?,
            truck_id: required_id("truckId", self.truck_id)?,
            route_id: required_id("routeId", self.route_id)?,
        })
    }
}

#[derive(Deserialize)]
struct TripId {
    id: Option<i32>,
}

async fn list_upcoming(
    State(state): State<AppState>,
    query: Result<Query<DriverQuery>, QueryRejection>,
) -> FleetResult<Json<Vec<TripView>>> {
    let Query(query) = query?;
    let driver_id = required_id("driverId", query.driver_id)?;
    let today = state.today();

    let trips = state
        .run(move |conn| SqliteScheduler.list_upcoming_trips(conn, driver_id, today))
        .await?;
    Ok(Json(trips))
}

async fn get_trip(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> FleetResult<Json<Trip>> {
    let Path(id) = id?;
    let trip = state.run(move |conn| SqliteScheduler.get_trip(conn, id)).await?;
    Ok(Json(trip))
}

async fn create_trip(
    State(state): State<AppState>,
    body: Result<Json<TripBody>, JsonRejection>,
) -> FleetResult<(StatusCode, Json<Trip>)> {
    let Json(body) = body?;
    let fields = body.fields()?;

    let trip = state
        .run(move |conn| SqliteScheduler.create_trip(conn, fields))
        .await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    body: Result<Json<TripBody>, JsonRejection>,
) -> FleetResult<Json<Trip>> {
    let Json(body) = body?;
    let id = required_id("id", body.id)?;
    let fields = body.fields()?;

    let trip = state
        .run(move |conn| SqliteScheduler.update_trip(conn, id, fields))
        .await?;
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<AppState>,
    body: Result<Json<TripId>, JsonRejection>,
) -> FleetResult<Json<serde_json::Value>> {
    let Json(body) = body?;
    let id = required_id("id", body.id)?;

    state
        .run(move |conn| SqliteScheduler.delete_trip(conn, id))
        .await?;
    Ok(message("trip deleted"))
}
