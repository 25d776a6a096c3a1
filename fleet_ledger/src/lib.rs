//! Truck assignment, status, and trip scheduling for a warehouse fleet.
//!
//! Components, leaves first:
//! - [`registry`]: truck records and their [`status::TruckStatus`]
//! - [`ledger`]: which truck is assigned to which warehouse
//! - [`trips`]: dated trips binding a driver, truck, and route
//! - [`api`]: the JSON-over-HTTP boundary
//!
//! Persistence is SQLite through Diesel ([`db`], [`schema`], [`models`]).
//! Reference data is loaded with [`seed`].

#![deny(missing_docs)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod registry;
#[allow(missing_docs)]
pub mod schema;
pub mod seed;
pub mod status;
pub mod trips;
pub mod warehouses;

pub use error::{FleetError, FleetResult};
