//! Reference-data seeding (warehouses, trucks, drivers, routes).
//!
//! ## What this does
//! - Parses a [`Seed`] (TOML) and normalizes it (see [`config`]).
//! - UPSERTs every entry keyed by its unique column.
//!
//! ## Existing rows
//! Trucks already present keep their live status; only `registration_date`
//! is refreshed. Existing warehouses get the seed's password hash. Drivers and
//! routes are insert-only.
//!
//! ## Transactions & dry-run
//! Everything runs inside one `BEGIN IMMEDIATE` transaction. With
//! [`SeedOptions::dry_run`] the same reads happen but nothing is written; the
//! returned [`SeedReport`] says what would have been inserted.

pub mod config;

pub use config::{NormalizationReport, Seed, load_seed_path, load_seed_str, normalize_seed};

use std::fmt;

use diesel::SqliteConnection;
use diesel::dsl::exists;
use diesel::prelude::*;

use crate::models::{NewDriver, NewRoute, NewTruck, NewWarehouse};
use crate::schema::{drivers, routes, trucks, warehouses};

/// Options for [`apply_seed`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedOptions {
    /// Read only; report what would change.
    pub dry_run: bool,
}

/// Inserted vs already-present counts for one table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntityCounts {
    /// Rows that did not exist before.
    pub inserted: usize,
    /// Rows matched by key (updated where the table allows it).
    pub existing: usize,
}

impl EntityCounts {
    fn record(&mut self, existed: bool) {
        if existed {
            self.existing += 1;
        } else {
            self.inserted += 1;
        }
    }
}

/// Outcome of [`apply_seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// True when nothing was written.
    pub dry_run: bool,
    /// Warehouse counts.
    pub warehouses: EntityCounts,
    /// Truck counts.
    pub trucks: EntityCounts,
    /// Driver counts.
    pub drivers: EntityCounts,
    /// Route counts.
    pub routes: EntityCounts,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "would insert" } else { "inserted" };
        for (name, c) in [
            ("warehouses", self.warehouses),
            ("trucks", self.trucks),
            ("drivers", self.drivers),
            ("routes", self.routes),
        ] {
            writeln!(f, "{name}: {verb} {}, existing {}", c.inserted, c.existing)?;
        }
        Ok(())
    }
}

/// Write `seed` into the database.
///
/// Expects an already-normalized seed (as returned by [`load_seed_str`]).
pub fn apply_seed(
    conn: &mut SqliteConnection,
    seed: &Seed,
    opt: SeedOptions,
) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport {
        dry_run: opt.dry_run,
        ..SeedReport::default()
    };

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        for w in &seed.warehouses {
            let existed: bool = diesel::select(exists(
                warehouses::table.filter(warehouses::name.eq(&w.name)),
            ))
            .get_result(conn)?;
            report.warehouses.record(existed);
            if !opt.dry_run {
                let row = NewWarehouse {
                    name: &w.name,
                    password_hash: &w.password_hash,
                };
                diesel::insert_into(warehouses::table)
                    .values(&row)
                    .on_conflict(warehouses::name)
                    .do_update()
                    .set(warehouses::password_hash.eq(&w.password_hash))
                    .execute(conn)?;
            }
        }

        for t in &seed.trucks {
            let existed: bool = diesel::select(exists(
                trucks::table.filter(trucks::registration.eq(&t.registration)),
            ))
            .get_result(conn)?;
            report.trucks.record(existed);
            if !opt.dry_run {
                let row = NewTruck {
                    registration: &t.registration,
                    registration_date: t.registration_date,
                    status: t.status.unwrap_or_default(),
                };
                diesel::insert_into(trucks::table)
                    .values(&row)
                    .on_conflict(trucks::registration)
                    .do_update()
                    .set(trucks::registration_date.eq(t.registration_date))
                    .execute(conn)?;
            }
        }

        for d in &seed.drivers {
            let existed: bool = diesel::select(exists(
                drivers::table
                    .filter(drivers::first_name.eq(&d.first_name))
                    .filter(drivers::last_name.eq(&d.last_name)),
            ))
            .get_result(conn)?;
            report.drivers.record(existed);
            if !opt.dry_run && !existed {
                diesel::insert_into(drivers::table)
                    .values(&NewDriver {
                        first_name: &d.first_name,
                        last_name: &d.last_name,
                    })
                    .execute(conn)?;
            }
        }

        for r in &seed.routes {
            let existed: bool = diesel::select(exists(
                routes::table.filter(routes::description.eq(&r.description)),
            ))
            .get_result(conn)?;
            report.routes.record(existed);
            if !opt.dry_run && !existed {
                diesel::insert_into(routes::table)
                    .values(&NewRoute {
                        description: &r.description,
                    })
                    .execute(conn)?;
            }
        }

        Ok(())
    })?;

    tracing::info!(
        dry_run = opt.dry_run,
        warehouses = report.warehouses.inserted,
        trucks = report.trucks.inserted,
        drivers = report.drivers.inserted,
        routes = report.routes.inserted,
        "seed applied"
    );
    Ok(report)
}
