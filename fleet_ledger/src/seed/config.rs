//! Seed file parsing and normalization.
//!
//! A seed file lists the reference data the API never creates itself:
//!
//! ```toml
//! [[warehouses]]
//! name = "Zagreb"
//! password_hash = "$2b$10$..."
//!
//! [[trucks]]
//! registration = "zg-1234-ab"
//! registration_date = "2021-05-04"
//! status = "Dostupan"          # optional
//!
//! [[drivers]]
//! first_name = "Ivan"
//! last_name = "Horvat"
//!
//! [[routes]]
//! description = "Zagreb - Split"
//! ```
//!
//! Normalization trims every string, upper-cases registrations, drops entries
//! whose key is empty, and de-duplicates by key keeping the first occurrence.
//! Keys: warehouse name, registration, driver full name, route description.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::registry::normalize_registration;
use crate::status::TruckStatus;

/// Parsed seed file.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    /// Warehouses (login accounts).
    #[serde(default)]
    pub warehouses: Vec<WarehouseSeed>,
    /// Trucks.
    #[serde(default)]
    pub trucks: Vec<TruckSeed>,
    /// Drivers.
    #[serde(default)]
    pub drivers: Vec<DriverSeed>,
    /// Routes.
    #[serde(default)]
    pub routes: Vec<RouteSeed>,
}

/// One `[[warehouses]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WarehouseSeed {
    /// Unique login name.
    pub name: String,
    /// Opaque credential hash, stored as-is.
    pub password_hash: String,
}

/// One `[[trucks]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TruckSeed {
    /// Licence plate.
    pub registration: String,
    /// `yyyy-mm-dd`.
    pub registration_date: NaiveDate,
    /// Initial status for new trucks; ignored for trucks already present.
    pub status: Option<TruckStatus>,
}

/// One `[[drivers]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DriverSeed {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteSeed {
    /// Route description, unique.
    pub description: String,
}

/// Entries removed by [`normalize_seed`], in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NormalizationReport {
    /// One line per dropped entry, e.g. `truck "ZG-1" (duplicate)`.
    pub dropped: Vec<String>,
}

impl NormalizationReport {
    /// True when nothing was dropped.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

// Keep the first entry per key; `key` returns None for entries with an empty key.
fn retain_unique<T>(
    items: &mut Vec<T>,
    kind: &str,
    report: &mut NormalizationReport,
    key: impl Fn(&T) -> Option<String>,
) {
    let mut seen = HashSet::new();
    items.retain(|item| match key(item) {
        None => {
            report.dropped.push(format!("{kind} with empty key"));
            false
        }
        Some(k) if !seen.insert(k.clone()) => {
            report.dropped.push(format!("{kind} {k:?} (duplicate)"));
            false
        }
        Some(_) => true,
    });
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Normalize a seed in place.
///
/// Errors when a warehouse that survives de-duplication has an empty
/// password hash.
pub fn normalize_seed(seed: &mut Seed) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    for w in &mut seed.warehouses {
        w.name = w.name.trim().to_string();
        w.password_hash = w.password_hash.trim().to_string();
    }
    retain_unique(&mut seed.warehouses, "warehouse", &mut report, |w| {
        non_empty(&w.name)
    });
    if let Some(w) = seed.warehouses.iter().find(|w| w.password_hash.is_empty()) {
        bail!("warehouse {:?} has an empty password_hash", w.name);
    }

    for t in &mut seed.trucks {
        t.registration = normalize_registration(&t.registration);
    }
    retain_unique(&mut seed.trucks, "truck", &mut report, |t| {
        non_empty(&t.registration)
    });

    for d in &mut seed.drivers {
        d.first_name = d.first_name.trim().to_string();
        d.last_name = d.last_name.trim().to_string();
    }
    retain_unique(&mut seed.drivers, "driver", &mut report, |d| {
        if d.first_name.is_empty() || d.last_name.is_empty() {
            None
        } else {
            Some(format!("{} {}", d.first_name, d.last_name))
        }
    });

    for r in &mut seed.routes {
        r.description = r.description.trim().to_string();
    }
    retain_unique(&mut seed.routes, "route", &mut report, |r| {
        non_empty(&r.description)
    });

    Ok(report)
}

/// Parse and normalize a seed from a TOML string.
pub fn load_seed_str(toml_str: &str) -> anyhow::Result<(Seed, NormalizationReport)> {
    let mut seed: Seed = toml::from_str(toml_str).context("failed to parse seed TOML")?;
    let report = normalize_seed(&mut seed).context("normalize_seed failed")?;
    Ok((seed, report))
}

/// Read a seed file from disk, parse, and normalize it.
pub fn load_seed_path(path: impl AsRef<Path>) -> anyhow::Result<(Seed, NormalizationReport)> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read seed file {}", path.as_ref().display()))?;
    load_seed_str(&text)
}
