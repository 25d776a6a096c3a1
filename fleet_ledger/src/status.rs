//! Truck lifecycle status.
//!
//! The five statuses form a flat set: any status may be replaced by any other.
//! Each variant has a stable label which is what gets stored in `trucks.status`
//! and what the JSON API emits:
//!
//! | Variant      | Label                 |
//! |--------------|-----------------------|
//! | `Available`  | `"Dostupan"`          |
//! | `Loading`    | `"U procesu utovara"` |
//! | `Loaded`     | `"Utovaren"`          |
//! | `Dispatched` | `"Otpremljen"`        |
//! | `InService`  | `"Na servisu"`        |
//!
//! Parsing accepts either the label or the English variant name
//! (case-insensitive for the latter), so `"Utovaren"` and `"loaded"` both map
//! to [`TruckStatus::Loaded`].
//!
//! ```
//! use fleet_ledger::status::TruckStatus;
//!
//! let s: TruckStatus = "Utovaren".parse().unwrap();
//! assert_eq!(s, TruckStatus::Loaded);
//! assert_eq!(s.label(), "Utovaren");
//! ```

use std::{fmt, str::FromStr};

use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operational status of a truck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum TruckStatus {
    /// Free for loading or dispatch.
    #[default]
    Available,
    /// Being loaded at a warehouse.
    Loading,
    /// Loaded and waiting for dispatch.
    Loaded,
    /// On the road.
    Dispatched,
    /// In maintenance.
    InService,
}

/// Returned when a string is not one of the five known statuses.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid status value: {0:?}")]
pub struct InvalidStatus(pub String);

impl TruckStatus {
    /// Every status, in workflow order.
    pub const ALL: [TruckStatus; 5] = [
        TruckStatus::Available,
        TruckStatus::Loading,
        TruckStatus::Loaded,
        TruckStatus::Dispatched,
        TruckStatus::InService,
    ];

    /// Stored/serialized label.
    pub const fn label(self) -> &'static str {
        match self {
            TruckStatus::Available => "Dostupan",
            TruckStatus::Loading => "U procesu utovara",
            TruckStatus::Loaded => "Utovaren",
            TruckStatus::Dispatched => "Otpremljen",
            TruckStatus::InService => "Na servisu",
        }
    }

    /// English variant name.
    pub const fn name(self) -> &'static str {
        match self {
            TruckStatus::Available => "Available",
            TruckStatus::Loading => "Loading",
            TruckStatus::Loaded => "Loaded",
            TruckStatus::Dispatched => "Dispatched",
            TruckStatus::InService => "InService",
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TruckStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TruckStatus::ALL
            .into_iter()
            .find(|st| st.label() == s || st.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

impl Serialize for TruckStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TruckStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql<Text, Sqlite> for TruckStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.label());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for TruckStatus {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(raw.parse::<TruckStatus>()?)
    }
}
