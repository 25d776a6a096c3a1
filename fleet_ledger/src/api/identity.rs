//! Caller identity forwarded by the gateway.
//!
//! The gateway that authenticated the warehouse session sets
//! `x-warehouse-id`. When present it is authoritative for every assignment
//! endpoint; a client-supplied warehouse id that disagrees is `Forbidden`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::{FleetError, FleetResult, ensure_id};

/// Header carrying the verified warehouse id.
pub const WAREHOUSE_HEADER: &str = "x-warehouse-id";

/// Warehouse id from [`WAREHOUSE_HEADER`], if the request carried one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallerWarehouse(pub Option<i32>);

impl CallerWarehouse {
    /// The warehouse an operation should act on.
    ///
    /// `supplied` is the id from the body, query, or path.
    pub fn resolve(self, supplied: Option<i32>) -> FleetResult<i32> {
        match (self.0, supplied) {
            (Some(caller), Some(requested)) if caller != requested => {
                tracing::warn!(caller, requested, "warehouse identity mismatch");
                Err(FleetError::Forbidden(format!(
                    "caller warehouse {caller} cannot act on warehouse {requested}"
                )))
            }
            (Some(caller), _) => Ok(caller),
            (None, Some(requested)) => ensure_id("warehouseId", requested),
            (None, None) => Err(FleetError::invalid("warehouseId is required")),
        }
    }
}

impl<S> FromRequestParts<S> for CallerWarehouse
where
    S: Send + Sync,
{
    type Rejection = FleetError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(WAREHOUSE_HEADER) else {
            return Ok(CallerWarehouse(None));
        };
        raw.to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(|id| CallerWarehouse(Some(id)))
            .ok_or_else(|| FleetError::invalid(format!("malformed {WAREHOUSE_HEADER} header")))
    }
}
