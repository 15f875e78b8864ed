//! Role catalog fetch
//!
//! The catalog is a flat list; the consumer takes the whole sequence, no
//! pagination. A failed fetch is recoverable: callers run with an unloaded
//! catalog and submission stays blocked until a retry succeeds.

use serde_json::Value as JsonValue;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::wizard::{RoleCatalog, RoleEntry};

const ROLES_PATH: &str = "users-permissions/roles";

/// Fetch the role catalog from the backend
pub fn fetch_roles(client: &ApiClient) -> Result<RoleCatalog, ApiError> {
    let value = client.get(ROLES_PATH)?;
    parse_catalog(value).map_err(|message| ApiError::Decode {
        url: client.endpoint(ROLES_PATH),
        message,
    })
}

fn parse_catalog(value: JsonValue) -> Result<RoleCatalog, String> {
    // Roles arrive under a `roles` key
    let roles = value
        .get("roles")
        .cloned()
        .unwrap_or_else(|| JsonValue::Array(Vec::new()));
    let entries: Vec<RoleEntry> = serde_json::from_value(roles).map_err(|e| e.to_string())?;
    Ok(RoleCatalog::new(entries))
}
