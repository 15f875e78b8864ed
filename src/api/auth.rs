//! Login and account creation
//!
//! Both endpoints issue a token on success. Response bodies have drifted
//! across backend snapshots: login nests the user under `user`, while the
//! registration endpoint has also been seen echoing flat fields next to the
//! token. Parsing accepts either shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::core::storage::StoredUser;
use crate::wizard::{RegisterPayload, RegisterReceipt, SubmissionAdapter, SubmissionFailure};

const LOGIN_PATH: &str = "auth/local";
const REGISTER_PATH: &str = "auth/local/register";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    jwt: String,

    #[serde(default)]
    user: Option<UserEcho>,

    // Flat echo fields from the older registration response shape
    #[serde(default, deserialize_with = "opt_id_string")]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<JsonValue>,
    #[serde(default, rename = "roleId")]
    role_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct UserEcho {
    #[serde(default, deserialize_with = "opt_id_string")]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<JsonValue>,
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        JsonValue::String(s) => s,
        other => other.to_string(),
    }))
}

/// Role names arrive as a bare string or as `{ "name": ... }`
fn role_name(value: &Option<JsonValue>) -> Option<String> {
    match value {
        Some(JsonValue::String(name)) => Some(name.clone()),
        Some(JsonValue::Object(map)) => map
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        _ => None,
    }
}

impl AuthResponse {
    /// Reduce the response to the user record the client persists,
    /// falling back to what was sent when the echo is partial
    fn stored_user(&self, sent_username: &str, sent_email: Option<&str>) -> StoredUser {
        let (id, username, email, role) = match &self.user {
            Some(user) => (
                user.id.clone(),
                user.username.clone(),
                user.email.clone(),
                role_name(&user.role),
            ),
            None => (
                self.id.clone(),
                self.username.clone(),
                self.email.clone(),
                role_name(&self.role),
            ),
        };
        StoredUser {
            id,
            username: username.unwrap_or_else(|| sent_username.to_string()),
            email: email.or_else(|| sent_email.map(str::to_string)),
            role,
            role_id: self.role_id,
        }
    }
}

/// Log in with email and password, returning the issued token and the user
pub fn login(
    client: &ApiClient,
    identifier: &str,
    password: &str,
) -> Result<(String, StoredUser), ApiError> {
    let value = client.post(
        LOGIN_PATH,
        &LoginRequest {
            identifier,
            password,
        },
    )?;
    let response: AuthResponse = parse_auth(client, LOGIN_PATH, value)?;
    let user = response.stored_user(identifier, Some(identifier));
    Ok((response.jwt, user))
}

/// Create an account from the wizard's payload
pub fn register(client: &ApiClient, payload: &RegisterPayload) -> Result<RegisterReceipt, ApiError> {
    let value = client.post(REGISTER_PATH, payload)?;
    let response: AuthResponse = parse_auth(client, REGISTER_PATH, value)?;
    let mut user = response.stored_user(&payload.username, Some(&payload.email));
    if user.role_id.is_none() {
        user.role_id = Some(payload.role.0);
    }
    Ok(RegisterReceipt {
        token: response.jwt,
        user,
    })
}

fn parse_auth(client: &ApiClient, path: &str, value: JsonValue) -> Result<AuthResponse, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        url: client.endpoint(path),
        message: e.to_string(),
    })
}

/// The wizard's submission adapter, backed by the real backend
pub struct BackendRegistrar<'a> {
    client: &'a ApiClient,
}

impl<'a> BackendRegistrar<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl SubmissionAdapter for BackendRegistrar<'_> {
    fn register(&mut self, payload: &RegisterPayload) -> Result<RegisterReceipt, SubmissionFailure> {
        // The backend message is surfaced to the user, not swallowed
        register(self.client, payload).map_err(|e| SubmissionFailure {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_user_shape() {
        let response: AuthResponse = serde_json::from_value(serde_json::json!({
            "jwt": "token",
            "user": {
                "id": 12,
                "username": "asha",
                "email": "asha@example.com",
                "role": { "name": "Vendor" },
            },
        }))
        .unwrap();
        let user = response.stored_user("fallback", None);
        assert_eq!(user.id.as_deref(), Some("12"));
        assert_eq!(user.username, "asha");
        assert_eq!(user.role.as_deref(), Some("Vendor"));
    }

    #[test]
    fn test_flat_registration_shape() {
        let response: AuthResponse = serde_json::from_value(serde_json::json!({
            "jwt": "token",
            "id": "7",
            "username": "priya",
            "role": "vendor",
            "roleId": 3,
        }))
        .unwrap();
        let user = response.stored_user("priya", Some("priya@example.com"));
        assert_eq!(user.id.as_deref(), Some("7"));
        assert_eq!(user.role.as_deref(), Some("vendor"));
        assert_eq!(user.role_id, Some(3));
        assert_eq!(user.email.as_deref(), Some("priya@example.com"));
    }

    #[test]
    fn test_partial_echo_falls_back_to_sent_values() {
        let response: AuthResponse =
            serde_json::from_value(serde_json::json!({ "jwt": "token" })).unwrap();
        let user = response.stored_user("sent-name", Some("sent@example.com"));
        assert_eq!(user.username, "sent-name");
        assert_eq!(user.email.as_deref(), Some("sent@example.com"));
        assert!(user.role.is_none());
    }
}
