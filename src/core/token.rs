//! Token claim decoding
//!
//! The backend issues a JWT on login/registration. The client never verifies
//! the signature (it has no key material); it only reads the payload claims
//! to know who is logged in and when the token lapses, matching what the web
//! client does with `jwt-decode`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    #[diagnostic(code(bmv::token::malformed))]
    Malformed,

    #[error("token payload is not valid base64")]
    #[diagnostic(code(bmv::token::base64))]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON")]
    #[diagnostic(code(bmv::token::json))]
    Json(#[from] serde_json::Error),
}

/// Role claim nested in the token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleClaim {
    pub name: String,
}

/// Claims the client reads out of the token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Backend ids arrive as numbers or strings depending on the snapshot
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<RoleClaim>,

    /// Expiry, seconds since the epoch
    pub exp: i64,

    /// Issued-at, seconds since the epoch
    pub iat: i64,
}

impl Claims {
    /// Decode claims from the payload segment of a JWT, without verifying
    /// the signature
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(TokenError::Malformed),
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Whether the token has lapsed as of now
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Lowercased role name, if the token carries one
    pub fn role_name(&self) -> Option<String> {
        self.role.as_ref().map(|r| r.name.to_lowercase())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(serde_json::json!({
            "id": 7,
            "username": "priya",
            "email": "priya@example.com",
            "role": { "name": "Vendor" },
            "exp": 4_102_444_800i64,
            "iat": 1_700_000_000i64,
        }));
        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.id.as_deref(), Some("7"));
        assert_eq!(claims.username.as_deref(), Some("priya"));
        assert_eq!(claims.role_name().as_deref(), Some("vendor"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let token = make_token(serde_json::json!({
            "exp": 1_000_000_000i64,
            "iat": 999_000_000i64,
        }));
        let claims = Claims::decode(&token).unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_malformed_token() {
        assert!(matches!(
            Claims::decode("not-a-jwt"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            Claims::decode("a.b.c.d"),
            Err(TokenError::Malformed)
        ));
        assert!(Claims::decode("a.!!!.c").is_err());
    }
}
