//! Authenticated session state
//!
//! Constructed once at startup and passed explicitly into the commands that
//! need it. There is no ambient/global auth state; anything that wants to
//! know who is logged in takes a `&Session`.

use crate::core::storage::{ClientStore, StoreError, StoredUser};
use crate::core::token::Claims;

/// The current session: durable store plus decoded token claims
#[derive(Debug)]
pub struct Session {
    store: ClientStore,
    claims: Option<Claims>,
}

impl Session {
    /// Open the session from durable storage.
    ///
    /// A token that no longer decodes, or has expired, is pruned from the
    /// store and the session starts logged out.
    pub fn open() -> Result<Self, StoreError> {
        let mut store = ClientStore::open()?;
        let claims = store.token().and_then(|t| Claims::decode(t).ok());
        let claims = match claims {
            Some(c) if !c.is_expired() => Some(c),
            _ => {
                if store.token().is_some() {
                    store.clear_session()?;
                }
                None
            }
        };
        Ok(Self { store, claims })
    }

    /// Build a session over an explicit store (tests, scripts)
    pub fn from_store(store: ClientStore) -> Self {
        let claims = store
            .token()
            .and_then(|t| Claims::decode(t).ok())
            .filter(|c| !c.is_expired());
        Self { store, claims }
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.store.token()
    }

    pub fn user(&self) -> Option<&StoredUser> {
        self.store.user()
    }

    /// Persist a freshly issued token and user echo
    pub fn login(&mut self, token: String, user: StoredUser) -> Result<(), StoreError> {
        self.claims = Claims::decode(&token).ok();
        self.store.set_session(token, user)
    }

    /// Drop the persisted session
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.claims = None;
        self.store.clear_session()
    }

    /// Durable store, for the wizard's role persistence
    pub fn store_mut(&mut self) -> &mut ClientStore {
        &mut self.store
    }

    pub fn store(&self) -> &ClientStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use tempfile::TempDir;

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(
            serde_json::json!({ "username": "asha", "exp": exp, "iat": 0 })
                .to_string()
                .as_bytes(),
        );
        format!("{}.{}.sig", header, body)
    }

    fn user() -> StoredUser {
        StoredUser {
            id: None,
            username: "asha".into(),
            email: None,
            role: None,
            role_id: None,
        }
    }

    #[test]
    fn test_login_logout() {
        let tmp = TempDir::new().unwrap();
        let store = ClientStore::at_path(tmp.path().join("state.yaml"));
        let mut session = Session::from_store(store);
        assert!(!session.is_authenticated());

        session.login(token_with_exp(4_102_444_800), user()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.claims().unwrap().username.as_deref(), Some("asha"));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_expired_token_starts_logged_out() {
        let tmp = TempDir::new().unwrap();
        let mut store = ClientStore::at_path(tmp.path().join("state.yaml"));
        store.set_session(token_with_exp(1), user()).unwrap();

        let session = Session::from_store(ClientStore::at_path(tmp.path().join("state.yaml")));
        assert!(!session.is_authenticated());
    }
}
