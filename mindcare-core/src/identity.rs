//! Identity boundary
//!
//! The surrounding application authenticates against an external
//! identity-and-profile service. The chat subsystem never consumes this
//! interface; it is specified here so the rest of the application can
//! inject it as a capability instead of reaching for ambient globals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// Sign-in credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Result of a session or sign-in lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated(Profile),
    Anonymous,
}

impl AuthState {
    /// The profile, if authenticated
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            AuthState::Authenticated(profile) => Some(profile),
            AuthState::Anonymous => None,
        }
    }
}

/// Capability interface over the external identity service
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Register a new account and return its profile
    async fn sign_up(
        &self,
        credentials: Credentials,
        display_name: &str,
    ) -> crate::Result<Profile>;

    /// Authenticate with credentials
    async fn sign_in(&self, credentials: Credentials) -> crate::Result<AuthState>;

    /// Current session, if any
    async fn current_session(&self) -> crate::Result<AuthState>;

    /// Fetch a profile by user id
    async fn profile(&self, user_id: Uuid) -> crate::Result<Option<Profile>>;
}

#[derive(Default)]
struct AccountTable {
    accounts: HashMap<String, (String, Profile)>,
    signed_in: Option<Profile>,
}

/// In-memory identity store for tests and local runs
#[derive(Default, Clone)]
pub struct InMemoryIdentityStore {
    inner: Arc<RwLock<AccountTable>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn sign_up(
        &self,
        credentials: Credentials,
        display_name: &str,
    ) -> crate::Result<Profile> {
        let mut table = self.inner.write().await;
        if table.accounts.contains_key(&credentials.email) {
            return Err(crate::Error::Identity(format!(
                "account already exists for {}",
                credentials.email
            )));
        }

        let profile = Profile {
            user_id: Uuid::new_v4(),
            email: credentials.email.clone(),
            display_name: display_name.to_string(),
        };
        table
            .accounts
            .insert(credentials.email, (credentials.password, profile.clone()));
        Ok(profile)
    }

    async fn sign_in(&self, credentials: Credentials) -> crate::Result<AuthState> {
        let mut table = self.inner.write().await;
        match table.accounts.get(&credentials.email) {
            Some((password, profile)) if *password == credentials.password => {
                let profile = profile.clone();
                table.signed_in = Some(profile.clone());
                Ok(AuthState::Authenticated(profile))
            }
            _ => Ok(AuthState::Anonymous),
        }
    }

    async fn current_session(&self) -> crate::Result<AuthState> {
        let table = self.inner.read().await;
        Ok(match &table.signed_in {
            Some(profile) => AuthState::Authenticated(profile.clone()),
            None => AuthState::Anonymous,
        })
    }

    async fn profile(&self, user_id: Uuid) -> crate::Result<Option<Profile>> {
        let table = self.inner.read().await;
        Ok(table
            .accounts
            .values()
            .map(|(_, profile)| profile)
            .find(|profile| profile.user_id == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let store = InMemoryIdentityStore::new();
        let profile = store
            .sign_up(credentials("amy@campus.edu", "secret"), "Amy")
            .await
            .unwrap();

        let state = store
            .sign_in(credentials("amy@campus.edu", "secret"))
            .await
            .unwrap();
        assert_eq!(state, AuthState::Authenticated(profile.clone()));
        assert_eq!(
            store.current_session().await.unwrap().profile(),
            Some(&profile)
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_anonymous() {
        let store = InMemoryIdentityStore::new();
        store
            .sign_up(credentials("amy@campus.edu", "secret"), "Amy")
            .await
            .unwrap();

        let state = store
            .sign_in(credentials("amy@campus.edu", "wrong"))
            .await
            .unwrap();
        assert_eq!(state, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_fails() {
        let store = InMemoryIdentityStore::new();
        store
            .sign_up(credentials("amy@campus.edu", "secret"), "Amy")
            .await
            .unwrap();
        assert!(store
            .sign_up(credentials("amy@campus.edu", "other"), "Amy B")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_unknown_profile_is_none() {
        let store = InMemoryIdentityStore::new();
        assert_eq!(store.profile(Uuid::new_v4()).await.unwrap(), None);
    }
}
