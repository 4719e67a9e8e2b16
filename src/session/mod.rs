//! Authentication session
//!
//! The session is the one owner of the auth token's lifecycle. It is handed to
//! the transport at construction, so every outgoing request reads the token
//! from here and a 401 evicts it from here. Login/registration write it,
//! logout clears it.
//!
//! ## States
//!
//! - `Unauthenticated` → `Authenticated`: successful login or registration
//! - `Authenticated` → `Unauthenticated`: logout, or a 401 from any request
//!
//! There is no refresh state.

pub mod store;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::error::ClientResult;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Storage key for the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the display name shown next to the token
pub const DISPLAY_NAME_KEY: &str = "userName";

/// Whether the client currently holds a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Cloneable handle over the persisted token store
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Create a session over the given store
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a session that lives only in memory
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// The current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// The display name saved at login, if any
    pub fn display_name(&self) -> Option<String> {
        self.store.get(DISPLAY_NAME_KEY)
    }

    pub fn state(&self) -> AuthState {
        if self.token().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Persist a freshly issued token, and the display name when known
    pub fn sign_in(&self, token: &str, display_name: Option<&str>) -> ClientResult<()> {
        self.store.set(AUTH_TOKEN_KEY, token)?;
        if let Some(name) = display_name {
            self.store.set(DISPLAY_NAME_KEY, name)?;
        }
        info!("session authenticated");
        Ok(())
    }

    /// Drop the token after the server rejected it
    ///
    /// The display name is left alone.
    pub fn evict_token(&self) -> ClientResult<()> {
        self.store.remove(AUTH_TOKEN_KEY)
    }

    /// Explicit logout: forget the token and the display name
    pub fn sign_out(&self) -> ClientResult<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(DISPLAY_NAME_KEY)?;
        info!("session signed out");
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::in_memory();
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.token().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = Session::in_memory();
        session.sign_in("T", Some("Ada")).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("T"));
        assert_eq!(session.display_name().as_deref(), Some("Ada"));

        session.sign_out().unwrap();
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.display_name().is_none());
    }

    #[test]
    fn test_evict_keeps_display_name() {
        let session = Session::in_memory();
        session.sign_in("T", Some("Ada")).unwrap();
        session.evict_token().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::in_memory();
        let other = session.clone();
        session.sign_in("T", None).unwrap();
        assert_eq!(other.token().as_deref(), Some("T"));
        other.evict_token().unwrap();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let session = Session::in_memory();
        session.sign_in("secret-token", None).unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("Authenticated"));
    }
}
