//! User and authentication payloads
//!
//! Password-bearing payloads are wiped from memory on drop and never print
//! their password through `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Registration payload: `{name, email, password}`
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login payload; serializes to exactly `{email, password}`
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Public profile embedded in auth responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of a successful login or registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthPayload {
    /// Name to greet the user with: `user.name`, else top-level `name`
    pub fn display_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .or(self.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_body_has_only_email_and_password() {
        let body = serde_json::to_value(Credentials::new("a@b.com", "secret1")).unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "password": "secret1"}));
    }

    #[test]
    fn test_new_user_body() {
        let body = serde_json::to_value(NewUser::new("Ada", "a@b.com", "secret1")).unwrap();
        assert_eq!(
            body,
            json!({"name": "Ada", "email": "a@b.com", "password": "secret1"})
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("a@b.com", "hunter22"));
        assert!(!debug.contains("hunter22"));
        let debug = format!("{:?}", NewUser::new("Ada", "a@b.com", "hunter22"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_zeroize_clears_password() {
        let mut creds = Credentials::new("a@b.com", "secret1");
        creds.zeroize();
        assert!(creds.password.is_empty());
    }

    #[test]
    fn test_payload_display_name() {
        let nested: AuthPayload =
            serde_json::from_value(json!({"token": "T", "user": {"name": "Ada"}})).unwrap();
        assert_eq!(nested.display_name(), Some("Ada"));

        let flat: AuthPayload = serde_json::from_value(json!({"token": "T", "name": "Bo"})).unwrap();
        assert_eq!(flat.display_name(), Some("Bo"));

        let bare: AuthPayload = serde_json::from_value(json!({"message": "ok"})).unwrap();
        assert!(bare.token.is_none());
        assert!(bare.display_name().is_none());
    }
}
