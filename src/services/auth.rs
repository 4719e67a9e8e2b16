//! User/Auth client
//!
//! Registration and login go through the same transport as every other
//! request. A token issued by either is written to the session, which makes
//! every later request carry it.

use tracing::{info, warn};

use crate::error::{ApiError, ClientError};
use crate::models::{AuthPayload, Credentials, NewUser};
use crate::session::Session;
use crate::transport::{ApiResponse, Transport};

const REGISTER_PATH: &str = "/api/register";
const LOGIN_PATH: &str = "/api/login";

const REGISTER_FAILED: &str = "User creation failed";
const LOGIN_FAILED: &str = "Login failed";

/// Client for registration, login and logout
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn session(&self) -> &Session {
        self.transport.session()
    }

    /// `POST /api/register` with `{name, email, password}`
    ///
    /// A token in the response body signs the session in.
    pub async fn register(&self, user: &NewUser) -> Result<ApiResponse, ApiError> {
        let response = self
            .transport
            .post(REGISTER_PATH, user)
            .await
            .map_err(|e| ApiError::normalize(REGISTER_FAILED, e))?;

        // Registration does not have to answer with a body we understand.
        if let Ok(payload) = response.json::<AuthPayload>() {
            self.persist(&payload, REGISTER_FAILED, response.status)?;
        }
        info!("registered new user");
        Ok(response)
    }

    /// `POST /api/login` with exactly `{email, password}`
    ///
    /// On success the returned token is persisted before the full response is
    /// handed back. A body without a token is returned as is.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        let response = self
            .transport
            .post(LOGIN_PATH, credentials)
            .await
            .map_err(|e| ApiError::normalize(LOGIN_FAILED, e))?;

        let payload: AuthPayload = response
            .json()
            .map_err(|e| ApiError::decode(LOGIN_FAILED, response.status, e))?;
        if payload.token.is_none() {
            warn!("login succeeded without a token");
        }
        self.persist(&payload, LOGIN_FAILED, response.status)?;
        Ok(response)
    }

    /// Forget the token and display name; no request is made
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().sign_out()
    }

    fn persist(&self, payload: &AuthPayload, prefix: &str, status: u16) -> Result<(), ApiError> {
        let Some(token) = payload.token.as_deref() else {
            return Ok(());
        };
        self.session()
            .sign_in(token, payload.display_name())
            .map_err(|e| ApiError::local(prefix, status, &e))
    }
}
