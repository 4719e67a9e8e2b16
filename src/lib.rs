//! Spendwise - terminal client for a personal-finance API
//!
//! This library talks to the Spendwise backend: users register or log in,
//! define spending categories, record expenses against them and set monthly
//! budgets per category. Reports are aggregated locally from fetched lists.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types, including the normalized [`ApiError`]
//! - `storage`: Atomic JSON file helpers
//! - `session`: Authentication state and the persisted token store
//! - `transport`: The one configured HTTP client (bearer injection, 401 eviction)
//! - `models`: Wire entities and request payloads
//! - `services`: Resource clients (categories, expenses, budgets, auth)
//! - `reports`: Spending and budget overview reports
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `spendwise` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise_cli::{Session, SpendwiseClient};
//! use spendwise_cli::models::Credentials;
//!
//! let client = SpendwiseClient::new("http://localhost:8000", Session::in_memory())?;
//! client.auth().login(&Credentials::new("a@b.com", "secret1")).await?;
//! let expenses = client.expenses().fetch_all().await?;
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;
pub mod transport;

pub use client::SpendwiseClient;
pub use error::{ApiError, ClientError, ClientResult};
pub use session::{AuthState, Session};
pub use transport::{ApiResponse, Transport};
