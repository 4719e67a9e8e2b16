//! Configuration module for Spendwise
//!
//! This module provides configuration management including:
//! - Platform config directory resolution
//! - User settings persistence (API origin, display preferences)

pub mod paths;
pub mod settings;

pub use paths::SpendwisePaths;
pub use settings::Settings;
