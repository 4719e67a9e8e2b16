//! Local persistence helpers
//!
//! The backend owns all financial data. Locally we keep only small JSON
//! files (settings and the session), written atomically.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};
