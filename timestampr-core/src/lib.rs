//! Core library for timestampr.
//!
//! Finds every `NOT NULL` column of type `timestamp` in a MySQL schema and
//! makes it nullable with one `ALTER TABLE ... MODIFY COLUMN ... TIMESTAMP
//! NULL` statement per table. This is the fix-up needed for columns whose
//! implicit defaults became invalid with the MySQL 5.6 default-value changes.
//!
//! # Architecture
//! - [`config`]: `.env` loading and the explicit [`MigrationConfig`]
//! - [`adapters`]: the [`TimestampSchema`] seam and its MySQL implementation
//! - [`statement`]: pure `ALTER TABLE` generation
//! - [`report`]: status lines, progress bar and summary
//! - [`runner`]: sequencing of the stages above

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod runner;
pub mod statement;

// Re-export commonly used types
pub use adapters::{TimestampSchema, normalize_host};
pub use config::{EnvFile, MigrationConfig};
pub use error::{Result, TimestamprError};
pub use logging::init_logging;
pub use models::{RunStats, TableColumnSet};
pub use report::Reporter;
