//! Error types for the timestamp migration run.
//!
//! Every stage of the run returns one of these instead of terminating the
//! process. The binary maps them to an exit code with
//! [`TimestamprError::exit_code`]. Messages never contain the database
//! password.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for timestampr operations.
#[derive(Debug, Error)]
pub enum TimestamprError {
    /// The `.env` file does not exist in the working directory
    #[error("No .env file found. Aborting...")]
    ConfigFileMissing { path: PathBuf },

    /// One of the required `DB_*` variables is unset or empty
    #[error("Missing required database parameters")]
    MissingCredentials { missing: Vec<&'static str> },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Database connection failed; `context` carries the driver message
    #[error("{context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No table in the schema has a NOT NULL timestamp column
    #[error("No tables needs updating.")]
    NothingToUpdate,

    /// A discovery query or an ALTER TABLE statement failed
    #[error("Query execution failed: {context}")]
    QueryExecution {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing console output failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// An ALTER TABLE statement was requested for a table with no columns
    #[error("Cannot build ALTER TABLE for '{table}': no columns given")]
    Statement { table: String },
}

/// Convenience type alias for Results with TimestamprError
pub type Result<T> = std::result::Result<T, TimestamprError>;

impl TimestamprError {
    /// Creates a connection error that reports the driver's own message
    pub fn connection_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: error.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a query execution error with context
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QueryExecution {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Process exit status for this error.
    ///
    /// "Nothing to update" shares status 1 with real failures; callers that
    /// script around the tool cannot tell them apart by status alone.
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Whether this is an informational outcome rather than a failure.
    pub const fn is_informational(&self) -> bool {
        matches!(self, Self::NothingToUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = [
            TimestamprError::ConfigFileMissing {
                path: PathBuf::from(".env"),
            },
            TimestamprError::MissingCredentials {
                missing: vec!["DB_HOST"],
            },
            TimestamprError::configuration("bad port"),
            TimestamprError::connection_failed(std::io::Error::other("refused")),
            TimestamprError::NothingToUpdate,
            TimestamprError::query_failed("ALTER TABLE", std::io::Error::other("boom")),
            TimestamprError::Statement {
                table: "orders".to_string(),
            },
            TimestamprError::io("stdout", std::io::Error::other("closed")),
        ];

        for error in &errors {
            assert_eq!(error.exit_code(), 1, "unexpected exit code for {error}");
        }
    }

    #[test]
    fn test_connection_error_shows_driver_message() {
        let error = TimestamprError::connection_failed(std::io::Error::other(
            "Access denied for user 'app'@'127.0.0.1'",
        ));
        assert_eq!(
            error.to_string(),
            "Access denied for user 'app'@'127.0.0.1'"
        );
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            TimestamprError::NothingToUpdate.to_string(),
            "No tables needs updating."
        );
        assert_eq!(
            TimestamprError::MissingCredentials { missing: vec![] }.to_string(),
            "Missing required database parameters"
        );
        assert_eq!(
            TimestamprError::ConfigFileMissing {
                path: PathBuf::from(".env")
            }
            .to_string(),
            "No .env file found. Aborting..."
        );
        assert!(TimestamprError::NothingToUpdate.is_informational());
        assert!(!TimestamprError::configuration("x").is_informational());
    }
}
