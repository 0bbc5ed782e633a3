//! MySQL connection setup and teardown.
//!
//! Exactly one connection is opened per run. Driver defaults apply for
//! connect and query timeouts.

use super::MySqlTimestampAdapter;
use crate::Result;
use crate::adapters::normalize_host;
use crate::config::MigrationConfig;
use crate::error::TimestamprError;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};

/// Character set requested for the session.
pub const CHARSET: &str = "utf8mb4";

/// Builds connect options from the run configuration, with `localhost`
/// rewritten to the loopback address.
pub fn connect_options(config: &MigrationConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(normalize_host(&config.host))
        .port(config.port)
        .username(&config.username)
        .password(config.password())
        .database(&config.database)
        .charset(CHARSET)
}

impl MySqlTimestampAdapter {
    /// Opens the connection for a migration run.
    ///
    /// # Errors
    /// Returns [`TimestamprError::Connection`] carrying the driver's message
    /// if the server cannot be reached or rejects the credentials.
    pub async fn connect(config: &MigrationConfig) -> Result<Self> {
        tracing::debug!(
            "Connecting to MySQL at {}:{}",
            normalize_host(&config.host),
            config.port
        );

        let conn = MySqlConnection::connect_with(&connect_options(config))
            .await
            .map_err(TimestamprError::connection_failed)?;

        tracing::info!("Connected to {}", config);

        Ok(Self {
            conn: Some(conn),
            database: config.database.clone(),
        })
    }
}

/// Closes a connection gracefully.
pub(super) async fn close(conn: MySqlConnection) -> Result<()> {
    conn.close()
        .await
        .map_err(|e| TimestamprError::query_failed("Failed to close MySQL connection", e))
}
