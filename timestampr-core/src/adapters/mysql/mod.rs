//! MySQL adapter holding a single connection for the whole run.
//!
//! # Module Structure
//! - `connection`: connect options and connection lifecycle
//! - `discovery`: `INFORMATION_SCHEMA` queries for NOT NULL timestamp columns

pub mod connection;
pub mod discovery;


use super::TimestampSchema;
use crate::Result;
use crate::error::TimestamprError;
use crate::models::TableColumnSet;
use async_trait::async_trait;
use sqlx::{Executor, MySqlConnection};

pub use connection::connect_options;

/// MySQL implementation of [`TimestampSchema`].
///
/// The connection is `None` once [`TimestampSchema::close`] has run.
pub struct MySqlTimestampAdapter {
    conn: Option<MySqlConnection>,
    database: String,
}

impl std::fmt::Debug for MySqlTimestampAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlTimestampAdapter")
            .field("database", &self.database)
            .field("connected", &self.conn.is_some())
            .finish()
    }
}

impl MySqlTimestampAdapter {
    fn connection(&mut self) -> Result<&mut MySqlConnection> {
        self.conn.as_mut().ok_or_else(|| {
            TimestamprError::configuration("MySQL connection has already been closed")
        })
    }
}

#[async_trait]
impl TimestampSchema for MySqlTimestampAdapter {
    fn schema_name(&self) -> &str {
        &self.database
    }

    async fn fetch_tables(&mut self) -> Result<Vec<String>> {
        let database = self.database.clone();
        discovery::fetch_tables(self.connection()?, &database).await
    }

    async fn fetch_columns(&mut self, table: &str) -> Result<TableColumnSet> {
        let database = self.database.clone();
        let columns = discovery::fetch_columns(self.connection()?, &database, table).await?;
        Ok(TableColumnSet::new(table, columns))
    }

    async fn execute(&mut self, statement: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(statement)
            .await
            .map_err(|e| TimestamprError::query_failed(statement, e))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            connection::close(conn).await?;
        }
        Ok(())
    }
}
