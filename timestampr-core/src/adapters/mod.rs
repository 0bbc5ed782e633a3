//! Database access behind the migration runner.
//!
//! The runner only talks to a [`TimestampSchema`], so it can be driven by
//! the MySQL adapter in production and by an in-memory double in tests.
//!
//! # Module Structure
//! - `mysql`: single-connection MySQL implementation (feature `mysql`)

#[cfg(feature = "mysql")]
pub mod mysql;

use crate::Result;
use crate::models::TableColumnSet;
use async_trait::async_trait;

/// Loopback address used in place of `localhost`.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// Rewrites the literal host `localhost` to [`LOOPBACK_ADDRESS`]; any other
/// value, including other spellings, is returned unchanged.
pub fn normalize_host(host: &str) -> &str {
    if host == "localhost" {
        LOOPBACK_ADDRESS
    } else {
        host
    }
}

/// Discovery and DDL operations the runner needs from a database.
#[async_trait]
pub trait TimestampSchema: Send {
    /// Schema (database) being migrated
    fn schema_name(&self) -> &str;

    /// Distinct names of tables with at least one NOT NULL timestamp column,
    /// in alphabetical order.
    async fn fetch_tables(&mut self) -> Result<Vec<String>>;

    /// NOT NULL timestamp columns of `table`, by ordinal position.
    async fn fetch_columns(&mut self, table: &str) -> Result<TableColumnSet>;

    /// Executes a DDL statement as-is. No transaction is opened.
    async fn execute(&mut self, statement: &str) -> Result<()>;

    /// Releases the underlying connection. Later calls fail.
    async fn close(&mut self) -> Result<()>;
}
