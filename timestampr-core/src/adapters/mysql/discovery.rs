//! `INFORMATION_SCHEMA` queries for NOT NULL timestamp columns.

use crate::Result;
use crate::error::TimestamprError;
use sqlx::MySqlConnection;

// Cast to CHAR to avoid VARBINARY type issues in MySQL 8.0+
pub(crate) const TABLES_QUERY: &str = r#"
    SELECT DISTINCT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ?
    AND DATA_TYPE = 'timestamp'
    AND IS_NULLABLE = 'NO'
    ORDER BY TABLE_NAME
"#;

pub(crate) const COLUMNS_QUERY: &str = r#"
    SELECT CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ?
    AND TABLE_NAME = ?
    AND DATA_TYPE = 'timestamp'
    AND IS_NULLABLE = 'NO'
    ORDER BY ORDINAL_POSITION
"#;

/// Tables in `db_name` with at least one NOT NULL timestamp column.
pub async fn fetch_tables(conn: &mut MySqlConnection, db_name: &str) -> Result<Vec<String>> {
    tracing::debug!("Enumerating tables with NOT NULL timestamp columns in {}", db_name);

    let tables: Vec<String> = sqlx::query_scalar(TABLES_QUERY)
        .bind(db_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| TimestamprError::query_failed("Failed to enumerate tables", e))?;

    tracing::debug!("Found {} tables", tables.len());
    Ok(tables)
}

/// NOT NULL timestamp columns of one table, in declaration order.
pub async fn fetch_columns(
    conn: &mut MySqlConnection,
    db_name: &str,
    table: &str,
) -> Result<Vec<String>> {
    sqlx::query_scalar(COLUMNS_QUERY)
        .bind(db_name)
        .bind(table)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            TimestamprError::query_failed(format!("Failed to fetch columns for '{}'", table), e)
        })
}
