//! The migration run: configuration, discovery, one ALTER TABLE per table,
//! summary.
//!
//! Each stage returns a [`Result`]; deciding the process exit code is left to
//! the binary.

use crate::Result;
use crate::adapters::TimestampSchema;
use crate::config::{EnvFile, MigrationConfig};
use crate::error::TimestamprError;
use crate::models::RunStats;
use crate::report::Reporter;
use crate::statement::build_alter_statement;
use std::io::Write;
use std::path::Path;

/// Loads `<dir>/.env` and resolves the run configuration.
///
/// Parse problems in the file are printed as warnings and do not stop the
/// run.
pub fn load_config<W: Write>(
    dir: &Path,
    port_arg: Option<u16>,
    reporter: &mut Reporter<W>,
) -> Result<MigrationConfig> {
    let env_file = EnvFile::load(dir)?;
    for warning in env_file.warnings() {
        reporter.warning(warning)?;
    }
    reporter.status("Found .env file")?;

    MigrationConfig::from_sources(port_arg, &env_file)
}

/// Makes every NOT NULL timestamp column in the schema nullable.
///
/// Tables are altered in alphabetical order. A failing statement aborts the
/// run; tables altered before it stay altered.
///
/// # Errors
/// - [`TimestamprError::NothingToUpdate`] if no table qualifies
/// - [`TimestamprError::QueryExecution`] if a query or statement fails
pub async fn migrate<S, W>(schema: &mut S, reporter: &mut Reporter<W>) -> Result<RunStats>
where
    S: TimestampSchema + ?Sized,
    W: Write,
{
    let tables = schema.fetch_tables().await?;
    if tables.is_empty() {
        return Err(TimestamprError::NothingToUpdate);
    }

    tracing::info!(
        "Updating {} tables in {}",
        tables.len(),
        schema.schema_name()
    );

    let mut stats = RunStats {
        tables: tables.len(),
        ..RunStats::default()
    };

    reporter.start_progress(tables.len())?;

    for table in &tables {
        let set = schema.fetch_columns(table).await?;

        if set.is_empty() {
            tracing::warn!(
                "Table '{}' no longer has NOT NULL timestamp columns, skipping",
                table
            );
        } else {
            let statement = build_alter_statement(&set)?;
            tracing::debug!("{}", statement);
            schema.execute(&statement).await?;
            tracing::info!("Altered {} columns in '{}'", set.columns.len(), table);
            stats.record(&set);
        }

        reporter.advance()?;
    }

    reporter.finish_progress()?;
    reporter.summary(&stats)?;

    Ok(stats)
}

/// Runs the whole migration against MySQL from the `.env` file in `dir`.
#[cfg(feature = "mysql")]
pub async fn run<W: Write>(
    dir: &Path,
    port_arg: Option<u16>,
    reporter: &mut Reporter<W>,
) -> Result<RunStats> {
    use crate::adapters::mysql::MySqlTimestampAdapter;

    let config = load_config(dir, port_arg, reporter)?;

    let mut adapter = MySqlTimestampAdapter::connect(&config).await?;
    reporter.status("Connected to database.")?;

    let stats = migrate(&mut adapter, reporter).await?;
    adapter.close().await?;

    Ok(stats)
}
