//! Timestamp column migration tool.
//!
//! Reads database settings from `.env` in the working directory, connects
//! to MySQL, and makes every `NOT NULL` timestamp column in the configured
//! schema nullable.
//!
//! Exit status is 0 on success and 1 otherwise, including when there is
//! nothing to update.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use timestampr_core::{
    Reporter, TimestamprError, init_logging,
    logging::LOG_ENV_VAR,
    runner,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "timestampr")]
#[command(
    about = "Updates timestamp columns with invalid default values based on the mysql 5.6 changes."
)]
#[command(version)]
#[command(long_about = "
This command will update all timestamp columns that has an invalid default value in your database

Every NOT NULL column of type TIMESTAMP in DB_DATABASE is changed with
ALTER TABLE ... MODIFY COLUMN ... TIMESTAMP NULL, one statement per table.

CONFIGURATION (.env in the working directory, required):
  DB_HOST       Database host (localhost is rewritten to 127.0.0.1)
  DB_PORT       Database port (default 3306, overridden by the PORT argument)
  DB_USERNAME   Database user
  DB_PASSWORD   Database password
  DB_DATABASE   Schema to update

Set TIMESTAMPR_LOG (e.g. TIMESTAMPR_LOG=debug) for diagnostic logs on stderr.

EXAMPLES:
  timestampr
  timestampr 3307
")]
struct Cli {
    /// Port for database connection
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(std::env::var(LOG_ENV_VAR).ok().as_deref()) {
        eprintln!("{e}");
        return ExitCode::from(e.exit_code());
    }

    let mut reporter = Reporter::new(std::io::stdout());

    match runner::run(Path::new("."), cli.port, &mut reporter).await {
        Ok(stats) => {
            info!("✓ {stats}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&mut reporter, &e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn report_failure(reporter: &mut Reporter<std::io::Stdout>, e: &TimestamprError) {
    if !e.is_informational() {
        debug!("Migration failed: {e:?}");
    }
    if let Err(write_error) = reporter.failure(e) {
        eprintln!("{e}");
        eprintln!("{write_error}");
    }
}
