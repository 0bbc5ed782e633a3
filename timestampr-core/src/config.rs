//! Run configuration built from the `.env` file and process environment.
//!
//! The configuration is resolved once at startup into a [`MigrationConfig`]
//! and handed to the components that need it. Nothing downstream reads the
//! environment.

use crate::Result;
use crate::error::TimestamprError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Name of the environment file expected in the working directory.
pub const ENV_FILE_NAME: &str = ".env";

/// MySQL default port, used when neither the CLI nor `DB_PORT` set one.
pub const DEFAULT_PORT: u16 = 3306;

/// Database host; `localhost` is rewritten to the loopback address.
pub const DB_HOST: &str = "DB_HOST";
/// Optional database port.
pub const DB_PORT: &str = "DB_PORT";
/// Database user.
pub const DB_USERNAME: &str = "DB_USERNAME";
/// Database password.
pub const DB_PASSWORD: &str = "DB_PASSWORD";
/// Schema whose timestamp columns are updated.
pub const DB_DATABASE: &str = "DB_DATABASE";

/// Key/value pairs parsed from a `.env` file.
///
/// Lines that fail to parse are kept as warnings instead of aborting the
/// load.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    path: PathBuf,
    values: HashMap<String, String>,
    warnings: Vec<String>,
}

impl EnvFile {
    /// Loads `<dir>/.env`.
    ///
    /// # Errors
    /// Returns [`TimestamprError::ConfigFileMissing`] if the file does not
    /// exist. Unreadable or malformed content is reported through
    /// [`EnvFile::warnings`].
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(ENV_FILE_NAME);
        if !path.is_file() {
            return Err(TimestamprError::ConfigFileMissing { path });
        }

        let mut env_file = Self {
            path,
            ..Self::default()
        };

        match dotenvy::from_path_iter(&env_file.path) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok((key, value)) => {
                            env_file.values.insert(key, value);
                        }
                        Err(e) => env_file.warnings.push(describe_parse_error(&e)),
                    }
                }
            }
            Err(e) => env_file.warnings.push(describe_parse_error(&e)),
        }

        for warning in &env_file.warnings {
            tracing::debug!("{}: {}", env_file.path().display(), warning);
        }

        Ok(env_file)
    }

    /// Path the file was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value for `key` as written in the file.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse problems encountered while loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Resolved connection settings for one migration run.
///
/// The password lives in a [`Zeroizing`] buffer and is left out of both
/// `Debug` and `Display`.
#[derive(Clone)]
pub struct MigrationConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    password: Zeroizing<String>,
    pub database: String,
}

impl std::fmt::Debug for MigrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for MigrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

impl MigrationConfig {
    /// Builds the configuration from the process environment, falling back
    /// to values from `env_file`. Variables already set in the environment
    /// take precedence over the file.
    pub fn from_sources(port_arg: Option<u16>, env_file: &EnvFile) -> Result<Self> {
        Self::resolve(port_arg, |key| {
            std::env::var(key)
                .ok()
                .or_else(|| env_file.get(key).map(str::to_string))
        })
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Port precedence is `port_arg`, then a non-empty `DB_PORT`, then
    /// [`DEFAULT_PORT`].
    ///
    /// # Errors
    /// - [`TimestamprError::MissingCredentials`] if host, username, password
    ///   or database is unset or empty
    /// - [`TimestamprError::Configuration`] if `DB_PORT` is not a valid port
    pub fn resolve<F>(port_arg: Option<u16>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str, missing: &mut Vec<&'static str>| {
            let value = lookup(key).filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let mut missing = Vec::new();
        let host = required(DB_HOST, &mut missing);
        let username = required(DB_USERNAME, &mut missing);
        let password = Zeroizing::new(required(DB_PASSWORD, &mut missing));
        let database = required(DB_DATABASE, &mut missing);

        if !missing.is_empty() {
            tracing::debug!("Missing database parameters: {}", missing.join(", "));
            return Err(TimestamprError::MissingCredentials { missing });
        }

        let port = match port_arg {
            Some(port) => port,
            None => match lookup(DB_PORT).filter(|v| !v.is_empty()) {
                Some(raw) => parse_port(&raw)?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Self {
            host,
            port,
            username,
            password,
            database,
        })
    }

    /// The database password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Describes a `.env` problem without echoing the offending line, which may
/// hold a secret. Only the key in front of `=` and the position are kept.
fn describe_parse_error(error: &dotenvy::Error) -> String {
    match error {
        dotenvy::Error::LineParse(line, index) => {
            let key = line
                .split_once('=')
                .map(|(key, _)| key.trim().trim_start_matches("export ").trim())
                .filter(|key| {
                    !key.is_empty()
                        && key
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                });
            match key {
                Some(key) => format!("Error parsing line for '{}' at index {}", key, index),
                None => format!("Error parsing line at index {}", index),
            }
        }
        other => other.to_string(),
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(TimestamprError::configuration(format!(
            "{} must be a port number between 1 and 65535, got '{}'",
            DB_PORT, raw
        ))),
    }
}
