//! Database connection settings.
//!
//! `Config` is a plain carrier: nothing here validates host names or
//! credentials. Bad values surface when the connection is opened.

use std::env;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::AppError;

pub const DEFAULT_DB_USER: &str = "listd";
pub const DEFAULT_DB_PASS: &str = "listd";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "listd";
pub const DEFAULT_TEST_DB_NAME: &str = "listd_test";

/// Characters escaped in the userinfo part of a connection URL.
const USERINFO: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'@')
    .add(b':')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'[')
    .add(b']');

/// Which database engine the connection targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL server reachable at host/port
    Postgres,
    /// Private, ephemeral SQLite database living in the process
    SqliteMemory,
}

impl DbKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteMemory => "sqlite-memory",
        }
    }

    /// Ephemeral databases start empty and need their schema applied on connect.
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, DbKind::SqliteMemory)
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected 'postgres' or 'sqlite-memory')"
            ))),
        }
    }
}

/// Connection parameters handed to the connection factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_user: String,
    pub db_pass: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_kind: DbKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_user: DEFAULT_DB_USER.to_string(),
            db_pass: DEFAULT_DB_PASS.to_string(),
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_name: DEFAULT_DB_NAME.to_string(),
            db_kind: DbKind::Postgres,
        }
    }
}

impl Config {
    /// Defaults overlaid with `LISTD_DB_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            db_user: var_or("LISTD_DB_USER", defaults.db_user),
            db_pass: var_or("LISTD_DB_PASSWORD", defaults.db_pass),
            db_host: var_or("LISTD_DB_HOST", defaults.db_host),
            db_port: parsed_var_or("LISTD_DB_PORT", defaults.db_port)?,
            db_name: var_or("LISTD_DB_NAME", defaults.db_name),
            db_kind: parsed_var_or("LISTD_DB_KIND", defaults.db_kind)?,
        })
    }

    /// Settings for the test harness.
    ///
    /// Connection fields come from [`Config::from_env`]; the database name
    /// comes from `TEST_DB_NAME` and the engine from `TEST_DB_KIND`, which
    /// defaults to an in-memory SQLite database so tests need no server.
    pub fn for_tests() -> Result<Self, AppError> {
        let base = Self::from_env()?;
        Ok(Self {
            db_name: var_or("TEST_DB_NAME", DEFAULT_TEST_DB_NAME.to_string()),
            db_kind: parsed_var_or("TEST_DB_KIND", DbKind::SqliteMemory)?,
            ..base
        })
    }

    /// Connection URL for this configuration.
    pub fn database_url(&self) -> String {
        match self.db_kind {
            DbKind::Postgres => format!(
                "postgresql://{}:{}@{}:{}/{}",
                utf8_percent_encode(&self.db_user, USERINFO),
                utf8_percent_encode(&self.db_pass, USERINFO),
                self.db_host,
                self.db_port,
                self.db_name
            ),
            DbKind::SqliteMemory => "sqlite::memory:".to_string(),
        }
    }
}

/// Mask the password of a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host_part)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host_part}"),
        None => url.to_string(),
    }
}

fn var_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn parsed_var_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::config(format!("Invalid value '{raw}' for {name}"))),
        Err(_) => Ok(default),
    }
}
