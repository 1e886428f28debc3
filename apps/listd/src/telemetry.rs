//! Subscriber setup for the `listd` binary.
//!
//! `LISTD_LOG_FORMAT=pretty` switches to human-readable lines for local runs;
//! anything else (or unset) keeps JSON. `RUST_LOG` overrides the filter.

use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FORMAT_VAR: &str = "LISTD_LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "info,listd=info,actix_web=info,sqlx=warn,sea_orm=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    /// Read `LISTD_LOG_FORMAT`, falling back to JSON when unset or invalid.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).compact())
            .init(),
    }
}
