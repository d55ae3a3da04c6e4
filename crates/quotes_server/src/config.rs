//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Describe every start-up knob with a flag and an environment fallback.
//! - Turn the chosen store kind into a ready `QuoteRepository`.
//!
//! # Invariants
//! - A misconfigured store fails start-up; it never surfaces per request.

use clap::{Parser, ValueEnum};
use quotes_core::{
    ConnectError, InMemoryQuoteRepository, QuoteRepository, SqliteQuoteRepository,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Quotes HTTP service
#[derive(Parser, Debug, Clone)]
#[command(name = "quotes")]
#[command(about = "Serves quotes over HTTP from a swappable store")]
#[command(version)]
pub struct Cli {
    /// Listen address
    #[arg(long, env = "QUOTES_ADDR", default_value = "localhost:8000")]
    pub addr: String,

    /// Storage backend
    #[arg(long, env = "QUOTES_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// SQLite database path (or `:memory:`), required for `--store sqlite`
    #[arg(long, env = "QUOTES_DSN")]
    pub dsn: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "QUOTES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "QUOTES_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Per-call deadline for SQLite operations, in milliseconds
    #[arg(long, env = "QUOTES_DB_TIMEOUT_MS", default_value_t = 1000)]
    pub db_timeout_ms: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-local store seeded with one quote
    Memory,
    /// SQLite `quotes` table
    Sqlite,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingDsn,
    Connect(ConnectError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDsn => write!(f, "QUOTES_DSN (or --dsn) is required for the sqlite store"),
            Self::Connect(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingDsn => None,
            Self::Connect(err) => Some(err),
        }
    }
}

impl From<ConnectError> for ConfigError {
    fn from(value: ConnectError) -> Self {
        Self::Connect(value)
    }
}

impl Cli {
    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }

    /// Builds the configured backend behind the repository trait.
    pub fn build_repository(&self) -> Result<Arc<dyn QuoteRepository>, ConfigError> {
        match self.store {
            StoreKind::Memory => Ok(Arc::new(InMemoryQuoteRepository::new())),
            StoreKind::Sqlite => {
                let dsn = self.dsn.as_deref().ok_or(ConfigError::MissingDsn)?;
                let conn = quotes_core::connect(dsn)?;
                Ok(Arc::new(SqliteQuoteRepository::with_timeout(
                    conn,
                    self.db_timeout(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, ConfigError, StoreKind};
    use clap::Parser;

    #[test]
    fn defaults_select_memory_store() {
        let cli = Cli::try_parse_from(["quotes"]).unwrap();
        assert_eq!(cli.store, StoreKind::Memory);
        assert_eq!(cli.db_timeout_ms, 1000);

        let repo = cli.build_repository().unwrap();
        assert_eq!(repo.all().unwrap().len(), 1);
    }

    #[test]
    fn sqlite_store_requires_dsn() {
        let cli = Cli::try_parse_from(["quotes", "--store", "sqlite"]).unwrap();
        let err = cli.build_repository().err().unwrap();
        assert!(matches!(err, ConfigError::MissingDsn));
    }

    #[test]
    fn sqlite_store_accepts_in_memory_dsn() {
        let cli =
            Cli::try_parse_from(["quotes", "--store", "sqlite", "--dsn", ":memory:"]).unwrap();
        let repo = cli.build_repository().unwrap();
        assert!(repo.all().unwrap().is_empty());
    }
}
