//! SQLite connection bootstrap for the relational quote store.
//!
//! # Responsibility
//! - Open SQLite handles from a data source name and verify they are live.
//! - Ensure the `quotes` table exists before a store uses the handle.
//!
//! # Invariants
//! - Connection failures are start-up errors; they never reach a request.
//! - Open and liveness failures stay distinguishable to callers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod open;

pub use open::{connect, connect_in_memory};

/// Upper bound for a single store call against SQLite.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(1);

pub type ConnectResult<T> = Result<T, ConnectError>;

#[derive(Debug)]
pub enum ConnectError {
    /// The handle could not be opened at all.
    Open(rusqlite::Error),
    /// The handle opened but the database did not answer a liveness query.
    Ping(rusqlite::Error),
    /// The `quotes` table could not be created.
    Schema(rusqlite::Error),
}

impl Display for ConnectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "couldn't connect to RDBMS: {err}"),
            Self::Ping(err) => write!(f, "couldn't connect to database: {err}"),
            Self::Schema(err) => write!(f, "couldn't prepare quotes table: {err}"),
        }
    }
}

impl Error for ConnectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Ping(err) | Self::Schema(err) => Some(err),
        }
    }
}
