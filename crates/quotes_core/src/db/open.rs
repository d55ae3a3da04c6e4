//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a data source name.
//! - Ping the handle before handing it out.
//! - Create the `quotes` table when it is missing.
//!
//! # Invariants
//! - Returned connections have answered a liveness query.
//! - Returned connections have a busy timeout of `DEFAULT_CALL_TIMEOUT`.

use super::{ConnectError, ConnectResult, DEFAULT_CALL_TIMEOUT};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Opens the SQLite database named by `dsn` (a file path or `:memory:`).
///
/// # Errors
/// - `ConnectError::Open` when the handle cannot be opened.
/// - `ConnectError::Ping` when the file is not a usable database.
/// - `ConnectError::Schema` when the `quotes` table cannot be created.
///
/// # Side effects
/// - Emits `db_connect` logging events with duration and status.
pub fn connect(dsn: &str) -> ConnectResult<Connection> {
    establish("file", || Connection::open(dsn))
}

/// Opens a private in-memory SQLite database with the `quotes` table ready.
pub fn connect_in_memory() -> ConnectResult<Connection> {
    establish("memory", Connection::open_in_memory)
}

fn establish<F>(mode: &str, open: F) -> ConnectResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_connect module=db status=start mode={mode}");

    let result = open()
        .map_err(ConnectError::Open)
        .and_then(|conn| bootstrap_connection(&conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_connect module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_connect module=db status=error mode={mode} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }

    result
}

fn bootstrap_connection(conn: &Connection) -> ConnectResult<()> {
    ping(conn)?;
    conn.busy_timeout(DEFAULT_CALL_TIMEOUT)
        .map_err(ConnectError::Ping)?;
    conn.execute_batch(SCHEMA_SQL)
        .map_err(ConnectError::Schema)?;
    Ok(())
}

// Reading sqlite_master forces SQLite to parse the file header.
fn ping(conn: &Connection) -> ConnectResult<()> {
    conn.query_row("SELECT count(*) FROM sqlite_master;", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|_| ())
    .map_err(ConnectError::Ping)
}

fn error_code(err: &ConnectError) -> &'static str {
    match err {
        ConnectError::Open(_) => "db_open_failed",
        ConnectError::Ping(_) => "db_ping_failed",
        ConnectError::Schema(_) => "db_schema_failed",
    }
}
