//! SQLite-backed quote repository.
//!
//! # Responsibility
//! - Persist quotes in the `quotes` table and let SQLite assign ids.
//! - Bound every call with a deadline and surface phase-specific errors.
//!
//! # Invariants
//! - Empty author/message are rejected before any SQL runs.
//! - The deadline hook is removed on every exit path of a call.
//! - `all` skips rows that cannot be read instead of failing the listing.

use crate::db::{connect, ConnectResult, DEFAULT_CALL_TIMEOUT};
use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::ops::Deref;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const QUOTE_INSERT_SQL: &str = "INSERT INTO quotes (author, message) VALUES (?1, ?2);";
const QUOTE_SELECT_SQL: &str = "SELECT id, author, message FROM quotes";

// VM instructions between deadline checks.
const DEADLINE_CHECK_OPS: i32 = 100;

/// SQLite-backed quote repository.
///
/// Owns a single connection; calls are serialised through a mutex and each
/// one is interrupted once `call_timeout` has elapsed.
pub struct SqliteQuoteRepository {
    conn: Mutex<Connection>,
    call_timeout: Duration,
}

impl SqliteQuoteRepository {
    /// Wraps an already bootstrapped connection (see `crate::db`).
    pub fn new(conn: Connection) -> Self {
        Self::with_timeout(conn, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(conn: Connection, call_timeout: Duration) -> Self {
        Self {
            conn: Mutex::new(conn),
            call_timeout,
        }
    }

    /// Connects to `dsn` and wraps the resulting handle.
    pub fn connect(dsn: &str) -> ConnectResult<Self> {
        connect(dsn).map(Self::new)
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    fn begin_call(&self) -> DeadlineGuard<'_> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        DeadlineGuard::arm(conn, self.call_timeout)
    }

    fn wrap(&self, err: rusqlite::Error, phase: fn(rusqlite::Error) -> RepoError) -> RepoError {
        if err.sqlite_error_code() == Some(ErrorCode::OperationInterrupted) {
            return RepoError::Timeout(self.call_timeout);
        }
        phase(err)
    }
}

impl QuoteRepository for SqliteQuoteRepository {
    fn create(&self, quote: &NewQuote) -> RepoResult<QuoteId> {
        if quote.author.is_empty() {
            return Err(RepoError::NoAuthor);
        }
        if quote.message.is_empty() {
            return Err(RepoError::NoMessage);
        }

        let conn = self.begin_call();
        let mut stmt = conn
            .prepare(QUOTE_INSERT_SQL)
            .map_err(|err| self.wrap(err, RepoError::Prepare))?;
        stmt.execute(params![quote.author.as_str(), quote.message.as_str()])
            .map_err(|err| self.wrap(err, RepoError::Insert))?;

        let id = conn.last_insert_rowid();
        debug!("event=quote_create module=repo status=ok backend=sqlite id={id}");
        Ok(id)
    }

    fn all(&self) -> RepoResult<Vec<Quote>> {
        let conn = self.begin_call();
        let mut stmt = conn
            .prepare(&format!("{QUOTE_SELECT_SQL} ORDER BY id;"))
            .map_err(|err| self.wrap(err, RepoError::Prepare))?;
        let mut rows = stmt
            .query([])
            .map_err(|err| self.wrap(err, RepoError::Query))?;

        let mut quotes = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|err| self.wrap(err, RepoError::Query))?
        {
            match parse_quote_row(row) {
                Ok(quote) => quotes.push(quote),
                Err(err) => warn!(
                    "event=quote_list module=repo status=skip backend=sqlite error={}",
                    RepoError::Scan(err)
                ),
            }
        }

        Ok(quotes)
    }

    fn by_id(&self, id: QuoteId) -> RepoResult<Quote> {
        let conn = self.begin_call();
        let mut stmt = conn
            .prepare(&format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"))
            .map_err(|err| self.wrap(err, RepoError::Prepare))?;
        let mut rows = stmt
            .query([id])
            .map_err(|err| self.wrap(err, RepoError::Query))?;

        let row = rows
            .next()
            .map_err(|err| self.wrap(err, RepoError::Query))?
            .ok_or(RepoError::NotFound(id))?;
        let quote = parse_quote_row(row).map_err(|err| self.wrap(err, RepoError::Scan))?;
        Ok(quote)
    }
}

fn parse_quote_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    Ok(Quote {
        id: row.get(0)?,
        author: row.get(1)?,
        message: row.get(2)?,
    })
}

/// Holds the connection for one call with a deadline progress handler
/// installed; dropping it removes the handler and releases the lock.
struct DeadlineGuard<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> DeadlineGuard<'a> {
    fn arm(conn: MutexGuard<'a, Connection>, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        conn.progress_handler(
            DEADLINE_CHECK_OPS,
            Some(move || Instant::now() >= deadline),
        );
        Self { conn }
    }
}

impl Deref for DeadlineGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}
