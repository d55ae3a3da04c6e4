//! Quote repository contract and error taxonomy.
//!
//! # Responsibility
//! - Define the three-operation capability every quote backend implements.
//! - Keep storage failures distinguishable from semantic outcomes.
//!
//! # Invariants
//! - Only a repository assigns `Quote::id`.
//! - `NotFound` is a semantic outcome and is never wrapped in a backend error.

use crate::model::quote::{NewQuote, Quote, QuoteId, QuoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Content rejected by `NewQuote::validate`.
    Validation(QuoteValidationError),
    /// Relational create called with an empty author.
    NoAuthor,
    /// Relational create called with an empty message.
    NoMessage,
    NotFound(QuoteId),
    /// Statement could not be prepared.
    Prepare(rusqlite::Error),
    /// Insert statement failed to execute.
    Insert(rusqlite::Error),
    /// Select statement failed to execute or step.
    Query(rusqlite::Error),
    /// A row could not be read into a `Quote`.
    Scan(rusqlite::Error),
    /// The call ran past its deadline and was interrupted.
    Timeout(Duration),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoAuthor => write!(f, "must provide author"),
            Self::NoMessage => write!(f, "must provide message"),
            Self::NotFound(_) => write!(f, "couldn't find quote matching that id"),
            Self::Prepare(err) => write!(f, "couldn't prepare statement: {err}"),
            Self::Insert(err) => write!(f, "couldn't add quote to DB: {err}"),
            Self::Query(err) => write!(f, "couldn't get rows: {err}"),
            Self::Scan(err) => write!(f, "couldn't scan row into quote: {err}"),
            Self::Timeout(limit) => {
                write!(f, "database call exceeded {}ms deadline", limit.as_millis())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Prepare(err) | Self::Insert(err) | Self::Query(err) | Self::Scan(err) => {
                Some(err)
            }
            Self::NoAuthor | Self::NoMessage | Self::NotFound(_) | Self::Timeout(_) => None,
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Storage capability for quotes.
///
/// Implementations must be shareable across request workers; the handler
/// only ever sees this trait, never a concrete backend.
pub trait QuoteRepository: Send + Sync {
    /// Persists `quote` under a fresh id and returns that id.
    fn create(&self, quote: &NewQuote) -> RepoResult<QuoteId>;
    /// Returns every persisted quote. Order is backend-defined.
    fn all(&self) -> RepoResult<Vec<Quote>>;
    /// Returns the quote with `id` or `RepoError::NotFound`.
    fn by_id(&self, id: QuoteId) -> RepoResult<Quote>;
}
