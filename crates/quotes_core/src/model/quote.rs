//! Quote domain model.
//!
//! # Responsibility
//! - Define the persisted `Quote` record and its creation payload.
//! - Provide the non-empty field validation shared by handler and stores.
//!
//! # Invariants
//! - `id` is assigned by a repository and never changes afterwards.
//! - A persisted quote always has non-empty `author` and `message`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned quote identifier.
pub type QuoteId = i64;

/// Persisted quote.
///
/// Field order is the JSON key order: `id`, `author`, `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub author: String,
    pub message: String,
}

/// Creation payload decoded from a client request.
///
/// Missing keys decode as empty strings so that validation, not the JSON
/// decoder, reports which field is absent. Unknown keys (including a
/// client-supplied `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewQuote {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub message: String,
}

/// Client-facing validation failure for quote content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    MissingAuthorAndMessage,
    MissingAuthor,
    MissingMessage,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthorAndMessage => {
                write!(f, "please provide both an author and a message")
            }
            Self::MissingAuthor => write!(f, "please provide an author"),
            Self::MissingMessage => write!(f, "please provide a message"),
        }
    }
}

impl Error for QuoteValidationError {}

impl NewQuote {
    pub fn new(author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            message: message.into(),
        }
    }

    /// Checks the non-empty rules in priority order; the first match wins.
    ///
    /// Whitespace counts as content: no trimming is applied.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        match (self.author.is_empty(), self.message.is_empty()) {
            (true, true) => Err(QuoteValidationError::MissingAuthorAndMessage),
            (true, false) => Err(QuoteValidationError::MissingAuthor),
            (false, true) => Err(QuoteValidationError::MissingMessage),
            (false, false) => Ok(()),
        }
    }

    /// Binds this payload to a store-assigned id.
    pub fn into_quote(self, id: QuoteId) -> Quote {
        Quote {
            id,
            author: self.author,
            message: self.message,
        }
    }
}
