//! Core domain logic for the quotes service.
//! This crate owns the quote invariants, the storage contract and its
//! backends, and the request handler that the HTTP server delegates to.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use api::handler::{QuoteHandler, QuoteResponse, JSON_CONTENT_TYPE};
pub use db::{connect, connect_in_memory, ConnectError, DEFAULT_CALL_TIMEOUT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{NewQuote, Quote, QuoteId, QuoteValidationError};
pub use repo::memory_repo::InMemoryQuoteRepository;
pub use repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
pub use repo::sqlite_repo::SqliteQuoteRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
