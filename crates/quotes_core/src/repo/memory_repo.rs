//! Process-local quote store.
//!
//! # Responsibility
//! - Keep quotes in an ordered map for the lifetime of the store.
//! - Mint ids from a counter owned by this store instance.
//!
//! # Invariants
//! - Counter increment and insert happen under one lock acquisition, so
//!   concurrent creates never share an id.
//! - Reads take the same lock as writes.

use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

const SEED_AUTHOR: &str = "Gandhi";
const SEED_MESSAGE: &str = "be the change!";

#[derive(Debug, Default)]
struct MemoryState {
    last_id: QuoteId,
    quotes: BTreeMap<QuoteId, Quote>,
}

impl MemoryState {
    fn insert(&mut self, quote: NewQuote) -> QuoteId {
        self.last_id += 1;
        let id = self.last_id;
        self.quotes.insert(id, quote.into_quote(id));
        id
    }
}

/// In-memory quote repository.
///
/// `all` returns quotes in ascending id order.
#[derive(Debug)]
pub struct InMemoryQuoteRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryQuoteRepository {
    /// Creates a store seeded with one default quote (id 1).
    pub fn new() -> Self {
        let mut state = MemoryState::default();
        state.insert(NewQuote::new(SEED_AUTHOR, SEED_MESSAGE));
        Self {
            state: Mutex::new(state),
        }
    }

    /// Creates a store with no quotes; the first create receives id 1.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    // `MemoryState` is consistent at every panic point, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryQuoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn create(&self, quote: &NewQuote) -> RepoResult<QuoteId> {
        quote.validate()?;

        let id = self.lock().insert(quote.clone());
        debug!("event=quote_create module=repo status=ok backend=memory id={id}");
        Ok(id)
    }

    fn all(&self) -> RepoResult<Vec<Quote>> {
        Ok(self.lock().quotes.values().cloned().collect())
    }

    fn by_id(&self, id: QuoteId) -> RepoResult<Quote> {
        self.lock()
            .quotes
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }
}
