//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the quote storage contract consumed by the request handler.
//! - Provide interchangeable in-memory and SQLite backends.
//!
//! # Invariants
//! - Repository writes reject empty author/message even when the caller
//!   already validated.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod memory_repo;
pub mod quote_repo;
pub mod sqlite_repo;
