//! HTTP transport for the quotes service.
//!
//! # Responsibility
//! - Parse start-up configuration and build the selected store.
//! - Feed every request, on any path and method, into `QuoteHandler`.

pub mod config;
pub mod router;

pub use config::{Cli, ConfigError, StoreKind};
pub use router::router;
