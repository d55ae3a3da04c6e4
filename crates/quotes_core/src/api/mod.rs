//! HTTP-facing request handling, independent of any server runtime.
//!
//! # Responsibility
//! - Translate method/path/body triples into repository calls.
//! - Produce status codes and JSON bodies for the transport layer to send.

pub mod handler;
