//! Quote domain model.
//!
//! # Responsibility
//! - Define canonical data structures shared by stores and the handler.
//!
//! # Invariants
//! - Validation rules live on the model, not in individual backends.

pub mod quote;
