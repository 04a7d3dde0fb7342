//! `stockplan-core`: shared building blocks.
//!
//! This crate contains **pure** primitives (no IO, no logging setup) shared by
//! the inventory and allocation crates.

pub mod error;
pub mod id;
pub mod quantity;

pub use error::{DomainError, DomainResult};
pub use id::RunId;
pub use quantity::{clamp_non_negative, is_valid_quantity};
