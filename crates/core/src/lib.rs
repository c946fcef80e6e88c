//! `cataloger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory values and
//! the item-entry form (no UI, no platform concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::SessionId;
pub use value_object::ValueObject;
