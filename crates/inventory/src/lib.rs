//! Inventory domain values.
//!
//! This crate contains the immutable records produced by item entry, implemented purely
//! as deterministic domain logic (no IO, no UI, no storage).

pub mod date;
pub mod item;
pub mod price;
pub mod tag;

pub use date::PurchaseDate;
pub use item::{Item, ItemParts, limits};
pub use price::Price;
pub use tag::{Tag, TagSet};
