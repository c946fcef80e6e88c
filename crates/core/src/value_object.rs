//! Value object trait: equality by value, not identity.
//!
//! Everything the item-entry form produces is a value object: an `Item` has no identity
//! of its own until the host persists it, and two tags are the same tag when their text
//! matches case-insensitively.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one, build a
/// new one. The form relies on this: once an `Item` is handed to the host, nothing in
/// the form can change it.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Price { cents: u64 }
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
