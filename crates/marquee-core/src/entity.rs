//! The entity contract shared by everything the generic store can hold.

use std::fmt;

/// A stored record with a unique identifier of a fixed type.
///
/// The id is immutable once assigned and unique within its entity kind.
/// `Display` on the id is required so stores can report lookups that
/// failed without knowing the concrete key type.
pub trait Identifiable {
  type Id: Clone + Eq + fmt::Display;

  fn id(&self) -> Self::Id;
}
