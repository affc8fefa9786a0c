//! The item trait shared by every chat-list component.
//!
//! A conversation list is keyed: each row carries a stable identifier that
//! survives payload edits, and the diff engine, transition controller, and
//! orchestrator all reconcile snapshots by that identifier rather than by
//! value equality. Two snapshots containing the same id with different
//! payloads describe an edit-in-place, not a removal plus an insertion.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_chatlist::item::Item;
//! use std::fmt::Display;
//!
//! #[derive(Clone)]
//! struct Conversation {
//!     id: u64,
//!     title: String,
//!     last_message: String,
//! }
//!
//! impl Display for Conversation {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{}", self.title)
//!     }
//! }
//!
//! impl Item for Conversation {
//!     type Id = u64;
//!
//!     fn id(&self) -> u64 {
//!         self.id
//!     }
//!
//!     fn filter_value(&self) -> String {
//!         format!("{} {}", self.title, self.last_message)
//!     }
//! }
//! ```

use std::fmt::Display;
use std::hash::Hash;

/// Trait for items that can be displayed and reconciled in a chat list.
///
/// Items must be displayable and cloneable, and must expose a stable unique
/// identifier. The identifier drives snapshot reconciliation: items whose id
/// appears in consecutive snapshots are kept (and their payload refreshed),
/// while ids that appear or disappear produce animated insertions and
/// removals.
///
/// `filter_value()` determines what text is searched when a filter query is
/// active on the list.
pub trait Item: Display + Clone {
    /// The identifier type. Must be cheap to clone and usable as a map key.
    ///
    /// Typical choices are `u64`, `String`, or a newtype around either.
    type Id: Clone + Eq + Hash;

    /// Returns the stable unique identifier for this item.
    ///
    /// The id must not change across snapshots for the "same" conversation;
    /// everything else about the item may.
    fn id(&self) -> Self::Id;

    /// Returns the text used when filtering this item.
    ///
    /// Common patterns include returning just the title, or combining several
    /// fields like "title preview participants".
    fn filter_value(&self) -> String;
}
