//! Core types and traits for the chat list component.

use super::Model;
use crate::item::Item;
use crate::state::Emission;
use crate::transition::Entry;

/// Message carrying one upstream emission into the chat list.
///
/// The embedding application sends one of these per emission of its data
/// stream, in emission order, either by forwarding from its own stream
/// plumbing or by arming a [`super::Subscription`]. The orchestrator resolves
/// the render state from the emission and reconciles the displayed sequence
/// on the populated branch.
pub struct SnapshotMsg<I: Item> {
    /// The emission: the full current item set, or an upstream error.
    pub emission: Emission<I>,
}

/// Trait for customizing how chat rows are rendered.
///
/// Unlike a plain item renderer, the delegate receives the row's [`Entry`],
/// the item plus its transition state, so entering and exiting rows can be
/// drawn differently from settled ones.
///
/// # Examples
///
/// ```
/// use bubbletea_chatlist::chatlist::{ItemDelegate, Model};
/// use bubbletea_chatlist::item::Item;
/// use bubbletea_chatlist::transition::Entry;
/// # #[derive(Clone)]
/// # struct Row(u64, String);
/// # impl std::fmt::Display for Row {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
/// #         write!(f, "{}", self.1)
/// #     }
/// # }
/// # impl Item for Row {
/// #     type Id = u64;
/// #     fn id(&self) -> u64 { self.0 }
/// #     fn filter_value(&self) -> String { self.1.clone() }
/// # }
/// struct PlainDelegate;
///
/// impl<I: Item> ItemDelegate<I> for PlainDelegate {
///     fn render(&self, _m: &Model<I>, _index: usize, entry: &Entry<I>) -> String {
///         if entry.phase().is_some() {
///             format!("~ {}", entry.item())
///         } else {
///             format!("  {}", entry.item())
///         }
///     }
///
///     fn height(&self) -> usize {
///         1
///     }
///
///     fn spacing(&self) -> usize {
///         0
///     }
/// }
/// ```
pub trait ItemDelegate<I: Item> {
    /// Renders one row as a styled string.
    ///
    /// `index` is the row's position among the physically displayed entries,
    /// exiting ghosts included.
    fn render(&self, m: &Model<I>, index: usize, entry: &Entry<I>) -> String;

    /// Height in terminal lines of each rendered row.
    fn height(&self) -> usize;

    /// Blank lines inserted between rows.
    fn spacing(&self) -> usize;
}
