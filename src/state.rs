//! Render-state resolution for the chat list.
//!
//! The upstream data source pushes [`Emission`]s: the full current item set,
//! optionally tagged with an error. [`resolve`] maps the latest emission to a
//! single [`RenderState`] discriminant, replacing the ad-hoc
//! loading/error/empty boolean flags such views tend to accumulate. Exactly
//! one variant is active at a time, so invalid combinations (simultaneously
//! loading and erroring, say) cannot be represented.
//!
//! The priority order in [`resolve`] is load-bearing: an error carried by the
//! latest emission wins over its items, and only the *latest full snapshot* is
//! consulted. A failed page fetch never produces an error emission (the
//! pagination guard swallows it, see [`crate::pagination`]), so a transient
//! page failure cannot blank an already-populated list.

use crate::item::Item;
use thiserror::Error;

/// Error carried by an upstream emission.
///
/// The upstream fetcher is an external collaborator; whatever transport or
/// storage error it hit is stringified at that boundary so emissions stay
/// cloneable and the resolver stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StreamError {
    /// Human-readable description of the upstream failure.
    pub message: String,
}

impl StreamError {
    /// Creates a stream error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One element of the upstream data stream: the current item set at a point
/// in time, or an error standing in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission<I: Item> {
    /// The full, ordered item set as of this emission.
    pub items: Vec<I>,
    /// Set when the upstream source failed to produce a snapshot.
    pub error: Option<StreamError>,
}

impl<I: Item> Emission<I> {
    /// An emission carrying a fresh snapshot.
    pub fn new(items: Vec<I>) -> Self {
        Self { items, error: None }
    }

    /// An emission signalling an upstream failure.
    pub fn failed(error: StreamError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
        }
    }
}

/// What the list should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState<I: Item> {
    /// Nothing has been emitted yet; the first snapshot is still on its way.
    Loading,
    /// The latest emission carried an upstream error.
    Error(StreamError),
    /// The latest snapshot holds no items. `search_active` distinguishes a
    /// genuinely empty source from a filter query that matched nothing, so
    /// the view can word the two cases differently.
    Empty {
        /// Whether a search filter is currently narrowing the list.
        search_active: bool,
    },
    /// The latest snapshot holds items, in display order.
    Populated(Vec<I>),
}

impl<I: Item> RenderState<I> {
    /// Returns `true` for the populated branch.
    pub fn is_populated(&self) -> bool {
        matches!(self, RenderState::Populated(_))
    }
}

/// Maps the latest upstream emission to a render state.
///
/// First match wins:
///
/// 1. no emission yet → [`RenderState::Loading`]
/// 2. emission carries an error → [`RenderState::Error`]
/// 3. item set is empty → [`RenderState::Empty`]
/// 4. otherwise → [`RenderState::Populated`]
///
/// # Examples
///
/// ```rust
/// use bubbletea_chatlist::state::{resolve, Emission, RenderState, StreamError};
/// use bubbletea_chatlist::item::Item;
/// # #[derive(Clone, Debug, PartialEq)]
/// # struct Row(u64);
/// # impl std::fmt::Display for Row {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
/// #         write!(f, "{}", self.0)
/// #     }
/// # }
/// # impl Item for Row {
/// #     type Id = u64;
/// #     fn id(&self) -> u64 { self.0 }
/// #     fn filter_value(&self) -> String { String::new() }
/// # }
/// let none: Option<&Emission<Row>> = None;
/// assert_eq!(resolve(none, false), RenderState::Loading);
///
/// let empty = Emission::<Row>::new(vec![]);
/// assert_eq!(
///     resolve(Some(&empty), true),
///     RenderState::Empty { search_active: true },
/// );
/// ```
pub fn resolve<I: Item>(latest: Option<&Emission<I>>, search_active: bool) -> RenderState<I> {
    match latest {
        None => RenderState::Loading,
        Some(emission) => {
            if let Some(error) = &emission.error {
                RenderState::Error(error.clone())
            } else if emission.items.is_empty() {
                RenderState::Empty { search_active }
            } else {
                RenderState::Populated(emission.items.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Row(u32);

    impl std::fmt::Display for Row {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "row {}", self.0)
        }
    }

    impl Item for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }

        fn filter_value(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn no_emission_is_loading() {
        assert_eq!(resolve::<Row>(None, false), RenderState::Loading);
        assert_eq!(resolve::<Row>(None, true), RenderState::Loading);
    }

    #[test]
    fn error_wins_over_items() {
        let emission = Emission {
            items: vec![Row(1), Row(2)],
            error: Some(StreamError::new("backend unavailable")),
        };
        assert_eq!(
            resolve(Some(&emission), false),
            RenderState::Error(StreamError::new("backend unavailable")),
        );
    }

    #[test]
    fn empty_items_carry_the_search_flag() {
        let emission: Emission<Row> = Emission::new(vec![]);
        assert_eq!(
            resolve(Some(&emission), false),
            RenderState::Empty {
                search_active: false
            },
        );
        assert_eq!(
            resolve(Some(&emission), true),
            RenderState::Empty {
                search_active: true
            },
        );
    }

    #[test]
    fn items_resolve_to_populated() {
        let emission = Emission::new(vec![Row(1), Row(2)]);
        assert_eq!(
            resolve(Some(&emission), false),
            RenderState::Populated(vec![Row(1), Row(2)]),
        );
    }

    #[test]
    fn failed_constructor_resolves_to_error() {
        let emission: Emission<Row> = Emission::failed(StreamError::new("boom"));
        assert!(matches!(
            resolve(Some(&emission), false),
            RenderState::Error(_)
        ));
    }
}
