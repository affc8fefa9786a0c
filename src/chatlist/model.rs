//! Main Model struct and state management for the chat list.

use super::style::ChatListStyles;
use super::subscription::Subscription;
use super::types::ItemDelegate;
use crate::item::Item;
use crate::pagination::{self, PageFuture, ScrollMsg};
use crate::state::{self, Emission, RenderState};
use crate::transition::{self, Entry};
use bubbletea_rs::Cmd;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A conversation list fed by an asynchronous data stream.
///
/// The model wires the crate's pieces together: each upstream emission is
/// resolved to a [`RenderState`], the populated branch is reconciled into the
/// animated displayed sequence, scroll positions feed the pagination guard,
/// and the whole thing renders as one of four branches (loading, error,
/// empty, populated).
///
/// The model never fetches anything itself. The data source, the scrollable
/// viewport, and the search input are collaborators owned by the embedding
/// application; they reach the model as messages (or through the imperative
/// methods the messages call into).
///
/// # Examples
///
/// ```rust
/// use bubbletea_chatlist::chatlist::{DefaultDelegate, DefaultItem, Model};
///
/// let list: Model<DefaultItem> = Model::new(DefaultDelegate::new(), 80)
///     .with_title("Conversations");
/// assert!(list.is_empty());
/// ```
pub struct Model<I: Item> {
    pub(super) title: String,
    pub(super) latest: Option<Emission<I>>,
    pub(super) query: String,

    pub(super) transitions: transition::Model<I>,
    pub(super) guard: pagination::Model,
    pub(super) delegate: Box<dyn ItemDelegate<I> + Send + Sync>,

    pub(super) styles: ChatListStyles,
    pub(super) width: usize,
    pub(super) show_status_bar: bool,

    pub(super) subscription: Option<Subscription<I>>,
    pub(super) mounted: bool,
}

impl<I: Item + Send + Sync + 'static> Model<I> {
    /// Creates a list with the given delegate and width.
    ///
    /// The list starts mounted, unsubscribed, and with pagination disabled;
    /// until the first emission arrives it renders the loading branch.
    pub fn new<D>(delegate: D, width: usize) -> Self
    where
        D: ItemDelegate<I> + Send + Sync + 'static,
    {
        Self {
            title: "Conversations".to_string(),
            latest: None,
            query: String::new(),
            transitions: transition::Model::new(),
            guard: pagination::Model::new(),
            delegate: Box::new(delegate),
            styles: ChatListStyles::default(),
            width,
            show_status_bar: true,
            subscription: None,
            mounted: true,
        }
    }

    /// Sets the list title (builder pattern).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Replaces the style bundle (builder pattern).
    pub fn with_styles(mut self, styles: ChatListStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Enables pagination (builder pattern).
    ///
    /// `load_more` is invoked at most once per threshold crossing while
    /// `is_last_page` returns false; the scroll listener is attached as part
    /// of this call and detached again by [`Self::shutdown`].
    pub fn with_pagination<F, G>(mut self, load_more: F, is_last_page: G) -> Self
    where
        F: Fn() -> PageFuture + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = self
            .guard
            .with_load_more(load_more)
            .with_is_last_page(is_last_page);
        self.guard.attach();
        self
    }

    /// Overrides the near-bottom pagination threshold (builder pattern).
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.guard = self.guard.with_threshold(threshold);
        self
    }

    /// Connects the upstream emission stream (builder pattern).
    ///
    /// Arm the stream by returning [`Self::listen`]'s command from `init` (or
    /// from wherever the application bootstraps its commands); the model
    /// re-arms it after every received snapshot.
    pub fn with_subscription(mut self, subscription: Subscription<I>) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// The command awaiting the next upstream emission, if subscribed.
    pub fn listen(&self) -> Option<Cmd> {
        self.subscription.as_ref().map(Subscription::listen)
    }

    /// Applies one upstream emission.
    ///
    /// Stores the emission as the latest word on the world, and on the
    /// non-error path reconciles the (search-filtered) item set into the
    /// displayed sequence. An error emission leaves the displayed sequence
    /// untouched so a later recovery emission diffs against what is actually
    /// on screen.
    ///
    /// Returns the transition command when the reconciliation started any
    /// animation.
    pub fn apply_emission(&mut self, emission: Emission<I>) -> Option<Cmd> {
        let cmd = if emission.error.is_none() {
            let filtered = self.filter(&emission.items);
            self.transitions.update_items(filtered)
        } else {
            None
        };
        self.latest = Some(emission);
        cmd
    }

    /// Resolves the current render state.
    ///
    /// A pure function of the latest emission and the search query; nothing
    /// is cached between calls.
    pub fn render_state(&self) -> RenderState<I> {
        match &self.latest {
            None => RenderState::Loading,
            Some(emission) => {
                let filtered = Emission {
                    items: self.filter(&emission.items),
                    error: emission.error.clone(),
                };
                state::resolve(Some(&filtered), self.search_active())
            }
        }
    }

    /// Sets the search query and re-filters the displayed sequence.
    ///
    /// Returns the transition command when the narrowed (or widened) result
    /// set animates rows in or out.
    pub fn set_query(&mut self, query: &str) -> Option<Cmd> {
        if self.query == query {
            return None;
        }
        self.query = query.to_string();
        self.refresh_displayed()
    }

    /// Clears the search query.
    pub fn clear_query(&mut self) -> Option<Cmd> {
        self.set_query("")
    }

    /// The current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a search filter is currently narrowing the list.
    pub fn search_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Forwards one scroll-position event to the pagination guard.
    pub fn on_scroll(&mut self, position: ScrollMsg) -> Option<Cmd> {
        self.guard.on_scroll(position)
    }

    /// Whether a page fetch is currently outstanding.
    pub fn is_loading_more(&self) -> bool {
        self.guard.in_flight()
    }

    /// The logical displayed sequence (exiting ghosts excluded).
    pub fn items(&self) -> Vec<I> {
        self.transitions.items()
    }

    /// Every physically displayed row, exiting ghosts included.
    pub fn entries(&self) -> &[Entry<I>] {
        self.transitions.entries()
    }

    /// Number of items in the logical displayed sequence.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the logical displayed sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Render width in terminal columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Updates the render width.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Shows or hides the status bar.
    pub fn set_show_status_bar(&mut self, show: bool) {
        self.show_status_bar = show;
    }

    /// Whether the model is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Tears the list down synchronously: closes the subscription, detaches
    /// the scroll listener, and cancels running transitions.
    ///
    /// Idempotent. After this, messages are ignored and late command
    /// completions (a page fetch, an armed stream receive, a transition
    /// frame) mutate nothing.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close();
        }
        self.guard.detach();
        self.transitions.cancel();
        self.mounted = false;
        tracing::debug!("chat list torn down");
    }

    // Re-filters the latest snapshot into the displayed sequence, e.g. after
    // a query change.
    fn refresh_displayed(&mut self) -> Option<Cmd> {
        let emission = self.latest.as_ref()?;
        if emission.error.is_some() {
            return None;
        }
        let filtered = self.filter(&emission.items);
        self.transitions.update_items(filtered)
    }

    // Applies the fuzzy search filter, preserving snapshot order.
    fn filter(&self, items: &[I]) -> Vec<I> {
        if self.query.is_empty() {
            return items.to_vec();
        }
        let matcher = SkimMatcherV2::default();
        items
            .iter()
            .filter(|item| {
                matcher
                    .fuzzy_match(&item.filter_value(), &self.query)
                    .is_some()
            })
            .cloned()
            .collect()
    }
}
