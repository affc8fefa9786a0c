//! Scroll-triggered pagination guard.
//!
//! Chat histories load in pages: when the user scrolls near the end of the
//! viewport, the list asks its data source for more. This module owns the
//! bookkeeping around that request: *when* to fire it and, just as
//! important, when not to:
//!
//! - at most one page request is outstanding at a time (`in_flight` latch);
//! - nothing fires once the source reports the last page, polled fresh on
//!   every scroll event;
//! - nothing fires while the guard is detached, and a request completing
//!   after detach mutates no state.
//!
//! A failed page fetch is deliberately swallowed: the latch resets so a later
//! scroll can retry, a warning is logged, and the list keeps rendering its
//! last populated snapshot. Transient fetch failures should not blank a
//! perfectly good list.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_chatlist::pagination::{Model, ScrollMsg};
//!
//! let mut guard = Model::new()
//!     .with_threshold(50)
//!     .with_load_more(|| Box::pin(async { Ok(()) }));
//! guard.attach();
//!
//! // Far from the bottom: nothing happens.
//! let far = ScrollMsg { offset: 10, max_offset: 1000 };
//! assert!(guard.on_scroll(far).is_none());
//!
//! // Within the threshold: exactly one request goes out.
//! let near = ScrollMsg { offset: 980, max_offset: 1000 };
//! assert!(guard.on_scroll(near).is_some());
//! assert!(guard.in_flight());
//! assert!(guard.on_scroll(near).is_none());
//! ```

use bubbletea_rs::{Cmd, Msg};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use thiserror::Error;

// Internal ID management for guard instances.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// How close to the bottom (in viewport rows) a scroll position must come
/// before the next page is requested.
///
/// Whether this should scale with row height or terminal density is an open
/// question upstream; it is kept as a plain configurable constant here.
pub const DEFAULT_LOAD_THRESHOLD: usize = 50;

/// Error returned by a failed page fetch.
///
/// Never surfaced as a render state; the guard logs it and resets its latch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page load failed: {message}")]
pub struct PageLoadError {
    /// Human-readable description of the fetch failure.
    pub message: String,
}

impl PageLoadError {
    /// Creates a page-load error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Future produced by a load-more callback.
pub type PageFuture = Pin<Box<dyn Future<Output = Result<(), PageLoadError>> + Send>>;

/// The load-more callback: invoked at most once per threshold crossing,
/// never while a previous invocation is still pending.
pub type LoadMoreFn = Arc<dyn Fn() -> PageFuture + Send + Sync>;

/// Predicate reporting whether the source has no further pages. Polled on
/// every scroll event rather than cached, so the source stays authoritative.
pub type LastPageFn = Box<dyn Fn() -> bool + Send + Sync>;

/// Scroll-position report from the viewport.
///
/// Sent by the embedding application on every scroll frame, either through
/// the message loop or directly via [`Model::on_scroll`]. Offsets are in
/// viewport rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMsg {
    /// Current scroll offset from the top of the content.
    pub offset: usize,
    /// Maximum reachable scroll offset for the current content.
    pub max_offset: usize,
}

impl ScrollMsg {
    /// Rows between the current position and the bottom of the content.
    pub fn distance_from_bottom(&self) -> usize {
        self.max_offset.saturating_sub(self.offset)
    }
}

/// Completion notice for an in-flight page request.
///
/// The `id` and `tag` route the message back to the guard that issued the
/// request; a completion from before a detach carries a stale tag and is
/// dropped without touching any state.
#[derive(Debug)]
pub struct LoadCompleteMsg {
    id: i64,
    tag: i64,
    /// Outcome of the page fetch.
    pub result: Result<(), PageLoadError>,
}

/// The pagination guard.
///
/// Holds the in-flight latch and the wiring to the data source. Created at
/// view mount, attached while pagination is enabled, detached at teardown.
pub struct Model {
    id: i64,
    tag: i64,
    attached: bool,
    in_flight: bool,
    threshold: usize,
    load_more: Option<LoadMoreFn>,
    is_last_page: Option<LastPageFn>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a detached guard with the default threshold and no callbacks.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            attached: false,
            in_flight: false,
            threshold: DEFAULT_LOAD_THRESHOLD,
            load_more: None,
            is_last_page: None,
        }
    }

    /// Sets the near-bottom distance at which the next page is requested.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the load-more callback (builder pattern).
    ///
    /// Without one the guard never fires, whatever the scroll position.
    pub fn with_load_more<F>(mut self, f: F) -> Self
    where
        F: Fn() -> PageFuture + Send + Sync + 'static,
    {
        self.load_more = Some(Arc::new(f));
        self
    }

    /// Sets the last-page predicate (builder pattern).
    ///
    /// When it returns `true` no scroll event triggers a request. Absent a
    /// predicate, the source is assumed to have more pages.
    pub fn with_is_last_page<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.is_last_page = Some(Box::new(f));
        self
    }

    /// Starts listening to scroll events. Idempotent: attaching an already
    /// attached guard changes nothing and duplicates no triggers.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops listening and resets the in-flight latch. Idempotent.
    ///
    /// Bumps the routing tag so a completion from a request issued before the
    /// detach is ignored even if the guard is re-attached afterwards.
    pub fn detach(&mut self) {
        self.attached = false;
        self.in_flight = false;
        self.tag += 1;
    }

    /// Whether the guard is currently listening to scroll events.
    pub fn attached(&self) -> bool {
        self.attached
    }

    /// Whether a page request is currently outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Handles one scroll-position event.
    ///
    /// Returns the command driving the page fetch when all conditions hold:
    /// the guard is attached, a load-more callback is configured, the source
    /// is not on its last page, no request is in flight, and the position is
    /// within [`threshold`](Self::with_threshold) rows of the bottom.
    /// Otherwise this is a no-op.
    ///
    /// The returned command resolves to a [`LoadCompleteMsg`] once the fetch
    /// finishes, success or failure; feed it back through [`Self::update`].
    pub fn on_scroll(&mut self, position: ScrollMsg) -> Option<Cmd> {
        if !self.attached {
            return None;
        }
        let load_more = self.load_more.as_ref()?;
        if let Some(is_last_page) = &self.is_last_page {
            if is_last_page() {
                return None;
            }
        }
        if self.in_flight {
            return None;
        }
        if position.distance_from_bottom() > self.threshold {
            return None;
        }

        self.in_flight = true;
        let future = load_more();
        let (id, tag) = (self.id, self.tag);
        Some(Box::pin(async move {
            let result = future.await;
            Some(Box::new(LoadCompleteMsg { id, tag, result }) as Msg)
        }))
    }

    /// Routes messages to the guard.
    ///
    /// [`ScrollMsg`] is forwarded to [`Self::on_scroll`]. A [`LoadCompleteMsg`]
    /// addressed to this guard resets the in-flight latch unconditionally;
    /// a failed fetch is logged and otherwise dropped. Completions carrying a
    /// stale tag (issued before a detach) are ignored.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(scroll) = msg.downcast_ref::<ScrollMsg>() {
            return self.on_scroll(*scroll);
        }

        if let Some(done) = msg.downcast_ref::<LoadCompleteMsg>() {
            if done.id != self.id || done.tag != self.tag {
                return None;
            }
            if let Err(error) = &done.result {
                tracing::warn!(%error, "page load failed; keeping current list");
            }
            self.in_flight = false;
        }

        None
    }
}
