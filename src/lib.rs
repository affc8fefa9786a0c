#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-chatlist/")]

//! # bubbletea-chatlist
//!
//! An animated, stream-driven conversation list component for terminal chat
//! applications built with [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! ## Overview
//!
//! A chat sidebar has a deceptively simple job: show the current set of
//! conversations, keep it in sync as conversations appear, disappear, and
//! reorder, and quietly fetch older pages as the user scrolls. This crate
//! packages that job as an Elm-architecture component, following the same
//! `update()`/`view()` conventions as the rest of the bubbletea-rs ecosystem.
//!
//! The pieces compose leaf-first and can be used independently:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`item`] | The `Item` trait: stable id, display text, filter text |
//! | [`diff`] | Keyed snapshot diffing into insert/remove operations |
//! | [`transition`] | The displayed sequence, with enter/exit animations |
//! | [`state`] | Emissions and loading/error/empty/populated resolution |
//! | [`pagination`] | Scroll-threshold load-more guard with an in-flight latch |
//! | [`chatlist`] | The assembled component, delegate rendering, styling |
//!
//! ## How data flows
//!
//! The upstream data source (a database watcher, a sync engine, whatever)
//! pushes a full snapshot of the current conversation set whenever it
//! changes. Each emission reaches the component as a message, is resolved to
//! a render state, and on the populated branch is diffed against what is on
//! screen; only the difference animates. Scrolling near the bottom asks the
//! source for one more page, at most one request at a time.
//!
//! ```rust
//! use bubbletea_chatlist::chatlist::{DefaultDelegate, DefaultItem, Model as ChatList, SnapshotMsg};
//! use bubbletea_chatlist::state::Emission;
//! use bubbletea_rs::{Model, Msg};
//!
//! let mut list: ChatList<DefaultItem> = ChatList::new(DefaultDelegate::new(), 80);
//!
//! // The first emission moves the list from loading to populated.
//! let emission = Emission::new(vec![
//!     DefaultItem::new("c1", "alice", "see you tomorrow"),
//!     DefaultItem::new("c2", "team-chat", "ship it"),
//! ]);
//! list.update(Box::new(SnapshotMsg { emission }) as Msg);
//!
//! assert_eq!(list.len(), 2);
//! assert!(list.view().contains("alice"));
//! ```
//!
//! ## What this crate does not do
//!
//! Fetching, storage, and transport belong to the data source; the scrollable
//! viewport and the search input belong to the embedding application. The
//! component consumes their events and renders strings, nothing more.
//!
//! ## Quick Start
//!
//! Add bubbletea-chatlist to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bubbletea-chatlist = "0.1.0"
//! bubbletea-rs = "0.0.7"
//! ```
//!
//! For convenience, you can import the prelude:
//!
//! ```rust
//! use bubbletea_chatlist::prelude::*;
//! ```

pub mod chatlist;
pub mod diff;
pub mod item;
pub mod pagination;
pub mod state;
pub mod transition;

/// Convenient re-exports of the most commonly used types.
pub mod prelude {
    pub use crate::chatlist::{
        ChatListStyles, DefaultDelegate, DefaultItem, DefaultItemStyles, ItemDelegate,
        Model as ChatList, SnapshotMsg, Subscription,
    };
    pub use crate::diff::{diff, Operation};
    pub use crate::item::Item;
    pub use crate::pagination::{
        Model as PaginationGuard, PageFuture, PageLoadError, ScrollMsg, DEFAULT_LOAD_THRESHOLD,
    };
    pub use crate::state::{resolve, Emission, RenderState, StreamError};
    pub use crate::transition::{Entry, Model as TransitionList, Phase};
}
