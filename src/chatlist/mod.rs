//! Chat list component: stream-driven, animated, paginated.
//!
//! This module wires the crate's pieces into one Elm-architecture component:
//!
//! - Upstream emissions arrive as [`SnapshotMsg`]s (pushed by the embedding
//!   application or pulled through a [`Subscription`]) and are resolved into
//!   a [`RenderState`](crate::state::RenderState).
//! - On the populated branch the (search-filtered) item sequence is handed to
//!   the transition controller, which diffs it against what is on screen and
//!   animates the difference.
//! - Scroll positions ([`ScrollMsg`](crate::pagination::ScrollMsg)) feed the
//!   pagination guard, which requests the next page at most once per
//!   threshold crossing.
//!
//! Everything is processed one message at a time on the bubbletea-rs runtime;
//! the component performs no threading of its own.
//!
//! # Integration
//!
//! ```rust,no_run
//! use bubbletea_chatlist::chatlist::{DefaultDelegate, DefaultItem, Model as ChatList, Subscription};
//! use bubbletea_chatlist::state::Emission;
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use tokio::sync::mpsc;
//!
//! struct App {
//!     chat_list: ChatList<DefaultItem>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let (tx, rx) = mpsc::unbounded_channel::<Emission<DefaultItem>>();
//!         // Hand `tx` to the data source; it pushes a full snapshot per change.
//!         let chat_list = ChatList::new(DefaultDelegate::new(), 80)
//!             .with_title("Conversations")
//!             .with_subscription(Subscription::new(rx))
//!             .with_pagination(
//!                 || Box::pin(async { Ok(()) }), // ask the source for one more page
//!                 || false,                      // the source decides when it is done
//!             );
//!         let listen = chat_list.listen();
//!         (Self { chat_list }, listen)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.chat_list.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.chat_list.view()
//!     }
//! }
//! ```

pub mod defaultitem;
pub mod style;

mod model;
mod rendering;
mod subscription;
mod types;

#[cfg(test)]
mod tests;

pub use defaultitem::{DefaultDelegate, DefaultItem, DefaultItemStyles};
pub use model::Model;
pub use style::ChatListStyles;
pub use subscription::Subscription;
pub use types::{ItemDelegate, SnapshotMsg};

use crate::item::Item;
use bubbletea_rs::{batch, Cmd, Model as BubbleTeaModel, Msg};

impl<I: Item + Send + Sync + 'static> BubbleTeaModel for Model<I> {
    /// Initializes an empty, unsubscribed list with default settings.
    ///
    /// Most applications construct the model themselves (see the module
    /// docs); this exists so the component can run standalone.
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(DefaultDelegate::new(), 80), None)
    }

    /// Routes messages to the component's parts.
    ///
    /// - [`SnapshotMsg`]: applies the emission and re-arms the subscription,
    ///   so emissions are processed strictly in order.
    /// - Transition frames and pagination messages go to their owners.
    ///
    /// After [`Model::shutdown`] every message is ignored.
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.is_mounted() {
            return None;
        }

        if let Some(snapshot) = msg.downcast_ref::<SnapshotMsg<I>>() {
            let animate = self.apply_emission(snapshot.emission.clone());
            let listen = self.listen();
            return match (animate, listen) {
                (Some(animate), Some(listen)) => Some(batch(vec![animate, listen])),
                (animate, listen) => animate.or(listen),
            };
        }

        if let Some(cmd) = self.transitions.update(&msg) {
            return Some(cmd);
        }
        self.guard.update(&msg)
    }

    /// Renders the list: header, one body branch per render state, and the
    /// status footer on the populated branch.
    fn view(&self) -> String {
        let mut sections = Vec::new();

        let header = self.view_header();
        if !header.is_empty() {
            sections.push(header);
        }

        sections.push(self.view_body());

        let footer = self.view_footer();
        if !footer.is_empty() {
            sections.push(footer);
        }

        sections.join("\n")
    }
}
