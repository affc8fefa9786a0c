//! Bridges a push-based emission stream into the message loop.
//!
//! The upstream data source owns a `tokio` channel sender and pushes an
//! [`Emission`] whenever its view of the world changes. A [`Subscription`]
//! wraps the receiving end and turns "wait for the next emission" into a
//! bubbletea-rs command: [`Subscription::listen`] resolves to a
//! [`SnapshotMsg`] which the orchestrator consumes and re-arms, so emissions
//! are processed strictly in order, one per update cycle.
//!
//! [`Subscription::close`] tears the bridge down synchronously: an armed
//! command that completes after the close yields no message, so nothing
//! mutates state past teardown.

use super::types::SnapshotMsg;
use crate::item::Item;
use crate::state::Emission;
use bubbletea_rs::{Cmd, Msg};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

/// Receiving end of the upstream emission stream.
///
/// Cloning a subscription clones the handle, not the channel: all clones
/// share the receiver and the closed flag, so closing any of them silences
/// every armed command.
///
/// # Examples
///
/// ```rust
/// use bubbletea_chatlist::chatlist::Subscription;
/// use bubbletea_chatlist::state::Emission;
/// use bubbletea_chatlist::item::Item;
/// use tokio::sync::mpsc;
/// # #[derive(Clone)]
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
///
/// let (tx, rx) = mpsc::unbounded_channel::<Emission<Row>>();
/// let subscription = Subscription::new(rx);
///
/// // The data source pushes emissions whenever it likes.
/// tx.send(Emission::new(vec![Row(1)])).unwrap();
///
/// // `subscription.listen()` is a Cmd resolving to the next SnapshotMsg.
/// let _cmd = subscription.listen();
/// ```
pub struct Subscription<I: Item> {
    receiver: Arc<Mutex<UnboundedReceiver<Emission<I>>>>,
    closed: Arc<AtomicBool>,
}

impl<I: Item> Clone for Subscription<I> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            closed: self.closed.clone(),
        }
    }
}

impl<I: Item + Send + Sync + 'static> Subscription<I> {
    /// Wraps the receiving end of an emission channel.
    pub fn new(receiver: UnboundedReceiver<Emission<I>>) -> Self {
        Self {
            receiver: Arc::new(Mutex::new(receiver)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a command that resolves to the next [`SnapshotMsg`].
    ///
    /// Resolves to nothing when the subscription is closed (before or after
    /// the emission arrives) or when the sending side hung up.
    pub fn listen(&self) -> Cmd {
        let receiver = self.receiver.clone();
        let closed = self.closed.clone();
        Box::pin(async move {
            if closed.load(Ordering::SeqCst) {
                return None;
            }
            let emission = receiver.lock().await.recv().await?;
            if closed.load(Ordering::SeqCst) {
                return None;
            }
            Some(Box::new(SnapshotMsg { emission }) as Msg)
        })
    }

    /// Tears the subscription down. Synchronous and idempotent; any armed
    /// [`Self::listen`] command completes silently afterwards.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether the subscription has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
