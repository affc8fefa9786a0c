//! Integration tests for the chat list component.

use super::*;
use crate::pagination::{PageLoadError, ScrollMsg};
use crate::state::{Emission, RenderState, StreamError};
use bubbletea_rs::{Model as BubbleTeaModel, Msg};
use tokio::sync::mpsc;

fn item(id: &str, title: &str) -> DefaultItem {
    DefaultItem::new(id, title, "last message")
}

fn snapshot(items: Vec<DefaultItem>) -> Msg {
    Box::new(SnapshotMsg {
        emission: Emission::new(items),
    })
}

fn list() -> Model<DefaultItem> {
    Model::new(DefaultDelegate::new(), 40)
}

fn displayed_ids(model: &Model<DefaultItem>) -> Vec<String> {
    model.items().iter().map(|it| it.id.clone()).collect()
}

#[test]
fn starts_in_loading_state() {
    let model = list();
    assert_eq!(model.render_state(), RenderState::Loading);
    assert!(model.view().contains("Loading conversations"));
}

#[test]
fn first_snapshot_populates_the_list() {
    let mut model = list();
    let cmd = model.update(snapshot(vec![item("c1", "alice"), item("c2", "bob")]));
    assert!(cmd.is_some(), "entering rows start a transition");

    assert!(model.render_state().is_populated());
    assert_eq!(displayed_ids(&model), vec!["c1", "c2"]);
    let view = model.view();
    assert!(view.contains("alice"));
    assert!(view.contains("bob"));
    assert!(view.contains("2 conversations"));
}

#[test]
fn empty_snapshot_renders_the_empty_branch() {
    let mut model = list();
    model.update(snapshot(vec![]));
    assert_eq!(
        model.render_state(),
        RenderState::Empty {
            search_active: false
        }
    );
    assert!(model.view().contains("No conversations yet."));
}

#[test]
fn stream_error_surfaces_but_keeps_the_displayed_sequence() {
    let mut model = list();
    model.update(snapshot(vec![item("c1", "alice")]));

    let failure = Box::new(SnapshotMsg::<DefaultItem> {
        emission: Emission::failed(StreamError::new("backend unavailable")),
    }) as Msg;
    model.update(failure);

    assert!(matches!(model.render_state(), RenderState::Error(_)));
    assert!(model.view().contains("backend unavailable"));
    // The displayed sequence survives so a recovery emission diffs against it.
    assert_eq!(displayed_ids(&model), vec!["c1"]);

    // A recovery emission puts the list back on the populated branch.
    model.update(snapshot(vec![item("c1", "alice"), item("c2", "bob")]));
    assert!(model.render_state().is_populated());
    assert_eq!(displayed_ids(&model), vec!["c1", "c2"]);
}

#[test]
fn successive_snapshots_reconcile_the_displayed_sequence() {
    let mut model = list();
    model.update(snapshot(vec![
        item("1", "alice"),
        item("2", "bob"),
        item("3", "carol"),
    ]));
    model.update(snapshot(vec![
        item("1", "alice"),
        item("3", "carol"),
        item("4", "dave"),
    ]));

    assert_eq!(displayed_ids(&model), vec!["1", "3", "4"]);
    // The removed row lingers as a ghost until its exit animation finishes.
    assert_eq!(model.entries().len(), 4);
}

#[test]
fn search_query_filters_and_flags_the_empty_branch() {
    let mut model = list();
    model.update(snapshot(vec![item("c1", "alice"), item("c2", "bob")]));

    model.set_query("ali");
    assert!(model.search_active());
    assert_eq!(displayed_ids(&model), vec!["c1"]);
    assert!(model.view().contains("filtered: 1"));

    model.set_query("zzzz");
    assert_eq!(
        model.render_state(),
        RenderState::Empty {
            search_active: true
        }
    );
    assert!(model.view().contains("No conversations match your search."));

    model.clear_query();
    assert_eq!(displayed_ids(&model), vec!["c1", "c2"]);
}

#[test]
fn setting_the_same_query_twice_is_a_no_op() {
    let mut model = list();
    model.update(snapshot(vec![item("c1", "alice")]));
    model.set_query("ali");
    assert!(model.set_query("ali").is_none());
}

#[tokio::test]
async fn scroll_messages_drive_pagination_through_update() {
    let mut model = list().with_pagination(|| Box::pin(async { Ok(()) }), || false);
    model.update(snapshot(vec![item("c1", "alice")]));

    let near_bottom = Box::new(ScrollMsg {
        offset: 990,
        max_offset: 1000,
    }) as Msg;
    let cmd = model.update(near_bottom).expect("crossing starts a fetch");
    assert!(model.is_loading_more());
    assert!(model.view().contains("loading more"));

    // A second scroll while the fetch is outstanding is ignored.
    let repeat = Box::new(ScrollMsg {
        offset: 995,
        max_offset: 1000,
    }) as Msg;
    assert!(model.update(repeat).is_none());

    // Completion releases the latch.
    let done = cmd.await.expect("completion message");
    model.update(done);
    assert!(!model.is_loading_more());
}

#[tokio::test]
async fn failed_page_fetch_never_reaches_the_render_state() {
    let mut model = list().with_pagination(
        || Box::pin(async { Err(PageLoadError::new("connection reset")) }),
        || false,
    );
    model.update(snapshot(vec![item("c1", "alice")]));

    let near_bottom = Box::new(ScrollMsg {
        offset: 990,
        max_offset: 1000,
    }) as Msg;
    let cmd = model.update(near_bottom).expect("crossing starts a fetch");
    let done = cmd.await.expect("completion message");
    model.update(done);

    // Still populated; the failure only released the latch.
    assert!(model.render_state().is_populated());
    assert!(!model.is_loading_more());
}

#[test]
fn last_page_suppresses_fetches() {
    let mut model = list().with_pagination(|| Box::pin(async { Ok(()) }), || true);
    model.update(snapshot(vec![item("c1", "alice")]));

    let near_bottom = Box::new(ScrollMsg {
        offset: 990,
        max_offset: 1000,
    }) as Msg;
    assert!(model.update(near_bottom).is_none());
    assert!(!model.is_loading_more());
}

#[tokio::test]
async fn subscription_feeds_snapshots_in_order() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut model = list().with_subscription(Subscription::new(rx));

    tx.send(Emission::new(vec![item("c1", "alice")])).unwrap();
    let msg = model
        .listen()
        .expect("subscribed")
        .await
        .expect("first emission");
    model.update(msg);
    assert_eq!(displayed_ids(&model), vec!["c1"]);

    tx.send(Emission::new(vec![item("c1", "alice"), item("c2", "bob")]))
        .unwrap();
    let msg = model
        .listen()
        .expect("subscribed")
        .await
        .expect("second emission");
    model.update(msg);
    assert_eq!(displayed_ids(&model), vec!["c1", "c2"]);
}

#[tokio::test]
async fn shutdown_is_synchronous_and_final() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut model = list()
        .with_subscription(Subscription::new(rx))
        .with_pagination(|| Box::pin(async { Ok(()) }), || false);
    model.update(snapshot(vec![item("c1", "alice")]));

    let armed = model.listen().expect("subscribed");
    model.shutdown();
    assert!(!model.is_mounted());
    assert!(model.listen().is_none(), "subscription handle released");

    // A queued emission no longer reaches the model.
    tx.send(Emission::new(vec![item("c9", "mallory")])).unwrap();
    assert!(armed.await.is_none());

    // Messages after teardown are ignored entirely.
    assert!(model
        .update(snapshot(vec![item("c9", "mallory")]))
        .is_none());
    let near_bottom = Box::new(ScrollMsg {
        offset: 990,
        max_offset: 1000,
    }) as Msg;
    assert!(model.update(near_bottom).is_none());
    assert!(!model.is_loading_more());
    assert_eq!(displayed_ids(&model), vec!["c1"]);
}
