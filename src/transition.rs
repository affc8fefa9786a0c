//! Animated application of snapshot diffs.
//!
//! This component owns the *displayed* sequence of items. Callers never
//! splice it directly; they hand the latest snapshot to
//! [`Model::update_items`], which diffs it against what is currently shown
//! and turns each operation into a transition: entering rows fade in,
//! exiting rows linger as ghosts until their exit animation completes.
//!
//! Animation frames are driven the way the progress bar drives its spring:
//! a [`FrameMsg`] carrying the instance id and a generation tag, re-armed by
//! each [`Model::update`] call until every transition has settled. Frames
//! addressed to a previous generation (an earlier snapshot, or a cancelled
//! controller) are ignored.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_chatlist::transition;
//! use bubbletea_chatlist::item::Item;
//! # #[derive(Clone, Debug, PartialEq)]
//! # struct Row(u64);
//! # impl std::fmt::Display for Row {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//! #         write!(f, "{}", self.0)
//! #     }
//! # }
//! # impl Item for Row {
//! #     type Id = u64;
//! #     fn id(&self) -> u64 { self.0 }
//! #     fn filter_value(&self) -> String { String::new() }
//! # }
//! let mut list = transition::Model::new();
//!
//! // The first snapshot animates everything in.
//! let cmd = list.update_items(vec![Row(1), Row(2)]);
//! assert!(cmd.is_some());
//! assert_eq!(list.len(), 2);
//!
//! // The same snapshot again is a no-op: no operations, no animation.
//! assert!(list.update_items(vec![Row(1), Row(2)]).is_none());
//! ```

use crate::diff::{self, Operation};
use crate::item::Item;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for controller instances.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Frame rate of enter/exit transitions.
const FPS: u64 = 30;

/// Frames a transition takes from start to settled (180ms at 30 FPS).
const TRANSITION_FRAMES: u8 = 6;

/// Message advancing this controller's transitions by one frame.
///
/// Routed by instance id and generation tag; frames belonging to an earlier
/// snapshot generation are rejected, which keeps a fresh snapshot from being
/// animated at double rate by a leftover frame chain.
#[derive(Debug)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

/// Which transition a displayed entry is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The entry appeared in the latest snapshot and is animating in.
    Entering,
    /// The entry left the latest snapshot and is animating out. It is no
    /// longer part of the logical sequence but still occupies a row.
    Exiting,
}

/// One physically displayed row: the item plus its transition state.
#[derive(Debug, Clone)]
pub struct Entry<I: Item> {
    item: I,
    phase: Option<Phase>,
    frame: u8,
}

impl<I: Item> Entry<I> {
    /// The item occupying this row.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// The transition being played, or `None` once settled.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Transition progress in `0.0..=1.0`; settled entries report `1.0`.
    pub fn progress(&self) -> f64 {
        match self.phase {
            None => 1.0,
            Some(_) => (f64::from(self.frame) / f64::from(TRANSITION_FRAMES)).min(1.0),
        }
    }
}

/// The animated list controller.
///
/// Owns the displayed sequence for the lifetime of the list view. All
/// mutation goes through [`Model::update_items`] (snapshot reconciliation)
/// and [`Model::update`] (frame advancement).
pub struct Model<I: Item> {
    id: i64,
    tag: i64,
    entries: Vec<Entry<I>>,
}

impl<I: Item + Send + Sync + 'static> Default for Model<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item + Send + Sync + 'static> Model<I> {
    /// Creates an empty controller.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            entries: Vec::new(),
        }
    }

    /// Reconciles the displayed sequence with a new snapshot.
    ///
    /// Computes the diff against the current logical sequence and applies it:
    /// one transition starts per operation, in the order the diff produced
    /// them. Items retained under the same id have their payload refreshed in
    /// place without any animation.
    ///
    /// Returns the command driving the transition frames, or `None` when the
    /// snapshot required no operations, so calling this twice in a row with
    /// the same snapshot is idempotent.
    ///
    /// Duplicate ids in `next` are de-duplicated by first occurrence before
    /// diffing; this never fails.
    pub fn update_items(&mut self, next: Vec<I>) -> Option<Cmd> {
        let next = diff::dedup_by_id(next);
        let current: Vec<I> = self.items();
        let ops = diff::diff(&current, &next);

        // Retained ids may carry edited payloads; refresh them regardless of
        // whether any structural operation happened.
        let by_id: HashMap<I::Id, usize> = next
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id(), index))
            .collect();
        for entry in &mut self.entries {
            if entry.phase == Some(Phase::Exiting) {
                continue;
            }
            if let Some(&index) = by_id.get(&entry.item.id()) {
                entry.item = next[index].clone();
            }
        }

        if ops.is_empty() {
            return None;
        }

        for op in &ops {
            match op {
                Operation::Remove { index } => {
                    let position = self.physical_index(*index);
                    let entry = &mut self.entries[position];
                    entry.phase = Some(Phase::Exiting);
                    entry.frame = 0;
                }
                Operation::Insert { index, item } => {
                    let position = self.physical_index(*index);
                    self.entries.insert(
                        position,
                        Entry {
                            item: item.clone(),
                            phase: Some(Phase::Entering),
                            frame: 0,
                        },
                    );
                }
            }
        }

        // A new generation: any frame chain from the previous snapshot is
        // rejected from here on.
        self.tag += 1;
        Some(self.next_frame())
    }

    /// Advances transitions when `msg` is a [`FrameMsg`] for this controller.
    ///
    /// Finished exits are dropped from the displayed sequence, finished
    /// entries settle in place. Returns the next frame command while any
    /// transition is still playing.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let frame = msg.downcast_ref::<FrameMsg>()?;
        if frame.id != self.id || frame.tag != self.tag {
            return None;
        }
        if !self.is_animating() {
            return None;
        }

        for entry in &mut self.entries {
            if entry.phase.is_some() {
                entry.frame = entry.frame.saturating_add(1);
            }
        }
        self.entries
            .retain(|entry| !(entry.phase == Some(Phase::Exiting) && entry.frame >= TRANSITION_FRAMES));
        for entry in &mut self.entries {
            if entry.phase == Some(Phase::Entering) && entry.frame >= TRANSITION_FRAMES {
                entry.phase = None;
            }
        }

        if self.is_animating() {
            Some(self.next_frame())
        } else {
            None
        }
    }

    /// The logical displayed sequence: everything except exiting ghosts.
    ///
    /// This is the sequence the next snapshot is diffed against, and it
    /// already equals the latest snapshot the moment [`Model::update_items`]
    /// returns. Transitions only affect how rows are drawn, not what the
    /// list contains.
    pub fn items(&self) -> Vec<I> {
        self.entries
            .iter()
            .filter(|entry| entry.phase != Some(Phase::Exiting))
            .map(|entry| entry.item.clone())
            .collect()
    }

    /// Every physically displayed row, exiting ghosts included, in render
    /// order.
    pub fn entries(&self) -> &[Entry<I>] {
        &self.entries
    }

    /// Number of items in the logical sequence.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.phase != Some(Phase::Exiting))
            .count()
    }

    /// Whether the logical sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any transition is still playing.
    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|entry| entry.phase.is_some())
    }

    /// Stops all transitions and invalidates any in-flight frame messages.
    ///
    /// Exiting ghosts are dropped and entering rows settle immediately.
    /// Called at view teardown so a late frame cannot mutate state.
    pub fn cancel(&mut self) {
        self.tag += 1;
        self.entries
            .retain(|entry| entry.phase != Some(Phase::Exiting));
        for entry in &mut self.entries {
            entry.phase = None;
        }
    }

    // Physical position of the `logical`-th non-exiting entry; past-the-end
    // when `logical` equals the logical length.
    fn physical_index(&self, logical: usize) -> usize {
        let mut seen = 0;
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.phase != Some(Phase::Exiting) {
                if seen == logical {
                    return position;
                }
                seen += 1;
            }
        }
        self.entries.len()
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let duration = Duration::from_nanos(1_000_000_000 / FPS);

        bubbletea_tick(duration, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Row {
        id: u32,
        label: String,
    }

    impl Row {
        fn new(id: u32, label: &str) -> Self {
            Self {
                id,
                label: label.to_string(),
            }
        }
    }

    impl std::fmt::Display for Row {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.label)
        }
    }

    impl Item for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn filter_value(&self) -> String {
            self.label.clone()
        }
    }

    fn frame_msg(model: &Model<Row>) -> Msg {
        Box::new(FrameMsg {
            id: model.id,
            tag: model.tag,
        })
    }

    fn settle(model: &mut Model<Row>) {
        // Drive frames until every transition has finished.
        for _ in 0..=TRANSITION_FRAMES {
            let msg = frame_msg(model);
            model.update(&msg);
        }
        assert!(!model.is_animating());
    }

    fn ids(model: &Model<Row>) -> Vec<u32> {
        model.items().iter().map(|row| row.id).collect()
    }

    #[test]
    fn first_snapshot_enters_everything() {
        let mut model = Model::new();
        let cmd = model.update_items(vec![Row::new(1, "A"), Row::new(2, "B")]);
        assert!(cmd.is_some());
        assert_eq!(ids(&model), vec![1, 2]);
        assert!(model.is_animating());
        assert!(model
            .entries()
            .iter()
            .all(|entry| entry.phase() == Some(Phase::Entering)));
    }

    #[test]
    fn same_snapshot_twice_is_idempotent() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "A")]);
        settle(&mut model);
        assert!(model.update_items(vec![Row::new(1, "A")]).is_none());
        assert!(!model.is_animating());
    }

    #[test]
    fn removal_leaves_a_ghost_until_settled() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "A"), Row::new(2, "B"), Row::new(3, "C")]);
        settle(&mut model);

        model.update_items(vec![Row::new(1, "A"), Row::new(3, "C"), Row::new(4, "D")]);

        // Logically the new snapshot is already in effect.
        assert_eq!(ids(&model), vec![1, 3, 4]);
        // Physically the removed row still animates out in place.
        assert_eq!(model.entries().len(), 4);
        assert_eq!(
            model.entries()[1].phase(),
            Some(Phase::Exiting),
            "the ghost keeps its old position"
        );

        settle(&mut model);
        assert_eq!(model.entries().len(), 3);
        assert_eq!(ids(&model), vec![1, 3, 4]);
    }

    #[test]
    fn payload_edit_refreshes_without_animation() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "before")]);
        settle(&mut model);

        let cmd = model.update_items(vec![Row::new(1, "after")]);
        assert!(cmd.is_none());
        assert_eq!(model.items()[0].label, "after");
        assert!(!model.is_animating());
    }

    #[test]
    fn duplicate_ids_are_deduplicated() {
        let mut model = Model::new();
        model.update_items(vec![
            Row::new(1, "first"),
            Row::new(1, "duplicate"),
            Row::new(2, "B"),
        ]);
        assert_eq!(ids(&model), vec![1, 2]);
        assert_eq!(model.items()[0].label, "first");
    }

    #[test]
    fn stale_frames_are_rejected() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "A")]);
        let stale = Box::new(FrameMsg {
            id: model.id,
            tag: model.tag - 1,
        }) as Msg;
        assert!(model.update(&stale).is_none());
        // No frame advanced.
        assert_eq!(model.entries()[0].frame, 0);
    }

    #[test]
    fn frames_for_other_instances_are_rejected() {
        let mut a: Model<Row> = Model::new();
        let b: Model<Row> = Model::new();
        a.update_items(vec![Row::new(1, "A")]);
        let foreign = Box::new(FrameMsg { id: b.id, tag: a.tag }) as Msg;
        assert!(a.update(&foreign).is_none());
    }

    #[test]
    fn cancel_drops_ghosts_and_settles() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "A"), Row::new(2, "B")]);
        settle(&mut model);
        model.update_items(vec![Row::new(1, "A")]);
        assert!(model.is_animating());

        let stale = frame_msg(&model);
        model.cancel();
        assert!(!model.is_animating());
        assert_eq!(model.entries().len(), 1);
        // A frame issued before the cancel no longer lands.
        assert!(model.update(&stale).is_none());
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut model = Model::new();
        model.update_items(vec![Row::new(1, "A")]);
        assert_eq!(model.entries()[0].progress(), 0.0);

        let msg = frame_msg(&model);
        model.update(&msg);
        let mid = model.entries()[0].progress();
        assert!(mid > 0.0 && mid < 1.0);

        settle(&mut model);
        assert_eq!(model.entries()[0].progress(), 1.0);
    }
}
