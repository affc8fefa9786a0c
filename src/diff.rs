//! Incremental diff engine for keyed item snapshots.
//!
//! Given two ordered snapshots of [`Item`]s, [`diff`] computes the sequence of
//! insert/remove operations that transforms the first into the second. The
//! transition controller replays these operations one at a time so every
//! appearing row can play an enter animation and every disappearing row an
//! exit animation.
//!
//! The algorithm is a greedy index alignment over id→position maps, not an
//! LCS: items whose ids keep their relative order are never touched, items
//! present on one side only cost exactly one operation, and a retained item
//! whose relative order changed moves as a remove followed by an insert.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_chatlist::diff::{apply, diff};
//! use bubbletea_chatlist::item::Item;
//! # #[derive(Clone, Debug, PartialEq)]
//! # struct Row(u64, &'static str);
//! # impl std::fmt::Display for Row {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//! #         write!(f, "{}", self.1)
//! #     }
//! # }
//! # impl Item for Row {
//! #     type Id = u64;
//! #     fn id(&self) -> u64 { self.0 }
//! #     fn filter_value(&self) -> String { self.1.to_string() }
//! # }
//!
//! let previous = vec![Row(1, "alice"), Row(2, "bob"), Row(3, "carol")];
//! let next = vec![Row(1, "alice"), Row(3, "carol"), Row(4, "dave")];
//!
//! let ops = diff(&previous, &next);
//! assert_eq!(ops.len(), 2); // remove "bob", insert "dave"
//!
//! let mut replayed = previous.clone();
//! apply(&mut replayed, &ops);
//! assert_eq!(replayed, next);
//! ```

use crate::item::Item;
use std::collections::{HashMap, HashSet};

/// A single edit in the sequence produced by [`diff`].
///
/// Operations carry the index at which they apply *at application time*:
/// replaying them in order against the previous snapshot, each index is valid
/// for the partially-transformed sequence at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<I: Item> {
    /// Insert `item` so that it ends up at `index`.
    Insert {
        /// Position the item occupies after insertion.
        index: usize,
        /// The item appearing in the list.
        item: I,
    },
    /// Remove the item currently at `index`.
    Remove {
        /// Position of the disappearing item.
        index: usize,
    },
}

/// Computes the operations that transform `previous` into `next`.
///
/// Replaying the returned operations in order against `previous` (see
/// [`apply`]) yields exactly `next`. The result is deterministic: the same
/// pair of snapshots always produces the same operation sequence.
///
/// Guarantees:
///
/// - Ids present in both snapshots with unchanged relative order produce no
///   operation; their (possibly edited) payload is carried by the caller, not
///   by the diff.
/// - An id present only in `previous` produces exactly one [`Operation::Remove`].
/// - An id present only in `next` produces exactly one [`Operation::Insert`].
/// - A retained id whose relative order changed produces one remove and one
///   insert.
///
/// `previous` is assumed id-unique (the transition controller maintains this
/// invariant for the displayed sequence). Duplicate ids in `next` are
/// tolerated: only the first occurrence of each id is considered, matching
/// [`dedup_by_id`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_chatlist::diff::diff;
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
/// // Identical snapshots diff to nothing.
/// let rows = vec![Row(1), Row(2)];
/// assert!(diff(&rows, &rows).is_empty());
///
/// // An empty previous snapshot is all insertions.
/// let ops = diff(&[], &rows);
/// assert_eq!(ops.len(), 2);
/// ```
pub fn diff<I: Item>(previous: &[I], next: &[I]) -> Vec<Operation<I>> {
    // First occurrence wins; later duplicates in `next` are ignored.
    let mut next_index: HashMap<I::Id, usize> = HashMap::with_capacity(next.len());
    let mut targets: Vec<&I> = Vec::with_capacity(next.len());
    for item in next {
        let id = item.id();
        if let std::collections::hash_map::Entry::Vacant(entry) = next_index.entry(id) {
            entry.insert(targets.len());
            targets.push(item);
        }
    }

    let mut ops = Vec::new();
    let mut working: Vec<I::Id> = previous.iter().map(Item::id).collect();

    // Pass 1: drop every id absent from `next`. Scanning in reverse keeps the
    // recorded indices valid as the working sequence shrinks.
    for i in (0..working.len()).rev() {
        if !next_index.contains_key(&working[i]) {
            ops.push(Operation::Remove { index: i });
            working.remove(i);
        }
    }

    // Pass 2: align the survivors with `next`. Positions before `target` are
    // already aligned, so an out-of-place retained id can only sit further
    // right in the working sequence.
    for (target, item) in targets.iter().enumerate() {
        let id = item.id();
        if working.get(target) == Some(&id) {
            continue;
        }
        if let Some(current) = working.iter().position(|w| *w == id) {
            ops.push(Operation::Remove { index: current });
            working.remove(current);
        }
        ops.push(Operation::Insert {
            index: target,
            item: (*item).clone(),
        });
        working.insert(target, id);
    }

    ops
}

/// Replays a diff against a sequence, in order.
///
/// After `apply(&mut items, &diff(&items, &next))`, `items` equals `next` up
/// to payload identity (the diff does not carry payload edits for retained
/// ids; callers refresh those separately).
pub fn apply<I: Item>(items: &mut Vec<I>, ops: &[Operation<I>]) {
    for op in ops {
        match op {
            Operation::Insert { index, item } => items.insert(*index, item.clone()),
            Operation::Remove { index } => {
                items.remove(*index);
            }
        }
    }
}

/// Drops every item whose id already occurred earlier in the sequence.
///
/// Snapshots are supposed to be id-unique; when an upstream source violates
/// that, the first occurrence is kept and the rest are discarded. This is the
/// same tolerance [`diff`] applies to its `next` argument.
pub fn dedup_by_id<I: Item>(items: Vec<I>) -> Vec<I> {
    let mut seen: HashSet<I::Id> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id()))
        .collect()
}
