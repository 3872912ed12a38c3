// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Undoable`] capability contract.

use alloc::rc::Rc;
use core::cell::RefCell;

/// Shared handle to an undoable object.
///
/// Cycles hold these by reference identity ([`Rc::ptr_eq`]); the entity
/// container owns the objects and is responsible for not letting a cycle
/// outlive them (permanent destruction means pruning the cycles that still
/// reference the object). `Rc`/`RefCell` rather than `Arc`/`Mutex`: the whole
/// undo machinery runs single-threaded on the document thread.
pub type UndoableRef = Rc<RefCell<dyn Undoable>>;

/// Capability of any object whose presence in the live document can be toggled
/// by undo/redo.
///
/// This is a narrow trait, not a base-class hierarchy: document entities and
/// non-entity markers (say, a layer visibility toggle) implement the same two
/// required methods and inherit the toggle/mark conveniences.
///
/// State machine per object: `Live` ⇄ `Deleted`, toggled indefinitely as
/// history is traversed back and forth. Objects start `Live`.
pub trait Undoable {
    /// Whether the object is currently flagged as deleted.
    fn is_deleted(&self) -> bool;

    /// Raw flag mutation. Does not fire [`deleted_state_changed`](Self::deleted_state_changed).
    fn set_deleted_flag(&mut self, deleted: bool);

    /// Hook invoked after a state change, with the new state.
    ///
    /// Entity containers typically use this to add or remove the object from
    /// visible indices. Default: no-op.
    fn deleted_state_changed(&mut self, deleted: bool) {
        let _ = deleted;
    }

    /// Stable diagnostic identity (an entity handle), or `None` for non-entity
    /// markers. Never used for cycle membership, only for dumps.
    fn entity_id(&self) -> Option<u64> {
        None
    }

    /// Toggle the deleted flag and fire the hook with the new state.
    fn change_delete_state(&mut self) {
        let next = !self.is_deleted();
        self.set_deleted_flag(next);
        self.deleted_state_changed(next);
    }

    /// Set (not toggle) the deleted flag and fire the hook with that value.
    fn mark(&mut self, deleted: bool) {
        self.set_deleted_flag(deleted);
        self.deleted_state_changed(deleted);
    }

    /// Convenience for `mark(true)`.
    fn mark_deleted(&mut self) {
        self.mark(true);
    }

    /// Convenience for `mark(false)`.
    fn mark_live(&mut self) {
        self.mark(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Flag {
        deleted: bool,
        notifications: u32,
        last_seen: Option<bool>,
    }

    impl Undoable for Flag {
        fn is_deleted(&self) -> bool {
            self.deleted
        }

        fn set_deleted_flag(&mut self, deleted: bool) {
            self.deleted = deleted;
        }

        fn deleted_state_changed(&mut self, deleted: bool) {
            self.notifications += 1;
            self.last_seen = Some(deleted);
        }
    }

    #[test]
    fn toggle_flips_and_notifies() {
        let mut f = Flag::default();
        assert!(!f.is_deleted());

        f.change_delete_state();
        assert!(f.is_deleted());
        assert_eq!(f.notifications, 1);
        assert_eq!(f.last_seen, Some(true));

        f.change_delete_state();
        assert!(!f.is_deleted());
        assert_eq!(f.notifications, 2);
        assert_eq!(f.last_seen, Some(false));
    }

    #[test]
    fn mark_is_not_a_toggle() {
        let mut f = Flag::default();
        f.mark_deleted();
        f.mark_deleted();
        assert!(f.is_deleted());
        // The hook fires per mark, even when the value does not change.
        assert_eq!(f.notifications, 2);

        f.mark_live();
        assert!(!f.is_deleted());
        assert_eq!(f.notifications, 3);
    }

    #[test]
    fn set_deleted_flag_is_silent() {
        let mut f = Flag::default();
        f.set_deleted_flag(true);
        assert!(f.is_deleted());
        assert_eq!(f.notifications, 0);
    }

    #[test]
    fn markers_have_no_entity_id() {
        let f = Flag::default();
        assert_eq!(f.entity_id(), None);
    }
}
