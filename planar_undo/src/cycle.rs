// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`UndoCycle`]: one atomic group of undoable state flips.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::undoable::UndoableRef;

/// One unit of undo/redo history.
///
/// A cycle groups every undoable whose deleted/live flag should flip together
/// when the user steps past this point in history. Membership is a set by
/// reference identity: adding the same handle twice is a no-op, and insertion
/// order is preserved for iteration and notification.
#[derive(Default)]
pub struct UndoCycle {
    undoables: Vec<UndoableRef>,
}

impl UndoCycle {
    /// Create an empty cycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `u` to the member set. No-op if an identical handle is already a
    /// member.
    pub fn add_undoable(&mut self, u: UndoableRef) {
        if !self.contains(&u) {
            self.undoables.push(u);
        }
    }

    /// Remove `u` from the member set. No-op if absent.
    pub fn remove_undoable(&mut self, u: &UndoableRef) {
        self.undoables.retain(|m| !Rc::ptr_eq(m, u));
    }

    /// Whether `u` is a member (by reference identity).
    pub fn contains(&self, u: &UndoableRef) -> bool {
        self.undoables.iter().any(|m| Rc::ptr_eq(m, u))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.undoables.len()
    }

    /// True if the cycle has no members.
    pub fn is_empty(&self) -> bool {
        self.undoables.is_empty()
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &UndoableRef> {
        self.undoables.iter()
    }

    /// Toggle every member's deleted flag, firing each member's
    /// [`deleted_state_changed`](crate::Undoable::deleted_state_changed) hook
    /// exactly once, in insertion order.
    ///
    /// Invoked once per undo or redo step that crosses this cycle.
    pub fn change_undo_state(&self) {
        for m in &self.undoables {
            m.borrow_mut().change_delete_state();
        }
    }
}

/// Diagnostic dump of the member set.
///
/// One token per member: `#<id>` for entity-backed members, `(marker)` for
/// non-entity undoables, with `*` appended for members currently deleted.
impl core::fmt::Display for UndoCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;
        for (i, m) in self.undoables.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let m = m.borrow();
            match m.entity_id() {
                Some(id) => write!(f, "#{id}")?,
                None => write!(f, "(marker)")?,
            }
            if m.is_deleted() {
                write!(f, "*")?;
            }
        }
        write!(f, "]")
    }
}

impl core::fmt::Debug for UndoCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UndoCycle")
            .field("members", &self.undoables.len())
            .finish_non_exhaustive()
    }
}
