// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`UndoHistory`]: the chronological list of undo cycles and the redo pointer.

use alloc::vec::Vec;
use log::{debug, warn};

use crate::cycle::UndoCycle;
use crate::undoable::UndoableRef;

/// Snapshot of whether undo/redo steps are currently possible.
///
/// The UI layer polls this after each document modification to enable or
/// disable its undo/redo affordances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UndoState {
    /// At least one cycle can be undone.
    pub undo_available: bool,
    /// At least one cycle can be redone.
    pub redo_available: bool,
}

/// Ordered undo/redo history over [`UndoCycle`]s.
///
/// Cycles before the redo pointer are undoable, cycles at or after it are
/// redoable. Exactly one [`UndoCycle::change_undo_state`] call is made per
/// undo/redo step, in strict chronological (stack) order.
///
/// A cycle is recorded between [`start_undo_cycle`](Self::start_undo_cycle)
/// and [`end_undo_cycle`](Self::end_undo_cycle); those calls nest, and only
/// the outermost pair opens and closes the cycle. Starting a new cycle
/// discards the redo tail, as in any linear-history editor.
///
/// History depth is unbounded; eviction policy, if any, belongs to the owning
/// document layer.
#[derive(Default)]
pub struct UndoHistory {
    cycles: Vec<UndoCycle>,
    redo_pointer: usize,
    current: Option<UndoCycle>,
    depth: u32,
}

impl UndoHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cycles that can be undone.
    pub fn undo_cycle_count(&self) -> usize {
        self.redo_pointer
    }

    /// Number of cycles that can be redone.
    pub fn redo_cycle_count(&self) -> usize {
        self.cycles.len() - self.redo_pointer
    }

    /// True when a cycle is open and has at least one member.
    pub fn has_undoable(&self) -> bool {
        self.current.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Open a new cycle at the current history position.
    ///
    /// Nested calls are counted and ignored past the first; every undoable
    /// added before the matching [`end_undo_cycle`](Self::end_undo_cycle)
    /// lands in this cycle. Any redoable tail is discarded: its cycles drop
    /// their member references, and permanently destroying now-unreachable
    /// entities is the container's concern.
    pub fn start_undo_cycle(&mut self) {
        self.depth += 1;
        if self.depth > 1 {
            // Only the first fresh top-level call starts a new cycle.
            return;
        }

        if self.redo_pointer < self.cycles.len() {
            let pruned = self.cycles.len() - self.redo_pointer;
            self.cycles.truncate(self.redo_pointer);
            debug!("start_undo_cycle: pruned {pruned} redo cycles");
        }
        self.current = Some(UndoCycle::new());
    }

    /// Add an undoable to the currently open cycle.
    ///
    /// Logs a warning and does nothing when no cycle is open; stale calls are
    /// common during rapid user actions and must not fail.
    pub fn add_undoable(&mut self, u: UndoableRef) {
        match &mut self.current {
            Some(cycle) => cycle.add_undoable(u),
            None => warn!("add_undoable without an open cycle, possibly missing start_undo_cycle"),
        }
    }

    /// Close the cycle opened by the matching
    /// [`start_undo_cycle`](Self::start_undo_cycle).
    ///
    /// Only the outermost call closes; the cycle is kept in history only if it
    /// has members. An unbalanced call logs a warning and does nothing.
    pub fn end_undo_cycle(&mut self) {
        if self.depth == 0 {
            warn!("end_undo_cycle without previous start_undo_cycle");
            return;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return;
        }

        if let Some(cycle) = self.current.take()
            && !cycle.is_empty()
        {
            self.cycles.push(cycle);
            self.redo_pointer = self.cycles.len();
        }
    }

    /// Undo the most recent cycle. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.redo_pointer == 0 {
            return false;
        }
        self.redo_pointer -= 1;
        debug!("undo: cycle {}", self.redo_pointer);
        self.cycles[self.redo_pointer].change_undo_state();
        true
    }

    /// Redo the cycle undone last. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        if self.redo_pointer == self.cycles.len() {
            return false;
        }
        debug!("redo: cycle {}", self.redo_pointer);
        self.cycles[self.redo_pointer].change_undo_state();
        self.redo_pointer += 1;
        true
    }

    /// Current undo/redo availability.
    pub fn state(&self) -> UndoState {
        UndoState {
            undo_available: self.redo_pointer > 0,
            redo_available: self.redo_pointer < self.cycles.len(),
        }
    }

    /// Iterate recorded cycles in chronological order.
    pub fn cycles(&self) -> impl Iterator<Item = &UndoCycle> {
        self.cycles.iter()
    }

    /// Open a scope-bound cycle: the returned guard closes it on drop.
    pub fn section(&mut self) -> UndoSection<'_> {
        self.start_undo_cycle();
        UndoSection { history: self }
    }
}

/// Scope guard over one undo cycle.
///
/// Created by [`UndoHistory::section`]; the cycle is closed when the guard is
/// dropped, so a document-modification batch cannot leave a cycle open on an
/// early return.
#[derive(Debug)]
pub struct UndoSection<'a> {
    history: &'a mut UndoHistory,
}

impl UndoSection<'_> {
    /// Add an undoable to the cycle this section opened.
    pub fn add_undoable(&mut self, u: UndoableRef) {
        self.history.add_undoable(u);
    }
}

impl Drop for UndoSection<'_> {
    fn drop(&mut self) {
        self.history.end_undo_cycle();
    }
}

/// Dump of the history list, one cycle per line, with the redo pointer
/// position marked by `-->`.
impl core::fmt::Display for UndoHistory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "undo history (redo pointer at {}):", self.redo_pointer)?;
        for (i, cycle) in self.cycles.iter().enumerate() {
            let marker = if i == self.redo_pointer { "-->" } else { "   " };
            writeln!(f, " {marker} {cycle}")?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for UndoHistory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UndoHistory")
            .field("cycles", &self.cycles.len())
            .field("redo_pointer", &self.redo_pointer)
            .field("open", &self.current.is_some())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
