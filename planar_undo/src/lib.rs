// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar Undo: atomic undo cycles and a chronological undo/redo history.
//!
//! Planar Undo is a reusable building block for document editors: it groups
//! reversible delete/live-state flips into atomic units (cycles) so one undo
//! or redo restores or removes a consistent batch of entities together.
//!
//! - [`Undoable`]: narrow capability trait for anything whose deleted/live
//!   flag can be toggled by history traversal, with a change-notification
//!   hook for entity containers.
//! - [`UndoCycle`]: one unit of history; a reference-identity set of
//!   undoables toggled all together by [`UndoCycle::change_undo_state`].
//! - [`UndoHistory`]: the ordered cycle list plus redo pointer, with nested
//!   `start`/`end` cycle recording, redo-tail pruning, and a scope-bound
//!   [`UndoSection`](crate::UndoSection) guard.
//!
//! Everything runs single-threaded on the document thread; members are shared
//! as [`UndoableRef`] (`Rc<RefCell<dyn Undoable>>`) and no operation blocks,
//! suspends, or fails. History-manager transitions are traced through the
//! [`log`] facade.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use planar_undo::{Undoable, UndoHistory};
//!
//! struct Line {
//!     deleted: bool,
//! }
//!
//! impl Undoable for Line {
//!     fn is_deleted(&self) -> bool {
//!         self.deleted
//!     }
//!     fn set_deleted_flag(&mut self, deleted: bool) {
//!         self.deleted = deleted;
//!     }
//! }
//!
//! let mut history = UndoHistory::new();
//! let line = Rc::new(RefCell::new(Line { deleted: false }));
//!
//! // One user action: record the entities it touched.
//! history.start_undo_cycle();
//! history.add_undoable(line.clone());
//! history.end_undo_cycle();
//!
//! assert!(history.undo());
//! assert!(line.borrow().is_deleted());
//!
//! assert!(history.redo());
//! assert!(!line.borrow().is_deleted());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cycle;
pub mod history;
pub mod undoable;

pub use cycle::UndoCycle;
pub use history::{UndoHistory, UndoSection, UndoState};
pub use undoable::{Undoable, UndoableRef};
