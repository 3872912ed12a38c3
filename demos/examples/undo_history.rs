// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo history walkthrough.
//!
//! Record a few cycles, walk history back and forth, and print the dump.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p planar_demos --example undo_history`

use std::cell::RefCell;
use std::rc::Rc;

use planar_undo::{Undoable, UndoHistory};

struct Entity {
    id: u64,
    deleted: bool,
}

impl Entity {
    fn shared(id: u64) -> Rc<RefCell<Entity>> {
        Rc::new(RefCell::new(Entity { id, deleted: false }))
    }
}

impl Undoable for Entity {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted_flag(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    fn deleted_state_changed(&mut self, deleted: bool) {
        // An entity container would resync its visible indices here.
        log::info!("entity #{} -> {}", self.id, if deleted { "deleted" } else { "live" });
    }

    fn entity_id(&self) -> Option<u64> {
        Some(self.id)
    }
}

fn main() {
    env_logger::init();

    let mut history = UndoHistory::new();

    // Three user actions, one entity each.
    for id in 1..=3 {
        let mut section = history.section();
        section.add_undoable(Entity::shared(id));
    }

    println!("{history}");

    // Step back twice.
    assert!(history.undo());
    assert!(history.undo());
    println!("after two undos:\n{history}");

    // A fresh action discards the redo tail.
    let mut section = history.section();
    section.add_undoable(Entity::shared(4));
    drop(section);
    println!("after a new action:\n{history}");

    let state = history.state();
    println!(
        "undo available: {}, redo available: {}",
        state.undo_available, state.redo_available
    );
}
