//! Input collection
//!
//! Browser key handlers push `InputEvent`s as they arrive; the game drains
//! them once per frame, in arrival order.

use std::collections::VecDeque;

use crate::sim::InputEvent;

#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Map a browser `KeyboardEvent.code` to an input
///
/// `pressed` is true for keydown, false for keyup. Unbound keys still
/// start or restart a run on keydown.
pub fn from_key_code(code: &str, pressed: bool) -> Option<InputEvent> {
    match (code, pressed) {
        ("Space" | "ArrowUp", true) => Some(InputEvent::Primary),
        ("ArrowDown", true) => Some(InputEvent::DuckBegin),
        ("ArrowDown", false) => Some(InputEvent::DuckEnd),
        (_, true) => Some(InputEvent::Start),
        (_, false) => None,
    }
}
