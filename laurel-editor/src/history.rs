/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::collections::VecDeque;

use laurel_core::Design;

/// Maximum depth of each history stack; the oldest snapshot is evicted when
/// a push would exceed it.
pub const HISTORY_LIMIT: usize = 20;

/// Bounded undo/redo history over whole-design snapshots. `present` lives
/// outside the stacks; every mutating action goes through [`History::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    present: Design,
    past: VecDeque<Design>,
    future: VecDeque<Design>,
}

impl History {
    pub fn new(present: Design) -> Self {
        Self {
            present,
            past: VecDeque::new(),
            future: VecDeque::new(),
        }
    }

    pub fn present(&self) -> &Design {
        &self.present
    }

    /// Pushes the current design onto the past stack and replaces it.
    /// Any redoable future is discarded.
    pub fn record(&mut self, new_design: Design) {
        self.past.push_back(std::mem::replace(&mut self.present, new_design));
        if self.past.len() > HISTORY_LIMIT {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Steps back one snapshot. Returns false (and changes nothing) when the
    /// past stack is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future
            .push_back(std::mem::replace(&mut self.present, previous));
        if self.future.len() > HISTORY_LIMIT {
            self.future.pop_front();
        }
        true
    }

    /// Steps forward one snapshot. Returns false (and changes nothing) when
    /// the future stack is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_back() else {
            return false;
        };
        self.past
            .push_back(std::mem::replace(&mut self.present, next));
        if self.past.len() > HISTORY_LIMIT {
            self.past.pop_front();
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::{Background, BackgroundKind};

    fn design_with_color(color: &str) -> Design {
        let mut design = Design::blank();
        design.background = Background {
            kind: BackgroundKind::Color,
            value: color.to_string(),
            opacity: 1.0,
        };
        design
    }

    #[test]
    fn record_then_undo_restores_previous() {
        let mut history = History::new(design_with_color("#000000"));
        history.record(design_with_color("#111111"));
        assert!(history.can_undo());

        assert!(history.undo());
        assert_eq!(history.present().background.value, "#000000");
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.present().background.value, "#111111");
    }

    #[test]
    fn first_edit_is_undoable() {
        let mut history = History::new(design_with_color("#000000"));
        history.record(design_with_color("#111111"));
        assert_eq!(history.past_len(), 1);
        assert!(history.undo());
        assert_eq!(history.present().background.value, "#000000");
    }

    #[test]
    fn undo_on_empty_past_is_a_noop() {
        let mut history = History::new(design_with_color("#000000"));
        let before = history.clone();
        assert!(!history.undo());
        assert_eq!(history, before);
    }

    #[test]
    fn redo_on_empty_future_is_a_noop() {
        let mut history = History::new(design_with_color("#000000"));
        history.record(design_with_color("#111111"));
        let before = history.clone();
        assert!(!history.redo());
        assert_eq!(history, before);
    }

    #[test]
    fn record_after_undo_clears_future() {
        let mut history = History::new(design_with_color("#000000"));
        history.record(design_with_color("#111111"));
        history.record(design_with_color("#222222"));
        history.undo();
        assert_eq!(history.future_len(), 1);

        history.record(design_with_color("#333333"));
        assert_eq!(history.future_len(), 0);
        assert!(!history.can_redo());
    }

    #[test]
    fn past_is_bounded_with_oldest_evicted() {
        let mut history = History::new(design_with_color("#000000"));
        for i in 0..25 {
            history.record(design_with_color(&format!("#{i:06x}")));
        }
        assert_eq!(history.past_len(), HISTORY_LIMIT);

        // drain the stack: the five oldest snapshots are gone
        while history.undo() {}
        assert_eq!(history.present().background.value, "#000004");
    }

    #[test]
    fn round_trip_reproduces_recorded_sequence() {
        let snapshots: Vec<Design> = (0..12)
            .map(|i| design_with_color(&format!("#{i:06x}")))
            .collect();
        let mut history = History::new(snapshots[0].clone());
        for snapshot in &snapshots[1..] {
            history.record(snapshot.clone());
        }

        for expected in snapshots[..11].iter().rev() {
            assert!(history.undo());
            assert_eq!(history.present(), expected);
        }
        assert!(!history.can_undo());

        for expected in &snapshots[1..] {
            assert!(history.redo());
            assert_eq!(history.present(), expected);
        }
        assert_eq!(history.present(), &snapshots[11]);
        assert!(!history.can_redo());
    }
}
