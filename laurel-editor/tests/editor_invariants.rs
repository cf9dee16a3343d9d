/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Property tests for the editor core invariants: the history round-trip
//! law, stack bounds, snap idempotence, clamping, and zoom ladder closure.

use laurel_core::{Background, BackgroundKind, Design, Dimensions, Frame};
use laurel_editor::interact::{self, GRID_UNIT, Handle, MIN_ELEMENT_SIZE};
use laurel_editor::viewport::{ZOOM_LADDER, Viewport, fit_zoom};
use laurel_editor::{HISTORY_LIMIT, History};
use proptest::prelude::*;

fn design_numbered(n: u32) -> Design {
    let mut design = Design::blank();
    design.background = Background {
        kind: BackgroundKind::Color,
        value: format!("#{n:06x}"),
        opacity: 1.0,
    };
    design
}

proptest! {
    #[test]
    fn history_round_trip_law(k in 1usize..=HISTORY_LIMIT) {
        let snapshots: Vec<Design> = (0..=k as u32).map(design_numbered).collect();
        let mut history = History::new(snapshots[0].clone());
        for snapshot in &snapshots[1..] {
            history.record(snapshot.clone());
        }

        // k undos walk the recorded sequence backwards
        for expected in snapshots[..k].iter().rev() {
            prop_assert!(history.undo());
            prop_assert_eq!(history.present(), expected);
        }
        prop_assert!(!history.can_undo());

        // k redos walk it forwards again, ending at the final record
        for expected in &snapshots[1..] {
            prop_assert!(history.redo());
            prop_assert_eq!(history.present(), expected);
        }
        prop_assert_eq!(history.present(), &snapshots[k]);
    }

    #[test]
    fn history_stacks_stay_bounded(ops in proptest::collection::vec(0u8..3, 0..200)) {
        let mut history = History::new(design_numbered(0));
        let mut n = 1u32;
        for op in ops {
            match op {
                0 => {
                    history.record(design_numbered(n));
                    n += 1;
                }
                1 => {
                    history.undo();
                }
                _ => {
                    history.redo();
                }
            }
            prop_assert!(history.past_len() <= HISTORY_LIMIT);
            prop_assert!(history.future_len() <= HISTORY_LIMIT);
        }
    }

    #[test]
    fn record_always_clears_future(undos in 1usize..10) {
        let mut history = History::new(design_numbered(0));
        for n in 1..=10u32 {
            history.record(design_numbered(n));
        }
        for _ in 0..undos {
            history.undo();
        }
        history.record(design_numbered(99));
        prop_assert_eq!(history.future_len(), 0);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn snap_is_idempotent(value in -1e6f32..1e6f32) {
        let once = interact::snap(value, GRID_UNIT);
        prop_assert_eq!(interact::snap(once, GRID_UNIT), once);
    }

    #[test]
    fn dragged_frame_never_goes_negative(
        x in 0.0f32..2000.0,
        y in 0.0f32..2000.0,
        dx in -5000.0f32..5000.0,
        dy in -5000.0f32..5000.0,
        snap_enabled: bool,
    ) {
        let start = Frame::new(x, y, 120.0, 80.0);
        let moved = interact::drag_frame(start, dx, dy, snap_enabled);
        prop_assert!(moved.x >= 0.0);
        prop_assert!(moved.y >= 0.0);
        prop_assert_eq!(moved.width, start.width);
        prop_assert_eq!(moved.height, start.height);
    }

    #[test]
    fn resized_frame_respects_minimums(
        x in 0.0f32..1000.0,
        y in 0.0f32..1000.0,
        w in MIN_ELEMENT_SIZE..500.0f32,
        h in MIN_ELEMENT_SIZE..500.0f32,
        dx in -2000.0f32..2000.0,
        dy in -2000.0f32..2000.0,
        handle_index in 0usize..4,
        snap_enabled: bool,
    ) {
        let handle = Handle::ALL[handle_index];
        let start = Frame::new(x, y, w, h);
        let resized = interact::resize_frame(handle, start, dx, dy, snap_enabled);
        prop_assert!(resized.width >= MIN_ELEMENT_SIZE);
        prop_assert!(resized.height >= MIN_ELEMENT_SIZE);
        prop_assert!(resized.x >= 0.0);
        prop_assert!(resized.y >= 0.0);
    }

    #[test]
    fn zoom_stepping_never_leaves_the_ladder(steps in proptest::collection::vec(any::<bool>(), 0..40)) {
        let mut viewport = Viewport::default();
        for step_in in steps {
            if step_in {
                viewport.zoom_in();
            } else {
                viewport.zoom_out();
            }
            prop_assert!(ZOOM_LADDER.contains(&viewport.zoom_percent));
        }
    }

    #[test]
    fn fit_to_screen_is_clamped_and_on_ladder(
        cw in 0.0f32..6000.0,
        ch in 0.0f32..6000.0,
        dw in 1u32..4000,
        dh in 1u32..4000,
    ) {
        let zoom = fit_zoom(cw, ch, Dimensions { width: dw, height: dh });
        prop_assert!((25..=100).contains(&zoom));
        prop_assert!(ZOOM_LADDER.contains(&zoom));
    }
}
