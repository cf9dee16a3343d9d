/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use laurel_core::{Background, Design, Element, ElementKind, ElementKindTag, Frame};
use tracing::debug;

use crate::history::History;
use crate::interact::{self, Handle, Interaction, GRID_UNIT};
use crate::session::SaveSession;
use crate::viewport::Viewport;

/// The whole ephemeral editor state: one explicit value owned by the hosting
/// shell, never a module-level singleton. Every mutation flows through the
/// history manager; pointer interactions stage a live frame and commit one
/// atomic edit on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    history: History,
    interaction: Interaction,
    pub selected_element_id: Option<String>,
    pub viewport: Viewport,
    pub grid_visible: bool,
    pub snap_to_grid: bool,
    pub session: SaveSession,
    editable: bool,
    id_counter: u64,
}

impl EditorState {
    /// Receives one design plus the editable flag at mount. Read-only mode
    /// disables every mutating entry point but keeps pan/zoom working.
    pub fn mount(design: Design, editable: bool) -> Self {
        let session = SaveSession::mounted(&design);
        Self {
            history: History::new(design),
            interaction: Interaction::Idle,
            selected_element_id: None,
            viewport: Viewport::default(),
            grid_visible: true,
            snap_to_grid: true,
            session,
            editable,
            id_counter: 0,
        }
    }

    pub fn design(&self) -> &Design {
        self.history.present()
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn can_undo(&self) -> bool {
        self.editable && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editable && self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The frame to draw for an element right now: the staged interaction
    /// frame while it is being dragged or resized, its committed frame
    /// otherwise.
    pub fn effective_frame(&self, id: &str) -> Option<Frame> {
        if self.interaction.active_element_id() == Some(id) {
            if let Some(live) = self.interaction.live_frame() {
                return Some(live);
            }
        }
        self.design().element(id).map(|e| e.frame)
    }

    /// Element indices in paint order. The interacting element is raised
    /// above its siblings for the duration and falls back to list order
    /// afterwards.
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.design().elements.len()).collect();
        if let Some(active) = self.interaction.active_element_id() {
            if let Some(index) = self.design().element_index(active) {
                order.retain(|&i| i != index);
                order.push(index);
            }
        }
        order
    }

    // ---- selection ----

    pub fn select(&mut self, id: &str) -> bool {
        if !self.editable || self.design().element(id).is_none() {
            return false;
        }
        self.selected_element_id = Some(id.to_string());
        true
    }

    /// Click on empty canvas.
    pub fn clear_selection(&mut self) {
        self.selected_element_id = None;
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected_element_id
            .as_deref()
            .and_then(|id| self.design().element(id))
    }

    // ---- recorded edits ----

    fn record(&mut self, new_design: Design) {
        self.history.record(new_design);
    }

    fn may_edit(&self) -> bool {
        self.editable && self.interaction.is_idle()
    }

    /// Adds an element of the given kind with its type-specific default
    /// frame and payload, selects it, and records the edit. Returns the
    /// generated id.
    pub fn add_element(&mut self, kind: ElementKindTag) -> Option<String> {
        if !self.may_edit() {
            return None;
        }
        let content = ElementKind::default_content(kind);
        let id = self.fresh_element_id(content.slug());
        let mut next = self.design().clone();
        next.elements.push(Element {
            id: id.clone(),
            frame: ElementKind::default_frame(kind),
            style: Default::default(),
            kind: content,
        });
        self.record(next);
        self.selected_element_id = Some(id.clone());
        debug!(%id, "element added");
        Some(id)
    }

    /// Removes the selected element and clears the selection.
    pub fn delete_selected(&mut self) -> bool {
        if !self.may_edit() {
            return false;
        }
        let Some(id) = self.selected_element_id.clone() else {
            return false;
        };
        let Some(index) = self.design().element_index(&id) else {
            return false;
        };
        let mut next = self.design().clone();
        next.elements.remove(index);
        self.record(next);
        self.selected_element_id = None;
        debug!(%id, "element deleted");
        true
    }

    /// Copies the selected element under a fresh id, nudged one grid unit,
    /// and selects the copy.
    pub fn duplicate_selected(&mut self) -> Option<String> {
        if !self.may_edit() {
            return None;
        }
        let source = self.selected_element()?.clone();
        let id = self.fresh_element_id(source.kind.slug());
        let mut copy = source;
        copy.id = id.clone();
        copy.frame.x += GRID_UNIT;
        copy.frame.y += GRID_UNIT;
        let mut next = self.design().clone();
        next.elements.push(copy);
        self.record(next);
        self.selected_element_id = Some(id.clone());
        Some(id)
    }

    /// Swaps the selected element one step toward the top of the paint
    /// order (later in the list paints above).
    pub fn raise_selected(&mut self) -> bool {
        self.shift_selected(1)
    }

    pub fn lower_selected(&mut self) -> bool {
        self.shift_selected(-1)
    }

    fn shift_selected(&mut self, direction: isize) -> bool {
        if !self.may_edit() {
            return false;
        }
        let Some(id) = self.selected_element_id.as_deref() else {
            return false;
        };
        let Some(index) = self.design().element_index(id) else {
            return false;
        };
        let target = index as isize + direction;
        if target < 0 || target as usize >= self.design().elements.len() {
            return false;
        }
        let mut next = self.design().clone();
        next.elements.swap(index, target as usize);
        self.record(next);
        true
    }

    /// Applies an arbitrary property edit to one element and records it if
    /// anything actually changed. Used by the style/content panels.
    pub fn edit_element(&mut self, id: &str, edit: impl FnOnce(&mut Element)) -> bool {
        if !self.may_edit() {
            return false;
        }
        let mut next = self.design().clone();
        let Some(element) = next.element_mut(id) else {
            return false;
        };
        edit(element);
        if &next == self.design() {
            return false;
        }
        self.record(next);
        true
    }

    /// Property-panel convenience: edit whichever element is selected.
    pub fn edit_selected(&mut self, edit: impl FnOnce(&mut Element)) -> bool {
        let Some(id) = self.selected_element_id.clone() else {
            return false;
        };
        self.edit_element(&id, edit)
    }

    pub fn edit_background(&mut self, edit: impl FnOnce(&mut Background)) -> bool {
        if !self.may_edit() {
            return false;
        }
        let mut next = self.design().clone();
        edit(&mut next.background);
        if &next == self.design() {
            return false;
        }
        self.record(next);
        true
    }

    pub fn undo(&mut self) -> bool {
        if !self.editable || !self.interaction.is_idle() {
            return false;
        }
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        if !self.editable || !self.interaction.is_idle() {
            return false;
        }
        self.history.redo()
    }

    // ---- pointer interaction ----

    /// Pointer-down on an element body: selects it and arms a drag.
    pub fn pointer_down_element(&mut self, id: &str, sx: f64, sy: f64) -> bool {
        if !self.editable || !self.interaction.is_idle() {
            return false;
        }
        let Some(element) = self.design().element(id) else {
            return false;
        };
        let frame = element.frame;
        self.selected_element_id = Some(id.to_string());
        self.interaction = Interaction::Dragging {
            element_id: id.to_string(),
            pointer_start: (sx, sy),
            start_frame: frame,
            live_frame: frame,
        };
        true
    }

    /// Pointer-down on a corner handle of the selected element.
    pub fn pointer_down_handle(&mut self, handle: Handle, sx: f64, sy: f64) -> bool {
        if !self.editable || !self.interaction.is_idle() {
            return false;
        }
        let (element_id, frame) = match self.selected_element() {
            Some(element) => (element.id.clone(), element.frame),
            None => return false,
        };
        self.interaction = Interaction::Resizing {
            element_id,
            handle,
            pointer_start: (sx, sy),
            start_frame: frame,
            live_frame: frame,
        };
        true
    }

    /// Pointer-move while dragging or resizing: screen delta divided by the
    /// zoom scale, snapped and clamped, staged as the live frame. Nothing is
    /// recorded yet.
    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> bool {
        let scale = self.viewport.scale();
        let snap_enabled = self.snap_to_grid;
        match &mut self.interaction {
            Interaction::Idle => false,
            Interaction::Dragging {
                pointer_start,
                start_frame,
                live_frame,
                ..
            } => {
                let dx = ((sx - pointer_start.0) as f32) / scale;
                let dy = ((sy - pointer_start.1) as f32) / scale;
                *live_frame = interact::drag_frame(*start_frame, dx, dy, snap_enabled);
                true
            }
            Interaction::Resizing {
                handle,
                pointer_start,
                start_frame,
                live_frame,
                ..
            } => {
                let dx = ((sx - pointer_start.0) as f32) / scale;
                let dy = ((sy - pointer_start.1) as f32) / scale;
                *live_frame = interact::resize_frame(*handle, *start_frame, dx, dy, snap_enabled);
                true
            }
        }
    }

    /// Pointer-up: commits the interaction as one atomic edit. A pointer-up
    /// with no effective movement is a plain click; the selection was
    /// already applied on pointer-down and nothing is recorded.
    pub fn pointer_up(&mut self) -> bool {
        let interaction = std::mem::replace(&mut self.interaction, Interaction::Idle);
        let (id, start, live) = match interaction {
            Interaction::Idle => return false,
            Interaction::Dragging {
                element_id,
                start_frame,
                live_frame,
                ..
            }
            | Interaction::Resizing {
                element_id,
                start_frame,
                live_frame,
                ..
            } => (element_id, start_frame, live_frame),
        };
        if live == start {
            return false;
        }
        let mut next = self.design().clone();
        let Some(element) = next.element_mut(&id) else {
            return false;
        };
        element.frame = live;
        self.record(next);
        true
    }

    /// Abandons an in-flight interaction without recording (Escape).
    pub fn pointer_cancel(&mut self) {
        self.interaction = Interaction::Idle;
    }

    fn fresh_element_id(&mut self, slug: &str) -> String {
        loop {
            self.id_counter += 1;
            let id = format!("{}_{}", slug, self.id_counter);
            if self.design().element(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::{BackgroundKind, TextItem, TextStyle};
    use pretty_assertions::assert_eq;

    fn editor() -> EditorState {
        EditorState::mount(Design::blank(), true)
    }

    fn editor_with_text() -> (EditorState, String) {
        let mut state = editor();
        let id = state.add_element(ElementKindTag::Text).unwrap();
        (state, id)
    }

    #[test]
    fn add_text_element_records_the_pre_add_state() {
        let (state, id) = editor_with_text();
        assert_eq!(state.history().past_len(), 1);
        assert_eq!(state.design().elements.len(), 1);
        let frame = state.design().element(&id).unwrap().frame;
        assert_eq!((frame.x, frame.y, frame.width, frame.height), (50.0, 50.0, 200.0, 40.0));
        assert_eq!(state.selected_element_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn drag_by_screen_delta_at_100_percent_snaps_to_grid() {
        let (mut state, id) = editor_with_text();
        assert!(state.pointer_down_element(&id, 300.0, 300.0));
        state.pointer_move(340.0, 330.0);
        assert!(state.pointer_up());

        let frame = state.design().element(&id).unwrap().frame;
        assert_eq!((frame.x, frame.y), (90.0, 80.0));
        // one atomic edit: the add plus the drag
        assert_eq!(state.history().past_len(), 2);
    }

    #[test]
    fn drag_scales_with_zoom() {
        let (mut state, id) = editor_with_text();
        state.viewport.set_zoom(200);
        state.pointer_down_element(&id, 0.0, 0.0);
        state.pointer_move(80.0, 60.0); // 40x30 in design space
        state.pointer_up();

        let frame = state.design().element(&id).unwrap().frame;
        assert_eq!((frame.x, frame.y), (90.0, 80.0));
    }

    #[test]
    fn live_frame_is_staged_without_recording() {
        let (mut state, id) = editor_with_text();
        state.pointer_down_element(&id, 0.0, 0.0);
        state.pointer_move(40.0, 30.0);

        // visible feedback through the effective frame
        let live = state.effective_frame(&id).unwrap();
        assert_eq!((live.x, live.y), (90.0, 80.0));
        // but the committed design is untouched
        let committed = state.design().element(&id).unwrap().frame;
        assert_eq!((committed.x, committed.y), (50.0, 50.0));
        assert_eq!(state.history().past_len(), 1);
    }

    #[test]
    fn plain_click_selects_without_recording() {
        let (mut state, id) = editor_with_text();
        state.clear_selection();
        state.pointer_down_element(&id, 10.0, 10.0);
        assert!(!state.pointer_up());
        assert_eq!(state.selected_element_id.as_deref(), Some(id.as_str()));
        assert_eq!(state.history().past_len(), 1);
    }

    #[test]
    fn click_on_empty_canvas_clears_selection() {
        let (mut state, _id) = editor_with_text();
        assert!(state.selected_element_id.is_some());
        state.clear_selection();
        assert!(state.selected_element_id.is_none());
    }

    #[test]
    fn drag_never_leaves_the_canvas() {
        let (mut state, id) = editor_with_text();
        state.pointer_down_element(&id, 0.0, 0.0);
        state.pointer_move(-5000.0, -5000.0);
        state.pointer_up();

        let frame = state.design().element(&id).unwrap().frame;
        assert!(frame.x >= 0.0);
        assert!(frame.y >= 0.0);
    }

    #[test]
    fn resize_commits_one_edit_on_pointer_up() {
        let (mut state, id) = editor_with_text();
        state.snap_to_grid = false;
        assert!(state.pointer_down_handle(Handle::SouthEast, 0.0, 0.0));
        state.pointer_move(25.0, 15.0);
        state.pointer_move(40.0, 20.0);
        assert!(state.pointer_up());

        let frame = state.design().element(&id).unwrap().frame;
        assert_eq!((frame.width, frame.height), (240.0, 60.0));
        assert_eq!(state.history().past_len(), 2);
    }

    #[test]
    fn escape_abandons_the_interaction() {
        let (mut state, id) = editor_with_text();
        state.pointer_down_element(&id, 0.0, 0.0);
        state.pointer_move(40.0, 30.0);
        state.pointer_cancel();
        assert!(state.interaction().is_idle());

        let frame = state.design().element(&id).unwrap().frame;
        assert_eq!((frame.x, frame.y), (50.0, 50.0));
        assert_eq!(state.history().past_len(), 1);
    }

    #[test]
    fn interacting_element_is_raised_then_restored() {
        let mut state = editor();
        let first = state.add_element(ElementKindTag::Text).unwrap();
        let _second = state.add_element(ElementKindTag::Image).unwrap();

        state.pointer_down_element(&first, 0.0, 0.0);
        assert_eq!(state.paint_order(), vec![1, 0]);
        state.pointer_move(40.0, 30.0);
        state.pointer_up();
        assert_eq!(state.paint_order(), vec![0, 1]);
    }

    #[test]
    fn delete_clears_selection() {
        let (mut state, _id) = editor_with_text();
        assert!(state.delete_selected());
        assert!(state.selected_element_id.is_none());
        assert!(state.design().elements.is_empty());
    }

    #[test]
    fn duplicate_generates_a_fresh_id() {
        let (mut state, id) = editor_with_text();
        let copy = state.duplicate_selected().unwrap();
        assert_ne!(copy, id);
        assert_eq!(state.design().elements.len(), 2);
        let frame = state.design().element(&copy).unwrap().frame;
        assert_eq!((frame.x, frame.y), (60.0, 60.0));
    }

    #[test]
    fn z_order_moves_are_recorded() {
        let mut state = editor();
        let first = state.add_element(ElementKindTag::Text).unwrap();
        let _second = state.add_element(ElementKindTag::Image).unwrap();
        state.select(&first);

        assert!(state.raise_selected());
        assert_eq!(state.design().elements[1].id, first);
        assert!(!state.raise_selected()); // already on top
        assert!(state.lower_selected());
        assert_eq!(state.design().elements[0].id, first);
    }

    #[test]
    fn twenty_five_style_edits_keep_only_twenty() {
        let (state, id) = editor_with_text();
        // fresh history so only the style edits count
        let mut state = EditorState::mount(state.design().clone(), true);
        for i in 0..25 {
            let changed = state.edit_element(&id, |element| {
                if let ElementKind::Text(text) = &mut element.kind {
                    text.style.font_size = 10 + i;
                }
            });
            assert!(changed);
        }
        assert_eq!(state.history().past_len(), 20);
    }

    #[test]
    fn noop_edit_is_not_recorded() {
        let (mut state, id) = editor_with_text();
        let before = state.history().past_len();
        let changed = state.edit_element(&id, |_| {});
        assert!(!changed);
        assert_eq!(state.history().past_len(), before);
    }

    #[test]
    fn undo_after_edit_then_new_edit_clears_redo() {
        let (mut state, id) = editor_with_text();
        state.edit_element(&id, |element| {
            if let ElementKind::Text(text) = &mut element.kind {
                text.content = "Awarded to {{recipient_name}}".to_string();
            }
        });
        state.undo();
        assert!(state.can_redo());
        state.edit_background(|background| {
            background.kind = BackgroundKind::Color;
            background.value = "#fafafa".to_string();
        });
        assert!(!state.can_redo());
    }

    #[test]
    fn read_only_mode_rejects_all_mutating_entry_points() {
        let mut design = Design::blank();
        design.elements.push(Element {
            id: "title".to_string(),
            frame: Frame::new(10.0, 10.0, 200.0, 40.0),
            style: Default::default(),
            kind: ElementKind::Text(TextItem {
                content: "Title".to_string(),
                style: TextStyle::default(),
            }),
        });
        let mut state = EditorState::mount(design.clone(), false);

        assert!(state.add_element(ElementKindTag::Text).is_none());
        assert!(!state.select("title"));
        assert!(!state.pointer_down_element("title", 0.0, 0.0));
        assert!(!state.pointer_down_handle(Handle::SouthEast, 0.0, 0.0));
        assert!(!state.edit_element("title", |e| e.frame.x = 99.0));
        assert!(!state.undo());
        assert_eq!(state.design(), &design);

        // pan/zoom still works
        assert!(state.viewport.zoom_in());
        assert_eq!(state.viewport.zoom_percent, 125);
    }

    #[test]
    fn mutations_are_ignored_mid_interaction() {
        let (mut state, id) = editor_with_text();
        state.pointer_down_element(&id, 0.0, 0.0);
        assert!(state.add_element(ElementKindTag::Qr).is_none());
        assert!(!state.undo());
        state.pointer_up();
    }
}
