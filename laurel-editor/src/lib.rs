/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

#![allow(non_snake_case)]

use dioxus::prelude::*;
use laurel_core::{
    BackgroundKind, Design, Element as DesignElement, ElementKind, ElementKindTag, Frame,
    TextAlign,
};

pub mod history;
pub mod interact;
pub mod session;
pub mod state;
pub mod viewport;

pub use history::{HISTORY_LIMIT, History};
pub use interact::{GRID_UNIT, Handle, Interaction, MIN_ELEMENT_SIZE};
pub use session::{AUTOSAVE_QUIET_MS, SaveError, SaveSession, SaveTarget};
pub use state::EditorState;
pub use viewport::{BASE_GRID_SPACING, FIT_PADDING, Viewport, ZOOM_LADDER, fit_zoom};

/// Adapts the host's save callback to the session's persistence contract.
struct CallbackSave(Callback<Design, Result<(), SaveError>>);

impl SaveTarget for CallbackSave {
    fn save(&mut self, design: &Design) -> Result<(), SaveError> {
        self.0.call(design.clone())
    }
}

/// The certificate editor shell. Owns one `EditorState` value and re-renders
/// after each synchronous call into it; persistence and navigation stay with
/// the host through `save` and `on_close`.
#[component]
pub fn CertificateEditor(
    design: Design,
    editable: bool,
    save: Callback<Design, Result<(), SaveError>>,
    on_close: EventHandler<()>,
) -> Element {
    let mut state = use_signal(move || EditorState::mount(design.clone(), editable));
    let mut add_kind = use_signal(|| "Text".to_string());
    let mut canvas_size = use_signal(|| (960.0f32, 720.0f32));
    let mut confirm_discard = use_signal(|| false);
    let mut suppress_click = use_signal(|| false);

    let snapshot = state.read();
    let scale = snapshot.viewport.scale();
    let zoom = snapshot.viewport.zoom_percent;
    let dims = snapshot.design().dimensions;
    let grid_visible = snapshot.grid_visible;
    let snap_to_grid = snapshot.snap_to_grid;
    let can_undo = snapshot.can_undo();
    let can_redo = snapshot.can_redo();
    let background = snapshot.design().background.clone();
    let selected = snapshot.selected_element().cloned();
    let selected_frame = snapshot
        .selected_element_id
        .as_deref()
        .and_then(|id| snapshot.effective_frame(id));
    let dirty = snapshot.session.is_dirty(snapshot.design());
    let save_error = snapshot.session.last_error().map(str::to_string);
    let items: Vec<(String, DesignElement, Frame)> = snapshot
        .paint_order()
        .into_iter()
        .map(|index| {
            let element = snapshot.design().elements[index].clone();
            let frame = snapshot
                .effective_frame(&element.id)
                .unwrap_or(element.frame);
            (element.id.clone(), element, frame)
        })
        .collect();
    drop(snapshot);

    let has_selection = selected.is_some();
    let grabbing = !state.read().interaction().is_idle();
    let cursor_style = if grabbing { "grabbing" } else { "default" };
    let canvas_w = dims.width as f32 * scale;
    let canvas_h = dims.height as f32 * scale;
    let grid_spacing = state.read().viewport.grid_spacing();
    let background_layer = background_css(&background.kind, &background.value);
    let background_opacity = background.opacity;
    let design_json = serde_json::to_string_pretty(state.read().design()).unwrap();

    rsx! {
        div {
            class: "editor-container",
            style: "display: flex; gap: 16px; height: 100%; cursor: {cursor_style}; outline: none;",
            tabindex: "0",
            onkeydown: move |evt| {
                let ctrl = evt.modifiers().contains(Modifiers::CONTROL)
                    || evt.modifiers().contains(Modifiers::META);
                if ctrl && evt.key() == Key::Character("z".to_string()) {
                    if evt.modifiers().contains(Modifiers::SHIFT) {
                        state.write().redo();
                    } else {
                        state.write().undo();
                    }
                    evt.prevent_default();
                } else if ctrl && evt.key() == Key::Character("y".to_string()) {
                    state.write().redo();
                    evt.prevent_default();
                } else if evt.key() == Key::Delete {
                    state.write().delete_selected();
                } else if evt.key() == Key::Escape {
                    if !state.read().interaction().is_idle() {
                        state.write().pointer_cancel();
                    } else {
                        let unsaved = {
                            let s = state.read();
                            s.session.needs_discard_confirmation(s.design())
                        };
                        if unsaved {
                            confirm_discard.set(true);
                        } else {
                            on_close.call(());
                        }
                    }
                }
            },
            onmousemove: move |evt| {
                let coords = evt.page_coordinates();
                state.write().pointer_move(coords.x, coords.y);
            },
            onmouseup: move |_| {
                let was_active = !state.read().interaction().is_idle();
                state.write().pointer_up();
                if was_active {
                    suppress_click.set(true);
                }
            },

            div {
                class: "left-panel",
                style: "width: 280px; flex-shrink: 0; overflow-y: auto;",

                div {
                    class: "header-actions",
                    h2 { "Certificate Editor" }
                    if editable {
                        div {
                            button {
                                disabled: !can_undo,
                                onclick: move |_| { state.write().undo(); },
                                "Undo"
                            }
                            button {
                                disabled: !can_redo,
                                onclick: move |_| { state.write().redo(); },
                                "Redo"
                            }
                            button {
                                class: "primary-btn",
                                onclick: move |_| {
                                    let current = state.read().design().clone();
                                    let mut target = CallbackSave(save);
                                    let _ = state.write().session.save_with(&mut target, &current, 0);
                                },
                                "Save"
                            }
                        }
                        if let Some(error) = save_error {
                            div {
                                class: "save-notification",
                                style: "color: #b4232a; padding: 4px 0;",
                                "{error}"
                            }
                        } else if dirty {
                            div { class: "save-status", style: "color: #888;", "Unsaved changes" }
                        } else {
                            div { class: "save-status", style: "color: #888;", "All changes saved" }
                        }
                    } else {
                        div { class: "save-status", style: "color: #888;", "View only" }
                    }
                }

                div {
                    class: "zoom-controls",
                    button {
                        onclick: move |_| { state.write().viewport.zoom_out(); },
                        "-"
                    }
                    span { " {zoom}% " }
                    button {
                        onclick: move |_| { state.write().viewport.zoom_in(); },
                        "+"
                    }
                    button {
                        onclick: move |_| {
                            let (w, h) = canvas_size();
                            let dims = state.read().design().dimensions;
                            state.write().viewport.fit_to_screen(w, h, dims);
                        },
                        "Fit"
                    }
                }

                div {
                    class: "grid-controls",
                    button {
                        onclick: move |_| {
                            let current = state.read().grid_visible;
                            state.write().grid_visible = !current;
                        },
                        if grid_visible { "Grid: on" } else { "Grid: off" }
                    }
                    button {
                        onclick: move |_| {
                            let current = state.read().snap_to_grid;
                            state.write().snap_to_grid = !current;
                        },
                        if snap_to_grid { "Snap: on" } else { "Snap: off" }
                    }
                }

                if editable {
                    div {
                        class: "add-element-controls",
                        select {
                            value: "{add_kind}",
                            oninput: move |evt| add_kind.set(evt.value()),
                            for tag in ElementKindTag::ALL {
                                option { value: "{tag.label()}", "{tag.label()}" }
                            }
                        }
                        button {
                            class: "primary-btn",
                            onclick: move |_| {
                                let kind = match add_kind.read().as_str() {
                                    "Text" => ElementKindTag::Text,
                                    "Image" => ElementKindTag::Image,
                                    "Logo" => ElementKindTag::Logo,
                                    "QR Code" => ElementKindTag::Qr,
                                    "Signature" => ElementKindTag::Signature,
                                    _ => return,
                                };
                                state.write().add_element(kind);
                            },
                            "Add"
                        }
                    }

                    div {
                        class: "element-actions",
                        button {
                            disabled: !has_selection,
                            onclick: move |_| { state.write().duplicate_selected(); },
                            "Duplicate"
                        }
                        button {
                            disabled: !has_selection,
                            onclick: move |_| { state.write().raise_selected(); },
                            "Up"
                        }
                        button {
                            disabled: !has_selection,
                            onclick: move |_| { state.write().lower_selected(); },
                            "Down"
                        }
                        button {
                            class: "danger",
                            disabled: !has_selection,
                            onclick: move |_| { state.write().delete_selected(); },
                            "Delete"
                        }
                    }

                    BackgroundPanel { state, background }

                    if let Some(element) = selected {
                        PropertiesPanel { state, element }
                    } else {
                        div {
                            class: "empty-state",
                            style: "color: #888; text-align: center; padding: 20px;",
                            "Select an element to edit properties"
                        }
                    }
                }
            }

            div {
                class: "canvas-viewport",
                style: "flex: 1; overflow: auto; position: relative; background: #e4e4e7; padding: 24px;",
                onresize: move |evt| {
                    if let Ok(size) = evt.get_border_box_size() {
                        canvas_size.set((size.width as f32, size.height as f32));
                    }
                },

                div {
                    class: "canvas-container",
                    style: "position: relative; width: {canvas_w}px; height: {canvas_h}px; background: #ffffff; overflow: hidden; box-shadow: 0 1px 4px rgba(0,0,0,0.2);",
                    onclick: move |_| {
                        if suppress_click() {
                            suppress_click.set(false);
                        } else {
                            state.write().clear_selection();
                        }
                    },

                    div {
                        class: "background-layer",
                        style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; opacity: {background_opacity}; {background_layer}",
                    }

                    if grid_visible {
                        div {
                            class: "grid-overlay",
                            style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; pointer-events: none; background-image: linear-gradient(to right, rgba(0,0,0,0.08) 1px, transparent 1px), linear-gradient(to bottom, rgba(0,0,0,0.08) 1px, transparent 1px); background-size: {grid_spacing}px {grid_spacing}px;",
                        }
                    }

                    for (id, element, frame) in items {
                        CanvasElement {
                            key: "{element.id}",
                            element: element.clone(),
                            frame,
                            scale,
                            on_press: move |evt: MouseEvent| {
                                let coords = evt.page_coordinates();
                                state.write().pointer_down_element(&id, coords.x, coords.y);
                            },
                        }
                    }

                    if let Some(frame) = selected_frame {
                        SelectionOverlay {
                            frame,
                            scale,
                            on_resize_start: move |(handle, evt): (Handle, MouseEvent)| {
                                let coords = evt.page_coordinates();
                                state.write().pointer_down_handle(handle, coords.x, coords.y);
                            },
                        }
                    }
                }

                div {
                    class: "json-output",
                    pre {
                        style: "font-size: 11px; color: #555;",
                        "{design_json}"
                    }
                }
            }

            if confirm_discard() {
                div {
                    class: "discard-prompt",
                    style: "position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0,0,0,0.4);",
                    div {
                        style: "background: #fff; padding: 20px; border-radius: 6px;",
                        p { "Discard unsaved changes?" }
                        button {
                            onclick: move |_| confirm_discard.set(false),
                            "Keep editing"
                        }
                        button {
                            class: "danger",
                            onclick: move |_| {
                                confirm_discard.set(false);
                                on_close.call(());
                            },
                            "Discard"
                        }
                    }
                }
            }
        }
    }
}

fn background_css(kind: &BackgroundKind, value: &str) -> String {
    match kind {
        BackgroundKind::Color => format!("background-color: {value};"),
        BackgroundKind::Gradient => format!("background: {value};"),
        BackgroundKind::Image => format!(
            "background-image: url('{value}'); background-size: cover; background-position: center;"
        ),
    }
}

#[component]
fn CanvasElement(
    element: DesignElement,
    frame: Frame,
    scale: f32,
    on_press: EventHandler<MouseEvent>,
) -> Element {
    let left = frame.x * scale;
    let top = frame.y * scale;
    let width = frame.width * scale;
    let height = frame.height * scale;

    let mut box_style = String::new();
    if let Some(color) = &element.style.background_color {
        box_style.push_str(&format!("background-color: {color};"));
    }
    if element.style.border_width > 0.0 {
        let color = element.style.border_color.as_deref().unwrap_or("#000000");
        box_style.push_str(&format!(
            "border: {}px solid {color};",
            element.style.border_width * scale
        ));
    }
    if element.style.border_radius > 0.0 {
        box_style.push_str(&format!(
            "border-radius: {}px;",
            element.style.border_radius * scale
        ));
    }

    rsx! {
        div {
            class: "canvas-element",
            style: "position: absolute; left: {left}px; top: {top}px; width: {width}px; height: {height}px; {box_style}",
            onmousedown: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                on_press.call(evt);
            },
            ondragstart: move |evt| evt.prevent_default(),
            onclick: move |evt| evt.stop_propagation(),

            match &element.kind {
                ElementKind::Text(text) => {
                    let size = text.style.font_size as f32 * scale;
                    let align = match text.style.text_align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                        TextAlign::Right => "right",
                    };
                    rsx! {
                        div {
                            style: "width: 100%; height: 100%; overflow: hidden; font-size: {size}px; font-family: {text.style.font_family}; font-weight: {text.style.font_weight}; color: {text.style.color}; text-align: {align}; white-space: pre-wrap; user-select: none;",
                            "{text.content}"
                        }
                    }
                }
                ElementKind::Image(img) => {
                    if img.source.is_empty() {
                        rsx! { Placeholder { label: "No image set" } }
                    } else {
                        rsx! {
                            img {
                                style: "width: 100%; height: 100%; object-fit: cover;",
                                src: "{img.source}",
                                alt: "image",
                                draggable: "false",
                            }
                        }
                    }
                }
                ElementKind::Logo(logo) => {
                    if logo.source.is_empty() {
                        rsx! { Placeholder { label: "No logo set" } }
                    } else {
                        rsx! {
                            img {
                                style: "width: 100%; height: 100%; object-fit: contain;",
                                src: "{logo.source}",
                                alt: "logo",
                                draggable: "false",
                            }
                        }
                    }
                }
                ElementKind::Qr(_) => rsx! { Placeholder { label: "QR code" } },
                ElementKind::Signature(sig) => {
                    if sig.source.is_empty() {
                        rsx! { Placeholder { label: "Signature" } }
                    } else {
                        rsx! {
                            img {
                                style: "width: 100%; height: 100%; object-fit: contain;",
                                src: "{sig.source}",
                                alt: "signature",
                                draggable: "false",
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Placeholder(label: &'static str) -> Element {
    rsx! {
        div {
            class: "element-placeholder",
            style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; border: 1px dashed #999; color: #999; font-size: 12px; user-select: none;",
            "{label}"
        }
    }
}

#[component]
fn SelectionOverlay(
    frame: Frame,
    scale: f32,
    on_resize_start: EventHandler<(Handle, MouseEvent)>,
) -> Element {
    let left = frame.x * scale;
    let top = frame.y * scale;
    let width = frame.width * scale;
    let height = frame.height * scale;

    rsx! {
        div {
            class: "selection-overlay",
            style: "position: absolute; left: {left}px; top: {top}px; width: {width}px; height: {height}px; outline: 1px solid #2f6fed; pointer-events: none;",

            for handle in Handle::ALL {
                div {
                    class: "resize-handle {handle.corner()}",
                    style: "{handle_css(handle)} position: absolute; width: 9px; height: 9px; background: #2f6fed; pointer-events: auto;",
                    onmousedown: move |evt| {
                        evt.prevent_default();
                        evt.stop_propagation();
                        on_resize_start.call((handle, evt));
                    },
                    onclick: move |evt| evt.stop_propagation(),
                }
            }
        }
    }
}

fn handle_css(handle: Handle) -> &'static str {
    match handle {
        Handle::NorthWest => "left: -5px; top: -5px; cursor: nwse-resize;",
        Handle::NorthEast => "right: -5px; top: -5px; cursor: nesw-resize;",
        Handle::SouthWest => "left: -5px; bottom: -5px; cursor: nesw-resize;",
        Handle::SouthEast => "right: -5px; bottom: -5px; cursor: nwse-resize;",
    }
}

#[component]
fn BackgroundPanel(state: Signal<EditorState>, background: laurel_core::Background) -> Element {
    let mut state = state;
    let kind_label = match background.kind {
        BackgroundKind::Color => "Color",
        BackgroundKind::Gradient => "Gradient",
        BackgroundKind::Image => "Image",
    };

    rsx! {
        div {
            class: "background-panel",
            h3 { "Background" }
            div {
                class: "control-group",
                label { "Type: " }
                select {
                    value: "{kind_label}",
                    oninput: move |evt| {
                        let kind = match evt.value().as_str() {
                            "Color" => BackgroundKind::Color,
                            "Gradient" => BackgroundKind::Gradient,
                            "Image" => BackgroundKind::Image,
                            _ => return,
                        };
                        state.write().edit_background(|bg| bg.kind = kind);
                    },
                    option { value: "Color", "Color" }
                    option { value: "Gradient", "Gradient" }
                    option { value: "Image", "Image" }
                }
            }
            div {
                class: "control-group",
                label { "Value: " }
                input {
                    r#type: "text",
                    value: "{background.value}",
                    oninput: move |evt| {
                        state.write().edit_background(|bg| bg.value = evt.value());
                    }
                }
            }
            div {
                class: "control-group",
                label { "Opacity: " }
                input {
                    r#type: "number",
                    min: "0",
                    max: "1",
                    step: "0.05",
                    value: "{background.opacity}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_background(|bg| bg.opacity = value.clamp(0.0, 1.0));
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PropertiesPanel(state: Signal<EditorState>, element: DesignElement) -> Element {
    let mut state = state;
    let frame = element.frame;

    let kind_fields = match &element.kind {
        ElementKind::Text(text) => {
            let content = text.content.clone();
            let style = text.style.clone();
            let align_label = match style.text_align {
                TextAlign::Left => "Left",
                TextAlign::Center => "Center",
                TextAlign::Right => "Right",
            };
            rsx! {
                div {
                    class: "control-group",
                    label { "Text: " }
                    input {
                        r#type: "text",
                        value: "{content}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Text(t) = &mut e.kind {
                                    t.content = evt.value();
                                }
                            });
                        }
                    }
                }
                div {
                    class: "control-group",
                    label { "Font size: " }
                    input {
                        r#type: "number",
                        value: "{style.font_size}",
                        oninput: move |evt| {
                            if let Ok(value) = evt.value().parse::<u32>() {
                                state.write().edit_selected(|e| {
                                    if let ElementKind::Text(t) = &mut e.kind {
                                        t.style.font_size = value;
                                    }
                                });
                            }
                        }
                    }
                }
                div {
                    class: "control-group",
                    label { "Font family: " }
                    select {
                        value: "{style.font_family}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Text(t) = &mut e.kind {
                                    t.style.font_family = evt.value();
                                }
                            });
                        },
                        option { value: "Sans Serif", "Sans Serif" }
                        option { value: "Serif", "Serif" }
                        option { value: "Monospace", "Monospace" }
                        option { value: "Cursive", "Cursive" }
                    }
                }
                div {
                    class: "control-group",
                    label { "Weight: " }
                    select {
                        value: "{style.font_weight}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Text(t) = &mut e.kind {
                                    t.style.font_weight = evt.value();
                                }
                            });
                        },
                        option { value: "normal", "normal" }
                        option { value: "bold", "bold" }
                    }
                }
                div {
                    class: "control-group",
                    label { "Color: " }
                    input {
                        r#type: "color",
                        value: "{style.color}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Text(t) = &mut e.kind {
                                    t.style.color = evt.value();
                                }
                            });
                        }
                    }
                }
                div {
                    class: "control-group",
                    label { "Align: " }
                    select {
                        value: "{align_label}",
                        oninput: move |evt| {
                            let align = match evt.value().as_str() {
                                "Left" => TextAlign::Left,
                                "Center" => TextAlign::Center,
                                "Right" => TextAlign::Right,
                                _ => return,
                            };
                            state.write().edit_selected(|e| {
                                if let ElementKind::Text(t) = &mut e.kind {
                                    t.style.text_align = align;
                                }
                            });
                        },
                        option { value: "Left", "Left" }
                        option { value: "Center", "Center" }
                        option { value: "Right", "Right" }
                    }
                }
            }
        }
        ElementKind::Image(img) => {
            let source = img.source.clone();
            rsx! {
                div {
                    class: "control-group",
                    label { "Source: " }
                    input {
                        r#type: "text",
                        value: "{source}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Image(i) = &mut e.kind {
                                    i.source = evt.value();
                                }
                            });
                        }
                    }
                }
            }
        }
        ElementKind::Logo(logo) => {
            let source = logo.source.clone();
            rsx! {
                div {
                    class: "control-group",
                    label { "Source: " }
                    input {
                        r#type: "text",
                        value: "{source}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Logo(l) = &mut e.kind {
                                    l.source = evt.value();
                                }
                            });
                        }
                    }
                }
            }
        }
        ElementKind::Qr(qr) => {
            let payload = qr.payload.clone();
            rsx! {
                div {
                    class: "control-group",
                    label { "Payload: " }
                    input {
                        r#type: "text",
                        value: "{payload}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Qr(q) = &mut e.kind {
                                    q.payload = evt.value();
                                }
                            });
                        }
                    }
                }
            }
        }
        ElementKind::Signature(sig) => {
            let source = sig.source.clone();
            rsx! {
                div {
                    class: "control-group",
                    label { "Source: " }
                    input {
                        r#type: "text",
                        value: "{source}",
                        oninput: move |evt| {
                            state.write().edit_selected(|e| {
                                if let ElementKind::Signature(s) = &mut e.kind {
                                    s.source = evt.value();
                                }
                            });
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "inspector-panel",
            h3 { "Properties ({element.kind.label()})" }
            div {
                class: "control-group",
                label { "X: " }
                input {
                    r#type: "number",
                    value: "{frame.x}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.frame.x = value.max(0.0));
                        }
                    }
                }
            }
            div {
                class: "control-group",
                label { "Y: " }
                input {
                    r#type: "number",
                    value: "{frame.y}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.frame.y = value.max(0.0));
                        }
                    }
                }
            }
            div {
                class: "control-group",
                label { "Width: " }
                input {
                    r#type: "number",
                    value: "{frame.width}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.frame.width = value.max(MIN_ELEMENT_SIZE));
                        }
                    }
                }
            }
            div {
                class: "control-group",
                label { "Height: " }
                input {
                    r#type: "number",
                    value: "{frame.height}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.frame.height = value.max(MIN_ELEMENT_SIZE));
                        }
                    }
                }
            }

            {kind_fields}

            h3 { "Box" }
            div {
                class: "control-group",
                label { "Fill: " }
                input {
                    r#type: "text",
                    value: "{element.style.background_color.clone().unwrap_or_default()}",
                    oninput: move |evt| {
                        let value = evt.value();
                        state.write().edit_selected(|e| {
                            e.style.background_color =
                                if value.is_empty() { None } else { Some(value.clone()) };
                        });
                    }
                }
            }
            div {
                class: "control-group",
                label { "Border color: " }
                input {
                    r#type: "text",
                    value: "{element.style.border_color.clone().unwrap_or_default()}",
                    oninput: move |evt| {
                        let value = evt.value();
                        state.write().edit_selected(|e| {
                            e.style.border_color =
                                if value.is_empty() { None } else { Some(value.clone()) };
                        });
                    }
                }
            }
            div {
                class: "control-group",
                label { "Border width: " }
                input {
                    r#type: "number",
                    value: "{element.style.border_width}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.style.border_width = value.max(0.0));
                        }
                    }
                }
            }
            div {
                class: "control-group",
                label { "Radius: " }
                input {
                    r#type: "number",
                    value: "{element.style.border_radius}",
                    oninput: move |evt| {
                        if let Ok(value) = evt.value().parse::<f32>() {
                            state.write().edit_selected(|e| e.style.border_radius = value.max(0.0));
                        }
                    }
                }
            }
        }
    }
}
