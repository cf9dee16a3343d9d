/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use laurel_core::Frame;

/// Grid unit for drag/resize snapping, in design-space units.
pub const GRID_UNIT: f32 = 10.0;

/// Smallest width/height a resize may produce, in design-space units.
pub const MIN_ELEMENT_SIZE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
    ];

    /// CSS-style corner class used by the shells.
    pub fn corner(&self) -> &'static str {
        match self {
            Handle::NorthWest => "nw",
            Handle::NorthEast => "ne",
            Handle::SouthWest => "sw",
            Handle::SouthEast => "se",
        }
    }
}

/// Pointer-driven interaction state. At most one element interacts at a
/// time; the live frame is visual feedback only and is not committed to
/// history until pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    Dragging {
        element_id: String,
        pointer_start: (f64, f64),
        start_frame: Frame,
        live_frame: Frame,
    },
    Resizing {
        element_id: String,
        handle: Handle,
        pointer_start: (f64, f64),
        start_frame: Frame,
        live_frame: Frame,
    },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn active_element_id(&self) -> Option<&str> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { element_id, .. }
            | Interaction::Resizing { element_id, .. } => Some(element_id),
        }
    }

    pub fn live_frame(&self) -> Option<Frame> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { live_frame, .. }
            | Interaction::Resizing { live_frame, .. } => Some(*live_frame),
        }
    }
}

/// Rounds to the nearest grid multiple. Idempotent: a snapped value maps to
/// itself.
pub fn snap(value: f32, unit: f32) -> f32 {
    (value / unit).round() * unit
}

/// Position candidate for a drag: start + design-space delta, snapped, then
/// clamped so the element never leaves the canvas on the negative side.
pub fn drag_frame(start: Frame, dx: f32, dy: f32, snap_enabled: bool) -> Frame {
    let mut x = start.x + dx;
    let mut y = start.y + dy;
    if snap_enabled {
        x = snap(x, GRID_UNIT);
        y = snap(y, GRID_UNIT);
    }
    Frame {
        x: x.max(0.0),
        y: y.max(0.0),
        ..start
    }
}

/// Size candidate for a resize. The corner opposite the grabbed handle is
/// the anchor: it stays fixed while the grabbed corner follows the pointer.
pub fn resize_frame(handle: Handle, start: Frame, dx: f32, dy: f32, snap_enabled: bool) -> Frame {
    let right = start.x + start.width;
    let bottom = start.y + start.height;

    let (mut x, mut y, mut width, mut height) = match handle {
        Handle::SouthEast => (start.x, start.y, start.width + dx, start.height + dy),
        Handle::SouthWest => (start.x + dx, start.y, start.width - dx, start.height + dy),
        Handle::NorthEast => (start.x, start.y + dy, start.width + dx, start.height - dy),
        Handle::NorthWest => (
            start.x + dx,
            start.y + dy,
            start.width - dx,
            start.height - dy,
        ),
    };

    if snap_enabled {
        x = snap(x, GRID_UNIT);
        y = snap(y, GRID_UNIT);
        width = snap(width, GRID_UNIT);
        height = snap(height, GRID_UNIT);
    }

    if width < MIN_ELEMENT_SIZE {
        width = MIN_ELEMENT_SIZE;
        if matches!(handle, Handle::NorthWest | Handle::SouthWest) {
            x = right - width;
        }
    }
    if height < MIN_ELEMENT_SIZE {
        height = MIN_ELEMENT_SIZE;
        if matches!(handle, Handle::NorthWest | Handle::NorthEast) {
            y = bottom - height;
        }
    }

    // clamping the origin keeps the anchored edge where it was
    if x < 0.0 {
        width = right;
        x = 0.0;
    }
    if y < 0.0 {
        height = bottom;
        y = 0.0;
    }

    Frame { x, y, width, height }
}
