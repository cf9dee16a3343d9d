/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use laurel_core::Dimensions;

/// Permitted zoom percentages, steppable via the +/- controls.
pub const ZOOM_LADDER: [u16; 8] = [25, 50, 75, 100, 125, 150, 200, 300];

/// Grid overlay spacing at 100% zoom, in design-space units.
pub const BASE_GRID_SPACING: f32 = 20.0;

/// Fit-to-screen padding, in design-space-equivalent pixels.
pub const FIT_PADDING: f32 = 100.0;

/// Maps design-space coordinates to screen pixels given the discrete zoom
/// ladder and a pan offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom_percent: u16,
    pub offset: (f32, f32),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_percent: 100,
            offset: (0.0, 0.0),
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.zoom_percent as f32 / 100.0
    }

    /// Steps one rung up the ladder. No-op at the top.
    pub fn zoom_in(&mut self) -> bool {
        let Some(position) = ZOOM_LADDER.iter().position(|&z| z == self.zoom_percent) else {
            return false;
        };
        match ZOOM_LADDER.get(position + 1) {
            Some(&next) => {
                self.zoom_percent = next;
                true
            }
            None => false,
        }
    }

    /// Steps one rung down the ladder. No-op at the bottom.
    pub fn zoom_out(&mut self) -> bool {
        let Some(position) = ZOOM_LADDER.iter().position(|&z| z == self.zoom_percent) else {
            return false;
        };
        if position == 0 {
            return false;
        }
        self.zoom_percent = ZOOM_LADDER[position - 1];
        true
    }

    /// Sets the zoom directly; rejected unless the value is on the ladder.
    pub fn set_zoom(&mut self, percent: u16) -> bool {
        if ZOOM_LADDER.contains(&percent) {
            self.zoom_percent = percent;
            true
        } else {
            false
        }
    }

    /// Picks the zoom that fits the whole design inside the container with
    /// [`FIT_PADDING`] to spare. The computed scale is clamped to [25, 100]
    /// and then snapped down to the nearest ladder rung so the zoom invariant
    /// holds and the design stays fully visible.
    pub fn fit_to_screen(&mut self, container_w: f32, container_h: f32, design: Dimensions) {
        self.zoom_percent = fit_zoom(container_w, container_h, design);
    }

    pub fn design_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale() + self.offset.0,
            y * self.scale() + self.offset.1,
        )
    }

    pub fn screen_to_design(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.offset.0) / self.scale(),
            (y - self.offset.1) / self.scale(),
        )
    }

    /// Grid overlay spacing in screen pixels at the current zoom.
    pub fn grid_spacing(&self) -> f32 {
        BASE_GRID_SPACING * self.scale()
    }
}

/// Raw fit computation: `min((cw - p)/dw, (ch - p)/dh) * 100`, clamped to
/// [25, 100], rounded, snapped down to the ladder.
pub fn fit_zoom(container_w: f32, container_h: f32, design: Dimensions) -> u16 {
    let scale_w = (container_w - FIT_PADDING) / design.width.max(1) as f32;
    let scale_h = (container_h - FIT_PADDING) / design.height.max(1) as f32;
    let percent = (scale_w.min(scale_h) * 100.0).clamp(25.0, 100.0).round() as u16;
    ZOOM_LADDER
        .iter()
        .rev()
        .find(|&&z| z <= percent)
        .copied()
        .unwrap_or(ZOOM_LADDER[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_walks_the_ladder() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.zoom_percent, 100);
        assert!(viewport.zoom_in());
        assert_eq!(viewport.zoom_percent, 125);
        assert!(viewport.zoom_out());
        assert!(viewport.zoom_out());
        assert_eq!(viewport.zoom_percent, 75);
    }

    #[test]
    fn stepping_is_a_noop_at_the_ends() {
        let mut viewport = Viewport { zoom_percent: 300, offset: (0.0, 0.0) };
        assert!(!viewport.zoom_in());
        assert_eq!(viewport.zoom_percent, 300);

        viewport.zoom_percent = 25;
        assert!(!viewport.zoom_out());
        assert_eq!(viewport.zoom_percent, 25);
    }

    #[test]
    fn set_zoom_rejects_values_off_the_ladder() {
        let mut viewport = Viewport::default();
        assert!(!viewport.set_zoom(110));
        assert_eq!(viewport.zoom_percent, 100);
        assert!(viewport.set_zoom(200));
        assert_eq!(viewport.zoom_percent, 200);
    }

    #[test]
    fn fit_zoom_stays_within_bounds_and_on_ladder() {
        let design = Dimensions { width: 800, height: 600 };
        // tiny container: clamped to the bottom of the ladder
        assert_eq!(fit_zoom(200.0, 150.0, design), 25);
        // huge container: clamped to 100 even though more would fit
        assert_eq!(fit_zoom(4000.0, 4000.0, design), 100);
        // mid-size container snaps down to a rung
        let z = fit_zoom(800.0, 700.0, design);
        assert!(ZOOM_LADDER.contains(&z));
        assert!((25..=100).contains(&z));
    }

    #[test]
    fn transforms_round_trip() {
        let viewport = Viewport { zoom_percent: 150, offset: (12.0, -4.0) };
        let (sx, sy) = viewport.design_to_screen(200.0, 80.0);
        assert_eq!((sx, sy), (312.0, 116.0));
        let (dx, dy) = viewport.screen_to_design(sx, sy);
        assert!((dx - 200.0).abs() < 1e-4);
        assert!((dy - 80.0).abs() < 1e-4);
    }

    #[test]
    fn grid_spacing_scales_with_zoom() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.grid_spacing(), 20.0);
        viewport.set_zoom(50);
        assert_eq!(viewport.grid_spacing(), 10.0);
        viewport.set_zoom(300);
        assert_eq!(viewport.grid_spacing(), 60.0);
    }
}
