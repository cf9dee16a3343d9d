/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Pure mapping from a background or element plus render context to a
//! drawable description. The rasterizer and any DOM shell consume these
//! plans; the rules for Edit vs Preview placeholders live here.

use laurel_core::{Background, BackgroundKind, ElementKind, Frame, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// Design surface: unset image/qr/signature content shows a placeholder.
    Edit,
    /// Resolved output: no handles, unset content is an empty box.
    Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundVisual {
    Solid(String),
    /// Best-effort two-stop vertical gradient extracted from the raw spec.
    LinearGradient { start: String, end: String },
    Bitmap { url: String },
    Empty,
}

/// Background drawing plan; opacity applies uniformly to the whole layer
/// regardless of kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPlan {
    pub visual: BackgroundVisual,
    pub opacity: f32,
}

pub fn background_plan(background: &Background) -> BackgroundPlan {
    let visual = match background.kind {
        BackgroundKind::Color => {
            if background.value.is_empty() {
                BackgroundVisual::Empty
            } else {
                BackgroundVisual::Solid(background.value.clone())
            }
        }
        BackgroundKind::Gradient => match gradient_stops(&background.value) {
            Some((start, end)) => BackgroundVisual::LinearGradient { start, end },
            None => match first_hex_color(&background.value) {
                Some(color) => BackgroundVisual::Solid(color),
                None => BackgroundVisual::Empty,
            },
        },
        BackgroundKind::Image => {
            if background.value.is_empty() {
                BackgroundVisual::Empty
            } else {
                BackgroundVisual::Bitmap { url: background.value.clone() }
            }
        }
    };
    BackgroundPlan { visual, opacity: background.opacity.clamp(0.0, 1.0) }
}

/// Pulls the first two `#rrggbb` stops out of a CSS-like gradient spec.
fn gradient_stops(spec: &str) -> Option<(String, String)> {
    let mut stops = hex_colors(spec);
    let start = stops.next()?;
    let end = stops.next()?;
    Some((start, end))
}

fn first_hex_color(spec: &str) -> Option<String> {
    hex_colors(spec).next()
}

fn hex_colors(spec: &str) -> impl Iterator<Item = String> + '_ {
    spec.match_indices('#').filter_map(|(i, _)| {
        let candidate = spec.get(i..i + 7)?;
        if candidate[1..].chars().all(|c| c.is_ascii_hexdigit()) {
            Some(candidate.to_string())
        } else {
            None
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    Cover,
    Contain,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementVisual {
    TextBlock { content: String, style: TextStyle },
    Bitmap { url: String, fit: ImageFit },
    Placeholder { label: &'static str },
    EmptyBox,
}

pub fn element_visual(kind: &ElementKind, context: RenderContext) -> ElementVisual {
    match kind {
        ElementKind::Text(text) => ElementVisual::TextBlock {
            content: text.content.clone(),
            style: text.style.clone(),
        },
        ElementKind::Image(img) => content_or_placeholder(
            &img.source,
            ImageFit::Cover,
            "No image set",
            context,
        ),
        ElementKind::Logo(logo) => content_or_placeholder(
            &logo.source,
            ImageFit::Contain,
            "No logo set",
            context,
        ),
        // generation is external: a placeholder in both contexts
        ElementKind::Qr(_) => ElementVisual::Placeholder { label: "QR code" },
        ElementKind::Signature(sig) => {
            if sig.source.is_empty() {
                ElementVisual::Placeholder { label: "Signature" }
            } else {
                ElementVisual::Bitmap { url: sig.source.clone(), fit: ImageFit::Contain }
            }
        }
    }
}

fn content_or_placeholder(
    source: &str,
    fit: ImageFit,
    label: &'static str,
    context: RenderContext,
) -> ElementVisual {
    if !source.is_empty() {
        ElementVisual::Bitmap { url: source.to_string(), fit }
    } else if context == RenderContext::Edit {
        ElementVisual::Placeholder { label }
    } else {
        ElementVisual::EmptyBox
    }
}

/// Where to draw a `src_w` x `src_h` bitmap inside `dst`: cover scales to
/// fill (cropping), contain scales to fit entirely; both center the result.
pub fn fit_rect(src_w: f32, src_h: f32, dst: Frame, fit: ImageFit) -> Frame {
    if src_w <= 0.0 || src_h <= 0.0 || dst.width <= 0.0 || dst.height <= 0.0 {
        return Frame::new(dst.x, dst.y, 0.0, 0.0);
    }
    let sx = dst.width / src_w;
    let sy = dst.height / src_h;
    let scale = match fit {
        ImageFit::Cover => sx.max(sy),
        ImageFit::Contain => sx.min(sy),
    };
    let width = src_w * scale;
    let height = src_h * scale;
    Frame::new(
        dst.x + (dst.width - width) / 2.0,
        dst.y + (dst.height - height) / 2.0,
        width,
        height,
    )
}
