/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/


use cosmic_text::{Align, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use laurel_core::{CertificateData, DateLocale, Design, Frame, TextAlign, TextStyle};
use std::collections::HashMap;
use thiserror::Error;
use tiny_skia::*;
use tracing::{debug, warn};

pub mod scene;

pub use scene::{
    BackgroundPlan, BackgroundVisual, ElementVisual, ImageFit, RenderContext, background_plan,
    element_visual, fit_rect,
};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create pixmap: {0}")]
    PixmapCreationError(String),

    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    pixmap_buffer: Option<Pixmap>,
    image_cache: HashMap<String, Pixmap>,
    loaded_fonts: std::collections::HashSet<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            pixmap_buffer: None,
            image_cache: HashMap::new(),
            loaded_fonts: std::collections::HashSet::new(),
        }
    }

    /// Renders the design to the internal buffer and returns the raw pixel
    /// data (premultiplied RGBA8). The buffer is reused across calls to
    /// avoid allocation overhead. In `Preview` context the design is
    /// resolved against `data` first; `Edit` renders raw content with
    /// placeholders.
    pub fn render_raw(
        &mut self,
        design: &Design,
        context: RenderContext,
        data: &CertificateData,
        locale: DateLocale,
        resources: &HashMap<String, Vec<u8>>,
    ) -> Result<&[u8], RenderError> {
        self.load_fonts(resources);

        let design = match context {
            RenderContext::Preview => design.resolve(data, locale),
            RenderContext::Edit => design.clone(),
        };

        let width = design.dimensions.width;
        let height = design.dimensions.height;

        if self
            .pixmap_buffer
            .as_ref()
            .map_or(true, |p| p.width() != width || p.height() != height)
        {
            self.pixmap_buffer = Pixmap::new(width, height);
        }

        let Some(mut pixmap) = self.pixmap_buffer.take() else {
            return Err(RenderError::PixmapCreationError(
                "Invalid canvas dimensions".into(),
            ));
        };
        pixmap.fill(Color::WHITE);

        self.draw_background(&mut pixmap, &design, resources)?;

        for element in &design.elements {
            let frame = element.frame;
            self.draw_box_background(&mut pixmap, frame, &element.style)?;

            match element_visual(&element.kind, context) {
                ElementVisual::TextBlock { content, style } => {
                    self.draw_text(&mut pixmap, frame, &content, &style)?;
                }
                ElementVisual::Bitmap { url, fit } => {
                    self.draw_bitmap(&mut pixmap, frame, &url, fit, resources);
                }
                ElementVisual::Placeholder { .. } => {
                    draw_placeholder(&mut pixmap, frame);
                }
                ElementVisual::EmptyBox => {}
            }

            self.draw_box_border(&mut pixmap, frame, &element.style)?;
        }

        self.pixmap_buffer = Some(pixmap);
        Ok(self.pixmap_buffer.as_ref().unwrap().data())
    }

    /// PNG-encoded render of the design.
    pub fn render(
        &mut self,
        design: &Design,
        context: RenderContext,
        data: &CertificateData,
        locale: DateLocale,
        resources: &HashMap<String, Vec<u8>>,
    ) -> Result<Vec<u8>, RenderError> {
        self.render_raw(design, context, data, locale, resources)?;

        self.pixmap_buffer
            .as_ref()
            .unwrap()
            .encode_png()
            .map_err(|e| RenderError::EncodingError(e.to_string()))
    }

    fn load_fonts(&mut self, resources: &HashMap<String, Vec<u8>>) {
        for (name, bytes) in resources {
            if (name.ends_with(".ttf") || name.ends_with(".otf"))
                && !self.loaded_fonts.contains(name)
            {
                self.font_system.db_mut().load_font_data(bytes.clone());
                self.loaded_fonts.insert(name.clone());
                debug!(font = %name, "loaded font resource");
            }
        }
    }

    fn draw_background(
        &mut self,
        pixmap: &mut Pixmap,
        design: &Design,
        resources: &HashMap<String, Vec<u8>>,
    ) -> Result<(), RenderError> {
        let plan = background_plan(&design.background);
        let width = design.dimensions.width;
        let height = design.dimensions.height;

        match plan.visual {
            BackgroundVisual::Empty => Ok(()),
            BackgroundVisual::Solid(color) => {
                let color = parse_color_with_opacity(&color, plan.opacity)
                    .ok_or_else(|| RenderError::InvalidColorFormat(color.clone()))?;
                let mut paint = Paint::default();
                paint.set_color(color);
                let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
                    .ok_or_else(|| RenderError::InvalidDimensions("canvas".into()))?;
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                Ok(())
            }
            BackgroundVisual::LinearGradient { start, end } => {
                let start = parse_color_with_opacity(&start, plan.opacity)
                    .ok_or_else(|| RenderError::InvalidColorFormat(start.clone()))?;
                let end = parse_color_with_opacity(&end, plan.opacity)
                    .ok_or_else(|| RenderError::InvalidColorFormat(end.clone()))?;
                let shader = LinearGradient::new(
                    Point::from_xy(0.0, 0.0),
                    Point::from_xy(0.0, height as f32),
                    vec![GradientStop::new(0.0, start), GradientStop::new(1.0, end)],
                    SpreadMode::Pad,
                    Transform::identity(),
                )
                .ok_or_else(|| RenderError::InvalidDimensions("gradient".into()))?;
                let mut paint = Paint::default();
                paint.shader = shader;
                let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
                    .ok_or_else(|| RenderError::InvalidDimensions("canvas".into()))?;
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                Ok(())
            }
            BackgroundVisual::Bitmap { url } => {
                let cache_key = format!("bg_{url}_{width}_{height}");
                if !self.image_cache.contains_key(&cache_key) {
                    let Some(bytes) = resources.get(&url) else {
                        warn!(resource = %url, "background resource not found");
                        return Ok(());
                    };
                    let Ok(dynamic_image) = image::load_from_memory(bytes) else {
                        warn!(resource = %url, "failed to decode background image");
                        return Ok(());
                    };
                    // cover fit, centered: crop-resize to the exact canvas
                    let resized = dynamic_image.resize_to_fill(
                        width,
                        height,
                        image::imageops::FilterType::Lanczos3,
                    );
                    let rgba_image = resized.to_rgba8();
                    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
                    for pixel in rgba_image.pixels() {
                        let a_f = pixel[3] as f32 / 255.0;
                        pixels.push((pixel[0] as f32 * a_f) as u8);
                        pixels.push((pixel[1] as f32 * a_f) as u8);
                        pixels.push((pixel[2] as f32 * a_f) as u8);
                        pixels.push(pixel[3]);
                    }
                    if let Some(size) = IntSize::from_wh(width, height) {
                        if let Some(decoded) = Pixmap::from_vec(pixels, size) {
                            self.image_cache.insert(cache_key.clone(), decoded);
                        }
                    }
                }

                if let Some(cached) = self.image_cache.get(&cache_key) {
                    let paint = PixmapPaint { opacity: plan.opacity, ..PixmapPaint::default() };
                    pixmap.draw_pixmap(
                        0,
                        0,
                        cached.as_ref(),
                        &paint,
                        Transform::identity(),
                        None,
                    );
                }
                Ok(())
            }
        }
    }

    fn draw_box_background(
        &mut self,
        pixmap: &mut Pixmap,
        frame: Frame,
        style: &laurel_core::BoxStyle,
    ) -> Result<(), RenderError> {
        let Some(color) = &style.background_color else {
            return Ok(());
        };
        let color = parse_color(color)
            .ok_or_else(|| RenderError::InvalidColorFormat(color.clone()))?;
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        let rect = Rect::from_xywh(frame.x, frame.y, frame.width, frame.height)
            .ok_or_else(|| RenderError::InvalidDimensions("element width/height must be > 0".into()))?;

        if style.border_radius > 0.0 {
            if let Some(path) = create_rounded_rect_path(rect, style.border_radius) {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        } else {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        Ok(())
    }

    fn draw_box_border(
        &mut self,
        pixmap: &mut Pixmap,
        frame: Frame,
        style: &laurel_core::BoxStyle,
    ) -> Result<(), RenderError> {
        if style.border_width <= 0.0 {
            return Ok(());
        }
        let color_spec = style.border_color.as_deref().unwrap_or("#000000");
        let color = parse_color(color_spec)
            .ok_or_else(|| RenderError::InvalidColorFormat(color_spec.to_string()))?;
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        let rect = Rect::from_xywh(frame.x, frame.y, frame.width, frame.height)
            .ok_or_else(|| RenderError::InvalidDimensions("element width/height must be > 0".into()))?;
        let path = if style.border_radius > 0.0 {
            create_rounded_rect_path(rect, style.border_radius)
        } else {
            let mut pb = PathBuilder::new();
            pb.push_rect(rect);
            pb.finish()
        };

        if let Some(path) = path {
            let stroke = Stroke { width: style.border_width, ..Stroke::default() };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        pixmap: &mut Pixmap,
        frame: Frame,
        content: &str,
        style: &TextStyle,
    ) -> Result<(), RenderError> {
        if content.is_empty() {
            return Ok(());
        }
        let text_color = parse_color(&style.color)
            .ok_or_else(|| RenderError::InvalidColorFormat(style.color.clone()))?;

        let font_size = style.font_size as f32;
        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(frame.width), Some(frame.height));

        let mut attrs = Attrs::new();
        attrs = attrs.family(resolve_family(&self.font_system, &style.font_family));
        if style.font_weight.eq_ignore_ascii_case("bold") {
            attrs = attrs.weight(Weight::BOLD);
        }

        let align = match style.text_align {
            TextAlign::Left => Align::Left,
            TextAlign::Center => Align::Center,
            TextAlign::Right => Align::Right,
        };

        buffer.set_text(
            &mut self.font_system,
            content,
            &attrs,
            Shaping::Advanced,
            Some(align),
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let origin = Transform::from_translate(frame.x, frame.y);

        for run in buffer.layout_runs() {
            for glyph in run.glyphs {
                let physical_glyph = glyph.physical((0., 0.), 1.0);

                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical_glyph.cache_key)
                else {
                    warn!("failed to rasterize a glyph");
                    continue;
                };

                let width = image.placement.width;
                let height = image.placement.height;
                if width == 0 || height == 0 {
                    continue;
                }

                let glyph_x = (physical_glyph.x as f32) + (image.placement.left as f32);
                let glyph_y = run.line_y + (physical_glyph.y as f32) - (image.placement.top as f32);

                let size = IntSize::from_wh(width, height).unwrap();
                let mut pixels = Vec::with_capacity((width * height * 4) as usize);

                if image.data.len() == (width * height) as usize {
                    let r_f = text_color.red();
                    let g_f = text_color.green();
                    let b_f = text_color.blue();
                    let a_f = text_color.alpha();

                    for mask_val in image.data.iter() {
                        let mask_alpha = *mask_val as f32 / 255.0;
                        let final_alpha = a_f * mask_alpha;

                        pixels.push((r_f * final_alpha * 255.0) as u8);
                        pixels.push((g_f * final_alpha * 255.0) as u8);
                        pixels.push((b_f * final_alpha * 255.0) as u8);
                        pixels.push((final_alpha * 255.0) as u8);
                    }
                } else if image.data.len() == (width * height * 4) as usize {
                    for chunk in image.data.chunks(4) {
                        let a_f = chunk[3] as f32 / 255.0;
                        pixels.push((chunk[0] as f32 * a_f) as u8);
                        pixels.push((chunk[1] as f32 * a_f) as u8);
                        pixels.push((chunk[2] as f32 * a_f) as u8);
                        pixels.push(chunk[3]);
                    }
                } else {
                    warn!(len = image.data.len(), "unknown glyph image format");
                    continue;
                }

                if let Some(glyph_pixmap) = Pixmap::from_vec(pixels, size) {
                    let glyph_transform = origin.pre_translate(glyph_x, glyph_y);
                    pixmap.draw_pixmap(
                        0,
                        0,
                        glyph_pixmap.as_ref(),
                        &PixmapPaint::default(),
                        glyph_transform,
                        None,
                    );
                }
            }
        }
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        pixmap: &mut Pixmap,
        frame: Frame,
        url: &str,
        fit: ImageFit,
        resources: &HashMap<String, Vec<u8>>,
    ) {
        let target = match fit {
            ImageFit::Cover => frame,
            ImageFit::Contain => {
                let Some((src_w, src_h)) = self.intrinsic_size(url, resources) else {
                    warn!(resource = %url, "image resource not found");
                    return;
                };
                fit_rect(src_w, src_h, frame, ImageFit::Contain)
            }
        };

        let target_w = target.width as u32;
        let target_h = target.height as u32;
        if target_w == 0 || target_h == 0 {
            return;
        }

        let cache_key = format!("{url}_{target_w}x{target_h}_{fit:?}");
        if !self.image_cache.contains_key(&cache_key) {
            let Some(bytes) = resources.get(url) else {
                warn!(resource = %url, "image resource not found");
                return;
            };
            let dynamic_image = match image::load_from_memory(bytes) {
                Ok(img) => img,
                Err(e) => {
                    warn!(resource = %url, error = %e, "failed to decode image");
                    return;
                }
            };
            let resized = match fit {
                ImageFit::Cover => dynamic_image.resize_to_fill(
                    target_w,
                    target_h,
                    image::imageops::FilterType::Lanczos3,
                ),
                ImageFit::Contain => dynamic_image.resize_exact(
                    target_w,
                    target_h,
                    image::imageops::FilterType::Lanczos3,
                ),
            };
            let rgba_image = resized.to_rgba8();
            let mut pixels = Vec::with_capacity((target_w * target_h * 4) as usize);
            for pixel in rgba_image.pixels() {
                let a_f = pixel[3] as f32 / 255.0;
                pixels.push((pixel[0] as f32 * a_f) as u8);
                pixels.push((pixel[1] as f32 * a_f) as u8);
                pixels.push((pixel[2] as f32 * a_f) as u8);
                pixels.push(pixel[3]);
            }
            let Some(size) = IntSize::from_wh(target_w, target_h) else {
                return;
            };
            let Some(decoded) = Pixmap::from_vec(pixels, size) else {
                return;
            };
            self.image_cache.insert(cache_key.clone(), decoded);
        }

        if let Some(cached) = self.image_cache.get(&cache_key) {
            pixmap.draw_pixmap(
                0,
                0,
                cached.as_ref(),
                &PixmapPaint::default(),
                Transform::from_translate(target.x, target.y),
                None,
            );
        }
    }

    fn intrinsic_size(&self, url: &str, resources: &HashMap<String, Vec<u8>>) -> Option<(f32, f32)> {
        let bytes = resources.get(url)?;
        let dims = image::load_from_memory(bytes).ok()?;
        use image::GenericImageView;
        let (w, h) = dims.dimensions();
        Some((w as f32, h as f32))
    }
}

/// Unset image/qr/signature boxes: light fill with a dashed outline.
fn draw_placeholder(pixmap: &mut Pixmap, frame: Frame) {
    let Some(rect) = Rect::from_xywh(frame.x, frame.y, frame.width, frame.height) else {
        return;
    };

    let mut fill = Paint::default();
    fill.set_color(Color::from_rgba8(0xf4, 0xf4, 0xf5, 0xff));
    pixmap.fill_rect(rect, &fill, Transform::identity(), None);

    let mut pb = PathBuilder::new();
    pb.push_rect(rect);
    let Some(path) = pb.finish() else {
        return;
    };
    let mut border = Paint::default();
    border.set_color(Color::from_rgba8(0xa1, 0xa1, 0xaa, 0xff));
    border.anti_alias = true;
    let stroke = Stroke {
        width: 1.0,
        dash: StrokeDash::new(vec![4.0, 4.0], 0.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &border, &stroke, Transform::identity(), None);
}

fn resolve_family<'a>(font_system: &FontSystem, spec: &str) -> Family<'a> {
    for candidate in spec.split(',').map(str::trim) {
        match candidate.to_lowercase().as_str() {
            "" => continue,
            "sans serif" | "sans-serif" | "arial" | "system-ui" => return Family::SansSerif,
            "serif" => return Family::Serif,
            "mono" | "monospace" => return Family::Monospace,
            "cursive" => return Family::Cursive,
            other => {
                let normalized = other.replace(' ', "");
                let mut found: Option<String> = None;
                font_system.db().faces().for_each(|face| {
                    for (name, _) in &face.families {
                        if name.to_lowercase().replace(' ', "") == normalized {
                            found = Some(name.clone());
                        }
                    }
                });
                if let Some(name) = found {
                    return Family::Name(Box::leak(name.into_boxed_str()));
                }
            }
        }
    }
    Family::SansSerif
}

fn create_rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();

    let x = rect.x();
    let y = rect.y();
    let w = rect.width();
    let h = rect.height();

    let r = radius.min(w / 2.0).min(h / 2.0);

    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();

    pb.finish()
}

fn parse_color(hex: &str) -> Option<Color> {
    if !hex.starts_with('#') || hex.len() != 7 {
        return None;
    }

    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;

    Some(Color::from_rgba8(r, g, b, 255))
}

fn parse_color_with_opacity(hex: &str, opacity: f32) -> Option<Color> {
    let color = parse_color(hex)?;
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(Color::from_rgba8(
        (color.red() * 255.0) as u8,
        (color.green() * 255.0) as u8,
        (color.blue() * 255.0) as u8,
        alpha,
    ))
}
