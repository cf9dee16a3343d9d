/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

#![allow(non_snake_case)]

use chrono::NaiveDate;
use dioxus::prelude::*;
use laurel_core::{
    BackgroundKind, BoxStyle, CertificateData, DateLocale, Design, ElementKind, TextAlign,
};

/// Maps a design plus the preview data feed to a read-only, absolutely
/// positioned DOM tree. Content strings are resolved before rendering;
/// QR/signature boxes stay placeholders because generation is external.
pub fn render_to_rsx(design: &Design, data: &CertificateData, locale: DateLocale) -> Element {
    let resolved = design.resolve(data, locale);

    let background_style = match resolved.background.kind {
        BackgroundKind::Color => format!("background-color: {}", resolved.background.value),
        BackgroundKind::Gradient => format!("background: {}", resolved.background.value),
        BackgroundKind::Image => format!(
            "background-image: url('{}'); background-size: cover; background-position: center",
            resolved.background.value
        ),
    };
    let background_opacity = resolved.background.opacity;

    let container_style = format!(
        "position: relative; width: {}px; height: {}px; overflow: hidden; background: #ffffff;",
        resolved.dimensions.width, resolved.dimensions.height
    );

    rsx! {
        div {
            class: "certificate-preview",
            style: "{container_style}",
            div {
                class: "background-layer",
                style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; opacity: {background_opacity}; {background_style};",
            }
            for element in resolved.elements.iter() {
                {
                    let frame = element.frame;
                    let position = format!(
                        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; {}",
                        frame.x, frame.y, frame.width, frame.height, box_css(&element.style)
                    );

                    rsx! {
                        {match &element.kind {
                            ElementKind::Text(text) => {
                                let align = match text.style.text_align {
                                    TextAlign::Left => "left",
                                    TextAlign::Center => "center",
                                    TextAlign::Right => "right",
                                };
                                let style = format!(
                                    "{position} font-size: {}px; font-family: {}; font-weight: {}; color: {}; text-align: {align}; white-space: pre-wrap; overflow: hidden;",
                                    text.style.font_size, text.style.font_family,
                                    text.style.font_weight, text.style.color
                                );
                                rsx! {
                                    div { style: "{style}", "{text.content}" }
                                }
                            }
                            ElementKind::Image(img) => {
                                if img.source.is_empty() {
                                    rsx! {
                                        div { style: "{position}" }
                                    }
                                } else {
                                    let style = format!("{position} object-fit: cover;");
                                    rsx! {
                                        img { src: "{img.source}", style: "{style}" }
                                    }
                                }
                            }
                            ElementKind::Logo(logo) => {
                                if logo.source.is_empty() {
                                    rsx! {
                                        div { style: "{position}" }
                                    }
                                } else {
                                    let style = format!("{position} object-fit: contain;");
                                    rsx! {
                                        img { src: "{logo.source}", style: "{style}" }
                                    }
                                }
                            }
                            ElementKind::Qr(_) => {
                                rsx! {
                                    PlaceholderBox { position, label: "QR code" }
                                }
                            }
                            ElementKind::Signature(sig) => {
                                if sig.source.is_empty() {
                                    rsx! {
                                        PlaceholderBox { position, label: "Signature" }
                                    }
                                } else {
                                    let style = format!("{position} object-fit: contain;");
                                    rsx! {
                                        img { src: "{sig.source}", style: "{style}" }
                                    }
                                }
                            }
                        }}
                    }
                }
            }
        }
    }
}

fn box_css(style: &BoxStyle) -> String {
    let mut css = String::new();
    if let Some(color) = &style.background_color {
        css.push_str(&format!("background-color: {color};"));
    }
    if style.border_width > 0.0 {
        let color = style.border_color.as_deref().unwrap_or("#000000");
        css.push_str(&format!("border: {}px solid {color};", style.border_width));
    }
    if style.border_radius > 0.0 {
        css.push_str(&format!("border-radius: {}px;", style.border_radius));
    }
    css
}

#[component]
fn PlaceholderBox(position: String, label: &'static str) -> Element {
    rsx! {
        div {
            style: "{position} display: flex; align-items: center; justify-content: center; border: 1px dashed #999; color: #999; font-size: 12px;",
            "{label}"
        }
    }
}

/// Preview surface with an editable data feed for ad-hoc testing: the host
/// passes a design, the fields below feed the substitution engine live.
#[component]
pub fn CertificatePreview(design: Design) -> Element {
    let mut data = use_signal(CertificateData::sample);
    let mut locale = use_signal(|| DateLocale::EnUs);

    let current = data.read().clone();
    let current_locale = *locale.read();

    rsx! {
        div {
            class: "preview-surface",
            style: "display: flex; gap: 16px;",

            div {
                class: "preview-data-panel",
                style: "width: 260px; flex-shrink: 0;",
                h3 { "Preview data" }
                div {
                    class: "control-group",
                    label { "Recipient: " }
                    input {
                        r#type: "text",
                        value: "{current.recipient_name}",
                        oninput: move |evt| data.write().recipient_name = evt.value(),
                    }
                }
                div {
                    class: "control-group",
                    label { "Quiz title: " }
                    input {
                        r#type: "text",
                        value: "{current.quiz_title}",
                        oninput: move |evt| data.write().quiz_title = evt.value(),
                    }
                }
                div {
                    class: "control-group",
                    label { "Score: " }
                    input {
                        r#type: "number",
                        value: "{current.score}",
                        oninput: move |evt| {
                            if let Ok(value) = evt.value().parse::<f32>() {
                                data.write().score = value;
                            }
                        }
                    }
                }
                div {
                    class: "control-group",
                    label { "Completed: " }
                    input {
                        r#type: "date",
                        value: "{current.completion_date}",
                        oninput: move |evt| {
                            if let Ok(date) = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d") {
                                data.write().completion_date = date;
                            }
                        }
                    }
                }
                div {
                    class: "control-group",
                    label { "Issuer: " }
                    input {
                        r#type: "text",
                        value: "{current.issuer_name}",
                        oninput: move |evt| data.write().issuer_name = evt.value(),
                    }
                }
                div {
                    class: "control-group",
                    label { "Issuer title: " }
                    input {
                        r#type: "text",
                        value: "{current.issuer_title}",
                        oninput: move |evt| data.write().issuer_title = evt.value(),
                    }
                }
                div {
                    class: "control-group",
                    label { "Date locale: " }
                    select {
                        value: "{current_locale.tag()}",
                        oninput: move |evt| {
                            if let Some(parsed) = DateLocale::from_tag(&evt.value()) {
                                locale.set(parsed);
                            }
                        },
                        option { value: "en-US", "en-US" }
                        option { value: "ja-JP", "ja-JP" }
                    }
                }
            }

            div {
                class: "preview-canvas",
                {render_to_rsx(&design, &current, current_locale)}
            }
        }
    }
}
