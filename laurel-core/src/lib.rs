/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/


use serde::{Deserialize, Serialize};

pub mod vars;

pub use vars::{CertificateData, DateLocale, substitute};

/// One complete certificate template. Cloning a `Design` is the snapshot
/// operation the editor history relies on; equality is structural.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Design {
    pub layout: Layout,
    pub dimensions: Dimensions,
    pub background: Background,
    /// Paint order: first element is painted first (bottom of the stack).
    pub elements: Vec<Element>,
    #[serde(default)]
    pub variables: Vec<VariableDescriptor>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Layout {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Background {
    pub kind: BackgroundKind,
    pub value: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BackgroundKind {
    Color,
    Gradient,
    Image,
}

/// Position and size of an element in design-space pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub id: String,
    pub frame: Frame,
    #[serde(default)]
    pub style: BoxStyle,
    pub kind: ElementKind,
}

/// Box decoration shared by every element kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoxStyle {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default)]
    pub border_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    Text(TextItem),
    Image(ImageItem),
    Logo(LogoItem),
    Qr(QrItem),
    Signature(SignatureItem),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextItem {
    /// Literal text, possibly carrying `{{token}}` placeholders.
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageItem {
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoItem {
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrItem {
    /// Encoded payload, e.g. a verification URL. Image generation is
    /// external; the editor only ever shows a placeholder.
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignatureItem {
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextStyle {
    pub font_size: u32,
    pub font_family: String,
    pub font_weight: String,
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "Sans Serif".to_string(),
            font_weight: "normal".to_string(),
            color: "#000000".to_string(),
            text_align: TextAlign::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A substitution variable the template declares, shown in the preview
/// surface for ad-hoc testing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableDescriptor {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub sample: Option<String>,
}

impl ElementKind {
    pub fn has_text(&self) -> bool {
        matches!(self, ElementKind::Text(_))
    }

    pub fn has_image(&self) -> bool {
        matches!(
            self,
            ElementKind::Image(_) | ElementKind::Logo(_) | ElementKind::Signature(_)
        )
    }

    /// Qr and Signature content is produced outside the editor; both render
    /// as placeholders in every context.
    pub fn is_placeholder_only(&self) -> bool {
        matches!(self, ElementKind::Qr(_) | ElementKind::Signature(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "Text",
            ElementKind::Image(_) => "Image",
            ElementKind::Logo(_) => "Logo",
            ElementKind::Qr(_) => "QR Code",
            ElementKind::Signature(_) => "Signature",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Image(_) => "image",
            ElementKind::Logo(_) => "logo",
            ElementKind::Qr(_) => "qr",
            ElementKind::Signature(_) => "signature",
        }
    }

    /// Default payload for the add-element action.
    pub fn default_content(kind: ElementKindTag) -> Self {
        match kind {
            ElementKindTag::Text => ElementKind::Text(TextItem {
                content: "New Text".to_string(),
                style: TextStyle::default(),
            }),
            ElementKindTag::Image => ElementKind::Image(ImageItem { source: String::new() }),
            ElementKindTag::Logo => ElementKind::Logo(LogoItem { source: String::new() }),
            ElementKindTag::Qr => ElementKind::Qr(QrItem { payload: String::new() }),
            ElementKindTag::Signature => {
                ElementKind::Signature(SignatureItem { source: String::new() })
            }
        }
    }

    /// Default size for the add-element action, positioned at (50, 50).
    pub fn default_frame(kind: ElementKindTag) -> Frame {
        match kind {
            ElementKindTag::Text => Frame::new(50.0, 50.0, 200.0, 40.0),
            ElementKindTag::Image => Frame::new(50.0, 50.0, 150.0, 100.0),
            ElementKindTag::Logo => Frame::new(50.0, 50.0, 100.0, 100.0),
            ElementKindTag::Qr => Frame::new(50.0, 50.0, 96.0, 96.0),
            ElementKindTag::Signature => Frame::new(50.0, 50.0, 160.0, 60.0),
        }
    }
}

/// Payload-free discriminant used by the add-element UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKindTag {
    Text,
    Image,
    Logo,
    Qr,
    Signature,
}

impl ElementKindTag {
    pub const ALL: [ElementKindTag; 5] = [
        ElementKindTag::Text,
        ElementKindTag::Image,
        ElementKindTag::Logo,
        ElementKindTag::Qr,
        ElementKindTag::Signature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ElementKindTag::Text => "Text",
            ElementKindTag::Image => "Image",
            ElementKindTag::Logo => "Logo",
            ElementKindTag::Qr => "QR Code",
            ElementKindTag::Signature => "Signature",
        }
    }
}

impl Design {
    /// An empty landscape design at the default certificate size.
    pub fn blank() -> Self {
        Self {
            layout: Layout::Landscape,
            dimensions: Dimensions { width: 800, height: 600 },
            background: Background {
                kind: BackgroundKind::Color,
                value: "#ffffff".to_string(),
                opacity: 1.0,
            },
            elements: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Substitutes `{{token}}` placeholders in every content string,
    /// returning the resolved copy used for preview rendering.
    pub fn resolve(&self, data: &CertificateData, locale: DateLocale) -> Self {
        let mut resolved = self.clone();
        for element in &mut resolved.elements {
            match &mut element.kind {
                ElementKind::Text(text) => {
                    text.content = substitute(&text.content, data, locale);
                }
                ElementKind::Image(img) => {
                    img.source = substitute(&img.source, data, locale);
                }
                ElementKind::Logo(logo) => {
                    logo.source = substitute(&logo.source, data, locale);
                }
                ElementKind::Qr(qr) => {
                    qr.payload = substitute(&qr.payload, data, locale);
                }
                ElementKind::Signature(sig) => {
                    sig.source = substitute(&sig.source, data, locale);
                }
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_design() -> Design {
        Design {
            layout: Layout::Landscape,
            dimensions: Dimensions { width: 800, height: 600 },
            background: Background {
                kind: BackgroundKind::Color,
                value: "#fdfaf3".to_string(),
                opacity: 1.0,
            },
            elements: vec![
                Element {
                    id: "title".to_string(),
                    frame: Frame::new(100.0, 80.0, 600.0, 60.0),
                    style: BoxStyle::default(),
                    kind: ElementKind::Text(TextItem {
                        content: "Certificate of Completion".to_string(),
                        style: TextStyle {
                            font_size: 36,
                            text_align: TextAlign::Center,
                            ..TextStyle::default()
                        },
                    }),
                },
                Element {
                    id: "recipient".to_string(),
                    frame: Frame::new(100.0, 220.0, 600.0, 48.0),
                    style: BoxStyle::default(),
                    kind: ElementKind::Text(TextItem {
                        content: "{{recipient_name}}".to_string(),
                        style: TextStyle::default(),
                    }),
                },
                Element {
                    id: "verify_qr".to_string(),
                    frame: Frame::new(650.0, 480.0, 96.0, 96.0),
                    style: BoxStyle::default(),
                    kind: ElementKind::Qr(QrItem {
                        payload: "https://example.com/verify/{{recipient_name}}".to_string(),
                    }),
                },
            ],
            variables: vec![VariableDescriptor {
                name: "recipient_name".to_string(),
                label: "Recipient".to_string(),
                sample: Some("Jane Doe".to_string()),
            }],
        }
    }

    #[test]
    fn it_serializes_round_trip() {
        let design = sample_design();
        let json = serde_json::to_string_pretty(&design).unwrap();
        let back: Design = serde_json::from_str(&json).unwrap();
        assert_eq!(design, back);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r##"{
            "layout": "Portrait",
            "dimensions": { "width": 600, "height": 800 },
            "background": { "kind": "Color", "value": "#ffffff" },
            "elements": []
        }"##;
        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.background.opacity, 1.0);
        assert!(design.variables.is_empty());
    }

    #[test]
    fn capabilities_follow_element_kind() {
        let text = ElementKind::default_content(ElementKindTag::Text);
        assert!(text.has_text());
        assert!(!text.has_image());
        assert!(!text.is_placeholder_only());

        let qr = ElementKind::default_content(ElementKindTag::Qr);
        assert!(qr.is_placeholder_only());
        assert!(!qr.has_text());

        let logo = ElementKind::default_content(ElementKindTag::Logo);
        assert!(logo.has_image());
    }

    #[test]
    fn default_text_frame_is_200_by_40() {
        let frame = ElementKind::default_frame(ElementKindTag::Text);
        assert_eq!((frame.width, frame.height), (200.0, 40.0));
        assert_eq!((frame.x, frame.y), (50.0, 50.0));
    }

    #[test]
    fn resolve_substitutes_every_content_string() {
        let design = sample_design();
        let data = CertificateData::sample();
        let resolved = design.resolve(&data, DateLocale::EnUs);

        let recipient = resolved.element("recipient").unwrap();
        if let ElementKind::Text(text) = &recipient.kind {
            assert_eq!(text.content, "Jane Doe");
        } else {
            panic!("expected text element");
        }

        let qr = resolved.element("verify_qr").unwrap();
        if let ElementKind::Qr(qr) = &qr.kind {
            assert_eq!(qr.payload, "https://example.com/verify/Jane Doe");
        } else {
            panic!("expected qr element");
        }

        // the original is untouched
        if let ElementKind::Text(text) = &design.element("recipient").unwrap().kind {
            assert_eq!(text.content, "{{recipient_name}}");
        }
    }
}
