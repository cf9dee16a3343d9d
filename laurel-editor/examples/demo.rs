use dioxus::prelude::*;
use laurel_core::{
    Background, BackgroundKind, BoxStyle, Design, Dimensions, Element, ElementKind, Frame,
    Layout, TextAlign, TextItem, TextStyle,
};
use laurel_editor::{CertificateEditor, SaveError};

fn main() {
    dioxus::launch(App);
}

fn App() -> dioxus::prelude::Element {
    let save = use_callback(|design: Design| -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(&design)
            .map_err(|e| SaveError::Rejected(e.to_string()))?;
        println!("saving design:\n{json}");
        Ok(())
    });

    rsx! {
        style {
            "{{
                body, html {{
                    margin: 0;
                    padding: 0;
                    height: 100%;
                    width: 100%;
                    overflow: hidden;
                }}
            }}"
        }
        CertificateEditor {
            design: starter_design(),
            editable: true,
            save,
            on_close: move |_| {},
        }
    }
}

fn starter_design() -> Design {
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
                frame: Frame::new(100.0, 120.0, 600.0, 60.0),
                style: BoxStyle::default(),
                kind: ElementKind::Text(TextItem {
                    content: "Certificate of Completion".to_string(),
                    style: TextStyle {
                        font_size: 40,
                        font_weight: "bold".to_string(),
                        color: "#1f2937".to_string(),
                        text_align: TextAlign::Center,
                        ..TextStyle::default()
                    },
                }),
            },
            Element {
                id: "recipient".to_string(),
                frame: Frame::new(100.0, 240.0, 600.0, 50.0),
                style: BoxStyle::default(),
                kind: ElementKind::Text(TextItem {
                    content: "Awarded to {{recipient_name}}".to_string(),
                    style: TextStyle {
                        font_size: 28,
                        color: "#374151".to_string(),
                        text_align: TextAlign::Center,
                        ..TextStyle::default()
                    },
                }),
            },
        ],
        variables: Vec::new(),
    }
}
