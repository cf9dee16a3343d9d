use image::{Rgba, RgbaImage};
use laurel_core::{
    Background, BackgroundKind, BoxStyle, CertificateData, DateLocale, Design, Dimensions,
    Element, ElementKind, Frame, Layout, LogoItem, QrItem, SignatureItem, TextAlign, TextItem,
    TextStyle,
};
use laurel_render::{RenderContext, Renderer};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

fn main() {
    println!("Generating test resources...");

    let mut logo_img = RgbaImage::new(120, 120);
    for x in 0..120 {
        for y in 0..120 {
            let color = if (x / 12 + y / 12) % 2 == 0 {
                Rgba([30, 58, 138, 255])
            } else {
                Rgba([147, 51, 234, 255])
            };
            logo_img.put_pixel(x, y, color);
        }
    }

    let mut logo_bytes = Vec::new();
    logo_img
        .write_to(&mut std::io::Cursor::new(&mut logo_bytes), image::ImageFormat::Png)
        .unwrap();
    println!("Logo created: {} bytes", logo_bytes.len());

    let mut resources = HashMap::new();
    resources.insert("logo.png".to_string(), logo_bytes);

    let design = Design {
        layout: Layout::Landscape,
        dimensions: Dimensions { width: 800, height: 600 },
        background: Background {
            kind: BackgroundKind::Gradient,
            value: "linear-gradient(180deg, #fdfaf3, #e9e2cf)".to_string(),
            opacity: 1.0,
        },
        elements: vec![
            Element {
                id: "org_logo".to_string(),
                frame: Frame::new(340.0, 40.0, 120.0, 120.0),
                style: BoxStyle::default(),
                kind: ElementKind::Logo(LogoItem { source: "logo.png".to_string() }),
            },
            Element {
                id: "title".to_string(),
                frame: Frame::new(100.0, 190.0, 600.0, 60.0),
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
                frame: Frame::new(100.0, 280.0, 600.0, 50.0),
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
            Element {
                id: "details".to_string(),
                frame: Frame::new(100.0, 350.0, 600.0, 40.0),
                style: BoxStyle::default(),
                kind: ElementKind::Text(TextItem {
                    content: "{{quiz_title}} with a score of {{score}} on {{completion_date}}"
                        .to_string(),
                    style: TextStyle {
                        font_size: 18,
                        color: "#4b5563".to_string(),
                        text_align: TextAlign::Center,
                        ..TextStyle::default()
                    },
                }),
            },
            Element {
                id: "signature".to_string(),
                frame: Frame::new(120.0, 460.0, 180.0, 70.0),
                style: BoxStyle::default(),
                kind: ElementKind::Signature(SignatureItem { source: String::new() }),
            },
            Element {
                id: "verify_qr".to_string(),
                frame: Frame::new(620.0, 450.0, 96.0, 96.0),
                style: BoxStyle::default(),
                kind: ElementKind::Qr(QrItem {
                    payload: "https://example.com/verify/{{recipient_name}}".to_string(),
                }),
            },
        ],
        variables: Vec::new(),
    };

    let data = CertificateData::sample();

    println!("Initializing Renderer...");
    let mut renderer = Renderer::new();

    println!("Warmup render...");
    let start = std::time::Instant::now();
    let _ = renderer
        .render(&design, RenderContext::Preview, &data, DateLocale::EnUs, &resources)
        .expect("Failed to render");
    println!("Warmup finished in {:?}", start.elapsed());

    let iterations = 100;
    println!("Starting stress test ({} iterations)...", iterations);
    let start_stress = std::time::Instant::now();

    for _ in 0..iterations {
        let _ = renderer
            .render_raw(&design, RenderContext::Preview, &data, DateLocale::EnUs, &resources)
            .expect("Failed to render");
    }

    let total_duration = start_stress.elapsed();
    println!("Stress test finished in {:?}", total_duration);
    println!("Average render time: {:?}", total_duration / iterations);

    let output_bytes = renderer
        .render(&design, RenderContext::Preview, &data, DateLocale::EnUs, &resources)
        .expect("Failed to render");
    let mut file = File::create("certificate_test.png").unwrap();
    file.write_all(&output_bytes).unwrap();
    println!("Saved to certificate_test.png");
}
