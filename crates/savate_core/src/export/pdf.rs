//! PDF rendering of laid-out pages.
//!
//! Uses the two standard Helvetica faces with WinAnsi encoding, so no font is
//! embedded. Coordinates are rounded to whole points; font sizes are kept as given.

use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::info;

use super::layout::{mm, DrawOp, Font, Page};
use crate::config::ReportConfig;
use crate::error::Result;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Encode text for a WinAnsi font. Characters outside Windows-1252 become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut buf = [0u8; 4];
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

fn font_name(font: Font) -> &'static str {
    match font {
        Font::Regular => REGULAR_FONT,
        Font::Bold => BOLD_FONT,
    }
}

fn pt(value: f64) -> Object {
    Object::Integer(value.round() as i64)
}

fn font_size(value: f64) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, font, size, text } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font_name(*font).into(), font_size(*size)]));
                ops.push(Operation::new("Td", vec![pt(*x), pt(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                ops.push(Operation::new("m", vec![pt(*x1), pt(*y1)]));
                ops.push(Operation::new("l", vec![pt(*x2), pt(*y2)]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

fn standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Serialize pages into a complete PDF file.
pub fn render_pdf(pages: &[Page], config: &ReportConfig) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = standard_font(&mut doc, "Helvetica");
    let bold_id = standard_font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content { operations: page_operations(page) };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                pt(0.0),
                pt(0.0),
                pt(mm(config.page_width_mm)),
                pt(mm(config.page_height_mm)),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    info!("Rendered PDF report: {} pages, {} bytes", pages.len(), bytes.len());
    Ok(bytes)
}
