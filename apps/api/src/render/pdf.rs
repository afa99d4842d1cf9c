//! PDF encoder for laid-out CV pages, built on `lopdf`.
//!
//! Text is drawn with the standard Helvetica faces in WinAnsiEncoding, so no
//! font program is embedded. Characters outside that encoding are written as `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::layout::{DrawOp, FontFace, LaidOutDocument, Page, PageGeometry};
use crate::render::RenderError;

const RULE_WIDTH_PT: f32 = 0.5;

/// Encodes every page of `doc` into a single PDF file.
pub fn write_pdf(doc: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
    let geometry = doc.geometry;
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = page_content(page, &geometry);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(format!("content stream: {e}")))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(geometry.width_pt),
                Object::Real(geometry.height_pt),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|e| RenderError::Encode(format!("document: {e}")))?;
    Ok(buffer)
}

/// Translates draw ops into content-stream operators. PDF user space has its
/// origin at the bottom-left, so top-down positions are flipped.
fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                face,
                size_pt,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![face.resource_name().into(), Object::Real(*size_pt)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![
                        Object::Real(*x),
                        Object::Real(geometry.height_pt - *baseline),
                    ],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y } => {
                let y = geometry.height_pt - *y;
                operations.push(Operation::new("w", vec![Object::Real(RULE_WIDTH_PT)]));
                operations.push(Operation::new("m", vec![Object::Real(*x1), Object::Real(y)]));
                operations.push(Operation::new("l", vec![Object::Real(*x2), Object::Real(y)]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    Content { operations }
}

/// Maps text onto WinAnsiEncoding (Windows-1252) bytes.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' => b' ',
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}
