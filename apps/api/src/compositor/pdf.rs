//! Serializes flowed pages to PDF with the base-14 fonts.
//!
//! Text is encoded as WinAnsi; characters outside that code page become '?'.
//! Output is deterministic for identical input (no timestamps, no random ids).

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::compositor::flow::{DrawOp, FlowedDocument};
use crate::theme::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct SerializeError(pub String);

/// Resource names and (bold, italic) faces, in font-object order.
const FACES: [(&[u8], bool, bool); 4] = [
    (b"F1", false, false),
    (b"F2", true, false),
    (b"F3", false, true),
    (b"F4", true, true),
];

struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

pub fn write(doc: &FlowedDocument, title: &str) -> Result<Vec<u8>, SerializeError> {
    if !(doc.width.is_finite() && doc.height.is_finite() && doc.width > 0.0 && doc.height > 0.0) {
        return Err(SerializeError(format!(
            "invalid page size {}x{}",
            doc.width, doc.height
        )));
    }

    let mut alloc = RefAlloc(0);
    let catalog_id = alloc.next();
    let page_tree_id = alloc.next();
    let info_id = alloc.next();
    let font_ids: Vec<Ref> = FACES.iter().map(|_| alloc.next()).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(env!("CARGO_PKG_NAME")));

    for (&(_, bold, italic), &id) in FACES.iter().zip(&font_ids) {
        pdf.type1_font(id)
            .base_font(Name(doc.font.base_font(bold, italic).as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut page_ids = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let page_id = alloc.next();
        let content_id = alloc.next();
        page_ids.push(page_id);

        let mut content = Content::new();
        fill_rect(&mut content, doc.height, 0.0, 0.0, doc.width, doc.height, doc.paper);

        let mut links = Vec::new();
        for op in page.backgrounds.iter().chain(&page.content) {
            match op {
                DrawOp::Rect { x, top, w, h, color } => {
                    check(&[*x, *top, *w, *h])?;
                    fill_rect(&mut content, doc.height, *x, *top, *w, *h, *color);
                }
                DrawOp::Text {
                    x,
                    baseline,
                    text,
                    bold,
                    italic,
                    size,
                    color,
                } => {
                    check(&[*x, *baseline, *size])?;
                    let (r, g, b) = color.unit();
                    content.begin_text();
                    content.set_font(Name(face_name(*bold, *italic)), *size);
                    content.set_fill_rgb(r, g, b);
                    content.next_line(*x, doc.height - baseline);
                    content.show(Str(&encode_win_ansi(text)));
                    content.end_text();
                }
                DrawOp::Link { x, top, w, h, uri } => {
                    check(&[*x, *top, *w, *h])?;
                    links.push((alloc.next(), *x, *top, *w, *h, uri));
                }
            }
        }

        for (id, x, top, w, h, uri) in &links {
            let mut annotation = pdf.annotation(*id);
            annotation
                .subtype(AnnotationType::Link)
                .rect(Rect::new(*x, doc.height - top - h, x + w, doc.height - top))
                .border(0.0, 0.0, 0.0, None);
            annotation
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(uri.as_bytes()));
        }

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, doc.width, doc.height))
            .parent(page_tree_id)
            .contents(content_id);
        if !links.is_empty() {
            page_writer.annotations(links.iter().map(|l| l.0));
        }
        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        for (&(name, _, _), &id) in FACES.iter().zip(&font_ids) {
            fonts.pair(Name(name), id);
        }
        drop(fonts);
        drop(resources);
        drop(page_writer);

        pdf.stream(content_id, &content.finish());
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    Ok(pdf.finish())
}

fn face_name(bold: bool, italic: bool) -> &'static [u8] {
    FACES
        .iter()
        .find(|(_, b, i)| *b == bold && *i == italic)
        .map(|(name, _, _)| *name)
        .unwrap_or(b"F1")
}

fn check(values: &[f32]) -> Result<(), SerializeError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SerializeError(format!("non-finite coordinate in {values:?}")))
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(content: &mut Content, page_h: f32, x: f32, top: f32, w: f32, h: f32, color: Color) {
    let (r, g, b) = color.unit();
    content.set_fill_rgb(r, g, b);
    content.rect(x, page_h - top - h, w, h);
    content.fill_nonzero();
}

/// Maps text to Windows-1252 bytes.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => code as u8,
        _ => match c {
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201e}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02c6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8a,
            '\u{2039}' => 0x8b,
            '\u{0152}' => 0x8c,
            '\u{017d}' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02dc}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9a,
            '\u{203a}' => 0x9b,
            '\u{0153}' => 0x9c,
            '\u{017e}' => 0x9e,
            '\u{0178}' => 0x9f,
            '\t' => b' ',
            _ => b'?',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::flow::LaidOutPage;
    use crate::layout::FontFamily;

    fn doc(pages: Vec<LaidOutPage>) -> FlowedDocument {
        FlowedDocument {
            width: 612.0,
            height: 792.0,
            font: FontFamily::Helvetica,
            paper: Color::WHITE,
            pages,
        }
    }

    fn text_op(text: &str) -> DrawOp {
        DrawOp::Text {
            x: 50.0,
            baseline: 60.0,
            text: text.to_string(),
            bold: false,
            italic: false,
            size: 10.0,
            color: Color::BLACK,
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Caf\u{e9}"), b"Caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} \u{2013} \u{2026}"), vec![0x95, b' ', 0x96, b' ', 0x85]);
        assert_eq!(encode_win_ansi("\u{4e2d}\u{1f600}"), b"??".to_vec());
    }

    #[test]
    fn test_writes_a_pdf_with_one_page_object_per_page() {
        let pages = vec![
            LaidOutPage {
                backgrounds: Vec::new(),
                content: vec![text_op("Hello")],
            },
            LaidOutPage::default(),
        ];
        let bytes = write(&doc(pages), "Ada Lovelace").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"(Ada Lovelace)"));
    }

    #[test]
    fn test_links_become_uri_annotations() {
        let pages = vec![LaidOutPage {
            backgrounds: Vec::new(),
            content: vec![DrawOp::Link {
                x: 10.0,
                top: 10.0,
                w: 40.0,
                h: 12.0,
                uri: "https://example.com".to_string(),
            }],
        }];
        let bytes = write(&doc(pages), "t").unwrap();
        assert!(contains(&bytes, b"/Annots"));
        assert!(contains(&bytes, b"(https://example.com)"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let pages = || {
            vec![LaidOutPage {
                backgrounds: vec![DrawOp::Rect {
                    x: 0.0,
                    top: 0.0,
                    w: 100.0,
                    h: 792.0,
                    color: Color::rgb(37, 99, 235),
                }],
                content: vec![text_op("Same")],
            }]
        };
        assert_eq!(write(&doc(pages()), "t").unwrap(), write(&doc(pages()), "t").unwrap());
    }

    #[test]
    fn test_non_finite_geometry_is_an_error() {
        let pages = vec![LaidOutPage {
            backgrounds: Vec::new(),
            content: vec![DrawOp::Rect {
                x: f32::NAN,
                top: 0.0,
                w: 1.0,
                h: 1.0,
                color: Color::BLACK,
            }],
        }];
        assert!(write(&doc(pages), "t").is_err());
    }
}
