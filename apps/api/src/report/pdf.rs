//! Serializes laid-out pages into a PDF document using the base-14 Helvetica fonts.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::report::font_metrics::FontFace;
use crate::report::layout::{PageConfig, PageLayout};
use crate::report::RenderError;

/// Encodes text for a WinAnsiEncoding font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        let face = line.style.face();
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                face.resource_key().into(),
                (line.style.size_pt().round() as i64).into(),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                (line.x_pt.round() as i64).into(),
                (line.y_pt.round() as i64).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

/// Writes `pages` as a single PDF document and returns its bytes.
pub fn write_pdf(pages: &[PageLayout], config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
        let font_id = doc.add_object(font_dictionary(face));
        fonts.set(face.resource_key(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let media_box = || -> Vec<Object> {
        vec![
            0i64.into(),
            0i64.into(),
            (config.width_pt.round() as i64).into(),
            (config.height_pt.round() as i64).into(),
        ]
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box(),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}
