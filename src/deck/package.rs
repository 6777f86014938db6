//! Deck serialization to a flat OpenDocument presentation (`.fodp`).
//!
//! Flat ODF is a single XML file, so no archive container is needed and
//! LibreOffice accepts it directly as the conversion input. Referenced
//! artifact images are embedded as base64 binary data; a reference whose
//! file has gone stale is skipped rather than failing the package.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{Document, PageGeometry, Region, Slide, PAGE_HEIGHT_IN, PAGE_WIDTH_IN, TITLE_REGION};

/// Serialize the deck into the scratch directory and return the package
/// path. The file is kept; the scratch directory is append-only space.
pub fn write_package(
    document: &Document,
    geom: &PageGeometry,
    scratch: &Path,
) -> io::Result<PathBuf> {
    let xml = package_xml(document, geom);
    let file = tempfile::Builder::new()
        .prefix("deck-")
        .suffix(".fodp")
        .tempfile_in(scratch)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    fs::write(&path, xml)?;
    Ok(path)
}

pub fn package_xml(document: &Document, geom: &PageGeometry) -> String {
    let mut xml = String::new();
    xml.push_str(HEADER);
    let _ = write!(
        xml,
        concat!(
            "<office:automatic-styles>",
            "<style:page-layout style:name=\"PM1\">",
            "<style:page-layout-properties fo:page-width=\"{w}in\" fo:page-height=\"{h}in\" ",
            "style:print-orientation=\"landscape\"/>",
            "</style:page-layout>",
            "<style:style style:name=\"dp1\" style:family=\"drawing-page\"/>",
            "<style:style style:name=\"Ttl\" style:family=\"paragraph\">",
            "<style:text-properties fo:font-size=\"24pt\" fo:font-weight=\"bold\"/>",
            "</style:style>",
            "<style:style style:name=\"Body\" style:family=\"paragraph\">",
            "<style:text-properties fo:font-size=\"{fs}pt\"/>",
            "</style:style>",
            "</office:automatic-styles>",
            "<office:master-styles>",
            "<style:master-page style:name=\"Default\" style:page-layout-name=\"PM1\" ",
            "draw:style-name=\"dp1\"/>",
            "</office:master-styles>",
        ),
        w = PAGE_WIDTH_IN,
        h = PAGE_HEIGHT_IN,
        fs = geom.font_size_pt,
    );
    xml.push_str("<office:body><office:presentation>");
    for (i, slide) in document.slides().iter().enumerate() {
        write_page(&mut xml, slide, i + 1, geom);
    }
    xml.push_str("</office:presentation></office:body></office:document>");
    xml
}

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<office:document ",
    "xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" ",
    "xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\" ",
    "xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\" ",
    "xmlns:draw=\"urn:oasis:names:tc:opendocument:xmlns:drawing:1.0\" ",
    "xmlns:presentation=\"urn:oasis:names:tc:opendocument:xmlns:presentation:1.0\" ",
    "xmlns:svg=\"urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0\" ",
    "xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\" ",
    "xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
    "office:version=\"1.3\" ",
    "office:mimetype=\"application/vnd.oasis.opendocument.presentation\">",
);

fn write_page(xml: &mut String, slide: &Slide, number: usize, geom: &PageGeometry) {
    let _ = write!(
        xml,
        "<draw:page draw:name=\"page{}\" draw:master-page-name=\"Default\">",
        number
    );

    if !slide.title.is_empty() {
        text_frame(xml, &TITLE_REGION, "Ttl", std::iter::once(slide.title.as_str()));
    }

    // An image region only materializes when the referenced file is still
    // readable; stale references degrade to a text-only page.
    let image_data = slide
        .artifact_ref
        .as_deref()
        .and_then(|p| fs::read(p).ok())
        .map(|bytes| STANDARD.encode(bytes));
    let regions = slide.layout.regions(geom, image_data.is_some());

    if let Some(text_region) = regions.text {
        if !slide.body.is_empty() {
            text_frame(xml, &text_region, "Body", slide.body.lines());
        }
    }
    if let Some(data) = image_data {
        for region in &regions.images {
            image_frame(xml, region, &data);
        }
    }

    xml.push_str("</draw:page>");
}

fn text_frame<'a>(
    xml: &mut String,
    region: &Region,
    style: &str,
    lines: impl Iterator<Item = &'a str>,
) {
    frame_open(xml, region);
    xml.push_str("<draw:text-box>");
    for line in lines {
        let _ = write!(
            xml,
            "<text:p text:style-name=\"{}\">{}</text:p>",
            style,
            xml_escape(line)
        );
    }
    xml.push_str("</draw:text-box></draw:frame>");
}

fn image_frame(xml: &mut String, region: &Region, base64_data: &str) {
    frame_open(xml, region);
    let _ = write!(
        xml,
        "<draw:image><office:binary-data>{}</office:binary-data></draw:image></draw:frame>",
        base64_data
    );
}

fn frame_open(xml: &mut String, region: &Region) {
    let _ = write!(
        xml,
        concat!(
            "<draw:frame svg:x=\"{:.3}in\" svg:y=\"{:.3}in\" ",
            "svg:width=\"{:.3}in\" svg:height=\"{:.3}in\">"
        ),
        region.x * PAGE_WIDTH_IN,
        region.y * PAGE_HEIGHT_IN,
        region.w * PAGE_WIDTH_IN,
        region.h * PAGE_HEIGHT_IN,
    );
}

pub fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
