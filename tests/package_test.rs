use deckgen::deck::package::{package_xml, xml_escape};
use deckgen::deck::{Document, PageGeometry, SlideLayout};

#[test]
fn package_has_one_page_per_slide() {
    let mut doc = Document::new();
    doc.add_slide("One", "a\nb", SlideLayout::TextOnly, None);
    doc.add_slide("Two", "", SlideLayout::ImageOnly, None);

    let xml = package_xml(&doc, &PageGeometry::default());
    assert!(xml.starts_with("<?xml version=\"1.0\""));
    assert_eq!(xml.matches("<draw:page ").count(), 2);
    assert!(xml.contains("office:mimetype=\"application/vnd.oasis.opendocument.presentation\""));
    // Two body lines become two paragraphs.
    assert!(xml.contains("<text:p text:style-name=\"Body\">a</text:p>"));
    assert!(xml.contains("<text:p text:style-name=\"Body\">b</text:p>"));
}

#[test]
fn grid_layout_embeds_the_same_image_four_times() {
    let dir = tempfile::tempdir().unwrap();
    let plot = dir.path().join("plot.png");
    image::RgbImage::from_pixel(4, 4, image::Rgb([5, 5, 5]))
        .save(&plot)
        .unwrap();

    let mut doc = Document::new();
    doc.add_slide("Grid", "", SlideLayout::Grid2x2, Some(plot));

    let xml = package_xml(&doc, &PageGeometry::default());
    assert_eq!(xml.matches("<office:binary-data>").count(), 4);
}

#[test]
fn stale_artifact_degrades_to_a_text_only_page() {
    let mut doc = Document::new();
    doc.add_slide(
        "Gone",
        "still text",
        SlideLayout::SideBySide,
        Some(std::path::PathBuf::from("/definitely/not/here.png")),
    );

    let xml = package_xml(&doc, &PageGeometry::default());
    assert_eq!(xml.matches("<office:binary-data>").count(), 0);
    assert!(xml.contains("still text"));
}

#[test]
fn titles_are_escaped() {
    let mut doc = Document::new();
    doc.add_slide("A < B & \"C\"", "", SlideLayout::TextOnly, None);
    let xml = package_xml(&doc, &PageGeometry::default());
    assert!(xml.contains("A &lt; B &amp; &quot;C&quot;"));
}

#[test]
fn escape_covers_the_five_specials() {
    assert_eq!(xml_escape("<&>\"'"), "&lt;&amp;&gt;&quot;&apos;");
    assert_eq!(xml_escape("plain"), "plain");
}
