use deckgen::deck::{Document, PageGeometry, SlideLayout};
use std::path::PathBuf;

#[test]
fn layout_names_parse() {
    assert_eq!(SlideLayout::parse("text"), Some(SlideLayout::TextOnly));
    assert_eq!(SlideLayout::parse("Side-By-Side"), Some(SlideLayout::SideBySide));
    assert_eq!(SlideLayout::parse("grid"), Some(SlideLayout::Grid2x2));
    assert_eq!(SlideLayout::parse("stacked"), Some(SlideLayout::StackedTextImage));
    assert_eq!(SlideLayout::parse("image"), Some(SlideLayout::ImageOnly));
    assert!(SlideLayout::parse("carousel").is_none());
}

#[test]
fn every_insertion_marks_the_deck_dirty() {
    let mut doc = Document::new();
    doc.clear_dirty();

    // Visually empty slide (image layout without an artifact) still counts.
    doc.add_slide("", "", SlideLayout::ImageOnly, None);
    assert!(doc.is_dirty());
    assert_eq!(doc.len(), 1);

    doc.clear_dirty();
    doc.add_slide("T", "b", SlideLayout::TextOnly, None);
    assert!(doc.is_dirty());
    assert_eq!(doc.len(), 2);
}

#[test]
fn deck_only_grows() {
    let mut doc = Document::new();
    for i in 0..5 {
        doc.add_slide(format!("s{}", i), "", SlideLayout::TextOnly, None);
    }
    assert_eq!(doc.len(), 5);
    assert_eq!(doc.slides()[0].title, "s0");
    assert_eq!(doc.slides()[4].title, "s4");
}

#[test]
fn grid_layout_repeats_the_same_artifact_four_times() {
    let geom = PageGeometry::default();
    let regions = SlideLayout::Grid2x2.regions(&geom, true);
    assert!(regions.text.is_none());
    assert_eq!(regions.images.len(), 4);
    // All four quadrants share one size; only positions differ.
    let (w, h) = (regions.images[0].w, regions.images[0].h);
    assert!(regions.images.iter().all(|r| r.w == w && r.h == h));
}

#[test]
fn image_only_without_artifact_has_no_image_region() {
    let geom = PageGeometry::default();
    let regions = SlideLayout::ImageOnly.regions(&geom, false);
    assert!(regions.text.is_none());
    assert!(regions.images.is_empty());
}

#[test]
fn side_by_side_splits_the_page() {
    let geom = PageGeometry::default();
    let regions = SlideLayout::SideBySide.regions(&geom, true);
    let text = regions.text.expect("text region");
    assert!(text.x + text.w <= 0.52, "text stays on the left half");
    assert_eq!(regions.images.len(), 1);
    assert!(regions.images[0].x >= 0.50, "image stays on the right half");
}

#[test]
fn artifact_reference_is_kept_on_the_slide() {
    let mut doc = Document::new();
    doc.add_slide(
        "Chart",
        "",
        SlideLayout::SideBySide,
        Some(PathBuf::from("/tmp/plot.png")),
    );
    assert_eq!(
        doc.slides()[0].artifact_ref.as_deref(),
        Some(std::path::Path::new("/tmp/plot.png"))
    );
}
