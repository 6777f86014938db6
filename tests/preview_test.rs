//! Cascade behavior with the converter tier forced to fail: nonexistent
//! binary names make tier one unavailable the same way a host without
//! LibreOffice/poppler would.

use std::path::{Path, PathBuf};
use std::time::Duration;

use deckgen::artifacts::ArtifactStore;
use deckgen::deck::{Document, PageGeometry, Slide, SlideLayout};
use deckgen::preview::fallback::{pick_thumbnail, plan_slide};
use deckgen::preview::{PreviewRenderer, RenderTier, RendererOptions};

fn failing_renderer(scratch: PathBuf) -> PreviewRenderer {
    PreviewRenderer::new(RendererOptions {
        soffice: "soffice-missing-for-test".into(),
        pdftoppm: "pdftoppm-missing-for-test".into(),
        dpi: 150,
        convert_timeout: Duration::from_secs(5),
        scratch,
        geometry: PageGeometry::default(),
        font_path: None,
        body_lines: 12,
    })
}

fn write_png(path: &Path) {
    image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]))
        .save(path)
        .unwrap();
}

#[tokio::test]
async fn fallback_produces_one_image_per_slide() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = failing_renderer(dir.path().join("scratch"));
    let store = ArtifactStore::new();

    let mut doc = Document::new();
    for i in 0..3 {
        doc.add_slide(format!("Slide {}", i + 1), "body", SlideLayout::TextOnly, None);
    }

    let preview = renderer.render(&mut doc, &store).await;
    assert_eq!(preview.tier, RenderTier::Synthetic);
    assert_eq!(preview.images.len(), 3);
    for (i, img) in preview.images.iter().enumerate() {
        assert_eq!(img.slide_index, i + 1);
        assert!(img.path.is_file(), "{} should exist", img.path.display());
    }
    assert!(!doc.is_dirty(), "render clears the dirty flag");
}

#[tokio::test]
async fn empty_deck_yields_exactly_one_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = failing_renderer(dir.path().join("scratch"));
    let store = ArtifactStore::new();
    let mut doc = Document::new();

    let preview = renderer.render(&mut doc, &store).await;
    assert_eq!(preview.images.len(), 1);
    assert_eq!(preview.tier, RenderTier::Synthetic);
    assert!(preview.images[0].path.is_file());
    assert!(!doc.is_dirty());
}

#[tokio::test]
async fn repeated_render_is_idempotent_in_length_and_content() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = failing_renderer(dir.path().join("scratch"));
    let store = ArtifactStore::new();

    let mut doc = Document::new();
    doc.add_slide("Intro", "first line\nsecond line", SlideLayout::TextOnly, None);
    doc.add_slide("Results", "r", SlideLayout::SideBySide, None);

    let first = renderer.render(&mut doc, &store).await;
    let second = renderer.render(&mut doc, &store).await;
    assert_eq!(first.images.len(), second.images.len());

    // Per-slide drawn content is the plan; paths may differ between runs.
    for (i, slide) in doc.slides().iter().enumerate() {
        let a = plan_slide(slide, i + 1, &store, 12);
        let b = plan_slide(slide, i + 1, &store, 12);
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn forced_fallback_keeps_the_slide_title() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = failing_renderer(dir.path().join("scratch"));
    let store = ArtifactStore::new();

    let mut doc = Document::new();
    doc.add_slide("Intro", "", SlideLayout::TextOnly, None);

    let preview = renderer.render(&mut doc, &store).await;
    assert_eq!(preview.images.len(), 1);

    let plan = plan_slide(&doc.slides()[0], 1, &store, 12);
    assert_eq!(plan.title, "Intro");
}

#[test]
fn thumbnail_tie_break_uses_first_seen_store_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    write_png(&first);
    write_png(&second);

    let mut store = ArtifactStore::new();
    store.put(Some(1), &first);
    store.put(Some(2), &second);
    assert_eq!(store.most_recent(), Some(second.as_path()));

    // No explicit reference: first-seen wins over most-recent.
    let slide = Slide {
        title: "t".into(),
        body: String::new(),
        layout: SlideLayout::SideBySide,
        artifact_ref: None,
    };
    assert_eq!(pick_thumbnail(&slide, &store), Some(first.clone()));

    // An explicit on-disk reference wins outright.
    let pinned = Slide {
        artifact_ref: Some(second.clone()),
        ..slide.clone()
    };
    assert_eq!(pick_thumbnail(&pinned, &store), Some(second));
}

#[test]
fn stale_references_fall_back_to_surviving_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let alive = dir.path().join("alive.png");
    write_png(&alive);

    let mut store = ArtifactStore::new();
    store.put(Some(1), dir.path().join("gone.png"));
    store.put(Some(2), &alive);

    let slide = Slide {
        title: "t".into(),
        body: String::new(),
        layout: SlideLayout::StackedTextImage,
        artifact_ref: Some(dir.path().join("also-gone.png")),
    };
    assert_eq!(pick_thumbnail(&slide, &store), Some(alive));
}

#[tokio::test]
async fn synthesis_failure_degrades_to_a_single_error_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the scratch directory should be makes synthesis fail.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"not a directory").unwrap();

    let renderer = failing_renderer(blocked);
    let store = ArtifactStore::new();
    let mut doc = Document::new();
    doc.add_slide("Intro", "", SlideLayout::TextOnly, None);

    let preview = renderer.render(&mut doc, &store).await;
    assert_eq!(preview.tier, RenderTier::ErrorPlaceholder);
    assert_eq!(preview.images.len(), 1, "never an empty sequence");
    assert!(!doc.is_dirty(), "error outcome still clears dirty");
}
