use std::path::PathBuf;

use deckgen::preview::PreviewImage;
use deckgen::viewer;

fn images(n: usize) -> Vec<PreviewImage> {
    (1..=n)
        .map(|i| PreviewImage {
            slide_index: i,
            path: PathBuf::from(format!("/tmp/slide{}.png", i)),
        })
        .collect()
}

#[test]
fn show_clamps_low_and_high_requests() {
    let imgs = images(3);
    for requested in [i64::MIN, -5, 0, 1] {
        let frame = viewer::show(&imgs, requested);
        assert_eq!(frame.index, 1);
        assert_eq!(frame.image.unwrap().slide_index, 1);
    }
    for requested in [3, 4, 100, i64::MAX] {
        let frame = viewer::show(&imgs, requested);
        assert_eq!(frame.index, 3);
        assert_eq!(frame.image.unwrap().slide_index, 3);
    }
    assert_eq!(viewer::show(&imgs, 2).index, 2);
}

#[test]
fn empty_sequence_yields_nothing_to_show() {
    let frame = viewer::show(&[], 5);
    assert!(frame.image.is_none());
    assert_eq!(frame.total, 0);
}

#[test]
fn encoding_a_missing_file_fails_soft() {
    assert_eq!(
        viewer::encode_for_embedding(std::path::Path::new("/definitely/not/here.png")),
        ""
    );
}

#[test]
fn encoding_produces_a_png_data_uri() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.png");
    image::RgbImage::from_pixel(2, 2, image::Rgb([0, 128, 255]))
        .save(&path)
        .unwrap();

    let uri = viewer::encode_for_embedding(&path);
    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(uri.len() > "data:image/png;base64,".len());
}

#[test]
fn panel_html_degrades_visibly() {
    assert!(viewer::panel_html(&[], 1).contains("No preview images available"));

    let missing = images(1);
    assert!(viewer::panel_html(&missing, 1).contains("missing or unreadable"));
}

#[test]
fn panel_html_embeds_the_current_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]))
        .save(&path)
        .unwrap();

    let imgs = vec![PreviewImage {
        slide_index: 1,
        path,
    }];
    let html = viewer::panel_html(&imgs, 9);
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("Slide <strong>1</strong> of <strong>1</strong>"));
}
