use deckgen::report::export_report;

#[test]
fn text_only_report_is_a_single_page_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.pdf");

    let blocks = vec!["Dataset: data.csv".to_string(), "Findings\nmean is 4.2".to_string()];
    let path = export_report("Analysis Report", &blocks, &[], None, &out).unwrap();

    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 1"));
}

#[test]
fn each_readable_image_adds_a_page() {
    let dir = tempfile::tempdir().unwrap();
    let plot = dir.path().join("plot.png");
    image::RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 0]))
        .save(&plot)
        .unwrap();

    let out = dir.path().join("report.pdf");
    let images = vec![plot, dir.path().join("missing.png")];
    export_report("R", &["text".to_string()], &images, None, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    // One text page plus one page for the readable image; the missing
    // image is skipped, not fatal.
    assert!(text.contains("/Count 2"));
    assert!(text.contains("/Filter /DCTDecode"));
}
