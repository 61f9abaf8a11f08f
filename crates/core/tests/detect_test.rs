//! Edge content detection over synthetic renders.

use boardlens_core::{BoundingBox, EdgeContentDetector, PageBitmap};

/// White page with a solid dark rectangle, single channel.
fn page_with_rect(width: u32, height: u32, rect: BoundingBox) -> PageBitmap {
    let mut samples = vec![255u8; (width * height) as usize];
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            samples[(y as u32 * width + x as u32) as usize] = 0;
        }
    }
    PageBitmap::new(width, height, 1, samples).unwrap()
}

#[test]
fn test_detects_dominant_rectangle() {
    let rect = BoundingBox::new(40, 30, 120, 100).unwrap();
    let page = page_with_rect(200, 150, rect);
    let detected = EdgeContentDetector::default().detect(&page);

    // Dilation widens the edge mass, so the detected box surrounds the
    // rectangle with a bounded margin.
    assert!(detected.contains(&BoundingBox::new(41, 31, 119, 99).unwrap()));
    assert!((detected.x0 - rect.x0).abs() <= 15);
    assert!((detected.y0 - rect.y0).abs() <= 15);
    assert!((detected.x1 - rect.x1).abs() <= 15);
    assert!((detected.y1 - rect.y1).abs() <= 15);
}

#[test]
fn test_blank_page_falls_back_to_full_page() {
    let page = PageBitmap::new(200, 150, 1, vec![255; 200 * 150]).unwrap();
    let detected = EdgeContentDetector::default().detect(&page);
    assert_eq!(detected, BoundingBox::new(0, 0, 200, 150).unwrap());
}

#[test]
fn test_rgb_render_matches_gray_render() {
    let rect = BoundingBox::new(40, 30, 120, 100).unwrap();
    let gray_page = page_with_rect(200, 150, rect);
    let mut rgb = vec![255u8; 200 * 150 * 3];
    for (i, &v) in gray_page.samples.iter().enumerate() {
        rgb[i * 3..i * 3 + 3].fill(v);
    }
    let rgb_page = PageBitmap::new(200, 150, 3, rgb).unwrap();

    let detector = EdgeContentDetector::default();
    assert_eq!(detector.detect(&gray_page), detector.detect(&rgb_page));
}
