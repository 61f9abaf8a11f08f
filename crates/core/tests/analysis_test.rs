//! End-to-end page analysis.

use boardlens_core::{
    BoundingBox, DensityRefiner, EdgeContentDetector, PageBitmap, PageInput, Word, analyze_page,
    analyze_sides,
};

fn synthetic_page() -> (PageBitmap, Vec<Word>) {
    let (width, height) = (400u32, 300u32);
    let mut samples = vec![255u8; (width * height) as usize];
    for y in 50..250 {
        for x in 50..350 {
            samples[y * width as usize + x] = 0;
        }
    }
    let bitmap = PageBitmap::new(width, height, 1, samples).unwrap();

    let mut words = Vec::new();
    for y in (80..200).step_by(20) {
        for x in (80..220).step_by(20) {
            words.push(Word {
                bbox: BoundingBox::new(x, y, x + 10, y + 10).unwrap(),
                text: "U1".into(),
            });
        }
    }
    (bitmap, words)
}

#[test]
fn test_content_box_is_contained_in_coarse_box() {
    let (bitmap, words) = synthetic_page();
    let analysis = analyze_page(
        &EdgeContentDetector::default(),
        &DensityRefiner::default(),
        &bitmap,
        &words,
    );
    assert!(analysis.coarse.contains(&analysis.content));
    assert!(analysis.content.area() > 0);
}

#[test]
fn test_missing_side_yields_none() {
    let (bitmap, words) = synthetic_page();
    let detector = EdgeContentDetector::default();
    let refiner = DensityRefiner::default();

    let front = PageInput {
        bitmap: &bitmap,
        words: &words,
    };
    let (front_result, back_result) = analyze_sides(&detector, &refiner, Some(front), None);

    let front_result = front_result.unwrap();
    assert!(front_result.coarse.contains(&front_result.content));
    assert!(back_result.is_none());
}
