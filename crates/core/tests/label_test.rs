//! Label placement around component boxes.

use boardlens_core::{BoundingBox, LabelLayoutEngine, PlacedLabel};

fn padded(label: &PlacedLabel) -> BoundingBox {
    label.footprint().expand(4)
}

#[test]
fn test_isolated_label_sits_at_its_anchor() {
    let engine = LabelLayoutEngine::default();
    let items = [(BoundingBox::new(180, 150, 220, 170).unwrap(), "C12")];
    let labels = engine.place(400, 300, &items);

    assert_eq!(labels.len(), 1);
    let label = &labels[0];
    // "C12" is three characters: 3*9 + 2*5 wide, 18 + 2*5 tall.
    assert_eq!((label.width, label.height), (37, 28));
    // Anchor above the box: y0 - height/2 - clearance.
    assert_eq!((label.cx, label.cy), (200, 132));
    assert!(!label.fallback);
}

#[test]
fn test_label_flips_below_near_the_top_edge() {
    let engine = LabelLayoutEngine::default();
    let items = [(BoundingBox::new(180, 5, 220, 25).unwrap(), "U7")];
    let labels = engine.place(400, 300, &items);
    assert_eq!((labels[0].cx, labels[0].cy), (200, 43));
    assert!(!labels[0].fallback);
}

#[test]
fn test_crowded_labels_do_not_overlap() {
    let engine = LabelLayoutEngine::default();
    let items = [
        (BoundingBox::new(100, 100, 140, 120).unwrap(), "R1"),
        (BoundingBox::new(150, 100, 190, 120).unwrap(), "R2"),
        (BoundingBox::new(200, 100, 240, 120).unwrap(), "R3"),
        (BoundingBox::new(125, 130, 165, 150).unwrap(), "R4"),
    ];
    let labels = engine.place(600, 400, &items);
    assert_eq!(labels.len(), items.len());

    for label in &labels {
        assert!(!label.fallback);
        // Clearance against every component box.
        for (bbox, _) in &items {
            assert!(!padded(label).overlaps(bbox));
        }
    }
    // Pairwise: each later footprint keeps clearance from earlier ones.
    for i in 0..labels.len() {
        for j in 0..i {
            assert!(!padded(&labels[i]).overlaps(&labels[j].footprint()));
        }
    }
}

#[test]
fn test_oversized_label_falls_back_to_anchor() {
    let engine = LabelLayoutEngine::default();
    let items = [(
        BoundingBox::new(40, 20, 60, 30).unwrap(),
        "A-VERY-LONG-DESIGNATOR",
    )];
    // The footprint is wider than the canvas, so no position fits.
    let labels = engine.place(100, 50, &items);
    assert!(labels[0].fallback);
    assert_eq!((labels[0].cx, labels[0].cy), labels[0].anchor);
}

#[test]
fn test_one_label_per_item_in_input_order() {
    let engine = LabelLayoutEngine::default();
    let items = [
        (BoundingBox::new(50, 50, 70, 60).unwrap(), "D1"),
        (BoundingBox::new(300, 200, 320, 210).unwrap(), "D2"),
    ];
    let labels = engine.place(400, 300, &items);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].target, (60, 55));
    assert_eq!(labels[1].target, (310, 205));
}
