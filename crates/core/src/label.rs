//! Non-overlapping placement of component labels.
//!
//! Each labeled component gets a fixed-size text footprint placed near it by
//! an outward radial search: start at an anchor just above the component and
//! walk rings of increasing radius until a spot is found that stays on the
//! canvas and clears every component box and every label committed so far.
//! Labels are committed one at a time in input order, so earlier labels claim
//! contested space first and the layout is reproducible.

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::geometry::BoundingBox;

/// Tunables for [`LabelLayoutEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParams {
    /// Advance width per character of label text, in canvas pixels.
    pub char_width: i32,

    /// Height of one line of label text.
    pub line_height: i32,

    /// Inner margin between the text and the footprint border.
    pub text_margin: i32,

    /// Radial step between search rings.
    pub spacing: i32,

    /// Largest ring radius tried before falling back to the anchor.
    pub max_radius: i32,

    /// Angular step around each ring, in degrees.
    pub angle_step_deg: i32,

    /// Required gap between a footprint and any component box or other
    /// label.
    pub clearance: i32,
}

impl Default for LabelParams {
    fn default() -> Self {
        Self {
            char_width: 9,
            line_height: 18,
            text_margin: 5,
            spacing: 10,
            max_radius: 120,
            angle_step_deg: 15,
            clearance: 4,
        }
    }
}

/// One committed label position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLabel {
    /// Center of the label footprint.
    pub cx: i32,
    pub cy: i32,

    /// Footprint dimensions derived from the text length.
    pub width: i32,
    pub height: i32,

    /// Anchor the radial search started from.
    pub anchor: (i32, i32),

    /// Center of the component this label annotates.
    pub target: (i32, i32),

    /// True when the search was exhausted and the label sits at its anchor
    /// regardless of collisions.
    pub fallback: bool,
}

impl PlacedLabel {
    /// The label footprint as a rectangle.
    pub fn footprint(&self) -> BoundingBox {
        footprint_at(self.cx, self.cy, self.width, self.height)
    }
}

/// Places labels for annotated components without mutual overlap.
#[derive(Debug, Clone, Default)]
pub struct LabelLayoutEngine {
    params: LabelParams,
}

impl LabelLayoutEngine {
    pub fn new(params: LabelParams) -> Self {
        Self { params }
    }

    /// Places one label per `(component box, text)` item, in input order.
    ///
    /// Every item yields exactly one [`PlacedLabel`]; when no collision-free
    /// spot exists within `max_radius` the label falls back to its anchor and
    /// is flagged. This call never fails.
    ///
    /// Runs in `O(n * R * A * (n + m))` for `n` labels, `R` rings, `A` angles
    /// and `m` component boxes, which is negligible for the dozens of labels
    /// a window carries.
    pub fn place(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        items: &[(BoundingBox, &str)],
    ) -> Vec<PlacedLabel> {
        let mut placed: Vec<PlacedLabel> = Vec::with_capacity(items.len());
        for (bbox, text) in items {
            let label = self.place_one(canvas_width, canvas_height, items, &placed, *bbox, text);
            placed.push(label);
        }
        placed
    }

    fn place_one(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        items: &[(BoundingBox, &str)],
        placed: &[PlacedLabel],
        bbox: BoundingBox,
        text: &str,
    ) -> PlacedLabel {
        let p = &self.params;
        let width = text.chars().count() as i32 * p.char_width + 2 * p.text_margin;
        let height = p.line_height + 2 * p.text_margin;

        let (tx, ty) = bbox.center();
        let target = (tx.round() as i32, ty.round() as i32);
        let anchor = self.anchor_for(bbox, target.0, height);

        let mut best: Option<(OrderedFloat<f64>, i32, i32)> = None;
        let mut radius = 0;
        while radius <= p.max_radius {
            for angle in (0..360).step_by(p.angle_step_deg as usize) {
                let theta = (angle as f64).to_radians();
                let cx = anchor.0 + (radius as f64 * theta.cos()).round() as i32;
                let cy = anchor.1 + (radius as f64 * theta.sin()).round() as i32;
                let footprint = footprint_at(cx, cy, width, height);
                if !self.candidate_fits(canvas_width, canvas_height, items, placed, footprint) {
                    continue;
                }
                let manhattan = (cx - anchor.0).abs() + (cy - anchor.1).abs();
                let cost = OrderedFloat(radius as f64 + 0.5 * manhattan as f64);
                // Strict comparison keeps the earliest angle on cost ties.
                if best.is_none_or(|(c, _, _)| cost < c) {
                    best = Some((cost, cx, cy));
                }
            }
            if let Some((_, cx, cy)) = best {
                debug!(text, radius, cx, cy, "placed label");
                return PlacedLabel {
                    cx,
                    cy,
                    width,
                    height,
                    anchor,
                    target,
                    fallback: false,
                };
            }
            radius += p.spacing;
        }

        debug!(text, "label search exhausted, using anchor");
        PlacedLabel {
            cx: anchor.0,
            cy: anchor.1,
            width,
            height,
            anchor,
            target,
            fallback: true,
        }
    }

    /// Preferred anchor centered just above the component; flips below when
    /// the footprint would start above the canvas.
    fn anchor_for(&self, bbox: BoundingBox, cx: i32, height: i32) -> (i32, i32) {
        let above = bbox.y0 - height / 2 - self.params.clearance;
        if above - height / 2 < 0 {
            (cx, bbox.y1 + height / 2 + self.params.clearance)
        } else {
            (cx, above)
        }
    }

    fn candidate_fits(
        &self,
        canvas_width: i32,
        canvas_height: i32,
        items: &[(BoundingBox, &str)],
        placed: &[PlacedLabel],
        footprint: BoundingBox,
    ) -> bool {
        if footprint.x0 < 0
            || footprint.y0 < 0
            || footprint.x1 > canvas_width
            || footprint.y1 > canvas_height
        {
            return false;
        }
        // Clearance pads the candidate only; touching at exactly the
        // clearance distance is allowed.
        let padded = footprint.expand(self.params.clearance);
        if items.iter().any(|(b, _)| padded.overlaps(b)) {
            return false;
        }
        !placed.iter().any(|l| padded.overlaps(&l.footprint()))
    }
}

fn footprint_at(cx: i32, cy: i32, width: i32, height: i32) -> BoundingBox {
    let x0 = cx - width / 2;
    let y0 = cy - height / 2;
    BoundingBox {
        x0,
        y0,
        x1: x0 + width,
        y1: y0 + height,
    }
}
