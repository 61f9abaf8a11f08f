//! Data model shared by the analysis components.
//!
//! Word and block geometry arrives from the renderer, match boxes from the
//! matcher; both are plain records in unscaled document coordinates. View
//! windows are what the cluster grouper hands back to the presentation
//! layer.

use std::fmt;

use indexmap::IndexMap;

use crate::geometry::BoundingBox;

/// One face of a double-sided document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => write!(f, "front"),
            Side::Back => write!(f, "back"),
        }
    }
}

/// A single word reported by the renderer's text extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub bbox: BoundingBox,
    pub text: String,
}

/// A text block reported by the renderer's text extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub bbox: BoundingBox,
    pub text: String,
    pub block_no: u32,
}

/// A matched component region produced by the matcher.
///
/// Identity is `(side, block_no)`; two hits in the same block on the same
/// side are the same match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBox {
    pub bbox: BoundingBox,
    pub text: String,
    pub block_no: u32,
    pub side: Side,
    pub matched_keywords: Vec<String>,
}

impl MatchBox {
    pub fn center(&self) -> (f64, f64) {
        self.bbox.center()
    }

    /// Dedup key for this match.
    pub fn key(&self) -> (Side, u32) {
        (self.side, self.block_no)
    }
}

/// Removes duplicate matches by `(side, block_no)`, keeping the first
/// occurrence and the original order of the survivors.
pub fn dedup_matches(matches: Vec<MatchBox>) -> Vec<MatchBox> {
    let mut seen: IndexMap<(Side, u32), MatchBox> = IndexMap::with_capacity(matches.len());
    for m in matches {
        seen.entry(m.key()).or_insert(m);
    }
    seen.into_values().collect()
}

/// Per-side tallies over a match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSummary {
    pub total: usize,
    pub front: usize,
    pub back: usize,
}

impl SearchSummary {
    pub fn from_matches(matches: &[MatchBox]) -> Self {
        let front = matches.iter().filter(|m| m.side == Side::Front).count();
        Self {
            total: matches.len(),
            front,
            back: matches.len() - front,
        }
    }
}

/// A clustered viewing window: one coherent region of one side, sized so a
/// fixed viewport frames it at `zoom`, together with the member matches the
/// presentation layer labels inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewWindow {
    pub side: Side,
    pub bbox: BoundingBox,
    pub zoom: u32,
    pub members: Vec<MatchBox>,
}

impl ViewWindow {
    /// The window rectangle scaled by `zoom` into pixel space.
    pub fn display_rect(&self) -> BoundingBox {
        let z = self.zoom as i32;
        BoundingBox {
            x0: self.bbox.x0 * z,
            y0: self.bbox.y0 * z,
            x1: self.bbox.x1 * z,
            y1: self.bbox.y1 * z,
        }
    }
}
