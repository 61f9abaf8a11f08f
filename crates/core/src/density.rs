//! Text-density refinement of a coarse content box.
//!
//! The edge detector aligns with drawn geometry, which may overshoot the
//! region that actually carries text (reference designators, part values).
//! This pass paints the page's words into a binary heatmap and slides two
//! window sizes over the coarse box: small windows find local hotspots
//! ("seeds"), large windows aggregate seeds into one region. The result only
//! ever shrinks the coarse box, never grows it.

use itertools::iproduct;
use tracing::debug;

use crate::geometry::BoundingBox;
use crate::model::Word;
use crate::raster::{GrayImage, open};

/// Tunables for [`DensityRefiner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinerParams {
    /// Side length of the seed-scan window.
    pub small_win: i32,

    /// Stride of the seed scan.
    pub small_stride: i32,

    /// Side length of the aggregation window.
    pub large_win: i32,

    /// Stride of the aggregation scan.
    pub large_stride: i32,

    /// Number of highest-scoring seed windows kept.
    pub top_k: usize,

    /// Pixels of padding painted around every word box, so small boxes
    /// still form a measurable hot region.
    pub padding: i32,

    /// Minimum count of set heatmap pixels for a seed window to qualify.
    pub min_score: usize,
}

impl Default for RefinerParams {
    fn default() -> Self {
        Self {
            small_win: 50,
            small_stride: 25,
            large_win: 200,
            large_stride: 100,
            top_k: 10,
            padding: 2,
            min_score: 5,
        }
    }
}

/// A scan window together with its score: set-pixel count for seeds, covered
/// seed-origin count for aggregation windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredWindow {
    pub score: usize,
    pub bbox: BoundingBox,
}

/// Intermediate artifacts of one refinement run, for debug overlays only.
#[derive(Debug, Clone)]
pub struct DensityDiagnostics {
    /// Word heatmap after morphological opening.
    pub heatmap: GrayImage,
    /// Kept seed windows, ranked by score descending (scan order on ties).
    pub seeds: Vec<ScoredWindow>,
    /// Kept aggregation windows in scan order.
    pub aggregates: Vec<ScoredWindow>,
}

/// Refines a coarse content box to its densest text sub-region.
#[derive(Debug, Clone, Default)]
pub struct DensityRefiner {
    params: RefinerParams,
}

impl DensityRefiner {
    pub fn new(params: RefinerParams) -> Self {
        Self { params }
    }

    /// Returns the densest text sub-region of `coarse`, clamped to `coarse`.
    ///
    /// `words` is the page's full word geometry; only words intersecting the
    /// coarse box contribute. Without any density signal the coarse box is
    /// returned unchanged; this call never fails.
    pub fn refine(
        &self,
        coarse: BoundingBox,
        words: &[Word],
        page_width: u32,
        page_height: u32,
    ) -> BoundingBox {
        self.run(coarse, words, page_width, page_height, false).0
    }

    /// Like [`refine`](Self::refine), also returning the heatmap and the
    /// kept scan windows.
    pub fn refine_with_diagnostics(
        &self,
        coarse: BoundingBox,
        words: &[Word],
        page_width: u32,
        page_height: u32,
    ) -> (BoundingBox, DensityDiagnostics) {
        let (bbox, diagnostics) = self.run(coarse, words, page_width, page_height, true);
        (bbox, diagnostics.expect("diagnostics requested"))
    }

    fn run(
        &self,
        coarse: BoundingBox,
        words: &[Word],
        page_width: u32,
        page_height: u32,
        keep_artifacts: bool,
    ) -> (BoundingBox, Option<DensityDiagnostics>) {
        let p = &self.params;
        let width = page_width as i32;
        let height = page_height as i32;

        let heatmap = self.paint_heatmap(coarse, words, width, height);

        let mut seeds = self.scan_seeds(&heatmap, coarse, width, height);
        if seeds.is_empty() {
            debug!(%coarse, "no density signal, keeping coarse box");
            let diagnostics = keep_artifacts.then(|| DensityDiagnostics {
                heatmap,
                seeds: Vec::new(),
                aggregates: Vec::new(),
            });
            return (coarse, diagnostics);
        }
        // Stable sort: equal scores keep row-major scan order, so the top-K
        // selection is reproducible.
        seeds.sort_by(|a, b| b.score.cmp(&a.score));
        seeds.truncate(p.top_k);

        let aggregates = self.scan_aggregates(&seeds, coarse, width, height);

        let kept = if aggregates.is_empty() {
            &seeds
        } else {
            &aggregates
        };
        let merged = kept
            .iter()
            .skip(1)
            .fold(kept[0].bbox, |acc, w| acc.union(&w.bbox));
        let refined = merged.clamp_to(&coarse);

        debug!(
            seeds = seeds.len(),
            aggregates = aggregates.len(),
            %coarse,
            %refined,
            "density refinement finished"
        );

        let diagnostics = keep_artifacts.then(|| DensityDiagnostics {
            heatmap,
            seeds,
            aggregates,
        });
        (refined, diagnostics)
    }

    /// Paints every word intersecting the coarse box into a page-sized
    /// binary heatmap, padded by `padding`, then opens with a 3x3 element to
    /// drop isolated specks.
    fn paint_heatmap(
        &self,
        coarse: BoundingBox,
        words: &[Word],
        width: i32,
        height: i32,
    ) -> GrayImage {
        let mut heatmap = GrayImage::new(width.max(0) as usize, height.max(0) as usize);
        for word in words {
            if !word.bbox.intersects(&coarse) {
                continue;
            }
            let x0 = (word.bbox.x0 - self.params.padding).max(0);
            let y0 = (word.bbox.y0 - self.params.padding).max(0);
            let x1 = (word.bbox.x1 + self.params.padding).min(width);
            let y1 = (word.bbox.y1 + self.params.padding).min(height);
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            heatmap.fill_rect(x0 as usize, y0 as usize, x1 as usize, y1 as usize, 255);
        }
        open(&heatmap, 3)
    }

    /// Row-major small-window scan over the coarse box extended by one
    /// window length, keeping windows whose set-pixel count reaches
    /// `min_score`.
    fn scan_seeds(
        &self,
        heatmap: &GrayImage,
        coarse: BoundingBox,
        width: i32,
        height: i32,
    ) -> Vec<ScoredWindow> {
        let p = &self.params;
        let mut seeds = Vec::new();
        let ys = (coarse.y0 - p.small_win..coarse.y1 + p.small_stride)
            .step_by(p.small_stride as usize);
        let xs = (coarse.x0 - p.small_win..coarse.x1 + p.small_stride)
            .step_by(p.small_stride as usize);
        for (y, x) in iproduct!(ys, xs) {
            let Some(window) = clamp_window(x, y, p.small_win, width, height) else {
                continue;
            };
            let score = heatmap.count_set_in_rect(
                window.x0 as usize,
                window.y0 as usize,
                window.x1 as usize,
                window.y1 as usize,
            );
            if score >= p.min_score {
                seeds.push(ScoredWindow {
                    score,
                    bbox: window,
                });
            }
        }
        seeds
    }

    /// Large-window scan keeping every window that covers at least one seed
    /// origin.
    fn scan_aggregates(
        &self,
        seeds: &[ScoredWindow],
        coarse: BoundingBox,
        width: i32,
        height: i32,
    ) -> Vec<ScoredWindow> {
        let p = &self.params;
        let mut aggregates = Vec::new();
        let ys = (coarse.y0 - p.large_win..coarse.y1 + p.large_stride)
            .step_by(p.large_stride as usize);
        let xs = (coarse.x0 - p.large_win..coarse.x1 + p.large_stride)
            .step_by(p.large_stride as usize);
        for (y, x) in iproduct!(ys, xs) {
            let Some(window) = clamp_window(x, y, p.large_win, width, height) else {
                continue;
            };
            let covered = seeds
                .iter()
                .filter(|s| window.contains_point(s.bbox.x0, s.bbox.y0))
                .count();
            if covered >= 1 {
                aggregates.push(ScoredWindow {
                    score: covered,
                    bbox: window,
                });
            }
        }
        aggregates
    }
}

/// Clamps a scan window at origin `(x, y)` to the page, dropping windows
/// that collapse to nothing.
fn clamp_window(x: i32, y: i32, win: i32, width: i32, height: i32) -> Option<BoundingBox> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + win).min(width);
    let y1 = (y + win).min(height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(BoundingBox { x0, y0, x1, y1 })
}
