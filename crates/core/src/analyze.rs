//! Page-level analysis driver.
//!
//! Ties the edge detector and the density refiner together into the two
//! calls the rest of the application uses: one page, or both sides of a
//! double-sided document at once.

use rayon::join;
use tracing::debug;

use crate::density::DensityRefiner;
use crate::detect::EdgeContentDetector;
use crate::geometry::BoundingBox;
use crate::model::Word;
use crate::raster::PageBitmap;

/// Rendered page plus its extracted word geometry.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    pub bitmap: &'a PageBitmap,
    pub words: &'a [Word],
}

/// Result of analyzing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAnalysis {
    /// Edge-mass bounding box of the page content.
    pub coarse: BoundingBox,
    /// Density-refined content box, always contained in `coarse`.
    pub content: BoundingBox,
}

/// Runs coarse detection followed by density refinement on one page.
pub fn analyze_page(
    detector: &EdgeContentDetector,
    refiner: &DensityRefiner,
    bitmap: &PageBitmap,
    words: &[Word],
) -> PageAnalysis {
    let coarse = detector.detect(bitmap);
    let content = refiner.refine(coarse, words, bitmap.width, bitmap.height);
    debug!(%coarse, %content, "page analysis finished");
    PageAnalysis { coarse, content }
}

/// Analyzes the front and back pages in parallel. A missing side yields
/// `None` for that side.
pub fn analyze_sides(
    detector: &EdgeContentDetector,
    refiner: &DensityRefiner,
    front: Option<PageInput<'_>>,
    back: Option<PageInput<'_>>,
) -> (Option<PageAnalysis>, Option<PageAnalysis>) {
    join(
        || front.map(|p| analyze_page(detector, refiner, p.bitmap, p.words)),
        || back.map(|p| analyze_page(detector, refiner, p.bitmap, p.words)),
    )
}
