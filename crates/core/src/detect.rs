//! Coarse content-region detection via edge mass.
//!
//! A fabrication drawing's primary content (the board outline and everything
//! inside it) dominates the page in edge area; title blocks and legends are
//! small by comparison. Binarized gradient magnitude, bridged with a wide
//! dilation, therefore yields one large connected component whose bounding
//! rectangle is a reliable coarse content box.

use tracing::debug;

use crate::geometry::BoundingBox;
use crate::raster::{
    ComponentStats, GrayImage, PageBitmap, connected_components, dilate, sobel_magnitude,
    threshold,
};

/// Tunables for [`EdgeContentDetector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorParams {
    /// Gradient magnitudes strictly above this value count as edges.
    pub threshold: u8,

    /// Side length of the rectangular dilation element used to bridge broken
    /// edge segments. Must be odd.
    pub dilate_kernel: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            threshold: 30,
            dilate_kernel: 15,
        }
    }
}

/// Intermediate artifacts of one detection run, for debug overlays only.
#[derive(Debug, Clone)]
pub struct DetectorDiagnostics {
    /// Clipped gradient-magnitude raster.
    pub gradient: GrayImage,
    /// Binarized and dilated edge mask the components were labeled on.
    pub edge_mask: GrayImage,
    /// All labeled components, row-major discovery order.
    pub components: Vec<ComponentStats>,
}

/// Locates the coarse content region of a rendered page.
#[derive(Debug, Clone, Default)]
pub struct EdgeContentDetector {
    params: DetectorParams,
}

impl EdgeContentDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Returns the bounding rectangle of the largest edge-mass component.
    ///
    /// A page without any detectable edges (a blank render) yields the full
    /// image rectangle; this call never fails.
    pub fn detect(&self, bitmap: &PageBitmap) -> BoundingBox {
        self.run(bitmap, false).0
    }

    /// Like [`detect`](Self::detect), also returning the intermediate
    /// rasters and the full component table.
    pub fn detect_with_diagnostics(
        &self,
        bitmap: &PageBitmap,
    ) -> (BoundingBox, DetectorDiagnostics) {
        let (bbox, diagnostics) = self.run(bitmap, true);
        (bbox, diagnostics.expect("diagnostics requested"))
    }

    fn run(
        &self,
        bitmap: &PageBitmap,
        keep_artifacts: bool,
    ) -> (BoundingBox, Option<DetectorDiagnostics>) {
        let gray = bitmap.to_gray();
        let gradient = sobel_magnitude(&gray);
        let edges = threshold(&gradient, self.params.threshold);
        let edge_mask = dilate(&edges, self.params.dilate_kernel);
        let components = connected_components(&edge_mask);

        let full_page = BoundingBox {
            x0: 0,
            y0: 0,
            x1: bitmap.width as i32,
            y1: bitmap.height as i32,
        };
        // First maximum wins so equal-area runs stay deterministic.
        let bbox = components
            .iter()
            .fold(None::<&ComponentStats>, |best, c| match best {
                Some(b) if b.area >= c.area => Some(b),
                _ => Some(c),
            })
            .map(|c| BoundingBox {
                x0: c.x as i32,
                y0: c.y as i32,
                x1: (c.x + c.width) as i32,
                y1: (c.y + c.height) as i32,
            })
            .unwrap_or(full_page);

        debug!(
            components = components.len(),
            %bbox,
            "edge content detection finished"
        );

        let diagnostics = keep_artifacts.then(|| DetectorDiagnostics {
            gradient,
            edge_mask,
            components,
        });
        (bbox, diagnostics)
    }
}
