//! Grouping of match boxes into viewing windows.
//!
//! Scattered keyword hits are condensed into a handful of windows, each
//! sized so the display viewport frames one coherent region at the
//! reference zoom. Clustering is density-based over box centers with a
//! minimum cluster size of one: every match belongs to exactly one cluster,
//! none are discarded as noise.

use rstar::RTree;
use rstar::primitives::GeomWithData;
use tracing::debug;

use crate::geometry::BoundingBox;
use crate::model::{MatchBox, Side, ViewWindow};

type CenterPoint = GeomWithData<[f64; 2], usize>;

/// Tunables for [`ClusterGrouper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrouperParams {
    /// Display viewport width in pixels.
    pub zoom_width: u32,

    /// Display viewport height in pixels.
    pub zoom_height: u32,

    /// Reference zoom factor mapping document units to viewport pixels.
    pub zoom: u32,
}

impl Default for GrouperParams {
    fn default() -> Self {
        Self {
            zoom_width: 400,
            zoom_height: 300,
            zoom: 5,
        }
    }
}

impl GrouperParams {
    /// Neighborhood radius in document units: half the smaller viewport
    /// dimension at the reference zoom.
    pub fn eps(&self) -> f64 {
        self.zoom_width.min(self.zoom_height) as f64 / self.zoom as f64 / 2.0
    }
}

/// Groups match boxes into spatially coherent viewing windows.
#[derive(Debug, Clone, Default)]
pub struct ClusterGrouper {
    params: GrouperParams,
}

impl ClusterGrouper {
    pub fn new(params: GrouperParams) -> Self {
        Self { params }
    }

    /// Produces one [`ViewWindow`] per spatial cluster, front windows first,
    /// then back. An empty match list yields an empty result without
    /// invoking clustering; a side without matches contributes no windows.
    pub fn group(&self, matches: &[MatchBox]) -> Vec<ViewWindow> {
        if matches.is_empty() {
            return Vec::new();
        }
        let front: Vec<MatchBox> = matches
            .iter()
            .filter(|m| m.side == Side::Front)
            .cloned()
            .collect();
        let back: Vec<MatchBox> = matches
            .iter()
            .filter(|m| m.side == Side::Back)
            .cloned()
            .collect();
        let (mut windows, back_windows) = self.group_sides(front, back);
        windows.extend(back_windows);
        windows
    }

    /// Clusters the two sides independently and in parallel; they share no
    /// state.
    pub fn group_sides(
        &self,
        front: Vec<MatchBox>,
        back: Vec<MatchBox>,
    ) -> (Vec<ViewWindow>, Vec<ViewWindow>) {
        rayon::join(
            || self.group_side(Side::Front, front),
            || self.group_side(Side::Back, back),
        )
    }

    fn group_side(&self, side: Side, boxes: Vec<MatchBox>) -> Vec<ViewWindow> {
        if boxes.is_empty() {
            return Vec::new();
        }
        let clusters = cluster_by_distance(&boxes, self.params.eps());
        debug!(%side, boxes = boxes.len(), clusters = clusters.len(), "grouped matches");

        clusters
            .into_iter()
            .map(|member_indices| {
                let members: Vec<MatchBox> =
                    member_indices.iter().map(|&i| boxes[i].clone()).collect();
                ViewWindow {
                    side,
                    bbox: self.window_rect(&members),
                    zoom: self.params.zoom,
                    members,
                }
            })
            .collect()
    }

    /// Window rectangle for one cluster, in document units.
    fn window_rect(&self, members: &[MatchBox]) -> BoundingBox {
        let zoom = self.params.zoom as f64;
        let half_w = self.params.zoom_width as f64 / zoom / 2.0;
        let half_h = self.params.zoom_height as f64 / zoom / 2.0;

        if let [single] = members {
            // Singleton: fixed-size window centered on the box.
            let (cx, cy) = single.center();
            return BoundingBox {
                x0: (cx - half_w) as i32,
                y0: (cy - half_h) as i32,
                x1: (cx + half_w) as i32,
                y1: (cy + half_h) as i32,
            };
        }

        let tight = members
            .iter()
            .skip(1)
            .fold(members[0].bbox, |acc, m| acc.union(&m.bbox));
        BoundingBox {
            x0: (tight.x0 as f64 - half_w) as i32,
            y0: (tight.y0 as f64 - half_h) as i32,
            x1: (tight.x1 as f64 + half_w) as i32,
            y1: (tight.y1 as f64 + half_h) as i32,
        }
    }
}

/// Connected components of the eps-neighborhood graph over box centers
/// (density clustering with minimum cluster size 1, so there is no noise
/// class). Cluster ids follow first appearance in input order, and members
/// keep input order, so output is reproducible for a fixed input.
fn cluster_by_distance(boxes: &[MatchBox], eps: f64) -> Vec<Vec<usize>> {
    let tree = RTree::bulk_load(
        boxes
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let (cx, cy) = m.center();
                CenterPoint::new([cx, cy], i)
            })
            .collect(),
    );

    let mut labels: Vec<Option<usize>> = vec![None; boxes.len()];
    let mut next_label = 0usize;
    let mut stack: Vec<usize> = Vec::new();

    for i in 0..boxes.len() {
        if labels[i].is_some() {
            continue;
        }
        labels[i] = Some(next_label);
        stack.push(i);
        while let Some(j) = stack.pop() {
            let (cx, cy) = boxes[j].center();
            // locate_within_distance takes the squared radius; the boundary
            // (distance == eps) is inside the neighborhood.
            for neighbor in tree.locate_within_distance([cx, cy], eps * eps) {
                let k = neighbor.data;
                if labels[k].is_none() {
                    labels[k] = Some(next_label);
                    stack.push(k);
                }
            }
        }
        next_label += 1;
    }

    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); next_label];
    for (i, label) in labels.into_iter().enumerate() {
        if let Some(label) = label {
            clusters[label].push(i);
        }
    }
    clusters
}
