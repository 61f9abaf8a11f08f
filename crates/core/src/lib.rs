//! boardlens - content analysis for fabrication-drawing pages.
//!
//! Given a rendered page bitmap and the word/block geometry reported by the
//! renderer, this crate locates the region of the page that carries the
//! actual drawing content, condenses keyword-match boxes into a small number
//! of viewing windows, and computes non-overlapping label placements for the
//! matched components inside a rendered window.
//!
//! The crate is a pure analysis core: rendering, text search, and all
//! presentation concerns live in the embedding application. Every entry
//! point is a deterministic function over its explicit inputs.

pub mod analyze;
pub mod cluster;
pub mod density;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod label;
pub mod model;
pub mod raster;

pub use analyze::{PageAnalysis, PageInput, analyze_page, analyze_sides};
pub use cluster::{ClusterGrouper, GrouperParams};
pub use density::{DensityDiagnostics, DensityRefiner, RefinerParams, ScoredWindow};
pub use detect::{DetectorDiagnostics, DetectorParams, EdgeContentDetector};
pub use error::{AnalysisError, Result};
pub use geometry::BoundingBox;
pub use label::{LabelLayoutEngine, LabelParams, PlacedLabel};
pub use model::{Block, MatchBox, SearchSummary, Side, ViewWindow, Word, dedup_matches};
pub use raster::{ComponentStats, GrayImage, PageBitmap};
