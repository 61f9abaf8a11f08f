//! Error types for the boardlens analysis library.

use thiserror::Error;

/// Primary error type for analysis operations.
///
/// The four analysis engines themselves never fail: they degrade to
/// documented fallbacks instead. Errors surface only when constructing
/// inputs that violate a structural invariant.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid bounding box ({x0},{y0})-({x1},{y1}): corners must satisfy x0<=x1, y0<=y1")]
    InvalidBox { x0: i32, y0: i32, x1: i32, y1: i32 },

    #[error("bitmap has {channels} channels, expected 1, 3 or 4")]
    UnsupportedChannels { channels: u8 },

    #[error("bitmap buffer holds {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    BitmapSizeMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
}

/// Convenience Result type alias for AnalysisError.
pub type Result<T> = std::result::Result<T, AnalysisError>;
