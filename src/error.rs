//! Typed failures for the capture and blur pipeline

use crate::domain::geometry::PixelRect;

/// Failures surfaced by capture and blur operations.
///
/// Every variant is terminal for the in-flight user gesture: nothing is
/// retried automatically. The host reports the failure and returns the
/// selector to idle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A capture was requested for a rectangle with no area.
    #[error("invalid capture region: {width}x{height}")]
    InvalidRegion { width: i32, height: i32 },

    /// The rectangle does not sit on exactly one screen.
    #[error("unsupported capture region: {0}")]
    UnsupportedRegion(String),

    /// The underlying framebuffer read failed.
    #[error("screen capture failed")]
    CaptureFailed(#[source] anyhow::Error),

    /// A blur was requested for a sub-rectangle outside the buffer.
    #[error("region {region:?} exceeds buffer bounds {width}x{height}")]
    RegionOutOfBounds {
        region: PixelRect,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
