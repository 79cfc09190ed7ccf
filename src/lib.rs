//! Region capture, annotation and selective blur for screenshot tools
//!
//! This crate is the headless core of a screenshot utility. A host wires
//! pointer events into a [`RegionSelector`], captures the chosen region
//! through a [`Capturer`] backed by a platform [`FrameSource`], edits the
//! result with an [`Editor`] (shapes, selective Gaussian blur, crop,
//! drag-to-move) and saves it through [`export`]. Windowing, tray and
//! hotkey integration stay in the host.
//!
//! Everything runs on one thread: pointer events, capture and blur are
//! synchronous, and a failed capture is terminal for that gesture.

pub mod blur;
pub mod capture;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod export;
pub mod render;

pub use blur::{GaussianKernel, apply_blur};
pub use capture::pixels::PixelBuffer;
pub use capture::{Capturer, FrameSource, MemoryFrameSource, Screen};
pub use config::{AppConfig, SaveLocation, ShapeColor};
pub use domain::geometry::{PixelRect, Point, Rect};
pub use domain::selection::{RegionSelector, SelectionState};
pub use editor::{Editor, Tool};
pub use error::{Error, Result};
