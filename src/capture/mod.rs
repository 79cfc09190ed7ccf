//! Region capture over an abstract framebuffer source

pub mod pixels;

use anyhow::Context;

use crate::domain::geometry::PixelRect;
use crate::error::{Error, Result};

use pixels::PixelBuffer;

/// One logical display known to a [`FrameSource`].
#[derive(Clone, Debug)]
pub struct Screen {
    pub name: String,
    /// Position and size in absolute screen coordinates.
    pub bounds: PixelRect,
    /// Display scale factor.
    pub scale: f32,
}

/// Backend that enumerates displays and reads their pixels.
///
/// Hosts implement this over the platform capture API;
/// [`MemoryFrameSource`] backs it with in-memory frames for tests and
/// headless use.
pub trait FrameSource {
    fn screens(&self) -> &[Screen];

    /// Read `region` (absolute screen coordinates, fully inside `screen`)
    /// as tightly-packed BGRA.
    fn read_region(&self, screen: &Screen, region: PixelRect) -> anyhow::Result<PixelBuffer>;
}

/// Frame source backed by one in-memory buffer per screen.
#[derive(Default)]
pub struct MemoryFrameSource {
    screens: Vec<Screen>,
    frames: Vec<PixelBuffer>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen backed by `frame`.
    ///
    /// Panics if the frame dimensions do not match `bounds`.
    pub fn add_screen(&mut self, name: &str, bounds: PixelRect, scale: f32, frame: PixelBuffer) {
        assert_eq!(
            (frame.width() as i32, frame.height() as i32),
            (bounds.width, bounds.height),
            "frame does not match screen bounds"
        );
        self.screens.push(Screen {
            name: name.to_string(),
            bounds,
            scale,
        });
        self.frames.push(frame);
    }
}

impl FrameSource for MemoryFrameSource {
    fn screens(&self) -> &[Screen] {
        &self.screens
    }

    fn read_region(&self, screen: &Screen, region: PixelRect) -> anyhow::Result<PixelBuffer> {
        let idx = self
            .screens
            .iter()
            .position(|s| s.name == screen.name)
            .with_context(|| format!("unknown screen {}", screen.name))?;
        let local = PixelRect::new(
            region.x - screen.bounds.x,
            region.y - screen.bounds.y,
            region.width,
            region.height,
        );
        self.frames[idx]
            .copy_region(local)
            .with_context(|| format!("region {region:?} outside frame of {}", screen.name))
    }
}

/// One-shot region capturer over a frame source.
pub struct Capturer<S> {
    source: S,
}

impl<S: FrameSource> Capturer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Capture `rect` (absolute screen coordinates) into a fresh buffer.
    ///
    /// The rectangle must have positive area ([`Error::InvalidRegion`])
    /// and sit fully on a single screen ([`Error::UnsupportedRegion`]);
    /// a backend read failure surfaces as [`Error::CaptureFailed`]. A
    /// failed capture is terminal for the gesture, never retried here.
    pub fn capture(&self, rect: PixelRect) -> Result<PixelBuffer> {
        if rect.width <= 0 || rect.height <= 0 {
            return Err(Error::InvalidRegion {
                width: rect.width,
                height: rect.height,
            });
        }

        let screens = self.source.screens();
        let Some(screen) = screens.iter().find(|s| s.bounds.contains_rect(rect)) else {
            return Err(Error::UnsupportedRegion(unsupported_reason(screens, rect)));
        };

        let mut buffer = self
            .source
            .read_region(screen, rect)
            .map_err(Error::CaptureFailed)?;
        if (buffer.width() as i32, buffer.height() as i32) != (rect.width, rect.height) {
            return Err(Error::CaptureFailed(anyhow::anyhow!(
                "backend returned {}x{} for a {}x{} region",
                buffer.width(),
                buffer.height(),
                rect.width,
                rect.height
            )));
        }

        // Captured screen content is opaque.
        buffer.set_opaque();
        log::debug!(
            "captured {}x{} region from {}",
            buffer.width(),
            buffer.height(),
            screen.name
        );
        Ok(buffer)
    }
}

fn unsupported_reason(screens: &[Screen], rect: PixelRect) -> String {
    let touched: Vec<&Screen> = screens
        .iter()
        .filter(|s| s.bounds.intersects(rect))
        .collect();
    match touched.len() {
        0 => "region lies outside every screen".to_string(),
        1 => "region extends past the edge of its screen".to_string(),
        n => {
            if touched.iter().any(|s| s.scale != touched[0].scale) {
                format!("region spans {n} screens with differing scale")
            } else {
                format!("region spans {n} screens")
            }
        }
    }
}
