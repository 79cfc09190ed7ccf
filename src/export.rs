//! PNG export for flattened screenshots

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::config::SaveLocation;

/// Default path for a new screenshot file, timestamped to the second.
///
/// `None` when the system exposes no usable directory.
pub fn image_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = match location {
        SaveLocation::Pictures => {
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        }
        SaveLocation::Documents => {
            dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
        }
    }?;
    let name = chrono::Local::now()
        .format("Screenshot_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);

    Some(path)
}

/// Write `img` as a PNG file at `path`.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(write_png(&mut file, img)?)
}

/// Encode `img` as PNG into an in-memory buffer.
pub fn save_rgba_to_buffer(img: &RgbaImage, buffer: &mut Vec<u8>) -> anyhow::Result<()> {
    Ok(write_png(buffer, img)?)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
