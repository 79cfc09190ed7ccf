//! Owned BGRA pixel storage with explicit row stride

use image::RgbaImage;

use crate::domain::geometry::PixelRect;

/// Bytes per BGRA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned, contiguous pixel buffer in blue-green-red-alpha byte order.
///
/// `stride` is bytes per row and may exceed `width * 4` when rows carry
/// alignment padding; padding bytes are never interpreted as pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed buffer with a tight stride.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_stride(width, height, width as usize * BYTES_PER_PIXEL)
    }

    /// Create a zeroed buffer with a padded row stride.
    ///
    /// Panics if `stride` cannot hold a row of pixels.
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Self {
        assert!(
            stride >= width as usize * BYTES_PER_PIXEL,
            "stride {stride} too small for width {width}"
        );
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    /// Wrap existing BGRA bytes with a tight stride.
    ///
    /// Panics if `data` is not exactly `width * height * 4` bytes.
    pub fn from_bgra(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "pixel data does not match {width}x{height}"
        );
        Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including any alignment padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bounds of the whole buffer as a pixel region.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * BYTES_PER_PIXEL
    }

    /// BGRA bytes of one pixel. Panics out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let o = self.offset(x, y);
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    /// Overwrite one pixel with BGRA bytes. Panics out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height);
        let o = self.offset(x, y);
        self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&bgra);
    }

    /// Fill every pixel with one BGRA value, leaving padding untouched.
    pub fn fill(&mut self, bgra: [u8; 4]) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, bgra);
            }
        }
    }

    /// Force the alpha byte of every pixel to 255.
    pub fn set_opaque(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let o = self.offset(x, y);
                self.data[o + 3] = 255;
            }
        }
    }

    /// Copy out a sub-region as a new tightly-packed buffer, or `None` if
    /// the region does not lie fully inside this buffer.
    pub fn copy_region(&self, region: PixelRect) -> Option<PixelBuffer> {
        if region.width <= 0 || region.height <= 0 || !self.bounds().contains_rect(region) {
            return None;
        }
        let mut out = PixelBuffer::new(region.width as u32, region.height as u32);
        for y in 0..region.height as u32 {
            let src = self.offset(region.x as u32, region.y as u32 + y);
            let len = region.width as usize * BYTES_PER_PIXEL;
            let dst = out.offset(0, y);
            out.data[dst..dst + len].copy_from_slice(&self.data[src..src + len]);
        }
        Some(out)
    }

    /// Convert to an RGBA raster, swapping channel order and dropping row
    /// padding.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let [b, g, r, a] = self.pixel(x, y);
                img.put_pixel(x, y, image::Rgba([r, g, b, a]));
            }
        }
        img
    }

    /// Build a tightly-packed buffer from an RGBA raster.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let mut buf = PixelBuffer::new(img.width(), img.height());
        for (x, y, px) in img.enumerate_pixels() {
            buf.set_pixel(x, y, [px[2], px[1], px[0], px[3]]);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_roundtrip_with_padded_stride() {
        let mut buf = PixelBuffer::with_stride(3, 2, 16);
        buf.set_pixel(2, 1, [1, 2, 3, 4]);
        assert_eq!(buf.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(buf.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(buf.data().len(), 32);
    }

    #[test]
    fn test_copy_region_drops_padding() {
        let mut buf = PixelBuffer::with_stride(4, 4, 20);
        buf.fill([9, 8, 7, 255]);
        buf.set_pixel(1, 1, [1, 1, 1, 255]);

        let region = buf.copy_region(PixelRect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(region.width(), 2);
        assert_eq!(region.stride(), 8);
        assert_eq!(region.pixel(0, 0), [1, 1, 1, 255]);
        assert_eq!(region.pixel(1, 1), [9, 8, 7, 255]);
    }

    #[test]
    fn test_copy_region_rejects_out_of_bounds() {
        let buf = PixelBuffer::new(4, 4);
        assert!(buf.copy_region(PixelRect::new(2, 2, 4, 4)).is_none());
        assert!(buf.copy_region(PixelRect::new(0, 0, 0, 4)).is_none());
        assert!(buf.copy_region(PixelRect::new(-1, 0, 2, 2)).is_none());
    }

    #[test]
    fn test_rgba_conversion_swaps_channels() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set_pixel(0, 0, [10, 20, 30, 255]);
        buf.set_pixel(1, 0, [0, 0, 255, 255]);

        let img = buf.to_rgba();
        assert_eq!(img.get_pixel(0, 0).0, [30, 20, 10, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]);

        assert_eq!(PixelBuffer::from_rgba(&img), buf);
    }

    #[test]
    fn test_set_opaque() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_opaque();
        assert_eq!(buf.pixel(1, 1), [0, 0, 0, 255]);
    }
}
