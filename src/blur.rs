//! Gaussian blur restricted to a rectangular sub-region
//!
//! A direct (non-separable) 2D convolution over the blue, green and red
//! channels. The kernel is rebuilt per invocation from the host's intensity
//! slider value, and a ring of `radius` pixels inside the region edge keeps
//! its original bytes. O(width * height * radius^2), run once per user
//! gesture, never per frame.

use std::f64::consts::PI;

use crate::capture::pixels::PixelBuffer;
use crate::domain::geometry::PixelRect;
use crate::error::{Error, Result};

/// Square matrix of normalized Gaussian weights with circular support.
///
/// Size is `2*radius + 1`; cells with `dx^2 + dy^2 > radius^2` hold zero,
/// the rest sum to 1.0 after normalization.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    radius: usize,
    size: usize,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build the kernel for an intensity slider value (nominally 0-100).
    ///
    /// `radius = max(1, intensity / 10)` with truncating division, so
    /// intensity 100 gives radius 10 and any value at or below zero still
    /// yields the minimum 3x3 kernel. `sigma = radius / 2`.
    pub fn build(intensity: i32) -> Self {
        let radius = (intensity / 10).max(1) as usize;
        let size = 2 * radius + 1;
        let sigma = radius as f64 / 2.0;
        let sigma2 = 2.0 * sigma * sigma;
        let norm = (PI * sigma2).sqrt();
        let radius2 = (radius * radius) as f64;

        let r = radius as isize;
        let mut weights = vec![0.0; size * size];
        let mut total = 0.0;
        for dx in -r..=r {
            for dy in -r..=r {
                let distance = (dx * dx + dy * dy) as f64;
                if distance > radius2 {
                    continue;
                }
                let weight = (-distance / sigma2).exp() / norm;
                weights[(dx + r) as usize * size + (dy + r) as usize] = weight;
                total += weight;
            }
        }
        for weight in &mut weights {
            *weight /= total;
        }

        Self {
            radius,
            size,
            weights,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Kernel side length, `2*radius + 1`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at the given offsets from the kernel center.
    pub fn weight(&self, dx: isize, dy: isize) -> f64 {
        let r = self.radius as isize;
        debug_assert!(dx.abs() <= r && dy.abs() <= r);
        self.weights[(dx + r) as usize * self.size + (dy + r) as usize]
    }

    /// Sum of all weights: 1.0 up to floating-point error.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Blur `region` of `buffer` in place with the given intensity.
///
/// Only the region interior is rewritten: the ring of `radius` pixels
/// inside the region edge, and everything outside the region, keep their
/// exact original bytes. Alpha is forced to 255 on every rewritten pixel.
/// Fails with [`Error::RegionOutOfBounds`] when `region` does not lie
/// fully inside the buffer.
pub fn apply_blur(buffer: &mut PixelBuffer, region: PixelRect, intensity: i32) -> Result<()> {
    if region.width < 0
        || region.height < 0
        || (region.width > 0 && region.height > 0 && !buffer.bounds().contains_rect(region))
    {
        return Err(Error::RegionOutOfBounds {
            region,
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let kernel = GaussianKernel::build(intensity);
    let radius = kernel.radius() as isize;
    let (region_w, region_h) = (region.width as isize, region.height as isize);

    // The convolution reads unblurred pixels throughout.
    let source = buffer.clone();

    for y in radius..region_h - radius {
        for x in radius..region_w - radius {
            let mut blurred = [0.0f64; 3]; // B, G, R
            for ky in -radius..=radius {
                for kx in -radius..=radius {
                    let px = (region.x as isize + x + kx) as u32;
                    let py = (region.y as isize + y + ky) as u32;
                    let [b, g, r, _] = source.pixel(px, py);
                    let weight = kernel.weight(kx, ky);
                    blurred[0] += b as f64 * weight;
                    blurred[1] += g as f64 * weight;
                    blurred[2] += r as f64 * weight;
                }
            }
            buffer.set_pixel(
                (region.x as isize + x) as u32,
                (region.y as isize + y) as u32,
                [blurred[0] as u8, blurred[1] as u8, blurred[2] as u8, 255],
            );
        }
    }

    Ok(())
}
