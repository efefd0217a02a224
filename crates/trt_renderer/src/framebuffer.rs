//! Accumulation buffer and display transform.
//!
//! Pixels hold linear color sums; gamma and quantization are applied only
//! when the image is read out.

use trt_math::{is_finite_vec, Interval};

use crate::{bucket::BucketResult, Color};

/// Accumulated samples for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    /// Sum of accepted sample colors
    pub sum: Color,
    /// Number of accepted samples
    pub samples: u32,
    /// Samples dropped for being NaN or infinite
    pub rejected: u32,
}

impl Pixel {
    /// Add one sample, rejecting non-finite colors.
    #[inline]
    pub fn add(&mut self, color: Color) {
        if is_finite_vec(color) {
            self.sum += color;
            self.samples += 1;
        } else {
            self.rejected += 1;
        }
    }

    /// Mean of the accepted samples, black if there are none.
    pub fn average(&self) -> Color {
        if self.samples == 0 {
            Color::ZERO
        } else {
            self.sum / self.samples as f32
        }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and clamp a linear color to [0, 1].
pub fn display_color(color: Color) -> [f32; 3] {
    color
        .to_array()
        .map(|c| Interval::UNIT.clamp(linear_to_gamma(c)))
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    display_color(color).map(|c| (255.0 * c) as u8)
}

/// Width x height grid of accumulated pixels, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    /// Create an empty framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Accumulated samples at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &Pixel {
        &self.pixels[self.index(x, y)]
    }

    /// Linear pixel estimate at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixel(x, y).average()
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, line) in result
            .pixels
            .chunks_exact(bucket.width as usize)
            .enumerate()
        {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Total samples dropped as non-finite across the image.
    pub fn rejected_samples(&self) -> u64 {
        self.pixels.iter().map(|p| p.rejected as u64).sum()
    }

    /// Linear pixel estimates, row-major from the top row.
    pub fn to_linear(&self) -> Vec<Color> {
        self.pixels.iter().map(Pixel::average).collect()
    }

    /// Display colors in [0, 1], row-major from the top row.
    pub fn to_rgb_f32(&self) -> Vec<[f32; 3]> {
        self.pixels
            .iter()
            .map(|p| display_color(p.average()))
            .collect()
    }

    /// Display colors in [0, 255], row-major from the top row.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels
            .iter()
            .map(|p| color_to_rgb8(p.average()))
            .collect()
    }

    /// `to_rgb8` flattened to packed RGB bytes, ready for an image writer.
    pub fn to_rgb8_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_rgb8()).to_vec()
    }
}
