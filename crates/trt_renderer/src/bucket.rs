//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel. Each bucket owns its pixels until the join, so no
//! locking is needed.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{framebuffer::Pixel, renderer::render_pixel, sampling::pixel_seed, Integrator, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Number of pixels covered, computed wide enough for any image size.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering the image, sorted from the center outward.
///
/// Order only affects when a region finishes, never its pixel values.
/// A `bucket_size` of 0 is treated as 1. Edge buckets are clipped to the
/// image, and `index` is each bucket's position in the returned order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let step = size as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width).step_by(step).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y), 0)
            })
        })
        .collect();

    sort_center_out(&mut buckets, width, height);
    buckets
        .iter_mut()
        .enumerate()
        .for_each(|(index, bucket)| bucket.index = index);

    buckets
}

fn sort_center_out(buckets: &mut [Bucket], width: u32, height: u32) {
    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    let distance_squared = |b: &Bucket| {
        let dx = b.x as f32 + b.width as f32 * 0.5 - cx;
        let dy = b.y as f32 + b.height as f32 * 0.5 - cy;
        dx * dx + dy * dy
    };

    // Stable, so ties stay in row-major order
    buckets.sort_by(|a, b| distance_squared(a).total_cmp(&distance_squared(b)));
}

/// Render a single bucket.
///
/// Every pixel draws from its own generator seeded by `seed` and the
/// pixel's position in the full image.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    integrator: &Integrator,
    seed: u64,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            let pixel_index = global_y as u64 * scene.width() as u64 + global_x as u64;
            let mut rng = StdRng::seed_from_u64(pixel_seed(seed, pixel_index));

            pixels.push(render_pixel(scene, integrator, global_x, global_y, &mut rng));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixels in row-major order within the bucket
    pub pixels: Vec<Pixel>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Pixel>) -> Self {
        Self { bucket, pixels }
    }
}
