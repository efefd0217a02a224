//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a bounded, explicit depth
//! - Anti-aliasing via jittered multi-sampling
//! - Parallel bucket rendering with per-pixel random streams

use std::time::Instant;

use indicatif::ProgressBar;
use rand::RngCore;
use rayon::prelude::*;

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE},
    framebuffer::Pixel,
    sampling::sample_square,
    Color, Framebuffer, Ray, Scene,
};

/// Estimates the radiance carried along a camera ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integrator {
    max_depth: u32,
}

impl Integrator {
    /// Create an integrator that scatters at most `max_depth` times per path.
    ///
    /// A depth of 0 disables scattering: hits return the material's
    /// attenuation unlit and misses return the background.
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Integrator using the scene's `rays_per_sample` as the depth limit.
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.rays_per_sample())
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Trace one path starting with `ray`.
    ///
    /// The path ends when it escapes (background times the attenuation
    /// product), is absorbed (black), or hits a surface at the depth limit
    /// (black).
    pub fn trace(&self, ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        if self.max_depth == 0 {
            return Self::trace_direct(ray, scene, rng);
        }

        let mut throughput = Color::ONE;
        let mut ray = *ray;
        let mut depth = 0;

        loop {
            let Some(rec) = scene.hit(&ray) else {
                return throughput * scene.background_color(&ray);
            };

            // Energy cutoff
            if depth >= self.max_depth {
                return Color::ZERO;
            }

            match rec.material.scatter(&ray, &rec, rng) {
                Some(result) => {
                    throughput *= result.attenuation;
                    if throughput == Color::ZERO {
                        return Color::ZERO;
                    }
                    ray = result.scattered;
                    depth += 1;
                }
                None => return Color::ZERO,
            }
        }
    }

    /// First hit only, no bounces.
    fn trace_direct(ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        match scene.hit(ray) {
            Some(rec) => rec
                .material
                .scatter(ray, &rec, rng)
                .map_or(Color::ZERO, |result| result.attenuation),
            None => scene.background_color(ray),
        }
    }
}

/// Options that shape how a render is scheduled, not what it depicts.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Seed for every random draw in the render
    pub seed: u64,
    /// Edge length of the square buckets handed to worker threads
    pub bucket_size: u32,
    /// Sized to the pixel count, then advanced as each bucket finishes
    pub progress: Option<ProgressBar>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            progress: None,
        }
    }
}

impl RenderOptions {
    /// Default options with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Render a single pixel with `samples_per_px` jittered samples.
pub fn render_pixel(
    scene: &Scene,
    integrator: &Integrator,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Pixel {
    let width = scene.width() as f32;
    let height = scene.height() as f32;
    let mut pixel = Pixel::default();

    for _ in 0..scene.samples_per_px() {
        let (jx, jy) = sample_square(rng);
        let s = (x as f32 + jx) / width;
        let t = (y as f32 + jy) / height;

        let ray = scene.camera().get_ray(s, t);
        pixel.add(integrator.trace(&ray, scene, rng));
    }

    pixel
}

/// Render the scene with default options.
pub fn render(scene: &Scene) -> Framebuffer {
    render_with(scene, &RenderOptions::default())
}

/// Render the scene, splitting the image into buckets across the rayon pool.
///
/// The output depends only on the scene and `options.seed`; thread count,
/// scheduling order and bucket size do not change a single bit.
pub fn render_with(scene: &Scene, options: &RenderOptions) -> Framebuffer {
    let start = Instant::now();
    let (width, height) = (scene.width(), scene.height());
    let integrator = Integrator::for_scene(scene);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} spheres",
        width,
        height,
        scene.samples_per_px(),
        integrator.max_depth(),
        scene.world().len()
    );

    let buckets = generate_buckets(width, height, options.bucket_size);
    if let Some(progress) = &options.progress {
        progress.set_length(width as u64 * height as u64);
    }
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, scene, &integrator, options.seed);
            if let Some(progress) = &options.progress {
                progress.inc(bucket.pixel_count() as u64);
            }
            log::debug!(
                "Bucket {} at ({}, {}) done",
                bucket.index,
                bucket.x,
                bucket.y
            );
            result
        })
        .collect();

    let mut framebuffer = Framebuffer::new(width, height);
    for result in &results {
        framebuffer.write_bucket(result);
    }

    let rejected = framebuffer.rejected_samples();
    if rejected > 0 {
        log::warn!("Discarded {} non-finite samples", rejected);
    }
    log::info!("Rendered {} buckets in {:?}", results.len(), start.elapsed());

    framebuffer
}
