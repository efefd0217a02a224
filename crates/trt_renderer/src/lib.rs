//! trt renderer - CPU path tracing for sphere scenes.
//!
//! A Monte Carlo path tracer: jittered camera rays, brute-force sphere
//! intersection, Lambertian scattering and per-pixel accumulation,
//! rendered in parallel buckets.
//!
//! # Example
//!
//! ```ignore
//! use trt_renderer::{render, CameraConfig, Color, Material, Scene, Sphere, Vec3};
//!
//! let world = vec![Sphere::new(Vec3::ZERO, 20.0, Material::matte(Color::X))];
//! let camera = CameraConfig::new(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO);
//! let scene = Scene::new(world, camera, 300, 300, 20, 10)?;
//!
//! let image = render(&scene);
//! let rgb = image.to_rgb8();
//! ```

mod bucket;
mod camera;
pub mod config;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraConfig, DEFAULT_VFOV};
pub use config::{SceneConfig, SphereConfig};
pub use error::{SceneError, SceneResult};
pub use framebuffer::{color_to_rgb8, display_color, linear_to_gamma, Framebuffer, Pixel};
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Material, ScatterResult};
pub use renderer::{render, render_pixel, render_with, Integrator, RenderOptions};
pub use scene::{Background, Scene, T_MIN};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from trt_math
pub use trt_math::{Interval, Ray, Vec3};
