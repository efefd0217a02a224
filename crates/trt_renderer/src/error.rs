//! Scene configuration errors.

use thiserror::Error;
use trt_math::Vec3;

/// Invalid scene configuration, reported before any rendering starts.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples_per_px must be at least 1")]
    InvalidSamplesPerPixel,

    #[error("rays_per_sample must be at least 1")]
    InvalidRaysPerSample,

    #[error("Sphere {index}: radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Sphere {index}: center must be finite, got {center:?}")]
    InvalidCenter { index: usize, center: Vec3 },

    #[error("Sphere {index}: albedo components must lie in [0, 1], got {albedo:?}")]
    AlbedoOutOfRange { index: usize, albedo: Vec3 },

    #[error("Camera field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Camera vectors must be finite")]
    NonFiniteCamera,

    #[error("Background colors must be finite")]
    InvalidBackground,

    #[error("Scene description parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
