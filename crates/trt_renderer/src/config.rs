//! Keyword-style scene descriptions.
//!
//! Mirrors the options a scene author writes: spheres with a center,
//! radius and material, a camera given by two points, and the sampling
//! settings. Parsed from JSON, then validated into a [`Scene`].
//!
//! ```json
//! {
//!   "world": [
//!     { "center": [0, 0, 0], "radius": 20, "material": { "matte": { "color": [1, 0, 0] } } }
//!   ],
//!   "camera": { "look_from": [0, 0, 200], "look_at": [0, 0, 0] },
//!   "width": 300, "height": 300,
//!   "samples_per_px": 20, "rays_per_sample": 10
//! }
//! ```

use serde::Deserialize;
use trt_math::Vec3;

use crate::{camera::CameraConfig, error::SceneResult, Background, Material, Scene, Sphere};

/// One sphere as written in a scene description.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SphereConfig {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl From<SphereConfig> for Sphere {
    fn from(config: SphereConfig) -> Self {
        Sphere::new(config.center, config.radius, config.material)
    }
}

/// A full scene description, not yet validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    pub world: Vec<SphereConfig>,
    pub camera: CameraConfig,
    pub width: u32,
    pub height: u32,
    pub samples_per_px: u32,
    pub rays_per_sample: u32,
    #[serde(default)]
    pub background: Option<Background>,
}

impl SceneConfig {
    /// Parse a JSON scene description.
    pub fn from_json(source: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Validate and build the scene.
    pub fn build(&self) -> SceneResult<Scene> {
        let world = self.world.iter().copied().map(Sphere::from).collect();
        let scene = Scene::new(
            world,
            self.camera,
            self.width,
            self.height,
            self.samples_per_px,
            self.rays_per_sample,
        )?;

        match self.background {
            Some(background) => scene.with_background(background),
            None => Ok(scene),
        }
    }
}
