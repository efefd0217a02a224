//! Surface materials.
//!
//! The set of material kinds is closed: each variant implements its own
//! scatter branch, and adding a variant forces every match to handle it.

use rand::RngCore;
use serde::Deserialize;
use trt_math::{unit_or, Vec3};

use crate::{hittable::HitRecord, sampling::random_unit_vector, Ray};

/// Color type alias (linear RGB, components typically in 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color multiplied into everything seen along `scattered`
    pub attenuation: Color,
    /// The outgoing ray, starting just off the surface at the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Lambertian (diffuse) surface with the given albedo.
    Matte {
        #[serde(rename = "color")]
        albedo: Color,
    },
}

impl Material {
    /// Create a matte material. Albedo components belong in [0, 1];
    /// `Scene::new` rejects anything else.
    pub fn matte(albedo: Color) -> Self {
        Material::Matte { albedo }
    }

    /// The material's base color.
    pub fn albedo(&self) -> Color {
        match self {
            Material::Matte { albedo } => *albedo,
        }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed and the path terminates.
    pub fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Matte { albedo } => {
                // Normal plus a uniform point on the unit sphere tangent at the hit
                // gives a cosine-weighted direction about the normal
                let direction = unit_or(rec.normal + random_unit_vector(rng), rec.normal);

                Some(ScatterResult {
                    attenuation: *albedo,
                    scattered: Ray::new(rec.spawn_origin(), direction),
                })
            }
        }
    }
}
