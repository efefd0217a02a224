//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use trt_math::{Interval, Vec3};

/// Secondary ray offset per unit of sphere extent.
///
/// Has to stay well above the f32 rounding of the quadratic, which blurs
/// the surface by a few parts in 1e7 of `|center| + radius`.
pub const SURFACE_EPSILON: f32 = 1e-5;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius is not checked here; `Scene::new` rejects non-positive
    /// or non-finite values before anything is rendered.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// How far off this sphere's surface bounced rays start.
    pub fn surface_offset(&self) -> f32 {
        SURFACE_EPSILON * (self.center.abs().max_element() + self.radius).max(1.0)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // |o + t d - c|^2 = r^2 with h = d.(c - o), the half-b form
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if !(a.is_finite() && a > 0.0) {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        // Tangent rays count as misses; NaN fails the comparison too
        if !(discriminant > 0.0) || !discriminant.is_finite() {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(
            HitRecord::new(ray, root, outward_normal, &self.material)
                .with_offset(self.surface_offset()),
        )
    }
}
