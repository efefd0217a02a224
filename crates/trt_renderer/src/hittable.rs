//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use trt_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the shading step that consumes it.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the surface that was hit
    pub material: &'a Material,
    /// Distance along `normal` that rays leaving this hit start at
    pub offset: f32,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            t,
            front_face,
            material,
            offset: 0.0,
        }
    }

    /// Set how far off the surface secondary rays start.
    ///
    /// Shapes pick this from their own scale so that rounding in `p`
    /// cannot leave the origin of a bounced ray inside the surface.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Origin for rays leaving this hit on the side `normal` points to.
    pub fn spawn_origin(&self) -> Vec3 {
        self.p + self.normal * self.offset
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with t inside `ray_t`.
    ///
    /// Returns the nearest such hit.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Brute-force nearest hit over an ordered list of objects.
impl<T: Hittable> Hittable for [T] {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in self {
            let interval = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Sphere};

    #[test]
    fn test_face_normal_outside() {
        let material = Material::matte(Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, &material);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_face_normal_inside() {
        let material = Material::matte(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &material);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_spawn_origin_follows_oriented_normal() {
        let material = Material::matte(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert_eq!(rec.spawn_origin(), rec.p);

        let rec = rec.with_offset(0.25);
        assert_eq!(rec.spawn_origin(), Vec3::new(0.0, 0.0, 0.75));
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let far = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Material::matte(Color::Z));
        let near = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::matte(Color::X));
        let world = vec![far, near];

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.as_slice().hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(rec.material.albedo(), Color::X);
    }

    #[test]
    fn test_empty_list_misses() {
        let world: Vec<Sphere> = Vec::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.as_slice().hit(&ray, Interval::UNIVERSE).is_none());
    }
}
