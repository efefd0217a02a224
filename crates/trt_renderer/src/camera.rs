//! Camera for ray generation.

use serde::Deserialize;
use trt_math::{unit_or, Vec3, DEGENERATE_LENGTH_SQUARED};

use crate::Ray;

/// Default vertical field of view in degrees.
pub const DEFAULT_VFOV: f32 = 60.0;

fn default_vup() -> Vec3 {
    Vec3::Y
}

fn default_vfov() -> f32 {
    DEFAULT_VFOV
}

/// Camera placement as written in a scene description.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CameraConfig {
    pub look_from: Vec3,
    pub look_at: Vec3,
    /// World up direction
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f32,
}

impl CameraConfig {
    /// Camera at `look_from` aimed at `look_at`, +Y up, default field of view.
    pub fn new(look_from: Vec3, look_at: Vec3) -> Self {
        Self {
            look_from,
            look_at,
            vup: default_vup(),
            vfov: DEFAULT_VFOV,
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the world up direction.
    pub fn with_vup(mut self, vup: Vec3) -> Self {
        self.vup = vup;
        self
    }
}

/// Pinhole camera mapping normalized image coordinates to world rays.
///
/// Built once per scene and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    look_from: Vec3,
    look_at: Vec3,

    // Orthonormal basis
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    // Top-left corner of the projection plane and its full extents
    upper_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build the camera basis and projection plane.
    ///
    /// `aspect` is image width over height. Degenerate setups are resolved
    /// with a fallback basis and a warning, never an error.
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let CameraConfig {
            look_from,
            look_at,
            vup,
            vfov,
        } = *config;

        let view = look_at - look_from;
        let forward = unit_or(view, Vec3::NEG_Z);
        if view.length_squared() <= DEGENERATE_LENGTH_SQUARED {
            log::warn!(
                "Camera look_from equals look_at ({:?}); looking down -Z",
                look_from
            );
        }

        let vup = unit_or(vup, Vec3::Y);
        let side = forward.cross(vup);
        let right = unit_or(side, forward.any_orthonormal_vector());
        if side.length_squared() <= DEGENERATE_LENGTH_SQUARED {
            log::warn!(
                "Camera forward {:?} is parallel to up {:?}; picking an arbitrary right vector",
                forward,
                vup
            );
        }
        let up = right.cross(forward);

        // Projection plane at unit distance along forward
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        let horizontal = 2.0 * half_width * right;
        let vertical = 2.0 * half_height * up;
        let upper_left = forward - half_width * right + half_height * up;

        Self {
            look_from,
            look_at,
            forward,
            right,
            up,
            upper_left,
            horizontal,
            vertical,
        }
    }

    /// Ray from the eye through normalized image coordinates `(s, t)`.
    ///
    /// `s` runs left to right and `t` top to bottom, both over [0, 1].
    /// Jitter is applied by the caller before normalizing.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let direction = self.upper_left + s * self.horizontal - t * self.vertical;
        Ray::new(self.look_from, direction)
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// The camera basis as (forward, right, up).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.forward, self.right, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&CameraConfig::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO), 1.0);
        let (forward, right, up) = camera.basis();

        assert!(approx(forward, Vec3::NEG_Z));
        assert!(approx(right, Vec3::X));
        assert!(approx(up, Vec3::Y));
    }

    #[test]
    fn test_camera_center_ray_points_at_target() {
        let config = CameraConfig::new(Vec3::new(-25.0, 0.0, 200.0), Vec3::new(-25.0, 0.0, 0.0));
        let camera = Camera::new(&config, 1.0);

        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), config.look_from);
        assert!(approx(ray.direction().normalize(), Vec3::NEG_Z));
    }

    #[test]
    fn test_camera_orientation() {
        let camera = Camera::new(&CameraConfig::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO), 2.0);

        // Top-left of the image looks up and to the left (world -x, +y)
        let top_left = camera.get_ray(0.0, 0.0).direction();
        assert!(top_left.x < 0.0 && top_left.y > 0.0);

        let bottom_right = camera.get_ray(1.0, 1.0).direction();
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }

    #[test]
    fn test_camera_field_of_view() {
        let config = CameraConfig::new(Vec3::ZERO, Vec3::NEG_Z).with_vfov(90.0);
        let camera = Camera::new(&config, 2.0);

        // 90 degrees vertical puts the top edge at 45 degrees
        let top = camera.get_ray(0.5, 0.0).direction();
        assert!((top.y / -top.z - 1.0).abs() < 1e-5);

        // Aspect 2 doubles the horizontal extent
        let right = camera.get_ray(1.0, 0.5).direction();
        assert!((right.x / -right.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_looking_straight_down() {
        let config = CameraConfig::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let camera = Camera::new(&config, 1.0);
        let (forward, right, up) = camera.basis();

        assert!(approx(forward, Vec3::NEG_Y));
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(forward.dot(right).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);

        let ray = camera.get_ray(0.3, 0.7);
        assert!(ray.direction().x.is_finite() && ray.direction().z.is_finite());
    }

    #[test]
    fn test_camera_up_nearly_parallel_to_forward() {
        // Not exactly parallel, but too close to give a usable cross product
        let config = CameraConfig::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO)
            .with_vup(Vec3::new(1e-7, 1.0, 0.0));
        let camera = Camera::new(&config, 1.0);
        let (forward, right, up) = camera.basis();

        assert!(approx(forward, Vec3::NEG_Y));
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!(forward.dot(right).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_coincident_points() {
        let config = CameraConfig::new(Vec3::ONE, Vec3::ONE);
        let camera = Camera::new(&config, 1.0);
        let (forward, _, _) = camera.basis();

        assert_eq!(forward, Vec3::NEG_Z);
    }

    #[test]
    fn test_camera_config_defaults() {
        let config: CameraConfig =
            serde_json::from_str(r#"{"look_from": [0, 0, 200], "look_at": [0, 0, 0]}"#).unwrap();

        assert_eq!(config.vup, Vec3::Y);
        assert_eq!(config.vfov, DEFAULT_VFOV);
    }
}
