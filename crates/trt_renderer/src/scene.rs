//! Validated scene: world, camera and sampling settings.

use serde::Deserialize;
use trt_math::{is_finite_vec, Interval};

use crate::{
    camera::CameraConfig, error::SceneResult, Camera, Color, HitRecord, Hittable, Ray,
    SceneError, Sphere,
};

/// Smallest ray parameter accepted as a hit.
///
/// Keeps a scattered ray from re-hitting the surface it just left.
pub const T_MIN: f32 = 1e-3;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// The same color in every direction.
    Solid(Color),
    /// Vertical blend from `horizon` (looking down) to `zenith` (looking up).
    Gradient { horizon: Color, zenith: Color },
}

impl Background {
    /// Radiance arriving along `ray` from outside the scene.
    pub fn color(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { horizon, zenith } => {
                let unit_direction = ray.direction().normalize_or_zero();
                let a = 0.5 * (unit_direction.y + 1.0);
                horizon * (1.0 - a) + zenith * a
            }
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            Background::Solid(color) => is_finite_vec(color),
            Background::Gradient { horizon, zenith } => {
                is_finite_vec(horizon) && is_finite_vec(zenith)
            }
        }
    }
}

impl Default for Background {
    /// White at the horizon fading to sky blue overhead.
    fn default() -> Self {
        Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

/// Everything a render needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct Scene {
    world: Vec<Sphere>,
    camera: Camera,
    width: u32,
    height: u32,
    samples_per_px: u32,
    rays_per_sample: u32,
    background: Background,
}

impl Scene {
    /// Validate the configuration and build the scene.
    pub fn new(
        world: Vec<Sphere>,
        camera: CameraConfig,
        width: u32,
        height: u32,
        samples_per_px: u32,
        rays_per_sample: u32,
    ) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions { width, height });
        }
        if samples_per_px == 0 {
            return Err(SceneError::InvalidSamplesPerPixel);
        }
        if rays_per_sample == 0 {
            return Err(SceneError::InvalidRaysPerSample);
        }
        validate_camera(&camera)?;
        for (index, sphere) in world.iter().enumerate() {
            validate_sphere(index, sphere)?;
        }

        let camera = Camera::new(&camera, width as f32 / height as f32);

        Ok(Self {
            world,
            camera,
            width,
            height,
            samples_per_px,
            rays_per_sample,
            background: Background::default(),
        })
    }

    /// Replace the background.
    pub fn with_background(mut self, background: Background) -> SceneResult<Self> {
        if !background.is_finite() {
            return Err(SceneError::InvalidBackground);
        }
        self.background = background;
        Ok(self)
    }

    /// Nearest hit along `ray`, or `None` if it escapes.
    pub fn hit(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.world.as_slice().hit(ray, Interval::new(T_MIN, f32::INFINITY))
    }

    /// Background radiance for an escaped ray.
    pub fn background_color(&self, ray: &Ray) -> Color {
        self.background.color(ray)
    }

    pub fn world(&self) -> &[Sphere] {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples_per_px(&self) -> u32 {
        self.samples_per_px
    }

    pub fn rays_per_sample(&self) -> u32 {
        self.rays_per_sample
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}

fn validate_camera(camera: &CameraConfig) -> SceneResult<()> {
    let vectors = [camera.look_from, camera.look_at, camera.vup];
    if !vectors.into_iter().all(is_finite_vec) {
        return Err(SceneError::NonFiniteCamera);
    }
    if !(camera.vfov > 0.0 && camera.vfov < 180.0) {
        return Err(SceneError::InvalidFieldOfView(camera.vfov));
    }
    Ok(())
}

fn validate_sphere(index: usize, sphere: &Sphere) -> SceneResult<()> {
    let radius = sphere.radius();
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SceneError::InvalidRadius { index, radius });
    }
    let center = sphere.center();
    if !is_finite_vec(center) {
        return Err(SceneError::InvalidCenter { index, center });
    }
    let albedo = sphere.material().albedo();
    if !albedo.to_array().iter().all(|c| Interval::UNIT.contains(*c)) {
        return Err(SceneError::AlbedoOutOfRange { index, albedo });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Vec3};

    fn red_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 20.0, Material::matte(Color::X))
    }

    fn camera() -> CameraConfig {
        CameraConfig::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO)
    }

    #[test]
    fn test_valid_scene() {
        let scene = Scene::new(vec![red_sphere()], camera(), 10, 5, 4, 3).unwrap();

        assert_eq!(scene.world().len(), 1);
        assert_eq!(scene.width(), 10);
        assert_eq!(scene.height(), 5);
        assert_eq!(scene.samples_per_px(), 4);
        assert_eq!(scene.rays_per_sample(), 3);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = Scene::new(vec![], camera(), 0, 10, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimensions { width: 0, height: 10 }));

        let err = Scene::new(vec![], camera(), 10, 0, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_zero_samples_and_rays() {
        let err = Scene::new(vec![], camera(), 10, 10, 0, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidSamplesPerPixel));

        let err = Scene::new(vec![], camera(), 10, 10, 1, 0).unwrap_err();
        assert!(matches!(err, SceneError::InvalidRaysPerSample));
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let world = vec![
                red_sphere(),
                Sphere::new(Vec3::ZERO, radius, Material::matte(Color::ONE)),
            ];
            let err = Scene::new(world, camera(), 10, 10, 1, 1).unwrap_err();
            assert!(matches!(err, SceneError::InvalidRadius { index: 1, .. }));
        }
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let world = vec![Sphere::new(
            Vec3::new(f32::NAN, 0.0, 0.0),
            1.0,
            Material::matte(Color::ONE),
        )];
        let err = Scene::new(world, camera(), 10, 10, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidCenter { index: 0, .. }));
    }

    #[test]
    fn test_rejects_albedo_out_of_range() {
        for albedo in [Color::new(1.5, 0.0, 0.0), Color::new(0.0, -0.1, 0.0), Color::splat(f32::NAN)] {
            let world = vec![Sphere::new(Vec3::ZERO, 1.0, Material::matte(albedo))];
            let err = Scene::new(world, camera(), 10, 10, 1, 1).unwrap_err();
            assert!(matches!(err, SceneError::AlbedoOutOfRange { index: 0, .. }));
        }
    }

    #[test]
    fn test_rejects_bad_camera() {
        let err = Scene::new(vec![], camera().with_vfov(0.0), 10, 10, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidFieldOfView(_)));

        let err = Scene::new(vec![], camera().with_vfov(180.0), 10, 10, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::InvalidFieldOfView(_)));

        let bad = CameraConfig::new(Vec3::splat(f32::INFINITY), Vec3::ZERO);
        let err = Scene::new(vec![], bad, 10, 10, 1, 1).unwrap_err();
        assert!(matches!(err, SceneError::NonFiniteCamera));
    }

    #[test]
    fn test_rejects_non_finite_background() {
        let scene = Scene::new(vec![], camera(), 10, 10, 1, 1).unwrap();
        let err = scene
            .with_background(Background::Solid(Color::new(f32::NAN, 0.0, 0.0)))
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidBackground));
    }

    #[test]
    fn test_scene_hit_respects_t_min() {
        let scene = Scene::new(vec![red_sphere()], camera(), 10, 10, 1, 1).unwrap();

        // Start on the surface heading out: no self-hit
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::Z);
        assert!(scene.hit(&ray).is_none());

        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z);
        let rec = scene.hit(&ray).unwrap();
        assert!((rec.t - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_gradient_background() {
        let sky = Background::default();

        // Looking up is bluer (less red) than looking down
        let up = sky.color(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky.color(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        assert!(up.x < down.x);
        assert_eq!(down, Color::ONE);
        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
    }
}
