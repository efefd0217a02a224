//! Random sampling helpers.
//!
//! Every draw goes through an explicit `RngCore` handed down the call
//! chain, so a render is reproducible from its seed alone.

use rand::{Rng, RngCore};
use trt_math::Vec3;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample a random point in the unit square [0, 1) x [0, 1).
///
/// Used as the sub-pixel jitter offset for anti-aliasing.
pub fn sample_square(rng: &mut dyn RngCore) -> (f32, f32) {
    (gen_f32(rng), gen_f32(rng))
}

/// Generate a random unit vector, uniform on the surface of the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling from the enclosing cube keeps the distribution uniform
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Derive the RNG seed for one pixel from the render seed.
///
/// SplitMix64 finalizer over the seed and the pixel's row-major index, so
/// neighbouring pixels get uncorrelated streams and the result does not
/// depend on which worker renders the pixel.
pub fn pixel_seed(seed: u64, pixel_index: u64) -> u64 {
    let mut z = seed
        .wrapping_add(pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
