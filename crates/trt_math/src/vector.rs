//! Normalization policy shared by camera setup and scattering.
//!
//! A vector is degenerate when its squared length is not finite or does
//! not exceed [`DEGENERATE_LENGTH_SQUARED`]. Degenerate vectors are never
//! divided by their length; the caller supplies the fallback instead.

use crate::Vec3;

/// Squared length at or below which a vector has no usable direction.
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Normalize `v`, or return `fallback` if `v` is degenerate.
#[inline]
pub fn unit_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq.is_finite() && len_sq > DEGENERATE_LENGTH_SQUARED {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// True if every component is finite (no NaN, no infinity).
#[inline]
pub fn is_finite_vec(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
