/*
 * Vector Module
 *
 * This module defines the vector type used throughout the simulation.
 * Vectors are statically sized over the simulation dimension (2 or 3),
 * so mixing dimensions is a compile-time error rather than something to
 * check at runtime. nalgebra supplies the arithmetic: addition, scaling,
 * dot product, magnitude and clamp-to-magnitude (`cap_magnitude`).
 */

use nalgebra::SVector;

/// A point or direction in N-dimensional space.
pub type Vector<const N: usize> = SVector<f64, N>;

/// Normalize a vector, returning the zero vector when the magnitude is
/// (near) zero. Agents may legitimately have zero displacement relative
/// to a neighbor or goal, so this must not produce NaN.
pub fn normalize_or_zero<const N: usize>(v: Vector<N>) -> Vector<N> {
    v.try_normalize(1e-12).unwrap_or_else(Vector::zeros)
}
