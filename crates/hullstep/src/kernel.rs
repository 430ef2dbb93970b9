//! Geometric predicate kernel shared by every hull algorithm.
//!
//! Purpose
//! - Keep all orientation and distance decisions in one place so the six
//!   algorithms agree on sign conventions.
//! - Plain f64 arithmetic; exact ties are classified deterministically but
//!   not robustly (see `same_sign`).
//!
//! Sign convention
//! - `cross(u, v) > 0.0` ⇔ `v` is counter-clockwise of `u` (left turn).
//!   Exact zero counts as "not a left turn" everywhere a strict test is used.

use nalgebra::Vector2;

/// Displacement vector from `a` to `b`.
#[inline]
pub fn vector(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    b - a
}

/// 2D cross product `u.x*v.y − u.y*v.x`.
#[inline]
pub fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// True when both values are ≥ 0 or both are ≤ 0.
///
/// Zero satisfies either branch, so an exactly-collinear cross product
/// agrees with both sides of a partition at once. QuickHull detects that
/// coincidence and logs it without resolving it.
#[inline]
pub fn same_sign(a: f64, b: f64) -> bool {
    (a >= 0.0 && b >= 0.0) || (a <= 0.0 && b <= 0.0)
}

/// Unsigned perpendicular distance from `p` to the line through the origin
/// in direction `v`: project `p` onto the unit vector of `v` and take the
/// residual's norm. Ranks how far a candidate sits past a baseline.
#[inline]
pub fn distance(p: Vector2<f64>, v: Vector2<f64>) -> f64 {
    let norm = v.norm();
    if norm <= 0.0 {
        return p.norm();
    }
    let u = v / norm;
    (p - u * p.dot(&u)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn cross_sign_is_left_turn() {
        let u = Vector2::new(1.0, 0.0);
        assert!(cross(u, Vector2::new(0.0, 1.0)) > 0.0);
        assert!(cross(u, Vector2::new(0.0, -1.0)) < 0.0);
        assert_eq!(cross(u, Vector2::new(3.0, 0.0)), 0.0);
    }

    #[test]
    fn same_sign_zero_matches_both() {
        assert!(same_sign(1.0, 2.0));
        assert!(same_sign(-1.0, -2.0));
        assert!(!same_sign(1.0, -2.0));
        // zero is on both sides by design
        assert!(same_sign(0.0, 5.0));
        assert!(same_sign(0.0, -5.0));
    }

    #[test]
    fn distance_is_perpendicular_residual() {
        let v = Vector2::new(2.0, 0.0);
        assert!((distance(Vector2::new(3.0, 4.0), v) - 4.0).abs() < 1e-12);
        assert!(distance(Vector2::new(5.0, 0.0), v).abs() < 1e-12);
        // 45° line
        let d = distance(Vector2::new(1.0, 0.0), Vector2::new(1.0, 1.0));
        assert!((d - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn vector_is_displacement() {
        let d = vector(Vector2::new(1.0, 2.0), Vector2::new(4.0, 0.0));
        assert_eq!(d, Vector2::new(3.0, -2.0));
    }
}
