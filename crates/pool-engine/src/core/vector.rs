//! 2D vector used across the engine. Backed by glam's f64 vector so every
//! position, velocity and aim direction has value semantics and the usual
//! add/sub/scale/dot/length operators.

/// Immutable 2D vector (`x`, `y` in table units).
pub type Vector2D = glam::DVec2;

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: f64 = 1e-9;

/// Normalize `v`, returning `None` for zero-length or non-finite input.
#[inline]
pub fn try_normalize(v: Vector2D) -> Option<Vector2D> {
    if !v.is_finite() {
        return None;
    }
    let len = v.length();
    if len <= EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Counter-clockwise perpendicular of `v`.
#[inline]
pub fn perp(v: Vector2D) -> Vector2D {
    Vector2D::new(-v.y, v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_is_none() {
        assert!(try_normalize(Vector2D::ZERO).is_none());
        assert!(try_normalize(Vector2D::new(f64::NAN, 1.0)).is_none());
    }

    #[test]
    fn normalize_gives_unit_length() {
        let n = try_normalize(Vector2D::new(3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn perp_is_orthogonal() {
        let v = Vector2D::new(2.0, -7.0);
        assert_eq!(v.dot(perp(v)), 0.0);
    }
}
