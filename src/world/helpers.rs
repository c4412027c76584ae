use glam::{Vec2, vec2};

/// Denominators smaller than this are treated as parallel lines.
pub const PARALLEL_EPSILON: f32 = f32::EPSILON;

// ──────────────────────────────────────────────────────────────────────────
//                       Scalar primitives
// ──────────────────────────────────────────────────────────────────────────

/// 2-D cross product `a.x * b.y - b.x * a.y`.
///
/// Positive when `b` is rotated clockwise from `a` on a y-down screen.
#[inline(always)]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - b.x * a.y
}

/// True if the closed intervals `[a0, a1]` and `[b0, b1]` share a point.
/// Endpoints may be given in either order.
#[inline]
pub fn ranges_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    a0.min(a1) <= b0.max(b1) && b0.min(b1) <= a0.max(a1)
}

/// Axis-aligned bounding-box test between the boxes spanned by the
/// segments `p0-p1` and `q0-q1`.
#[inline]
pub fn boxes_intersect(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    ranges_overlap(p0.x, p1.x, q0.x, q1.x) && ranges_overlap(p0.y, p1.y, q0.y, q1.y)
}

/// Signed area of the triangle `(a, b, p)`.
///
/// For an edge `a -> b` of a sector wound clockwise on screen:
/// * `> 0` – `p` is on the inner side
/// * `= 0` – `p` is on the line through `a` and `b`
/// * `< 0` – `p` is outside
#[inline(always)]
pub fn point_side(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    cross(b - a, p - a)
}

// ──────────────────────────────────────────────────────────────────────────
//                       Line intersection
// ──────────────────────────────────────────────────────────────────────────

/// Intersection of the infinite lines through `a0-a1` and `b0-b1`.
///
/// Returns `None` for (nearly) parallel lines or when the result is not
/// finite, so callers never push NaN/inf into screen space.
pub fn intersect(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let da = a0 - a1;
    let db = b0 - b1;
    let det = cross(da, db);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ca = cross(a0, a1);
    let cb = cross(b0, b1);
    let p = vec2(
        cross(vec2(ca, da.x), vec2(cb, db.x)) / det,
        cross(vec2(ca, da.y), vec2(cb, db.y)) / det,
    );
    p.is_finite().then_some(p)
}

// ──────────────────────────────────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cross_sign_follows_orientation() {
        assert_eq!(cross(vec2(1.0, 0.0), vec2(0.0, 1.0)), 1.0);
        assert_eq!(cross(vec2(0.0, 1.0), vec2(1.0, 0.0)), -1.0);
        assert_eq!(cross(vec2(2.0, 2.0), vec2(1.0, 1.0)), 0.0);
    }

    #[test]
    fn point_side_of_clockwise_square() {
        // (0,0) -> (10,0) -> (10,10) -> (0,10) is clockwise with y down.
        let a = vec2(0.0, 0.0);
        let b = vec2(10.0, 0.0);
        assert!(point_side(vec2(5.0, 5.0), a, b) > 0.0, "inside");
        assert!(point_side(vec2(5.0, -5.0), a, b) < 0.0, "outside");
        assert_eq!(point_side(vec2(25.0, 0.0), a, b), 0.0, "collinear");
    }

    #[test]
    fn boxes_touching_at_corner_intersect() {
        assert!(boxes_intersect(
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(1.0, 1.0),
            vec2(2.0, 3.0)
        ));
        assert!(!boxes_intersect(
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(1.5, 0.0),
            vec2(2.0, 1.0)
        ));
    }

    #[test]
    fn intersect_crossing_diagonals() {
        let p = intersect(
            vec2(0.0, 0.0),
            vec2(4.0, 4.0),
            vec2(0.0, 4.0),
            vec2(4.0, 0.0),
        )
        .expect("diagonals cross");
        assert!((p - vec2(2.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn intersect_is_on_infinite_lines_not_segments() {
        let p = intersect(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(5.0, -1.0),
            vec2(5.0, 1.0),
        )
        .expect("lines cross outside the first segment");
        assert!((p - vec2(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn intersect_parallel_is_none() {
        assert!(
            intersect(
                vec2(0.0, 0.0),
                vec2(1.0, 1.0),
                vec2(0.0, 1.0),
                vec2(1.0, 2.0)
            )
            .is_none()
        );
        // degenerate first line
        assert!(
            intersect(
                vec2(3.0, 3.0),
                vec2(3.0, 3.0),
                vec2(0.0, 1.0),
                vec2(1.0, 2.0)
            )
            .is_none()
        );
    }

    proptest! {
        #[test]
        fn ranges_overlap_is_symmetric(
            a0 in -1e3f32..1e3, a1 in -1e3f32..1e3,
            b0 in -1e3f32..1e3, b1 in -1e3f32..1e3,
        ) {
            prop_assert_eq!(
                ranges_overlap(a0, a1, b0, b1),
                ranges_overlap(b0, b1, a0, a1)
            );
            prop_assert_eq!(
                ranges_overlap(a0, a1, b0, b1),
                ranges_overlap(a1, a0, b1, b0)
            );
        }

        #[test]
        fn ranges_overlap_is_reflexive(a0 in -1e3f32..1e3, a1 in -1e3f32..1e3) {
            prop_assert!(ranges_overlap(a0, a1, a0, a1));
        }

        #[test]
        fn point_side_zero_on_line(t in -4.0f32..4.0) {
            // axis-aligned line keeps the products exact
            let a = vec2(1.0, 2.0);
            let b = vec2(5.0, 2.0);
            let p = a + (b - a) * t;
            prop_assert_eq!(point_side(p, a, b), 0.0);
        }
    }
}
