//! Newell-method polygon normal and area
//!
//! Newell's method sums the cross-product contributions of every boundary
//! segment, which stays robust on slightly non-planar loops where a single
//! three-point cross product does not.

use crate::{Point3, Vec3};

/// Raw Newell sum over an ordered vertex loop (not normalized)
///
/// The magnitude of the sum is twice the loop's area; its direction is the
/// right-hand-rule normal of the winding.
pub fn newell_normal(points: &[Point3]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        sum.x += (p.y - q.y) * (p.z + q.z);
        sum.y += (p.z - q.z) * (p.x + q.x);
        sum.z += (p.x - q.x) * (p.y + q.y);
    }
    sum
}

/// Unit normal of an ordered vertex loop
///
/// Returns the zero vector for degenerate loops (fewer than three points,
/// or collinear/coincident points whose Newell sum vanishes).
pub fn polygon_normal(points: &[Point3]) -> Vec3 {
    if points.len() < 3 {
        return Vec3::ZERO;
    }
    newell_normal(points).unit().unwrap_or(Vec3::ZERO)
}

/// Area enclosed by an ordered vertex loop
///
/// Half the Newell sum's magnitude; exact for planar loops.
pub fn polygon_area(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    newell_normal(points).norm() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_ccw_square_normal() {
        let n = polygon_normal(&unit_square());
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cw_square_normal_flips() {
        let mut pts = unit_square();
        pts.reverse();
        let n = polygon_normal(&pts);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_square_area() {
        assert_relative_eq!(polygon_area(&unit_square()), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangle_area() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert_relative_eq!(polygon_area(&pts), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_loops() {
        assert_eq!(polygon_normal(&[]), Vec3::ZERO);
        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(polygon_normal(&collinear), Vec3::ZERO);
        assert_eq!(polygon_area(&collinear), 0.0);
    }

    #[test]
    fn test_offset_plane() {
        // Same square lifted off the origin plane: normal unchanged.
        let pts: Vec<Point3> = unit_square()
            .into_iter()
            .map(|p| Point3::new(p.x, p.y, 5.0))
            .collect();
        let n = polygon_normal(&pts);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-9);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn area_is_translation_invariant(
                coords in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 3..8),
                dx in -100.0f64..100.0,
                dy in -100.0f64..100.0,
                dz in -100.0f64..100.0,
            ) {
                let pts: Vec<Point3> =
                    coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect();
                let moved: Vec<Point3> = pts
                    .iter()
                    .map(|p| Point3::new(p.x + dx, p.y + dy, p.z + dz))
                    .collect();
                let a0 = polygon_area(&pts);
                let a1 = polygon_area(&moved);
                prop_assert!((a0 - a1).abs() <= 1e-6 * (1.0 + a0.abs()));
            }
        }
    }
}
