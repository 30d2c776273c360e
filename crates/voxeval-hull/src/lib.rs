#![warn(missing_docs)]

//! Convex hull volume of 3D point sets.
//!
//! The hull itself comes from the `chull` quickhull implementation; the
//! enclosed volume is integrated over the hull triangulation with the
//! signed-tetrahedron method. Degenerate input (too few points, or a
//! coplanar/collinear set with no 3D hull) surfaces as an explicit error
//! instead of a silently wrong volume.

use chull::ConvexHullWrapper;
use thiserror::Error;
use voxeval_math::{Point3, Vec3};

/// Errors from hull-volume computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HullError {
    /// A 3D hull needs at least 4 points; fewer were supplied.
    ///
    /// The empty set in particular must be handled by the caller before
    /// asking for a volume.
    #[error("convex hull requires at least 4 points, got {0}")]
    InsufficientPoints(usize),

    /// Hull construction failed: the points span no 3D volume
    /// (coplanar, collinear or coincident input).
    #[error("degenerate point set has no 3D convex hull: {0}")]
    Degenerate(String),
}

/// Volume of the convex hull of `points`.
///
/// The hull triangulation is integrated as a fan of tetrahedra against the
/// origin; the triangles share a consistent winding, so the signed terms
/// sum to the enclosed volume regardless of where the origin sits.
pub fn convex_hull_volume(points: &[Point3]) -> Result<f64, HullError> {
    if points.len() < 4 {
        return Err(HullError::InsufficientPoints(points.len()));
    }

    let coords: Vec<Vec<f64>> = points.iter().map(|p| vec![p.x, p.y, p.z]).collect();
    let hull = ConvexHullWrapper::try_new(&coords, None)
        .map_err(|e| HullError::Degenerate(format!("{e:?}")))?;
    let (vertices, indices) = hull.vertices_indices();

    let corner = |i: usize| -> Vec3 {
        let v = &vertices[i];
        Vec3::new(v[0], v[1], v[2])
    };

    let mut volume = 0.0;
    for tri in indices.chunks(3) {
        let v0 = corner(tri[0]);
        let v1 = corner(tri[1]);
        let v2 = corner(tri[2]);
        // Signed volume of the tetrahedron spanned with the origin.
        volume += v0.dot(&v1.cross(&v2)) / 6.0;
    }

    Ok(volume.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners(half: f64) -> Vec<Point3> {
        let mut corners = Vec::new();
        for &x in &[-half, half] {
            for &y in &[-half, half] {
                for &z in &[-half, half] {
                    corners.push(Point3::new(x, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn test_unit_cube_volume() {
        let volume = convex_hull_volume(&cube_corners(0.5)).unwrap();
        assert!((volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tetrahedron_volume() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let volume = convex_hull_volume(&points).unwrap();
        assert!((volume - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_interior_points_do_not_change_volume() {
        let mut points = cube_corners(0.5);
        points.push(Point3::origin());
        points.push(Point3::new(0.1, -0.2, 0.3));
        // Duplicates of hull corners are harmless too.
        points.push(Point3::new(0.5, 0.5, 0.5));
        let volume = convex_hull_volume(&points).unwrap();
        assert!((volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_translated_cube_volume() {
        // The tetrahedron fan is anchored at the origin; the sum must be
        // translation invariant anyway.
        let points: Vec<Point3> = cube_corners(0.5)
            .into_iter()
            .map(|p| p + Vec3::new(10.0, -3.0, 7.0))
            .collect();
        let volume = convex_hull_volume(&points).unwrap();
        assert!((volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(convex_hull_volume(&[]), Err(HullError::InsufficientPoints(0)));
        let three = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(
            convex_hull_volume(&three),
            Err(HullError::InsufficientPoints(3))
        );
    }

    #[test]
    fn test_coplanar_points_error() {
        let square = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert!(matches!(
            convex_hull_volume(&square),
            Err(HullError::Degenerate(_))
        ));
    }
}
