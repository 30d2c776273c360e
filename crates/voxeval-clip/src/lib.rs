#![warn(missing_docs)]

//! Polygon clipping and cuboid intersection solving.
//!
//! The clip planes here are always faces of an axis-aligned box, so the
//! point classification and the Sutherland-Hodgman clipper operate one
//! coordinate axis at a time. The intersection solver maps one box into
//! the other's local frame, where that box becomes axis-aligned, clips
//! every face polygon against it, and collects the surviving vertices
//! together with any fully-contained keypoints.
//!
//! The clipper follows the robust formulation in "Real-Time Collision
//! Detection" (Ericson), ch. 8: points within an epsilon band of the
//! plane are treated as on it.

use thiserror::Error;
use voxeval_box::{OrientedBox, FACES};
use voxeval_math::Point3;

/// Half-thickness of the band around a clip plane within which points are
/// classified as lying on the plane.
pub const PLANE_THICKNESS_EPSILON: f64 = 1e-6;

/// Errors from the intersection solver.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    /// A box transform could not be inverted. Does not occur for
    /// orthonormal rotation blocks.
    #[error("box transform is singular and cannot be inverted")]
    SingularTransform,
}

/// Position of a point relative to an axis-aligned clip plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    /// Strictly on the normal side of the plane.
    InFront,
    /// Within the epsilon band of the plane.
    On,
    /// Strictly on the anti-normal side of the plane.
    Behind,
}

/// Classify a point against the axis-aligned plane through `plane_point`.
///
/// `normal` is +1.0 or -1.0 and selects which side of the plane counts as
/// front; `axis` is the coordinate axis (0, 1 or 2) the plane is
/// perpendicular to.
pub fn classify_point_to_plane(
    point: &Point3,
    plane_point: &Point3,
    normal: f64,
    axis: usize,
) -> PointSide {
    let signed_distance = normal * (point[axis] - plane_point[axis]);
    if signed_distance > PLANE_THICKNESS_EPSILON {
        PointSide::InFront
    } else if signed_distance < -PLANE_THICKNESS_EPSILON {
        PointSide::Behind
    } else {
        PointSide::On
    }
}

/// Intersection of the edge `prev -> current` with the axis-aligned plane
/// through `plane_point`, by linear interpolation along the edge.
///
/// Only meaningful when the endpoints classified on strictly opposite
/// sides of the plane, which bounds the denominator away from zero by
/// twice the plane thickness.
pub fn intersect_edge_with_plane(
    plane_point: &Point3,
    prev: &Point3,
    current: &Point3,
    axis: usize,
) -> Point3 {
    let alpha = (current[axis] - plane_point[axis]) / (current[axis] - prev[axis]);
    Point3::from(alpha * prev.coords + (1.0 - alpha) * current.coords)
}

/// Clip a polygon against a single axis-aligned plane (Sutherland-Hodgman).
///
/// Keeps the part of the polygon in front of the plane. A polygon that
/// lies entirely within the plane's epsilon band is returned unchanged
/// rather than clipped away. Inputs of one point or fewer clip to empty.
pub fn clip_polygon_to_plane(
    poly: &[Point3],
    plane_point: &Point3,
    normal: f64,
    axis: usize,
) -> Vec<Point3> {
    let mut result: Vec<Point3> = Vec::new();
    if poly.len() <= 1 {
        return result;
    }

    let mut poly_in_plane = true;

    for (i, current) in poly.iter().enumerate() {
        let prev = &poly[(i + poly.len() - 1) % poly.len()];
        let d1 = classify_point_to_plane(prev, plane_point, normal, axis);
        let d2 = classify_point_to_plane(current, plane_point, normal, axis);
        match d2 {
            PointSide::Behind => {
                poly_in_plane = false;
                if d1 == PointSide::InFront {
                    result.push(intersect_edge_with_plane(plane_point, prev, current, axis));
                } else if d1 == PointSide::On && result.last() != Some(prev) {
                    result.push(*prev);
                }
            }
            PointSide::InFront => {
                poly_in_plane = false;
                if d1 == PointSide::Behind {
                    result.push(intersect_edge_with_plane(plane_point, prev, current, axis));
                } else if d1 == PointSide::On && result.last() != Some(prev) {
                    result.push(*prev);
                }
                result.push(*current);
            }
            PointSide::On => {
                if d1 != PointSide::On {
                    result.push(*current);
                }
            }
        }
    }

    if poly_in_plane {
        poly.to_vec()
    } else {
        result
    }
}

/// Clip a polygon against all six faces of an axis-aligned box.
///
/// The box must be axis-aligned (identity rotation): its keypoint 1 is the
/// min corner and keypoint 8 the max corner. Each axis clips against the
/// min plane with normal +1 and the max plane with normal -1, feeding each
/// result into the next clip.
pub fn clip_polygon_to_box(aligned: &OrientedBox, poly: Vec<Point3>) -> Vec<Point3> {
    let min_corner = aligned.vertices()[1];
    let max_corner = aligned.vertices()[8];
    let mut poly = poly;
    for axis in 0..3 {
        poly = clip_polygon_to_plane(&poly, &min_corner, 1.0, axis);
        poly = clip_polygon_to_plane(&poly, &max_corner, -1.0, axis);
    }
    poly
}

/// Collect the intersection vertices of box `b` against box `a`.
///
/// Maps both boxes into `a`'s local frame (where `a` is axis-aligned and
/// centered at the origin), clips each face polygon of `b` against `a`,
/// and gathers any of `b`'s keypoints that `a` contains. All surviving
/// points are mapped back to world coordinates. Duplicates are allowed;
/// the consumer is a convex hull, for which order and multiplicity are
/// irrelevant.
///
/// Clipping `b`'s boundary against `a` only recovers the part of `b`'s
/// surface inside `a`; callers must also invoke the symmetric direction
/// and concatenate both point sets to cover the intersection polyhedron.
pub fn compute_intersection_points(
    a: &OrientedBox,
    b: &OrientedBox,
) -> Result<Vec<Point3>, ClipError> {
    let inv = a
        .transform()
        .inverse()
        .ok_or(ClipError::SingularTransform)?;
    let a_aligned = a.apply_rigid_transform(&inv);
    let b_local = b.apply_rigid_transform(&inv);

    let to_world =
        |p: &Point3| -> Point3 { Point3::from(a.rotation() * p.coords + a.translation()) };

    let mut points = Vec::new();
    for face in &FACES {
        let poly: Vec<Point3> = face.iter().map(|&vi| b_local.vertices()[vi]).collect();
        for point in clip_polygon_to_box(&a_aligned, poly) {
            points.push(to_world(&point));
        }
    }

    for keypoint in b_local.vertices() {
        if a_aligned.contains(keypoint) {
            points.push(to_world(keypoint));
        }
    }

    Ok(points)
}
