#![warn(missing_docs)]

//! Exact oriented-cuboid IoU for 3D detection evaluation.
//!
//! Scores how well a predicted 3D box matches a ground-truth box by
//! computing the exact intersection volume of the two cuboids: each box's
//! faces are clipped against the other box, the surviving vertices and
//! contained keypoints form the intersection polyhedron, and its convex
//! hull volume feeds the IoU ratio. A crowd variant scores against the
//! predicted volume alone.
//!
//! # Example
//!
//! ```
//! use voxeval::{compute_cuboid_iou, Cuboid, Rotation};
//!
//! let gt = Cuboid {
//!     rotation: Rotation::Vector([0.0, 0.0, 0.0]),
//!     location: [0.0, 0.0, 0.0],
//!     dimensions: [1.0, 1.0, 1.0],
//! };
//! let pred = Cuboid {
//!     rotation: Rotation::Vector([0.0, 0.0, 0.0]),
//!     location: [0.5, 0.0, 0.0],
//!     dimensions: [1.0, 1.0, 1.0],
//! };
//! let iou = compute_cuboid_iou(&gt, &pred, false).unwrap();
//! assert!((iou - 1.0 / 3.0).abs() < 1e-9);
//! ```

pub use voxeval_box;
pub use voxeval_clip;
pub use voxeval_hull;
pub use voxeval_math;

mod error;
mod label;

pub use error::IouError;
pub use label::{Cuboid, Rotation};
pub use voxeval_box::{OrientedBox, EDGES, FACES, FRONT_FACE_ID, NUM_KEYPOINTS, TOP_FACE_ID};

use rayon::prelude::*;
use voxeval_clip::compute_intersection_points;
use voxeval_hull::convex_hull_volume;
use voxeval_math::safe_divide;

/// IoU between a ground-truth and a predicted cuboid label, in `[0, 1]`.
///
/// When `gt_crowd` is set, the ground truth marks an ambiguous crowd
/// region and the union is the predicted volume alone, so a prediction
/// covering any subset of the crowd region is not penalized for the rest.
///
/// Boxes that touch without overlapping volume produce an intersection
/// point set with no 3D extent and surface as [`IouError::Hull`]; fully
/// disjoint boxes yield `Ok(0.0)`.
pub fn compute_cuboid_iou(gt: &Cuboid, pred: &Cuboid, gt_crowd: bool) -> Result<f64, IouError> {
    compute_box_iou(&gt.to_box(), &pred.to_box(), gt_crowd)
}

/// IoU between two already-constructed boxes; see [`compute_cuboid_iou`].
pub fn compute_box_iou(
    gt: &OrientedBox,
    pred: &OrientedBox,
    gt_crowd: bool,
) -> Result<f64, IouError> {
    // Clipping one box's boundary against the other only recovers half of
    // the intersection polyhedron's vertices; both directions together
    // cover it.
    let mut points = compute_intersection_points(gt, pred)?;
    points.extend(compute_intersection_points(pred, gt)?);

    if points.is_empty() {
        return Ok(0.0);
    }

    let intersection_volume = convex_hull_volume(&points)?;
    let union = if gt_crowd {
        pred.volume()
    } else {
        gt.volume() + pred.volume() - intersection_volume
    };

    Ok(safe_divide(intersection_volume, union).min(1.0))
}

/// Pairwise IoU of every ground truth against every prediction.
///
/// Returns a `gts.len() x preds.len()` matrix; ground-truth rows are
/// scored in parallel. Each pair is independent and side-effect-free, so
/// no coordination beyond the fan-out is needed.
pub fn compute_cuboid_iou_matrix(
    gts: &[Cuboid],
    preds: &[Cuboid],
) -> Result<Vec<Vec<f64>>, IouError> {
    gts.par_iter()
        .map(|gt| {
            let gt_box = gt.to_box();
            preds
                .iter()
                .map(|pred| compute_box_iou(&gt_box, &pred.to_box(), false))
                .collect()
        })
        .collect()
}

/// Pairwise IoU with per-ground-truth crowd flags.
///
/// `gt_crowds` must have one flag per ground truth.
pub fn compute_cuboid_iou_matrix_with_crowd(
    gts: &[Cuboid],
    preds: &[Cuboid],
    gt_crowds: &[bool],
) -> Result<Vec<Vec<f64>>, IouError> {
    assert_eq!(
        gts.len(),
        gt_crowds.len(),
        "one crowd flag is required per ground truth"
    );
    gts.par_iter()
        .zip(gt_crowds.par_iter())
        .map(|(gt, &crowd)| {
            let gt_box = gt.to_box();
            preds
                .iter()
                .map(|pred| compute_box_iou(&gt_box, &pred.to_box(), crowd))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxeval_hull::HullError;

    fn axis_aligned(location: [f64; 3], dimensions: [f64; 3]) -> Cuboid {
        Cuboid {
            rotation: Rotation::Vector([0.0, 0.0, 0.0]),
            location,
            dimensions,
        }
    }

    #[test]
    fn test_self_iou_is_one() {
        let a = Cuboid {
            rotation: Rotation::Vector([0.2, -0.4, 0.1]),
            location: [1.0, 2.0, 3.0],
            dimensions: [2.0, 1.0, 0.5],
        };
        let iou = compute_cuboid_iou(&a, &a, false).unwrap();
        assert!((iou - 1.0).abs() < 1e-9);
        assert!(iou <= 1.0);
    }

    #[test]
    fn test_half_overlap_unit_cubes() {
        let a = axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = axis_aligned([0.5, 0.0, 0.0], [1.0, 1.0, 1.0]);
        // Intersection 0.5, union 1.5.
        let iou = compute_cuboid_iou(&a, &b, false).unwrap();
        assert!((iou - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_boxes_are_zero() {
        let a = axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = axis_aligned([2.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert_eq!(compute_cuboid_iou(&a, &b, false).unwrap(), 0.0);
    }

    #[test]
    fn test_contained_box() {
        let a = axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = axis_aligned([0.0, 0.0, 0.0], [0.5, 0.5, 0.5]);
        // Intersection is all of b, so the ratio reduces to b.vol / a.vol.
        let iou = compute_cuboid_iou(&a, &b, false).unwrap();
        assert!((iou - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry_for_rotated_boxes() {
        let a = Cuboid {
            rotation: Rotation::Vector([0.1, 0.2, 0.3]),
            location: [0.0, 0.0, 0.0],
            dimensions: [2.0, 1.0, 1.0],
        };
        let b = Cuboid {
            rotation: Rotation::Vector([-0.2, 0.1, 0.5]),
            location: [0.5, 0.2, -0.1],
            dimensions: [1.0, 1.5, 0.8],
        };
        let ab = compute_cuboid_iou(&a, &b, false).unwrap();
        let ba = compute_cuboid_iou(&b, &a, false).unwrap();
        assert!(ab > 0.0 && ab < 1.0);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_result_is_clamped() {
        let a = Cuboid {
            rotation: Rotation::Vector([0.7, -0.3, 1.1]),
            location: [-0.2, 0.4, 0.9],
            dimensions: [1.3, 2.1, 0.7],
        };
        let iou = compute_cuboid_iou(&a, &a, false).unwrap();
        assert!(iou >= 0.0);
        assert!(iou <= 1.0);
    }

    #[test]
    fn test_crowd_union_is_pred_volume() {
        let gt = axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let pred = axis_aligned([0.5, 0.0, 0.0], [1.0, 1.0, 1.0]);
        // Intersection 0.5 over pred volume 1.0.
        let iou = compute_cuboid_iou(&gt, &pred, true).unwrap();
        assert!((iou - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_crowd_containing_pred_is_one() {
        let gt = axis_aligned([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let pred = axis_aligned([0.2, 0.1, -0.3], [1.0, 1.0, 1.0]);
        let iou = compute_cuboid_iou(&gt, &pred, true).unwrap();
        assert!((iou - 1.0).abs() < 1e-9);
        // Without the crowd flag the surrounding volume is penalized.
        let plain = compute_cuboid_iou(&gt, &pred, false).unwrap();
        assert!((plain - 1.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_touching_boxes_surface_as_degenerate() {
        // Unit cubes sharing a face: the intersection point set is
        // coplanar and has no volume.
        let a = axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = axis_aligned([1.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(matches!(
            compute_cuboid_iou(&a, &b, false),
            Err(IouError::Hull(HullError::Degenerate(_)))
        ));
    }

    #[test]
    fn test_iou_matrix_matches_scalar() {
        let gts = vec![
            axis_aligned([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            axis_aligned([3.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
        ];
        let preds = vec![
            axis_aligned([0.5, 0.0, 0.0], [1.0, 1.0, 1.0]),
            axis_aligned([3.0, 0.5, 0.0], [2.0, 2.0, 2.0]),
            axis_aligned([10.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        ];
        let matrix = compute_cuboid_iou_matrix(&gts, &preds).unwrap();
        assert_eq!(matrix.len(), 2);
        for (gi, row) in matrix.iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (pi, &value) in row.iter().enumerate() {
                let scalar = compute_cuboid_iou(&gts[gi], &preds[pi], false).unwrap();
                assert!((value - scalar).abs() < 1e-12);
            }
        }
        assert_eq!(matrix[0][2], 0.0);
    }

    #[test]
    fn test_iou_matrix_with_crowd_flags() {
        let gts = vec![
            axis_aligned([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
            axis_aligned([5.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        ];
        let preds = vec![axis_aligned([0.2, 0.1, -0.3], [1.0, 1.0, 1.0])];
        let matrix =
            compute_cuboid_iou_matrix_with_crowd(&gts, &preds, &[true, false]).unwrap();
        assert!((matrix[0][0] - 1.0).abs() < 1e-9);
        assert_eq!(matrix[1][0], 0.0);
    }
}
