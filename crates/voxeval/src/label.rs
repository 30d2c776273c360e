//! Input label types for cuboid detections.
//!
//! Mirrors the shape detection pipelines hand over: a rotation (either an
//! axis-angle vector or a full matrix), a center location and per-axis
//! dimensions, as produced by annotation formats and model outputs.

use serde::{Deserialize, Serialize};
use voxeval_box::OrientedBox;
use voxeval_math::{Mat3, Vec3};

/// Rotation of a cuboid label.
///
/// A 3-element array is an axis-angle rotation vector; a 3x3 nested array
/// is a row-major rotation matrix. Untagged, so JSON annotations carry the
/// rotation in either shape and the element count disambiguates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rotation {
    /// Axis-angle rotation vector (axis direction, norm = angle in radians).
    Vector([f64; 3]),
    /// Row-major orthonormal 3x3 rotation matrix.
    Matrix([[f64; 3]; 3]),
}

/// An oriented cuboid detection label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    /// Box orientation.
    pub rotation: Rotation,
    /// Box center in world coordinates.
    pub location: [f64; 3],
    /// Per-axis extents; all components expected non-negative.
    pub dimensions: [f64; 3],
}

impl Cuboid {
    /// Build the geometric box for this label.
    pub fn to_box(&self) -> OrientedBox {
        let location = Vec3::from(self.location);
        let scale = Vec3::from(self.dimensions);
        match self.rotation {
            Rotation::Vector(v) => OrientedBox::from_rotvec(Vec3::from(v), location, scale),
            Rotation::Matrix(m) => {
                let rotation = Mat3::new(
                    m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1],
                    m[2][2],
                );
                OrientedBox::from_rotation(rotation, location, scale)
            }
        }
    }
}

impl From<&Cuboid> for OrientedBox {
    fn from(label: &Cuboid) -> Self {
        label.to_box()
    }
}
