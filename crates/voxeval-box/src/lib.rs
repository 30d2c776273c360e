#![warn(missing_docs)]

//! Oriented cuboid representation for the voxeval kernel.
//!
//! An [`OrientedBox`] is a rotated, scaled, translated cuboid described by
//! 9 keypoints: the center plus the 8 corners. The corner numbering, face
//! table and edge table follow a fixed convention shared with the rest of
//! the kernel and with downstream visualization consumers.

use voxeval_math::{rotation_from_rotvec, Mat3, Point3, Transform, Vec3};

/// Number of keypoints per box: the center plus 8 corners.
pub const NUM_KEYPOINTS: usize = 9;

/// The 6 faces as quadruples of keypoint indices.
///
/// The vertices of each face are ordered by the left-hand rule, so the
/// cross product of the first two edge vectors points inward the box.
/// Order: +x, -x, +y (top), -y, +z (front), -z.
pub const FACES: [[usize; 4]; 6] = [
    [5, 6, 8, 7], // +x on yz plane
    [1, 3, 4, 2], // -x on yz plane
    [3, 7, 8, 4], // +y on xz plane = top
    [1, 2, 6, 5], // -y on xz plane
    [2, 4, 8, 6], // +z on xy plane = front
    [1, 5, 7, 3], // -z on xy plane
];

/// The 12 edges as keypoint index pairs, grouped by axis.
///
/// Not used by the intersection path; retained for wireframe consumers.
pub const EDGES: [[usize; 2]; 12] = [
    [1, 5],
    [2, 6],
    [3, 7],
    [4, 8], // lines along x-axis
    [1, 3],
    [5, 7],
    [2, 4],
    [6, 8], // lines along y-axis
    [1, 2],
    [3, 4],
    [5, 6],
    [7, 8], // lines along z-axis
];

/// Index into [`FACES`] of the front (+z) face.
pub const FRONT_FACE_ID: usize = 4;

/// Index into [`FACES`] of the top (+y) face.
pub const TOP_FACE_ID: usize = 2;

/// A rotated, scaled, translated cuboid.
///
/// Constructed once from its parameters and immutable thereafter; the
/// keypoints are always derived from `(rotation, translation, scale)` and
/// never mutated independently. Transforming a box produces a new one.
#[derive(Debug, Clone)]
pub struct OrientedBox {
    rotation: Mat3,
    translation: Vec3,
    scale: Vec3,
    volume: f64,
    transform: Transform,
    vertices: [Point3; NUM_KEYPOINTS],
}

impl OrientedBox {
    /// Build a box from an orthonormal rotation matrix, center location and
    /// per-axis scale.
    ///
    /// Scale components are expected non-negative; a zero component yields
    /// a zero-volume box. Neither is validated here.
    pub fn from_rotation(rotation: Mat3, location: Vec3, scale: Vec3) -> Self {
        let transform = Transform::from_parts(rotation, location);
        let volume = scale.x * scale.y * scale.z;

        let local = Self::scaled_axis_aligned_keypoints(&scale);
        let mut vertices = [Point3::origin(); NUM_KEYPOINTS];
        for (vertex, offset) in vertices.iter_mut().zip(local.iter()) {
            *vertex = Point3::from(rotation * offset + location);
        }

        Self {
            rotation,
            translation: location,
            scale,
            volume,
            transform,
            vertices,
        }
    }

    /// Build a box from a 3-element axis-angle rotation vector.
    pub fn from_rotvec(rotvec: Vec3, location: Vec3, scale: Vec3) -> Self {
        Self::from_rotation(rotation_from_rotvec(rotvec), location, scale)
    }

    /// Keypoint offsets of an axis-aligned box of the given scale, centered
    /// at the origin. Index 0 is the center; 1..=8 the corners in the fixed
    /// numbering [`FACES`] and [`EDGES`] refer to.
    fn scaled_axis_aligned_keypoints(scale: &Vec3) -> [Vec3; NUM_KEYPOINTS] {
        let x = scale.x / 2.0;
        let y = scale.y / 2.0;
        let z = scale.z / 2.0;
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-x, -y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(-x, y, -z),
            Vec3::new(-x, y, z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, -z),
            Vec3::new(x, y, z),
        ]
    }

    /// The orthonormal rotation matrix.
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// The box center.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Per-axis extents.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Box volume, the product of the scale components.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// The rigid transform composed from rotation and translation.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The 9 keypoints: center at index 0, corners at 1..=8.
    pub fn vertices(&self) -> &[Point3; NUM_KEYPOINTS] {
        &self.vertices
    }

    /// Test whether a world-frame point lies inside the box.
    ///
    /// The point is mapped into the box's local frame through the inverse
    /// transform and compared against the half-extents per axis. Boundary
    /// points count as inside. A singular transform contains nothing; it
    /// cannot arise for orthonormal rotations.
    pub fn contains(&self, point: &Point3) -> bool {
        let Some(inv) = self.transform.inverse() else {
            return false;
        };
        self.contains_local(&inv.apply_point(point))
    }

    /// Test a point already expressed in the box's local (un-rotated,
    /// un-translated) frame against the half-extents.
    pub fn contains_local(&self, local: &Point3) -> bool {
        for i in 0..3 {
            if local[i].abs() > self.scale[i] / 2.0 {
                return false;
            }
        }
        true
    }

    /// Apply a rigid transform, producing a new box.
    ///
    /// The new rotation is `t`'s rotation block times this rotation, the new
    /// translation is `t`'s translation plus the rotated old translation,
    /// and the scale is unchanged.
    pub fn apply_rigid_transform(&self, t: &Transform) -> OrientedBox {
        let r = t.rotation_part();
        OrientedBox::from_rotation(
            r * self.rotation,
            t.translation_part() + r * self.translation,
            self.scale,
        )
    }

    /// Center point of a face given its [`FACES`] entry.
    fn face_center(&self, face: &[usize; 4]) -> Point3 {
        let mut sum = Vec3::zeros();
        for &vi in face {
            sum += self.vertices[vi].coords;
        }
        Point3::from(sum / face.len() as f64)
    }

    /// Inward normal of a face given its [`FACES`] entry and center.
    fn face_normal(&self, face: &[usize; 4], center: &Point3) -> Vec3 {
        let v1 = self.vertices[face[0]] - center;
        let v2 = self.vertices[face[1]] - center;
        v1.cross(&v2)
    }

    /// The ground plane under the box as `(center, normal)`.
    ///
    /// Among the three independent face orientations, picks the face whose
    /// normal is best aligned with the gravity direction, then takes
    /// whichever of that face and its parallel opposite sits lower along
    /// the gravity axis. Gravity axis 1 (y) is the usual convention.
    pub fn ground_plane(&self, gravity_axis: usize) -> (Point3, Vec3) {
        let mut gravity = Vec3::zeros();
        gravity[gravity_axis] = 1.0;

        let mut ground_face_id = 0;
        let mut ground_error = 10.0;
        for id in [0, 2, 4] {
            let face = &FACES[id];
            let center = self.face_center(face);
            let normal = self.face_normal(face, &center);
            let err = gravity.cross(&normal).norm();
            if err < ground_error {
                ground_error = err;
                ground_face_id = id;
            }
        }

        let face = &FACES[ground_face_id];
        let mut center = self.face_center(face);
        let mut normal = self.face_normal(face, &center);

        // The parallel opposite of face 0 is 1, of 2 is 3, of 4 is 5.
        let parallel = &FACES[ground_face_id + 1];
        let parallel_center = self.face_center(parallel);
        if parallel_center[gravity_axis] < center[gravity_axis] {
            normal = self.face_normal(parallel, &parallel_center);
            center = parallel_center;
        }
        (center, normal)
    }
}
