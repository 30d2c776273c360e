//! Error types for cuboid IoU computation.

use thiserror::Error;
use voxeval_clip::ClipError;
use voxeval_hull::HullError;

/// Errors that can occur while scoring a cuboid pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IouError {
    /// The intersection solver failed to invert a box transform.
    #[error(transparent)]
    Clip(#[from] ClipError),

    /// The intersection point set was non-empty but spans no 3D volume
    /// (e.g. two boxes touching exactly along a face or edge).
    #[error(transparent)]
    Hull(#[from] HullError),
}
