/// An error type for the 3d module.
#[derive(thiserror::Error, Debug)]
pub enum Point3dError {
    /// Error when an operation requires a non-empty point cloud.
    #[error("point cloud is empty")]
    EmptyPointCloud,

    /// Error when a buffer length does not match the expected size.
    #[error("buffer length ({0}) does not match the expected size ({1})")]
    InvalidShape(usize, usize),

    /// Error when a rotation axis has zero length.
    #[error("cannot compute a rotation from a zero-length axis")]
    DegenerateAxis,
}
