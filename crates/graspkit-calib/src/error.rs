/// An error type for the calibration module.
#[derive(thiserror::Error, Debug)]
pub enum CalibrationError {
    /// Error when the camera source identifier is not one of the known cameras.
    #[error("unknown camera source \"{0}\", expected one of: stretch, arm205, arm188")]
    UnknownCameraSource(String),
}
