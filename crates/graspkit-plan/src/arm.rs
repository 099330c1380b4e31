use serde::{Deserialize, Serialize};

/// A snapshot of the arm's joint telemetry.
///
/// Owned by the robot telemetry collaborator; planners only ever read it.
/// A planning call never mutates the caller's record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmState {
    /// Vertical lift joint position in meters.
    pub lift_m: f64,
    /// Telescoping arm extension in meters.
    pub extension_m: f64,
    /// Wrist yaw in degrees, clockwise-positive.
    pub wrist_degrees: f64,
}
