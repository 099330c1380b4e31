use crate::arm::ArmState;
use crate::command::{PrimitiveCommand, TrajectoryPlan};

/// Vertical offset between the gripper's grasp center and the wrist, in meters.
pub const GRASP_CENTER_OFFSET_M: f64 = 0.168;

/// Lift joint reading at the arm's vertical zero, in meters.
pub const LIFT_ZERO_OFFSET_M: f64 = 0.21;

/// Height of the lift carriage above the base frame origin, in meters.
pub const ARM_VERTICAL_OFFSET_M: f64 = 0.41;

/// Radial standoff between grasp center and wrist joint, in meters.
pub const STANDOFF_OFFSET_M: f64 = 0.205;

/// Lateral offset between the base frame origin and the arm rail, in meters.
pub const BODY_OFFSET_M: f64 = 0.254;

/// Empirical extension correction, in meters.
pub const EXTENSION_CORRECTION_M: f64 = 0.083;

/// Gripper aperture delta that fully opens the gripper.
pub const GRIPPER_OPEN_SCALAR: f64 = 100.0;

/// Closed-form grasp planner over an object position and the current arm state.
///
/// All targets are deltas relative to the current joint readings except the
/// wrist, which is commanded to an absolute yaw. Closing the gripper is left
/// to the caller once the trajectory has been executed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveGraspPlanner;

impl NaiveGraspPlanner {
    /// Create the planner.
    pub fn new() -> Self {
        Self
    }

    /// Relative lift delta bringing the grasp center to the object height.
    pub fn lift_target(&self, object_position: &[f64; 3], lift_m: f64) -> f64 {
        object_position[2] + GRASP_CENTER_OFFSET_M - (lift_m - LIFT_ZERO_OFFSET_M)
            - ARM_VERTICAL_OFFSET_M
    }

    /// Relative extension delta bringing the wrist over the object.
    pub fn arm_extension_target(&self, object_position: &[f64; 3], extension_m: f64) -> f64 {
        -object_position[1] - STANDOFF_OFFSET_M - BODY_OFFSET_M - extension_m
            + EXTENSION_CORRECTION_M
    }

    /// Base yaw facing the object, in degrees.
    ///
    /// Negated because the base rotates clockwise-positive.
    pub fn base_rotation_target(&self, object_position: &[f64; 3]) -> f64 {
        -object_position[1].atan2(object_position[0]).to_degrees()
    }

    /// Plan a grasp trajectory toward an object position in the base frame.
    ///
    /// Emits exactly five commands, in order: open the gripper, lift, rotate
    /// the base, extend the arm, zero the wrist.
    pub fn plan(&self, object_position: &[f64; 3], arm: &ArmState) -> TrajectoryPlan {
        TrajectoryPlan::new(vec![
            PrimitiveCommand::MoveGrasp {
                move_scalar: GRIPPER_OPEN_SCALAR,
            },
            PrimitiveCommand::MoveArmBase {
                move_scalar: self.lift_target(object_position, arm.lift_m),
            },
            PrimitiveCommand::RotateAgent {
                move_scalar: self.base_rotation_target(object_position) - 90.0,
            },
            PrimitiveCommand::MoveArmExtension {
                move_scalar: self.arm_extension_target(object_position, arm.extension_m),
            },
            PrimitiveCommand::WristTo { move_to: 0.0 },
        ])
    }
}
