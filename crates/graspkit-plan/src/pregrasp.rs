use graspkit_3d::Pose;

use crate::arm::ArmState;
use crate::command::{PrimitiveCommand, TrajectoryPlan};
use crate::naive::{NaiveGraspPlanner, GRIPPER_OPEN_SCALAR};

/// Lift overshoot applied while approaching, lowered again in the descend
/// phase, in meters.
pub const LIFT_CLEARANCE_M: f64 = 0.1;

/// Extra extension toward the pregrasp waypoint, in meters.
pub const ARM_STANDOFF_M: f64 = 0.205;

/// A two-phase plan for a planar target approached face-on.
///
/// The phases are dispatched sequentially; the caller closes the gripper
/// between or after them.
#[derive(Debug, Clone, PartialEq)]
pub struct PregraspPlan {
    /// Phase 1: move the wrist to the pregrasp waypoint, cleared above the
    /// target height.
    pub approach: TrajectoryPlan,
    /// Phase 2: lower the lift onto the target's true height.
    pub descend: TrajectoryPlan,
}

/// Planner for targets with a known face normal, such as a doorknob.
///
/// Drives the wrist to a standoff waypoint along the surface normal and only
/// then descends, so the approach clears the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PregraspPlanner {
    naive: NaiveGraspPlanner,
}

impl PregraspPlanner {
    /// Create the planner.
    pub fn new() -> Self {
        Self {
            naive: NaiveGraspPlanner::new(),
        }
    }

    /// Compute the standoff waypoint along the target's face normal.
    ///
    /// The waypoint is the object pose with its translation shifted by
    /// `standoff_m * normal`.
    pub fn approach_pose(object: &Pose, normal: &[f64; 3], standoff_m: f64) -> Pose {
        object.translated(&[
            standoff_m * normal[0],
            standoff_m * normal[1],
            standoff_m * normal[2],
        ])
    }

    /// Plan the two-phase grasp through a pregrasp waypoint.
    ///
    /// Phase 1 opens the gripper, lifts toward the waypoint height plus the
    /// clearance, rotates the base toward the waypoint azimuth, extends the
    /// arm toward the waypoint's radial position plus the arm standoff, and
    /// yaws the wrist toward the object. The base heading follows the
    /// approach direction, not the object azimuth. Phase 2 lowers the lift
    /// by exactly the clearance.
    pub fn plan(&self, object: &Pose, pregrasp: &Pose, arm: &ArmState) -> PregraspPlan {
        let object_position = object.position();
        let pregrasp_position = pregrasp.position();

        let x_delta = object_position[0] - pregrasp_position[0];
        let y_delta = object_position[1] - pregrasp_position[1];
        // the waypoint frame's x axis points along the robot's -y
        let wrist_yaw = (-x_delta).atan2(-y_delta).to_degrees();

        let approach = TrajectoryPlan::new(vec![
            PrimitiveCommand::MoveGrasp {
                move_scalar: GRIPPER_OPEN_SCALAR,
            },
            PrimitiveCommand::MoveArmBase {
                move_scalar: LIFT_CLEARANCE_M
                    + self.naive.lift_target(&pregrasp_position, arm.lift_m),
            },
            PrimitiveCommand::RotateAgent {
                move_scalar: self.naive.base_rotation_target(&pregrasp_position) - 90.0,
            },
            PrimitiveCommand::MoveArmExtension {
                move_scalar: ARM_STANDOFF_M
                    + self
                        .naive
                        .arm_extension_target(&pregrasp_position, arm.extension_m),
            },
            PrimitiveCommand::WristTo { move_to: wrist_yaw },
        ]);

        let descend = TrajectoryPlan::new(vec![PrimitiveCommand::MoveArmBase {
            move_scalar: -LIFT_CLEARANCE_M,
        }]);

        PregraspPlan { approach, descend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn object_pose() -> Pose {
        Pose::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.1, -0.5, 0.9],
        )
    }

    #[test]
    fn test_approach_pose_offsets_along_normal() {
        let object = object_pose();
        let normal = [0.0, 1.0, 0.0];

        let pregrasp = PregraspPlanner::approach_pose(&object, &normal, 0.205);

        assert_relative_eq!(pregrasp.translation[0], 0.1);
        assert_relative_eq!(pregrasp.translation[1], -0.295);
        assert_relative_eq!(pregrasp.translation[2], 0.9);
        assert_eq!(pregrasp.rotation, object.rotation);
    }

    #[test]
    fn test_two_phase_plan() {
        let planner = PregraspPlanner::new();
        let object = object_pose();
        let pregrasp = PregraspPlanner::approach_pose(&object, &[0.0, 1.0, 0.0], 0.205);
        let arm = ArmState {
            lift_m: 0.3,
            extension_m: 0.1,
            wrist_degrees: 0.0,
        };

        let plan = planner.plan(&object, &pregrasp, &arm);

        assert_eq!(plan.approach.len(), 5);
        assert_eq!(plan.descend.len(), 1);

        let commands = plan.approach.commands();
        assert!(matches!(
            commands[0],
            PrimitiveCommand::MoveGrasp { move_scalar } if move_scalar == GRIPPER_OPEN_SCALAR
        ));

        // the lift clears the waypoint height by the clearance
        let expected_lift = LIFT_CLEARANCE_M
            + planner
                .naive
                .lift_target(&pregrasp.position(), arm.lift_m);
        assert!(matches!(
            commands[1],
            PrimitiveCommand::MoveArmBase { move_scalar }
                if (move_scalar - expected_lift).abs() < 1e-12
        ));

        // base heading follows the waypoint azimuth
        let expected_rotation =
            planner.naive.base_rotation_target(&pregrasp.position()) - 90.0;
        assert!(matches!(
            commands[2],
            PrimitiveCommand::RotateAgent { move_scalar }
                if (move_scalar - expected_rotation).abs() < 1e-12
        ));

        // the object sits at -y of the waypoint, so the wrist yaw is zero
        assert!(matches!(
            commands[4],
            PrimitiveCommand::WristTo { move_to } if move_to.abs() < 1e-12
        ));

        // the descend phase undoes exactly the clearance
        assert!(matches!(
            plan.descend.commands()[0],
            PrimitiveCommand::MoveArmBase { move_scalar } if move_scalar == -LIFT_CLEARANCE_M
        ));
    }

    #[test]
    fn test_wrist_yaw_toward_lateral_offset() {
        let planner = PregraspPlanner::new();
        let object = object_pose();
        // waypoint offset diagonally: equal parts -x and +y of the object
        let pregrasp = object.translated(&[0.1, 0.205, 0.0]);
        let arm = ArmState::default();

        let plan = planner.plan(&object, &pregrasp, &arm);
        let expected = (0.1f64).atan2(0.205).to_degrees();
        assert!(matches!(
            plan.approach.commands()[4],
            PrimitiveCommand::WristTo { move_to } if (move_to - expected).abs() < 1e-9
        ));
    }
}
