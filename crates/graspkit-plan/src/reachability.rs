use crate::arm::ArmState;
use crate::command::{PrimitiveCommand, TrajectoryPlan};
use crate::naive::{NaiveGraspPlanner, GRIPPER_OPEN_SCALAR};

/// Fixed lateral offset of the wrist yaw joint from the base frame, in meters.
pub const WRIST_LATERAL_OFFSET_M: f64 = -0.020;

/// Offset between the extension reading and the wrist along the arm, in meters.
pub const ARM_OFFSET_M: f64 = 0.140;

/// Height of the lift rail base above the base frame origin, in meters.
pub const LIFT_BASE_OFFSET_M: f64 = 0.192;

/// Height of the wrist above the lift carriage, in meters.
pub const LIFT_WRIST_OFFSET_M: f64 = 0.028;

/// Maximum telescoping extension of the arm, in meters.
pub const MAX_EXTENSION_M: f64 = 0.5193114280700684;

/// Maximum wrist yaw magnitude, in degrees.
pub const MAX_WRIST_YAW_DEG: f64 = 75.0;

/// Radial standoff between grasp center and wrist joint, in meters.
pub const GRASP_STANDOFF_M: f64 = 0.205;

/// Acceptable deviation from the standoff radius, in meters.
pub const STANDOFF_TOLERANCE_M: f64 = 0.025;

/// Outcome of a reachability-constrained planning call.
///
/// `Unreachable` is a negative result, not an error: the plan is empty and
/// `feasible` is false when every candidate violates a joint limit. Callers
/// decide whether to reposition the base and retry.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachabilityResult {
    /// Whether a feasible plan was found.
    pub feasible: bool,
    /// The planned trajectory; empty when infeasible.
    pub plan: TrajectoryPlan,
}

/// Grasp planner constrained by the arm's extension and wrist yaw limits.
///
/// Derives the wrist position from telemetry through a fixed kinematic
/// offset chain and searches for an extension change that puts the wrist at
/// the grasp standoff radius from the object.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReachabilityPlanner {
    naive: NaiveGraspPlanner,
}

impl ReachabilityPlanner {
    /// Create the planner.
    pub fn new() -> Self {
        Self {
            naive: NaiveGraspPlanner::new(),
        }
    }

    /// The wrist position in the base frame, derived from telemetry.
    ///
    /// The x coordinate is the fixed lateral offset, y follows the arm
    /// extension, and z follows the lift.
    pub fn wrist_position(&self, arm: &ArmState) -> [f64; 3] {
        [
            WRIST_LATERAL_OFFSET_M,
            -(arm.extension_m + ARM_OFFSET_M),
            arm.lift_m + LIFT_BASE_OFFSET_M + LIFT_WRIST_OFFSET_M,
        ]
    }

    /// Plan a grasp toward an object position, or report it unreachable.
    ///
    /// When the wrist already sits within tolerance of the standoff radius,
    /// no extension change is needed and a three-command plan is emitted.
    /// Otherwise candidate extension changes are solved on the arm's
    /// extension axis and checked against the joint limits in order, nearer
    /// the body first. The search works on local candidate state only; the
    /// caller's telemetry record is never modified.
    pub fn plan(&self, object_position: &[f64; 3], arm: &ArmState) -> ReachabilityResult {
        let wrist = self.wrist_position(arm);
        log::debug!("wrist position in base frame: {wrist:?}");

        let x_delta = object_position[0] - wrist[0];
        let y_delta = object_position[1] - wrist[1];
        let planar_distance = (x_delta * x_delta + y_delta * y_delta).sqrt();

        if (planar_distance - GRASP_STANDOFF_M).abs() <= STANDOFF_TOLERANCE_M {
            // already at the standoff radius, only the wrist and lift move
            let wrist_yaw = (-x_delta).atan2(-y_delta).to_degrees();
            let plan = TrajectoryPlan::new(vec![
                PrimitiveCommand::MoveGrasp {
                    move_scalar: GRIPPER_OPEN_SCALAR,
                },
                PrimitiveCommand::WristTo { move_to: wrist_yaw },
                PrimitiveCommand::MoveArmBase {
                    move_scalar: self.naive.lift_target(object_position, arm.lift_m),
                },
            ]);
            return ReachabilityResult {
                feasible: true,
                plan,
            };
        }

        for y_candidate in extension_candidates(x_delta, y_delta, GRASP_STANDOFF_M) {
            let required = -y_candidate;
            let extension = arm.extension_m + required;
            if extension <= 0.0 || extension > MAX_EXTENSION_M {
                log::debug!("candidate extension {extension:.4} m outside joint range");
                continue;
            }

            // lateral offset as seen from the wrist after extending
            let y_after = -(y_delta + required).abs();
            let wrist_yaw = (-x_delta).atan2(-y_after).to_degrees();
            if wrist_yaw.abs() >= MAX_WRIST_YAW_DEG {
                log::debug!("candidate wrist yaw {wrist_yaw:.1} deg beyond limit");
                continue;
            }

            let plan = TrajectoryPlan::new(vec![
                PrimitiveCommand::MoveGrasp {
                    move_scalar: GRIPPER_OPEN_SCALAR,
                },
                PrimitiveCommand::WristTo { move_to: wrist_yaw },
                PrimitiveCommand::MoveArmExtension {
                    move_scalar: required,
                },
                PrimitiveCommand::MoveArmBase {
                    move_scalar: self.naive.lift_target(object_position, arm.lift_m),
                },
            ]);
            return ReachabilityResult {
                feasible: true,
                plan,
            };
        }

        ReachabilityResult {
            feasible: false,
            plan: TrajectoryPlan::default(),
        }
    }
}

/// Points on the arm's extension axis at `radius` from the projected object.
///
/// Solves `x_delta^2 + (y - y_delta)^2 = radius^2` for `y` on the axis
/// `x = 0`: `y = y_delta +- sqrt(radius^2 - x_delta^2)`. Returns the larger
/// root first (closer to the body); an empty vector when the discriminant is
/// negative; a single root when the circle is tangent to the axis.
pub fn extension_candidates(x_delta: f64, y_delta: f64, radius: f64) -> Vec<f64> {
    let discriminant = radius * radius - x_delta * x_delta;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let offset = discriminant.sqrt();
    if offset == 0.0 {
        return vec![y_delta];
    }
    vec![y_delta + offset, y_delta - offset]
}
