#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Arm telemetry types.
pub mod arm;

/// Primitive command vocabulary and trajectory plans.
pub mod command;

/// The closed-form naive grasp planner.
pub mod naive;

/// The two-phase pregrasp planner for planar targets.
pub mod pregrasp;

/// The reachability-constrained planner.
pub mod reachability;

pub use arm::ArmState;
pub use command::{PrimitiveCommand, TrajectoryPlan};
pub use naive::NaiveGraspPlanner;
pub use pregrasp::{PregraspPlan, PregraspPlanner};
pub use reachability::{ReachabilityPlanner, ReachabilityResult};
