use serde::{Deserialize, Serialize};

/// A primitive motion command for the command dispatcher.
///
/// The serialized form is `{"action": <name>, "args": {...}}`, the exact
/// shape the dispatcher consumes. Rotations are clockwise-positive, matching
/// the robot's base and wrist joints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "args")]
pub enum PrimitiveCommand {
    /// Relative gripper aperture delta.
    MoveGrasp {
        /// The aperture delta.
        move_scalar: f64,
    },
    /// Relative lift delta in meters.
    MoveArmBase {
        /// The lift delta in meters.
        move_scalar: f64,
    },
    /// Relative base yaw delta in degrees, clockwise-positive.
    RotateAgent {
        /// The yaw delta in degrees.
        move_scalar: f64,
    },
    /// Relative arm extension delta in meters.
    MoveArmExtension {
        /// The extension delta in meters.
        move_scalar: f64,
    },
    /// Absolute wrist yaw target in degrees, clockwise-positive.
    WristTo {
        /// The yaw target in degrees.
        move_to: f64,
    },
}

/// An ordered sequence of primitive commands.
///
/// The order is the execution order; there is no implicit parallelism.
/// Serializes as `{"action": [...]}` for the dispatcher.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryPlan {
    #[serde(rename = "action")]
    commands: Vec<PrimitiveCommand>,
}

impl TrajectoryPlan {
    /// Create a plan from an ordered command sequence.
    pub fn new(commands: Vec<PrimitiveCommand>) -> Self {
        Self { commands }
    }

    /// The commands in execution order.
    pub fn commands(&self) -> &[PrimitiveCommand] {
        &self.commands
    }

    /// Append a command to the plan.
    pub fn push(&mut self, command: PrimitiveCommand) {
        self.commands.push(command);
    }

    /// The number of commands in the plan.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the plan contains no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for TrajectoryPlan {
    type Item = PrimitiveCommand;
    type IntoIter = std::vec::IntoIter<PrimitiveCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a TrajectoryPlan {
    type Item = &'a PrimitiveCommand;
    type IntoIter = std::slice::Iter<'a, PrimitiveCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_shape() -> Result<(), serde_json::Error> {
        let command = PrimitiveCommand::MoveGrasp { move_scalar: 100.0 };
        assert_eq!(
            serde_json::to_value(command)?,
            json!({"action": "MoveGrasp", "args": {"move_scalar": 100.0}})
        );

        let command = PrimitiveCommand::WristTo { move_to: -12.5 };
        assert_eq!(
            serde_json::to_value(command)?,
            json!({"action": "WristTo", "args": {"move_to": -12.5}})
        );
        Ok(())
    }

    #[test]
    fn test_plan_wire_shape() -> Result<(), serde_json::Error> {
        let plan = TrajectoryPlan::new(vec![
            PrimitiveCommand::MoveGrasp { move_scalar: 100.0 },
            PrimitiveCommand::MoveArmBase { move_scalar: 0.25 },
        ]);
        assert_eq!(
            serde_json::to_value(&plan)?,
            json!({"action": [
                {"action": "MoveGrasp", "args": {"move_scalar": 100.0}},
                {"action": "MoveArmBase", "args": {"move_scalar": 0.25}},
            ]})
        );
        Ok(())
    }

    #[test]
    fn test_plan_roundtrip() -> Result<(), serde_json::Error> {
        let plan = TrajectoryPlan::new(vec![
            PrimitiveCommand::RotateAgent { move_scalar: -90.0 },
            PrimitiveCommand::MoveArmExtension { move_scalar: 0.1 },
        ]);
        let json = serde_json::to_string(&plan)?;
        let decoded: TrajectoryPlan = serde_json::from_str(&json)?;
        assert_eq!(decoded, plan);
        Ok(())
    }
}
