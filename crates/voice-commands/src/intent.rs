use serde::{Deserialize, Serialize};
use sport_client::{SportCommand, Velocity};
use std::fmt;

/// What a spoken command asks the robot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Stand,
    Sit,
    StandDown,
    Stretch,
    Move,
    Stop,
    Balance,
    Recover,
    Unknown,
}

impl Intent {
    /// Every intent that maps to a command, in default priority order.
    pub const ACTIONABLE: [Intent; 8] = [
        Intent::Stand,
        Intent::Sit,
        Intent::StandDown,
        Intent::Stretch,
        Intent::Move,
        Intent::Stop,
        Intent::Balance,
        Intent::Recover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Stand => "stand",
            Intent::Sit => "sit",
            Intent::StandDown => "stand_down",
            Intent::Stretch => "stretch",
            Intent::Move => "move",
            Intent::Stop => "stop",
            Intent::Balance => "balance",
            Intent::Recover => "recover",
            Intent::Unknown => "unknown",
        }
    }

    /// The sport command performed for this intent. `Move` walks forward at
    /// `forward_speed` m/s; `Unknown` maps to nothing.
    pub fn command(&self, forward_speed: f32) -> Option<SportCommand> {
        let command = match self {
            Intent::Stand => SportCommand::StandUp,
            Intent::Sit => SportCommand::Sit,
            Intent::StandDown => SportCommand::StandDown,
            Intent::Stretch => SportCommand::Stretch,
            Intent::Move => SportCommand::Move(Velocity::new(forward_speed, 0.0, 0.0)),
            Intent::Stop => SportCommand::StopMove,
            Intent::Balance => SportCommand::BalanceStand,
            Intent::Recover => SportCommand::RecoveryStand,
            Intent::Unknown => return None,
        };
        Some(command)
    }

    /// Operator-facing line logged before the action runs.
    pub fn announcement(&self) -> &'static str {
        match self {
            Intent::Stand => "Standing up...",
            Intent::Sit => "Sitting down...",
            Intent::StandDown => "Standing down...",
            Intent::Stretch => "Stretching...",
            Intent::Move => "Moving forward...",
            Intent::Stop => "Stopping...",
            Intent::Balance => "Balancing...",
            Intent::Recover => "Recovering...",
            Intent::Unknown => "Unknown command",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
