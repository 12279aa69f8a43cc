use core::fmt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// Body orientation setpoint in radians, as accepted in pose-control mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Euler {
    pub const NEUTRAL: Euler = Euler {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }
}

impl fmt::Display for Euler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roll={:+.3} pitch={:+.3} yaw={:+.3}",
            self.roll, self.pitch, self.yaw
        )
    }
}

/// Planar body velocity: forward and lateral in m/s, yaw rate in rad/s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
    pub vyaw: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity {
        vx: 0.0,
        vy: 0.0,
        vyaw: 0.0,
    };

    pub fn new(vx: f32, vy: f32, vyaw: f32) -> Self {
        Self { vx, vy, vyaw }
    }
}

/// One call into the sport service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "args")]
pub enum SportCommand {
    /// Enter (`true`) or leave (`false`) pose-control mode
    Pose(bool),
    StandUp,
    Sit,
    StandDown,
    Stretch,
    /// The neutral balanced stance every action returns to
    BalanceStand,
    RecoveryStand,
    Move(Velocity),
    StopMove,
    Euler(Euler),
}

impl SportCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SportCommand::Pose(_) => "Pose",
            SportCommand::StandUp => "StandUp",
            SportCommand::Sit => "Sit",
            SportCommand::StandDown => "StandDown",
            SportCommand::Stretch => "Stretch",
            SportCommand::BalanceStand => "BalanceStand",
            SportCommand::RecoveryStand => "RecoveryStand",
            SportCommand::Move(_) => "Move",
            SportCommand::StopMove => "StopMove",
            SportCommand::Euler(_) => "Euler",
        }
    }
}

impl fmt::Display for SportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SportCommand::Pose(on) => write!(f, "Pose({on})"),
            SportCommand::Move(v) => {
                write!(f, "Move(vx={:+.2}, vy={:+.2}, vyaw={:+.2})", v.vx, v.vy, v.vyaw)
            }
            SportCommand::Euler(e) => write!(f, "Euler({e})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timestamp(pub OffsetDateTime);

/// A command as observed by a recording backend.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub command: SportCommand,
    pub timestamp: Timestamp,
}

#[derive(Clone, Debug)]
pub struct SessionInfo {
    /// Network interface used to reach the robot's control bus (e.g. "eth0")
    pub interface: String,
    pub backend: String,
    /// Per-call timeout configured on the client
    pub timeout: Duration,
}
