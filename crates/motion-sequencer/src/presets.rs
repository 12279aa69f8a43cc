//! The built-in emotion routines

use crate::{
    ActionTiming, AxisDrive, Choreography, Cue, Finale, LeanSequence, LeanStep, Posture, Routine,
    WiggleProfile,
};
use audio_cue::CueLibrary;
use sport_client::{Euler, SportCommand, Velocity};
use std::path::PathBuf;
use std::time::Duration;

const POSE_SETTLE: Duration = Duration::from_millis(300);

/// Total lean time the sing routine allows before collapsing.
pub const SING_CAP: Duration = Duration::from_secs(39);

/// Yaw rate for turning in place, rad/s.
pub const TURN_RATE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

/// Chatty wiggle: every axis redrawn every 5 ticks while a random clip plays.
pub fn talk(cue_dir: impl Into<PathBuf>) -> Routine {
    Routine {
        name: "talk".to_string(),
        posture: Posture::PoseMode {
            settle: POSE_SETTLE,
        },
        cue: Cue::RandomTracked(CueLibrary::new(cue_dir)),
        choreography: Choreography::Wiggle(WiggleProfile::new(
            AxisDrive::Random { min: -0.3, max: 0.3 },
            AxisDrive::Random { min: -0.1, max: 0.1 },
            AxisDrive::Random { min: -0.1, max: 0.1 },
            5,
        )),
        finale: Finale::Euler(Euler::NEUTRAL),
    }
}

/// Looking up with a slow head shake and an occasional new roll.
pub fn sad(cue_dir: impl Into<PathBuf>) -> Routine {
    Routine {
        name: "sad".to_string(),
        posture: Posture::PoseMode {
            settle: POSE_SETTLE,
        },
        cue: Cue::RandomTracked(CueLibrary::new(cue_dir)),
        choreography: Choreography::Wiggle(WiggleProfile::new(
            AxisDrive::Random { min: -0.3, max: 0.3 },
            AxisDrive::Fixed(0.35),
            AxisDrive::Sine {
                amplitude: 0.04,
                frequency_hz: 1.5,
            },
            15,
        )),
        finale: Finale::Euler(Euler::NEUTRAL),
    }
}

/// Quick excited head shake with the nose down.
pub fn happy(cue: impl Into<PathBuf>) -> Routine {
    Routine {
        name: "happy".to_string(),
        posture: Posture::PoseMode {
            settle: POSE_SETTLE,
        },
        cue: Cue::Detached(cue.into()),
        choreography: Choreography::Lean(LeanSequence::new(
            vec![LeanStep::new(-0.25, 0.0, 0.05, Duration::from_millis(1500))],
            3.0,
        )),
        finale: Finale::Euler(Euler::new(0.0, -0.25, 0.0)),
    }
}

/// Marching lean sequence over a shout, ending in a collapse.
pub fn sing(cue: impl Into<PathBuf>) -> Routine {
    let s = |secs: f32| Duration::from_secs_f32(secs);
    let steps = vec![
        LeanStep::new(-0.25, 0.0, 0.0, s(3.0)),
        LeanStep::new(0.15, 0.0, 0.0, s(2.5)),
        LeanStep::new(-0.05, -0.2, 0.05, s(3.0)),
        LeanStep::new(-0.05, 0.2, -0.05, s(3.0)),
        LeanStep::new(-0.2, 0.0, 0.1, s(2.5)),
        LeanStep::new(0.1, 0.0, -0.1, s(2.5)),
        LeanStep::new(-0.15, -0.15, 0.0, s(3.0)),
        LeanStep::new(-0.15, 0.15, 0.0, s(3.0)),
        LeanStep::new(-0.1, 0.0, 0.0, s(3.0)),
        LeanStep::new(-0.05, -0.2, 0.05, s(3.0)),
        LeanStep::new(-0.05, 0.2, -0.05, s(3.0)),
        LeanStep::new(-0.2, 0.0, 0.1, s(2.5)),
        LeanStep::new(0.1, 0.0, -0.1, s(2.5)),
        LeanStep::new(-0.15, -0.15, 0.0, s(3.0)),
        LeanStep::new(-0.15, 0.15, 0.0, s(3.0)),
    ];
    Routine {
        name: "sing".to_string(),
        posture: Posture::PoseMode {
            settle: Duration::from_millis(500),
        },
        cue: Cue::Detached(cue.into()),
        choreography: Choreography::Lean(LeanSequence::new(steps, 1.5).with_cap(SING_CAP)),
        finale: Finale::Collapse,
    }
}

/// Rotate in place for a second, stop, and rebalance.
pub fn turn(direction: TurnDirection) -> Routine {
    let (name, vyaw) = match direction {
        TurnDirection::Left => ("turn-left", TURN_RATE),
        TurnDirection::Right => ("turn-right", -TURN_RATE),
    };
    Routine {
        name: name.to_string(),
        posture: Posture::BalanceStand,
        cue: Cue::Silent,
        choreography: Choreography::Action {
            command: SportCommand::Move(Velocity::new(0.0, 0.0, vyaw)),
            timing: ActionTiming {
                settle: Duration::from_secs(1),
                halt: Some(Duration::from_millis(250)),
                rest: Duration::from_millis(250),
            },
        },
        finale: Finale::Hold,
    }
}
