//! motion-sequencer: what the robot does once it has been told to do something
//!
//! This crate provides:
//! - A process-wide cooperative [`StopSignal`]
//! - The [`ActionExecutor`]: one stance/velocity call, settle, back to balance stand
//! - Fixed lean sequences and audio-synchronized random wiggles at a fixed tick
//! - [`Routine`], the `Idle → Posing → Executing → Returning → Done` runner, and
//!   the built-in emotion routines in [`presets`]

mod error;
pub use error::{Result, RoutineError};

mod stop;
pub use stop::{install_ctrl_c, StopSignal};

mod executor;
pub use executor::{send_logged, ActionExecutor, ActionReport, ActionTiming};

mod lean;
pub use lean::{LeanSequence, LeanStep, SequenceReport};

mod wiggle;
pub use wiggle::{AxisDrive, WiggleEnd, WiggleProfile, WiggleReport};

mod routine;
pub use routine::{Choreography, Cue, Finale, Posture, Routine, RoutinePhase, RoutineReport};

pub mod presets;

use std::time::Duration;

/// Control tick used by every pose loop.
pub const TICK: Duration = Duration::from_millis(50);
