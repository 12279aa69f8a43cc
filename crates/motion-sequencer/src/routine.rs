//! Scripted routines: pose, cue, choreography, finale

use crate::{
    send_logged, ActionExecutor, ActionTiming, LeanSequence, Result, RoutineError, StopSignal,
    WiggleProfile,
};
use audio_cue::{CueLauncher, CueLibrary, Playback};
use rand::Rng;
use sport_client::{Euler, SportClient, SportCommand, Velocity};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutinePhase {
    Idle,
    Posing,
    Executing,
    Returning,
    Done,
}

impl fmt::Display for RoutinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoutinePhase::Idle => "idle",
            RoutinePhase::Posing => "posing",
            RoutinePhase::Executing => "executing",
            RoutinePhase::Returning => "returning",
            RoutinePhase::Done => "done",
        };
        f.write_str(s)
    }
}

/// How the robot is prepared before the routine proper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    /// Enter pose-control mode and let it settle
    PoseMode { settle: Duration },
    BalanceStand,
}

impl Posture {
    pub async fn assume(&self, client: &mut dyn SportClient, stop: &StopSignal) {
        match *self {
            Posture::PoseMode { settle } => {
                info!("Entering pose mode");
                send_logged(client, &SportCommand::Pose(true));
                stop.sleep(settle).await;
            }
            Posture::BalanceStand => {
                send_logged(client, &SportCommand::BalanceStand);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Cue {
    Silent,
    /// Play one file and do not wait for it
    Detached(PathBuf),
    /// Play a random file from a library and track it
    RandomTracked(CueLibrary),
}

#[derive(Debug, Clone)]
pub enum Choreography {
    Lean(LeanSequence),
    /// Runs until the tracked cue ends; requires [`Cue::RandomTracked`]
    Wiggle(WiggleProfile),
    Action {
        command: SportCommand,
        timing: ActionTiming,
    },
}

/// Last commands of a routine, sent even after a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finale {
    Hold,
    Euler(Euler),
    /// Leave pose mode and zero the velocity, letting the body drop
    Collapse,
}

impl Finale {
    fn apply(&self, client: &mut dyn SportClient) {
        match *self {
            Finale::Hold => {}
            Finale::Euler(orientation) => {
                send_logged(client, &SportCommand::Euler(orientation));
            }
            Finale::Collapse => {
                send_logged(client, &SportCommand::Pose(false));
                send_logged(client, &SportCommand::Move(Velocity::ZERO));
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Routine {
    pub name: String,
    pub posture: Posture,
    pub cue: Cue,
    pub choreography: Choreography,
    pub finale: Finale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineReport {
    pub name: String,
    pub phases: Vec<RoutinePhase>,
    pub ticks: u64,
    pub stopped: bool,
}

impl Routine {
    /// Drive the routine to completion.
    ///
    /// A stop at any point skips straight to the finale. Failing to find a
    /// tracked cue aborts after posing, without a finale.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        client: &mut dyn SportClient,
        launcher: &dyn CueLauncher,
        rng: &mut R,
        stop: &StopSignal,
    ) -> Result<RoutineReport> {
        if matches!(self.choreography, Choreography::Wiggle(_))
            && !matches!(self.cue, Cue::RandomTracked(_))
        {
            return Err(RoutineError::Misconfigured {
                routine: self.name.clone(),
                reason: "a wiggle needs a tracked cue to know when to end",
            });
        }

        let mut report = RoutineReport {
            name: self.name.clone(),
            phases: vec![RoutinePhase::Idle],
            ticks: 0,
            stopped: false,
        };

        if !stop.is_raised() {
            self.enter(&mut report, RoutinePhase::Posing);
            self.posture.assume(client, stop).await;
        }

        let mut playback = if stop.is_raised() {
            None
        } else {
            self.start_cue(launcher, rng)?
        };

        if !stop.is_raised() {
            self.enter(&mut report, RoutinePhase::Executing);
            report.ticks = self
                .execute(client, playback.as_mut(), rng, stop)
                .await;
        }

        if stop.is_raised() {
            if let Some(playback) = playback.as_mut() {
                if let Err(e) = playback.terminate() {
                    warn!("failed to terminate audio: {e}");
                }
            }
        }

        self.enter(&mut report, RoutinePhase::Returning);
        self.finale.apply(client);
        self.enter(&mut report, RoutinePhase::Done);
        report.stopped = stop.is_raised();
        Ok(report)
    }

    fn enter(&self, report: &mut RoutineReport, phase: RoutinePhase) {
        info!(routine = %self.name, "phase -> {phase}");
        report.phases.push(phase);
    }

    fn start_cue<R: Rng + ?Sized>(
        &self,
        launcher: &dyn CueLauncher,
        rng: &mut R,
    ) -> Result<Option<Box<dyn Playback>>> {
        match &self.cue {
            Cue::Silent => Ok(None),
            Cue::Detached(path) => {
                // A missing detached cue never blocks the motion.
                if let Err(e) = launcher.play_detached(path) {
                    warn!("could not play {}: {e}", path.display());
                }
                Ok(None)
            }
            Cue::RandomTracked(library) => {
                let path = library.pick(rng).map_err(|e| {
                    warn!("{e}");
                    e
                })?;
                info!("Playing: {}", path.display());
                Ok(Some(launcher.play_tracked(&path)?))
            }
        }
    }

    async fn execute<R: Rng + ?Sized>(
        &self,
        client: &mut dyn SportClient,
        playback: Option<&mut Box<dyn Playback>>,
        rng: &mut R,
        stop: &StopSignal,
    ) -> u64 {
        match &self.choreography {
            Choreography::Lean(sequence) => sequence.run(client, stop).await.ticks,
            Choreography::Wiggle(profile) => match playback {
                Some(playback) => profile.run(client, playback.as_mut(), rng, stop).await.ticks,
                None => 0,
            },
            Choreography::Action { command, timing } => {
                ActionExecutor::new(*timing, stop.clone())
                    .perform(client, *command)
                    .await;
                0
            }
        }
    }
}
