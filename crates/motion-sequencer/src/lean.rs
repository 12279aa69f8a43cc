//! Fixed lean/sway sequences

use crate::{send_logged, StopSignal, TICK};
use sport_client::{Euler, SportClient, SportCommand};
use std::f32::consts::PI;
use std::time::Duration;
use tracing::{debug, info};

/// One held lean: constant pitch with roll and yaw swaying sinusoidally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeanStep {
    pub pitch: f32,
    pub roll_amp: f32,
    pub yaw_amp: f32,
    pub duration: Duration,
}

impl LeanStep {
    pub fn new(pitch: f32, roll_amp: f32, yaw_amp: f32, duration: Duration) -> Self {
        Self {
            pitch,
            roll_amp,
            yaw_amp,
            duration,
        }
    }

    /// Setpoint `t` seconds into this step.
    pub fn setpoint(&self, t: f32, frequency_hz: f32) -> Euler {
        let phase = (2.0 * PI * frequency_hz * t).sin();
        Euler::new(self.roll_amp * phase, self.pitch, self.yaw_amp * phase)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeanSequence {
    pub steps: Vec<LeanStep>,
    pub frequency_hz: f32,
    pub tick: Duration,
    /// Stop once this much step time has been completed
    pub cap: Option<Duration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub ticks: u64,
    pub steps_completed: usize,
    pub stopped: bool,
}

impl LeanSequence {
    pub fn new(steps: Vec<LeanStep>, frequency_hz: f32) -> Self {
        Self {
            steps,
            frequency_hz,
            tick: TICK,
            cap: None,
        }
    }

    pub fn with_cap(mut self, cap: Duration) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Number of setpoints emitted for a step (whole ticks only).
    pub fn ticks_for(&self, step: &LeanStep) -> u64 {
        let tick = self.tick.as_nanos();
        if tick == 0 {
            return 0;
        }
        (step.duration.as_nanos() / tick) as u64
    }

    pub async fn run(&self, client: &mut dyn SportClient, stop: &StopSignal) -> SequenceReport {
        let mut report = SequenceReport::default();
        let mut elapsed = Duration::ZERO;
        let dt = self.tick.as_secs_f32();

        for (index, step) in self.steps.iter().enumerate() {
            if stop.is_raised() {
                break;
            }
            debug!(step = index, "lean pitch={:+.2}", step.pitch);

            for i in 0..self.ticks_for(step) {
                if stop.is_raised() {
                    break;
                }
                let setpoint = step.setpoint(i as f32 * dt, self.frequency_hz);
                send_logged(client, &SportCommand::Euler(setpoint));
                report.ticks += 1;
                if !stop.sleep(self.tick).await {
                    break;
                }
            }
            if stop.is_raised() {
                break;
            }

            report.steps_completed += 1;
            elapsed += step.duration;
            if let Some(cap) = self.cap {
                if elapsed >= cap {
                    info!("sequence cap of {:.1}s reached", cap.as_secs_f32());
                    break;
                }
            }
        }

        report.stopped = stop.is_raised();
        report
    }
}
