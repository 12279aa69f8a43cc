//! Random wiggle driven for as long as an audio cue plays

use crate::{send_logged, StopSignal, TICK};
use audio_cue::Playback;
use rand::Rng;
use sport_client::{Euler, SportClient, SportCommand};
use std::f32::consts::PI;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How one orientation axis moves during a wiggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisDrive {
    Fixed(f32),
    /// Uniform in `[min, max)`, redrawn every `redraw_every` ticks and held between
    Random { min: f32, max: f32 },
    Sine { amplitude: f32, frequency_hz: f32 },
}

impl AxisDrive {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R, held: f32) -> f32 {
        match *self {
            AxisDrive::Random { min, max } if max > min => rng.gen_range(min..max),
            AxisDrive::Random { min, .. } => min,
            _ => held,
        }
    }

    fn value(&self, held: f32, t: f32) -> f32 {
        match *self {
            AxisDrive::Fixed(v) => v,
            AxisDrive::Random { .. } => held,
            AxisDrive::Sine {
                amplitude,
                frequency_hz,
            } => amplitude * (2.0 * PI * frequency_hz * t).sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiggleProfile {
    pub roll: AxisDrive,
    pub pitch: AxisDrive,
    pub yaw: AxisDrive,
    pub redraw_every: u32,
    pub tick: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiggleEnd {
    AudioFinished,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiggleReport {
    pub ticks: u64,
    pub end: WiggleEnd,
}

impl WiggleProfile {
    pub fn new(roll: AxisDrive, pitch: AxisDrive, yaw: AxisDrive, redraw_every: u32) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            redraw_every,
            tick: TICK,
        }
    }

    /// Emit one setpoint per tick until `playback` finishes or `stop` is raised.
    ///
    /// Completion is polled at the top of every tick, so the loop ends no later
    /// than one tick after the player exits. On stop the playback is terminated.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        client: &mut dyn SportClient,
        playback: &mut dyn Playback,
        rng: &mut R,
        stop: &StopSignal,
    ) -> WiggleReport {
        let every = u64::from(self.redraw_every.max(1));
        let dt = self.tick.as_secs_f32();
        let mut held = Euler::NEUTRAL;
        let mut ticks: u64 = 0;

        let end = loop {
            if stop.is_raised() {
                if let Err(e) = playback.terminate() {
                    warn!("failed to terminate audio: {e}");
                }
                break WiggleEnd::Stopped;
            }
            match playback.has_finished() {
                Ok(true) => break WiggleEnd::AudioFinished,
                Ok(false) => {}
                Err(e) => {
                    warn!("lost track of audio playback: {e}");
                    break WiggleEnd::AudioFinished;
                }
            }

            if ticks % every == 0 {
                held = Euler::new(
                    self.roll.draw(rng, held.roll),
                    self.pitch.draw(rng, held.pitch),
                    self.yaw.draw(rng, held.yaw),
                );
            }
            let t = ticks as f32 * dt;
            let setpoint = Euler::new(
                self.roll.value(held.roll, t),
                self.pitch.value(held.pitch, t),
                self.yaw.value(held.yaw, t),
            );
            debug!(tick = ticks, "wiggle {setpoint}");
            send_logged(client, &SportCommand::Euler(setpoint));
            ticks += 1;

            stop.sleep(self.tick).await;
        };

        info!(ticks, "wiggle ended: {end:?}");
        WiggleReport { ticks, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_cue::ScriptedPlayback;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sport_client::{CallLog, MockSport};
    use std::sync::atomic::Ordering;
    use tokio::time::Instant;

    fn eulers(log: &CallLog) -> Vec<Euler> {
        log.commands()
            .into_iter()
            .filter_map(|c| match c {
                SportCommand::Euler(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    fn talk_like() -> WiggleProfile {
        WiggleProfile::new(
            AxisDrive::Random { min: -0.3, max: 0.3 },
            AxisDrive::Random { min: -0.1, max: 0.1 },
            AxisDrive::Random { min: -0.1, max: 0.1 },
            5,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_ends_one_tick_after_audio_exit() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut playback = ScriptedPlayback::finishes_after(4);
        let mut rng = StdRng::seed_from_u64(1);

        let start = Instant::now();
        let report = talk_like()
            .run(&mut sport, &mut playback, &mut rng, &StopSignal::new())
            .await;

        assert_eq!(report.end, WiggleEnd::AudioFinished);
        assert_eq!(report.ticks, 4);
        assert_eq!(log.len(), 4);
        assert!(start.elapsed() <= Duration::from_millis(4 * 50 + 5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_held_between_redraws_and_in_range() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut playback = ScriptedPlayback::finishes_after(12);
        let mut rng = StdRng::seed_from_u64(99);

        talk_like()
            .run(&mut sport, &mut playback, &mut rng, &StopSignal::new())
            .await;

        let calls = eulers(&log);
        assert_eq!(calls.len(), 12);
        for window in [&calls[0..5], &calls[5..10], &calls[10..12]] {
            assert!(window.iter().all(|e| *e == window[0]));
        }
        for e in &calls {
            assert!((-0.3..0.3).contains(&e.roll));
            assert!((-0.1..0.1).contains(&e.pitch));
            assert!((-0.1..0.1).contains(&e.yaw));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_and_sine_axes() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut playback = ScriptedPlayback::finishes_after(3);
        let mut rng = StdRng::seed_from_u64(3);
        let profile = WiggleProfile::new(
            AxisDrive::Random { min: -0.3, max: 0.3 },
            AxisDrive::Fixed(0.35),
            AxisDrive::Sine {
                amplitude: 0.04,
                frequency_hz: 1.5,
            },
            15,
        );

        profile
            .run(&mut sport, &mut playback, &mut rng, &StopSignal::new())
            .await;

        let calls = eulers(&log);
        assert!(calls.iter().all(|e| e.pitch == 0.35));
        assert!(calls.iter().all(|e| e.roll == calls[0].roll));
        assert_eq!(calls[0].yaw, 0.0);
        let expected = 0.04 * (2.0 * PI * 1.5 * 0.05_f32).sin();
        assert!((calls[1].yaw - expected).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_terminates_audio() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut playback = ScriptedPlayback::endless();
        let terminated = playback.terminated_flag();
        let mut rng = StdRng::seed_from_u64(5);
        let stop = StopSignal::new();
        let remote = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(220)).await;
            remote.raise();
        });

        let report = talk_like()
            .run(&mut sport, &mut playback, &mut rng, &stop)
            .await;

        assert_eq!(report.end, WiggleEnd::Stopped);
        assert_eq!(report.ticks, 5);
        assert!(terminated.load(Ordering::SeqCst));
    }
}
