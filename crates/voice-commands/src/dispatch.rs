//! Classify, announce, cue, act

use crate::{CommandClassifier, CommandMessage, Intent};
use audio_cue::CueLauncher;
use motion_sequencer::{ActionExecutor, ActionReport};
use sport_client::SportClient;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Forward speed for the move intent, m/s.
pub const DEFAULT_FORWARD_SPEED: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSettings {
    pub forward_speed: f32,
    /// Ignore a repeat of the same intent within this window; zero disables it
    pub cooldown: Duration,
    /// Detached audio cue started just before an intent's action
    pub cues: HashMap<Intent, PathBuf>,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            forward_speed: DEFAULT_FORWARD_SPEED,
            cooldown: Duration::ZERO,
            cues: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing matched; no actuator call was made
    Unknown,
    /// Same intent again inside the cooldown window
    Throttled(Intent),
    Acted { intent: Intent, report: ActionReport },
}

pub struct Dispatcher<L> {
    classifier: CommandClassifier,
    executor: ActionExecutor,
    launcher: L,
    settings: DispatchSettings,
    last_acted: HashMap<Intent, Instant>,
}

impl<L: CueLauncher> Dispatcher<L> {
    pub fn new(
        classifier: CommandClassifier,
        executor: ActionExecutor,
        launcher: L,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            classifier,
            executor,
            launcher,
            settings,
            last_acted: HashMap::new(),
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Handle one message to completion. At most one action runs per call.
    pub async fn dispatch(
        &mut self,
        client: &mut dyn SportClient,
        message: &CommandMessage,
    ) -> DispatchOutcome {
        info!(id = %message.id, "Heard: {}", message.text);

        let intent = self.classifier.classify(&message.text);
        let Some(command) = intent.command(self.settings.forward_speed) else {
            warn!(id = %message.id, "Unknown command: {}", message.text);
            return DispatchOutcome::Unknown;
        };

        let now = Instant::now();
        if self.within_cooldown(intent, now) {
            info!(id = %message.id, %intent, "repeated within cooldown, ignoring");
            return DispatchOutcome::Throttled(intent);
        }
        self.last_acted.insert(intent, now);

        info!(id = %message.id, "{}", intent.announcement());
        if let Some(cue) = self.settings.cues.get(&intent) {
            // no cue for an action the executor is about to skip
            if !self.executor.is_stopped() {
                if let Err(e) = self.launcher.play_detached(cue) {
                    warn!("could not play {}: {e}", cue.display());
                }
            }
        }

        let report = self.executor.perform(client, command).await;
        DispatchOutcome::Acted { intent, report }
    }

    fn within_cooldown(&self, intent: Intent, now: Instant) -> bool {
        if self.settings.cooldown.is_zero() {
            return false;
        }
        self.last_acted
            .get(&intent)
            .is_some_and(|last| now.duration_since(*last) < self.settings.cooldown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_cue::{LaunchRecord, MockLauncher};
    use motion_sequencer::{ActionTiming, StopSignal};
    use sport_client::{CallLog, MockSport, SportCommand, Velocity};

    fn dispatcher(settings: DispatchSettings) -> Dispatcher<MockLauncher> {
        Dispatcher::new(
            CommandClassifier::default(),
            ActionExecutor::new(ActionTiming::default(), StopSignal::new()),
            MockLauncher::new(),
            settings,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_stand_up_then_balance() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut d = dispatcher(DispatchSettings::default());

        let outcome = d
            .dispatch(&mut sport, &CommandMessage::new("please stand up now"))
            .await;

        assert_eq!(
            outcome,
            DispatchOutcome::Acted {
                intent: Intent::Stand,
                report: ActionReport::Completed
            }
        );
        assert_eq!(
            log.commands(),
            vec![SportCommand::StandUp, SportCommand::BalanceStand]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_makes_no_call() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut d = dispatcher(DispatchSettings::default());

        let outcome = d
            .dispatch(&mut sport, &CommandMessage::new("do a backflip"))
            .await;
        assert_eq!(outcome, DispatchOutcome::Unknown);
        assert!(log.is_empty());
        assert!(d.launcher().launches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_uses_forward_speed_and_cue() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut settings = DispatchSettings {
            forward_speed: 0.35,
            ..DispatchSettings::default()
        };
        settings.cues.insert(Intent::Move, PathBuf::from("/cues/go.wav"));
        let mut d = dispatcher(settings);

        d.dispatch(&mut sport, &CommandMessage::new("walk")).await;

        assert_eq!(
            log.commands(),
            vec![
                SportCommand::Move(Velocity::new(0.35, 0.0, 0.0)),
                SportCommand::BalanceStand
            ]
        );
        assert_eq!(
            d.launcher().launches(),
            vec![LaunchRecord::Detached(PathBuf::from("/cues/go.wav"))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_suppresses_repeats_of_same_intent() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let mut d = dispatcher(DispatchSettings {
            cooldown: Duration::from_secs(5),
            ..DispatchSettings::default()
        });

        // each action takes 3 s with default timing
        d.dispatch(&mut sport, &CommandMessage::new("sit")).await;
        let second = d.dispatch(&mut sport, &CommandMessage::new("sit")).await;
        assert_eq!(second, DispatchOutcome::Throttled(Intent::Sit));

        let other = d.dispatch(&mut sport, &CommandMessage::new("stop")).await;
        assert!(matches!(other, DispatchOutcome::Acted { intent: Intent::Stop, .. }));

        tokio::time::advance(Duration::from_secs(3)).await;
        let third = d.dispatch(&mut sport, &CommandMessage::new("sit")).await;
        assert!(matches!(third, DispatchOutcome::Acted { intent: Intent::Sit, .. }));

        assert_eq!(
            log.names(),
            vec!["Sit", "BalanceStand", "StopMove", "BalanceStand", "Sit", "BalanceStand"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_dispatcher_skips_action_and_cue() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let stop = StopSignal::new();
        stop.raise();
        let mut settings = DispatchSettings::default();
        settings
            .cues
            .insert(Intent::Stretch, PathBuf::from("/cues/yay.wav"));
        let mut d = Dispatcher::new(
            CommandClassifier::default(),
            ActionExecutor::new(ActionTiming::default(), stop),
            MockLauncher::new(),
            settings,
        );

        let outcome = d.dispatch(&mut sport, &CommandMessage::new("stretch")).await;
        assert_eq!(
            outcome,
            DispatchOutcome::Acted {
                intent: Intent::Stretch,
                report: ActionReport::Skipped
            }
        );
        assert!(log.is_empty());
        assert!(d.launcher().launches().is_empty());
    }
}
