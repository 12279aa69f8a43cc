//! Single-action execution: act, settle, return to balance stand

use crate::StopSignal;
use sport_client::{SportClient, SportCommand};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sleeps around one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTiming {
    /// Hold after the action before returning to neutral
    pub settle: Duration,
    /// If set, issue StopMove after settling and hold this long
    pub halt: Option<Duration>,
    /// Hold after BalanceStand
    pub rest: Duration,
}

impl Default for ActionTiming {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1000),
            halt: None,
            rest: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionReport {
    /// Stop was already raised; nothing was sent
    Skipped,
    Completed,
    /// Stop arrived mid-action; remaining holds were abandoned
    Interrupted,
}

/// Send one command, logging instead of propagating failures.
///
/// Returns whether the client accepted it.
pub fn send_logged(client: &mut dyn SportClient, command: &SportCommand) -> bool {
    match client.send(command) {
        Ok(()) => true,
        Err(e) => {
            warn!("{} failed: {e}", command.name());
            false
        }
    }
}

pub struct ActionExecutor {
    timing: ActionTiming,
    stop: StopSignal,
}

impl ActionExecutor {
    pub fn new(timing: ActionTiming, stop: StopSignal) -> Self {
        Self { timing, stop }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_raised()
    }

    /// Perform `command`, then always attempt to return to balance stand.
    pub async fn perform(
        &self,
        client: &mut dyn SportClient,
        command: SportCommand,
    ) -> ActionReport {
        if self.stop.is_raised() {
            debug!("stop raised, skipping {command}");
            return ActionReport::Skipped;
        }

        info!("Running action: {command}");
        send_logged(client, &command);
        let mut interrupted = !self.stop.sleep(self.timing.settle).await;

        if let Some(halt) = self.timing.halt {
            send_logged(client, &SportCommand::StopMove);
            if !interrupted {
                interrupted = !self.stop.sleep(halt).await;
            }
        }

        info!("Returning to balance stand");
        send_logged(client, &SportCommand::BalanceStand);
        if !interrupted {
            interrupted = !self.stop.sleep(self.timing.rest).await;
        }

        if interrupted {
            ActionReport::Interrupted
        } else {
            ActionReport::Completed
        }
    }
}
