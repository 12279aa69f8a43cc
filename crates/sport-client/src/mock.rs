use crate::{RecordedCall, Result, SessionInfo, SportClient, SportCommand, SportError, Timestamp};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// Shared record of every command a [`MockSport`] accepted.
///
/// Cloning the log shares it, so a test can keep a handle while the client is
/// moved into the code under test.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, command: SportCommand) {
        self.calls.lock().push(RecordedCall {
            command,
            timestamp: Timestamp(OffsetDateTime::now_utc()),
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn commands(&self) -> Vec<SportCommand> {
        self.calls.lock().iter().map(|c| c.command).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|c| c.command.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

/// An in-process sport client that logs instead of moving anything.
pub struct MockSport {
    session: SessionInfo,
    log: CallLog,
    reject: Option<&'static str>,
}

impl MockSport {
    /// Open a mock session that records into an existing log.
    pub fn with_log(interface: &str, log: CallLog) -> Self {
        Self {
            session: SessionInfo {
                interface: interface.to_string(),
                backend: "mock".to_string(),
                timeout: Duration::from_secs(10),
            },
            log,
            reject: None,
        }
    }

    /// Make every command with this name fail after being recorded.
    pub fn rejecting(mut self, command: &'static str) -> Self {
        self.reject = Some(command);
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl SportClient for MockSport {
    fn open(interface: &str, timeout: Duration) -> Result<Self> {
        if interface.trim().is_empty() {
            return Err(SportError::InterfaceNotFound(interface.to_string()));
        }
        let mut client = Self::with_log(interface, CallLog::new());
        client.session.timeout = timeout;
        Ok(client)
    }

    fn session(&self) -> &SessionInfo {
        &self.session
    }

    fn send(&mut self, command: &SportCommand) -> Result<()> {
        tracing::debug!(
            interface = %self.session.interface,
            "mock sport <- {command}"
        );
        self.log.push(*command);
        match self.reject {
            Some(name) if name == command.name() => Err(SportError::Rejected {
                command: command.name(),
                code: 3102,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Euler, Velocity};

    #[test]
    fn test_open_rejects_blank_interface() {
        let err = MockSport::open("  ", Duration::from_secs(1));
        assert!(matches!(err, Err(SportError::InterfaceNotFound(_))));
    }

    #[test]
    fn test_records_convenience_calls_in_order() -> anyhow::Result<()> {
        let mut sport = MockSport::open("eth0", Duration::from_secs(20))?;
        assert_eq!(sport.session().timeout, Duration::from_secs(20));

        sport.pose(true)?;
        sport.move_velocity(Velocity::new(0.2, 0.0, 0.0))?;
        sport.euler(Euler::new(0.1, -0.25, 0.0))?;
        sport.balance_stand()?;

        assert_eq!(
            sport.log().commands(),
            vec![
                SportCommand::Pose(true),
                SportCommand::Move(Velocity::new(0.2, 0.0, 0.0)),
                SportCommand::Euler(Euler::new(0.1, -0.25, 0.0)),
                SportCommand::BalanceStand,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_shared_log_survives_move() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let _ = sport.sit();
        drop(sport);
        assert_eq!(log.names(), vec!["Sit"]);
    }

    #[test]
    fn test_calls_are_timestamped_in_order() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone());
        let _ = sport.stand_up();
        let _ = sport.stop_move();

        let calls = log.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].command, SportCommand::StopMove);
        assert!(calls[0].timestamp.0 <= calls[1].timestamp.0);
    }

    #[test]
    fn test_rejecting_still_records() {
        let log = CallLog::new();
        let mut sport = MockSport::with_log("eth0", log.clone()).rejecting("StandUp");
        assert!(sport.stand_up().is_err());
        assert!(sport.balance_stand().is_ok());
        assert_eq!(log.names(), vec!["StandUp", "BalanceStand"]);
    }
}
