use crate::{Euler, Result, SessionInfo, SportCommand, Velocity};
use std::time::Duration;

/// A minimal blocking sport client.
///
/// Every call is synchronous and bounded by the timeout passed to [`SportClient::open`].
/// Calls are assumed idempotent when repeated; callers never issue two at once.
pub trait SportClient {
    /// Open a session over the named network interface (e.g., "eth0").
    fn open(interface: &str, timeout: Duration) -> Result<Self>
    where
        Self: Sized;

    /// Details of the open session.
    fn session(&self) -> &SessionInfo;

    /// Issue one command.
    fn send(&mut self, command: &SportCommand) -> Result<()>;

    fn pose(&mut self, on: bool) -> Result<()> {
        self.send(&SportCommand::Pose(on))
    }

    fn stand_up(&mut self) -> Result<()> {
        self.send(&SportCommand::StandUp)
    }

    fn sit(&mut self) -> Result<()> {
        self.send(&SportCommand::Sit)
    }

    fn stand_down(&mut self) -> Result<()> {
        self.send(&SportCommand::StandDown)
    }

    fn stretch(&mut self) -> Result<()> {
        self.send(&SportCommand::Stretch)
    }

    fn balance_stand(&mut self) -> Result<()> {
        self.send(&SportCommand::BalanceStand)
    }

    fn recovery_stand(&mut self) -> Result<()> {
        self.send(&SportCommand::RecoveryStand)
    }

    fn move_velocity(&mut self, velocity: Velocity) -> Result<()> {
        self.send(&SportCommand::Move(velocity))
    }

    fn stop_move(&mut self) -> Result<()> {
        self.send(&SportCommand::StopMove)
    }

    fn euler(&mut self, orientation: Euler) -> Result<()> {
        self.send(&SportCommand::Euler(orientation))
    }
}
