//! Best-effort UDP command listener

use crate::{CommandMessage, DispatchOutcome, Dispatcher, ListenerError, MAX_DATAGRAM};
use audio_cue::CueLauncher;
use motion_sequencer::StopSignal;
use sport_client::SportClient;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

/// Address the speech front-end sends to.
pub const DEFAULT_BIND: &str = "0.0.0.0:5005";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub received: u64,
    pub acted: u64,
    pub unknown: u64,
    pub throttled: u64,
}

pub async fn bind(addr: SocketAddr) -> Result<UdpSocket, ListenerError> {
    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    info!("Listening for commands on {}", socket.local_addr().unwrap_or(addr));
    Ok(socket)
}

/// Receive and dispatch datagrams one at a time until `stop` is raised.
///
/// No reply is ever sent. Receive errors are logged and the loop continues.
/// A datagram arriving while an action runs waits in the socket buffer.
pub async fn run_listener<L: CueLauncher>(
    socket: &UdpSocket,
    dispatcher: &mut Dispatcher<L>,
    client: &mut dyn SportClient,
    stop: &StopSignal,
) -> ListenerStats {
    let mut stats = ListenerStats::default();
    let mut buf = [0u8; MAX_DATAGRAM];

    while !stop.is_raised() {
        let received = tokio::select! {
            r = socket.recv_from(&mut buf) => r,
            _ = stop.raised() => break,
        };
        let (len, peer) = match received {
            Ok(r) => r,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(e) => {
                warn!("recv_from failed: {e}");
                continue;
            }
        };

        let message = CommandMessage::from_datagram(&buf[..len]);
        debug!(id = %message.id, %peer, bytes = len, "datagram");
        stats.received += 1;

        match dispatcher.dispatch(client, &message).await {
            DispatchOutcome::Acted { .. } => stats.acted += 1,
            DispatchOutcome::Unknown => stats.unknown += 1,
            DispatchOutcome::Throttled(_) => stats.throttled += 1,
        }
    }

    info!(
        received = stats.received,
        acted = stats.acted,
        "listener stopped"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandClassifier, DispatchSettings};
    use audio_cue::MockLauncher;
    use motion_sequencer::{ActionExecutor, ActionTiming};
    use sport_client::{CallLog, MockSport, SportCommand};
    use std::time::Duration;

    fn quick_timing() -> ActionTiming {
        ActionTiming {
            settle: Duration::from_millis(10),
            halt: None,
            rest: Duration::from_millis(10),
        }
    }

    /// Raise `stop` once `log` holds `calls` entries, or after a deadline.
    fn stop_after(log: CallLog, calls: usize, stop: StopSignal) {
        tokio::spawn(async move {
            for _ in 0..400 {
                if log.len() >= calls {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            stop.raise();
        });
    }

    #[tokio::test]
    async fn test_stop_then_sit_down_over_udp() {
        let socket = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let target = socket.local_addr().unwrap();
        let stop = StopSignal::new();
        let log = CallLog::new();
        let mut sport = MockSport::with_log("lo", log.clone());
        let mut dispatcher = Dispatcher::new(
            CommandClassifier::default(),
            ActionExecutor::new(quick_timing(), stop.clone()),
            MockLauncher::new(),
            DispatchSettings::default(),
        );

        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        sender.send_to(b"stop", target).await.unwrap();
        sender.send_to(b"sit down\0", target).await.unwrap();
        stop_after(log.clone(), 4, stop.clone());

        let stats = run_listener(&socket, &mut dispatcher, &mut sport, &stop).await;

        assert_eq!(stats.received, 2);
        assert_eq!(stats.acted, 2);
        assert_eq!(
            log.commands(),
            vec![
                SportCommand::StopMove,
                SportCommand::BalanceStand,
                SportCommand::Sit,
                SportCommand::BalanceStand,
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_datagram_is_ignored() {
        let socket = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let target = socket.local_addr().unwrap();
        let stop = StopSignal::new();
        let log = CallLog::new();
        let mut sport = MockSport::with_log("lo", log.clone());
        let mut dispatcher = Dispatcher::new(
            CommandClassifier::default(),
            ActionExecutor::new(quick_timing(), stop.clone()),
            MockLauncher::new(),
            DispatchSettings::default(),
        );

        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        sender.send_to(b"do a backflip", target).await.unwrap();
        sender.send_to(b"stand up", target).await.unwrap();
        stop_after(log.clone(), 2, stop.clone());

        let stats = run_listener(&socket, &mut dispatcher, &mut sport, &stop).await;

        assert_eq!(stats.unknown, 1);
        assert_eq!(log.names(), vec!["StandUp", "BalanceStand"]);
    }

    #[tokio::test]
    async fn test_raised_stop_returns_without_traffic() {
        let socket = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let stop = StopSignal::new();
        let mut sport = MockSport::with_log("lo", CallLog::new());
        let mut dispatcher = Dispatcher::new(
            CommandClassifier::default(),
            ActionExecutor::new(quick_timing(), stop.clone()),
            MockLauncher::new(),
            DispatchSettings::default(),
        );

        let remote = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            remote.raise();
        });

        let stats = run_listener(&socket, &mut dispatcher, &mut sport, &stop).await;
        assert_eq!(stats, ListenerStats::default());
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let taken = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = taken.local_addr().unwrap();
        let err = bind(addr).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { addr: a, .. } if a == addr));
    }
}
