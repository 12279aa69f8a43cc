use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Cooperative cancellation shared by the signal handler, input watchers and
/// every control loop. Once raised it stays raised.
#[derive(Clone, Debug)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn raise(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_raised(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal is raised.
    pub async fn raised(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }

    /// Sleep unless stopped first. Returns `true` when the whole interval elapsed.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_raised() {
            return false;
        }
        if duration.is_zero() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.raised() => false,
        }
    }
}

/// Raise `stop` on the first Ctrl-C. Must be called inside a tokio runtime.
pub fn install_ctrl_c(stop: &StopSignal) {
    let stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("SIGINT received, stopping");
            stop.raise();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_runs_full_interval() {
        let stop = StopSignal::new();
        let start = Instant::now();
        assert!(stop.sleep(Duration::from_secs(2)).await);
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_millis(2050));
    }

    #[tokio::test(start_paused = true)]
    async fn test_raise_cuts_sleep_short() {
        let stop = StopSignal::new();
        let remote = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            remote.raise();
        });

        let start = Instant::now();
        assert!(!stop.sleep(Duration::from_secs(5)).await);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(stop.is_raised());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_after_raise_returns_immediately() {
        let stop = StopSignal::new();
        stop.raise();
        let start = Instant::now();
        assert!(!stop.sleep(Duration::from_secs(5)).await);
        assert_eq!(start.elapsed(), Duration::ZERO);
        // raised() must not hang once the flag is already set
        stop.raised().await;
    }
}
