use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Periodic task emitting one `()` per period until cancelled.
///
/// Dropping the ticker aborts the task, so a torn-down controller never
/// keeps a timer alive.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn on the current tokio runtime; the first tick fires after one period
    pub fn spawn(period: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    tracing::debug!("Tick receiver dropped, stopping ticker");
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }

    /// One tick per second, the cooldown resolution
    pub fn every_second() -> (Self, mpsc::Receiver<()>) {
        Self::spawn(Duration::from_secs(1))
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
