//! One-second clock source for the session machine.
//!
//! `Ticker` owns at most one interval task and the channel it feeds. Each
//! start opens a fresh channel, and stopping or dropping the ticker aborts
//! the task and drops its channel, so ticks queued before a pause never reach
//! the next run.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Ticker {
    period: Duration,
    ticks: Option<UnboundedReceiver<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    /// A ticker firing once per second while started.
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            ticks: None,
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the next tick of the current run.
    ///
    /// Never resolves while stopped. Cancel-safe, so it can sit in a
    /// `tokio::select!` next to other event sources.
    pub async fn recv(&mut self) -> Option<()> {
        match self.ticks.as_mut() {
            Some(rx) => rx.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Begin ticking; the first tick arrives one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let (tx, rx) = mpsc::unbounded_channel();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        self.ticks = Some(rx);
        self.handle = Some(handle);
        tracing::trace!("ticker started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!("ticker stopped");
        }
        self.ticks = None;
    }

    /// Start or stop so that ticks flow exactly while `running` is true.
    pub fn sync(&mut self, running: bool) {
        match (running, self.is_active()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks already delivered to the current run and not yet received.
    fn drain(ticker: &mut Ticker) -> usize {
        let Some(rx) = ticker.ticks.as_mut() else {
            return 0;
        };
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_one_tick_per_period() {
        let mut ticker = Ticker::new();
        ticker.start();
        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(drain(&mut ticker), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_a_single_source() {
        let mut ticker = Ticker::new();
        ticker.start();
        ticker.start();
        ticker.sync(true);
        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(drain(&mut ticker), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_ticks() {
        let mut ticker = Ticker::new();
        ticker.start();
        time::sleep(Duration::from_millis(1500)).await;
        ticker.sync(false);
        assert!(!ticker.is_active());
        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(drain(&mut ticker), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn queued_tick_does_not_survive_pause_and_resume() {
        let mut ticker = Ticker::new();
        ticker.start();
        // One tick lands in the queue and is never received.
        time::sleep(Duration::from_millis(1500)).await;
        ticker.stop();
        ticker.start();
        assert_eq!(drain(&mut ticker), 0);

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(drain(&mut ticker), 0);
        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(drain(&mut ticker), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recv_waits_for_the_next_period() {
        let mut ticker = Ticker::new();
        ticker.start();
        let started = Instant::now();
        assert_eq!(ticker.recv().await, Some(()));
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn recv_pends_while_stopped() {
        let mut ticker = Ticker::new();
        let waited = time::timeout(Duration::from_secs(5), ticker.recv()).await;
        assert!(waited.is_err());
    }
}
