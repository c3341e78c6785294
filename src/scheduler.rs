//! Fixed-period tick source that can be armed and disarmed.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Cancellable repeating tick
///
/// Disarming drops the underlying interval, so once [`TickScheduler::disarm`]
/// returns no further tick can be observed until the scheduler is re-armed.
pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Start ticking; the first tick fires one full period from now
    pub fn arm(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn disarm(&mut self) {
        self.timer = None;
    }

    /// Drop any partial period and arm afresh
    pub fn restart(&mut self) {
        self.disarm();
        self.arm();
    }

    /// Arm or disarm to match `running`
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Wait for the next tick. Never resolves while disarmed.
    ///
    /// Cancel safe, so it can sit in a `tokio::select!` branch.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_never_ticks() {
        let mut scheduler = TickScheduler::new(PERIOD);
        assert!(!scheduler.is_armed());
        assert!(timeout(PERIOD * 10, scheduler.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut scheduler = TickScheduler::new(PERIOD);
        let start = Instant::now();
        scheduler.arm();

        scheduler.tick().await;
        assert_eq!(start.elapsed(), PERIOD);

        scheduler.tick().await;
        assert_eq!(start.elapsed(), PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_cancels_pending_ticks() {
        let mut scheduler = TickScheduler::new(PERIOD);
        scheduler.arm();
        scheduler.tick().await;

        scheduler.disarm();
        assert!(!scheduler.is_armed());
        assert!(timeout(PERIOD * 5, scheduler.tick()).await.is_err());

        scheduler.sync(true);
        assert!(scheduler.is_armed());
        assert!(timeout(PERIOD * 2, scheduler.tick()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_is_idempotent() {
        let mut scheduler = TickScheduler::new(PERIOD);
        let start = Instant::now();
        scheduler.arm();
        tokio::time::advance(PERIOD / 2).await;
        scheduler.arm();

        scheduler.tick().await;
        assert_eq!(start.elapsed(), PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_drops_partial_period() {
        let mut scheduler = TickScheduler::new(PERIOD);
        scheduler.arm();
        tokio::time::advance(PERIOD / 2).await;

        let restarted = Instant::now();
        scheduler.restart();
        assert!(scheduler.is_armed());

        scheduler.tick().await;
        assert_eq!(restarted.elapsed(), PERIOD);
    }
}
