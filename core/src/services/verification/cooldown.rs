//! Resend cooldown countdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Countdown gating code resends.
///
/// Starting the cooldown spawns a 1 Hz tick task that decrements the shared
/// counter until it reaches zero. The task is owned here: restarting cancels
/// the previous task, and dropping the cooldown aborts it, so a countdown
/// never outlives its session.
#[derive(Debug)]
pub struct Cooldown {
    remaining: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl Cooldown {
    /// An elapsed cooldown with no running task.
    pub fn idle() -> Self {
        Self {
            remaining: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Seconds until resend becomes available. Zero when elapsed.
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Arm (or re-arm) the countdown for `seconds`.
    pub fn start(&mut self, seconds: u64) {
        self.cancel();
        self.remaining.store(seconds, Ordering::SeqCst);
        if seconds == 0 {
            return;
        }

        let remaining = Arc::clone(&self.remaining);
        // Create the interval here so the tick schedule is anchored at the
        // moment the cooldown is armed, not at the task's first poll.
        let mut tick = interval(Duration::from_secs(1));
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.task = Some(tokio::spawn(async move {
            // The first tick completes immediately; skip it.
            tick.tick().await;
            loop {
                tick.tick().await;
                let left = remaining
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1))
                    .map(|prev| prev - 1)
                    .unwrap_or(0);
                if left == 0 {
                    break;
                }
            }
        }));
    }

    /// Stop the countdown task, leaving the counter where it is.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            // Let freshly spawned tick tasks register their timers before
            // the paused clock moves, so no tick is counted as missed.
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_exactly_zero() {
        let mut cooldown = Cooldown::idle();
        cooldown.start(3);
        assert_eq!(cooldown.remaining(), 3);

        advance_secs(1).await;
        assert_eq!(cooldown.remaining(), 2);

        advance_secs(2).await;
        assert_eq!(cooldown.remaining(), 0);

        // Stays at zero after the window
        advance_secs(5).await;
        assert_eq!(cooldown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_rearms_window() {
        let mut cooldown = Cooldown::idle();
        cooldown.start(5);
        advance_secs(3).await;
        assert_eq!(cooldown.remaining(), 2);

        cooldown.start(5);
        assert_eq!(cooldown.remaining(), 5);
        advance_secs(5).await;
        assert_eq!(cooldown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_is_elapsed() {
        let cooldown = Cooldown::idle();
        assert_eq!(cooldown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_freezes_countdown() {
        let mut cooldown = Cooldown::idle();
        cooldown.start(10);
        advance_secs(2).await;
        cooldown.cancel();

        advance_secs(5).await;
        assert_eq!(cooldown.remaining(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_window_spawns_no_task() {
        let mut cooldown = Cooldown::idle();
        cooldown.start(0);
        assert_eq!(cooldown.remaining(), 0);
        assert!(cooldown.task.is_none());
    }
}
