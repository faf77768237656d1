//! Debounced search trigger.
//!
//! The trigger is a `watch` channel carrying the list's current
//! [`FilterState`](crate::search::state::FilterState). A `watch` slot holds a
//! single value, so any number of writes between two reads collapse into one
//! notification and the reader always sees the latest state.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

/// Debounce window used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Waits for bursts of changes on a `watch` channel to settle.
pub struct DebouncedTrigger<T> {
    receiver: watch::Receiver<T>,
    window: Duration,
}

impl<T: Clone> DebouncedTrigger<T> {
    pub fn new(receiver: watch::Receiver<T>, window: Duration) -> Self {
        Self { receiver, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Resolves once a change has been followed by `window` of silence.
    ///
    /// Each new change restarts the window. Returns the value current when the
    /// window closes, or `None` once the sending side is gone.
    pub async fn settled(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;

        loop {
            tokio::select! {
                _ = sleep(self.window) => break,
                changed = self.receiver.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
            }
        }

        Some(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_into_latest_value() {
        let (sender, receiver) = watch::channel(0);
        let mut trigger = DebouncedTrigger::new(receiver, Duration::from_millis(300));

        let waiter = tokio::spawn(async move { trigger.settled().await });

        for value in 1..=5 {
            sender.send_replace(value);
            sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(waiter.await.unwrap(), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn window_restarts_on_each_change() {
        let (sender, receiver) = watch::channel("a");
        let mut trigger = DebouncedTrigger::new(receiver, Duration::from_millis(300));
        let started = tokio::time::Instant::now();

        let waiter = tokio::spawn(async move {
            let value = trigger.settled().await;
            (value, tokio::time::Instant::now())
        });

        sender.send_replace("b");
        sleep(Duration::from_millis(200)).await;
        sender.send_replace("c");

        let (value, resolved_at) = waiter.await.unwrap();
        assert_eq!(value, Some("c"));
        assert!(resolved_at - started >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_trigger() {
        let (sender, receiver) = watch::channel(());
        let mut trigger = DebouncedTrigger::new(receiver, DEFAULT_DEBOUNCE);

        drop(sender);

        assert_eq!(trigger.settled().await, None);
    }
}
