//! Progress notification port
//!
//! The Council publishes [`ProgressEvent`]s while it works. Delivery is
//! fire-and-forget: `notify` never blocks and never fails the pipeline.
//! Consumers either implement [`ProgressNotifier`] directly or subscribe to a
//! [`ProgressChannel`] and drain its receiver on their own task.

use council_domain::ProgressEvent;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::debug;

/// Sink for progress events during Council execution
pub trait ProgressNotifier: Send + Sync {
    /// Publish one event. Must return promptly.
    fn notify(&self, event: ProgressEvent);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn notify(&self, _event: ProgressEvent) {}
}

/// Bounded message-passing progress sink.
///
/// Events that do not fit (slow consumer) or have nowhere to go (receiver
/// dropped) are discarded.
#[derive(Clone)]
pub struct ProgressChannel {
    sender: mpsc::Sender<ProgressEvent>,
}

impl ProgressChannel {
    /// Create a channel holding up to `capacity` undelivered events
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl ProgressNotifier for ProgressChannel {
    fn notify(&self, event: ProgressEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!("Progress channel full, dropping event: {}", event.message);
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

/// Adapter turning a plain callback into a [`ProgressNotifier`].
///
/// The callback runs on the blocking pool, fed by a [`ProgressChannel`], so a
/// slow or blocking callback never holds up the pipeline. Drop the notifier
/// and await the returned handle to flush the remaining events.
pub struct CallbackProgress {
    channel: ProgressChannel,
}

impl CallbackProgress {
    pub fn spawn<F>(capacity: usize, callback: F) -> (Self, JoinHandle<()>)
    where
        F: Fn(ProgressEvent) + Send + 'static,
    {
        let (channel, mut receiver) = ProgressChannel::new(capacity);
        let handle = tokio::task::spawn_blocking(move || {
            while let Some(event) = receiver.blocking_recv() {
                callback(event);
            }
        });
        (Self { channel }, handle)
    }
}

impl ProgressNotifier for CallbackProgress {
    fn notify(&self, event: ProgressEvent) {
        self.channel.notify(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::ProgressKind;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (channel, mut rx) = ProgressChannel::new(8);
        channel.notify(ProgressEvent::synthesized(1));
        channel.notify(ProgressEvent::scored(1, 50.0));

        assert_eq!(rx.recv().await.unwrap().kind, ProgressKind::Synthesized);
        assert_eq!(rx.recv().await.unwrap().score, Some(50.0));
    }

    #[test]
    fn test_full_channel_drops_without_blocking() {
        let (channel, mut rx) = ProgressChannel::new(1);
        channel.notify(ProgressEvent::synthesized(1));
        channel.notify(ProgressEvent::synthesized(2));

        assert_eq!(rx.try_recv().unwrap().iteration, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (channel, rx) = ProgressChannel::new(4);
        drop(rx);
        channel.notify(ProgressEvent::synthesized(1));
    }

    #[tokio::test]
    async fn test_callback_progress_delivers_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (progress, handle) = CallbackProgress::spawn(8, move |e: ProgressEvent| {
            sink.lock().unwrap().push(e.iteration)
        });
        progress.notify(ProgressEvent::scored(3, 10.0));
        progress.notify(ProgressEvent::synthesized(4));
        drop(progress);
        handle.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);
    }
}
