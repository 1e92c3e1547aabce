/// Progress and log sinks for the pipeline
///
/// Both channels are optional and one-way. Delivery is best effort: a full
/// or disconnected receiver never blocks or fails the run.
use crossbeam_channel::Sender;

use super::events::ProgressUpdate;

/// Receives pipeline notifications. Both methods default to doing nothing.
pub trait PipelineObserver {
    fn progress(&self, _update: &ProgressUpdate) {}

    fn log(&self, _line: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

/// Forwards notifications into crossbeam channels
#[derive(Debug, Clone, Default)]
pub struct ChannelObserver {
    progress: Option<Sender<ProgressUpdate>>,
    log: Option<Sender<String>>,
}

impl ChannelObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, sender: Sender<ProgressUpdate>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn with_log(mut self, sender: Sender<String>) -> Self {
        self.log = Some(sender);
        self
    }
}

impl PipelineObserver for ChannelObserver {
    fn progress(&self, update: &ProgressUpdate) {
        if let Some(tx) = &self.progress {
            let _ = tx.try_send(update.clone());
        }
    }

    fn log(&self, line: &str) {
        if let Some(tx) = &self.log {
            let _ = tx.try_send(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::events::PipelineStep;
    use crossbeam_channel::{bounded, unbounded};

    #[test]
    fn test_channel_observer_forwards() {
        let (progress_tx, progress_rx) = unbounded();
        let (log_tx, log_rx) = unbounded();
        let observer = ChannelObserver::new()
            .with_progress(progress_tx)
            .with_log(log_tx);

        observer.progress(&ProgressUpdate::new(PipelineStep::Fetch, "start"));
        observer.log("hello");

        assert_eq!(progress_rx.try_recv().unwrap().step, PipelineStep::Fetch);
        assert_eq!(log_rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_full_or_closed_channels_are_ignored() {
        let (tx, rx) = bounded(1);
        let observer = ChannelObserver::new().with_log(tx);

        observer.log("first");
        observer.log("dropped");
        assert_eq!(rx.len(), 1);

        drop(rx);
        observer.log("after close");
    }

    #[test]
    fn test_missing_channels_are_noops() {
        let observer = ChannelObserver::new();
        observer.progress(&ProgressUpdate::new(PipelineStep::Render, "done"));
        observer.log("nothing");
        NullObserver.log("nothing");
    }
}
