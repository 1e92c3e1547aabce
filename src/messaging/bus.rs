/// Progress bus
///
/// Fans pipeline events out to any number of listeners, e.g. a console
/// printer thread in the CLI. Listeners whose receiver was dropped are
/// pruned on the next publish.
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::events::{PipelineEvent, ProgressUpdate};
use super::observer::PipelineObserver;

/// Cloneable handle; clones share the listener list
#[derive(Clone, Default)]
pub struct ProgressBus {
    listeners: Arc<Mutex<Vec<Sender<PipelineEvent>>>>,
}

impl ProgressBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// New listener; it sees every event published from now on
    pub fn listen(&self) -> Receiver<PipelineEvent> {
        let (tx, rx) = unbounded();
        self.listeners.lock().push(tx);
        rx
    }

    pub fn publish(&self, event: PipelineEvent) {
        let mut listeners = self.listeners.lock();
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Drop every sender so listeners drain their queue and see a disconnect
    pub fn close(&self) {
        let dropped = std::mem::take(&mut *self.listeners.lock());
        tracing::debug!("Progress bus closed ({} listeners)", dropped.len());
    }
}

impl PipelineObserver for ProgressBus {
    fn progress(&self, update: &ProgressUpdate) {
        self.publish(PipelineEvent::Progress(update.clone()));
    }

    fn log(&self, line: &str) {
        self.publish(PipelineEvent::Log(line.to_string()));
    }
}
