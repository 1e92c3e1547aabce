/// Messaging module for pipeline notifications
///
/// The pipeline reports through a `PipelineObserver`. Callers pick the
/// sink: `NullObserver`, `ChannelObserver` for two plain channels, or
/// `ProgressBus` to fan events out to several listeners.
///
/// ## Architecture
///
/// ```text
/// ┌──────────┐  progress/log  ┌─────────────┐  PipelineEvent  ┌─────────────┐
/// │ Pipeline │ ─────────────> │ ProgressBus │ ──────────────> │ Subscribers │
/// └──────────┘                └─────────────┘                 └─────────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let bus = ProgressBus::new();
/// let rx = bus.listen();
///
/// std::thread::spawn(move || {
///     while let Ok(event) = rx.recv() {
///         println!("{}", event.description());
///     }
/// });
///
/// pipeline.run(&token, &bus)?;
/// ```

pub mod bus;
pub mod events;
pub mod observer;

// Re-export commonly used types
pub use bus::ProgressBus;
pub use events::{PipelineEvent, PipelineStep, ProgressUpdate};
pub use observer::{ChannelObserver, NullObserver, PipelineObserver};
