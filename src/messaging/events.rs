/// Pipeline notifications
///
/// Events describe what the pipeline has done. They carry no control flow
/// and may be dropped by any listener.
use std::fmt;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    Fetch,
    Parse,
    Dedup,
    Filter,
    Render,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 5] = [
        PipelineStep::Fetch,
        PipelineStep::Parse,
        PipelineStep::Dedup,
        PipelineStep::Filter,
        PipelineStep::Render,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position
    pub fn index(&self) -> usize {
        match self {
            PipelineStep::Fetch => 1,
            PipelineStep::Parse => 2,
            PipelineStep::Dedup => 3,
            PipelineStep::Filter => 4,
            PipelineStep::Render => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineStep::Fetch => "Fetch",
            PipelineStep::Parse => "Parse",
            PipelineStep::Dedup => "Dedup",
            PipelineStep::Filter => "Filter",
            PipelineStep::Render => "Render",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub step: PipelineStep,
    pub step_index: usize,
    pub total_steps: usize,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(step: PipelineStep, message: impl Into<String>) -> Self {
        Self {
            step,
            step_index: step.index(),
            total_steps: PipelineStep::COUNT,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {}: {}",
            self.step_index, self.total_steps, self.step, self.message
        )
    }
}

/// Everything the pipeline broadcasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A stage started or finished
    Progress(ProgressUpdate),

    /// Free-text log line
    Log(String),
}

impl PipelineEvent {
    /// Single-line rendering for consoles and status bars
    pub fn description(&self) -> String {
        match self {
            PipelineEvent::Progress(update) => update.to_string(),
            PipelineEvent::Log(line) => line.clone(),
        }
    }
}
