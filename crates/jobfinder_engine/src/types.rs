use jobfinder_core::{Generation, JobPosting, SearchError};

/// Outcome of one dispatch, already classified.
pub type DispatchResult = Result<Vec<JobPosting>, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        generation: Generation,
        result: DispatchResult,
    },
}

impl EngineEvent {
    pub fn generation(&self) -> Generation {
        match self {
            EngineEvent::Completed { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("search {in_flight} is still in flight")]
    Busy { in_flight: Generation },
    #[error("dispatches must be submitted from within a tokio runtime")]
    NoRuntime,
    #[error("failed to build http client: {0}")]
    Client(String),
}
