use crate::{FileCandidate, Generation, JobPosting, ResultLimit, SearchError, SelectionSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file in the dialog or dropped one on the upload area.
    FileChosen {
        candidate: FileCandidate,
        source: SelectionSource,
    },
    /// User removed the selected file.
    FileCleared,
    /// User edited the preferred location.
    LocationChanged(String),
    /// User picked a different result count.
    LimitChanged(ResultLimit),
    /// User pressed "Find Jobs".
    SubmitClicked,
    /// Dispatcher outcome for the given generation.
    DispatchCompleted {
        generation: Generation,
        result: Result<Vec<JobPosting>, SearchError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
