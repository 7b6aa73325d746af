use crate::flight::FlightTracker;
use crate::view_model::{AppViewModel, SelectedFileView};
use crate::{Document, Generation, JobPosting, ResultLimit, SearchError, SearchParameters};

/// Where the résumé workflow currently is. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    AwaitingFile,
    Submitting,
    Succeeded(Vec<JobPosting>),
    Failed(SearchError),
}

/// Payload-free discriminant of [`WorkflowState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingFile,
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn phase(&self) -> Phase {
        match self {
            WorkflowState::Idle => Phase::Idle,
            WorkflowState::AwaitingFile => Phase::AwaitingFile,
            WorkflowState::Submitting => Phase::Submitting,
            WorkflowState::Succeeded(_) => Phase::Succeeded,
            WorkflowState::Failed(_) => Phase::Failed,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub(crate) fn results(&self) -> &[JobPosting] {
        match self {
            WorkflowState::Succeeded(results) => results,
            _ => &[],
        }
    }

    pub(crate) fn failure(&self) -> Option<&SearchError> {
        match self {
            WorkflowState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    workflow: WorkflowState,
    document: Option<Document>,
    params: SearchParameters,
    /// Inline validation or guard message; cleared by the next accepted action.
    notice: Option<SearchError>,
    flight: FlightTracker,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.workflow.is_submitting();
        let results = self.workflow.results().to_vec();
        let show_no_results = matches!(&self.workflow, WorkflowState::Succeeded(list) if list.is_empty());
        let error_message = self
            .notice
            .as_ref()
            .or_else(|| self.workflow.failure())
            .map(|err| err.message.clone());

        AppViewModel {
            phase: self.workflow.phase(),
            loading,
            selected_file: self.document.as_ref().map(|doc| SelectedFileView {
                name: doc.name().to_string(),
                size_label: doc.size_label(),
                exceeds_advisory_limit: doc.exceeds_advisory_limit(),
            }),
            location: self.params.location.clone(),
            limit: self.params.limit,
            results,
            show_no_results,
            error_message,
            submit_enabled: !loading && self.document.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn params(&self) -> &SearchParameters {
        &self.params
    }

    pub fn notice(&self) -> Option<&SearchError> {
        self.notice.as_ref()
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.flight.current()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_document(&mut self, document: Document) {
        self.document = Some(document);
        self.notice = None;
        self.workflow = WorkflowState::AwaitingFile;
        self.dirty = true;
    }

    pub(crate) fn clear_document(&mut self) {
        self.document = None;
        self.notice = None;
        self.workflow = WorkflowState::Idle;
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: SearchError) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn set_location(&mut self, location: String) {
        if self.params.location != location {
            self.params.location = location;
            self.dirty = true;
        }
    }

    pub(crate) fn set_limit(&mut self, limit: ResultLimit) {
        if self.params.limit != limit {
            self.params.limit = limit;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submission(&mut self) -> Generation {
        self.notice = None;
        self.workflow = WorkflowState::Submitting;
        self.dirty = true;
        self.flight.begin()
    }

    pub(crate) fn finish_flight(&mut self, generation: Generation) -> bool {
        self.flight.complete(generation)
    }

    pub(crate) fn succeed(&mut self, results: Vec<JobPosting>) {
        self.workflow = WorkflowState::Succeeded(results);
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, err: SearchError) {
        self.workflow = WorkflowState::Failed(err);
        self.dirty = true;
    }
}
