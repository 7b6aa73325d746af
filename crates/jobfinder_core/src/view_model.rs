use crate::{JobPosting, ManualQuery, Phase, ResultLimit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub size_label: String,
    pub exceeds_advisory_limit: bool,
}

/// Read-only snapshot of the résumé workflow for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// Drives the blocking overlay; true exactly while submitting.
    pub loading: bool,
    pub selected_file: Option<SelectedFileView>,
    pub location: String,
    pub limit: ResultLimit,
    pub results: Vec<JobPosting>,
    pub show_no_results: bool,
    pub error_message: Option<String>,
    pub submit_enabled: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManualViewModel {
    pub phase: Phase,
    pub loading: bool,
    pub query: ManualQuery,
    pub results: Vec<JobPosting>,
    pub show_no_results: bool,
    pub error_message: Option<String>,
    pub submit_enabled: bool,
    pub dirty: bool,
}
