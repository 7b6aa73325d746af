//! Keyword search: the résumé workflow without file gating.
use jobfinder_logging::{search_info, search_warn};

use crate::flight::FlightTracker;
use crate::view_model::ManualViewModel;
use crate::{
    Effect, Generation, JobPosting, ManualField, ManualQuery, SearchError, SearchRequest,
    WorkflowState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualMsg {
    FieldChanged { field: ManualField, value: String },
    Submitted,
    DispatchCompleted {
        generation: Generation,
        result: Result<Vec<JobPosting>, SearchError>,
    },
    NoOp,
}

/// Never enters [`WorkflowState::AwaitingFile`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManualState {
    workflow: WorkflowState,
    query: ManualQuery,
    flight: FlightTracker,
    dirty: bool,
}

impl ManualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ManualViewModel {
        let loading = self.workflow.is_submitting();
        ManualViewModel {
            phase: self.workflow.phase(),
            loading,
            query: self.query.clone(),
            results: self.workflow.results().to_vec(),
            show_no_results: matches!(&self.workflow, WorkflowState::Succeeded(list) if list.is_empty()),
            error_message: self.workflow.failure().map(|err| err.message.clone()),
            submit_enabled: !loading,
            dirty: self.dirty,
        }
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn query(&self) -> &ManualQuery {
        &self.query
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.flight.current()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

pub fn update_manual(mut state: ManualState, msg: ManualMsg) -> (ManualState, Vec<Effect>) {
    let effects = match msg {
        ManualMsg::FieldChanged { field, value } => {
            state.query.set(field, value);
            state.dirty = true;
            Vec::new()
        }
        ManualMsg::Submitted => {
            if let Some(generation) = state.flight.current() {
                search_warn!("Manual submit ignored: search {} is still in flight", generation);
                return (state, Vec::new());
            }
            state.workflow = WorkflowState::Submitting;
            state.dirty = true;
            let generation = state.flight.begin();
            vec![Effect::Dispatch {
                generation,
                request: SearchRequest::Manual(state.query.clone()),
            }]
        }
        ManualMsg::DispatchCompleted { generation, result } => {
            if !state.flight.complete(generation) {
                search_warn!("Discarding stale manual completion for search {}", generation);
                return (state, Vec::new());
            }
            state.workflow = match result {
                Ok(results) => {
                    search_info!(
                        "Manual search {} returned {} postings",
                        generation,
                        results.len()
                    );
                    WorkflowState::Succeeded(results)
                }
                Err(err) => {
                    search_info!("Manual search {} failed ({}): {}", generation, err.kind, err);
                    WorkflowState::Failed(err)
                }
            };
            state.dirty = true;
            Vec::new()
        }
        ManualMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
