use jobfinder_logging::{search_debug, search_info, search_warn};

use crate::{validate, AppState, Effect, Msg, SearchError, SearchRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen { candidate, source } => {
            if state.workflow().is_submitting() {
                search_warn!(
                    "Ignoring {:?} selection of {:?} while a search is in flight",
                    source,
                    candidate.name
                );
                return (state, Vec::new());
            }
            match validate(candidate) {
                Ok(document) => {
                    search_debug!(
                        "Selected {:?} via {:?} ({:?}, {} bytes)",
                        document.name(),
                        source,
                        document.media_type(),
                        document.size()
                    );
                    state.select_document(document);
                }
                Err(err) => {
                    search_info!("Rejected file from {:?}: {}", source, err.kind);
                    state.set_notice(err);
                }
            }
            Vec::new()
        }
        Msg::FileCleared => {
            if state.workflow().is_submitting() {
                search_warn!("Ignoring file removal while a search is in flight");
                return (state, Vec::new());
            }
            state.clear_document();
            Vec::new()
        }
        Msg::LocationChanged(location) => {
            state.set_location(location);
            Vec::new()
        }
        Msg::LimitChanged(limit) => {
            state.set_limit(limit);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if let Some(generation) = state.in_flight() {
                search_warn!("Submit ignored: search {} is still in flight", generation);
                return (state, Vec::new());
            }
            let Some(document) = state.document().cloned() else {
                search_info!("Submit rejected: no document selected");
                state.set_notice(SearchError::no_file_selected());
                return (state, Vec::new());
            };
            let params = state.params().clone();
            let generation = state.begin_submission();
            search_debug!("Submitting search {} for {:?}", generation, document.name());
            vec![Effect::Dispatch {
                generation,
                request: SearchRequest::Resume { document, params },
            }]
        }
        Msg::DispatchCompleted { generation, result } => {
            if !state.finish_flight(generation) {
                search_warn!("Discarding stale completion for search {}", generation);
                return (state, Vec::new());
            }
            match result {
                Ok(results) => {
                    search_info!("Search {} returned {} postings", generation, results.len());
                    let focus = !results.is_empty();
                    state.succeed(results);
                    if focus {
                        vec![Effect::FocusResults]
                    } else {
                        Vec::new()
                    }
                }
                Err(err) => {
                    search_info!("Search {} failed ({}): {}", generation, err.kind, err);
                    state.fail(err);
                    Vec::new()
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
