use jobfinder_core::{
    update, AppState, AppViewModel, Effect, FileCandidate, Generation, Msg, ResultLimit,
    SearchError, SearchRequest, SearchRequestBuilder, SelectionSource,
};
use jobfinder_engine::{EngineEvent, EngineHandle};
use jobfinder_logging::{search_debug, search_error};

use crate::{AppConfig, AppError, ResultsPresenter};

/// Drives the résumé workflow: owns the state, runs effects, feeds the presenter.
pub struct WorkflowController<P> {
    state: AppState,
    requests: SearchRequestBuilder,
    engine: EngineHandle,
    presenter: P,
}

impl<P: ResultsPresenter<AppViewModel>> WorkflowController<P> {
    pub fn new(requests: SearchRequestBuilder, engine: EngineHandle, presenter: P) -> Self {
        Self {
            state: AppState::new(),
            requests,
            engine,
            presenter,
        }
    }

    pub fn from_config(config: &AppConfig, presenter: P) -> Result<Self, AppError> {
        let engine = EngineHandle::with_reqwest(config.dispatch.clone())?;
        Ok(Self::new(config.requests.clone(), engine, presenter))
    }

    pub fn choose_file(&mut self, candidate: FileCandidate) {
        self.dispatch_msg(Msg::FileChosen {
            candidate,
            source: SelectionSource::Dialog,
        });
    }

    pub fn drop_file(&mut self, candidate: FileCandidate) {
        self.dispatch_msg(Msg::FileChosen {
            candidate,
            source: SelectionSource::DragDrop,
        });
    }

    pub fn clear_file(&mut self) {
        self.dispatch_msg(Msg::FileCleared);
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.dispatch_msg(Msg::LocationChanged(location.into()));
    }

    pub fn set_limit(&mut self, limit: ResultLimit) {
        self.dispatch_msg(Msg::LimitChanged(limit));
    }

    pub fn submit(&mut self) {
        self.dispatch_msg(Msg::SubmitClicked);
    }

    /// Waits for the in-flight search, applies its outcome and returns true.
    /// Returns false immediately when nothing is in flight.
    pub async fn await_completion(&mut self) -> bool {
        match self.engine.next_event().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    /// Submits and waits for the outcome.
    pub async fn search(&mut self) -> AppViewModel {
        self.submit();
        self.await_completion().await;
        self.view()
    }

    /// Applies any completion that already arrived, without waiting.
    pub fn poll(&mut self) {
        while let Some(event) = self.engine.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            self.presenter.render(&view);
        }
        self.run_effects(effects);
    }

    fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Completed { generation, result } => {
                self.dispatch_msg(Msg::DispatchCompleted { generation, result });
            }
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        let refused = execute_effects::<AppViewModel, _>(
            effects,
            &mut self.engine,
            &self.requests,
            &mut self.presenter,
        );
        for (generation, err) in refused {
            self.dispatch_msg(Msg::DispatchCompleted {
                generation,
                result: Err(err),
            });
        }
    }
}

/// Executes `effects` for either controller.
///
/// Returns the dispatches the engine refused, already classified, so the caller
/// can feed them back as completions.
pub(crate) fn execute_effects<V, P>(
    effects: Vec<Effect>,
    engine: &mut EngineHandle,
    requests: &SearchRequestBuilder,
    presenter: &mut P,
) -> Vec<(Generation, SearchError)>
where
    P: ResultsPresenter<V>,
{
    let mut refused = Vec::new();
    for effect in effects {
        match effect {
            Effect::Dispatch {
                generation,
                request,
            } => {
                if let Err(err) = start_dispatch(engine, requests, generation, &request) {
                    refused.push((generation, err));
                }
            }
            Effect::FocusResults => presenter.focus_results(),
        }
    }
    refused
}

/// Builds and submits `request`. A refusal from the engine comes back as a classified error.
fn start_dispatch(
    engine: &mut EngineHandle,
    requests: &SearchRequestBuilder,
    generation: Generation,
    request: &SearchRequest,
) -> Result<(), SearchError> {
    let transmittable = requests.build(request);
    search_debug!(
        "Starting search {} against {}",
        generation,
        transmittable.url()
    );
    engine.submit(generation, transmittable).map_err(|err| {
        search_error!("Search {} could not be started: {}", generation, err);
        SearchError::transport(err.to_string())
    })
}
