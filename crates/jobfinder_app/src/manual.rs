use jobfinder_core::{
    update_manual, ManualField, ManualMsg, ManualState, ManualViewModel,
    SearchRequestBuilder,
};
use jobfinder_engine::{EngineEvent, EngineHandle};

use crate::controller::execute_effects;
use crate::{AppConfig, AppError, ResultsPresenter};

/// Keyword search controller. Same lifecycle as the résumé workflow, no file.
pub struct ManualSearchController<P> {
    state: ManualState,
    requests: SearchRequestBuilder,
    engine: EngineHandle,
    presenter: P,
}

impl<P: ResultsPresenter<ManualViewModel>> ManualSearchController<P> {
    pub fn new(requests: SearchRequestBuilder, engine: EngineHandle, presenter: P) -> Self {
        Self {
            state: ManualState::new(),
            requests,
            engine,
            presenter,
        }
    }

    pub fn from_config(config: &AppConfig, presenter: P) -> Result<Self, AppError> {
        let engine = EngineHandle::with_reqwest(config.dispatch.clone())?;
        Ok(Self::new(config.requests.clone(), engine, presenter))
    }

    pub fn set_field(&mut self, field: ManualField, value: impl Into<String>) {
        self.dispatch_msg(ManualMsg::FieldChanged {
            field,
            value: value.into(),
        });
    }

    pub fn submit(&mut self) {
        self.dispatch_msg(ManualMsg::Submitted);
    }

    pub async fn await_completion(&mut self) -> bool {
        match self.engine.next_event().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    pub async fn search(&mut self) -> ManualViewModel {
        self.submit();
        self.await_completion().await;
        self.view()
    }

    pub fn poll(&mut self) {
        while let Some(event) = self.engine.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn view(&self) -> ManualViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &ManualState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn dispatch_msg(&mut self, msg: ManualMsg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update_manual(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            self.presenter.render(&view);
        }
        let refused = execute_effects::<ManualViewModel, _>(
            effects,
            &mut self.engine,
            &self.requests,
            &mut self.presenter,
        );
        for (generation, err) in refused {
            self.dispatch_msg(ManualMsg::DispatchCompleted {
                generation,
                result: Err(err),
            });
        }
    }

    fn apply_event(&mut self, event: EngineEvent) {
        let EngineEvent::Completed { generation, result } = event;
        self.dispatch_msg(ManualMsg::DispatchCompleted { generation, result });
    }
}
