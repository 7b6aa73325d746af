use std::sync::Arc;

use jobfinder_core::{Generation, SearchError, TransmittableRequest};
use jobfinder_logging::{search_debug, search_error, search_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::dispatch::{dispatch_with_deadline, DispatchSettings, Dispatcher, ReqwestDispatcher};
use crate::{EngineError, EngineEvent};

struct InFlight {
    generation: Generation,
    cancel: CancellationToken,
}

/// Runs dispatches on tokio tasks, one at a time, and reports completions as [`EngineEvent`]s.
pub struct EngineHandle {
    dispatcher: Arc<dyn Dispatcher>,
    settings: DispatchSettings,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    event_rx: mpsc::UnboundedReceiver<EngineEvent>,
    in_flight: Option<InFlight>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, settings: DispatchSettings) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            dispatcher,
            settings,
            event_tx,
            event_rx,
            in_flight: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Engine backed by a [`ReqwestDispatcher`] built from the same settings.
    pub fn with_reqwest(settings: DispatchSettings) -> Result<Self, EngineError> {
        let dispatcher = ReqwestDispatcher::new(settings.clone())?;
        Ok(Self::new(Arc::new(dispatcher), settings))
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight.as_ref().map(|flight| flight.generation)
    }

    /// Starts `request` unless another dispatch is still outstanding.
    pub fn submit(
        &mut self,
        generation: Generation,
        request: TransmittableRequest,
    ) -> Result<(), EngineError> {
        if let Some(current) = &self.in_flight {
            search_warn!(
                "Rejecting search {} while search {} is in flight",
                generation,
                current.generation
            );
            return Err(EngineError::Busy {
                in_flight: current.generation,
            });
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        let cancel = self.shutdown.child_token();
        let deadline = self.settings.deadline_for(request.kind());
        let dispatcher = self.dispatcher.clone();
        let event_tx = self.event_tx.clone();
        let token = cancel.clone();

        let mut task = runtime.spawn(async move {
            dispatch_with_deadline(dispatcher.as_ref(), &request, deadline).await
        });
        let abort = task.abort_handle();
        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    abort.abort();
                    search_debug!("Search {} cancelled before completion", generation);
                }
                joined = &mut task => {
                    let result = joined.unwrap_or_else(|err| {
                        search_error!("Search {} task failed: {}", generation, err);
                        Err(SearchError::transport(
                            "The search stopped unexpectedly. Please try again.",
                        ))
                    });
                    let _ = event_tx.send(EngineEvent::Completed { generation, result });
                }
            }
        });

        self.in_flight = Some(InFlight { generation, cancel });
        Ok(())
    }

    /// Waits for the in-flight dispatch to finish. Returns `None` when nothing is pending.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        while self.in_flight.is_some() {
            let event = self.event_rx.recv().await?;
            if let Some(event) = self.settle(event) {
                return Some(event);
            }
        }
        None
    }

    pub fn try_recv(&mut self) -> Option<EngineEvent> {
        loop {
            let event = self.event_rx.try_recv().ok()?;
            if let Some(event) = self.settle(event) {
                return Some(event);
            }
        }
    }

    /// Abandons the in-flight dispatch, if any. No event is reported for it.
    pub fn cancel(&mut self) -> Option<Generation> {
        let flight = self.in_flight.take()?;
        flight.cancel.cancel();
        while self.event_rx.try_recv().is_ok() {}
        Some(flight.generation)
    }

    /// Accepts only the completion of the tracked dispatch.
    fn settle(&mut self, event: EngineEvent) -> Option<EngineEvent> {
        if self.in_flight() != Some(event.generation()) {
            search_debug!("Dropping completion of abandoned search {}", event.generation());
            return None;
        }
        self.in_flight = None;
        Some(event)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
