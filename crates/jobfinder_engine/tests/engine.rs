use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobfinder_core::{
    ErrorKind, Generation, ManualQuery, SearchRequestBuilder, TransmittableRequest,
};
use jobfinder_engine::{
    DispatchResult, DispatchSettings, Dispatcher, EngineError, EngineEvent, EngineHandle,
};

/// Answers after `delay`, counting every call.
struct SlowDispatcher {
    delay: Duration,
    calls: AtomicUsize,
}

impl SlowDispatcher {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl Dispatcher for SlowDispatcher {
    async fn dispatch(&self, _request: &TransmittableRequest) -> DispatchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

/// Sleeps, then records that it got to the end.
struct FinishFlagDispatcher {
    delay: Duration,
    finished: AtomicBool,
}

#[async_trait::async_trait]
impl Dispatcher for FinishFlagDispatcher {
    async fn dispatch(&self, _request: &TransmittableRequest) -> DispatchResult {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct PanickingDispatcher;

#[async_trait::async_trait]
impl Dispatcher for PanickingDispatcher {
    async fn dispatch(&self, _request: &TransmittableRequest) -> DispatchResult {
        panic!("dispatcher blew up");
    }
}

fn manual_request() -> TransmittableRequest {
    SearchRequestBuilder::new("http://localhost:8000")
        .unwrap()
        .build_manual(&ManualQuery::default())
}

fn settings(deadline: Duration) -> DispatchSettings {
    DispatchSettings {
        resume_deadline: deadline,
        manual_deadline: deadline,
        ..DispatchSettings::default()
    }
}

#[tokio::test]
async fn completion_is_reported_with_its_generation() {
    let dispatcher = SlowDispatcher::new(Duration::from_millis(5));
    let mut engine = EngineHandle::new(dispatcher.clone(), settings(Duration::from_secs(5)));

    engine
        .submit(Generation::new(1), manual_request())
        .expect("submit");
    assert_eq!(engine.in_flight(), Some(Generation::new(1)));

    let event = engine.next_event().await.expect("event");
    assert_eq!(
        event,
        EngineEvent::Completed {
            generation: Generation::new(1),
            result: Ok(Vec::new()),
        }
    );
    assert_eq!(engine.in_flight(), None);
    assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn second_submit_is_rejected_while_one_is_in_flight() {
    let dispatcher = SlowDispatcher::new(Duration::from_millis(50));
    let mut engine = EngineHandle::new(dispatcher.clone(), settings(Duration::from_secs(5)));

    engine.submit(Generation::new(1), manual_request()).unwrap();
    let err = engine
        .submit(Generation::new(2), manual_request())
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Busy {
            in_flight: Generation::new(1)
        }
    );

    engine.next_event().await.expect("event");
    assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);

    // Free again once the first one settled.
    engine.submit(Generation::new(2), manual_request()).unwrap();
    let event = engine.next_event().await.expect("event");
    assert_eq!(event.generation(), Generation::new(2));
    assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deadline_turns_slow_dispatch_into_timeout() {
    let dispatcher = SlowDispatcher::new(Duration::from_secs(30));
    let mut engine = EngineHandle::new(dispatcher, settings(Duration::from_millis(20)));

    engine.submit(Generation::new(7), manual_request()).unwrap();
    let event = engine.next_event().await.expect("event");
    let EngineEvent::Completed { generation, result } = event;
    assert_eq!(generation, Generation::new(7));
    assert_eq!(result.unwrap_err().kind, ErrorKind::Timeout);
    assert_eq!(engine.in_flight(), None);
}

#[tokio::test]
async fn next_event_returns_none_when_idle() {
    let mut engine = EngineHandle::new(
        SlowDispatcher::new(Duration::ZERO),
        DispatchSettings::default(),
    );
    assert_eq!(engine.next_event().await, None);
}

#[tokio::test]
async fn cancelled_dispatch_reports_nothing() {
    let dispatcher = SlowDispatcher::new(Duration::from_millis(100));
    let mut engine = EngineHandle::new(dispatcher, settings(Duration::from_secs(5)));

    engine.submit(Generation::new(3), manual_request()).unwrap();
    assert_eq!(engine.cancel(), Some(Generation::new(3)));
    assert_eq!(engine.in_flight(), None);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(engine.try_recv(), None);
}

#[test]
fn submit_outside_runtime_is_an_error() {
    let mut engine = EngineHandle::new(
        SlowDispatcher::new(Duration::ZERO),
        DispatchSettings::default(),
    );
    assert_eq!(
        engine.submit(Generation::new(1), manual_request()),
        Err(EngineError::NoRuntime)
    );
    assert_eq!(engine.in_flight(), None);
}

#[tokio::test]
async fn completion_of_a_cancelled_search_is_not_reported_for_the_next_one() {
    let dispatcher = SlowDispatcher::new(Duration::ZERO);
    let mut engine = EngineHandle::new(dispatcher, settings(Duration::from_secs(5)));

    engine.submit(Generation::new(1), manual_request()).unwrap();
    // Let the first search finish and queue its completion.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(engine.cancel(), Some(Generation::new(1)));

    engine.submit(Generation::new(2), manual_request()).unwrap();
    let event = engine.next_event().await.expect("event");
    assert_eq!(event.generation(), Generation::new(2));
    assert_eq!(engine.in_flight(), None);
}

#[tokio::test]
async fn panicking_dispatch_still_completes_the_search() {
    let mut engine = EngineHandle::new(
        Arc::new(PanickingDispatcher),
        settings(Duration::from_secs(5)),
    );

    engine.submit(Generation::new(1), manual_request()).unwrap();
    let event = tokio::time::timeout(Duration::from_secs(2), engine.next_event())
        .await
        .expect("completion before timeout")
        .expect("event");

    let EngineEvent::Completed { generation, result } = event;
    assert_eq!(generation, Generation::new(1));
    assert_eq!(result.unwrap_err().kind, ErrorKind::TransportError);
    assert_eq!(engine.in_flight(), None);
}

#[tokio::test]
async fn dropping_the_handle_stops_the_in_flight_search() {
    let dispatcher = Arc::new(FinishFlagDispatcher {
        delay: Duration::from_millis(50),
        finished: AtomicBool::new(false),
    });
    let mut engine = EngineHandle::new(dispatcher.clone(), settings(Duration::from_secs(5)));

    engine.submit(Generation::new(1), manual_request()).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(engine);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!dispatcher.finished.load(Ordering::SeqCst));
}
