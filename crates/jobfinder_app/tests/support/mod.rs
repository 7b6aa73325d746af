#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobfinder_core::{FileCandidate, TransmittableRequest};
use jobfinder_engine::{DispatchResult, DispatchSettings, Dispatcher};
use jobfinder_app::ResultsPresenter;
use serde_json::json;

/// Keeps every snapshot it was handed.
pub struct RecordingPresenter<V> {
    pub renders: Vec<V>,
    pub focus_count: usize,
}

impl<V> Default for RecordingPresenter<V> {
    fn default() -> Self {
        Self {
            renders: Vec::new(),
            focus_count: 0,
        }
    }
}

impl<V: Clone> ResultsPresenter<V> for RecordingPresenter<V> {
    fn render(&mut self, view: &V) {
        self.renders.push(view.clone());
    }

    fn focus_results(&mut self) {
        self.focus_count += 1;
    }
}

/// Counts calls and answers with an empty list after `delay`.
pub struct CountingDispatcher {
    pub calls: AtomicUsize,
    delay: Duration,
}

impl CountingDispatcher {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Dispatcher for CountingDispatcher {
    async fn dispatch(&self, _request: &TransmittableRequest) -> DispatchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

pub fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, "application/pdf", &b"%PDF-1.7 resume body"[..])
}

pub fn settings_with_deadline(deadline: Duration) -> DispatchSettings {
    DispatchSettings {
        resume_deadline: deadline,
        manual_deadline: deadline,
        ..DispatchSettings::default()
    }
}

pub fn job(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "description": "Build things",
        "posted": "2025-06-01",
        "apply_link": format!("https://jobs.example/{title}"),
        "source": "RapidAPI",
    })
}
