use std::time::Duration;

use futures_util::StreamExt;
use jobfinder_core::{SearchError, SearchKind, TransmittableRequest};
use jobfinder_logging::{search_debug, search_info, search_warn};
use reqwest::multipart::{Form, Part};

use crate::decode::{classify_status, decode_manual_results, decode_resume_results};
use crate::{DispatchResult, EngineError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub connect_timeout: Duration,
    pub resume_deadline: Duration,
    pub manual_deadline: Duration,
    pub max_response_bytes: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            resume_deadline: Duration::from_secs(120),
            manual_deadline: Duration::from_secs(120),
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

impl DispatchSettings {
    pub fn deadline_for(&self, kind: SearchKind) -> Duration {
        match kind {
            SearchKind::Resume => self.resume_deadline,
            SearchKind::Manual => self.manual_deadline,
        }
    }
}

/// Sends one request and classifies the outcome. Implementations never return raw transport errors.
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, request: &TransmittableRequest) -> DispatchResult;
}

/// Runs `dispatcher` but gives up with [`SearchError::timeout`] once `deadline` passes.
pub async fn dispatch_with_deadline(
    dispatcher: &dyn Dispatcher,
    request: &TransmittableRequest,
    deadline: Duration,
) -> DispatchResult {
    match tokio::time::timeout(deadline, dispatcher.dispatch(request)).await {
        Ok(result) => result,
        Err(_) => {
            search_warn!(
                "Request to {} abandoned after {:?}",
                request.url(),
                deadline
            );
            Err(SearchError::timeout())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn prepare(&self, request: &TransmittableRequest) -> Result<reqwest::RequestBuilder, SearchError> {
        match request {
            TransmittableRequest::Upload(upload) => {
                let part = Part::bytes(upload.payload.to_vec())
                    .file_name(upload.file_name.clone())
                    .mime_str(upload.media_type.mime())
                    .map_err(map_reqwest_error)?;
                let form = Form::new().part(upload.field_name, part);
                Ok(self.client.post(upload.url.clone()).multipart(form))
            }
            TransmittableRequest::Query(query) => {
                Ok(self.client.post(query.url.clone()).json(&query.body))
            }
        }
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SearchError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: &TransmittableRequest) -> DispatchResult {
        search_info!("Dispatching {:?} search to {}", request.kind(), request.url());
        let response = self
            .prepare(request)?
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        search_debug!("Response status {} from {}", status, request.url());
        if !status.is_success() {
            // The body only refines the message; losing it is not fatal.
            let body = self.read_body(response).await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body));
        }

        let body = self.read_body(response).await?;
        match request.kind() {
            SearchKind::Resume => decode_resume_results(&body),
            SearchKind::Manual => decode_manual_results(&body),
        }
    }
}

fn too_large(max_bytes: u64, actual: u64) -> SearchError {
    SearchError::malformed_response(format!(
        "response too large (max {max_bytes} bytes, got at least {actual})"
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::timeout();
    }
    if err.is_connect() {
        return SearchError::transport(format!("Could not reach the job search service: {err}"));
    }
    SearchError::transport(err.to_string())
}
