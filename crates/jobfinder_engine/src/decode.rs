use jobfinder_core::{JobPosting, SearchError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ResumeEnvelope {
    /// Missing or null means no matches, not an error.
    #[serde(default)]
    results: Option<Vec<JobPosting>>,
}

/// Decodes the `{"results": [...]}` envelope of a résumé search.
pub fn decode_resume_results(body: &[u8]) -> Result<Vec<JobPosting>, SearchError> {
    let envelope: ResumeEnvelope =
        serde_json::from_slice(body).map_err(|err| SearchError::malformed_response(err))?;
    Ok(envelope.results.unwrap_or_default())
}

/// Decodes the bare array returned by a manual search.
pub fn decode_manual_results(body: &[u8]) -> Result<Vec<JobPosting>, SearchError> {
    serde_json::from_slice(body).map_err(|err| SearchError::malformed_response(err))
}

/// Extracts the `detail` field of an error body, if the body is JSON and has one.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Maps a non-success status (and its body) onto the error taxonomy.
pub fn classify_status(status: u16, body: &[u8]) -> SearchError {
    let detail = error_detail(body);
    match status {
        415 => SearchError::unsupported_media_type(),
        500..=599 => SearchError::server_error(status, detail.as_deref()),
        _ => SearchError::unexpected_status(status, detail.as_deref()),
    }
}
