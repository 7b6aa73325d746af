use bytes::Bytes;
use url::Url;

use crate::{Document, ManualQuery, MediaType, SearchParameters};

/// Multipart field the service reads the résumé from.
pub const RESUME_FIELD: &str = "resume";
const RESUME_SEARCH_PATH: &str = "search-jobs";
const MANUAL_SEARCH_PATH: &str = "manual-search";

/// What the user asked for. Exactly one variant per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Resume {
        document: Document,
        params: SearchParameters,
    },
    Manual(ManualQuery),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Resume,
    Manual,
}

impl SearchRequest {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchRequest::Resume { .. } => SearchKind::Resume,
            SearchRequest::Manual(_) => SearchKind::Manual,
        }
    }
}

/// Multipart upload: location and limit travel in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub url: Url,
    pub field_name: &'static str,
    pub file_name: String,
    pub media_type: MediaType,
    pub payload: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub url: Url,
    pub body: ManualQuery,
}

/// A request fully resolved against the service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmittableRequest {
    Upload(ResumeUpload),
    Query(QueryRequest),
}

impl TransmittableRequest {
    pub fn url(&self) -> &Url {
        match self {
            TransmittableRequest::Upload(upload) => &upload.url,
            TransmittableRequest::Query(query) => &query.url,
        }
    }

    pub fn kind(&self) -> SearchKind {
        match self {
            TransmittableRequest::Upload(_) => SearchKind::Resume,
            TransmittableRequest::Query(_) => SearchKind::Manual,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    Invalid(#[from] url::ParseError),
    #[error("endpoint url must use http or https (got {0})")]
    UnsupportedScheme(String),
}

/// Pure transform from [`SearchRequest`] to [`TransmittableRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequestBuilder {
    resume_url: Url,
    manual_url: Url,
}

impl SearchRequestBuilder {
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        Self::from_url(Url::parse(base.trim())?)
    }

    pub fn from_url(mut base: Url) -> Result<Self, EndpointError> {
        if !matches!(base.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(base.scheme().to_string()));
        }
        // Without the trailing slash `join` would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            resume_url: base.join(RESUME_SEARCH_PATH)?,
            manual_url: base.join(MANUAL_SEARCH_PATH)?,
        })
    }

    pub fn build(&self, request: &SearchRequest) -> TransmittableRequest {
        match request {
            SearchRequest::Resume { document, params } => self.build_resume(document, params),
            SearchRequest::Manual(query) => self.build_manual(query),
        }
    }

    pub fn build_resume(
        &self,
        document: &Document,
        params: &SearchParameters,
    ) -> TransmittableRequest {
        let mut url = self.resume_url.clone();
        url.query_pairs_mut()
            .append_pair("location", &params.location)
            .append_pair("limit", &params.limit.get().to_string());

        TransmittableRequest::Upload(ResumeUpload {
            url,
            field_name: RESUME_FIELD,
            file_name: document.name().to_string(),
            media_type: document.media_type(),
            payload: document.payload().clone(),
        })
    }

    pub fn build_manual(&self, query: &ManualQuery) -> TransmittableRequest {
        TransmittableRequest::Query(QueryRequest {
            url: self.manual_url.clone(),
            body: query.clone(),
        })
    }
}
