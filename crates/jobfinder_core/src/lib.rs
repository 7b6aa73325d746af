//! Job finder core: document validation, request building and the pure search state machines.
mod document;
mod effect;
mod error;
mod flight;
mod manual;
mod msg;
mod params;
mod posting;
mod request;
mod state;
mod update;
mod view_model;

pub use document::{
    format_file_size, validate, Document, FileCandidate, MediaType, SelectionSource,
    ADVISORY_SIZE_LIMIT_BYTES,
};
pub use effect::Effect;
pub use error::{ErrorKind, SearchError};
pub use flight::Generation;
pub use manual::{update_manual, ManualMsg, ManualState};
pub use msg::Msg;
pub use params::{
    InvalidLimit, ManualField, ManualQuery, ResultLimit, SearchParameters, DEFAULT_LOCATION,
};
pub use posting::JobPosting;
pub use request::{
    EndpointError, QueryRequest, ResumeUpload, SearchKind, SearchRequest, SearchRequestBuilder,
    TransmittableRequest, RESUME_FIELD,
};
pub use state::{AppState, Phase, WorkflowState};
pub use update::update;
pub use view_model::{AppViewModel, ManualViewModel, SelectedFileView};
