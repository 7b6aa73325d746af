//! Job finder engine: HTTP dispatch, response decoding and failure classification.
mod decode;
mod dispatch;
mod engine;
mod types;

pub use decode::{classify_status, decode_manual_results, decode_resume_results, error_detail};
pub use dispatch::{dispatch_with_deadline, DispatchSettings, Dispatcher, ReqwestDispatcher};
pub use engine::EngineHandle;
pub use types::{DispatchResult, EngineError, EngineEvent};
