use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local validation rejection; never reaches the network.
    InvalidFileType,
    /// Submission attempted without a document.
    NoFileSelected,
    Timeout,
    /// HTTP 415.
    UnsupportedMediaType,
    /// HTTP 5xx.
    ServerError { status: u16 },
    /// Any other non-success status.
    UnexpectedStatus { status: u16 },
    /// Success status with a body that could not be decoded.
    MalformedResponse,
    TransportError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidFileType => write!(f, "invalid file type"),
            ErrorKind::NoFileSelected => write!(f, "no file selected"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::UnsupportedMediaType => write!(f, "unsupported media type"),
            ErrorKind::ServerError { status } => write!(f, "server error {status}"),
            ErrorKind::UnexpectedStatus { status } => write!(f, "unexpected status {status}"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
            ErrorKind::TransportError => write!(f, "transport error"),
        }
    }
}

/// A classified failure plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SearchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_file_type() -> Self {
        Self::new(
            ErrorKind::InvalidFileType,
            "Please select a valid PDF or DOCX file.",
        )
    }

    pub fn no_file_selected() -> Self {
        Self::new(ErrorKind::NoFileSelected, "Please select a PDF or DOCX Resume.")
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, "Request timed out. Please try again.")
    }

    pub fn unsupported_media_type() -> Self {
        Self::new(
            ErrorKind::UnsupportedMediaType,
            "Invalid file format. Please upload a PDF or DOCX file.",
        )
    }

    pub fn server_error(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("Server error: {detail}"),
            None => "Server error. Please try again later.".to_string(),
        };
        Self::new(ErrorKind::ServerError { status }, message)
    }

    pub fn unexpected_status(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => detail.to_string(),
            None => format!("Request failed with status {status}"),
        };
        Self::new(ErrorKind::UnexpectedStatus { status }, message)
    }

    pub fn malformed_response(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MalformedResponse,
            format!("Unexpected response from the job search service: {reason}"),
        )
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportError, message)
    }
}
