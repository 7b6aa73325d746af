use bytes::Bytes;

use crate::SearchError;

/// Size above which the upload form warns. Never enforced.
pub const ADVISORY_SIZE_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Pdf,
    Docx,
    Doc,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Pdf, MediaType::Docx, MediaType::Doc];

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::Doc => "application/msword",
        }
    }

    /// Matches a declared content type, ignoring case and `;` parameters.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or(declared).trim();
        Self::ALL
            .into_iter()
            .find(|media| media.mime().eq_ignore_ascii_case(essence))
    }
}

/// How the user handed the file over. Validation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Dialog,
    DragDrop,
}

/// A file as reported by the picker or the drop target, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub declared_type: String,
    pub payload: Bytes,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            payload: payload.into(),
        }
    }
}

/// A validated résumé ready to be attached to a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    media_type: MediaType,
    size: u64,
    payload: Bytes,
}

impl Document {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn exceeds_advisory_limit(&self) -> bool {
        self.size > ADVISORY_SIZE_LIMIT_BYTES
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

/// Accepts PDF, DOCX and legacy DOC files by declared type only.
pub fn validate(candidate: FileCandidate) -> Result<Document, SearchError> {
    let Some(media_type) = MediaType::from_declared(&candidate.declared_type) else {
        return Err(SearchError::invalid_file_type());
    };
    Ok(Document {
        size: candidate.payload.len() as u64,
        name: candidate.name,
        media_type,
        payload: candidate.payload,
    })
}

/// `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB` ... on a 1024 base.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", UNITS[unit])
}
