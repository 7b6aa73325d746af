use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "United States";

/// Number of postings requested from the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLimit {
    L25,
    #[default]
    L50,
    L75,
    L100,
}

impl ResultLimit {
    pub const ALL: [ResultLimit; 4] = [
        ResultLimit::L25,
        ResultLimit::L50,
        ResultLimit::L75,
        ResultLimit::L100,
    ];

    pub fn get(self) -> u32 {
        match self {
            ResultLimit::L25 => 25,
            ResultLimit::L50 => 50,
            ResultLimit::L75 => 75,
            ResultLimit::L100 => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("result limit must be one of 25, 50, 75 or 100 (got {0})")]
pub struct InvalidLimit(pub u32);

impl TryFrom<u32> for ResultLimit {
    type Error = InvalidLimit;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|limit| limit.get() == value)
            .ok_or(InvalidLimit(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    /// Free text; may be empty.
    pub location: String,
    pub limit: ResultLimit,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            limit: ResultLimit::default(),
        }
    }
}

/// Keyword search fields, sent to the service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualQuery {
    pub job: String,
    pub location: String,
    pub experience: String,
    pub category: String,
}

impl Default for ManualQuery {
    fn default() -> Self {
        Self {
            job: "Software Engineer".to_string(),
            location: "Kochi".to_string(),
            experience: "experienced".to_string(),
            category: "full-time".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Job,
    Location,
    Experience,
    Category,
}

impl ManualQuery {
    pub fn set(&mut self, field: ManualField, value: String) {
        match field {
            ManualField::Job => self.job = value,
            ManualField::Location => self.location = value,
            ManualField::Experience => self.experience = value,
            ManualField::Category => self.category = value,
        }
    }
}
