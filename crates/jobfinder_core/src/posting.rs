use serde::{Deserialize, Serialize};

/// One listing as returned by the search service. Order is relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
    pub apply_link: String,
    /// Upstream provider that supplied the listing.
    #[serde(default)]
    pub source: String,
}
