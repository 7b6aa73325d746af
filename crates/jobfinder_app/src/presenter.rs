use chrono::{DateTime, NaiveDate};
use jobfinder_core::JobPosting;

/// Presentation boundary. Receives snapshots; never sees controller state directly.
pub trait ResultsPresenter<V> {
    /// Called after every change with a fresh snapshot.
    fn render(&mut self, view: &V);

    /// Called once per non-empty result set, after the matching `render`.
    fn focus_results(&mut self) {}
}

/// Formats the `posted` field for display, e.g. `Jun 1, 2025`.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; anything else yields `None`.
pub fn posted_label(posting: &JobPosting) -> Option<String> {
    let raw = posting.posted.as_deref()?.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%b %-d, %Y").to_string())
}
