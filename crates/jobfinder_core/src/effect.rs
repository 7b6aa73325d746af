use crate::{Generation, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `request` to the search service, tagged with `generation`.
    Dispatch {
        generation: Generation,
        request: SearchRequest,
    },
    /// Bring the results area into view. Emitted once per non-empty result set.
    FocusResults,
}
