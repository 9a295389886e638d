use crate::{ResourceLink, SessionState};

/// Flattened read model of [`crate::AppState`] for the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub query_input: String,
    /// Query being fetched while loading.
    pub loading_query: Option<String>,
    /// Query the displayed document belongs to.
    pub insight_query: Option<String>,
    pub primary: Option<String>,
    /// Approach markdown, present only once revealed.
    pub approach: Option<String>,
    pub show_reveal_button: bool,
    pub resources: Vec<ResourceLink>,
    pub dirty: bool,
}
