use crate::links::{extract_links, ResourceLink};
use crate::sections::{split_sections, Sections};
use crate::view_model::AppViewModel;

/// Tag of one search cycle; only the latest issued generation may update state.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    /// A document is shown; fetch failures land here too, as fallback text.
    Displaying,
}

/// Everything derived from one fetched insight document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedInsight {
    /// Trimmed query the document was fetched for.
    pub query: String,
    pub sections: Sections,
    /// Links of the whole document, not of the sections separately.
    pub links: Vec<ResourceLink>,
    pub approach_revealed: bool,
}

impl DisplayedInsight {
    fn derive(query: String, document: &str) -> Self {
        Self {
            query,
            sections: split_sections(document),
            links: extract_links(document),
            approach_revealed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Displaying(DisplayedInsight),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query_input: String,
    phase: Phase,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let mut view = AppViewModel {
            session: self.session(),
            query_input: self.query_input.clone(),
            dirty: self.dirty,
            ..AppViewModel::default()
        };
        match &self.phase {
            Phase::Idle => {}
            Phase::Loading { query } => view.loading_query = Some(query.clone()),
            Phase::Displaying(insight) => {
                view.insight_query = Some(insight.query.clone());
                view.primary = Some(insight.sections.primary.clone());
                let secondary = insight.sections.secondary.as_ref();
                view.show_reveal_button = secondary.is_some() && !insight.approach_revealed;
                view.approach = secondary.filter(|_| insight.approach_revealed).cloned();
                view.resources = insight.links.clone();
            }
        }
        view
    }

    pub fn session(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Loading { .. } => SessionState::Loading,
            Phase::Displaying(_) => SessionState::Displaying,
        }
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    /// Generation of the most recently issued search; 0 before the first one.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn displayed(&self) -> Option<&DisplayedInsight> {
        match &self.phase {
            Phase::Displaying(insight) => Some(insight),
            _ => None,
        }
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        if self.query_input != text {
            self.query_input = text;
            self.mark_dirty();
        }
    }

    /// Drops any shown or pending result and opens a new generation for `query`.
    pub(crate) fn begin_search(&mut self, query: String) -> Generation {
        self.generation += 1;
        self.phase = Phase::Loading { query };
        self.mark_dirty();
        self.generation
    }

    /// Applies a settled fetch. Returns `false` when `generation` is stale.
    pub(crate) fn accept_document(&mut self, generation: Generation, document: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        let query = match &mut self.phase {
            Phase::Loading { query } => std::mem::take(query),
            _ => return false,
        };
        self.phase = Phase::Displaying(DisplayedInsight::derive(query, document));
        self.mark_dirty();
        true
    }

    /// Reveals the approach section once; no-op without one or when already shown.
    pub(crate) fn reveal_approach(&mut self) -> bool {
        let revealed = match &mut self.phase {
            Phase::Displaying(insight)
                if insight.sections.secondary.is_some() && !insight.approach_revealed =>
            {
                insight.approach_revealed = true;
                true
            }
            _ => false,
        };
        if revealed {
            self.mark_dirty();
        }
        revealed
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
