//! Insight core: pure state machine, markdown derivations and view-model helpers.
mod effect;
mod links;
mod msg;
mod render_rules;
mod sections;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use links::{extract_links, ResourceLink};
pub use msg::Msg;
pub use render_rules::{code_language, HeadingRule, RenderRules, Tone};
pub use sections::{split_sections, Sections, APPROACH_MARKER};
pub use state::{AppState, DisplayedInsight, Generation, SessionState};
pub use update::update;
pub use view_model::AppViewModel;
