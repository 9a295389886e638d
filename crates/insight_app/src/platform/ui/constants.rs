/// Input line that reveals the efficient approach section.
pub const CMD_REVEAL: &str = ":reveal";
/// Input line that leaves the application.
pub const CMD_QUIT: &str = ":quit";

pub const INPUT_PLACEHOLDER: &str = "Enter problem number";
pub const LABEL_SEARCH: &str = "🔍 Search";
pub const LABEL_LOADING: &str = "Talking to Gemini...";
pub const LABEL_INSIGHTS_FOR: &str = "🧠 Insights for #";
pub const BUTTON_SHOW_APPROACH: &str = "💡 Show Efficient Approach";
pub const LABEL_LEARN_MORE: &str = "📚 Learn More";
pub const LABEL_VISIT_RESOURCE: &str = "🌐 Visit Resource";

pub const SEPARATOR: &str = "────────────────────────────────────────────────────────────";
