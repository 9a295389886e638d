use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the engine for the insight document of `query` (already trimmed).
    FetchInsights { generation: Generation, query: String },
}
