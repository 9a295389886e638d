#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query input box.
    QueryChanged(String),
    /// User pressed Search with the current query input.
    SearchSubmitted,
    /// Engine settled the fetch issued for `generation`.
    InsightsArrived {
        generation: crate::Generation,
        document: String,
    },
    /// User asked to see the efficient approach section.
    RevealApproachClicked,
}
