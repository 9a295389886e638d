use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            state.set_query_input(text);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let query = state.query_input().trim();
            if query.is_empty() {
                return (state, Vec::new());
            }
            let query = query.to_owned();
            let generation = state.begin_search(query.clone());
            vec![Effect::FetchInsights { generation, query }]
        }
        Msg::InsightsArrived {
            generation,
            document,
        } => {
            // A slower, older request must never replace the newer cycle.
            state.accept_document(generation, &document);
            Vec::new()
        }
        Msg::RevealApproachClicked => {
            state.reveal_approach();
            Vec::new()
        }
    };

    (state, effects)
}
