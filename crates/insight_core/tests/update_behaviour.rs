use std::sync::Once;

use insight_core::{update, AppState, Effect, Msg, ResourceLink, SessionState};
use pretty_assertions::assert_eq;

const SCENARIO_A: &str = "Explanation text.\n\n## Efficient Approach Overview\nUse two pointers. See [GeeksforGeeks](https://geeksforgeeks.org).";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submit_query(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryChanged(input.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn arrive(state: AppState, generation: u64, document: &str) -> AppState {
    let (state, effects) = update(
        state,
        Msg::InsightsArrived {
            generation,
            document: document.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn submit_trims_query_and_enters_loading() {
    init_logging();
    let (mut state, effects) = submit_query(AppState::new(), "  42 \n");

    assert_eq!(
        effects,
        vec![Effect::FetchInsights {
            generation: 1,
            query: "42".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.session, SessionState::Loading);
    assert_eq!(view.loading_query.as_deref(), Some("42"));
    assert_eq!(view.query_input, "  42 \n");
    assert!(view.dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
    assert!(!state.view().dirty);
}

#[test]
fn whitespace_query_is_a_noop() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::QueryChanged("   ".to_string()));
    state.consume_dirty();
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::SearchSubmitted);

    assert!(effects.is_empty());
    assert!(!next.view().dirty);
    assert_eq!(next, before);
    assert_eq!(next.session(), SessionState::Idle);
    assert!(!next.consume_dirty());
}

#[test]
fn whitespace_query_keeps_displayed_result() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "1");
    let state = arrive(state, 1, "shown");

    let (state, effects) = submit_query(state, " \t ");

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Displaying);
    assert_eq!(state.view().primary.as_deref(), Some("shown"));
    assert_eq!(state.generation(), 1);
}

#[test]
fn scenario_with_marker_and_link_is_split_and_linked() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "11");
    let state = arrive(state, 1, SCENARIO_A);
    let view = state.view();

    assert_eq!(view.session, SessionState::Displaying);
    assert_eq!(view.insight_query.as_deref(), Some("11"));
    assert_eq!(view.primary.as_deref(), Some("Explanation text."));
    assert!(view.show_reveal_button);
    assert_eq!(view.approach, None);
    assert_eq!(
        view.resources,
        vec![ResourceLink {
            title: "GeeksforGeeks".to_string(),
            url: "https://geeksforgeeks.org".to_string(),
        }]
    );
    let insight = state.displayed().expect("displayed insight");
    assert_eq!(
        insight.sections.secondary.as_deref(),
        Some("## Efficient Approach Overview\nUse two pointers. See [GeeksforGeeks](https://geeksforgeeks.org).")
    );
}

#[test]
fn plain_document_offers_no_reveal_and_no_resources() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "7");
    let state = arrive(state, 1, "\n  Reverse the integer.  \n");
    let view = state.view();

    assert_eq!(view.primary.as_deref(), Some("Reverse the integer."));
    assert!(!view.show_reveal_button);
    assert!(view.resources.is_empty());

    let (state, _) = update(state, Msg::RevealApproachClicked);
    assert_eq!(state.view().approach, None);
}

#[test]
fn reveal_shows_approach_until_next_search() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "11");
    let state = arrive(state, 1, SCENARIO_A);

    let (mut state, effects) = update(state, Msg::RevealApproachClicked);
    assert!(effects.is_empty());
    assert!(state.view().dirty);
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(!view.show_reveal_button);
    assert!(view
        .approach
        .as_deref()
        .is_some_and(|md| md.starts_with("## Efficient Approach Overview")));

    // A second click changes nothing.
    let (mut state, _) = update(state, Msg::RevealApproachClicked);
    assert!(!state.consume_dirty());

    let (state, _) = submit_query(state, "12");
    let view = state.view();
    assert_eq!(view.session, SessionState::Loading);
    assert_eq!(view.primary, None);
    assert_eq!(view.approach, None);
    assert!(view.resources.is_empty());

    let state = arrive(state, 2, SCENARIO_A);
    let view = state.view();
    assert!(view.show_reveal_button);
    assert_eq!(view.approach, None);
}

#[test]
fn reveal_while_loading_is_ignored() {
    init_logging();
    let (mut state, _) = submit_query(AppState::new(), "11");
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::RevealApproachClicked);

    assert!(!state.consume_dirty());
    assert_eq!(state.session(), SessionState::Loading);
}

#[test]
fn fallback_text_is_displayed_like_any_document() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "1");
    let state = arrive(state, 1, "⚠️ Failed to fetch insights.");
    let view = state.view();

    assert_eq!(view.session, SessionState::Displaying);
    assert_eq!(view.primary.as_deref(), Some("⚠️ Failed to fetch insights."));
    assert_eq!(view.loading_query, None);
}

#[test]
fn later_search_wins_over_slower_earlier_response() {
    init_logging();
    let (state, first) = submit_query(AppState::new(), "1");
    let (state, second) = submit_query(state, "2");
    assert_eq!(
        first,
        vec![Effect::FetchInsights {
            generation: 1,
            query: "1".to_string()
        }]
    );
    assert_eq!(
        second,
        vec![Effect::FetchInsights {
            generation: 2,
            query: "2".to_string()
        }]
    );

    let state = arrive(state, 2, "second answer");
    let mut state = arrive(state, 1, "first answer");

    let view = state.view();
    assert_eq!(view.insight_query.as_deref(), Some("2"));
    assert_eq!(view.primary.as_deref(), Some("second answer"));
    state.consume_dirty();

    let mut state = arrive(state, 1, "first answer again");
    assert!(!state.consume_dirty());
    assert_eq!(state.view().primary.as_deref(), Some("second answer"));
}

#[test]
fn stale_response_does_not_end_newer_loading() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "1");
    let (state, _) = submit_query(state, "2");

    let state = arrive(state, 1, "first answer");

    assert_eq!(state.session(), SessionState::Loading);
    assert_eq!(state.view().loading_query.as_deref(), Some("2"));
}

#[test]
fn editing_query_does_not_touch_displayed_result() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "11");
    let state = arrive(state, 1, SCENARIO_A);

    let (mut state, effects) = update(state, Msg::QueryChanged("99".to_string()));

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.query_input, "99");
    assert_eq!(view.insight_query.as_deref(), Some("11"));
}
