use std::sync::Once;

use manual_core::{
    update, AppState, CatalogPage, Effect, Msg, RawSearchRecord, RawStatsRecord, UpstreamError,
    UpstreamErrorKind, VideoId, PAGE_SIZE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(manual_logging::initialize_for_tests);
}

fn submit_keyword(state: AppState, keyword: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::KeywordChanged(keyword.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn generation_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchCatalog { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

fn record(id: &str, title: &str) -> RawSearchRecord {
    RawSearchRecord {
        id: id.to_string(),
        title: title.to_string(),
        thumbnail_ref: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
    }
}

fn stats(views: &str, duration: &str) -> RawStatsRecord {
    RawStatsRecord {
        view_count_text: Some(views.to_string()),
        duration_code: Some(duration.to_string()),
    }
}

fn sample_page() -> CatalogPage {
    CatalogPage {
        search: vec![record("a", "テスト1"), record("b", "テスト2")],
        stats: vec![stats("100", "PT1M30S"), stats("500", "PT2M")],
    }
}

fn row_summary(state: &AppState) -> Vec<(String, u64, String)> {
    state
        .view()
        .rows
        .into_iter()
        .map(|row| (row.id.to_string(), row.view_metric, row.duration_text))
        .collect()
}

#[test]
fn search_submit_emits_fetch_with_trimmed_keyword() {
    init_logging();
    let (mut state, effects) = submit_keyword(AppState::new(), "  猫  ");

    assert_eq!(
        effects,
        vec![Effect::FetchCatalog {
            generation: 1,
            keyword: "猫".to_string(),
            page_size: PAGE_SIZE,
        }]
    );
    assert!(state.view().search_in_flight);
    assert!(state.consume_dirty());
}

#[test]
fn blank_keyword_is_ignored() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "   ");

    assert!(effects.is_empty());
    assert!(!state.view().search_in_flight);
}

#[test]
fn completed_search_is_merged_and_ranked() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "テスト");
    let generation = generation_of(&effects);

    let (state, effects) = update(
        state,
        Msg::CatalogFetched {
            generation,
            result: Ok(sample_page()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        row_summary(&state),
        vec![
            ("b".to_string(), 500, "2:00".to_string()),
            ("a".to_string(), 100, "1:30".to_string()),
        ]
    );
    let view = state.view();
    assert!(!view.search_in_flight);
    assert_eq!(view.searched_keyword, "テスト");
    assert_eq!(view.selected_count, 0);
    assert!(!view.all_selected);
    let stats = view.last_search.expect("search stats");
    assert_eq!(stats.fetched, 2);
    assert_eq!(stats.retained, 2);
}

#[test]
fn non_target_titles_are_excluded_from_counts() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "mixed");
    let generation = generation_of(&effects);
    let page = CatalogPage {
        search: vec![record("en", "english title"), record("ja", "日本語タイトル")],
        stats: vec![stats("9999", "PT1M"), stats("1", "PT1S")],
    };

    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation,
            result: Ok(page),
        },
    );

    let view = state.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, VideoId::new("ja"));
    assert_eq!(view.last_search.unwrap().filtered_out, 1);
}

#[test]
fn new_search_replaces_list_and_clears_selection() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "first");
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: generation_of(&effects),
            result: Ok(sample_page()),
        },
    );
    let (state, _) = update(state, Msg::SelectAllToggled { checked: true });
    assert!(state.view().all_selected);

    let (state, effects) = submit_keyword(state, "second");
    let page = CatalogPage {
        search: vec![record("c", "ネコ")],
        stats: vec![stats("3", "PT3S")],
    };
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: generation_of(&effects),
            result: Ok(page),
        },
    );

    let view = state.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.selected_count, 0);
    assert!(!view.all_selected);
    assert_eq!(view.searched_keyword, "second");
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let (state, first) = submit_keyword(AppState::new(), "first");
    let (state, second) = submit_keyword(state, "second");
    let stale = generation_of(&first);
    let current = generation_of(&second);
    assert!(current > stale);

    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: stale,
            result: Ok(sample_page()),
        },
    );
    assert!(state.view().rows.is_empty());
    assert!(state.view().search_in_flight);

    let page = CatalogPage {
        search: vec![record("z", "最新")],
        stats: vec![stats("1", "PT1S")],
    };
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: current,
            result: Ok(page),
        },
    );
    let view = state.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.searched_keyword, "second");
    assert!(!view.search_in_flight);
}

#[test]
fn failed_search_keeps_previous_list() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "first");
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: generation_of(&effects),
            result: Ok(sample_page()),
        },
    );
    let (state, _) = update(state, Msg::ItemToggled { id: "a".into() });
    let before = row_summary(&state);

    let (state, effects) = submit_keyword(state, "second");
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: generation_of(&effects),
            result: Err(UpstreamError::new(UpstreamErrorKind::HttpStatus(403), "quota")),
        },
    );

    let view = state.view();
    assert_eq!(row_summary(&state), before);
    assert_eq!(view.selected_count, 1);
    assert_eq!(view.searched_keyword, "first");
    assert!(view.last_error.unwrap().contains("403"));
    assert!(!view.search_in_flight);
}

#[test]
fn late_completion_after_failure_is_dropped() {
    init_logging();
    let (state, effects) = submit_keyword(AppState::new(), "k");
    let generation = generation_of(&effects);
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation,
            result: Err(UpstreamError::new(UpstreamErrorKind::Transport, "reset")),
        },
    );
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation,
            result: Ok(sample_page()),
        },
    );

    assert!(state.view().rows.is_empty());
}
