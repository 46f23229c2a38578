use std::sync::Once;

use curator_core::{
    update, CandidateFile, CandidatePage, EditorState, Effect, FileKind, Msg, SessionToken,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn file(id: u64) -> CandidateFile {
    CandidateFile {
        id,
        display_name: format!("file-{id}"),
        path: format!("/media/file-{id}"),
    }
}

fn page(ids: &[u64], is_last_page: bool, page_index: u32) -> CandidatePage {
    CandidatePage {
        content: ids.iter().copied().map(file).collect(),
        is_last_page,
        page_index,
    }
}

fn fetch_params(effects: &[Effect]) -> (SessionToken, FileKind, u32, u32) {
    match effects.first().expect("expected a fetch effect") {
        Effect::FetchPage {
            session,
            kind,
            page_index,
            page_size,
        } => (*session, *kind, *page_index, *page_size),
    }
}

#[test]
fn selecting_listed_kind_fetches_page_zero() {
    init_logging();
    let state = EditorState::new();

    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Image)));

    let (_, kind, page_index, page_size) = fetch_params(&effects);
    assert_eq!(kind, FileKind::Image);
    assert_eq!(page_index, 0);
    assert_eq!(page_size, 50);
    assert!(state.view().loading);
    assert!(!state.view().can_load_more);
}

#[test]
fn pages_accumulate_in_fetch_order() {
    init_logging();
    let state = EditorState::with_page_size(3);
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Video)));
    let (session, _, _, _) = fetch_params(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[10, 11, 12], false, 0),
        },
    );
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (session, _, page_index, _) = fetch_params(&effects);
    assert_eq!(page_index, 1);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[13, 14], true, 1),
        },
    );

    let view = state.view();
    let ids: Vec<u64> = view.candidates.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    assert!(!view.can_load_more);
    assert!(!view.loading);
}

#[test]
fn repeated_ids_across_pages_are_dropped_on_merge() {
    init_logging();
    let state = EditorState::with_page_size(2);
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Image)));
    let (session, _, _, _) = fetch_params(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[1, 2], false, 0),
        },
    );
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (session, _, _, _) = fetch_params(&effects);
    // The backend should not repeat id 2, but the merge must tolerate it.
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[2, 3], true, 1),
        },
    );

    let view = state.view();
    let ids: Vec<u64> = view.candidates.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!view.can_load_more);
}

#[test]
fn last_page_disables_further_loads() {
    init_logging();
    let state = EditorState::with_page_size(2);
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Audio)));
    let (session, _, _, _) = fetch_params(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[7], true, 0),
        },
    );
    assert!(!state.view().can_load_more);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().candidates.len(), 1);
}

#[test]
fn load_more_is_noop_while_fetch_outstanding() {
    init_logging();
    let state = EditorState::new();
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Image)));
    assert_eq!(effects.len(), 1);

    // The first fetch has not answered yet; a second click must not issue a
    // concurrent request for the same session.
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
    assert!(state.view().loading);
}

#[test]
fn failed_fetch_retries_same_page_index() {
    init_logging();
    let state = EditorState::with_page_size(2);
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Document)));
    let (session, _, _, _) = fetch_params(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[1, 2], false, 0),
        },
    );
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (session, _, page_index, _) = fetch_params(&effects);
    assert_eq!(page_index, 1);

    let (state, _) = update(
        state,
        Msg::PageFailed {
            session,
            error: "backend unavailable".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.last_error.as_deref(), Some("backend unavailable"));
    assert_eq!(view.candidates.len(), 2);
    assert!(view.can_load_more);

    // The retry requests the page that failed, not the one after it.
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (session, _, page_index, _) = fetch_params(&effects);
    assert_eq!(page_index, 1);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[3], true, 1),
        },
    );
    let view = state.view();
    assert_eq!(view.candidates.len(), 3);
    assert_eq!(view.last_error, None);
}

#[test]
fn two_page_scenario_merges_overlap_and_exhausts() {
    init_logging();
    // Filter IMAGE with page size 2: page 0 = [1, 2], page 1 = [2, 3] (last).
    let state = EditorState::with_page_size(2);
    let (state, effects) = update(state, Msg::KindSelected(Some(FileKind::Image)));
    let (session, _, _, _) = fetch_params(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[1, 2], false, 0),
        },
    );
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (session, _, _, _) = fetch_params(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(&[2, 3], true, 1),
        },
    );

    let view = state.view();
    let ids: Vec<u64> = view.candidates.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!view.can_load_more);
    assert!(!view.loading);
}
