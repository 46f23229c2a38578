use crate::{EditorState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: EditorState, msg: Msg) -> (EditorState, Vec<Effect>) {
    let effects = match msg {
        Msg::KindSelected(kind) => {
            state.reset_loader(kind);
            match kind {
                Some(kind) if kind.has_candidate_listing() => vec![state.begin_fetch(kind)],
                // No listing for this category (or filter cleared): the
                // candidate table stays empty and no request goes out.
                _ => Vec::new(),
            }
        }
        Msg::LoadMoreClicked => match state.loader_kind() {
            Some(kind) if kind.has_candidate_listing() && state.can_fetch() => {
                vec![state.begin_fetch(kind)]
            }
            // Guard against redundant clicks: no filter, an exhausted
            // listing, or a fetch already in flight all make this a no-op.
            _ => Vec::new(),
        },
        Msg::PageLoaded { session, page } => {
            if session == state.session() {
                state.apply_page(page);
            }
            // A mismatched token means the filter changed while this fetch
            // was in flight; the reply is dropped without touching state.
            Vec::new()
        }
        Msg::PageFailed { session, error } => {
            if session == state.session() {
                state.apply_fetch_failure(error);
            }
            Vec::new()
        }
        Msg::SelectionToggled(id) => {
            state.toggle_selected(id);
            Vec::new()
        }
        Msg::SelectionReplaced(ids) => {
            state.replace_selected(ids);
            Vec::new()
        }
        Msg::AddSelectedClicked => {
            state.commit_selected();
            Vec::new()
        }
        Msg::MemberRemoved(id) => {
            state.remove_member(id);
            Vec::new()
        }
        Msg::MembersRestored(files) => {
            state.restore_members(files);
            Vec::new()
        }
    };

    (state, effects)
}
