use std::path::Path;

use console_logging::{console_error, console_info, console_warn};
use curator_core::CandidateFile;
use curator_engine::DraftStore;
use serde::{Deserialize, Serialize};

const DRAFT_FILENAME: &str = ".curator_draft.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DraftMember {
    id: u64,
    display_name: String,
    path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct DraftState {
    saved_at: String,
    members: Vec<DraftMember>,
}

/// Loads the member list of an unsaved group draft, if one was left behind by
/// a previous session. Missing or unreadable drafts yield an empty list.
pub(crate) fn load_draft(state_dir: &Path) -> Vec<CandidateFile> {
    let store = DraftStore::new(state_dir);
    let draft: DraftState = match store.load(DRAFT_FILENAME) {
        Ok(Some(draft)) => draft,
        Ok(None) => return Vec::new(),
        Err(err) => {
            console_warn!("Failed to load draft from {:?}: {}", state_dir, err);
            return Vec::new();
        }
    };

    console_info!(
        "Loaded draft from {:?} (saved {})",
        store.path_of(DRAFT_FILENAME),
        draft.saved_at
    );
    draft
        .members
        .into_iter()
        .map(|member| CandidateFile {
            id: member.id,
            display_name: member.display_name,
            path: member.path,
        })
        .collect()
}

/// Persists the current member list as a draft in `state_dir`.
pub(crate) fn save_draft(state_dir: &Path, members: &[CandidateFile]) {
    let draft = DraftState {
        saved_at: chrono::Utc::now().to_rfc3339(),
        members: members
            .iter()
            .map(|member| DraftMember {
                id: member.id,
                display_name: member.display_name.clone(),
                path: member.path.clone(),
            })
            .collect(),
    };

    if let Err(err) = DraftStore::new(state_dir).save(DRAFT_FILENAME, &draft) {
        console_error!("Failed to write draft to {:?}: {}", state_dir, err);
    }
}

/// Deletes the draft after its members were committed to the backend, so the
/// next session does not restore files that already live in a group.
pub(crate) fn discard_draft(state_dir: &Path) {
    if let Err(err) = DraftStore::new(state_dir).remove(DRAFT_FILENAME) {
        console_warn!("Failed to discard committed draft in {:?}: {}", state_dir, err);
    }
}
