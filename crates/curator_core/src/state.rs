use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::view_model::{CandidateRowView, EditorViewModel, MemberRowView};
use crate::Effect;

pub type FileId = u64;

/// Page size used when the editor does not override it (the backend's default
/// listing window).
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Category of a media file, as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Vector,
    Archive,
}

impl FileKind {
    /// Whether the backend exposes a candidate listing for this category.
    ///
    /// Vector art and archives have no dedicated listing endpoint; selecting
    /// them in the filter leaves the candidate table empty and issues no
    /// request. The match is exhaustive so a new category forces a decision
    /// here.
    pub fn has_candidate_listing(self) -> bool {
        match self {
            FileKind::Image | FileKind::Video | FileKind::Audio | FileKind::Document => true,
            FileKind::Vector | FileKind::Archive => false,
        }
    }

    /// Stable lowercase name, used by the app's command parser and draft file.
    pub fn name(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Vector => "vector",
            FileKind::Archive => "archive",
        }
    }
}

/// A file record eligible to join the group. Opaque to the loader beyond `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub id: FileId,
    pub display_name: String,
    pub path: String,
}

/// One fetched page of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePage {
    pub content: Vec<CandidateFile>,
    pub is_last_page: bool,
    pub page_index: u32,
}

/// Identifies one loader session (the span between two filter changes).
///
/// Every outstanding fetch carries the token active when it was issued; a
/// reply whose token no longer matches the current session is discarded, so a
/// late response from a superseded filter can never corrupt current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SessionToken(u64);

impl SessionToken {
    fn bump(&mut self) {
        self.0 += 1;
    }

    /// Raw value, for crossing channel boundaries where the newtype is not
    /// available.
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn from_value(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LoaderState {
    kind: Option<FileKind>,
    session: SessionToken,
    page_size: u32,
    accumulated: Vec<CandidateFile>,
    next_page_index: u32,
    has_more: bool,
    loading: bool,
    selected: BTreeSet<FileId>,
}

impl LoaderState {
    fn new(page_size: u32) -> Self {
        Self {
            kind: None,
            session: SessionToken::default(),
            page_size,
            accumulated: Vec::new(),
            next_page_index: 0,
            has_more: true,
            loading: false,
            selected: BTreeSet::new(),
        }
    }
}

/// Full state of the group editor: the candidate loader plus the member list
/// being assembled for the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    loader: LoaderState,
    members: Vec<CandidateFile>,
    last_error: Option<String>,
    dirty: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            loader: LoaderState::new(page_size),
            members: Vec::new(),
            last_error: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> EditorViewModel {
        let loader = &self.loader;
        EditorViewModel {
            kind: loader.kind,
            candidates: loader
                .accumulated
                .iter()
                .map(|file| CandidateRowView {
                    id: file.id,
                    display_name: file.display_name.clone(),
                    path: file.path.clone(),
                    selected: loader.selected.contains(&file.id),
                })
                .collect(),
            can_load_more: loader
                .kind
                .is_some_and(|kind| kind.has_candidate_listing())
                && loader.has_more
                && !loader.loading,
            loading: loader.loading,
            selected_count: loader.selected.len(),
            members: self
                .members
                .iter()
                .map(|file| MemberRowView {
                    id: file.id,
                    display_name: file.display_name.clone(),
                    path: file.path.clone(),
                })
                .collect(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Ids of the current members, in display order. This is what the
    /// enclosing form submits as the group's file-id list.
    pub fn member_ids(&self) -> Vec<FileId> {
        self.members.iter().map(|file| file.id).collect()
    }

    /// Members as owned records, for draft persistence.
    pub fn members_snapshot(&self) -> Vec<CandidateFile> {
        self.members.clone()
    }

    /// Token of the active loader session.
    pub fn session(&self) -> SessionToken {
        self.loader.session
    }

    /// Returns the dirty flag and clears it. The app loop re-renders only
    /// when this returns true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn loader_kind(&self) -> Option<FileKind> {
        self.loader.kind
    }

    pub(crate) fn can_fetch(&self) -> bool {
        self.loader.has_more && !self.loader.loading
    }

    /// Full loader reset for a filter change. Accumulated candidates, the
    /// selection, and the page cursor are all invalidated; the session token
    /// advances so in-flight replies for the old filter become stale.
    pub(crate) fn reset_loader(&mut self, kind: Option<FileKind>) {
        let loader = &mut self.loader;
        loader.kind = kind;
        loader.session.bump();
        loader.accumulated.clear();
        loader.selected.clear();
        loader.next_page_index = 0;
        loader.has_more = true;
        loader.loading = false;
        self.last_error = None;
        self.mark_dirty();
    }

    /// Marks a fetch as outstanding and returns the effect describing it.
    /// Callers must have checked `can_fetch` first.
    pub(crate) fn begin_fetch(&mut self, kind: FileKind) -> Effect {
        self.loader.loading = true;
        self.mark_dirty();
        Effect::FetchPage {
            session: self.loader.session,
            kind,
            page_index: self.loader.next_page_index,
            page_size: self.loader.page_size,
        }
    }

    /// Merges a fetched page into the accumulated list.
    ///
    /// Items whose id is already present are dropped; the backend is trusted
    /// not to repeat ids across pages, but the merge does not assume it.
    /// The selection is cleared: the rows under the user's checkmarks may
    /// have shifted.
    pub(crate) fn apply_page(&mut self, page: CandidatePage) {
        let loader = &mut self.loader;
        for file in page.content {
            if !loader.accumulated.iter().any(|seen| seen.id == file.id) {
                loader.accumulated.push(file);
            }
        }
        loader.has_more = !page.is_last_page;
        loader.next_page_index += 1;
        loader.loading = false;
        loader.selected.clear();
        self.last_error = None;
        self.mark_dirty();
    }

    /// Records a fetch failure. The cursor and accumulated list are left as
    /// they were, so a retry re-requests the same page index.
    pub(crate) fn apply_fetch_failure(&mut self, error: String) {
        self.loader.loading = false;
        self.last_error = Some(error);
        self.mark_dirty();
    }

    /// Toggles one candidate in or out of the selection. Ids not present in
    /// the accumulated list are ignored; a stale callback from a previous
    /// filter must not grow the selection.
    pub(crate) fn toggle_selected(&mut self, id: FileId) {
        if !self.loader.accumulated.iter().any(|file| file.id == id) {
            return;
        }
        if !self.loader.selected.remove(&id) {
            self.loader.selected.insert(id);
        }
        self.mark_dirty();
    }

    /// Replaces the selection wholesale, keeping only ids present in the
    /// accumulated list.
    pub(crate) fn replace_selected(&mut self, ids: Vec<FileId>) {
        let loader = &mut self.loader;
        loader.selected = ids
            .into_iter()
            .filter(|id| loader.accumulated.iter().any(|file| file.id == *id))
            .collect();
        self.mark_dirty();
    }

    /// Moves the selected candidates into the member list, in accumulated
    /// order, skipping ids already present so an existing member is never
    /// duplicated or overwritten. Clears the selection afterwards.
    pub(crate) fn commit_selected(&mut self) {
        let selected = std::mem::take(&mut self.loader.selected);
        if selected.is_empty() {
            return;
        }
        for file in &self.loader.accumulated {
            if selected.contains(&file.id)
                && !self.members.iter().any(|member| member.id == file.id)
            {
                self.members.push(file.clone());
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn remove_member(&mut self, id: FileId) {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        if self.members.len() != before {
            self.mark_dirty();
        }
    }

    /// Replaces the member list, deduplicating by id (first occurrence wins).
    /// Used when seeding from a backend group or a persisted draft.
    pub(crate) fn restore_members(&mut self, files: Vec<CandidateFile>) {
        self.members.clear();
        for file in files {
            if !self.members.iter().any(|member| member.id == file.id) {
                self.members.push(file);
            }
        }
        self.mark_dirty();
    }
}
