use crate::{FileId, FileKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorViewModel {
    pub kind: Option<FileKind>,
    pub candidates: Vec<CandidateRowView>,
    /// Whether the "load more" control is enabled: a listed category is
    /// selected, the listing is not exhausted, and no fetch is in flight.
    pub can_load_more: bool,
    pub loading: bool,
    pub selected_count: usize,
    pub members: Vec<MemberRowView>,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRowView {
    pub id: FileId,
    pub display_name: String,
    pub path: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRowView {
    pub id: FileId,
    pub display_name: String,
    pub path: String,
}
