#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a category in the filter dropdown, or cleared it.
    KindSelected(Option<crate::FileKind>),
    /// User clicked the "load more" control under the candidate table.
    LoadMoreClicked,
    /// A page fetch issued for `session` completed successfully.
    PageLoaded {
        session: crate::SessionToken,
        page: crate::CandidatePage,
    },
    /// A page fetch issued for `session` failed.
    PageFailed {
        session: crate::SessionToken,
        error: String,
    },
    /// User checked or unchecked one candidate row.
    SelectionToggled(crate::FileId),
    /// User replaced the whole selection (e.g. a select-all checkbox).
    SelectionReplaced(Vec<crate::FileId>),
    /// User clicked "add selected" to move checked candidates into the group.
    AddSelectedClicked,
    /// User removed one member from the group's file list.
    MemberRemoved(crate::FileId),
    /// Seed the member list from a backend group or a persisted draft.
    MembersRestored(Vec<crate::CandidateFile>),
}
