#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request one page of candidates from the backend listing for `kind`.
    /// `session` must be echoed back with the result so stale replies can be
    /// recognized and dropped.
    FetchPage {
        session: crate::SessionToken,
        kind: crate::FileKind,
        page_index: u32,
        page_size: u32,
    },
}
