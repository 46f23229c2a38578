//! Curator core: pure state machine for the file-group editor.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    CandidateFile, CandidatePage, EditorState, FileId, FileKind, SessionToken, DEFAULT_PAGE_SIZE,
};
pub use update::update;
pub use view_model::{CandidateRowView, EditorViewModel, MemberRowView};
