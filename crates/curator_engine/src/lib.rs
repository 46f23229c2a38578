//! Curator engine: backend IO and effect execution.
mod engine;
mod fetch;
mod groups;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use fetch::{CandidateSource, FetchSettings, HttpCandidateSource};
pub use groups::{GroupClient, GroupRecord};
pub use persist::{DraftStore, PersistError};
pub use types::{
    listing_route, CandidateRecord, EngineEvent, FailureKind, FetchError, FileId, MediaKind,
    PageResponse,
};
