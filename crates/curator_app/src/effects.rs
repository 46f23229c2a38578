use console_logging::{console_info, console_warn};
use curator_core::{CandidateFile, CandidatePage, Effect, FileKind, Msg, SessionToken};
use curator_engine::{
    CandidateRecord, EngineEvent, EngineHandle, FetchError, GroupRecord, MediaKind,
};

/// Events the bridge hands back to the app loop: either a message for the
/// core state machine, or the outcome of a group load/save (which the core
/// does not model).
pub enum BridgeEvent {
    Core(Msg),
    GroupSaved(GroupRecord),
    GroupFailed(FetchError),
}

/// Executes core effects on the engine and translates engine events back into
/// core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    session,
                    kind,
                    page_index,
                    page_size,
                } => {
                    console_info!(
                        "FetchPage session={} kind={:?} page_index={}",
                        session.value(),
                        kind,
                        page_index
                    );
                    self.engine
                        .fetch_page(session.value(), map_kind(kind), page_index, page_size);
                }
            }
        }
    }

    pub fn load_group(&self, id: u64) {
        self.engine.load_group(id);
    }

    pub fn save_group(&self, id: Option<u64>, name: String, file_ids: Vec<u64>) {
        self.engine.save_group(id, name, file_ids);
    }

    pub fn drain(&self) -> Vec<BridgeEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::PageFetched {
                    session,
                    page_index,
                    result,
                    ..
                } => {
                    let session = SessionToken::from_value(session);
                    let msg = match result {
                        Ok(page) => Msg::PageLoaded {
                            session,
                            page: CandidatePage {
                                content: page.content.into_iter().map(map_record).collect(),
                                is_last_page: page.is_last_page,
                                page_index,
                            },
                        },
                        Err(err) => {
                            console_warn!("Page {} failed: {}", page_index, err);
                            Msg::PageFailed {
                                session,
                                error: err.to_string(),
                            }
                        }
                    };
                    events.push(BridgeEvent::Core(msg));
                }
                EngineEvent::GroupLoaded { result } => match result {
                    Ok(group) => {
                        console_info!("Loaded group {} ({} files)", group.id, group.files.len());
                        events.push(BridgeEvent::Core(Msg::MembersRestored(
                            group.files.into_iter().map(map_record).collect(),
                        )));
                    }
                    Err(err) => {
                        console_warn!("Group load failed: {}", err);
                        events.push(BridgeEvent::GroupFailed(err));
                    }
                },
                EngineEvent::GroupSaved { result } => match result {
                    Ok(group) => events.push(BridgeEvent::GroupSaved(group)),
                    Err(err) => {
                        console_warn!("Group save failed: {}", err);
                        events.push(BridgeEvent::GroupFailed(err));
                    }
                },
            }
        }
        events
    }
}

fn map_kind(kind: FileKind) -> MediaKind {
    match kind {
        FileKind::Image => MediaKind::Image,
        FileKind::Video => MediaKind::Video,
        FileKind::Audio => MediaKind::Audio,
        FileKind::Document => MediaKind::Document,
        FileKind::Vector => MediaKind::Vector,
        FileKind::Archive => MediaKind::Archive,
    }
}

fn map_record(record: CandidateRecord) -> CandidateFile {
    CandidateFile {
        id: record.id,
        display_name: record.display_name,
        path: record.path,
    }
}
