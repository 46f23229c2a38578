use std::sync::{mpsc, Arc};
use std::thread;

use console_logging::console_debug;

use crate::fetch::{CandidateSource, FetchSettings, HttpCandidateSource};
use crate::groups::GroupClient;
use crate::types::{EngineEvent, FetchError, FileId, MediaKind};

enum EngineCommand {
    FetchPage {
        session: u64,
        kind: MediaKind,
        page_index: u32,
        page_size: u32,
    },
    LoadGroup {
        id: u64,
    },
    SaveGroup {
        id: Option<u64>,
        name: String,
        file_ids: Vec<FileId>,
    },
}

/// Handle to the backend IO thread. Commands go in over a channel; results
/// come back as [`EngineEvent`]s drained with [`try_recv`](Self::try_recv).
///
/// The thread owns a tokio runtime; each command runs as its own task, so a
/// slow group save does not block a page fetch. Ordering across commands is
/// therefore not guaranteed; the loader's session token keeps late page
/// results from being misapplied.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let source = Arc::new(HttpCandidateSource::new(settings.clone())?);
        let groups = Arc::new(GroupClient::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let groups = groups.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), groups.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// Request one listing page. `session` is echoed back untouched in the
    /// resulting event.
    pub fn fetch_page(&self, session: u64, kind: MediaKind, page_index: u32, page_size: u32) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            session,
            kind,
            page_index,
            page_size,
        });
    }

    pub fn load_group(&self, id: u64) {
        let _ = self.cmd_tx.send(EngineCommand::LoadGroup { id });
    }

    /// Persist the group: create when `id` is `None`, update otherwise.
    pub fn save_group(&self, id: Option<u64>, name: String, file_ids: Vec<FileId>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::SaveGroup { id, name, file_ids });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    source: &dyn CandidateSource,
    groups: &GroupClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage {
            session,
            kind,
            page_index,
            page_size,
        } => {
            console_debug!(
                "FetchPage session={} kind={:?} page_index={} page_size={}",
                session,
                kind,
                page_index,
                page_size
            );
            let result = source.fetch_page(kind, page_index, page_size).await;
            let _ = event_tx.send(EngineEvent::PageFetched {
                session,
                kind,
                page_index,
                result,
            });
        }
        EngineCommand::LoadGroup { id } => {
            let result = groups.fetch(id).await;
            let _ = event_tx.send(EngineEvent::GroupLoaded { result });
        }
        EngineCommand::SaveGroup { id, name, file_ids } => {
            let result = match id {
                Some(id) => groups.update(id, &name, &file_ids).await,
                None => groups.create(&name, &file_ids).await,
            };
            let _ = event_tx.send(EngineEvent::GroupSaved { result });
        }
    }
}
