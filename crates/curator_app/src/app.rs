use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use console_logging::console_info;
use curator_core::{update, EditorState, FileKind, Msg};
use curator_engine::EngineHandle;

use crate::effects::{BridgeEvent, EffectRunner};
use crate::persistence;

const PUMP_INTERVAL: Duration = Duration::from_millis(20);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// The operator console: a stdin command loop over the editor state machine.
pub struct App {
    state: EditorState,
    runner: EffectRunner,
    state_dir: PathBuf,
    group_id: Option<u64>,
    /// Group loads/saves issued but not yet answered.
    pending_group_ops: u32,
}

impl App {
    pub fn new(engine: EngineHandle, group_id: Option<u64>, state_dir: PathBuf) -> Self {
        Self {
            state: EditorState::new(),
            runner: EffectRunner::new(engine),
            state_dir,
            group_id,
            pending_group_ops: 0,
        }
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        match self.group_id {
            Some(id) => {
                console_info!("Editing group {}", id);
                self.runner.load_group(id);
                self.pending_group_ops += 1;
                self.settle();
            }
            None => {
                let draft = persistence::load_draft(&self.state_dir);
                if !draft.is_empty() {
                    println!("Restored draft with {} member(s).", draft.len());
                    self.apply(Msg::MembersRestored(draft));
                }
            }
        }
        print_help();
        self.render();
        self.state.consume_dirty();

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if !self.handle_line(line.trim()) {
                break;
            }
            self.settle();
            if self.state.consume_dirty() {
                self.render();
            }
        }

        if self.group_id.is_none() {
            persistence::save_draft(&self.state_dir, &self.state.members_snapshot());
        }
        Ok(())
    }

    /// Returns false when the loop should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("kind") => match parts.next() {
                Some("none") => self.apply(Msg::KindSelected(None)),
                Some(name) => match parse_kind(name) {
                    Some(kind) => self.apply(Msg::KindSelected(Some(kind))),
                    None => println!("Unknown kind: {name}"),
                },
                None => println!("usage: kind <image|video|audio|document|vector|archive|none>"),
            },
            Some("more") => self.apply(Msg::LoadMoreClicked),
            Some("toggle") => {
                for id in parse_ids(parts) {
                    self.apply(Msg::SelectionToggled(id));
                }
            }
            Some("select") => {
                let ids = parse_ids(parts);
                self.apply(Msg::SelectionReplaced(ids));
            }
            Some("add") => self.apply(Msg::AddSelectedClicked),
            Some("rm") => {
                for id in parse_ids(parts) {
                    self.apply(Msg::MemberRemoved(id));
                }
            }
            Some("show") => self.render(),
            Some("commit") => {
                let name = parts.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    println!("usage: commit <group name>");
                } else {
                    self.runner
                        .save_group(self.group_id, name, self.state.member_ids());
                    self.pending_group_ops += 1;
                }
            }
            Some("help") => print_help(),
            Some("quit") | Some("exit") => return false,
            Some(other) => println!("Unknown command: {other} (try `help`)"),
        }
        true
    }

    fn apply(&mut self, msg: Msg) {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Drains engine events once, routing them into the state machine.
    fn pump(&mut self) {
        for event in self.runner.drain() {
            match event {
                BridgeEvent::Core(msg) => {
                    if matches!(msg, Msg::MembersRestored(_)) {
                        self.pending_group_ops = self.pending_group_ops.saturating_sub(1);
                    }
                    self.apply(msg);
                }
                BridgeEvent::GroupSaved(group) => {
                    self.pending_group_ops = self.pending_group_ops.saturating_sub(1);
                    println!("Saved group {} (\"{}\").", group.id, group.name);
                    if self.group_id.is_none() {
                        // The draft's members now live in a backend group;
                        // restoring the draft next session would duplicate
                        // them into a second group.
                        persistence::discard_draft(&self.state_dir);
                    }
                    self.group_id = Some(group.id);
                }
                BridgeEvent::GroupFailed(err) => {
                    self.pending_group_ops = self.pending_group_ops.saturating_sub(1);
                    println!("Backend error: {err}");
                }
            }
        }
    }

    /// Pumps until no fetch or group operation is outstanding, so command
    /// output reflects the result of the command that triggered it.
    fn settle(&mut self) {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        loop {
            self.pump();
            if !self.state.view().loading && self.pending_group_ops == 0 {
                break;
            }
            if Instant::now() >= deadline {
                println!("Still waiting on the backend; results will appear later.");
                break;
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    fn render(&self) {
        let view = self.state.view();
        match view.kind {
            Some(kind) => println!("Filter: {}", kind.name()),
            None => println!("Filter: (none)"),
        }
        if let Some(error) = &view.last_error {
            println!("Last fetch failed: {error} (use `more` to retry)");
        }
        println!("Candidates ({}):", view.candidates.len());
        for row in &view.candidates {
            let mark = if row.selected { "x" } else { " " };
            println!("  [{mark}] {:>6}  {}  {}", row.id, row.display_name, row.path);
        }
        if view.loading {
            println!("  ... loading");
        } else if view.can_load_more {
            println!("  (more available: `more`)");
        }
        println!("Members ({}):", view.members.len());
        for row in &view.members {
            println!("      {:>6}  {}  {}", row.id, row.display_name, row.path);
        }
    }
}

fn parse_kind(name: &str) -> Option<FileKind> {
    match name {
        "image" => Some(FileKind::Image),
        "video" => Some(FileKind::Video),
        "audio" => Some(FileKind::Audio),
        "document" => Some(FileKind::Document),
        "vector" => Some(FileKind::Vector),
        "archive" => Some(FileKind::Archive),
        _ => None,
    }
}

fn parse_ids<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<u64> {
    parts
        .filter_map(|part| match part.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                println!("Not a file id: {part}");
                None
            }
        })
        .collect()
}

fn print_help() {
    println!("Commands:");
    println!("  kind <image|video|audio|document|vector|archive|none>  set the filter");
    println!("  more                 load the next page of candidates");
    println!("  toggle <id>...       check/uncheck candidates");
    println!("  select <id>...       replace the selection");
    println!("  add                  move checked candidates into the group");
    println!("  rm <id>...           remove members from the group");
    println!("  show                 print the current editor state");
    println!("  commit <name>        save the group to the backend");
    println!("  quit                 exit (drafts are kept for new groups)");
}
