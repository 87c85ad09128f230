//! Editing session - the foreground side of the program
//!
//! Owns the open tabs and is the only place that mutates documents and
//! consoles. Runs execute on background threads and report back through a
//! channel that the host drains with [`Session::process_messages`].
//!
//! ```text
//! Session::run(tab) ── save ── spawn thread ─► Dispatcher::dispatch ─► RunHandle events
//!        ▲                                                                 │
//!        └──── process_messages() ◄──── RunMsg { tab, generation } ◄───────┘
//! ```
//!
//! Every run bumps the tab's generation. Messages carrying an older
//! generation, or addressed to a closed tab, are dropped, so output of a
//! superseded run never reaches the console of its successor.

mod messages;
mod tab;

pub use messages::{RunMsg, RunResult};
pub use tab::{Console, Tab, TabId};

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::MochaConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::exec::{
    Dispatch, Dispatcher, ExternalViewer, NoopViewer, RunEvent, RunOutcome, SystemViewer,
};
use crate::language::{LanguageRegistry, LanguageSpec};

const STATUS_READY: &str = "Ready";

#[derive(Debug)]
pub struct Session {
    registry: &'static LanguageRegistry,
    dispatcher: Dispatcher,
    default_language: LanguageSpec,
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_tab_id: u64,
    status: String,
    msg_tx: Sender<RunMsg>,
    msg_rx: Receiver<RunMsg>,
}

impl Session {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let registry = dispatcher.registry();
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            registry,
            default_language: *registry.default_language(),
            dispatcher,
            tabs: Vec::new(),
            active: None,
            next_tab_id: 1,
            status: STATUS_READY.to_string(),
            msg_tx,
            msg_rx,
        }
    }

    /// Session wired from persisted settings
    pub fn from_config(config: &MochaConfig) -> Self {
        let viewer: Arc<dyn ExternalViewer> = if config.open_external {
            Arc::new(SystemViewer)
        } else {
            Arc::new(NoopViewer)
        };
        let mut session = Self::new(Dispatcher::with_timeout(config.run_timeout(), viewer));
        if let Err(e) = session.set_default_language(&config.default_language) {
            tracing::warn!(
                "Ignoring default_language {:?}: {}",
                config.default_language,
                e
            );
        }
        session
    }

    pub fn set_default_language(&mut self, language: &str) -> Result<()> {
        self.default_language = *self.registry.resolve(language)?;
        Ok(())
    }

    pub fn default_language(&self) -> &LanguageSpec {
        &self.default_language
    }

    pub fn registry(&self) -> &'static LanguageRegistry {
        self.registry
    }

    /// Status line text
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tab(id))
    }

    pub fn set_active(&mut self, id: TabId) -> Result<()> {
        self.get(id)?;
        self.active = Some(id);
        Ok(())
    }

    fn get(&self, id: TabId) -> Result<&Tab> {
        self.tab(id).ok_or(Error::UnknownTab(id.0))
    }

    fn get_mut(&mut self, id: TabId) -> Result<&mut Tab> {
        self.tabs
            .iter_mut()
            .find(|tab| tab.id == id)
            .ok_or(Error::UnknownTab(id.0))
    }

    fn push_tab(&mut self, document: Document, language: LanguageSpec) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        tracing::debug!(
            "Opening {} as {} ({})",
            id,
            language.id,
            document.display_name(language.extension)
        );
        self.tabs.push(Tab::new(id, document, language));
        self.active = Some(id);
        id
    }

    /// Untitled tab pre-filled with the language's sample program
    pub fn new_tab(&mut self, language: Option<&str>) -> Result<TabId> {
        let spec = match language {
            Some(id) => *self.registry.resolve(id)?,
            None => self.default_language,
        };
        Ok(self.push_tab(Document::with_text(spec.sample), spec))
    }

    /// Open a file, detecting its language from the extension
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<TabId> {
        let path = path.into();
        let spec = *self.registry.from_path(&path);
        let document = Document::from_file(path)?;
        Ok(self.push_tab(document, spec))
    }

    /// Open a file as an explicit language
    pub fn open_file_as(&mut self, path: impl Into<PathBuf>, language: &str) -> Result<TabId> {
        let spec = *self.registry.resolve(language)?;
        let document = Document::from_file(path.into())?;
        Ok(self.push_tab(document, spec))
    }

    /// Close a tab. A run still in flight finishes on its own; its output
    /// is discarded.
    pub fn close_tab(&mut self, id: TabId) -> Result<Tab> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.id == id)
            .ok_or(Error::UnknownTab(id.0))?;
        let tab = self.tabs.remove(index);
        if self.active == Some(id) {
            self.active = self
                .tabs
                .get(index.min(self.tabs.len().saturating_sub(1)))
                .map(|tab| tab.id);
        }
        if tab.running {
            tracing::debug!("Closed {} with a run in flight", id);
            self.update_status();
        }
        Ok(tab)
    }

    /// Switch a tab's language. Untitled tabs get the new language's sample;
    /// tabs backed by a file keep their text.
    pub fn set_language(&mut self, id: TabId, language: &str) -> Result<()> {
        let spec = *self.registry.resolve(language)?;
        let tab = self.get_mut(id)?;
        tab.language = spec;
        if tab.is_untitled() {
            tab.document.set_text(spec.sample);
            tab.document.is_modified = false;
        }
        tab.highlighter.set_language(&spec);
        Ok(())
    }

    /// Insert text at a char index
    pub fn insert(&mut self, id: TabId, char_idx: usize, text: &str) -> Result<()> {
        let tab = self.get_mut(id)?;
        let edit = tab.document.insert(char_idx, text);
        tab.highlighter.note_edit(edit);
        Ok(())
    }

    /// Delete a char range
    pub fn delete(&mut self, id: TabId, range: Range<usize>) -> Result<()> {
        let tab = self.get_mut(id)?;
        let edit = tab.document.delete(range);
        tab.highlighter.note_edit(edit);
        Ok(())
    }

    /// Re-highlight the blocks touched since the last refresh. Returns the
    /// recomputed block indices.
    pub fn refresh_highlights(&mut self, id: TabId) -> Result<Vec<usize>> {
        let tab = self.get_mut(id)?;
        Ok(tab.highlighter.refresh(&tab.document))
    }

    /// Save a tab (to `path`, or its current file), forcing the language
    /// extension
    pub fn save(&mut self, id: TabId, path: Option<&Path>) -> Result<PathBuf> {
        let tab = self.get_mut(id)?;
        let was_untitled = tab.is_untitled();
        let written = tab.document.save(path, tab.language.extension)?;
        let label = if was_untitled || path.is_some() {
            "Saved as"
        } else {
            "Saved"
        };
        tab.console
            .append(&format!("{}: {}\n", label, written.display()));
        Ok(written)
    }

    /// Completion candidates for `prefix` in a tab
    pub fn completions(&self, id: TabId, prefix: &str) -> Result<Vec<String>> {
        let tab = self.get(id)?;
        Ok(crate::completion::candidates(
            tab.language.keywords,
            &tab.document.text(),
            prefix,
        ))
    }

    /// Save the tab if needed and execute it in the background. Returns the
    /// run's generation. Untitled tabs must be saved with a path first.
    ///
    /// An unmodified file that is still on disk runs as it is, under its own
    /// name. Edited buffers are saved first with the language's extension.
    pub fn run(&mut self, id: TabId) -> Result<u64> {
        let registry = self.registry;
        let tab = self.get_mut(id)?;
        let spec = *registry.resolve(tab.language.id)?;
        let source = match &tab.document.file_path {
            Some(path) if !tab.document.is_modified && path.is_file() => path.clone(),
            _ => tab.document.save(None, spec.extension)?,
        };
        let name = tab.document.display_name(spec.extension);

        tab.generation += 1;
        tab.running = true;
        let generation = tab.generation;
        tab.console
            .append(&format!("Running {} ({})...\n", name, spec.id));

        self.status = format!("Running {} ({})...", name, spec.id);
        tracing::info!("{}: run generation {} of {}", id, generation, source.display());

        let dispatcher = self.dispatcher.clone();
        let tx = self.msg_tx.clone();
        std::thread::spawn(move || {
            run_in_background(dispatcher, spec.id, source, id, generation, tx);
        });
        Ok(generation)
    }

    pub fn is_running(&self, id: TabId) -> bool {
        self.tab(id).is_some_and(|tab| tab.running)
    }

    /// Apply pending messages from background runs. Returns true if any
    /// console or status changed.
    pub fn process_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            changed |= self.apply(msg);
        }
        changed
    }

    fn apply(&mut self, msg: RunMsg) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|tab| tab.id == msg.tab()) else {
            tracing::debug!("Dropping message for closed {}", msg.tab());
            return false;
        };
        if msg.generation() != tab.generation {
            tracing::debug!(
                "Dropping stale output of {} generation {} (current {})",
                tab.id,
                msg.generation(),
                tab.generation
            );
            return false;
        }

        match msg {
            RunMsg::Output { text, .. } => tab.console.append(&text),
            RunMsg::Finished { result, .. } => {
                tracing::debug!("{} run finished: {:?}", tab.id, result);
                tab.running = false;
                tab.last_result = Some(result);
                self.update_status();
            }
        }
        true
    }

    fn update_status(&mut self) {
        if !self.tabs.iter().any(|tab| tab.running) {
            self.status = STATUS_READY.to_string();
        }
    }

    /// Pump messages until the tab's current run finishes or `timeout`
    /// passes. Returns whether the run finished.
    pub fn wait_for_run(&mut self, id: TabId, timeout: Duration) -> Result<bool> {
        self.get(id)?;
        let deadline = Instant::now() + timeout;
        loop {
            self.process_messages();
            if !self.is_running(id) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

/// Body of a run thread: dispatch, then forward every event tagged with
/// the run's generation
fn run_in_background(
    dispatcher: Dispatcher,
    language: &'static str,
    source: PathBuf,
    tab: TabId,
    generation: u64,
    tx: Sender<RunMsg>,
) {
    let output = |text: String| {
        tx.send(RunMsg::Output {
            tab,
            generation,
            text,
        })
        .is_ok()
    };
    let finish = |result: RunResult| {
        let _ = tx.send(RunMsg::Finished {
            tab,
            generation,
            result,
        });
    };

    let dispatch = match dispatcher.dispatch(language, &source) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            output(format!("\n[Error: {}]\n", e));
            finish(RunResult::NotRun);
            return;
        }
    };

    let preface = dispatch.console_text();
    if !preface.is_empty() && !output(preface) {
        return;
    }

    let result = match dispatch {
        Dispatch::Started { handle, .. } => {
            let mut outcome = None;
            for event in handle.events() {
                match event {
                    RunEvent::Output(text) => {
                        if !output(text) {
                            tracing::debug!("{}: session gone, abandoning {}", tab, handle.id());
                            return;
                        }
                    }
                    RunEvent::Finished(done) => outcome = Some(done),
                }
            }
            RunResult::Process(outcome.unwrap_or_else(|| RunOutcome::Failed {
                reason: "runner stopped without a result".to_string(),
            }))
        }
        Dispatch::OpenedExternally { .. } => RunResult::OpenedExternally,
        Dispatch::OpenFailed { .. }
        | Dispatch::CompileFailed { .. }
        | Dispatch::ToolchainMissing { .. }
        | Dispatch::Unsupported { .. } => RunResult::NotRun,
    };
    finish(result);
}
