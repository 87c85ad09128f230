//! Dispatcher: language id + saved file → running process (or a report)
//!
//! One entry point for every language. The registry picks the strategy, the
//! invoker compiles and builds the run command, the runner starts it. Files
//! that are viewed rather than run go to an [`ExternalViewer`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::runner::{ProcessRunner, RunHandle};
use super::strategy::ExecutionStrategy;
use super::toolchain::{Preparation, ToolchainInvoker};
use crate::error::Result;
use crate::language::LanguageRegistry;

/// Opens a file URI outside the process (browser, default app)
pub trait ExternalViewer: Send + Sync + fmt::Debug {
    fn open(&self, uri: &str) -> std::result::Result<(), String>;
}

/// Hands URIs to the desktop's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl ExternalViewer for SystemViewer {
    fn open(&self, uri: &str) -> std::result::Result<(), String> {
        tracing::info!("Opening {} externally", uri);
        open::that_detached(uri).map_err(|e| e.to_string())
    }
}

/// Accepts every URI without opening anything (headless use)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewer;

impl ExternalViewer for NoopViewer {
    fn open(&self, uri: &str) -> std::result::Result<(), String> {
        tracing::debug!("External viewer disabled, not opening {}", uri);
        Ok(())
    }
}

/// `path` joined onto the current directory when relative
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// `file://` URI for a path, made absolute against the current directory
pub fn file_uri(path: &Path) -> String {
    let text = absolute(path).to_string_lossy().replace('\\', "/");
    let mut uri = String::from("file://");
    if !text.starts_with('/') {
        uri.push('/');
    }
    for ch in text.chars() {
        match ch {
            ' ' => uri.push_str("%20"),
            '#' => uri.push_str("%23"),
            '?' => uri.push_str("%3F"),
            '%' => uri.push_str("%25"),
            _ => uri.push(ch),
        }
    }
    uri
}

/// Result of asking to execute one file
#[derive(Debug)]
pub enum Dispatch {
    /// A process is running. `diagnostics` holds compiler warnings.
    Started {
        handle: RunHandle,
        diagnostics: Option<String>,
    },
    /// Handed to the external viewer; no process was started
    OpenedExternally {
        path: PathBuf,
        uri: String,
        diagnostics: Option<String>,
        /// Why the file was opened instead of run, if it was meant to run
        fallback: Option<String>,
    },
    /// The viewer refused the URI
    OpenFailed { uri: String, reason: String },
    CompileFailed { diagnostics: String },
    ToolchainMissing { tool: String },
    Unsupported { language: String },
}

impl Dispatch {
    pub fn is_started(&self) -> bool {
        matches!(self, Dispatch::Started { .. })
    }

    /// The console text this result contributes before any run output
    pub fn console_text(&self) -> String {
        match self {
            Dispatch::Started { diagnostics, .. } => diagnostics.clone().unwrap_or_default(),
            Dispatch::OpenedExternally {
                path,
                diagnostics,
                fallback,
                ..
            } => {
                let mut text = diagnostics.clone().unwrap_or_default();
                match fallback {
                    Some(note) => text.push_str(&format!("{}\n", note)),
                    None => text.push_str(&format!(
                        "Opened {} in browser\n",
                        path.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default()
                    )),
                }
                text
            }
            Dispatch::OpenFailed { uri, reason } => {
                format!("\n[Error: could not open {}: {}]\n", uri, reason)
            }
            Dispatch::CompileFailed { diagnostics } => {
                let mut text = format!("Compilation failed:\n{}", diagnostics);
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                text
            }
            Dispatch::ToolchainMissing { tool } => format!("{} not found in PATH\n", tool),
            Dispatch::Unsupported { language } => {
                format!("Cannot run {} files (compiler/interpreter not found)\n", language)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: &'static LanguageRegistry,
    invoker: ToolchainInvoker,
    runner: ProcessRunner,
    viewer: Arc<dyn ExternalViewer>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(
            LanguageRegistry::builtin(),
            ProcessRunner::default(),
            Arc::new(SystemViewer),
        )
    }
}

impl Dispatcher {
    pub fn new(
        registry: &'static LanguageRegistry,
        runner: ProcessRunner,
        viewer: Arc<dyn ExternalViewer>,
    ) -> Self {
        Self {
            registry,
            invoker: ToolchainInvoker::new(),
            runner,
            viewer,
        }
    }

    /// Builtin registry with the given run timeout and viewer
    pub fn with_timeout(timeout: Duration, viewer: Arc<dyn ExternalViewer>) -> Self {
        Self::new(LanguageRegistry::builtin(), ProcessRunner::new(timeout), viewer)
    }

    pub fn registry(&self) -> &'static LanguageRegistry {
        self.registry
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    /// Execute a saved file as `language`. An unregistered language is the
    /// only `Err`; every toolchain problem is reported in the `Dispatch`.
    ///
    /// Compiles synchronously: call from a background thread when the caller
    /// has to stay responsive.
    pub fn dispatch(&self, language: &str, source: &Path) -> Result<Dispatch> {
        let spec = self.registry.resolve(language)?;
        tracing::info!(
            "Dispatching {} as {} ({})",
            source.display(),
            spec.id,
            spec.strategy.kind()
        );
        Ok(self.dispatch_strategy(spec.id, &spec.strategy, source))
    }

    /// Execute a saved file with an explicit strategy. Relative sources are
    /// resolved first so compiled artifacts never go through a PATH lookup.
    pub fn dispatch_strategy(
        &self,
        language: &str,
        strategy: &ExecutionStrategy,
        source: &Path,
    ) -> Dispatch {
        let source = absolute(source);
        match self.invoker.prepare(strategy, &source) {
            Preparation::Run {
                command,
                diagnostics,
            } => Dispatch::Started {
                handle: self.runner.start(&command),
                diagnostics,
            },
            Preparation::OpenExternal {
                path,
                diagnostics,
                fallback,
            } => {
                let uri = file_uri(&path);
                match self.viewer.open(&uri) {
                    Ok(()) => Dispatch::OpenedExternally {
                        path,
                        uri,
                        diagnostics,
                        fallback,
                    },
                    Err(reason) => {
                        tracing::warn!("Failed to open {}: {}", uri, reason);
                        Dispatch::OpenFailed { uri, reason }
                    }
                }
            }
            Preparation::CompileFailed { diagnostics } => Dispatch::CompileFailed { diagnostics },
            Preparation::ToolchainMissing { tool } => Dispatch::ToolchainMissing { tool },
            Preparation::Unsupported => Dispatch::Unsupported {
                language: language.to_string(),
            },
        }
    }
}
