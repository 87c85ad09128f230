//! Language execution
//!
//! Turns a saved source file into a running process, a compile report or an
//! external-viewer hand-off.
//!
//! ## Architecture
//!
//! ```text
//! Dispatcher::dispatch(language, file)
//!   → LanguageRegistry::resolve → ExecutionStrategy
//!   → ToolchainInvoker::prepare (compile step, runtime probe, scaffold)
//!       ├─ Preparation::Run          → ProcessRunner::start → RunHandle
//!       ├─ Preparation::OpenExternal → ExternalViewer::open
//!       └─ CompileFailed / ToolchainMissing / Unsupported → report only
//! ```
//!
//! Every outcome except an unregistered language is data, not an error: the
//! caller turns it into console text.

mod dispatch;
mod runner;
pub mod strategy;
mod toolchain;

pub use dispatch::{file_uri, Dispatch, Dispatcher, ExternalViewer, NoopViewer, SystemViewer};
pub use runner::{ProcessRunner, RunEvent, RunHandle, RunId, RunOutcome, RunReport, RUN_TIMEOUT};
pub use strategy::{ExecutionStrategy, RunCommand};
pub use toolchain::{CompileOutcome, Preparation, ToolchainInvoker};
