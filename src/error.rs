//! Library error type
//!
//! Only conditions the caller must handle show up here. Compile failures,
//! missing toolchains, timeouts and spawn errors are ordinary results of a
//! run and travel as data (`CompileOutcome`, `RunOutcome`, `Dispatch`).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("extension {extension} is registered by both {first} and {second}")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("no tab with id {0}")]
    UnknownTab(u64),

    #[error("{0} has not been saved to disk")]
    Unsaved(String),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
