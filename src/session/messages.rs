//! Messages sent from background runs to the foreground session

use crate::exec::RunOutcome;

use super::tab::TabId;

/// How a run request ended, as seen by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// A process ran to one of its end states
    Process(RunOutcome),
    /// The file went to the external viewer
    OpenedExternally,
    /// Nothing was executed (compile failure, missing toolchain,
    /// unsupported language, viewer error)
    NotRun,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        match self {
            RunResult::Process(outcome) => outcome.is_success(),
            RunResult::OpenedExternally => true,
            RunResult::NotRun => false,
        }
    }
}

/// Tagged with the tab and the run generation that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMsg {
    Output {
        tab: TabId,
        generation: u64,
        text: String,
    },
    Finished {
        tab: TabId,
        generation: u64,
        result: RunResult,
    },
}

impl RunMsg {
    pub fn tab(&self) -> TabId {
        match self {
            RunMsg::Output { tab, .. } | RunMsg::Finished { tab, .. } => *tab,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            RunMsg::Output { generation, .. } | RunMsg::Finished { generation, .. } => *generation,
        }
    }
}
