//! Bounded process runner
//!
//! Starts a child process off the caller's thread, streams its output back
//! through a channel and enforces a wall-clock timeout.
//!
//! ```text
//! start() ──► supervisor thread ──spawn──► child
//!                 ▲      │                   │ stdout ──► reader thread ─┐
//!                 │      │                   │ stderr ──► reader thread ─┤
//!                 └──────┼────── Chunk ◄─────────────────────────────────┘
//!                        ▼
//!                 RunEvent::Output* , RunEvent::Finished (once)
//! ```

use std::io::Read;
use std::process::{Child, ExitStatus, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::strategy::RunCommand;

/// Wall-clock limit for one run, from spawn to exit
pub const RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// How often the supervisor checks the child when no output arrives
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to keep reading after exit. Grandchildren may hold the pipes open.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

const READ_CHUNK: usize = 8 * 1024;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one run, used to attribute output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl RunId {
    fn next() -> Self {
        RunId(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process exited on its own. `exit_code` is None when it was
    /// terminated by a signal.
    Completed { exit_code: Option<i32> },
    /// The deadline passed and the process group was killed
    TimedOut { after: Duration },
    /// The process could not be started
    Failed { reason: String },
}

impl RunOutcome {
    /// Exit code 0
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { exit_code: Some(0) })
    }
}

/// Message delivered through a run's channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Console text from stdout or stderr, in capture order
    Output(String),
    /// Always the last event, sent exactly once
    Finished(RunOutcome),
}

/// Everything a run produced, for callers that block on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: String,
    pub outcome: RunOutcome,
}

/// One in-flight run
#[derive(Debug)]
pub struct RunHandle {
    id: RunId,
    command: RunCommand,
    deadline: Instant,
    events: Receiver<RunEvent>,
    supervisor: Option<JoinHandle<()>>,
}

impl RunHandle {
    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn command(&self) -> &RunCommand {
        &self.command
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Next event if one is ready; never blocks
    pub fn try_next(&self) -> Option<RunEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Next event, waiting at most `timeout`
    pub fn next_timeout(&self, timeout: Duration) -> Option<RunEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Blocking iterator over the remaining events; ends after `Finished`
    pub fn events(&self) -> impl Iterator<Item = RunEvent> + '_ {
        self.events.iter()
    }

    /// Block until the run finishes and collect its output
    pub fn wait(mut self) -> RunReport {
        let mut output = String::new();
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                RunEvent::Output(text) => output.push_str(&text),
                RunEvent::Finished(done) => outcome = Some(done),
            }
        }
        if let Some(supervisor) = self.supervisor.take() {
            let _ = supervisor.join();
        }
        RunReport {
            output,
            outcome: outcome.unwrap_or_else(|| RunOutcome::Failed {
                reason: "runner stopped without a result".to_string(),
            }),
        }
    }
}

/// Starts child processes with a fixed timeout
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(RUN_TIMEOUT)
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start `command`. Returns at once; spawning happens on the supervisor
    /// thread so a slow or failing spawn never blocks the caller.
    pub fn start(&self, command: &RunCommand) -> RunHandle {
        let id = RunId::next();
        let (tx, rx) = mpsc::channel();
        let deadline = Instant::now() + self.timeout;
        let timeout = self.timeout;
        let to_run = command.clone();

        tracing::info!("Starting {} in {}: {}", id, command.cwd.display(), command);

        let supervisor = thread::Builder::new()
            .name(format!("mocha-{}", id))
            .spawn(move || supervise(id, to_run, timeout, tx));

        let supervisor = match supervisor {
            Ok(handle) => Some(handle),
            Err(e) => {
                // No thread to report through: answer on the channel directly
                tracing::error!("Failed to start supervisor for {}: {}", id, e);
                let (tx, rx) = mpsc::channel();
                let reason = format!("could not start runner thread: {}", e);
                let _ = tx.send(RunEvent::Output(format!("\n[Error: {}]\n", reason)));
                let _ = tx.send(RunEvent::Finished(RunOutcome::Failed { reason }));
                return RunHandle {
                    id,
                    command: command.clone(),
                    deadline,
                    events: rx,
                    supervisor: None,
                };
            }
        };

        RunHandle {
            id,
            command: command.clone(),
            deadline,
            events: rx,
            supervisor,
        }
    }
}

enum Chunk {
    Data(String),
    Eof,
}

/// Sends events for one run and remembers whether anyone is still listening
struct Emitter {
    id: RunId,
    tx: Sender<RunEvent>,
    listening: bool,
}

impl Emitter {
    fn output(&mut self, text: String) {
        if self.listening && self.tx.send(RunEvent::Output(text)).is_err() {
            tracing::debug!("{}: receiver dropped, discarding output", self.id);
            self.listening = false;
        }
    }

    fn finish(self, outcome: RunOutcome) {
        tracing::info!("{} finished: {:?}", self.id, outcome);
        let _ = self.tx.send(RunEvent::Finished(outcome));
    }
}

fn supervise(id: RunId, command: RunCommand, timeout: Duration, tx: Sender<RunEvent>) {
    let mut emitter = Emitter {
        id,
        tx,
        listening: true,
    };

    let Some(mut cmd) = command.to_command() else {
        let reason = "empty command line".to_string();
        emitter.output(format!("\n[Error: {}]\n", reason));
        emitter.finish(RunOutcome::Failed { reason });
        return;
    };

    // A group of its own lets the timeout reach grandchildren such as the
    // program `go run` or `dotnet run` builds and starts
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let spawned = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            let reason = format!("failed to start {}: {}", command.program_display(), e);
            tracing::warn!("{}: {}", id, reason);
            emitter.output(format!("\n[Error: {}]\n", reason));
            emitter.finish(RunOutcome::Failed { reason });
            return;
        }
    };
    let deadline = Instant::now() + timeout;

    let (chunk_tx, chunk_rx) = mpsc::channel();
    let mut open_streams = 0;
    if let Some(stdout) = child.stdout.take() {
        open_streams += spawn_reader(stdout, chunk_tx.clone()) as usize;
    }
    if let Some(stderr) = child.stderr.take() {
        open_streams += spawn_reader(stderr, chunk_tx.clone()) as usize;
    }
    drop(chunk_tx);

    let mut exited: Option<(ExitStatus, Instant)> = None;

    loop {
        match chunk_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Chunk::Data(text)) => emitter.output(text),
            Ok(Chunk::Eof) => open_streams = open_streams.saturating_sub(1),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Both pipes are closed but the child may still be running
                open_streams = 0;
                thread::sleep(POLL_INTERVAL);
            }
        }

        if exited.is_none() {
            match child.try_wait() {
                Ok(Some(status)) => exited = Some((status, Instant::now())),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("{}: failed to poll child: {}", id, e);
                    kill(id, &mut child);
                    let reason = format!("lost track of process: {}", e);
                    emitter.output(format!("\n[Error: {}]\n", reason));
                    emitter.finish(RunOutcome::Failed { reason });
                    return;
                }
            }
        }

        match exited {
            Some((status, at)) => {
                if open_streams == 0 || at.elapsed() >= DRAIN_GRACE {
                    emitter.finish(RunOutcome::Completed {
                        exit_code: status.code(),
                    });
                    return;
                }
            }
            None if Instant::now() >= deadline => {
                tracing::warn!("{} timed out after {:?}, killing", id, timeout);
                kill(id, &mut child);
                while let Ok(chunk) = chunk_rx.try_recv() {
                    if let Chunk::Data(text) = chunk {
                        emitter.output(text);
                    }
                }
                emitter.output(format!(
                    "\n[Execution timeout after {} seconds]\n",
                    timeout.as_secs()
                ));
                emitter.finish(RunOutcome::TimedOut { after: timeout });
                return;
            }
            None => {}
        }
    }
}

/// Kill the child's whole process group, then the child itself, and reap it
fn kill(id: RunId, child: &mut Child) {
    #[cfg(unix)]
    {
        let Ok(pgid) = i32::try_from(child.id()) else {
            tracing::debug!("{}: pid out of range for a process group", id);
            return kill_child(id, child);
        };
        // SAFETY: kill(2) with a negative pid only signals the group created
        // for this child by process_group(0)
        if unsafe { libc::kill(-pgid, libc::SIGKILL) } != 0 {
            tracing::debug!(
                "{}: group kill failed: {}",
                id,
                std::io::Error::last_os_error()
            );
        }
    }
    kill_child(id, child);
}

fn kill_child(id: RunId, child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("{}: kill failed: {}", id, e);
    }
    let _ = child.wait();
}

/// Read a pipe to EOF, forwarding decoded text. Returns false if the reader
/// thread could not be started.
fn spawn_reader<R: Read + Send + 'static>(mut pipe: R, tx: Sender<Chunk>) -> bool {
    thread::Builder::new()
        .name("mocha-reader".to_string())
        .spawn(move || {
            let mut buf = [0u8; READ_CHUNK];
            let mut pending: Vec<u8> = Vec::new();
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        pending.extend_from_slice(&buf[..n]);
                        let text = take_utf8(&mut pending);
                        if !text.is_empty() && tx.send(Chunk::Data(text)).is_err() {
                            return;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            if !pending.is_empty() {
                let _ = tx.send(Chunk::Data(String::from_utf8_lossy(&pending).into_owned()));
            }
            let _ = tx.send(Chunk::Eof);
        })
        .is_ok()
}

/// Decode the longest valid prefix of `pending`, keeping an incomplete
/// trailing sequence for the next read. Invalid bytes become U+FFFD.
fn take_utf8(pending: &mut Vec<u8>) -> String {
    let mut out = String::new();
    let mut rest: &[u8] = pending;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                rest = &[];
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                match e.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[bad..];
                    }
                    None => {
                        rest = after;
                        break;
                    }
                }
            }
        }
    }
    let keep = rest.to_vec();
    *pending = keep;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_utf8_keeps_partial_sequence() {
        // "é" is 0xC3 0xA9
        let mut pending = vec![b'a', 0xC3];
        assert_eq!(take_utf8(&mut pending), "a");
        assert_eq!(pending, vec![0xC3]);

        pending.push(0xA9);
        assert_eq!(take_utf8(&mut pending), "é");
        assert!(pending.is_empty());
    }

    #[test]
    fn test_take_utf8_replaces_invalid_bytes() {
        let mut pending = vec![b'a', 0xFF, b'b'];
        assert_eq!(take_utf8(&mut pending), "a\u{FFFD}b");
        assert!(pending.is_empty());
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = RunId::next();
        let b = RunId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_program_fails_once() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let command = RunCommand::new(
            vec!["mocha-no-such-program-7f3a".into()],
            std::env::temp_dir(),
        );
        let handle = runner.start(&command);
        let events: Vec<_> = handle.events().collect();

        let finished = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Finished(_)))
            .count();
        assert_eq!(finished, 1);
        assert!(matches!(events.last(), Some(RunEvent::Finished(RunOutcome::Failed { .. }))));
        assert!(matches!(&events[0], RunEvent::Output(text) if text.contains("[Error:")));
    }

    #[test]
    fn test_empty_command_fails() {
        let report = ProcessRunner::default().start(&RunCommand::new(vec![], ".".into())).wait();
        assert!(matches!(report.outcome, RunOutcome::Failed { .. }));
        assert!(report.output.contains("empty command line"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_and_stderr_are_both_forwarded() {
        let command = RunCommand::new(
            vec!["sh".into(), "-c".into(), "echo out; echo err >&2; exit 3".into()],
            std::env::temp_dir(),
        );
        let report = ProcessRunner::default().start(&command).wait();
        assert!(report.output.contains("out\n"));
        assert!(report.output.contains("err\n"));
        assert_eq!(report.outcome, RunOutcome::Completed { exit_code: Some(3) });
        assert!(!report.outcome.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_process() {
        let runner = ProcessRunner::new(Duration::from_millis(300));
        let command = RunCommand::new(
            vec!["sh".into(), "-c".into(), "sleep 30".into()],
            std::env::temp_dir(),
        );
        let started = Instant::now();
        let report = runner.start(&command).wait();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            report.outcome,
            RunOutcome::TimedOut {
                after: Duration::from_millis(300)
            }
        );
        assert_eq!(report.output.matches("[Execution timeout after").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_grandchildren() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("late.txt");
        let runner = ProcessRunner::new(Duration::from_millis(300));
        let command = RunCommand::new(
            vec![
                "sh".into(),
                "-c".into(),
                "(sleep 2; echo late > late.txt) & wait".into(),
            ],
            dir.path().to_path_buf(),
        );

        let report = runner.start(&command).wait();
        assert!(matches!(report.outcome, RunOutcome::TimedOut { .. }));

        thread::sleep(Duration::from_secs(3));
        assert!(!marker.exists(), "grandchild outlived the timeout");
    }

    #[cfg(unix)]
    #[test]
    fn test_closed_pipes_still_wait_for_exit() {
        let command = RunCommand::new(
            vec!["sh".into(), "-c".into(), "exec >&- 2>&-; sleep 1".into()],
            std::env::temp_dir(),
        );
        let started = Instant::now();
        let report = ProcessRunner::new(Duration::from_secs(10)).start(&command).wait();

        assert_eq!(report.outcome, RunOutcome::Completed { exit_code: Some(0) });
        assert!(started.elapsed() >= Duration::from_millis(900));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
