//! Execution pipeline tests: strategy → toolchain → runner
//!
//! Toolchains are faked with `sh` scripts so these run on any Unix box.

mod common;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::*;
use mocha::exec::strategy::{Arg, ArtifactPath, CompileRecipe};
use mocha::exec::{
    CompileOutcome, Dispatch, Dispatcher, ExecutionStrategy, ProcessRunner, RunEvent, RunOutcome,
    ToolchainInvoker,
};
use mocha::Error;

const HELLO_C: &str = "int main() { return 0; }\n";
const BROKEN_C: &str = "int main() { SYNTAX_ERROR }\n";

fn started(dispatch: Dispatch) -> (mocha::exec::RunHandle, Option<String>) {
    match dispatch {
        Dispatch::Started {
            handle,
            diagnostics,
        } => (handle, diagnostics),
        other => panic!("Expected a started run, got {:?}", other),
    }
}

// ========================================================================
// Toolchain missing
// ========================================================================

#[test]
fn test_missing_compiler_reports_tool_and_starts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.c", HELLO_C);
    let recipe = CompileRecipe {
        compiler: "mocha-no-such-cc-7f3a",
        args: &[Arg::Source, Arg::Lit("-o"), Arg::Artifact],
        artifact: ArtifactPath::SiblingWithExtension("out"),
        run: &[Arg::Artifact],
        runtime_probe: None,
    };

    let dispatch = headless_dispatcher(Duration::from_secs(5)).dispatch_strategy(
        "C",
        &ExecutionStrategy::CompileThenRun(recipe),
        &source,
    );

    match &dispatch {
        Dispatch::ToolchainMissing { tool } => assert_eq!(tool, "mocha-no-such-cc-7f3a"),
        other => panic!("Expected ToolchainMissing, got {:?}", other),
    }
    assert_eq!(dispatch.console_text(), "mocha-no-such-cc-7f3a not found in PATH\n");
    assert!(!dir.path().join("hello.out").exists());
}

#[test]
fn test_unknown_language_is_the_only_error() {
    let result = headless_dispatcher(Duration::from_secs(5)).dispatch("Fortran", Path::new("a.f"));
    assert!(matches!(result, Err(Error::UnknownLanguage(_))));
}

// ========================================================================
// Compile failures and recovery
// ========================================================================

#[cfg(unix)]
#[test]
fn test_compile_failure_then_fixed_source_runs() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = write_fake_compiler(dir.path());
    let recipe = fake_recipe(&compiler, None);
    let source = write_source(dir.path(), "hello.fake", BROKEN_C);
    let invoker = ToolchainInvoker::new();

    match invoker.compile(&recipe, &source) {
        CompileOutcome::CompileFailed { diagnostics } => {
            assert!(diagnostics.contains("error: expected ';'"), "{}", diagnostics);
        }
        other => panic!("Expected CompileFailed, got {:?}", other),
    }
    assert!(!dir.path().join("hello.out").exists());

    std::fs::write(&source, HELLO_C).unwrap();
    assert!(invoker.compile(&recipe, &source).is_success());
    assert!(dir.path().join("hello.out").exists());

    let dispatch = headless_dispatcher(Duration::from_secs(10)).dispatch_strategy(
        "Fake",
        &ExecutionStrategy::CompileThenRun(recipe),
        &source,
    );
    let (handle, diagnostics) = started(dispatch);
    assert!(diagnostics.is_none());

    let report = handle.wait();
    assert_eq!(report.output, "Hello from hello\n");
    assert_eq!(report.outcome, RunOutcome::Completed { exit_code: Some(0) });
}

#[cfg(unix)]
#[test]
fn test_compile_failure_dispatch_carries_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = write_fake_compiler(dir.path());
    let source = write_source(dir.path(), "broken.fake", BROKEN_C);

    let dispatch = headless_dispatcher(Duration::from_secs(5)).dispatch_strategy(
        "Fake",
        &ExecutionStrategy::CompileThenRun(fake_recipe(&compiler, None)),
        &source,
    );

    assert!(!dispatch.is_started());
    let text = dispatch.console_text();
    assert!(text.starts_with("Compilation failed:\n"));
    assert!(text.contains("broken.fake:1:1: error"));
}

#[cfg(unix)]
#[test]
fn test_warnings_on_success_are_surfaced_and_run_proceeds() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = write_fake_compiler(dir.path());
    let source = write_source(dir.path(), "warny.fake", "WARN\n");

    let dispatch = headless_dispatcher(Duration::from_secs(10)).dispatch_strategy(
        "Fake",
        &ExecutionStrategy::CompileThenRun(fake_recipe(&compiler, None)),
        &source,
    );
    let (handle, diagnostics) = started(dispatch);

    assert!(diagnostics.unwrap().contains("warning: unused variable"));
    assert_eq!(handle.wait().output, "Hello from warny\n");
}

// ========================================================================
// Runtime probe fallback
// ========================================================================

#[cfg(unix)]
#[test]
fn test_missing_runtime_falls_back_to_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = write_fake_compiler(dir.path());
    let source = write_source(dir.path(), "app.fake", HELLO_C);
    let viewer = Arc::new(RecordingViewer::default());
    let dispatcher = Dispatcher::with_timeout(Duration::from_secs(5), viewer.clone());

    let dispatch = dispatcher.dispatch_strategy(
        "Fake",
        &ExecutionStrategy::CompileThenRun(fake_recipe(&compiler, Some("mocha-no-such-node-7f3a"))),
        &source,
    );

    match &dispatch {
        Dispatch::OpenedExternally { path, fallback, .. } => {
            assert_eq!(path, &dir.path().join("app.out"));
            assert!(fallback
                .as_deref()
                .unwrap()
                .starts_with("mocha-no-such-node-7f3a not found"));
        }
        other => panic!("Expected OpenedExternally, got {:?}", other),
    }
    let opened = viewer.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with("file://"));
    assert!(opened[0].ends_with("/app.out"));
}

// ========================================================================
// Bounded runner
// ========================================================================

#[cfg(unix)]
#[test]
fn test_direct_strategy_runs_interpreter_on_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.sh", "echo Hello\necho oops >&2\n");

    let dispatch = headless_dispatcher(Duration::from_secs(10)).dispatch_strategy(
        "Shell",
        &ExecutionStrategy::direct(&[Arg::Lit("sh"), Arg::Source]),
        &source,
    );
    let (handle, _) = started(dispatch);
    let report = handle.wait();

    assert!(report.output.contains("Hello\n"));
    assert!(report.output.contains("oops\n"));
    assert!(report.outcome.is_success());
}

#[cfg(unix)]
#[test]
fn test_run_uses_source_directory_as_cwd() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "marker.txt", "found\n");
    let source = write_source(dir.path(), "cat.sh", "cat marker.txt\n");

    let dispatch = headless_dispatcher(Duration::from_secs(10)).dispatch_strategy(
        "Shell",
        &ExecutionStrategy::direct(&[Arg::Lit("sh"), Arg::Source]),
        &source,
    );
    assert_eq!(started(dispatch).0.wait().output, "found\n");
}

#[cfg(unix)]
#[test]
fn test_timeout_kills_and_finishes_once() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "slow.sh", "echo start\nsleep 30\necho never\n");

    let dispatch = headless_dispatcher(Duration::from_millis(500)).dispatch_strategy(
        "Shell",
        &ExecutionStrategy::direct(&[Arg::Lit("sh"), Arg::Source]),
        &source,
    );
    let (handle, _) = started(dispatch);
    let started_at = Instant::now();
    let events: Vec<RunEvent> = handle.events().collect();

    assert!(started_at.elapsed() < Duration::from_secs(10));
    let finished: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Finished(outcome) => Some(outcome),
            _ => None,
        })
        .collect();
    assert_eq!(
        finished,
        vec![&RunOutcome::TimedOut {
            after: Duration::from_millis(500)
        }]
    );
    assert!(matches!(events.last(), Some(RunEvent::Finished(_))));

    let output: String = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Output(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(output.contains("start\n"));
    assert!(!output.contains("never"));
    assert_eq!(output.matches("[Execution timeout after").count(), 1);
}

#[test]
fn test_spawn_error_is_a_single_message() {
    let runner = ProcessRunner::new(Duration::from_secs(5));
    let command = mocha::exec::RunCommand::new(
        vec!["mocha-no-such-interpreter-7f3a".into()],
        std::env::temp_dir(),
    );
    let report = runner.start(&command).wait();

    assert_eq!(report.output.matches("[Error:").count(), 1);
    assert!(matches!(report.outcome, RunOutcome::Failed { .. }));
}

#[cfg(unix)]
#[test]
fn test_start_does_not_block_caller() {
    let runner = ProcessRunner::new(Duration::from_secs(10));
    let command = mocha::exec::RunCommand::new(
        vec!["sh".into(), "-c".into(), "sleep 1".into()],
        std::env::temp_dir(),
    );
    let before = Instant::now();
    let handle = runner.start(&command);
    assert!(before.elapsed() < Duration::from_millis(500));
    assert!(handle.try_next().is_none());
    assert!(handle.wait().outcome.is_success());
}

// ========================================================================
// Real toolchains (skipped when not installed)
// ========================================================================

#[test]
fn test_python_hello_world() {
    if !has_tool("python3") {
        eprintln!("python3 not installed, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.py", "print(\"Hello\")\n");

    let dispatch = headless_dispatcher(Duration::from_secs(30))
        .dispatch("Python", &source)
        .unwrap();
    let report = started(dispatch).0.wait();

    assert_eq!(report.output, "Hello\n");
    assert!(report.outcome.is_success());
}

#[test]
fn test_python_nonzero_exit_is_failure() {
    if !has_tool("python3") {
        eprintln!("python3 not installed, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "fail.py", "import sys\nsys.exit(4)\n");

    let dispatch = headless_dispatcher(Duration::from_secs(30))
        .dispatch("Python", &source)
        .unwrap();
    let report = started(dispatch).0.wait();

    assert_eq!(report.outcome, RunOutcome::Completed { exit_code: Some(4) });
    assert!(!report.outcome.is_success());
}
